// Listing and search query parameters
//
// Rendering goes through a `BTreeMap` so keys always come out in
// lexicographic order: identical filters produce byte-identical URLs.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const QUERY_KEY_PAGE: &str = "page";
pub const QUERY_KEY_LIMIT: &str = "limit";
pub const QUERY_KEY_SORT_BY: &str = "sortBy";
pub const QUERY_KEY_CREATED_BEFORE: &str = "createdBefore";
pub const QUERY_KEY_CREATED_AFTER: &str = "createdAfter";
pub const QUERY_KEY_UPDATED_BEFORE: &str = "updatedBefore";
pub const QUERY_KEY_UPDATED_AFTER: &str = "updatedAfter";
pub const QUERY_KEY_INCLUDE_ARCHIVED: &str = "includeArchived";
pub const QUERY_KEY_SEARCH: &str = "q";

pub const DEFAULT_LIMIT: u16 = 50;
pub const MAX_LIMIT: u16 = 250;
pub const DEFAULT_SEARCH_LIMIT: u16 = 20;

/// Canonical, key-sorted query pairs.
pub type QueryPairs = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Pagination, sort and time-window configuration for listing endpoints.
///
/// A missing filter is equivalent to [`QueryFilter::default`]: page 1,
/// limit 50, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryFilter {
    pub page: u64,
    /// 0 means "use the default"; values above 250 are clamped.
    pub limit: u16,
    pub sort_by: SortOrder,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub include_archived: bool,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: SortOrder::Asc,
            created_after: None,
            created_before: None,
            updated_after: None,
            updated_before: None,
            include_archived: false,
        }
    }
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }

    pub fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    pub fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    pub fn updated_after(mut self, at: DateTime<Utc>) -> Self {
        self.updated_after = Some(at);
        self
    }

    pub fn updated_before(mut self, at: DateTime<Utc>) -> Self {
        self.updated_before = Some(at);
        self
    }

    pub fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    /// Page number actually sent; page 0 is treated as page 1.
    pub fn effective_page(&self) -> u64 {
        self.page.max(1)
    }

    /// Limit actually sent, within `1..=250`.
    pub fn effective_limit(&self) -> u16 {
        effective_limit(self.limit, DEFAULT_LIMIT)
    }

    /// Render the filter as canonical query pairs.
    ///
    /// `page`, `limit` and `sortBy` are always present; time bounds and
    /// `includeArchived` only when set.
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs.insert(QUERY_KEY_PAGE, self.effective_page().to_string());
        pairs.insert(QUERY_KEY_LIMIT, self.effective_limit().to_string());
        pairs.insert(QUERY_KEY_SORT_BY, self.sort_by.to_string());

        let bounds = [
            (QUERY_KEY_CREATED_AFTER, self.created_after),
            (QUERY_KEY_CREATED_BEFORE, self.created_before),
            (QUERY_KEY_UPDATED_AFTER, self.updated_after),
            (QUERY_KEY_UPDATED_BEFORE, self.updated_before),
        ];
        for (key, bound) in bounds {
            if let Some(at) = bound {
                pairs.insert(key, at.to_rfc3339_opts(SecondsFormat::AutoSi, true));
            }
        }

        if self.include_archived {
            pairs.insert(QUERY_KEY_INCLUDE_ARCHIVED, "true".into());
        }

        pairs
    }
}

/// Free-text search parameters. A limit of 0 means 20.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: u16,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, limit: u16) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }

    pub fn effective_limit(&self) -> u16 {
        effective_limit(self.limit, DEFAULT_SEARCH_LIMIT)
    }

    /// `q` and `limit`, nothing else.
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs.insert(QUERY_KEY_LIMIT, self.effective_limit().to_string());
        pairs.insert(QUERY_KEY_SEARCH, self.query.clone());
        pairs
    }
}

fn effective_limit(requested: u16, default: u16) -> u16 {
    if requested == 0 {
        default
    } else {
        requested.min(MAX_LIMIT)
    }
}

/// Percent-encode canonical pairs into a query string.
pub fn encode_pairs(pairs: &QueryPairs) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_filter_renders_page_limit_sort() {
        let encoded = encode_pairs(&QueryFilter::default().to_pairs());
        assert_eq!(encoded, "limit=50&page=1&sortBy=asc");
    }

    #[test]
    fn keys_are_sorted_and_optional_fields_omitted_when_unset() {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let filter = QueryFilter::new()
            .page(3)
            .limit(10)
            .sort_by(SortOrder::Desc)
            .updated_before(at)
            .created_after(at)
            .include_archived(true);

        let encoded = encode_pairs(&filter.to_pairs());
        assert_eq!(
            encoded,
            "createdAfter=2024-06-15T10%3A30%3A00Z&includeArchived=true&limit=10&page=3&sortBy=desc&updatedBefore=2024-06-15T10%3A30%3A00Z"
        );
    }

    #[test]
    fn limits_are_clamped() {
        assert_eq!(QueryFilter::new().limit(0).effective_limit(), 50);
        assert_eq!(QueryFilter::new().limit(251).effective_limit(), 250);
        assert_eq!(QueryFilter::new().limit(7).effective_limit(), 7);
        assert_eq!(QueryFilter::new().page(0).effective_page(), 1);
    }

    #[test]
    fn search_defaults_to_twenty() {
        let encoded = encode_pairs(&SearchQuery::new("tomato", 0).to_pairs());
        assert_eq!(encoded, "limit=20&q=tomato");
    }

    #[test]
    fn search_query_is_percent_encoded() {
        let encoded = encode_pairs(&SearchQuery::new("crème fraîche & co", 5).to_pairs());
        assert_eq!(encoded, "limit=5&q=cr%C3%A8me+fra%C3%AEche+%26+co");
    }

    #[test]
    fn sort_order_round_trips_through_strings() {
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::Asc.to_string(), "asc");
    }
}
