// Response envelope and decode destinations
//
// Every endpoint wraps its payload in the same JSON shape:
// `{ "data": ..., "pagination": {...}?, "error": {...}?, "details": [...]? }`.
// Destinations are the capability the decoder writes `data` through; the
// decoder never inspects their concrete type.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// Uniform server envelope.
///
/// ```json
/// { "data": {...}, "pagination": {"page": 1, "limit": 50, "filteredCount": 3, "totalCount": 3},
///   "error": {"code": "...", "message": "..."}, "details": ["..."] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// The envelope's application error, if its `code` is non-empty.
    pub fn active_error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref().filter(|e| !e.is_empty())
    }
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            pagination: None,
            error: None,
            details: None,
        }
    }
}

/// Envelope probe used to check for an application error without
/// committing to a payload type.
pub(crate) type BareEnvelope = ApiResponse<IgnoredAny>;

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub filtered_count: u64,
    #[serde(default)]
    pub total_count: u64,
}

/// Application-level error carried inside the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorPayload {
    /// An empty code means "no application error".
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

// ── Destinations ─────────────────────────────────────────────────────

/// Where the decoder writes an envelope's payload.
///
/// The associated `Data` type is what `data` is deserialized into.
pub trait Destination {
    type Data: DeserializeOwned;

    /// Whether the decoder may write into this destination.
    fn is_settable(&self) -> bool {
        true
    }

    /// Store the decoded payload. `pagination` is passed through verbatim.
    fn fill(&mut self, data: Option<Self::Data>, pagination: Option<Pagination>);

    /// Whether the destination holds everything the caller asked for.
    fn is_complete(&self) -> bool {
        true
    }
}

/// A single decoded value.
#[derive(Debug)]
pub struct Slot<T>(Option<T>);

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Destination for Slot<T> {
    type Data = T;

    fn fill(&mut self, data: Option<T>, _pagination: Option<Pagination>) {
        self.0 = data;
    }

    fn is_complete(&self) -> bool {
        self.0.is_some()
    }
}

/// Caller-facing page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T: DeserializeOwned> Destination for PagedResult<T> {
    type Data = Vec<T>;

    fn fill(&mut self, data: Option<Vec<T>>, pagination: Option<Pagination>) {
        self.data = data.unwrap_or_default();
        if let Some(pagination) = pagination {
            self.pagination = pagination;
        }
    }
}

/// Destination for operations with no payload (archive, delete).
///
/// The body is still read and envelope errors are still surfaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Destination for Discard {
    type Data = IgnoredAny;

    fn fill(&mut self, _data: Option<IgnoredAny>, _pagination: Option<Pagination>) {}
}
