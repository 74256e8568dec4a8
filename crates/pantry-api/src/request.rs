// Request specification and construction
//
// A `RequestSpec` describes one call declaratively: method, path template,
// positional path parameters, query, body and auth mode. `RequestBuilder`
// turns it into a `PreparedRequest` against the client's base URL. Auth
// material is attached later, by the transport.

use std::borrow::Cow;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use strum::{AsRefStr, Display};
use tracing::trace;
use url::Url;

use crate::auth::AuthMode;
use crate::error::{Error, Fault, Stage, normalize};
use crate::query::{QueryFilter, QueryPairs, SearchQuery, encode_pairs};
use crate::validate::Input;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const CORRELATION_ID_HEADER: &str = "Correlation-ID";

/// Positional slot marker in path templates.
pub const PATH_SLOT: &str = "%s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A named path parameter. The name only feeds guards and observability.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<'a> {
    pub name: &'static str,
    pub value: &'a str,
}

/// Which guard applies to a search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Query,
    Username,
}

/// Image accepted by the avatar upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub bytes: Vec<u8>,
    /// One of `png`, `jpg`, `jpeg`, `gif` (case-insensitive).
    pub extension: String,
}

impl AvatarUpload {
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            bytes,
            extension: extension.into(),
        }
    }

    /// MIME type for the declared extension, if supported.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self.extension.to_ascii_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            _ => None,
        }
    }

    pub fn file_name(&self) -> String {
        format!("avatar.{}", self.extension.to_ascii_lowercase())
    }
}

/// Request body, as far as guards are concerned.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    /// The operation takes no body.
    None,
    /// The operation takes a body but the caller supplied none.
    Missing,
    Json(&'a dyn Input),
    Avatar(&'a AvatarUpload),
}

impl std::fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Missing => f.write_str("Missing"),
            Self::Json(_) => f.write_str("Json(..)"),
            Self::Avatar(a) => write!(f, "Avatar({} bytes, {:?})", a.bytes.len(), a.extension),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Listing<'a> {
    Unfiltered,
    /// `None` falls back to the client's default filter.
    Filtered(Option<&'a QueryFilter>),
}

/// Everything needed to issue one call.
#[derive(Debug, Clone)]
pub struct RequestSpec<'a> {
    operation: Cow<'static, str>,
    method: Method,
    template: &'a str,
    params: Vec<PathParam<'a>>,
    listing: Listing<'a>,
    search: Option<(SearchKind, SearchQuery)>,
    payload: Payload<'a>,
    auth: AuthMode,
    expects_data: bool,
    served: bool,
}

impl<'a> RequestSpec<'a> {
    pub fn new(operation: impl Into<Cow<'static, str>>, method: Method, template: &'a str) -> Self {
        Self {
            operation: operation.into(),
            method,
            template,
            params: Vec::new(),
            listing: Listing::Unfiltered,
            search: None,
            payload: Payload::None,
            auth: AuthMode::Authenticated,
            expects_data: false,
            served: true,
        }
    }

    pub fn get(operation: impl Into<Cow<'static, str>>, template: &'a str) -> Self {
        Self::new(operation, Method::Get, template)
    }

    pub fn post(operation: impl Into<Cow<'static, str>>, template: &'a str) -> Self {
        Self::new(operation, Method::Post, template)
    }

    pub fn put(operation: impl Into<Cow<'static, str>>, template: &'a str) -> Self {
        Self::new(operation, Method::Put, template)
    }

    pub fn patch(operation: impl Into<Cow<'static, str>>, template: &'a str) -> Self {
        Self::new(operation, Method::Patch, template)
    }

    pub fn delete(operation: impl Into<Cow<'static, str>>, template: &'a str) -> Self {
        Self::new(operation, Method::Delete, template)
    }

    /// Append the next positional path parameter.
    pub fn param(mut self, name: &'static str, value: &'a str) -> Self {
        self.params.push(PathParam { name, value });
        self
    }

    /// Mark the call as a listing. `None` means the client's default filter.
    pub fn filter(mut self, filter: Option<&'a QueryFilter>) -> Self {
        self.listing = Listing::Filtered(filter);
        self
    }

    pub fn search(mut self, kind: SearchKind, query: SearchQuery) -> Self {
        self.search = Some((kind, query));
        self
    }

    /// Attach a JSON body; `None` is a missing required input.
    pub fn json<I: Input>(mut self, input: Option<&'a I>) -> Self {
        self.payload = match input {
            Some(input) => Payload::Json(input),
            None => Payload::Missing,
        };
        self
    }

    pub fn avatar(mut self, upload: &'a AvatarUpload) -> Self {
        self.payload = Payload::Avatar(upload);
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn unauthenticated(self) -> Self {
        self.auth(AuthMode::Unauthenticated)
    }

    /// The operation returns `data`; a missing destination is an error.
    pub fn expect_data(mut self) -> Self {
        self.expects_data = true;
        self
    }

    /// Mark whether the server offers this route at all. An unserved route
    /// passes the guards, then fails to build.
    pub fn served(mut self, served: bool) -> Self {
        self.served = served;
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &str {
        self.template
    }

    pub fn params(&self) -> &[PathParam<'a>] {
        &self.params
    }

    pub fn search_term(&self) -> Option<(SearchKind, &SearchQuery)> {
        self.search.as_ref().map(|(kind, q)| (*kind, q))
    }

    pub fn payload(&self) -> Payload<'a> {
        self.payload
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth
    }

    pub fn expects_data(&self) -> bool {
        self.expects_data
    }

    /// The explicit filter, if this is a listing that carries one.
    pub fn explicit_filter(&self) -> Option<&'a QueryFilter> {
        match self.listing {
            Listing::Filtered(filter) => filter,
            Listing::Unfiltered => None,
        }
    }

    pub fn is_served(&self) -> bool {
        self.served
    }

    pub fn is_listing(&self) -> bool {
        matches!(self.listing, Listing::Filtered(_))
    }
}

// ── Prepared request ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedBody {
    Empty,
    Json(Vec<u8>),
    /// Single-file `multipart/form-data`; the transport renders the form.
    Multipart {
        field: &'static str,
        file_name: String,
        mime_type: &'static str,
        bytes: Vec<u8>,
    },
}

/// An HTTP request ready to send, minus authentication and trace headers.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: PreparedBody,
}

// ── Builder ──────────────────────────────────────────────────────────

/// Composes absolute URLs and bodies from request specs.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    default_filter: QueryFilter,
}

impl RequestBuilder {
    /// Only `http` and `https` base URLs that can carry a path are accepted.
    pub fn new(base_url: Url, default_filter: QueryFilter) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(normalize(
                Stage::Build,
                Fault::Template(format!("base URL {base_url} cannot carry API paths")),
            ));
        }
        Ok(Self {
            base_url,
            default_filter,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_filter(&self) -> &QueryFilter {
        &self.default_filter
    }

    /// Turn a spec into a request with URL, standard headers and encoded body.
    pub fn build(
        &self,
        spec: &RequestSpec<'_>,
        correlation_id: Option<&str>,
    ) -> Result<PreparedRequest, Error> {
        if !spec.is_served() {
            return Err(normalize(
                Stage::Build,
                Fault::Template(format!("{} is not served by this API", spec.operation())),
            ));
        }

        let mut url = self.resolve_path(spec.template(), spec.params())?;

        let pairs = self.query_pairs(spec);
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&encode_pairs(&pairs)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(id) = correlation_id {
            let value = HeaderValue::from_str(id).map_err(|e| {
                normalize(Stage::Build, Fault::Header(format!("invalid correlation id: {e}")))
            })?;
            headers.insert(HeaderName::from_static("correlation-id"), value);
        }

        let body = match spec.payload() {
            Payload::None | Payload::Missing => PreparedBody::Empty,
            Payload::Json(input) => {
                let bytes = input.encode_json().map_err(|source| {
                    normalize(
                        Stage::Build,
                        Fault::Json {
                            source,
                            body: String::new(),
                        },
                    )
                })?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                PreparedBody::Json(bytes)
            }
            Payload::Avatar(upload) => {
                let Some(mime_type) = upload.mime_type() else {
                    return Err(normalize(
                        Stage::Build,
                        Fault::Template(format!(
                            "unsupported avatar extension {:?}",
                            upload.extension
                        )),
                    ));
                };
                PreparedBody::Multipart {
                    field: "avatar",
                    file_name: upload.file_name(),
                    mime_type,
                    bytes: upload.bytes.clone(),
                }
            }
        };

        trace!(method = %spec.method(), %url, "prepared request");

        Ok(PreparedRequest {
            method: spec.method(),
            url,
            headers,
            body,
        })
    }

    /// Substitute positional parameters into `template` and resolve it
    /// against the base URL. Each parameter fills one whole path segment
    /// and is percent-encoded.
    pub fn resolve_path(&self, template: &str, params: &[PathParam<'_>]) -> Result<Url, Error> {
        let slots = template.matches(PATH_SLOT).count();
        if slots != params.len() {
            return Err(normalize(
                Stage::Build,
                Fault::Template(format!(
                    "path template {template:?} has {slots} slots but {} parameters were given",
                    params.len()
                )),
            ));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                normalize(
                    Stage::Build,
                    Fault::Template(format!("base URL {} cannot carry a path", self.base_url)),
                )
            })?;
            segments.pop_if_empty();

            let mut values = params.iter();
            for piece in template.split('/').filter(|s| !s.is_empty()) {
                if piece == PATH_SLOT {
                    let Some(param) = values.next() else {
                        return Err(normalize(
                            Stage::Build,
                            Fault::Template(format!("missing value for slot in {template:?}")),
                        ));
                    };
                    segments.push(param.value);
                } else if piece.contains(PATH_SLOT) {
                    return Err(normalize(
                        Stage::Build,
                        Fault::Template(format!(
                            "slot must fill a whole path segment in {template:?}"
                        )),
                    ));
                } else {
                    segments.push(piece);
                }
            }
        }

        Ok(url)
    }

    fn query_pairs(&self, spec: &RequestSpec<'_>) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if spec.is_listing() {
            let filter = spec.explicit_filter().unwrap_or(&self.default_filter);
            pairs.extend(filter.to_pairs());
        }
        if let Some((_, search)) = spec.search_term() {
            pairs.extend(search.to_pairs());
        }
        pairs
    }
}
