// Client-facing error taxonomy
//
// Every call ends in one of the variants below. Lower layers hand their raw
// causes (`Fault`) to `normalize`, tagged with the pipeline stage they came
// from. Nothing in this module logs; the executor records terminal errors.

use std::time::Duration;

use reqwest::StatusCode;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::envelope::ErrorPayload;

/// Top-level error type for the `pantry-api` crate.
///
/// The set of variants is closed: guards, request construction, transport,
/// decoding, HTTP status and envelope-level application errors. Use
/// [`Error::kind`] when only the category matters.
#[derive(Debug, Error)]
pub enum Error {
    // ── Guards ──────────────────────────────────────────────────────
    /// A required creation/update input was absent.
    #[error("required input was not provided")]
    NilInput,

    /// The input failed its own structural validation.
    #[error("input failed validation: {reason}")]
    InvalidInput { reason: String },

    /// A path parameter was empty.
    #[error("invalid {param} provided")]
    InvalidId { param: &'static str },

    #[error("empty search query provided")]
    EmptyQuery,

    #[error("empty username provided")]
    EmptyUsername,

    /// The operation returns data but no destination was supplied.
    #[error("no destination provided for response data")]
    NilDestination,

    /// The destination refused writes.
    #[error("response destination cannot be written to")]
    NonPointerDestination,

    // ── Request construction ────────────────────────────────────────
    /// URL resolution, header or body encoding failed.
    #[error("building request failed: {message}")]
    RequestBuildFailed { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Connection, TLS or read failure.
    #[error("HTTP transport error: {0}")]
    TransportFailed(#[source] reqwest::Error),

    /// The effective deadline passed before the call finished.
    #[error("request deadline exceeded{}", .budget.map(|b| format!(" after {}ms", b.as_millis())).unwrap_or_default())]
    Timeout { budget: Option<Duration> },

    /// The caller's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    #[error("response body exceeded {limit} bytes")]
    ResponseTooLarge { limit: usize },

    // ── Data ────────────────────────────────────────────────────────
    /// The envelope or its payload could not be deserialized. Carries the
    /// raw body for debugging.
    #[error("decoding response failed: {message}")]
    DecodeFailed { message: String, body: String },

    // ── HTTP status ─────────────────────────────────────────────────
    #[error("resource not found: {message}")]
    NotFound {
        message: String,
        code: Option<String>,
    },

    #[error("invalid request (HTTP {status}): {message}")]
    InvalidRequest {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// HTTP 401 or 403.
    #[error("unauthorized (HTTP {status}): {message}")]
    Unauthorized {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("server error (HTTP {status}): {message}")]
    ServerError {
        status: u16,
        message: String,
        code: Option<String>,
    },

    // ── Envelope ────────────────────────────────────────────────────
    /// The envelope carried a non-empty `error.code`, regardless of HTTP status.
    #[error("API error {code}: {message}")]
    Application {
        code: String,
        message: String,
        details: Vec<String>,
    },

    // ── Construction ────────────────────────────────────────────────
    /// Client construction failed (TLS material, base URL). Never returned
    /// from a call.
    #[error("invalid client configuration: {message}")]
    Config { message: String },
}

/// Fieldless mirror of [`Error`] for matching and structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    NilInput,
    InvalidInput,
    #[strum(serialize = "InvalidID")]
    InvalidId,
    EmptyQuery,
    EmptyUsername,
    NilDestination,
    NonPointerDestination,
    RequestBuildFailed,
    TransportFailed,
    Timeout,
    Cancelled,
    ResponseTooLarge,
    DecodeFailed,
    NotFound,
    InvalidRequest,
    Unauthorized,
    ServerError,
    ApplicationError,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NilInput => ErrorKind::NilInput,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::InvalidId { .. } => ErrorKind::InvalidId,
            Self::EmptyQuery => ErrorKind::EmptyQuery,
            Self::EmptyUsername => ErrorKind::EmptyUsername,
            Self::NilDestination => ErrorKind::NilDestination,
            Self::NonPointerDestination => ErrorKind::NonPointerDestination,
            Self::RequestBuildFailed { .. } => ErrorKind::RequestBuildFailed,
            Self::TransportFailed(_) => ErrorKind::TransportFailed,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::ResponseTooLarge { .. } => ErrorKind::ResponseTooLarge,
            Self::DecodeFailed { .. } => ErrorKind::DecodeFailed,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Application { .. } => ErrorKind::ApplicationError,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Returns `true` if retrying the same call might succeed.
    ///
    /// Guard, decode and application errors are never transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TransportFailed(_) | Self::Timeout { .. } | Self::ServerError { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the error was raised before any network I/O.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            Self::NilInput
                | Self::InvalidInput { .. }
                | Self::InvalidId { .. }
                | Self::EmptyQuery
                | Self::EmptyUsername
                | Self::NilDestination
                | Self::NonPointerDestination
        )
    }

    /// The server-supplied `error.code`, if one was received.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Application { code, .. } => Some(code),
            Self::NotFound { code, .. }
            | Self::InvalidRequest { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::ServerError { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::InvalidRequest { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::ServerError { status, .. } => Some(*status),
            Self::TransportFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Map an HTTP error status (and the server's error payload, when one
    /// could be decoded) onto the taxonomy.
    ///
    /// 400 → `InvalidRequest`, 401/403 → `Unauthorized`, 404 → `NotFound`,
    /// 5xx → `ServerError`. Remaining 4xx statuses keep their code and land
    /// in `InvalidRequest`.
    pub fn from_status(status: StatusCode, payload: Option<ErrorPayload>) -> Self {
        let (message, code) = match payload {
            Some(p) => {
                let message = if p.message.is_empty() {
                    generic_message(status)
                } else {
                    p.message
                };
                let code = (!p.code.is_empty()).then_some(p.code);
                (message, code)
            }
            None => (generic_message(status), None),
        };
        let status = status.as_u16();

        match status {
            404 => Self::NotFound { message, code },
            401 | 403 => Self::Unauthorized {
                status,
                message,
                code,
            },
            s if s >= 500 => Self::ServerError {
                status,
                message,
                code,
            },
            _ => Self::InvalidRequest {
                status,
                message,
                code,
            },
        }
    }
}

fn generic_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_lowercase)
}

// ── Normalization ────────────────────────────────────────────────────

/// The pipeline stage a fault surfaced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Guard,
    Build,
    Transport,
    Decode,
}

/// Raw lower-layer cause, before it is mapped onto [`Error`].
#[derive(Debug)]
pub enum Fault {
    Http(reqwest::Error),
    Url(url::ParseError),
    Json {
        source: serde_json::Error,
        body: String,
    },
    /// A header value could not be encoded.
    Header(String),
    /// Path template and parameters disagree, or the base URL cannot carry a path.
    Template(String),
    Elapsed(Duration),
    Cancelled,
    TooLarge(usize),
}

const BODY_PREVIEW_LEN: usize = 200;

/// Map a stage-tagged fault onto the client error taxonomy.
///
/// Pure: the same `(stage, fault)` always yields the same error kind.
pub fn normalize(stage: Stage, fault: Fault) -> Error {
    match fault {
        Fault::Cancelled => Error::Cancelled,
        Fault::Elapsed(budget) => Error::Timeout {
            budget: Some(budget),
        },
        Fault::TooLarge(limit) => Error::ResponseTooLarge { limit },
        Fault::Url(e) => Error::RequestBuildFailed {
            message: format!("invalid URL: {e}"),
        },
        Fault::Header(message) | Fault::Template(message) => Error::RequestBuildFailed { message },
        Fault::Http(e) if e.is_timeout() => Error::Timeout { budget: None },
        Fault::Http(e) if stage == Stage::Build || e.is_builder() => Error::RequestBuildFailed {
            message: e.to_string(),
        },
        Fault::Http(e) => Error::TransportFailed(e),
        Fault::Json { source, .. } if stage == Stage::Build => Error::RequestBuildFailed {
            message: format!("encoding request body: {source}"),
        },
        Fault::Json { source, body } => {
            let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
            Error::DecodeFailed {
                message: format!("{source} (body preview: {preview:?})"),
                body,
            }
        }
    }
}
