// Shared transport configuration and the authenticated round trip.
//
// `TransportConfig` builds the one `reqwest::Client` a `pantry::Client`
// holds; `Transport::execute` performs a single request under the call's
// deadline and cancellation. No retries happen here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tokio::time::Instant;
use tracing::debug;

use crate::auth::{AuthMode, CredentialProvider};
use crate::error::{Error, Fault, Stage, normalize};
use crate::observe::CallContext;
use crate::request::{PreparedBody, PreparedRequest};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("pantry-api/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (local development servers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Default per-call deadline when the caller's context has none.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// No overall reqwest timeout is set; deadlines are enforced per call.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str());

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path).map_err(|e| Error::Config {
                    message: format!("failed to read CA cert {}: {e}", path.display()),
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| Error::Config {
                    message: format!("invalid CA cert: {e}"),
                })?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder.build().map_err(|e| Error::Config {
            message: format!("failed to build HTTP client: {e}"),
        })
    }

    /// Create a config with a fresh cookie jar (for session auth).
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }
}

/// A response whose headers have arrived but whose body is still unread.
///
/// Consumed by value; dropping it releases the connection.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub response: reqwest::Response,
}

/// Authenticated HTTP executor shared by every call of a client.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl Transport {
    pub fn new(http: reqwest::Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { http, credentials }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Same connection pool, different credentials.
    pub fn with_credentials(&self, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            http: self.http.clone(),
            credentials,
        }
    }

    /// Send `prepared` once and wait for the response head.
    ///
    /// Cancellation is checked before the deadline; either one abandons the
    /// in-flight request.
    pub async fn execute(
        &self,
        call: &CallContext,
        prepared: PreparedRequest,
        auth: AuthMode,
    ) -> Result<RawResponse, Error> {
        let PreparedRequest {
            method,
            url,
            mut headers,
            body,
        } = prepared;

        if auth == AuthMode::Authenticated && !self.credentials.is_empty() {
            self.credentials.annotate(&mut headers)?;
        }
        attach_trace_headers(&mut headers, call)?;

        debug!("{method} {url}");

        let mut request = self.http.request(method.into(), url).headers(headers);
        request = match body {
            PreparedBody::Empty => request,
            PreparedBody::Json(bytes) => request.body(bytes),
            PreparedBody::Multipart {
                field,
                file_name,
                mime_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime_type)
                    .map_err(|e| normalize(Stage::Build, Fault::Http(e)))?;
                request.multipart(Form::new().part(field, part))
            }
        };

        let response = race(call, call.deadline(), request.send()).await?;
        let response = response.map_err(|e| normalize(Stage::Transport, Fault::Http(e)))?;
        let status = response.status();
        call.record_status(status);

        Ok(RawResponse { status, response })
    }
}

/// Await `fut` unless the call is cancelled or its deadline passes first.
pub(crate) async fn race<F: Future>(
    call: &CallContext,
    deadline: Instant,
    fut: F,
) -> Result<F::Output, Error> {
    tokio::select! {
        biased;
        () = call.context().cancelled() => Err(normalize(Stage::Transport, Fault::Cancelled)),
        result = tokio::time::timeout_at(deadline, fut) => {
            result.map_err(|_| normalize(Stage::Transport, Fault::Elapsed(call.budget())))
        }
    }
}

/// Inject the call's W3C trace context so server spans join the caller's trace.
fn attach_trace_headers(headers: &mut HeaderMap, call: &CallContext) -> Result<(), Error> {
    for (name, value) in call.trace_headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| normalize(Stage::Build, Fault::Header(e.to_string())))?;
        let value = HeaderValue::from_str(&value)
            .map_err(|e| normalize(Stage::Build, Fault::Header(e.to_string())))?;
        headers.insert(name, value);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_system_roots() {
        let config = TransportConfig::default();
        assert!(matches!(config.tls, TlsMode::System));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("pantry-api/"));
        assert!(config.cookie_jar.is_none());
        assert!(config.with_cookie_jar().cookie_jar.is_some());
    }

    #[test]
    fn missing_ca_file_is_a_config_error() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa(PathBuf::from("/nonexistent/pantry-ca.pem")),
            ..TransportConfig::default()
        };
        let err = config.build_client().unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "got: {err:?}");
    }
}
