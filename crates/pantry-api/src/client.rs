// Pantry API client
//
// One `Client` per process. It owns the request builder, the shared
// transport and the decode limits, and runs every call through the same
// pipeline: guard, build, send, decode. Endpoint modules add inherent
// methods on top of `execute`.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;
use url::Url;

use crate::auth::{CredentialProvider, Credentials};
use crate::envelope::{Destination, Discard};
use crate::error::Error;
use crate::guard::guard;
use crate::observe::{CallContext, Context};
use crate::query::QueryFilter;
use crate::request::{PreparedRequest, RequestBuilder, RequestSpec};
use crate::response::{DEFAULT_MAX_BODY_BYTES, decode};
use crate::transport::{Transport, TransportConfig};

/// Everything needed to construct a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    /// Filter used by listing calls that pass `None`.
    pub default_filter: QueryFilter,
    pub max_body_bytes: usize,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credentials: Credentials::None,
            transport: TransportConfig::default(),
            default_filter: QueryFilter::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn default_filter(mut self, filter: QueryFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

/// Async client for the Pantry REST API.
///
/// Cheap to clone and safe to share between tasks; configuration is fixed
/// at construction. Per-call state lives in a [`CallContext`] created at
/// the top of each call.
#[derive(Debug, Clone)]
pub struct Client {
    builder: RequestBuilder,
    transport: Transport,
    default_timeout: Duration,
    max_body_bytes: usize,
}

impl Client {
    /// Build a client and its HTTP connection pool from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Self::assemble(
            config.base_url,
            http,
            Arc::new(config.credentials),
            config.default_filter,
            config.transport.timeout,
            config.max_body_bytes,
        )
    }

    /// Wrap an already-built `reqwest::Client`, with default limits.
    pub fn from_reqwest(
        base_url: Url,
        http: reqwest::Client,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self, Error> {
        Self::assemble(
            base_url,
            http,
            Arc::new(credentials),
            QueryFilter::default(),
            TransportConfig::default().timeout,
            DEFAULT_MAX_BODY_BYTES,
        )
    }

    fn assemble(
        base_url: Url,
        http: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
        default_filter: QueryFilter,
        default_timeout: Duration,
        max_body_bytes: usize,
    ) -> Result<Self, Error> {
        let builder = RequestBuilder::new(base_url, default_filter).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        Ok(Self {
            builder,
            transport: Transport::new(http, credentials),
            default_timeout,
            max_body_bytes,
        })
    }

    /// A new client sharing this one's connection pool, with other credentials.
    pub fn with_credentials(&self, credentials: impl CredentialProvider + 'static) -> Self {
        Self {
            builder: self.builder.clone(),
            transport: self.transport.with_credentials(Arc::new(credentials)),
            default_timeout: self.default_timeout,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn base_url(&self) -> &Url {
        self.builder.base_url()
    }

    pub fn default_filter(&self) -> &QueryFilter {
        self.builder.default_filter()
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Build the request `spec` would send, without guards or I/O.
    pub fn prepare(&self, spec: &RequestSpec<'_>) -> Result<PreparedRequest, Error> {
        self.builder.build(spec, None)
    }

    // ── Executor ─────────────────────────────────────────────────────

    /// Run one call end to end, decoding `data` into `destination`.
    ///
    /// A failed call records its error on the call span and emits exactly
    /// one error-level event; lower layers never log errors.
    pub async fn execute<D>(
        &self,
        cx: &Context,
        spec: RequestSpec<'_>,
        destination: Option<&mut D>,
    ) -> Result<(), Error>
    where
        D: Destination + Send,
    {
        let mut call = CallContext::start(cx, spec.operation(), self.default_timeout);
        call.attach_ids(spec.params());
        call.record_method(spec.method());
        if spec.is_listing() {
            let filter = spec.explicit_filter().unwrap_or(self.builder.default_filter());
            call.attach_filter(filter);
        }
        if let Some((_, search)) = spec.search_term() {
            call.attach_search(search);
        }

        let span = call.span().clone();
        let result = self.run(&call, &spec, destination).instrument(span).await;

        if let Err(ref err) = result {
            call.record_error(err);
            call.log_error(err);
        }
        result
    }

    /// Run a call whose payload is ignored (archive, delete, select).
    pub async fn execute_discarding(&self, cx: &Context, spec: RequestSpec<'_>) -> Result<(), Error> {
        self.execute(cx, spec, Some(&mut Discard)).await
    }

    async fn run<D: Destination>(
        &self,
        call: &CallContext,
        spec: &RequestSpec<'_>,
        destination: Option<&mut D>,
    ) -> Result<(), Error> {
        guard(spec, destination.as_deref())?;
        if call.context().is_cancelled() {
            return Err(Error::Cancelled);
        }

        let prepared = self.builder.build(spec, call.context().correlation_id())?;
        let raw = self.transport.execute(call, prepared, spec.auth_mode()).await?;
        decode(call, raw, self.max_body_bytes, destination).await
    }
}
