// Per-call context, tracing span and structured error log
//
// `Context` is what callers hand in: an optional deadline, an optional
// cancellation token and an optional correlation id. `CallContext` is built
// at the top of every call from it and owns that call's span, its logger
// attributes and its trace ids. Nothing here is shared across calls.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::{SpanContext, TraceContextExt, TraceFlags, TraceId, TraceState};
use opentelemetry::Context as OtelContext;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{IdGenerator, RandomIdGenerator};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::field::{Empty, display};
use tracing::{Span, error, info_span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::error::Error;
use crate::query::{QueryFilter, SearchQuery};
use crate::request::{Method, PathParam};

// ── Caller context ───────────────────────────────────────────────────

/// Caller-supplied call context.
///
/// Cheap to clone. The effective deadline of a call is the earlier of
/// [`Context::deadline`] and the client's default timeout.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
    correlation_id: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighten the deadline to `now + timeout`. An earlier deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(deadline_after(Instant::now(), timeout))
    }

    /// Tighten the deadline. An earlier deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Sent as the `Correlation-ID` request header.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Resolves once the token fires; never resolves without a token.
    pub async fn cancelled(&self) {
        match &self.cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    }
}

// ── Deadlines ────────────────────────────────────────────────────────

/// Longest budget a call can carry. Larger timeouts saturate to it.
pub const MAX_BUDGET: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

const FALLBACK_BUDGET: Duration = Duration::from_secs(24 * 60 * 60);

/// `now + timeout`, saturating at [`MAX_BUDGET`]. A clock that cannot
/// represent that far ahead gets one day instead.
pub(crate) fn deadline_after(now: Instant, timeout: Duration) -> Instant {
    now.checked_add(timeout.min(MAX_BUDGET))
        .or_else(|| now.checked_add(timeout.min(FALLBACK_BUDGET)))
        .unwrap_or(now)
}

// ── Trace propagation ────────────────────────────────────────────────

/// OpenTelemetry context to propagate for `span`.
///
/// With an `OpenTelemetryLayer` installed this is the span's own context,
/// so calls inherit the caller's trace. Without one, a fresh sampled root
/// keeps the `traceparent` header present.
fn propagation_context(span: &Span) -> OtelContext {
    let cx = span.context();
    if cx.span().span_context().is_valid() {
        return cx;
    }
    let ids = RandomIdGenerator::default();
    let root = SpanContext::new(
        ids.new_trace_id(),
        ids.new_span_id(),
        TraceFlags::SAMPLED,
        false,
        TraceState::default(),
    );
    OtelContext::new().with_remote_span_context(root)
}

// ── Call context ─────────────────────────────────────────────────────

/// Span, logger attributes and effective deadline for a single call.
pub struct CallContext {
    operation: String,
    context: Context,
    span: Span,
    attributes: Vec<(&'static str, String)>,
    otel: OtelContext,
    deadline: Instant,
    budget: Duration,
}

impl CallContext {
    /// Open the call's span as a child of the current span and fix its
    /// effective deadline.
    pub fn start(context: &Context, operation: &str, default_timeout: Duration) -> Self {
        let now = Instant::now();
        let fallback = deadline_after(now, default_timeout);
        let deadline = context.deadline().map_or(fallback, |d| d.min(fallback));

        let span = info_span!(
            parent: &Span::current(),
            "pantry.call",
            operation,
            ids = Empty,
            page = Empty,
            limit = Empty,
            sort_by = Empty,
            query = Empty,
            trace_id = Empty,
            http.method = Empty,
            http.status = Empty,
            error.kind = Empty,
            error.code = Empty,
        );

        let otel = propagation_context(&span);
        span.record("trace_id", display(otel.span().span_context().trace_id()));

        Self {
            operation: operation.to_owned(),
            context: context.clone(),
            span,
            attributes: vec![("operation", operation.to_owned())],
            otel,
            deadline,
            budget: deadline.saturating_duration_since(now),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn trace_id(&self) -> TraceId {
        self.otel.span().span_context().trace_id()
    }

    /// W3C `traceparent` (and `tracestate`, when non-empty) for this call.
    pub fn trace_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        TraceContextPropagator::new().inject_context(&self.otel, &mut headers);
        headers.retain(|_, value| !value.is_empty());
        headers
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time between call start and the effective deadline.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Record `key=value` on the span (when declared) and the logger.
    pub fn attach(&mut self, key: &'static str, value: impl fmt::Display) {
        let value = value.to_string();
        self.span.record(key, value.as_str());
        self.attributes.push((key, value));
    }

    /// Attach every path parameter by name, and the joined `ids` field.
    pub fn attach_ids(&mut self, params: &[PathParam<'_>]) {
        if params.is_empty() {
            return;
        }
        let joined = params
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect::<Vec<_>>()
            .join(",");
        self.span.record("ids", joined.as_str());
        for param in params {
            self.attributes.push((param.name, param.value.to_owned()));
        }
    }

    pub fn attach_filter(&mut self, filter: &QueryFilter) {
        self.attach("page", filter.effective_page());
        self.attach("limit", filter.effective_limit());
        self.attach("sort_by", filter.sort_by);
    }

    pub fn attach_search(&mut self, search: &SearchQuery) {
        self.attach("query", &search.query);
        self.attach("limit", search.effective_limit());
    }

    pub fn record_status(&self, status: reqwest::StatusCode) {
        self.span.record("http.status", status.as_u16());
    }

    pub fn record_method(&self, method: Method) {
        self.span.record("http.method", method.as_ref());
    }

    /// Record the error's kind and server code on the span. Does not log.
    pub fn record_error(&self, err: &Error) {
        self.span.record("error.kind", err.kind().as_ref());
        if let Some(code) = err.api_error_code() {
            self.span.record("error.code", code);
        }
        if let Some(status) = err.status() {
            self.span.record("http.status", status);
        }
    }

    /// The one error-level event for a failed call.
    pub fn log_error(&self, err: &Error) {
        error!(
            parent: &self.span,
            operation = %self.operation,
            attributes = %self.render_attributes(),
            error.kind = %err.kind(),
            error.code = err.api_error_code().unwrap_or_default(),
            error = %err,
            "call failed"
        );
    }

    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    fn render_attributes(&self) -> String {
        self.attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("operation", &self.operation)
            .field("attributes", &self.attributes)
            .field("trace_id", &self.trace_id())
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trace_headers_have_w3c_shape() {
        let call = CallContext::start(&Context::new(), "GetThing", Duration::from_secs(1));
        let headers = call.trace_headers();
        let traceparent = &headers["traceparent"];
        assert_eq!(traceparent.len(), 55);
        assert!(traceparent.starts_with("00-"));
        assert!(traceparent.ends_with("-01"));
        assert_eq!(&traceparent[3..35], call.trace_id().to_string());
        assert!(!headers.contains_key("tracestate"));
    }

    #[tokio::test(start_paused = true)]
    async fn huge_timeouts_saturate() {
        let cx = Context::new().with_timeout(Duration::MAX);
        let remaining = cx.deadline().unwrap().saturating_duration_since(Instant::now());
        assert_eq!(remaining, MAX_BUDGET);

        let call = CallContext::start(&Context::new(), "GetThing", Duration::MAX);
        assert_eq!(call.budget(), MAX_BUDGET);

        let call = CallContext::start(&cx, "GetThing", Duration::from_secs(u64::MAX));
        assert_eq!(call.budget(), MAX_BUDGET);
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_deadline_wins() {
        let cx = Context::new().with_timeout(Duration::from_secs(5));
        let call = CallContext::start(&cx, "GetThing", Duration::from_secs(30));
        assert_eq!(call.budget(), Duration::from_secs(5));

        let cx = Context::new().with_timeout(Duration::from_secs(60));
        let call = CallContext::start(&cx, "GetThing", Duration::from_secs(30));
        assert_eq!(call.budget(), Duration::from_secs(30));

        let cx = Context::new()
            .with_timeout(Duration::from_secs(2))
            .with_timeout(Duration::from_secs(9));
        assert_eq!(
            cx.deadline().unwrap().saturating_duration_since(Instant::now()),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn ids_are_attached_by_name() {
        let mut call = CallContext::start(&Context::new(), "GetTask", Duration::from_secs(1));
        call.attach_ids(&[
            PathParam {
                name: "mealPlanID",
                value: "mp1",
            },
            PathParam {
                name: "mealPlanTaskID",
                value: "t9",
            },
        ]);
        assert_eq!(
            call.attributes(),
            &[
                ("operation", "GetTask".to_owned()),
                ("mealPlanID", "mp1".to_owned()),
                ("mealPlanTaskID", "t9".to_owned()),
            ]
        );
    }

    #[test]
    fn cancellation_is_observed() {
        let token = CancellationToken::new();
        let cx = Context::new().with_cancellation(token.clone());
        assert!(!cx.is_cancelled());
        token.cancel();
        assert!(cx.is_cancelled());
    }
}
