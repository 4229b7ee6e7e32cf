//! Upstream outcome → browser-facing JSON envelope.

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Map, Value};

use crate::upstream::Upstream;

use super::UpstreamOutcome;

/// Per-route context woven into error envelopes: which upstream was called
/// and which request fields to echo back for caller-side correlation.
pub struct ForwardContext {
    pub upstream: Upstream,
    /// Remap upstream 5xx to a sanitized 502.
    pub remap_5xx: bool,
    echo: Vec<(&'static str, Value)>,
}

impl ForwardContext {
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream, remap_5xx: true, echo: Vec::new() }
    }

    /// Echo a request field (e.g. the requested catalog id) in every
    /// gateway-generated error envelope for this call.
    pub fn with_echo(mut self, key: &'static str, value: Value) -> Self {
        self.echo.push((key, value));
        self
    }

    fn envelope(&self, message: String) -> Value {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(message));
        for (key, value) in &self.echo {
            body.insert((*key).to_string(), value.clone());
        }
        Value::Object(body)
    }
}

/// Map an upstream outcome to the status and body returned to the browser.
///
/// Caller errors (upstream 4xx) pass through verbatim so the browser sees
/// exactly what the upstream said; server-side failures are sanitized to a
/// 502/503 envelope that carries an operational hint instead of upstream
/// internals.
pub fn normalize(outcome: UpstreamOutcome, ctx: &ForwardContext) -> (StatusCode, Json<Value>) {
    match outcome {
        UpstreamOutcome::Success { status, body } => (status, Json(body)),

        UpstreamOutcome::UpstreamError { status, body: _ } if status.is_server_error() && ctx.remap_5xx => {
            tracing::warn!("{} returned {}, remapping to 502", ctx.upstream, status);
            let mut envelope = ctx.envelope(format!("{} temporarily unavailable.", ctx.upstream));
            if let Value::Object(map) = &mut envelope {
                map.insert("upstream_status".to_string(), json!(status.as_u16()));
            }
            (StatusCode::BAD_GATEWAY, Json(envelope))
        }

        UpstreamOutcome::UpstreamError { status, body } => (status, Json(body)),

        UpstreamOutcome::Unreachable { cause } => (
            StatusCode::BAD_GATEWAY,
            Json(ctx.envelope(format!(
                "{} unreachable: {}. {}",
                ctx.upstream,
                cause,
                ctx.upstream.reachability_hint()
            ))),
        ),

        UpstreamOutcome::TimedOut => (
            StatusCode::BAD_GATEWAY,
            Json(ctx.envelope(format!("Timeout: {} did not respond in time.", ctx.upstream))),
        ),

        UpstreamOutcome::Misconfigured => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ctx.envelope(format!("{} is not configured", ctx.upstream))),
        ),
    }
}
