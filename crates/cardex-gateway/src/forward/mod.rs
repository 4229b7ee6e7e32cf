//! The forwarding pipeline: translate → dispatch → normalize.
//!
//! Every `/gateway/*` route funnels through the same three stages,
//! parameterized by a per-route [`ForwardPolicy`] instead of per-route
//! copies of the forwarding logic.

mod dispatch;
mod normalize;
mod translate;


pub use dispatch::dispatch;
pub use normalize::{normalize, ForwardContext};
pub use translate::translate;

use std::time::Duration;

use axum::http::Method;
use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;

/// Timeout budget for the user-facing, time-sensitive routes
/// (listings lookups and admin reindex).
pub const BOUNDED_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-route forwarding policy.
pub struct ForwardPolicy {
    /// `None` relies on connection-level defaults (generic pass-through);
    /// `Some` bounds the whole call and cancels it on expiry.
    pub timeout: Option<Duration>,
    /// Reject inbound calls without a `Bearer` token before dispatch.
    pub require_bearer: bool,
    /// Remap upstream 5xx to a sanitized 502 instead of passing it through.
    pub remap_5xx: bool,
}

impl ForwardPolicy {
    /// Generic auth/sync pass-through: no explicit timeout budget.
    pub fn passthrough() -> Self {
        Self { timeout: None, require_bearer: false, remap_5xx: true }
    }

    /// Listings and reindex: bounded at [`BOUNDED_TIMEOUT`].
    pub fn bounded() -> Self {
        Self { timeout: Some(BOUNDED_TIMEOUT), require_bearer: false, remap_5xx: true }
    }

    pub fn with_required_bearer(mut self) -> Self {
        self.require_bearer = true;
        self
    }
}

/// Outbound request built from one inbound call. Request-scoped; nothing
/// here survives past the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedRequest {
    pub method: Method,
    /// Path under the upstream base URL, always starting with `/`.
    pub target_path: String,
    /// Ordered query pairs; duplicate keys already collapsed last-wins.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Only populated for methods that carry a body (never GET/HEAD).
    pub body: Option<Bytes>,
}

/// Result of one upstream call. Exactly one variant per dispatch.
#[derive(Debug, Clone)]
pub enum UpstreamOutcome {
    /// Upstream answered 2xx.
    Success { status: StatusCode, body: Value },
    /// Upstream answered outside 2xx; status stays authoritative.
    UpstreamError { status: StatusCode, body: Value },
    /// Transport-level failure (DNS, refused connection, TLS).
    Unreachable { cause: String },
    /// The timeout budget expired; the in-flight call was cancelled.
    TimedOut,
    /// No base URL configured for the upstream; nothing was dispatched.
    Misconfigured,
}
