//! Request-independent gateway state.
//!
//! Only two things are shared between concurrent requests, both immutable:
//! the configuration snapshot and the pooled HTTP client. No locking needed.

use std::sync::Arc;

use crate::upstream::UpstreamRegistry;

#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<UpstreamRegistry>,
    pub http: reqwest::Client,
}

impl GatewayState {
    pub fn new(registry: UpstreamRegistry) -> Result<Self, String> {
        Ok(Self { registry: Arc::new(registry), http: build_http_client()? })
    }

    /// Snapshot deployment configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::new(UpstreamRegistry::from_env())
    }
}

/// No client-wide timeout: the generic pass-through routes deliberately rely
/// on connection-level defaults, and the bounded routes set a per-request
/// budget at dispatch time.
fn build_http_client() -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .tcp_nodelay(true)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
