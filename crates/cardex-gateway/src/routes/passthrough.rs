//! Generic auth/sync pass-through handlers.

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::forward::{dispatch, normalize, translate, ForwardContext, ForwardPolicy, UpstreamOutcome};
use crate::state::GatewayState;
use crate::upstream::Upstream;

pub async fn forward_auth(
    State(state): State<GatewayState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    forward(state, Upstream::Auth, method, &path, query, headers, body).await
}

pub async fn forward_auth_root(
    State(state): State<GatewayState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    forward(state, Upstream::Auth, method, "", query, headers, body).await
}

pub async fn forward_sync(
    State(state): State<GatewayState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    forward(state, Upstream::Sync, method, &path, query, headers, body).await
}

pub async fn forward_sync_root(
    State(state): State<GatewayState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    forward(state, Upstream::Sync, method, "", query, headers, body).await
}

/// Shared pass-through pipeline. Validation runs before the configuration
/// check so a missing bearer token is reported as 401 even when the
/// upstream address is also absent.
async fn forward(
    state: GatewayState,
    upstream: Upstream,
    method: Method,
    path_suffix: &str,
    raw_query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut policy = ForwardPolicy::passthrough();
    if upstream == Upstream::Sync {
        policy = policy.with_required_bearer();
    }

    let forwarded = match translate(
        upstream,
        &method,
        path_suffix,
        raw_query.as_deref(),
        &headers,
        body,
        &policy,
    ) {
        Ok(forwarded) => forwarded,
        Err(e) => return e.into_response(),
    };

    let ctx = ForwardContext::new(upstream);
    let Some(base_url) = state.registry.resolve(upstream).base_url else {
        return normalize(UpstreamOutcome::Misconfigured, &ctx).into_response();
    };

    let outcome = dispatch(&state.http, &base_url, &forwarded, policy.timeout).await;
    normalize(outcome, &ctx).into_response()
}
