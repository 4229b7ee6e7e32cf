use axum::body::to_bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use bytes::Bytes;
use serde_json::Value;

use super::passthrough::{forward_auth_root, forward_sync, forward_sync_root};
use crate::state::GatewayState;
use crate::upstream::UpstreamRegistry;

fn unconfigured_state() -> GatewayState {
    GatewayState::new(UpstreamRegistry::from_pairs::<_, &str, &str>([])).unwrap()
}

#[tokio::test]
async fn test_sync_without_bearer_is_401() {
    let state = unconfigured_state();
    let response = forward_sync(
        State(state),
        Method::GET,
        Path("inventory".to_string()),
        RawQuery(None),
        HeaderMap::new(),
        Bytes::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], "Authorization header required (Bearer token)");
}

#[tokio::test]
async fn test_sync_401_takes_precedence_over_unconfigured_503() {
    // Both conditions hold here; validation must win because it is checked
    // before configuration.
    let state = unconfigured_state();
    let response = forward_sync_root(
        State(state),
        Method::POST,
        RawQuery(None),
        HeaderMap::new(),
        Bytes::from_static(b"{}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sync_with_bearer_but_unconfigured_is_503() {
    let state = unconfigured_state();
    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("Bearer tok"));
    let response = forward_sync_root(
        State(state),
        Method::GET,
        RawQuery(None),
        headers,
        Bytes::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Sync service is not configured");
}

#[tokio::test]
async fn test_auth_needs_no_authorization() {
    // Auth routes never require a token; the 503 proves validation passed.
    let state = unconfigured_state();
    let response = forward_auth_root(
        State(state),
        Method::GET,
        RawQuery(None),
        HeaderMap::new(),
        Bytes::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
