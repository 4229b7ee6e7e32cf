use axum::body::to_bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use bytes::Bytes;
use serde_json::Value;

use super::admin::reindex;
use crate::state::GatewayState;
use crate::upstream::UpstreamRegistry;

fn unconfigured_state() -> GatewayState {
    GatewayState::new(UpstreamRegistry::from_pairs::<_, &str, &str>([])).unwrap()
}

#[tokio::test]
async fn test_missing_admin_key_is_400() {
    let state = unconfigured_state();
    let response = reindex(State(state), HeaderMap::new(), Bytes::new()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(
        body["error"].as_str().unwrap().starts_with("Chiave Admin mancante."),
        "unexpected body: {body}"
    );
}

#[tokio::test]
async fn test_body_key_ignored_without_json_content_type() {
    let state = unconfigured_state();
    let response = reindex(
        State(state),
        HeaderMap::new(),
        Bytes::from_static(b"{\"apiKey\":\"secret\"}"),
    )
    .await;
    // Without a JSON content type the body is never parsed, so the key is
    // considered missing.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_key_present_but_upstream_unconfigured_is_503() {
    let state = unconfigured_state();
    let mut headers = HeaderMap::new();
    headers.insert("x-admin-api-key", HeaderValue::from_static("secret"));
    let response = reindex(State(state), headers, Bytes::new()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_json_body_key_accepted_when_no_header() {
    let state = unconfigured_state();
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    let response = reindex(
        State(state),
        headers,
        Bytes::from_static(b"{\"apiKey\":\"secret\"}"),
    )
    .await;
    // Key extraction succeeded; the 503 comes from the unconfigured upstream.
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
