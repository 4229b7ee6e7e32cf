//! Search administration: trigger a full reindex on the search admin service.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::error::ValidationError;
use crate::forward::{dispatch, normalize, translate, ForwardContext, ForwardPolicy, UpstreamOutcome};
use crate::state::GatewayState;
use crate::upstream::Upstream;

const ADMIN_KEY_HEADER: &str = "x-admin-api-key";

pub async fn reindex(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(api_key) = extract_admin_key(&headers, &body) else {
        return ValidationError::MissingAdminKey.into_response();
    };

    let policy = ForwardPolicy::bounded();
    let mut forwarded = match translate(
        Upstream::SearchAdmin,
        &Method::POST,
        "reindex",
        None,
        &headers,
        Bytes::new(),
        &policy,
    ) {
        Ok(forwarded) => forwarded,
        Err(e) => return e.into_response(),
    };
    forwarded.headers.push((ADMIN_KEY_HEADER.to_string(), api_key));

    let ctx = ForwardContext::new(Upstream::SearchAdmin);
    let Some(base_url) = state.registry.resolve(Upstream::SearchAdmin).base_url else {
        return normalize(UpstreamOutcome::Misconfigured, &ctx).into_response();
    };

    tracing::info!("Forwarding reindex request to {}", Upstream::SearchAdmin);
    let outcome = dispatch(&state.http, &base_url, &forwarded, policy.timeout).await;
    match outcome {
        UpstreamOutcome::Success { status, .. } if status == StatusCode::ACCEPTED => (
            StatusCode::ACCEPTED,
            Json(json!({
                "status": "accepted",
                "message": "Reindexing started in background.",
            })),
        )
            .into_response(),
        UpstreamOutcome::UpstreamError { status, .. } if status == StatusCode::FORBIDDEN => {
            (StatusCode::FORBIDDEN, Json(json!({ "error": "Chiave Admin non valida." })))
                .into_response()
        }
        other => normalize(other, &ctx).into_response(),
    }
}

/// The admin key may arrive in the `X-Admin-API-Key` header or as `apiKey`
/// in a JSON body. The header takes precedence; the body is only parsed
/// when no header is present and the declared content type is JSON.
fn extract_admin_key(headers: &HeaderMap, body: &Bytes) -> Option<String> {
    if let Some(key) = headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        let key = key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().contains("json"));
    if !is_json {
        return None;
    }

    let parsed: Value = serde_json::from_slice(body).ok()?;
    let key = parsed.get("apiKey")?.as_str()?.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
