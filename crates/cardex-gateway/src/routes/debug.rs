//! Diagnostic probes against the search index.
//!
//! Read-only, operator-facing. They echo raw upstream results plus derived
//! metadata so an operator can inspect the index's actual document shape
//! without shelling into the search service. Not part of the product API.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::forward::{dispatch, normalize, translate, ForwardContext, ForwardPolicy, UpstreamOutcome};
use crate::state::GatewayState;
use crate::upstream::Upstream;

const DEFAULT_QUERY_LIMIT: i64 = 5;
const MAX_QUERY_LIMIT: i64 = 20;

#[derive(Deserialize)]
pub struct SearchDocParams {
    pub id: String,
}

/// GET /debug/search-doc?id=<id> — fetch one document by id.
pub async fn search_doc(
    State(state): State<GatewayState>,
    Query(params): Query<SearchDocParams>,
) -> Response {
    let suffix = format!("documents/{}", params.id);
    let outcome = match probe(&state, &suffix, None).await {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };

    match outcome {
        UpstreamOutcome::Success { status, body } => Json(json!({
            "status": status.as_u16(),
            "found": true,
            "message": "Document found in search index.",
            "document": body,
        }))
        .into_response(),
        UpstreamOutcome::UpstreamError { status, body } => {
            let message = if status == StatusCode::NOT_FOUND {
                "Document not found in search index."
            } else {
                "Search index returned an unexpected error."
            };
            Json(json!({
                "status": status.as_u16(),
                "found": false,
                "message": message,
                "body": body,
            }))
            .into_response()
        }
        other => normalize(other, &ForwardContext::new(Upstream::SearchIndex)).into_response(),
    }
}

#[derive(Deserialize)]
pub struct SearchQueryParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// GET /debug/search-query?q=<text>&limit=<1..20> — run a raw search and
/// derive the hit ids plus the key set of the first hit.
pub async fn search_query(
    State(state): State<GatewayState>,
    Query(params): Query<SearchQueryParams>,
) -> Response {
    let q = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT).clamp(1, MAX_QUERY_LIMIT);

    let query = format!(
        "q={}&limit={}",
        url::form_urlencoded::byte_serialize(q.as_bytes()).collect::<String>(),
        limit
    );
    let outcome = match probe(&state, "search", Some(&query)).await {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };

    match outcome {
        UpstreamOutcome::Success { status, body } => {
            let hits = body.get("hits").and_then(Value::as_array).cloned().unwrap_or_default();
            let hit_ids: Vec<Value> =
                hits.iter().filter_map(|hit| hit.get("id").cloned()).collect();
            let first_hit_keys: Vec<&String> = hits
                .first()
                .and_then(Value::as_object)
                .map(|object| object.keys().collect())
                .unwrap_or_default();
            Json(json!({
                "status": status.as_u16(),
                "query": q,
                "limit": limit,
                "hitCount": hits.len(),
                "hitIds": hit_ids,
                "firstHitKeys": first_hit_keys,
                "raw": body,
            }))
            .into_response()
        }
        UpstreamOutcome::UpstreamError { status, body } => Json(json!({
            "status": status.as_u16(),
            "message": "Search index returned an unexpected error.",
            "body": body,
        }))
        .into_response(),
        other => normalize(other, &ForwardContext::new(Upstream::SearchIndex)).into_response(),
    }
}

/// Issue one read-only call against the search index. Short-circuits with a
/// ready response when the index is not configured.
async fn probe(
    state: &GatewayState,
    path_suffix: &str,
    raw_query: Option<&str>,
) -> Result<UpstreamOutcome, Response> {
    let ctx = ForwardContext::new(Upstream::SearchIndex);
    let Some(base_url) = state.registry.resolve(Upstream::SearchIndex).base_url else {
        return Err(normalize(UpstreamOutcome::Misconfigured, &ctx).into_response());
    };

    let policy = ForwardPolicy::bounded();
    let mut headers = HeaderMap::new();
    if let Some(key) = state.registry.search_api_key() {
        if let Ok(value) = format!("Bearer {key}").parse() {
            headers.insert("authorization", value);
        }
    }

    let forwarded = translate(
        Upstream::SearchIndex,
        &Method::GET,
        path_suffix,
        raw_query,
        &headers,
        Bytes::new(),
        &policy,
    )
    .map_err(IntoResponse::into_response)?;

    Ok(dispatch(&state.http, &base_url, &forwarded, policy.timeout).await)
}
