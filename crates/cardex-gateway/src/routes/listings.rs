//! Listings lookup by catalog (blueprint) id.
//!
//! Two entry points, identical semantics: the id arrives either as a
//! `blueprint_id` query parameter or as a path segment. Both accept the
//! composite `"<id>:<variant>"` token and must resolve it to the same
//! catalog target.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use crate::blueprint::parse_blueprint_id;
use crate::forward::{dispatch, normalize, translate, ForwardContext, ForwardPolicy, UpstreamOutcome};
use crate::state::GatewayState;
use crate::upstream::Upstream;

#[derive(Deserialize)]
pub struct ListingsQuery {
    pub blueprint_id: Option<String>,
}

pub async fn listings_by_query(
    State(state): State<GatewayState>,
    Query(params): Query<ListingsQuery>,
    headers: HeaderMap,
) -> Response {
    let raw = params.blueprint_id.unwrap_or_default();
    fetch_listings(state, &raw, headers).await
}

pub async fn listings_by_path(
    State(state): State<GatewayState>,
    Path(blueprint_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    fetch_listings(state, &blueprint_id, headers).await
}

async fn fetch_listings(state: GatewayState, raw_id: &str, headers: HeaderMap) -> Response {
    let blueprint_id = match parse_blueprint_id(raw_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let policy = ForwardPolicy::bounded();
    let forwarded = match translate(
        Upstream::Sync,
        &Method::GET,
        &format!("listings/blueprint/{blueprint_id}"),
        None,
        &headers,
        Bytes::new(),
        &policy,
    ) {
        Ok(forwarded) => forwarded,
        Err(e) => return e.into_response(),
    };

    let ctx = ForwardContext::new(Upstream::Sync).with_echo("blueprint_id", json!(blueprint_id));
    let Some(base_url) = state.registry.resolve(Upstream::Sync).base_url else {
        return normalize(UpstreamOutcome::Misconfigured, &ctx).into_response();
    };

    let outcome = dispatch(&state.http, &base_url, &forwarded, policy.timeout).await;
    normalize(outcome, &ctx).into_response()
}
