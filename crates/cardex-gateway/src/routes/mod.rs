//! Gateway routes
//!
//! Browser-facing endpoints, all same-origin. The server nests this router
//! under `/gateway`.

mod admin;
mod debug;
mod listings;
mod passthrough;

#[cfg(test)]
mod admin_tests;
#[cfg(test)]
mod passthrough_tests;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{any, get, post};
use axum::Router;

use crate::state::GatewayState;

pub fn router() -> Router<GatewayState> {
    Router::new()
        // Generic pass-through (any method)
        .route("/auth", any(passthrough::forward_auth_root))
        .route("/auth/*path", any(passthrough::forward_auth))
        .route("/sync", any(passthrough::forward_sync_root))
        .route("/sync/*path", any(passthrough::forward_sync))
        // Listings (id via query parameter or path segment)
        .route("/listings", get(listings::listings_by_query))
        .route("/listings/blueprint/:blueprint_id", get(listings::listings_by_path))
        // Search administration
        .route("/admin/reindex", post(admin::reindex))
        // Operational probes, not part of the product API surface
        .route("/debug/search-doc", get(debug::search_doc))
        .route("/debug/search-query", get(debug::search_query))
        // Fallback: return 404 for unknown gateway endpoints
        .fallback(gateway_not_found)
}

async fn gateway_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}
