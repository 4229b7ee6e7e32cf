use axum::{
    extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use cardex_gateway::state::GatewayState;

pub fn build_router(state: GatewayState) -> Router {
    let gateway = cardex_gateway::routes::router().with_state(state);

    let static_dir = std::env::var("CARDEX_STATIC_DIR").unwrap_or_else(|_| "./dist".to_string());

    // SPA fallback: unmatched paths (/, /cart, /card/278502) serve index.html
    // and let the client-side router take over.
    let index_path = format!("{}/index.html", static_dir);
    let spa_service = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(&index_path));

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .nest("/gateway", gateway)
        .fallback_service(spa_service)
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::build_router;
    use axum_test::TestServer;
    use cardex_gateway::state::GatewayState;
    use cardex_gateway::upstream::UpstreamRegistry;
    use serde_json::Value;

    fn test_server() -> TestServer {
        let state =
            GatewayState::new(UpstreamRegistry::from_pairs::<_, &str, &str>([])).unwrap();
        TestServer::new(build_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();
        for path in ["/health", "/healthz"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            assert_eq!(response.json::<Value>(), serde_json::json!({"status": "ok"}));
        }
    }

    #[tokio::test]
    async fn test_version_reports_crate_version() {
        let server = test_server();
        let response = server.get("/version").await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["version"],
            serde_json::json!(env!("CARGO_PKG_VERSION"))
        );
    }

    #[tokio::test]
    async fn test_gateway_nested_under_prefix() {
        let server = test_server();
        let response = server.get("/gateway/listings").await;
        // Missing blueprint_id is a validation error from the gateway,
        // proving the nest wiring works.
        response.assert_status_bad_request();
    }
}
