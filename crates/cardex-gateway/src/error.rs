//! Validation errors resolved locally, before any upstream call.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Bad input detected while translating an inbound request.
///
/// These never touch the network: the handler short-circuits with a 4xx
/// response and the upstream is not contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Sync routes require a bearer token on every call.
    #[error("Authorization header required (Bearer token)")]
    AuthorizationRequired,

    /// Catalog id missing, non-numeric, or not positive.
    #[error("blueprint_id richiesto e deve essere un numero positivo")]
    InvalidBlueprintId,

    /// Reindex called without an admin key in header or body.
    #[error("Chiave Admin mancante. Fornisci l'header X-Admin-API-Key o apiKey nel body.")]
    MissingAdminKey,
}

impl ValidationError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthorizationRequired => StatusCode::UNAUTHORIZED,
            Self::InvalidBlueprintId | Self::MissingAdminKey => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        // The auth contract predates the gateway and uses "detail";
        // everything else reports under "error".
        let body = match self {
            Self::AuthorizationRequired => json!({ "detail": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}
