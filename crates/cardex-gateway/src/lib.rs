//! Cardex BFF Gateway
//!
//! Stateless request router between the marketplace SPA and its upstream
//! services (Auth, Sync/inventory, Search-Index, Search-Admin). The browser
//! only ever talks to this gateway on its own origin; the gateway re-issues
//! each call against the right upstream, normalizing authentication,
//! timeouts, query/body shape, and error reporting.
//!
//! Pipeline per request: resolve upstream base URL → translate the inbound
//! request into an outbound one → dispatch with an optional timeout budget →
//! normalize the outcome into a JSON envelope for the browser.

pub mod blueprint;
pub mod error;
pub mod forward;
pub mod routes;
pub mod state;
pub mod upstream;

pub use error::ValidationError;
pub use state::GatewayState;
pub use upstream::{Upstream, UpstreamRegistry, UpstreamTarget};
