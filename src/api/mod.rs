//! API Module
//!
//! HTTP handlers and routing for the route relay server.
//!
//! # Endpoints
//! - `GET /api/find_route?from=&to=` - Compute a route via the external finder
//! - `GET /health` - Health check endpoint
//! - `GET /*` - Static assets, `index.html` at the root

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

/// Cache policy attached to every successful find-route exchange.
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=30";
