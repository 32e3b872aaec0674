//! API Routes
//!
//! Configures the Axum router with the relay endpoint, health check, static
//! assets, and middleware.

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{find_route_handler, health_handler, AppState};
use crate::rate_limit::rate_limit_middleware;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/find_route` - Compute a route via the external finder
/// - `GET /health` - Health check endpoint
/// - everything else - static files from `static_dir`, `index.html` at `/`
///
/// # Middleware
/// - Rate limiting: token bucket per client IP, on the `/api` group only
/// - Panic recovery: a panicking handler becomes a 500, not a dead connection
/// - Security headers: nosniff and frame options on every response
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    // The limiter guards only the API group; static assets stay unmetered.
    let api = Router::new()
        .route("/find_route", get(find_route_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
