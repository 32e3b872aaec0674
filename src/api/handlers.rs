//! API Handlers
//!
//! HTTP request handlers for each route relay endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::CACHE_CONTROL_VALUE;
use crate::config::Config;
use crate::error::{RelayError, Result};
use crate::etag;
use crate::finder::{CommandRouteFinder, RouteFinder};
use crate::models::{HealthResponse, RouteQuery};
use crate::rate_limit::RateLimiter;

/// Application state shared across all handlers.
///
/// The finder sits behind a trait object so tests can swap in a stub; the
/// limiter is the only shared mutable state in the process.
#[derive(Clone)]
pub struct AppState {
    /// Source of computed routes
    pub finder: Arc<dyn RouteFinder>,
    /// Per-client request budget for the API surface
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates a new AppState from the given components.
    pub fn new(finder: Arc<dyn RouteFinder>, limiter: Arc<RateLimiter>) -> Self {
        Self { finder, limiter }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the command-backed finder and the configured rate budget.
    pub fn from_config(config: &Config) -> Self {
        let finder = CommandRouteFinder::new(&config.finder_path, config.finder_timeout_secs);
        let limiter = RateLimiter::new(config.rate_limit_rps, config.rate_limit_burst);
        Self::new(Arc::new(finder), Arc::new(limiter))
    }
}

/// Handler for GET /api/find_route
///
/// Validates the endpoint pair, invokes the external route-finder once, and
/// relays its raw JSON output. Every successful invocation carries an `ETag`
/// and `Cache-Control` header; a request whose `If-None-Match` equals the
/// freshly computed tag gets `304 Not Modified` with an empty body instead
/// of the payload.
pub async fn find_route_handler(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    // The finder is never invoked for an invalid pair.
    let (from, to) = query.endpoints().ok_or(RelayError::MissingParams)?;

    let body = state.finder.find_route(from, to).await?;
    let validator = etag::tag(&body);

    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    if etag::matches(if_none_match, &validator) {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, validator),
                (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
            ],
        )
            .into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::ETAG, validator),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
        ],
        body,
    )
        .into_response())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
