//! Error types for the route relay server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::finder::InvokeError;
use crate::models::ErrorResponse;

// == Relay Error Enum ==
/// Unified error type for the route relay server.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Required query parameters are missing or empty
    #[error("Missing 'from' or 'to' query parameter")]
    MissingParams,

    /// The external route-finder could not produce a route
    #[error("route finder invocation failed: {0}")]
    Finder(#[from] InvokeError),

    /// Client exceeded its request budget
    #[error("rate limit exceeded")]
    RateLimited,
}

// == IntoResponse Implementation ==
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RelayError::MissingParams => (
                StatusCode::BAD_REQUEST,
                "Missing 'from' or 'to' query parameter",
            ),
            RelayError::Finder(err) => {
                // Full detail stays in the server log; the client only sees
                // the generic message.
                error!("route_finder error: {err}");
                (StatusCode::UNPROCESSABLE_ENTITY, "could not find route")
            }
            RelayError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded"),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the route relay server.
pub type Result<T> = std::result::Result<T, RelayError>;
