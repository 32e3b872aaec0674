//! Request DTOs for the route relay API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query parameters for the find-route operation (GET /api/find_route)
///
/// Both fields are optional at the deserialization layer so that a missing
/// parameter reaches the handler, which owns the error body, instead of
/// being rejected by the extractor with a framework-shaped message.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    /// Name of the starting point
    #[serde(default)]
    pub from: Option<String>,
    /// Name of the destination
    #[serde(default)]
    pub to: Option<String>,
}

impl RouteQuery {
    /// Validates the query, returning the trimmed endpoint pair.
    ///
    /// Returns None when either parameter is missing or empty after trimming.
    /// No further validation happens here; the external program owns semantic
    /// validation of the endpoints.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let from = self.from.as_deref()?.trim();
        let to = self.to.as_deref()?.trim();
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some((from, to))
    }
}
