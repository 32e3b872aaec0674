//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Read once at startup and passed explicitly into the components that need it;
/// request-handling code never consults the environment directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the external route-finder executable
    pub finder_path: String,
    /// HTTP server port
    pub server_port: u16,
    /// Directory served as static assets (entry document at `index.html`)
    pub static_dir: String,
    /// Optional wall-clock bound in seconds for a single finder invocation
    pub finder_timeout_secs: Option<u64>,
    /// Sustained requests per second allowed per client on the API
    pub rate_limit_rps: u32,
    /// Burst capacity per client on the API
    pub rate_limit_burst: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ROUTE_FINDER_PATH` - Route-finder executable (default: ./route_finder)
    /// - `PORT` - HTTP server port (default: 1323)
    /// - `STATIC_DIR` - Static asset directory (default: public)
    /// - `ROUTE_FINDER_TIMEOUT_SECS` - Finder timeout in seconds (default: none)
    /// - `RATE_LIMIT_RPS` - Sustained per-client rate (default: 20)
    /// - `RATE_LIMIT_BURST` - Per-client burst capacity (default: 20)
    pub fn from_env() -> Self {
        Self {
            finder_path: env::var("ROUTE_FINDER_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "./route_finder".to_string()),
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1323),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "public".to_string()),
            finder_timeout_secs: env::var("ROUTE_FINDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
            rate_limit_rps: env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            finder_path: "./route_finder".to_string(),
            server_port: 1323,
            static_dir: "public".to_string(),
            finder_timeout_secs: None,
            rate_limit_rps: 20,
            rate_limit_burst: 20,
        }
    }
}
