//! Route Relay - HTTP front end for an external route-finder
//!
//! Relays route queries to a route-finding subprocess and serves the result
//! with ETag negotiation and per-client rate limiting.

pub mod api;
pub mod config;
pub mod error;
pub mod etag;
pub mod finder;
pub mod models;
pub mod rate_limit;

pub use api::AppState;
pub use config::Config;
