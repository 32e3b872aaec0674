//! Route Finder Module
//!
//! Invokes the external route-finder program and captures its output.
//!
//! The finder is modeled as a trait so handlers depend on the contract rather
//! than on process spawning, which lets tests substitute a scripted stub.

mod command;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandRouteFinder;

// == Invocation Error Enum ==
/// Failure modes of a single route-finder invocation.
///
/// Carries enough detail for server-side logging; none of it is ever echoed
/// to the HTTP caller.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The executable could not be started at all
    #[error("failed to spawn {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited with a non-zero status
    #[error("{path} exited with {status}: {stderr}")]
    NonZeroExit {
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The program exited zero but wrote nothing to stdout
    #[error("{path} produced no output")]
    NoOutput { path: String },

    /// The program exceeded the configured wall-clock bound and was killed
    #[error("{path} timed out after {secs}s")]
    Timeout { path: String, secs: u64 },
}

// == Route Finder Trait ==
/// A source of computed routes between two named points.
///
/// Implementations return the raw bytes the route computation produced; the
/// server relays them verbatim and never decodes their structure.
#[async_trait]
pub trait RouteFinder: Send + Sync {
    /// Computes a route from `from` to `to`, returning the raw JSON bytes.
    async fn find_route(&self, from: &str, to: &str) -> std::result::Result<Vec<u8>, InvokeError>;
}
