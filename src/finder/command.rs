//! Command Route Finder
//!
//! Runs the route-finder as a child process, one invocation per request.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{InvokeError, RouteFinder};

// == Command Route Finder ==
/// Invokes the configured executable as `<path> --json <from> <to>` and
/// captures its standard output.
///
/// Endpoints are passed as discrete argument-vector entries, never through a
/// shell, so no quoting or injection concern applies. An empty stdout with a
/// zero exit status is treated as a failed invocation. The child is spawned
/// with `kill_on_drop` so an expired timeout or a dropped request does not
/// leak the process.
#[derive(Debug, Clone)]
pub struct CommandRouteFinder {
    path: String,
    timeout: Option<Duration>,
}

impl CommandRouteFinder {
    /// Creates a finder for the executable at `path`.
    ///
    /// `timeout_secs` bounds a single invocation; `None` lets the program run
    /// to completion.
    pub fn new(path: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            path: path.into(),
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }

    async fn run(&self, from: &str, to: &str) -> std::result::Result<std::process::Output, InvokeError> {
        let child = Command::new(&self.path)
            .arg("--json")
            .arg(from)
            .arg(to)
            .kill_on_drop(true)
            .output();

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child).await.map_err(|_| {
                InvokeError::Timeout {
                    path: self.path.clone(),
                    secs: limit.as_secs(),
                }
            })?,
            None => child.await,
        }
        .map_err(|source| InvokeError::Spawn {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl RouteFinder for CommandRouteFinder {
    async fn find_route(&self, from: &str, to: &str) -> std::result::Result<Vec<u8>, InvokeError> {
        debug!(path = %self.path, from, to, "invoking route finder");
        let output = self.run(from, to).await?;

        if !output.status.success() {
            return Err(InvokeError::NonZeroExit {
                path: self.path.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        if output.stdout.is_empty() {
            return Err(InvokeError::NoOutput {
                path: self.path.clone(),
            });
        }

        Ok(output.stdout)
    }
}
