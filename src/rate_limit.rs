//! Rate Limiter
//!
//! Per-client token buckets protecting the route-finder from overload.
//!
//! State is in-memory and per-process; nothing survives a restart and nothing
//! is shared across instances. Applied as middleware on the API routes only,
//! never on static assets.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::AppState;
use crate::error::RelayError;

// == Token Bucket ==
/// A single client's budget: refilled continuously, spent one token per
/// request, capped at the burst capacity.
#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
        }
    }

    fn try_acquire(&mut self, capacity: f64, refill_rate: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

// == Rate Limiter ==
/// Token-bucket store keyed by client identity.
///
/// The mutex scopes contention to bucket lookup and refill arithmetic; the
/// critical section never blocks on I/O.
#[derive(Debug)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    refill_rate: f64,
    capacity: f64,
}

impl RateLimiter {
    /// Creates a limiter allowing `rps` sustained requests per second with a
    /// burst allowance of `burst` per client.
    pub fn new(rps: u32, burst: u32) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            refill_rate: rps as f64,
            capacity: burst as f64,
        }
    }

    /// Returns true when `identity` still has budget for one more request.
    pub fn allow(&self, identity: &str) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let bucket = buckets
            .entry(identity.to_string())
            .or_insert_with(|| TokenBucket::new(self.capacity));

        bucket.try_acquire(self.capacity, self.refill_rate)
    }
}

/// Middleware enforcing the per-client budget before a handler runs.
///
/// Clients are bucketed by remote IP address. A rejected request never
/// reaches the route handler, so the subprocess cannot be invoked by it.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let identity = addr.ip().to_string();

    if state.limiter.allow(&identity) {
        next.run(request).await
    } else {
        // Expected under load, not a server fault; keep it out of error logs.
        debug!(client = %identity, "rate limit exceeded");
        RelayError::RateLimited.into_response()
    }
}
