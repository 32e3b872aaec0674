//! Response Cache Tagger
//!
//! Derives the entity tag used for conditional-GET negotiation.

use sha2::{Digest, Sha256};

/// Computes the entity tag for a response body.
///
/// A pure function: identical bytes always yield the identical lowercase hex
/// digest, within and across process lifetimes, which is all the cache
/// contract relies on.
pub fn tag(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    format!("{:x}", hasher.finalize())
}

/// Returns true when a client-supplied validator proves the client already
/// holds the current body.
///
/// Comparison is exact string equality against the single supplied value; no
/// weak-validator prefix handling and no multi-tag list parsing.
pub fn matches(client_validator: Option<&str>, current: &str) -> bool {
    client_validator == Some(current)
}
