//! Shared helpers: bearer extraction and API key handling.

use axum::http::HeaderMap;
use rand::Rng;
use sha2::{Digest, Sha256};

const KEY_BYTES: usize = 24;

/// Extract a Bearer token from the Authorization header.
///
/// Returns the token string without the "Bearer " prefix, or None if
/// the header is missing, malformed, or empty after the prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Generate a vendor API key. Returns `(key, prefix)` where the prefix is
/// the displayable head of the key kept for listings.
pub fn generate_api_key() -> (String, String) {
    let mut bytes = [0u8; KEY_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);
    let key = format!("vh_{}", hex::encode(bytes));
    let prefix = key[..7].to_string();
    (key, prefix)
}

/// Hash an API key for storage/lookup. Only the hash is persisted.
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"vendorhub-key-v1:");
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
