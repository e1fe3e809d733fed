use serde::{Deserialize, Serialize};

/// A marketplace vendor allowed to submit inventory through this service.
/// The full API key is never stored; lookups go through its hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    /// Displayable head of the API key, kept for listings.
    pub key_prefix: String,
    pub created_at: i64,
}
