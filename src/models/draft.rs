use serde::{Deserialize, Serialize};

/// A vendor's saved in-progress line item. One draft per vendor; the payload
/// is a JSON-serialized `LineItemForm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub vendor_id: String,
    pub payload: String,
    pub updated_at: i64,
}
