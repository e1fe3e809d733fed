use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::upstream::ItemImage;

/// Whether a per-device attribute (color, price) is shared across all units
/// of a line item or entered individually per device.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemMode {
    #[default]
    Same,
    Different,
}

/// Product category. Unit-tracked categories carry one IMEI per physical
/// unit and go through identifier validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Mobile,
    Tablet,
    Laptop,
    Accessory,
    Other,
}

impl Category {
    pub fn unit_tracked(&self) -> bool {
        matches!(self, Category::Mobile)
    }
}

/// One physical unit of a line item. Kept as a single record per device so
/// the identifier/color/price sequences cannot drift out of length-sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRow {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub purchase_price: f64,
}

/// A line item as entered by the vendor. Also the shape persisted as a
/// draft and returned by the load-for-edit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemForm {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: Category,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub min_stock: u32,
    #[serde(default)]
    pub color_mode: ItemMode,
    #[serde(default)]
    pub price_mode: ItemMode,
    #[serde(default)]
    pub purchase_price_mode: ItemMode,
    /// Broadcast color, used when `color_mode` is `same`.
    #[serde(default)]
    pub color: Option<String>,
    /// Scalar prices; authoritative when the matching mode is `same`.
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub devices: Vec<DeviceRow>,
    /// New images to register with the backend, base64-encoded.
    #[serde(default)]
    pub images: Vec<ImageUpload>,
    /// Already-hosted images kept across an edit.
    #[serde(default)]
    pub existing_images: Vec<ItemImage>,
}

/// Image attached to a submission before it has been registered upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    /// Base64-encoded file content.
    pub content: String,
}
