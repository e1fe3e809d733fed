//! Wire types and client for the VendorHub marketplace backend.

mod market;

pub use market::*;

use serde::{Deserialize, Serialize};

use crate::models::{Category, ItemMode};

/// Flat line item record as the marketplace backend persists it. Optional
/// arrays are omitted entirely when absent; on update the identifier array
/// is the complete new truth (a previously registered identifier missing
/// from it is removed, there is no tombstone).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub quantity: u32,
    pub min_stock: u32,
    #[serde(default)]
    pub images: Vec<ItemImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_device_selling_prices: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_device_purchase_prices: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    pub color_mode: ItemMode,
    pub price_mode: ItemMode,
    pub purchase_price_mode: ItemMode,
}

/// Hosted image reference returned by the backend's upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemImage {
    pub id: String,
    pub url: String,
}

/// A persisted item as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: String,
    #[serde(flatten)]
    pub item: SubmissionPayload,
}
