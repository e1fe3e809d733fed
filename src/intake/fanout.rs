//! Quantity-driven synchronization of per-device rows.

use tracing::debug;

use crate::models::{DeviceRow, ItemMode, LineItemForm};
use crate::upstream::MarketItem;

/// Resize `rows` to exactly `quantity` entries. Existing rows keep their
/// values at preserved indices; new tail rows are zero-valued. Shrinking
/// drops trailing rows without confirmation.
pub fn resize(rows: &mut Vec<DeviceRow>, quantity: usize) {
    if rows.len() > quantity {
        debug!(
            dropped = rows.len() - quantity,
            "truncating device rows on quantity decrease"
        );
    }
    rows.resize_with(quantity, DeviceRow::default);
}

/// Rebuild per-device rows from the flat arrays of a persisted item.
/// Arrays shorter than `quantity` (per-device prices and colors are stored
/// with unfilled entries dropped) pad the tail with zero values.
pub fn rehydrate(
    quantity: usize,
    identifiers: Option<&[String]>,
    colors: Option<&[String]>,
    selling_prices: Option<&[f64]>,
    purchase_prices: Option<&[f64]>,
) -> Vec<DeviceRow> {
    let text = |arr: Option<&[String]>, i: usize| -> String {
        arr.and_then(|a| a.get(i)).cloned().unwrap_or_default()
    };
    let number = |arr: Option<&[f64]>, i: usize| -> f64 {
        arr.and_then(|a| a.get(i)).copied().unwrap_or(0.0)
    };

    (0..quantity)
        .map(|i| DeviceRow {
            identifier: text(identifiers, i),
            color: text(colors, i),
            selling_price: number(selling_prices, i),
            purchase_price: number(purchase_prices, i),
        })
        .collect()
}

/// Turn a persisted marketplace item back into the editable form shape.
/// Broadcast attributes (mode `same`) come back as the scalar field with the
/// per-row slots left empty; per-device attributes land in the rows.
pub fn form_from_item(item: MarketItem) -> LineItemForm {
    let MarketItem { id: _, item } = item;
    let quantity = item.quantity as usize;

    let per_device_colors = match item.color_mode {
        ItemMode::Different => item.colors.as_deref(),
        ItemMode::Same => None,
    };
    let per_device_selling = match item.price_mode {
        ItemMode::Different => item.per_device_selling_prices.as_deref(),
        ItemMode::Same => None,
    };
    let per_device_purchase = match item.purchase_price_mode {
        ItemMode::Different => item.per_device_purchase_prices.as_deref(),
        ItemMode::Same => None,
    };

    let devices = rehydrate(
        quantity,
        item.identifiers.as_deref(),
        per_device_colors,
        per_device_selling,
        per_device_purchase,
    );

    let color = match item.color_mode {
        ItemMode::Same => item.colors.as_ref().and_then(|c| c.first()).cloned(),
        ItemMode::Different => None,
    };

    LineItemForm {
        name: item.name,
        brand: item.brand,
        model: item.model,
        category: item.category,
        sku: item.sku,
        description: item.description,
        quantity: item.quantity,
        min_stock: item.min_stock,
        color_mode: item.color_mode,
        price_mode: item.price_mode,
        purchase_price_mode: item.purchase_price_mode,
        color,
        selling_price: item.selling_price,
        purchase_price: item.purchase_price,
        devices,
        images: Vec::new(),
        existing_images: item.images,
    }
}
