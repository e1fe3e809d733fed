//! Same/different mode resolution and submission payload assembly.
//!
//! Pure and deterministic: modes collapse into either a broadcast scalar or
//! a per-device array, and the aggregate record gets one representative
//! value (the mean of the entered per-device prices, never counting
//! unfilled slots as zero).

use crate::models::{DeviceRow, ItemMode, LineItemForm};
use crate::upstream::{ItemImage, SubmissionPayload};

/// Resolve the color mode into the flat array to persist. `Same` broadcasts
/// a non-empty color `quantity` times; `Different` keeps the entered
/// per-device colors with blanks dropped. `None` means the record carries no
/// color breakdown.
pub fn resolve_colors(
    mode: ItemMode,
    broadcast: Option<&str>,
    rows: &[DeviceRow],
    quantity: usize,
) -> Option<Vec<String>> {
    match mode {
        ItemMode::Same => match broadcast {
            Some(color) if !color.is_empty() => Some(vec![color.to_string(); quantity]),
            _ => None,
        },
        ItemMode::Different => {
            let colors: Vec<String> = rows
                .iter()
                .map(|r| r.color.clone())
                .filter(|c| !c.is_empty())
                .collect();
            if colors.is_empty() { None } else { Some(colors) }
        }
    }
}

/// A resolved price: the representative scalar for the aggregate record and
/// the per-device array to persist (absent under `Same` mode or when no
/// per-device entry was filled).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPrice {
    pub scalar: f64,
    pub per_device: Option<Vec<f64>>,
}

/// Resolve one price attribute. Under `Different` mode only positive entries
/// count: the scalar is the mean of the filled values, and unfilled devices
/// never drag the average down. With nothing filled the scalar field stands.
pub fn resolve_price<I>(mode: ItemMode, scalar: f64, entries: I) -> ResolvedPrice
where
    I: IntoIterator<Item = f64>,
{
    match mode {
        ItemMode::Same => ResolvedPrice {
            scalar,
            per_device: None,
        },
        ItemMode::Different => {
            let filled: Vec<f64> = entries.into_iter().filter(|p| *p > 0.0).collect();
            if filled.is_empty() {
                ResolvedPrice {
                    scalar,
                    per_device: None,
                }
            } else {
                let mean = filled.iter().sum::<f64>() / filled.len() as f64;
                ResolvedPrice {
                    scalar: mean,
                    per_device: Some(filled),
                }
            }
        }
    }
}

/// Assemble the flat submission payload from a validated form, its device
/// rows and the hosted images.
pub fn build_payload(
    form: &LineItemForm,
    rows: &[DeviceRow],
    images: Vec<ItemImage>,
) -> SubmissionPayload {
    let quantity = form.quantity as usize;

    let colors = resolve_colors(form.color_mode, form.color.as_deref(), rows, quantity);
    let selling = resolve_price(
        form.price_mode,
        form.selling_price,
        rows.iter().map(|r| r.selling_price),
    );
    let purchase = resolve_price(
        form.purchase_price_mode,
        form.purchase_price,
        rows.iter().map(|r| r.purchase_price),
    );

    let identifiers = if form.category.unit_tracked() {
        Some(rows.iter().map(|r| r.identifier.clone()).collect())
    } else {
        None
    };

    SubmissionPayload {
        name: form.name.clone(),
        brand: form.brand.clone(),
        model: form.model.clone(),
        category: form.category,
        sku: form.sku.clone(),
        description: form.description.clone(),
        purchase_price: purchase.scalar,
        selling_price: selling.scalar,
        quantity: form.quantity,
        min_stock: form.min_stock,
        images,
        identifiers,
        per_device_selling_prices: selling.per_device,
        per_device_purchase_prices: purchase.per_device,
        colors,
        color_mode: form.color_mode,
        price_mode: form.price_mode,
        purchase_price_mode: form.purchase_price_mode,
    }
}
