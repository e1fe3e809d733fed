//! Per-device variant expansion and validation for multi-unit line items.
//!
//! A line item covering `quantity` physical units fans out into one
//! [`DeviceRow`](crate::models::DeviceRow) per unit. [`fanout`] keeps the row
//! array sized to the quantity and rebuilds rows from a persisted flat
//! record, [`validate`] gates submission on identifier completeness, format
//! and uniqueness, and [`resolve`] collapses same/different attribute modes
//! into the flat payload the marketplace backend persists.

pub mod fanout;
pub mod resolve;
pub mod validate;
