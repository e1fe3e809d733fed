//! VendorHub inventory intake service.
//!
//! A small gateway between vendor tooling and the VendorHub marketplace
//! backend. Vendors submit multi-unit inventory line items here; the service
//! expands per-device variants (IMEI, color, prices), validates identifiers
//! locally and against the marketplace's uniqueness index, resolves
//! same/different attribute modes into the flat submission payload, and
//! forwards the result to the backend persistence API. A per-vendor draft of
//! the in-progress line item is kept locally so a failed submission never
//! loses entered data.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod intake;
pub mod middleware;
pub mod models;
pub mod upstream;
pub mod util;
