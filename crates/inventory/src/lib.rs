//! Inventory rules.
//!
//! How a sale draws stock down and when a product needs to be reordered.
//! Pure domain logic: callers load products, these functions decide.

pub mod stock;

pub use stock::{needs_reorder, reorder_alerts, withdraw};
