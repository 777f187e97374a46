//! Accounting module: revenue, cost of goods sold and margin over recorded sales.
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod summary;

pub use summary::{FinancialSummary, SaleLine};
