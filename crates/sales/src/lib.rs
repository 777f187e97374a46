//! Sales domain module.
//!
//! Recorded sales, the validation applied before a sale is stored, and the
//! per-product sales report line. Deterministic domain logic only (no IO, no
//! storage).

pub mod report;
pub mod sale;

pub use report::SalesReportLine;
pub use sale::{NewSale, SALE_DATE_FORMAT, Sale, parse_sale_date};
