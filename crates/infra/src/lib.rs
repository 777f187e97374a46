//! Infrastructure layer: the SQLite-backed inventory ledger.
//!
//! Domain crates decide; this crate loads, stores and wraps each mutation in
//! a transaction.

pub mod error;
pub mod ledger;
mod rows;
mod schema;


pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
