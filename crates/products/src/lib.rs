//! Products domain module.
//!
//! Product records, their validation rules and operator edits, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{NewProduct, Product, ProductPatch};
