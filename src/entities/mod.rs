//! Entity type definitions
//!
//! Stockroom persists two entity kinds:
//! - [`Item`] - stocked items with quantity and unit price
//! - [`Supplier`] - suppliers with optional contact details

pub mod item;
pub mod supplier;

pub use item::{Item, ItemFields, ItemInput};
pub use supplier::{Supplier, SupplierFields, SupplierInput};
