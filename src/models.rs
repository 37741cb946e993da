//! Data models for the reseller catalog.
//!
//! This module contains the catalog state tree, process-local newtype ID
//! wrappers, and enumeration types for constrained values.

mod catalog;
mod duration;
mod enums;
mod ids;
mod product;

pub use catalog::ResellerCatalog;
pub use duration::{Duration, DurationKey, LIFETIME};
pub use enums::{PaymentMethod, Step};
pub use ids::{DurationId, ProductId};
pub use product::Product;
