//! Catalog Domain
//!
//! This crate manages the reference data an invoice is built from:
//!
//! - **Clients**: the invoiced parties, with address, contact details and tax number
//! - **Categories**: product groupings
//! - **Products**: sellable items with a unit price before tax
//!
//! Storage is reached exclusively through the port traits in [`ports`], so the
//! in-memory adapters can be swapped for a persistent store without touching
//! the rules here.

pub mod client;
pub mod category;
pub mod product;
pub mod search;
pub mod validation;
pub mod ports;
pub mod error;

pub use client::{Client, NewClient, ClientPatch};
pub use category::{Category, NewCategory, CategoryPatch};
pub use product::{Product, ProductWithCategory, NewProduct, ProductPatch};
pub use search::{
    search_clients, search_products_for_line, filter_clients, filter_products,
    filter_categories, MIN_SEARCH_LENGTH,
};
pub use validation::{CatalogValidator, ValidationResult};
pub use ports::{ClientPort, CategoryPort, ProductPort};
pub use error::CatalogError;
