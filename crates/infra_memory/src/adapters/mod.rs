//! Port adapters backed by in-memory tables

pub mod clients;
pub mod catalog;
pub mod invoices;
pub mod users;

pub use clients::InMemoryClientStore;
pub use catalog::{InMemoryCategoryStore, InMemoryProductStore};
pub use invoices::InMemoryInvoiceStore;
pub use users::InMemoryUserStore;
