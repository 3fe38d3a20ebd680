//! In-Memory Infrastructure Layer
//!
//! Adapters implementing every storage port of the invoicing system on top of
//! `tokio::sync::RwLock` guarded tables. Data lives as long as the process.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_memory::{MemoryStores, seed::DemoData};
//!
//! let stores = MemoryStores::new();
//! let report = DemoData::standard().load(&stores).await?;
//! let clients = stores.clients.list(None).await?;
//! ```

pub mod table;
pub mod adapters;
pub mod seed;
pub mod error;

use std::sync::Arc;

pub use adapters::{
    InMemoryCategoryStore, InMemoryClientStore, InMemoryInvoiceStore, InMemoryProductStore,
    InMemoryUserStore,
};
pub use error::identity_to_port_error;
pub use seed::{DemoData, SeedReport};
pub use table::Table;

/// One instance of every in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStores {
    pub clients: Arc<InMemoryClientStore>,
    pub categories: Arc<InMemoryCategoryStore>,
    pub products: Arc<InMemoryProductStore>,
    pub invoices: Arc<InMemoryInvoiceStore>,
    pub users: Arc<InMemoryUserStore>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}
