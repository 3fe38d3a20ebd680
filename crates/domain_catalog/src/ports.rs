//! Catalog Domain Ports
//!
//! Storage interfaces for clients, categories and products. Application
//! services receive these as `Arc<dyn ...>` so the in-memory adapters can be
//! replaced by a persistent store.
//!
//! ```rust,ignore
//! pub struct CatalogService {
//!     clients: Arc<dyn ClientPort>,
//! }
//!
//! impl CatalogService {
//!     pub async fn get_client(&self, id: ClientId) -> Result<Client, PortError> {
//!         self.clients.get(id, None).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{
    CategoryId, ClientId, DomainPort, HealthCheckable, OperationMetadata, PortError, ProductId,
};

use crate::category::{Category, CategoryPatch, NewCategory};
use crate::client::{Client, ClientPatch, NewClient};
use crate::product::{NewProduct, Product, ProductPatch};

/// Storage port for clients
#[async_trait]
pub trait ClientPort: DomainPort + HealthCheckable {
    /// Retrieves a client by ID, or `PortError::NotFound`
    async fn get(&self, id: ClientId, metadata: Option<OperationMetadata>)
        -> Result<Client, PortError>;

    /// Lists all clients in insertion order
    async fn list(&self, metadata: Option<OperationMetadata>) -> Result<Vec<Client>, PortError>;

    async fn create(
        &self,
        data: NewClient,
        metadata: Option<OperationMetadata>,
    ) -> Result<Client, PortError>;

    async fn update(
        &self,
        id: ClientId,
        patch: ClientPatch,
        metadata: Option<OperationMetadata>,
    ) -> Result<Client, PortError>;

    async fn delete(&self, id: ClientId, metadata: Option<OperationMetadata>)
        -> Result<(), PortError>;
}

/// Storage port for product categories
#[async_trait]
pub trait CategoryPort: DomainPort + HealthCheckable {
    async fn get(
        &self,
        id: CategoryId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError>;

    async fn list(&self, metadata: Option<OperationMetadata>)
        -> Result<Vec<Category>, PortError>;

    async fn create(
        &self,
        data: NewCategory,
        metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError>;

    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
        metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError>;

    /// Deletes a category
    ///
    /// Does not check product references; callers check
    /// [`ProductPort::uses_category`] first.
    async fn delete(
        &self,
        id: CategoryId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Storage port for products
#[async_trait]
pub trait ProductPort: DomainPort + HealthCheckable {
    async fn get(&self, id: ProductId, metadata: Option<OperationMetadata>)
        -> Result<Product, PortError>;

    async fn list(&self, metadata: Option<OperationMetadata>) -> Result<Vec<Product>, PortError>;

    async fn create(
        &self,
        data: NewProduct,
        metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError>;

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
        metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError>;

    async fn delete(&self, id: ProductId, metadata: Option<OperationMetadata>)
        -> Result<(), PortError>;

    /// Returns true when at least one product belongs to the category
    async fn uses_category(
        &self,
        categorie_id: CategoryId,
        metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError>;
}
