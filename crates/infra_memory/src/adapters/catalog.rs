//! In-memory category and product stores

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    CategoryId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
    ProductId,
};
use domain_catalog::{
    Category, CategoryPatch, CategoryPort, NewCategory, NewProduct, Product, ProductPatch,
    ProductPort,
};

use crate::table::Table;

/// `CategoryPort` over an in-memory table
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    categories: Arc<RwLock<Table<CategoryId, Category>>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryCategoryStore {}

#[async_trait]
impl HealthCheckable for InMemoryCategoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.categories.read().await.len();
        HealthCheckResult::healthy("memory-categories", count)
    }
}

#[async_trait]
impl CategoryPort for InMemoryCategoryStore {
    #[instrument(skip(self, _metadata), fields(category_id = %id))]
    async fn get(
        &self,
        id: CategoryId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError> {
        self.categories
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Category", id))
    }

    async fn list(&self, _metadata: Option<OperationMetadata>) -> Result<Vec<Category>, PortError> {
        Ok(self.categories.read().await.values().cloned().collect())
    }

    #[instrument(skip(self, data, _metadata))]
    async fn create(
        &self,
        data: NewCategory,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError> {
        let category = Category::new(data);
        debug!(category_id = %category.id, "Creating category");
        self.categories.write().await.insert(category.id, category.clone());
        Ok(category)
    }

    #[instrument(skip(self, patch, _metadata), fields(category_id = %id))]
    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Category, PortError> {
        let mut table = self.categories.write().await;
        let category = table
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Category", id))?;
        category.apply(patch);
        Ok(category.clone())
    }

    #[instrument(skip(self, _metadata), fields(category_id = %id))]
    async fn delete(
        &self,
        id: CategoryId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.categories
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Category", id))
    }
}

/// `ProductPort` over an in-memory table
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Table<ProductId, Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryProductStore {}

#[async_trait]
impl HealthCheckable for InMemoryProductStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.products.read().await.len();
        HealthCheckResult::healthy("memory-products", count)
    }
}

#[async_trait]
impl ProductPort for InMemoryProductStore {
    #[instrument(skip(self, _metadata), fields(product_id = %id))]
    async fn get(
        &self,
        id: ProductId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Product", id))
    }

    async fn list(&self, _metadata: Option<OperationMetadata>) -> Result<Vec<Product>, PortError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    #[instrument(skip(self, data, _metadata))]
    async fn create(
        &self,
        data: NewProduct,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError> {
        let product = Product::new(data);
        debug!(product_id = %product.id, "Creating product");
        self.products.write().await.insert(product.id, product.clone());
        Ok(product)
    }

    #[instrument(skip(self, patch, _metadata), fields(product_id = %id))]
    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Product, PortError> {
        let mut table = self.products.write().await;
        let product = table
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Product", id))?;
        product.apply(patch);
        Ok(product.clone())
    }

    #[instrument(skip(self, _metadata), fields(product_id = %id))]
    async fn delete(&self, id: ProductId, _metadata: Option<OperationMetadata>) -> Result<(), PortError> {
        self.products
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Product", id))
    }

    async fn uses_category(
        &self,
        categorie_id: CategoryId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .any(|p| p.categorie_id == categorie_id))
    }
}
