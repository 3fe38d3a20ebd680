//! Catalog service: clients, categories and products

use std::sync::Arc;

use tracing::{debug, info, instrument};

use core_kernel::{CategoryId, ClientId, OperationMetadata, PortError, ProductId};
use domain_catalog::{
    filter_categories, filter_clients, filter_products, search_clients, search_products_for_line,
    CatalogError, CatalogValidator, Category, CategoryPatch, CategoryPort, Client, ClientPatch,
    ClientPort, NewCategory, NewClient, NewProduct, Product, ProductPatch, ProductPort,
    ProductWithCategory, ValidationResult,
};
use domain_invoicing::InvoicePort;

use crate::error::ApiError;

/// Catalog operations spanning more than one port
#[derive(Clone)]
pub struct CatalogService {
    clients: Arc<dyn ClientPort>,
    categories: Arc<dyn CategoryPort>,
    products: Arc<dyn ProductPort>,
    invoices: Arc<dyn InvoicePort>,
}

impl CatalogService {
    pub fn new(
        clients: Arc<dyn ClientPort>,
        categories: Arc<dyn CategoryPort>,
        products: Arc<dyn ProductPort>,
        invoices: Arc<dyn InvoicePort>,
    ) -> Self {
        Self {
            clients,
            categories,
            products,
            invoices,
        }
    }

    // Clients

    pub async fn list_clients(&self, term: &str) -> Result<Vec<Client>, ApiError> {
        let clients = self.clients.list(None).await?;
        Ok(filter_clients(&clients, term).into_iter().cloned().collect())
    }

    /// Type-ahead search; terms shorter than two characters match nothing
    pub async fn search_clients(&self, term: &str) -> Result<Vec<Client>, ApiError> {
        let clients = self.clients.list(None).await?;
        Ok(search_clients(&clients, term).into_iter().cloned().collect())
    }

    pub async fn get_client(&self, id: ClientId) -> Result<Client, ApiError> {
        Ok(self.clients.get(id, None).await?)
    }

    #[instrument(skip(self, data, metadata), fields(nom = %data.nom))]
    pub async fn create_client(
        &self,
        data: NewClient,
        metadata: OperationMetadata,
    ) -> Result<Client, ApiError> {
        checked("client", CatalogValidator::validate_client(&Client::new(data.clone())))?;
        let client = self.clients.create(data, Some(metadata)).await?;
        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self, patch, metadata))]
    pub async fn update_client(
        &self,
        id: ClientId,
        patch: ClientPatch,
        metadata: OperationMetadata,
    ) -> Result<Client, ApiError> {
        let current = self.clients.get(id, Some(metadata.clone())).await?;
        checked("client", CatalogValidator::validate_client(&patch.preview(&current)))?;
        Ok(self.clients.update(id, patch, Some(metadata)).await?)
    }

    #[instrument(skip(self, metadata))]
    pub async fn delete_client(&self, id: ClientId, metadata: OperationMetadata) -> Result<(), ApiError> {
        self.clients.delete(id, Some(metadata)).await?;
        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    // Categories

    pub async fn list_categories(&self, term: &str) -> Result<Vec<Category>, ApiError> {
        let categories = self.categories.list(None).await?;
        Ok(filter_categories(&categories, term).into_iter().cloned().collect())
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        Ok(self.categories.get(id, None).await?)
    }

    #[instrument(skip(self, data, metadata), fields(nom = %data.nom))]
    pub async fn create_category(
        &self,
        data: NewCategory,
        metadata: OperationMetadata,
    ) -> Result<Category, ApiError> {
        checked("category", CatalogValidator::validate_category(&Category::new(data.clone())))?;
        Ok(self.categories.create(data, Some(metadata)).await?)
    }

    #[instrument(skip(self, patch, metadata))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
        metadata: OperationMetadata,
    ) -> Result<Category, ApiError> {
        let mut preview = self.categories.get(id, Some(metadata.clone())).await?;
        preview.apply(patch.clone());
        checked("category", CatalogValidator::validate_category(&preview))?;
        Ok(self.categories.update(id, patch, Some(metadata)).await?)
    }

    /// Deletes a category no product belongs to
    #[instrument(skip(self, metadata))]
    pub async fn delete_category(&self, id: CategoryId, metadata: OperationMetadata) -> Result<(), ApiError> {
        self.categories.get(id, Some(metadata.clone())).await?;
        if self.products.uses_category(id, Some(metadata.clone())).await? {
            return Err(CatalogError::CategoryInUse(id.to_string()).into());
        }
        self.categories.delete(id, Some(metadata)).await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    // Products

    /// Products with their category, filtered by designation or category name
    pub async fn list_products(&self, term: &str) -> Result<Vec<ProductWithCategory>, ApiError> {
        let views = self.product_views().await?;
        Ok(filter_products(&views, term).into_iter().cloned().collect())
    }

    /// Type-ahead search for invoice lines
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        let products = self.products.list(None).await?;
        Ok(search_products_for_line(&products, term).into_iter().cloned().collect())
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ProductWithCategory, ApiError> {
        let product = self.products.get(id, None).await?;
        let categories = self.categories.list(None).await?;
        Ok(product.with_category(&categories))
    }

    #[instrument(skip(self, data, metadata), fields(designation = %data.designation))]
    pub async fn create_product(
        &self,
        data: NewProduct,
        metadata: OperationMetadata,
    ) -> Result<ProductWithCategory, ApiError> {
        checked("product", CatalogValidator::validate_product(&Product::new(data.clone())))?;
        let category = self.existing_category(data.categorie_id, &metadata).await?;
        let product = self.products.create(data, Some(metadata)).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product.with_category(&[category]))
    }

    #[instrument(skip(self, patch, metadata))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
        metadata: OperationMetadata,
    ) -> Result<ProductWithCategory, ApiError> {
        let mut preview = self.products.get(id, Some(metadata.clone())).await?;
        preview.apply(patch.clone());
        checked("product", CatalogValidator::validate_product(&preview))?;
        let category = self.existing_category(preview.categorie_id, &metadata).await?;
        let product = self.products.update(id, patch, Some(metadata)).await?;
        Ok(product.with_category(&[category]))
    }

    /// Deletes a product no invoice line references
    #[instrument(skip(self, metadata))]
    pub async fn delete_product(&self, id: ProductId, metadata: OperationMetadata) -> Result<(), ApiError> {
        self.products.get(id, Some(metadata.clone())).await?;
        if self.invoices.references_product(id, Some(metadata.clone())).await? {
            return Err(CatalogError::ProductInUse(id.to_string()).into());
        }
        self.products.delete(id, Some(metadata)).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn product_views(&self) -> Result<Vec<ProductWithCategory>, PortError> {
        let categories = self.categories.list(None).await?;
        Ok(self
            .products
            .list(None)
            .await?
            .into_iter()
            .map(|p| p.with_category(&categories))
            .collect())
    }

    /// A product must point to an existing category
    async fn existing_category(
        &self,
        id: CategoryId,
        metadata: &OperationMetadata,
    ) -> Result<Category, ApiError> {
        match self.categories.get(id, Some(metadata.clone())).await {
            Ok(category) => Ok(category),
            Err(e) if e.is_not_found() => Err(ApiError::validation(vec![format!(
                "Unknown category: {}",
                id
            )])),
            Err(e) => Err(e.into()),
        }
    }
}

fn checked(entity: &str, result: ValidationResult) -> Result<(), ApiError> {
    for warning in &result.warnings {
        debug!(entity, warning = %warning, "Validation warning");
    }
    Ok(result.into_result()?)
}
