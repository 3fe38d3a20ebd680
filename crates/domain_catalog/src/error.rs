//! Catalog domain errors

use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Client with the given ID was not found
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Category with the given ID was not found
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Product with the given ID was not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A category cannot be deleted while products reference it
    #[error("Category {0} is used by one or more products")]
    CategoryInUse(String),

    /// A product cannot be deleted while invoice lines reference it
    #[error("Product {0} is used in one or more invoices")]
    ProductInUse(String),

    /// Catalog validation failed
    #[error("Catalog validation failed: {0}")]
    ValidationFailed(String),
}

impl CatalogError {
    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        CatalogError::ValidationFailed(errors.join("; "))
    }
}
