//! Catalog validation rules
//!
//! # Validation Rules
//!
//! ## Clients
//! - Must have a name
//! - Email, when provided, must be syntactically valid
//!
//! ## Categories
//! - Must have a name
//!
//! ## Products
//! - Must have a designation
//! - Unit price cannot be negative

use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::category::Category;
use crate::client::Client;
use crate::error::CatalogError;
use crate::product::Product;

/// Errors block a save; warnings are only logged
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    fn warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn into_result(self) -> Result<(), CatalogError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CatalogError::validation_failed(self.errors))
        }
    }
}

/// Validator for catalog entities
pub struct CatalogValidator;

impl CatalogValidator {
    pub fn validate_client(client: &Client) -> ValidationResult {
        let mut result = ValidationResult::default();

        if client.nom.trim().is_empty() {
            result.error("Client name is required");
        }
        let email = client.email.trim();
        if !email.is_empty() && !email.validate_email() {
            result.error(format!("Invalid email address: {}", email));
        }
        if !client.has_tax_number() {
            result.warning("Client has no tax registration number");
        }

        result
    }

    pub fn validate_category(category: &Category) -> ValidationResult {
        let mut result = ValidationResult::default();
        if category.nom.trim().is_empty() {
            result.error("Category name is required");
        }
        result
    }

    pub fn validate_product(product: &Product) -> ValidationResult {
        let mut result = ValidationResult::default();

        if product.designation.trim().is_empty() {
            result.error("Product designation is required");
        }
        if product.prix_unitaire_ht < Decimal::ZERO {
            result.error("Unit price cannot be negative");
        }
        if product.prix_unitaire_ht.is_zero() {
            result.warning("Product has a zero unit price");
        }

        result
    }
}
