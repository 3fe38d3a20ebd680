//! Products offered on invoices

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, ProductId};

use crate::category::Category;

/// A sellable product or service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub designation: String,
    /// Unit price before tax
    pub prix_unitaire_ht: Decimal,
    pub categorie_id: CategoryId,
}

/// A product joined with its category, as returned to list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    /// Missing when the referenced category no longer exists
    pub categorie: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub designation: String,
    pub prix_unitaire_ht: Decimal,
    pub categorie_id: CategoryId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub designation: Option<String>,
    pub prix_unitaire_ht: Option<Decimal>,
    pub categorie_id: Option<CategoryId>,
}

impl Product {
    pub fn new(data: NewProduct) -> Self {
        Self {
            id: ProductId::new(),
            designation: data.designation,
            prix_unitaire_ht: data.prix_unitaire_ht,
            categorie_id: data.categorie_id,
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(designation) = patch.designation {
            self.designation = designation;
        }
        if let Some(price) = patch.prix_unitaire_ht {
            self.prix_unitaire_ht = price;
        }
        if let Some(categorie_id) = patch.categorie_id {
            self.categorie_id = categorie_id;
        }
    }

    /// Joins the product with its category, looked up in `categories`
    pub fn with_category(self, categories: &[Category]) -> ProductWithCategory {
        let categorie = categories
            .iter()
            .find(|c| c.id == self.categorie_id)
            .cloned();
        ProductWithCategory {
            product: self,
            categorie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::NewCategory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_with_category_resolves_reference() {
        let informatique = Category::new(NewCategory { nom: "Informatique".to_string() });
        let laptop = Product::new(NewProduct {
            designation: "Ordinateur Portable".to_string(),
            prix_unitaire_ht: dec!(1500),
            categorie_id: informatique.id,
        });

        let view = laptop.with_category(std::slice::from_ref(&informatique));
        assert_eq!(view.categorie, Some(informatique));
    }

    #[test]
    fn test_with_category_missing_reference() {
        let laptop = Product::new(NewProduct {
            designation: "Ordinateur Portable".to_string(),
            prix_unitaire_ht: dec!(1500),
            categorie_id: CategoryId::new(),
        });

        assert!(laptop.with_category(&[]).categorie.is_none());
    }

    #[test]
    fn test_view_serializes_flat() {
        let cat = Category::new(NewCategory { nom: "Services".to_string() });
        let product = Product::new(NewProduct {
            designation: "Développement Web".to_string(),
            prix_unitaire_ht: dec!(2000),
            categorie_id: cat.id,
        });
        let json = serde_json::to_value(product.with_category(&[cat])).unwrap();
        assert_eq!(json["designation"], "Développement Web");
        assert_eq!(json["categorie"]["nom"], "Services");
    }
}
