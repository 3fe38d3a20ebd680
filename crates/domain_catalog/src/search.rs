//! Catalog search and list filtering
//!
//! Two flavours exist. Type-ahead searches (picking a client or a product
//! while editing an invoice) stay silent until the user typed at least
//! [`MIN_SEARCH_LENGTH`] characters. List filters match everything on an
//! empty term.

use crate::category::Category;
use crate::client::Client;
use crate::product::{Product, ProductWithCategory};

/// Minimum trimmed length of a type-ahead search term
pub const MIN_SEARCH_LENGTH: usize = 2;

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Type-ahead search of clients by name or email
pub fn search_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let needle = normalize(term);
    if needle.chars().count() < MIN_SEARCH_LENGTH {
        return Vec::new();
    }
    clients
        .iter()
        .filter(|c| contains(&c.nom, &needle) || contains(&c.email, &needle))
        .collect()
}

/// Type-ahead search of products by designation, used on invoice lines
pub fn search_products_for_line<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = normalize(term);
    if needle.chars().count() < MIN_SEARCH_LENGTH {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| contains(&p.designation, &needle))
        .collect()
}

/// List filter for clients; an empty term keeps everything
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let needle = normalize(term);
    clients
        .iter()
        .filter(|c| needle.is_empty() || contains(&c.nom, &needle) || contains(&c.email, &needle))
        .collect()
}

/// List filter for products, matching the designation or the category name
pub fn filter_products<'a>(
    products: &'a [ProductWithCategory],
    term: &str,
) -> Vec<&'a ProductWithCategory> {
    let needle = normalize(term);
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || contains(&p.product.designation, &needle)
                || p.categorie
                    .as_ref()
                    .is_some_and(|c| contains(&c.nom, &needle))
        })
        .collect()
}

/// List filter for categories by name
pub fn filter_categories<'a>(categories: &'a [Category], term: &str) -> Vec<&'a Category> {
    let needle = normalize(term);
    categories
        .iter()
        .filter(|c| needle.is_empty() || contains(&c.nom, &needle))
        .collect()
}
