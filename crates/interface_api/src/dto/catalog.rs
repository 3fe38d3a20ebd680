//! Catalog DTOs

use serde::Deserialize;

/// `?q=` filter of list and search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
