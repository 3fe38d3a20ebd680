//! Product categories

use serde::{Deserialize, Serialize};

use core_kernel::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub nom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub nom: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub nom: Option<String>,
}

impl Category {
    pub fn new(data: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            nom: data.nom,
        }
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(nom) = patch.nom {
            self.nom = nom;
        }
    }
}
