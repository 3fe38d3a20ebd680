//! Client (invoiced party) management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;

/// A client that invoices are addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    /// Company or person name
    pub nom: String,
    pub adresse: String,
    pub telephone: String,
    pub email: String,
    /// Tax registration number (matricule fiscal)
    pub tva: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub nom: String,
    #[serde(default)]
    pub adresse: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tva: String,
}

/// Partial update of a client; only provided fields change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPatch {
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub tva: Option<String>,
}

impl Client {
    /// Creates a client with a fresh identifier
    pub fn new(data: NewClient) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            nom: data.nom,
            adresse: data.adresse,
            telephone: data.telephone,
            email: data.email,
            tva: data.tva,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update
    pub fn apply(&mut self, patch: ClientPatch) {
        if let Some(nom) = patch.nom {
            self.nom = nom;
        }
        if let Some(adresse) = patch.adresse {
            self.adresse = adresse;
        }
        if let Some(telephone) = patch.telephone {
            self.telephone = telephone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(tva) = patch.tva {
            self.tva = tva;
        }
        self.updated_at = Utc::now();
    }

    /// Returns true when the client has a tax number to print
    pub fn has_tax_number(&self) -> bool {
        !self.tva.trim().is_empty()
    }
}

impl ClientPatch {
    /// Returns the patch as the client it would produce, for validation
    pub fn preview(&self, current: &Client) -> Client {
        let mut client = current.clone();
        client.apply(self.clone());
        client
    }
}
