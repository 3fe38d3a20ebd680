//! Pre-built Test Fixtures
//!
//! Ready-to-use data mirroring the demo catalog. Values are fixed so tests
//! can assert exact amounts.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{CategoryId, Currency, Money};
use domain_catalog::{NewCategory, NewClient, NewProduct};
use domain_invoicing::LineDraft;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Total of the sample invoice as it was recorded
    pub fn dt_2380() -> Money {
        Money::new(dec!(2380), Currency::DT)
    }

    /// Total of the sample invoice as recomputed, stamp included
    pub fn dt_2381() -> Money {
        Money::new(dec!(2381), Currency::DT)
    }
}

/// Fixture for invoice lines
pub struct LineFixtures;

impl LineFixtures {
    /// The single line of the sample invoice, as caller input
    pub fn web_development_draft() -> LineDraft {
        LineDraft {
            designation: "Développement Web".to_string(),
            prix_unitaire: dec!(2000),
            ..Default::default()
        }
    }
}

/// Fixture for clients
pub struct ClientFixtures;

impl ClientFixtures {
    /// A client without tax number
    pub fn particulier() -> NewClient {
        NewClient {
            nom: "Ahmed Ben Salah".to_string(),
            email: "ahmed@example.tn".to_string(),
            ..Default::default()
        }
    }
}

/// Fixture for catalog entries
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn services_category() -> NewCategory {
        NewCategory {
            nom: "Services".to_string(),
        }
    }

    pub fn web_development(categorie_id: CategoryId) -> NewProduct {
        NewProduct {
            designation: "Développement Web".to_string(),
            prix_unitaire_ht: dec!(2000),
            categorie_id,
        }
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    pub fn mid_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }
}
