//! Demo data
//!
//! A small catalog and one issued invoice, loaded at startup when demo data
//! is enabled. Invoice totals are always recomputed on load; the totals
//! recorded alongside the sample invoice are only compared against the
//! recomputed ones, and every difference is logged and reported.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{info, warn};

use core_kernel::{Currency, OperationMetadata, PortError};
use domain_catalog::{CategoryPort, ClientPort, NewCategory, NewClient, NewProduct, ProductPort};
use domain_invoicing::{
    Invoice, InvoiceDraft, InvoicePort, InvoiceSettings, LineDraft, StoredTotals,
    TotalsDiscrepancy,
};

use crate::MemoryStores;

/// A product referencing its category by position
#[derive(Debug, Clone)]
pub struct SeedProduct {
    pub designation: String,
    pub prix_unitaire_ht: Decimal,
    pub category: usize,
}

/// An invoice line referencing its product by position
#[derive(Debug, Clone)]
pub struct SeedLine {
    pub product: usize,
    pub quantite: Decimal,
    pub remise: Decimal,
    pub tva: Decimal,
}

/// An invoice with the totals it was recorded with
#[derive(Debug, Clone)]
pub struct SeedInvoice {
    pub numero: String,
    pub date: NaiveDate,
    pub client: usize,
    pub devise: Currency,
    pub settings: InvoiceSettings,
    pub lines: Vec<SeedLine>,
    pub stored: StoredTotals,
}

/// Demo dataset
#[derive(Debug, Clone, Default)]
pub struct DemoData {
    pub clients: Vec<NewClient>,
    pub categories: Vec<String>,
    pub products: Vec<SeedProduct>,
    pub invoices: Vec<SeedInvoice>,
}

/// Outcome of a seed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub clients: usize,
    pub categories: usize,
    pub products: usize,
    pub invoices: usize,
    /// Recorded totals that disagree with the recomputed ones, by invoice number
    pub discrepancies: Vec<(String, TotalsDiscrepancy)>,
}

impl SeedReport {
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

impl DemoData {
    /// The standard demo catalog and sample invoice
    pub fn standard() -> Self {
        Self {
            clients: vec![
                NewClient {
                    nom: "Société Example".to_string(),
                    adresse: "123 Rue Principale, Tunis, Tunisie".to_string(),
                    telephone: "+216 71 123 456".to_string(),
                    email: "contact@example.tn".to_string(),
                    tva: "TN1234567".to_string(),
                },
                NewClient {
                    nom: "Entreprise ABC".to_string(),
                    adresse: "45 Avenue Habib Bourguiba, Sfax, Tunisie".to_string(),
                    telephone: "+216 74 987 654".to_string(),
                    email: "info@abc.tn".to_string(),
                    tva: "TN7654321".to_string(),
                },
            ],
            categories: vec![
                "Informatique".to_string(),
                "Bureautique".to_string(),
                "Services".to_string(),
            ],
            products: vec![
                SeedProduct {
                    designation: "Ordinateur Portable".to_string(),
                    prix_unitaire_ht: dec!(1500),
                    category: 0,
                },
                SeedProduct {
                    designation: "Imprimante Laser".to_string(),
                    prix_unitaire_ht: dec!(400),
                    category: 1,
                },
                SeedProduct {
                    designation: "Développement Web".to_string(),
                    prix_unitaire_ht: dec!(2000),
                    category: 2,
                },
            ],
            invoices: vec![SeedInvoice {
                numero: "FACT-2023-001".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 12, 15).unwrap_or_default(),
                client: 0,
                devise: Currency::DT,
                settings: InvoiceSettings {
                    tva_active: true,
                    remise_active: false,
                    timbre_active: true,
                    avance_active: false,
                },
                lines: vec![SeedLine {
                    product: 2,
                    quantite: dec!(1),
                    remise: dec!(0),
                    tva: dec!(19),
                }],
                stored: StoredTotals {
                    total_ht: Some(dec!(2000)),
                    total_tva: None,
                    total_ttc: Some(dec!(2380)),
                    reste_a_payer: Some(dec!(2380)),
                },
            }],
        }
    }

    /// Loads the dataset into the stores
    ///
    /// A dangling position (a product pointing past the category list, for
    /// instance) is a validation error.
    pub async fn load(&self, stores: &MemoryStores) -> Result<SeedReport, PortError> {
        let mut report = SeedReport::default();

        let mut categories = Vec::with_capacity(self.categories.len());
        for nom in &self.categories {
            let category = stores
                .categories
                .create(NewCategory { nom: nom.clone() }, None)
                .await?;
            categories.push(category);
        }
        report.categories = categories.len();

        let mut products = Vec::with_capacity(self.products.len());
        for seed in &self.products {
            let category = categories.get(seed.category).ok_or_else(|| {
                PortError::validation(format!("Unknown seed category #{}", seed.category))
            })?;
            let product = stores
                .products
                .create(
                    NewProduct {
                        designation: seed.designation.clone(),
                        prix_unitaire_ht: seed.prix_unitaire_ht,
                        categorie_id: category.id,
                    },
                    None,
                )
                .await?;
            products.push(product);
        }
        report.products = products.len();

        let mut clients = Vec::with_capacity(self.clients.len());
        for data in &self.clients {
            clients.push(stores.clients.create(data.clone(), None).await?);
        }
        report.clients = clients.len();

        for seed in &self.invoices {
            let client = clients.get(seed.client).ok_or_else(|| {
                PortError::validation(format!("Unknown seed client #{}", seed.client))
            })?;
            let mut lines = Vec::with_capacity(seed.lines.len());
            for line in &seed.lines {
                let product = products.get(line.product).ok_or_else(|| {
                    PortError::validation(format!("Unknown seed product #{}", line.product))
                })?;
                lines.push(LineDraft {
                    product_id: Some(product.id),
                    designation: product.designation.clone(),
                    quantite: line.quantite,
                    prix_unitaire: product.prix_unitaire_ht,
                    remise: line.remise,
                    tva: line.tva,
                });
            }

            let invoice = Invoice::from_draft(
                seed.numero.clone(),
                InvoiceDraft {
                    date: seed.date,
                    client_id: Some(client.id),
                    devise: seed.devise,
                    settings: seed.settings,
                    avance_montant: Decimal::ZERO,
                    lines,
                },
            );

            for discrepancy in invoice.stored_totals_mismatch(&seed.stored) {
                warn!(
                    numero = %invoice.numero,
                    field = discrepancy.field,
                    stored = %discrepancy.stored,
                    computed = %discrepancy.computed,
                    "Recorded invoice total differs from recomputed total; keeping the recomputed value"
                );
                report.discrepancies.push((invoice.numero.clone(), discrepancy));
            }

            stores.invoices.create(invoice, Some(seed_metadata())).await?;
            report.invoices += 1;
        }

        info!(
            clients = report.clients,
            categories = report.categories,
            products = report.products,
            invoices = report.invoices,
            discrepancies = report.discrepancies.len(),
            "Demo data loaded"
        );
        Ok(report)
    }
}

fn seed_metadata() -> OperationMetadata {
    OperationMetadata::default().with_reason("seed")
}
