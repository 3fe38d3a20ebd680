//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults. Tests
//! set only the fields they care about. Names and emails not set explicitly
//! are generated with `fake`.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CategoryId, ClientId, Currency, ProductId};
use domain_catalog::{NewClient, NewProduct};
use domain_invoicing::{Invoice, InvoiceDraft, InvoiceLine, InvoiceSettings, LineDraft};

use crate::fixtures::DateFixtures;

/// Builder for invoice lines
#[derive(Debug, Clone)]
pub struct InvoiceLineBuilder {
    product_id: Option<ProductId>,
    designation: String,
    quantite: Decimal,
    prix_unitaire: Decimal,
    remise: Decimal,
    tva: Decimal,
}

impl Default for InvoiceLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceLineBuilder {
    /// One unit at 100, no discount, 19% tax
    pub fn new() -> Self {
        Self {
            product_id: None,
            designation: "Article".to_string(),
            quantite: dec!(1),
            prix_unitaire: dec!(100),
            remise: Decimal::ZERO,
            tva: dec!(19),
        }
    }

    pub fn with_product(mut self, id: ProductId) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    pub fn with_quantity(mut self, quantite: Decimal) -> Self {
        self.quantite = quantite;
        self
    }

    pub fn with_unit_price(mut self, prix_unitaire: Decimal) -> Self {
        self.prix_unitaire = prix_unitaire;
        self
    }

    pub fn with_discount(mut self, remise: Decimal) -> Self {
        self.remise = remise;
        self
    }

    pub fn with_tax(mut self, tva: Decimal) -> Self {
        self.tva = tva;
        self
    }

    pub fn build_draft(self) -> LineDraft {
        LineDraft {
            product_id: self.product_id,
            designation: self.designation,
            quantite: self.quantite,
            prix_unitaire: self.prix_unitaire,
            remise: self.remise,
            tva: self.tva,
        }
    }

    pub fn build(self) -> InvoiceLine {
        InvoiceLine::from_draft(self.build_draft())
    }
}

/// Builder for invoices and invoice drafts
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    numero: String,
    date: NaiveDate,
    client_id: Option<ClientId>,
    devise: Currency,
    settings: InvoiceSettings,
    avance_montant: Decimal,
    lines: Vec<LineDraft>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// An unnumbered DT invoice without client or lines
    pub fn new() -> Self {
        Self {
            numero: String::new(),
            date: DateFixtures::mid_2024(),
            client_id: None,
            devise: Currency::DT,
            settings: InvoiceSettings::default(),
            avance_montant: Decimal::ZERO,
            lines: Vec::new(),
        }
    }

    pub fn with_numero(mut self, numero: impl Into<String>) -> Self {
        self.numero = numero.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_currency(mut self, devise: Currency) -> Self {
        self.devise = devise;
        self
    }

    pub fn with_settings(mut self, settings: InvoiceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn without_tax(mut self) -> Self {
        self.settings.tva_active = false;
        self
    }

    pub fn without_stamp(mut self) -> Self {
        self.settings.timbre_active = false;
        self
    }

    /// Turns the advance setting on with the given amount
    pub fn with_advance(mut self, amount: Decimal) -> Self {
        self.settings.avance_active = true;
        self.avance_montant = amount;
        self
    }

    pub fn with_line(mut self, line: InvoiceLineBuilder) -> Self {
        self.lines.push(line.build_draft());
        self
    }

    pub fn build_draft(self) -> InvoiceDraft {
        InvoiceDraft {
            date: self.date,
            client_id: self.client_id,
            devise: self.devise,
            settings: self.settings,
            avance_montant: self.avance_montant,
            lines: self.lines,
        }
    }

    pub fn build(self) -> Invoice {
        let numero = self.numero.clone();
        Invoice::from_draft(numero, self.build_draft())
    }
}

/// Builder for client data
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    data: NewClient,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// A client with a generated company name, email and phone number
    pub fn new() -> Self {
        Self {
            data: NewClient {
                nom: CompanyName().fake(),
                adresse: "10 Avenue de la République, Tunis".to_string(),
                telephone: PhoneNumber().fake(),
                email: SafeEmail().fake(),
                tva: "TN0000000".to_string(),
            },
        }
    }

    pub fn with_name(mut self, nom: impl Into<String>) -> Self {
        self.data.nom = nom.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.data.email = email.into();
        self
    }

    pub fn with_tax_number(mut self, tva: impl Into<String>) -> Self {
        self.data.tva = tva.into();
        self
    }

    pub fn without_tax_number(mut self) -> Self {
        self.data.tva.clear();
        self
    }

    pub fn build(self) -> NewClient {
        self.data
    }
}

/// Builder for product data
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    designation: String,
    prix_unitaire_ht: Decimal,
    categorie_id: CategoryId,
}

impl ProductBuilder {
    pub fn new(categorie_id: CategoryId) -> Self {
        Self {
            designation: format!("Produit {}", (1..10_000).fake::<u32>()),
            prix_unitaire_ht: dec!(100),
            categorie_id,
        }
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    pub fn with_price(mut self, prix_unitaire_ht: Decimal) -> Self {
        self.prix_unitaire_ht = prix_unitaire_ht;
        self
    }

    pub fn build(self) -> NewProduct {
        NewProduct {
            designation: self.designation,
            prix_unitaire_ht: self.prix_unitaire_ht,
            categorie_id: self.categorie_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_builder_computes_totals() {
        let invoice = InvoiceBuilder::new()
            .with_numero("FACT-2024-001")
            .with_line(InvoiceLineBuilder::new().with_unit_price(dec!(2000)))
            .build();
        assert_eq!(invoice.totals.total_ttc, dec!(2381));
    }

    #[test]
    fn test_client_builder_generates_contact() {
        let client = ClientBuilder::new().build();
        assert!(!client.nom.is_empty());
        assert!(client.email.contains('@'));
    }

    #[test]
    fn test_advance_turns_setting_on() {
        let draft = InvoiceBuilder::new().with_advance(dec!(50)).build_draft();
        assert!(draft.settings.avance_active);
        assert_eq!(draft.avance_montant, dec!(50));
    }
}
