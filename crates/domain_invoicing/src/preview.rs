//! Printable invoice preview
//!
//! [`InvoicePreview`] is the document shown before printing: header,
//! client and issuer blocks, the line table, the totals, the amount in words
//! and the legal footer. All amounts are already formatted. Optional columns
//! and totals rows follow the invoice settings. `Display` renders the
//! document as plain text.

use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::{format_amount, Currency};
use domain_catalog::Client;

use crate::invoice::{Invoice, InvoiceLine};
use crate::words::amount_to_words;

const EMPTY_DESIGNATION: &str = "...";
const NO_CLIENT: &str = "Aucun client sélectionné";
const LEGAL_SENTENCE: &str = "Arrêtée la présente facture à la somme de: ";

/// Issuer details printed on every invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Matricule fiscal
    pub tax_id: String,
    /// Registre de commerce
    pub rc: String,
    pub regime: String,
    pub bank: String,
    pub rib: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Ma Société SARL".to_string(),
            address: "123 Rue des Entreprises, Tunis, Tunisie".to_string(),
            phone: "+216 71 123 456".to_string(),
            email: "contact@masociete.tn".to_string(),
            tax_id: "TN12345678".to_string(),
            rc: "B123456789".to_string(),
            regime: "Réel".to_string(),
            bank: "BANQUE XYZ".to_string(),
            rib: "TN59 1234 5678 9012 3456 7890".to_string(),
        }
    }
}

/// Client block of the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBlock {
    pub nom: String,
    pub adresse: String,
    pub telephone: String,
    pub email: String,
    pub tva: Option<String>,
}

impl From<&Client> for ClientBlock {
    fn from(client: &Client) -> Self {
        Self {
            nom: client.nom.clone(),
            adresse: client.adresse.clone(),
            telephone: client.telephone.clone(),
            email: client.email.clone(),
            tva: client.has_tax_number().then(|| client.tva.clone()),
        }
    }
}

/// One row of the line table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub designation: String,
    pub quantite: String,
    pub prix_unitaire: String,
    /// Present when the discount column is shown
    pub remise: Option<String>,
    /// Present when the tax column is shown
    pub tva: Option<String>,
    pub total_ht: String,
}

/// One row of the totals block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsRow {
    pub label: String,
    pub amount: String,
    /// Printed in bold
    pub emphasized: bool,
}

/// The printable invoice document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePreview {
    pub numero: String,
    /// Date in `dd/mm/yyyy` form
    pub date: String,
    pub devise: Currency,
    pub company: CompanyProfile,
    pub client: Option<ClientBlock>,
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,
    pub totals: Vec<TotalsRow>,
    pub amount_in_words: String,
}

impl InvoicePreview {
    /// Builds the preview of an invoice
    ///
    /// Totals are taken from the invoice, which recomputes them on every
    /// change.
    pub fn build(invoice: &Invoice, client: Option<&Client>, company: &CompanyProfile) -> Self {
        let settings = &invoice.settings;
        let devise = invoice.devise;

        let mut columns = vec!["Désignation", "Qté", "Prix Unitaire"];
        if settings.remise_active {
            columns.push("Remise (%)");
        }
        if settings.tva_active {
            columns.push("TVA (%)");
        }
        columns.push("Total HT");

        let rows = invoice
            .lines
            .iter()
            .map(|line| Self::row(line, invoice))
            .collect();

        let totals = &invoice.totals;
        let mut totals_rows = vec![TotalsRow::plain("Total HT", format_amount(totals.total_ht, devise))];
        if settings.tva_active {
            totals_rows.push(TotalsRow::plain("TVA", format_amount(totals.total_tva, devise)));
        }
        if settings.timbre_active {
            totals_rows.push(TotalsRow::plain("Timbre fiscal", format_amount(totals.timbre, devise)));
        }
        totals_rows.push(TotalsRow::bold("Total TTC", format_amount(totals.total_ttc, devise)));
        if settings.avance_active {
            totals_rows.push(TotalsRow::plain("Avance", format_amount(invoice.avance_montant, devise)));
            totals_rows.push(TotalsRow::bold(
                "Reste à payer",
                format_amount(totals.reste_a_payer, devise),
            ));
        }

        Self {
            numero: invoice.numero.clone(),
            date: invoice.date.format("%d/%m/%Y").to_string(),
            devise,
            company: company.clone(),
            client: client.map(ClientBlock::from),
            columns: columns.into_iter().map(String::from).collect(),
            rows,
            totals: totals_rows,
            amount_in_words: amount_to_words(totals.total_ttc, devise),
        }
    }

    /// The legal sentence stating the total in words
    pub fn legal_sentence(&self) -> String {
        format!("{}{}", LEGAL_SENTENCE, self.amount_in_words)
    }

    fn row(line: &InvoiceLine, invoice: &Invoice) -> PreviewRow {
        let designation = if line.designation.trim().is_empty() {
            EMPTY_DESIGNATION.to_string()
        } else {
            line.designation.clone()
        };
        PreviewRow {
            designation,
            quantite: plain_number(line.quantite),
            prix_unitaire: format_amount(line.prix_unitaire, invoice.devise),
            remise: invoice
                .settings
                .remise_active
                .then(|| format!("{}%", plain_number(line.remise))),
            tva: invoice
                .settings
                .tva_active
                .then(|| format!("{}%", plain_number(line.tva))),
            total_ht: format_amount(line.total_ht, invoice.devise),
        }
    }

    fn table_cells(&self) -> Vec<Vec<String>> {
        let mut table = vec![self.columns.clone()];
        for row in &self.rows {
            let mut cells = vec![
                row.designation.clone(),
                row.quantite.clone(),
                row.prix_unitaire.clone(),
            ];
            cells.extend(row.remise.clone());
            cells.extend(row.tva.clone());
            cells.push(row.total_ht.clone());
            table.push(cells);
        }
        table
    }
}

impl TotalsRow {
    fn plain(label: &str, amount: String) -> Self {
        Self {
            label: label.to_string(),
            amount,
            emphasized: false,
        }
    }

    fn bold(label: &str, amount: String) -> Self {
        Self {
            label: label.to_string(),
            amount,
            emphasized: true,
        }
    }
}

/// Decimal without trailing zeros, French decimal comma
fn plain_number(value: rust_decimal::Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

impl fmt::Display for InvoicePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.company.name)?;
        writeln!(f, "Facture N° {}    Date: {}", self.numero, self.date)?;
        writeln!(f)?;

        writeln!(f, "Client")?;
        match &self.client {
            Some(client) => {
                writeln!(f, "  {}", client.nom)?;
                writeln!(f, "  {}", client.adresse)?;
                writeln!(f, "  {}", client.telephone)?;
                writeln!(f, "  {}", client.email)?;
                if let Some(tva) = &client.tva {
                    writeln!(f, "  TVA: {}", tva)?;
                }
            }
            None => writeln!(f, "  {}", NO_CLIENT)?,
        }
        writeln!(f)?;

        writeln!(f, "Émetteur")?;
        writeln!(f, "  {}", self.company.name)?;
        writeln!(f, "  {}", self.company.address)?;
        writeln!(f, "  {}", self.company.phone)?;
        writeln!(f, "  {}", self.company.email)?;
        writeln!(f, "  TVA: {}", self.company.tax_id)?;
        writeln!(f)?;

        let table = self.table_cells();
        let widths: Vec<usize> = (0..self.columns.len())
            .map(|col| {
                table
                    .iter()
                    .filter_map(|cells| cells.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for cells in &table {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (cell, &width))| {
                    if col == 0 {
                        format!("{:<width$}", cell, width = width)
                    } else {
                        format!("{:>width$}", cell, width = width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }
        writeln!(f)?;

        let label_width = self
            .totals
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);
        for row in &self.totals {
            writeln!(f, "{:<width$}  {}", row.label, row.amount, width = label_width)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.legal_sentence())?;
        writeln!(f)?;

        let company = &self.company;
        writeln!(
            f,
            "Coordonnées: {} | Tél: {} | Email: {}",
            company.address, company.phone, company.email
        )?;
        writeln!(
            f,
            "Mentions légales: MF: {} | RC: {} | Régime: {}",
            company.tax_id, company.rc, company.regime
        )?;
        write!(
            f,
            "Coordonnées bancaires: Banque: {} | RIB: {}",
            company.bank, company.rib
        )
    }
}
