//! Invoice aggregate
//!
//! An invoice is edited as a draft: lines are added, removed and changed,
//! settings are toggled, a client is picked. Every mutation recomputes the
//! line totals and the invoice totals from scratch, so `total_ht` on a line
//! and the [`InvoiceTotals`] are never taken from the caller.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{ClientId, Currency, InvoiceId, InvoiceLineId, ProductId};

use crate::calculator::{
    line_total, InvoiceSettings, InvoiceTotals, LineAmounts, StoredTotals, TotalsDiscrepancy,
};
use crate::error::InvoicingError;

/// Tax rate applied to new lines
pub const DEFAULT_TAX_PERCENT: Decimal = dec!(19);

/// Largest quantity or unit price accepted on a line, in absolute value
pub const MAX_LINE_AMOUNT: Decimal = dec!(1000000000);
/// Largest discount or tax rate accepted, in percent, in absolute value
pub const MAX_PERCENT: Decimal = dec!(1000);
/// Largest advance accepted, in absolute value
pub const MAX_ADVANCE: Decimal = dec!(1000000000000000);
/// Most lines a single invoice can carry
pub const MAX_LINES: usize = 1000;

/// A line of an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: InvoiceLineId,
    /// Catalog product the line was filled from, if any
    pub product_id: Option<ProductId>,
    pub designation: String,
    pub quantite: Decimal,
    pub prix_unitaire: Decimal,
    /// Discount in percent
    pub remise: Decimal,
    /// Tax rate in percent
    pub tva: Decimal,
    /// Derived: `quantite * prix_unitaire * (1 - remise/100)`
    pub total_ht: Decimal,
}

impl InvoiceLine {
    /// Creates a line and computes its total
    pub fn new(
        designation: impl Into<String>,
        quantite: Decimal,
        prix_unitaire: Decimal,
        remise: Decimal,
        tva: Decimal,
    ) -> Self {
        let mut line = Self {
            id: InvoiceLineId::new(),
            product_id: None,
            designation: designation.into(),
            quantite,
            prix_unitaire,
            remise,
            tva,
            total_ht: Decimal::ZERO,
        };
        line.recompute();
        line
    }

    /// An empty line as shown when a draft is opened
    pub fn blank() -> Self {
        Self::new("", Decimal::ONE, Decimal::ZERO, Decimal::ZERO, DEFAULT_TAX_PERCENT)
    }

    /// Builds a line from caller input, ignoring any total it carried
    pub fn from_draft(draft: LineDraft) -> Self {
        let mut line = Self::new(
            draft.designation,
            draft.quantite,
            draft.prix_unitaire,
            draft.remise,
            draft.tva,
        );
        line.product_id = draft.product_id;
        line
    }

    pub fn apply(&mut self, patch: LinePatch) {
        if let Some(designation) = patch.designation {
            self.designation = designation;
        }
        if let Some(quantite) = patch.quantite {
            self.quantite = quantite;
        }
        if let Some(prix_unitaire) = patch.prix_unitaire {
            self.prix_unitaire = prix_unitaire;
        }
        if let Some(remise) = patch.remise {
            self.remise = remise;
        }
        if let Some(tva) = patch.tva {
            self.tva = tva;
        }
        self.recompute();
    }

    pub fn recompute(&mut self) {
        self.total_ht = line_total(self.quantite, self.prix_unitaire, self.remise);
    }

    fn validation_errors(&self, position: usize) -> Vec<String> {
        let mut errors = Vec::new();
        if self.designation.trim().is_empty() {
            errors.push(format!("Line {}: designation is required", position));
        }
        if self.quantite <= Decimal::ZERO {
            errors.push(format!("Line {}: quantity must be greater than zero", position));
        }
        if self.prix_unitaire <= Decimal::ZERO {
            errors.push(format!("Line {}: unit price must be greater than zero", position));
        }
        errors
    }
}

impl LineAmounts for InvoiceLine {
    fn quantity(&self) -> Decimal {
        self.quantite
    }

    fn unit_price(&self) -> Decimal {
        self.prix_unitaire
    }

    fn discount_percent(&self) -> Decimal {
        self.remise
    }

    fn tax_percent(&self) -> Decimal {
        self.tva
    }
}

/// Line fields supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub designation: String,
    #[serde(default = "default_quantity")]
    pub quantite: Decimal,
    #[serde(default)]
    pub prix_unitaire: Decimal,
    #[serde(default)]
    pub remise: Decimal,
    #[serde(default = "default_tax")]
    pub tva: Decimal,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

fn default_tax() -> Decimal {
    DEFAULT_TAX_PERCENT
}

impl Default for LineDraft {
    fn default() -> Self {
        Self {
            product_id: None,
            designation: String::new(),
            quantite: default_quantity(),
            prix_unitaire: Decimal::ZERO,
            remise: Decimal::ZERO,
            tva: default_tax(),
        }
    }
}

/// Partial update of a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePatch {
    pub designation: Option<String>,
    pub quantite: Option<Decimal>,
    pub prix_unitaire: Option<Decimal>,
    pub remise: Option<Decimal>,
    pub tva: Option<Decimal>,
}

/// Full invoice content supplied by a caller, without number or totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub devise: Currency,
    #[serde(default)]
    pub settings: InvoiceSettings,
    #[serde(default)]
    pub avance_montant: Decimal,
    #[serde(default)]
    pub lines: Vec<LineDraft>,
}

impl InvoiceDraft {
    /// Rejects amounts too large for the totals to be computed
    ///
    /// Within these bounds the largest possible total stays far below the
    /// decimal range. Percentages outside 0..=100 still pass.
    pub fn check_amounts(&self) -> Result<(), InvoicingError> {
        let mut errors = Vec::new();
        if self.lines.len() > MAX_LINES {
            errors.push(format!("An invoice has at most {} lines", MAX_LINES));
        }
        if self.avance_montant.abs() > MAX_ADVANCE {
            errors.push(format!("Advance exceeds {}", MAX_ADVANCE));
        }
        for (index, line) in self.lines.iter().enumerate() {
            let fields = [
                ("quantity", line.quantite, MAX_LINE_AMOUNT),
                ("unit price", line.prix_unitaire, MAX_LINE_AMOUNT),
                ("discount", line.remise, MAX_PERCENT),
                ("tax rate", line.tva, MAX_PERCENT),
            ];
            for (field, value, max) in fields {
                if value.abs() > max {
                    errors.push(format!("Line {}: {} exceeds {}", index + 1, field, max));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvoicingError::Validation(errors))
        }
    }
}

/// An invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Invoice number, `FACT-<year>-<sequence>`
    pub numero: String,
    pub date: NaiveDate,
    pub client_id: Option<ClientId>,
    pub devise: Currency,
    pub settings: InvoiceSettings,
    /// Advance already paid; zero unless the advance setting is on
    pub avance_montant: Decimal,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Opens a draft with default settings and one blank line
    pub fn new_draft(numero: impl Into<String>, date: NaiveDate, devise: Currency) -> Self {
        let now = Utc::now();
        let mut invoice = Self {
            id: InvoiceId::new(),
            numero: numero.into(),
            date,
            client_id: None,
            devise,
            settings: InvoiceSettings::default(),
            avance_montant: Decimal::ZERO,
            lines: vec![InvoiceLine::blank()],
            totals: InvoiceTotals::default(),
            created_at: now,
            updated_at: now,
        };
        invoice.recompute();
        invoice
    }

    /// Builds an invoice from caller content
    ///
    /// An empty line list is replaced by one blank line.
    pub fn from_draft(numero: impl Into<String>, draft: InvoiceDraft) -> Self {
        let mut invoice = Self::new_draft(numero, draft.date, draft.devise);
        invoice.replace_content(draft);
        invoice
    }

    /// Replaces everything but the identity and number
    pub fn replace_content(&mut self, draft: InvoiceDraft) {
        self.date = draft.date;
        self.client_id = draft.client_id;
        self.devise = draft.devise;
        self.settings = draft.settings;
        self.avance_montant = draft.avance_montant;
        self.lines = draft.lines.into_iter().map(InvoiceLine::from_draft).collect();
        if self.lines.is_empty() {
            self.lines.push(InvoiceLine::blank());
        }
        self.apply_advance_rule();
        self.recompute();
    }

    pub fn add_line(&mut self) -> &InvoiceLine {
        self.lines.push(InvoiceLine::blank());
        self.recompute();
        &self.lines[self.lines.len() - 1]
    }

    /// Removes a line; the last remaining line is kept
    pub fn remove_line(&mut self, index: usize) -> Result<InvoiceLine, InvoicingError> {
        self.check_index(index)?;
        if self.lines.len() == 1 {
            return Err(InvoicingError::LastLine);
        }
        let removed = self.lines.remove(index);
        self.recompute();
        Ok(removed)
    }

    pub fn update_line(&mut self, index: usize, patch: LinePatch) -> Result<(), InvoicingError> {
        self.check_index(index)?;
        self.lines[index].apply(patch);
        self.recompute();
        Ok(())
    }

    /// Fills a line from a catalog product
    pub fn apply_product(
        &mut self,
        index: usize,
        product_id: ProductId,
        designation: impl Into<String>,
        unit_price: Decimal,
    ) -> Result<(), InvoicingError> {
        self.check_index(index)?;
        let line = &mut self.lines[index];
        line.product_id = Some(product_id);
        line.designation = designation.into();
        line.prix_unitaire = unit_price;
        line.recompute();
        self.recompute();
        Ok(())
    }

    pub fn set_client(&mut self, client_id: ClientId) {
        self.client_id = Some(client_id);
        self.touch();
    }

    pub fn clear_client(&mut self) {
        self.client_id = None;
        self.touch();
    }

    /// Applies new settings and currency
    ///
    /// Turning the advance off resets the advance amount to zero.
    pub fn apply_settings(&mut self, settings: InvoiceSettings, devise: Currency) {
        self.settings = settings;
        self.devise = devise;
        self.apply_advance_rule();
        self.recompute();
    }

    pub fn set_advance(&mut self, amount: Decimal) {
        self.avance_montant = amount;
        self.apply_advance_rule();
        self.recompute();
    }

    /// Recomputes line totals and invoice totals
    pub fn recompute(&mut self) {
        for line in &mut self.lines {
            line.recompute();
        }
        self.totals = InvoiceTotals::compute(&self.lines, &self.settings, self.avance_montant);
        self.touch();
    }

    /// Checks the invoice can be saved
    ///
    /// A client is required and every line needs a designation, a positive
    /// quantity and a positive unit price. All problems are reported at once.
    pub fn validate_for_save(&self) -> Result<(), InvoicingError> {
        let mut errors = Vec::new();
        if self.client_id.is_none() {
            errors.push("A client must be selected".to_string());
        }
        for (index, line) in self.lines.iter().enumerate() {
            errors.extend(line.validation_errors(index + 1));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvoicingError::Validation(errors))
        }
    }

    /// Compares externally stored totals with the recomputed ones
    pub fn stored_totals_mismatch(&self, stored: &StoredTotals) -> Vec<TotalsDiscrepancy> {
        self.totals.discrepancies(stored)
    }

    fn apply_advance_rule(&mut self) {
        if !self.settings.avance_active && !self.avance_montant.is_zero() {
            debug!(
                numero = %self.numero,
                avance = %self.avance_montant,
                "Advance disabled, amount cleared"
            );
            self.avance_montant = Decimal::ZERO;
        }
    }

    fn check_index(&self, index: usize) -> Result<(), InvoicingError> {
        if index >= self.lines.len() {
            return Err(InvoicingError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Invoice {
        Invoice::new_draft(
            "FACT-2024-001",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Currency::DT,
        )
    }

    #[test]
    fn test_new_draft_defaults() {
        let invoice = draft();
        assert_eq!(invoice.lines.len(), 1);
        let line = &invoice.lines[0];
        assert_eq!(line.quantite, dec!(1));
        assert_eq!(line.prix_unitaire, dec!(0));
        assert_eq!(line.remise, dec!(0));
        assert_eq!(line.tva, dec!(19));
        assert!(invoice.settings.tva_active);
        assert!(invoice.settings.remise_active);
        assert!(invoice.settings.timbre_active);
        assert!(!invoice.settings.avance_active);
        assert_eq!(invoice.totals.total_ttc, dec!(1));
    }

    #[test]
    fn test_last_line_cannot_be_removed() {
        let mut invoice = draft();
        assert_eq!(invoice.remove_line(0), Err(InvoicingError::LastLine));
        invoice.add_line();
        assert!(invoice.remove_line(1).is_ok());
        assert_eq!(invoice.lines.len(), 1);
    }

    #[test]
    fn test_out_of_range_line() {
        let mut invoice = draft();
        assert_eq!(
            invoice.update_line(3, LinePatch::default()),
            Err(InvoicingError::LineOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_update_line_recomputes_totals() {
        let mut invoice = draft();
        invoice
            .update_line(0, LinePatch {
                designation: Some("Développement Web".to_string()),
                prix_unitaire: Some(dec!(2000)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(invoice.lines[0].total_ht, dec!(2000));
        assert_eq!(invoice.totals.total_tva, dec!(380));
        assert_eq!(invoice.totals.total_ttc, dec!(2381));
    }

    #[test]
    fn test_disabling_advance_resets_amount() {
        let mut invoice = draft();
        let mut settings = invoice.settings;
        settings.avance_active = true;
        invoice.apply_settings(settings, Currency::DT);
        invoice.set_advance(dec!(500));
        assert_eq!(invoice.avance_montant, dec!(500));

        settings.avance_active = false;
        invoice.apply_settings(settings, Currency::EUR);
        assert_eq!(invoice.avance_montant, dec!(0));
        assert_eq!(invoice.devise, Currency::EUR);
    }

    #[test]
    fn test_advance_ignored_while_disabled() {
        let mut invoice = draft();
        invoice.set_advance(dec!(500));
        assert_eq!(invoice.avance_montant, dec!(0));
    }

    #[test]
    fn test_validate_for_save_collects_all_errors() {
        let invoice = draft();
        match invoice.validate_for_save() {
            Err(InvoicingError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_draft_normalizes_content() {
        let invoice = Invoice::from_draft(
            "FACT-2024-002",
            InvoiceDraft {
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                client_id: Some(ClientId::new()),
                devise: Currency::DT,
                settings: InvoiceSettings::default(),
                avance_montant: dec!(100),
                lines: vec![],
            },
        );
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.avance_montant, dec!(0));
    }

    #[test]
    fn test_oversized_amounts_rejected_before_computing() {
        let line = LineDraft {
            designation: "x".into(),
            quantite: dec!(1000000000000000),
            prix_unitaire: dec!(1000000000000000),
            ..LineDraft::default()
        };
        let mut draft = InvoiceDraft {
            date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            client_id: None,
            devise: Currency::DT,
            settings: InvoiceSettings::default(),
            avance_montant: dec!(0),
            lines: vec![line],
        };

        match draft.check_amounts() {
            Err(InvoicingError::Validation(errors)) => assert_eq!(
                errors,
                vec![
                    "Line 1: quantity exceeds 1000000000".to_string(),
                    "Line 1: unit price exceeds 1000000000".to_string(),
                ]
            ),
            other => panic!("expected validation error, got {:?}", other),
        }

        draft.lines[0].quantite = MAX_LINE_AMOUNT;
        draft.lines[0].prix_unitaire = -MAX_LINE_AMOUNT;
        draft.lines[0].remise = MAX_PERCENT;
        assert!(draft.check_amounts().is_ok());
        let invoice = Invoice::from_draft("FACT-2026-001", draft);
        assert!(invoice.totals.total_ttc.is_sign_positive());
    }
}
