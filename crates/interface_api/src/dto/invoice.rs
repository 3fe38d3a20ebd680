//! Invoice DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{format_amount, InvoiceId};
use domain_invoicing::{amount_to_words, Invoice, InvoiceLine, InvoiceTotals};

#[derive(Debug, Serialize, Deserialize)]
pub struct NextNumberResponse {
    pub numero: String,
}

/// Totals formatted in the invoice currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub total_ht: String,
    pub total_tva: String,
    pub timbre: String,
    pub total_ttc: String,
    pub reste_a_payer: String,
}

/// Result of computing a draft without saving it
#[derive(Debug, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub formatted: FormattedTotals,
    /// Total due spelled out in French
    pub amount_in_words: String,
    /// What would block saving the draft; empty when it can be saved
    pub errors: Vec<String>,
}

impl ComputeResponse {
    pub fn from_invoice(invoice: Invoice) -> Self {
        let devise = invoice.devise;
        let totals = invoice.totals;
        let errors = invoice
            .validate_for_save()
            .err()
            .map(|e| e.messages())
            .unwrap_or_default();
        let due = if invoice.settings.avance_active {
            totals.reste_a_payer
        } else {
            totals.total_ttc
        };

        Self {
            formatted: FormattedTotals {
                total_ht: format_amount(totals.total_ht, devise),
                total_tva: format_amount(totals.total_tva, devise),
                timbre: format_amount(totals.timbre, devise),
                total_ttc: format_amount(totals.total_ttc, devise),
                reste_a_payer: format_amount(totals.reste_a_payer, devise),
            },
            amount_in_words: amount_to_words(due, devise),
            lines: invoice.lines,
            totals,
            errors,
        }
    }
}

/// `?format=` of the preview endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub format: Option<String>,
}

impl PreviewQuery {
    pub fn wants_text(&self) -> bool {
        matches!(self.format.as_deref(), Some("text") | Some("txt"))
    }
}

/// Invoice row of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub numero: String,
    pub date: NaiveDate,
    pub client: Option<String>,
    pub total_ttc: Decimal,
    pub total_ttc_formatted: String,
}
