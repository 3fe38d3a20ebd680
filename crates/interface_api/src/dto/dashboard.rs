//! Dashboard DTOs

use core_kernel::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice::InvoiceSummary;

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub clients: usize,
    pub products: usize,
    pub invoices: usize,
    /// Sum of every invoice total, all currencies added as is
    pub chiffre_affaires: Decimal,
    pub chiffre_affaires_formatted: String,
    /// Invoice totals per currency
    pub par_devise: Vec<Money>,
    /// `par_devise`, formatted for display
    pub par_devise_formatted: Vec<String>,
    /// Five most recent invoices by date
    pub recent_invoices: Vec<InvoiceSummary>,
}
