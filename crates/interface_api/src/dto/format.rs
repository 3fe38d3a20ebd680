//! Formatting DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatRequest {
    pub montant: Decimal,
    #[serde(default)]
    pub devise: Currency,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormattedAmountResponse {
    pub formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AmountInWordsResponse {
    pub words: String,
}
