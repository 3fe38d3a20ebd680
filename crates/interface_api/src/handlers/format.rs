//! Amount formatting handlers

use axum::Json;

use core_kernel::format_amount;
use domain_invoicing::amount_to_words;

use crate::dto::format::{AmountInWordsResponse, FormatRequest, FormattedAmountResponse};

/// Formats an amount the way invoices print it, e.g. `2 380,000 DT`
pub async fn format_amount_handler(
    Json(request): Json<FormatRequest>,
) -> Json<FormattedAmountResponse> {
    Json(FormattedAmountResponse {
        formatted: format_amount(request.montant, request.devise),
    })
}

/// Spells an amount out in French
pub async fn amount_in_words(Json(request): Json<FormatRequest>) -> Json<AmountInWordsResponse> {
    Json(AmountInWordsResponse {
        words: amount_to_words(request.montant, request.devise),
    })
}
