//! Invoicing domain errors

use thiserror::Error;

/// Errors that can occur in the invoicing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicingError {
    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// The invoice cannot be saved as is
    #[error("Invoice validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Line index does not exist
    #[error("Line {index} out of range (invoice has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// An invoice always keeps at least one line
    #[error("Cannot remove the last line of an invoice")]
    LastLine,

    /// Invoice number does not follow the FACT-<year>-<sequence> pattern
    #[error("Invalid invoice number: {0}")]
    InvalidNumber(String),
}

impl InvoicingError {
    /// Returns the validation messages, if this is a validation error
    pub fn messages(&self) -> Vec<String> {
        match self {
            InvoicingError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
