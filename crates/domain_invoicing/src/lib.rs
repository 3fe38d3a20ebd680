//! Invoicing Domain
//!
//! This crate holds the invoice computation and numbering rules:
//!
//! - **Calculator**: line totals, tax, fiscal stamp, total TTC and the remainder
//!   due after an advance payment. Every aggregate is recomputed from the full
//!   set of lines on each change.
//! - **Words**: French long-form spelling of an amount, as printed at the foot
//!   of an invoice.
//! - **Numbering**: year-scoped sequential invoice numbers (`FACT-2024-001`).
//! - **Invoice**: the invoice aggregate and its draft-editing operations.
//! - **Preview**: the printable document built from an invoice.
//!
//! # Example
//!
//! ```rust
//! use domain_invoicing::calculator::{invoice_subtotal, invoice_tax, fiscal_stamp};
//! use domain_invoicing::InvoiceLine;
//! use rust_decimal_macros::dec;
//!
//! let lines = vec![InvoiceLine::new("Développement Web", dec!(1), dec!(2000), dec!(0), dec!(19))];
//! let ttc = invoice_subtotal(&lines) + invoice_tax(&lines, true) + fiscal_stamp(true);
//! assert_eq!(ttc, dec!(2381));
//! ```

pub mod calculator;
pub mod words;
pub mod numbering;
pub mod invoice;
pub mod preview;
pub mod ports;
pub mod error;

pub use calculator::{
    line_total, line_total_with_tax, invoice_subtotal, invoice_tax, fiscal_stamp,
    remainder_due, LineAmounts, InvoiceSettings, InvoiceTotals, StoredTotals,
    TotalsDiscrepancy, FISCAL_STAMP,
};
pub use words::{amount_to_words, integer_to_words};
pub use numbering::{
    next_invoice_number, next_invoice_number_for_year, format_invoice_number,
    parse_year, InvoiceNumbered, INVOICE_PREFIX,
};
pub use invoice::{
    Invoice, InvoiceLine, LinePatch, LineDraft, InvoiceDraft, MAX_ADVANCE, MAX_LINES,
    MAX_LINE_AMOUNT, MAX_PERCENT,
};
pub use preview::{InvoicePreview, CompanyProfile, ClientBlock, PreviewRow, TotalsRow};
pub use ports::InvoicePort;
pub use error::InvoicingError;
