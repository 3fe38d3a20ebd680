//! Invoice number allocation
//!
//! Numbers have the form `FACT-<year>-<sequence>`, the sequence zero-padded
//! to at least three digits and restarting every calendar year. The next
//! number is derived from a snapshot of existing numbers, so allocating does
//! not reserve anything: two callers reading the same snapshot get the same
//! number. Stores serialize allocation with the insert (see
//! [`InvoicePort::issue`](crate::ports::InvoicePort::issue)).

use chrono::{Datelike, Local};

use crate::invoice::Invoice;

/// Prefix shared by every invoice number
pub const INVOICE_PREFIX: &str = "FACT";

/// Anything carrying an invoice number
pub trait InvoiceNumbered {
    fn numero(&self) -> &str;
}

impl InvoiceNumbered for str {
    fn numero(&self) -> &str {
        self
    }
}

impl InvoiceNumbered for String {
    fn numero(&self) -> &str {
        self
    }
}

impl InvoiceNumbered for Invoice {
    fn numero(&self) -> &str {
        &self.numero
    }
}

impl<T: InvoiceNumbered + ?Sized> InvoiceNumbered for &T {
    fn numero(&self) -> &str {
        (**self).numero()
    }
}

/// Formats an invoice number
pub fn format_invoice_number(year: i32, sequence: u64) -> String {
    format!("{}-{}-{:03}", INVOICE_PREFIX, year, sequence)
}

/// Next invoice number for the current local year
pub fn next_invoice_number<I>(existing: I) -> String
where
    I: IntoIterator,
    I::Item: InvoiceNumbered,
{
    next_invoice_number_for_year(existing, Local::now().year())
}

/// Next invoice number for `year`
///
/// Numbers from other years are ignored, and so are numbers whose sequence
/// is not made of ASCII digits only.
///
/// ```
/// use domain_invoicing::next_invoice_number_for_year;
///
/// assert_eq!(next_invoice_number_for_year(Vec::<String>::new(), 2024), "FACT-2024-001");
/// assert_eq!(
///     next_invoice_number_for_year(["FACT-2024-001", "FACT-2024-007", "FACT-2023-042"], 2024),
///     "FACT-2024-008"
/// );
/// ```
pub fn next_invoice_number_for_year<I>(existing: I, year: i32) -> String
where
    I: IntoIterator,
    I::Item: InvoiceNumbered,
{
    let prefix = year_prefix(year);
    let last = existing
        .into_iter()
        .filter_map(|record| parse_sequence(record.numero(), &prefix))
        .max()
        .unwrap_or(0);
    format_invoice_number(year, last.saturating_add(1))
}

/// Extracts the year of a well-formed invoice number
pub fn parse_year(numero: &str) -> Option<i32> {
    let rest = numero.strip_prefix(INVOICE_PREFIX)?.strip_prefix('-')?;
    let (year, sequence) = rest.split_once('-')?;
    if !is_digits(year) || !is_digits(sequence) {
        return None;
    }
    year.parse().ok()
}

fn year_prefix(year: i32) -> String {
    format!("{}-{}-", INVOICE_PREFIX, year)
}

fn parse_sequence(numero: &str, prefix: &str) -> Option<u64> {
    let suffix = numero.strip_prefix(prefix)?;
    if !is_digits(suffix) {
        return None;
    }
    suffix.parse().ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
