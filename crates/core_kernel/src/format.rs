//! Currency display formatting
//!
//! Amounts are printed the way the French locale prints them: thousands
//! grouped with a space, a comma as decimal separator and exactly three
//! fraction digits. The dinar is written with its short `DT` suffix instead
//! of the ISO code.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::money::{Currency, SymbolPosition};

const GROUP_SEPARATOR: char = ' ';
const DECIMAL_SEPARATOR: char = ',';

/// Formats an amount for display in the given currency
///
/// # Examples
///
/// ```
/// use core_kernel::{format_amount, Currency};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(2380), Currency::DT), "2 380,000 DT");
/// assert_eq!(format_amount(dec!(1234.5), Currency::EUR), "1 234,500 €");
/// ```
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let numeral = format_numeral(amount, currency.decimal_places());
    match currency.symbol_position() {
        SymbolPosition::Suffix => format!("{} {}", numeral, currency.display_symbol()),
        SymbolPosition::Prefix => format!("{}{}", currency.display_symbol(), numeral),
    }
}

/// Formats a bare number with locale grouping and a fixed number of decimals
pub fn format_numeral(amount: Decimal, decimal_places: u32) -> String {
    let rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let digits = format!("{:.*}", decimal_places as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
