//! Currencies, amounts and rates
//!
//! Amounts are `rust_decimal::Decimal`, never floats. Every supported
//! currency is displayed with three decimals (millimes for the dinar), and
//! nothing here rounds unless asked to.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::format::format_amount;

/// Currencies an invoice can be issued in
///
/// `DT` is the local currency (Tunisian dinar). The serialized names are the
/// short codes used by invoice records, not ISO 4217 codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    DT,
    EUR,
    USD,
}

/// Where a currency symbol is printed relative to the numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

impl Currency {
    /// All supported currencies
    pub const ALL: [Currency; 3] = [Currency::DT, Currency::EUR, Currency::USD];

    /// Returns the number of decimal places amounts are displayed with
    pub fn decimal_places(&self) -> u32 {
        3
    }

    /// Returns the short code used on invoice records
    pub fn code(&self) -> &'static str {
        match self {
            Currency::DT => "DT",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }

    /// Returns the ISO 4217 code
    pub fn iso_code(&self) -> &'static str {
        match self {
            Currency::DT => "TND",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }

    /// Returns the symbol printed next to formatted amounts (French locale)
    pub fn display_symbol(&self) -> &'static str {
        match self {
            Currency::DT => "DT",
            Currency::EUR => "€",
            Currency::USD => "$US",
        }
    }

    /// French locale places every supported symbol after the amount
    pub fn symbol_position(&self) -> SymbolPosition {
        SymbolPosition::Suffix
    }

    /// Name of the major unit, as written in amounts-in-words
    pub fn major_unit_name(&self) -> &'static str {
        match self {
            Currency::DT => "dinars",
            Currency::EUR => "euros",
            Currency::USD => "dollars",
        }
    }

    /// Name of the minor unit, as written in amounts-in-words
    pub fn minor_unit_name(&self) -> &'static str {
        match self {
            Currency::DT => "millimes",
            Currency::EUR => "centimes",
            Currency::USD => "cents",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DT" | "TND" => Ok(Currency::DT),
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Currency parsing and arithmetic failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// An amount tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// `minor_units` thousandths of the major unit
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor_units, currency.decimal_places()), currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds half away from zero to the currency's display precision
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Scales the amount, e.g. by a quantity
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// `2 380,000 DT`, see [`format_amount`]
    pub fn format(&self) -> String {
        format_amount(self.amount, self.currency)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// A tax or discount rate, stored as a fraction (0.19 for 19%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    value: Decimal,
}

impl Rate {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// `from_percentage(dec!(19))` is 19%
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// The share of `amount` this rate represents
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.value
    }

    /// Returns `1 - rate`, the factor left after deducting this rate
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.value
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor_uses_millimes() {
        let m = Money::from_minor(2_380_500, Currency::DT);
        assert_eq!(m.amount(), dec!(2380.500));
    }

    #[test]
    fn test_currency_mismatch() {
        let dt = Money::new(dec!(100), Currency::DT);
        let eur = Money::new(dec!(100), Currency::EUR);

        let result = dt.checked_add(&eur);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_currency_defaults_to_dinar() {
        assert_eq!(Currency::default(), Currency::DT);
        assert_eq!(Money::zero(Currency::default()).format(), "0,000 DT");
    }

    #[test]
    fn test_currency_from_str_accepts_iso_code() {
        assert_eq!("tnd".parse::<Currency>().unwrap(), Currency::DT);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_round_to_currency_half_away_from_zero() {
        let m = Money::new(dec!(1.0005), Currency::DT).round_to_currency();
        assert_eq!(m.amount(), dec!(1.001));
        let m = Money::new(dec!(-1.0005), Currency::DT).round_to_currency();
        assert_eq!(m.amount(), dec!(-1.001));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(19));
        assert_eq!(rate.apply(dec!(2000)), dec!(380));
        assert_eq!(rate.complement(), dec!(0.81));
        assert_eq!(rate.to_string(), "19%");
    }

    #[test]
    fn test_multiply_keeps_currency() {
        let m = Money::new(dec!(1500), Currency::EUR).multiply(dec!(2));
        assert_eq!(m, Money::new(dec!(3000), Currency::EUR));
    }

    #[test]
    fn test_money_display_uses_french_format() {
        let m = Money::new(dec!(2380), Currency::DT);
        assert_eq!(m.to_string(), "2 380,000 DT");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn checked_add_matches_decimal_sum(minors in prop::collection::vec(-1_000_000i64..1_000_000i64, 1..20)) {
            let amounts: Vec<Money> = minors.iter().map(|m| Money::from_minor(*m, Currency::EUR)).collect();
            let mut expected = Money::zero(Currency::EUR);
            for m in &amounts {
                expected = expected.checked_add(m).unwrap();
            }
            let decimal_sum: Decimal = amounts.iter().map(Money::amount).sum();
            prop_assert_eq!(expected.amount(), decimal_sum);
        }
    }
}
