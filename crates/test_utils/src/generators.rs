//! Property-Based Test Generators
//!
//! Proptest strategies producing invoice inputs within realistic ranges.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Currency;
use domain_invoicing::{InvoiceLine, InvoiceSettings};

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::DT), Just(Currency::EUR), Just(Currency::USD)]
}

/// Whole percentages from 0 to 100
pub fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100).prop_map(Decimal::from)
}

/// Tax rates in use
pub fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    prop::sample::select(vec![0i64, 7, 13, 19]).prop_map(Decimal::from)
}

/// Positive quantities, with up to three decimals
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|q| Decimal::new(q, 3))
}

/// Non-negative unit prices with millimes
pub fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|p| Decimal::new(p, 3))
}

/// Amounts with millimes, possibly negative
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|a| Decimal::new(a, 3))
}

/// Any combination of invoice settings
pub fn settings_strategy() -> impl Strategy<Value = InvoiceSettings> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(tva_active, remise_active, timbre_active, avance_active)| InvoiceSettings {
            tva_active,
            remise_active,
            timbre_active,
            avance_active,
        },
    )
}

/// A line with a positive quantity, a price and a discount in range
pub fn line_strategy() -> impl Strategy<Value = InvoiceLine> {
    (quantity_strategy(), price_strategy(), percent_strategy(), tax_rate_strategy()).prop_map(
        |(quantite, prix_unitaire, remise, tva)| {
            InvoiceLine::new("Article", quantite, prix_unitaire, remise, tva)
        },
    )
}

/// One to twenty lines
pub fn lines_strategy() -> impl Strategy<Value = Vec<InvoiceLine>> {
    prop::collection::vec(line_strategy(), 1..20)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::assertions::assert_totals_consistent;
    use domain_invoicing::InvoiceTotals;

    proptest! {
        #[test]
        fn generated_invoices_have_consistent_totals(
            lines in lines_strategy(),
            settings in settings_strategy(),
            advance in price_strategy(),
        ) {
            let totals = InvoiceTotals::compute(&lines, &settings, advance);
            assert_totals_consistent(&totals, &settings);
        }
    }
}
