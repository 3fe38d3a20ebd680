//! Invoice monetary calculator
//!
//! Pure functions deriving line and invoice totals. Amounts are exact
//! decimals and nothing is rounded here; rounding to the millime only happens
//! when an amount is displayed or spelled out.
//!
//! Percentages are not range-checked: a discount above 100 yields a negative
//! line total, a negative tax rate lowers the total. Input validation belongs
//! to the caller.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Rate;

/// Fixed fiscal stamp duty, one unit of the invoice currency
pub const FISCAL_STAMP: Decimal = Decimal::ONE;

/// Amount fields of an invoice line the calculator needs
pub trait LineAmounts {
    fn quantity(&self) -> Decimal;
    fn unit_price(&self) -> Decimal;
    /// Discount in percent (10 means 10%)
    fn discount_percent(&self) -> Decimal;
    /// Tax rate in percent (19 means 19%)
    fn tax_percent(&self) -> Decimal;

    /// Discounted total before tax
    fn total_ht(&self) -> Decimal {
        line_total(self.quantity(), self.unit_price(), self.discount_percent())
    }
}

impl<T: LineAmounts + ?Sized> LineAmounts for &T {
    fn quantity(&self) -> Decimal {
        (**self).quantity()
    }

    fn unit_price(&self) -> Decimal {
        (**self).unit_price()
    }

    fn discount_percent(&self) -> Decimal {
        (**self).discount_percent()
    }

    fn tax_percent(&self) -> Decimal {
        (**self).tax_percent()
    }
}

/// `quantity * unit_price * (1 - discount/100)`
pub fn line_total(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    quantity * unit_price * Rate::from_percentage(discount_percent).complement()
}

/// Line total including its own tax rate
pub fn line_total_with_tax(
    quantity: Decimal,
    unit_price: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
) -> Decimal {
    line_total(quantity, unit_price, discount_percent) * (Decimal::ONE + tax_percent / dec!(100))
}

/// Sum of the discounted line totals
pub fn invoice_subtotal<L: LineAmounts>(lines: &[L]) -> Decimal {
    lines.iter().map(|line| line.total_ht()).sum()
}

/// Sum of per-line tax, each line taxed at its own rate
///
/// Returns exactly zero when tax is disabled on the invoice, whatever the
/// line rates.
pub fn invoice_tax<L: LineAmounts>(lines: &[L], tax_enabled: bool) -> Decimal {
    if !tax_enabled {
        return Decimal::ZERO;
    }
    lines
        .iter()
        .map(|line| Rate::from_percentage(line.tax_percent()).apply(line.total_ht()))
        .sum()
}

/// The fiscal stamp when enabled, zero otherwise
pub fn fiscal_stamp(stamp_enabled: bool) -> Decimal {
    if stamp_enabled {
        FISCAL_STAMP
    } else {
        Decimal::ZERO
    }
}

/// Amount left to pay after the advance
///
/// Never negative: an advance above the total leaves nothing due. A negative
/// advance counts as no advance.
pub fn remainder_due(total_ttc: Decimal, advance_enabled: bool, advance_amount: Decimal) -> Decimal {
    if !advance_enabled {
        return total_ttc;
    }
    let advance = advance_amount.max(Decimal::ZERO);
    (total_ttc - advance).max(Decimal::ZERO)
}

/// Invoice-level feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// Apply line tax rates
    pub tva_active: bool,
    /// Show the discount column; discounts always apply to amounts
    pub remise_active: bool,
    /// Add the fiscal stamp
    pub timbre_active: bool,
    /// Deduct an advance payment
    pub avance_active: bool,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            tva_active: true,
            remise_active: true,
            timbre_active: true,
            avance_active: false,
        }
    }
}

/// Derived totals of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub total_ht: Decimal,
    pub total_tva: Decimal,
    pub timbre: Decimal,
    pub total_ttc: Decimal,
    pub reste_a_payer: Decimal,
}

impl InvoiceTotals {
    /// Recomputes every total from the lines and settings
    pub fn compute<L: LineAmounts>(
        lines: &[L],
        settings: &InvoiceSettings,
        avance_montant: Decimal,
    ) -> Self {
        let total_ht = invoice_subtotal(lines);
        let total_tva = invoice_tax(lines, settings.tva_active);
        let timbre = fiscal_stamp(settings.timbre_active);
        let total_ttc = total_ht + total_tva + timbre;
        let reste_a_payer = remainder_due(total_ttc, settings.avance_active, avance_montant);

        Self {
            total_ht,
            total_tva,
            timbre,
            total_ttc,
            reste_a_payer,
        }
    }

    /// Lists the stored values that disagree with these totals
    pub fn discrepancies(&self, stored: &StoredTotals) -> Vec<TotalsDiscrepancy> {
        [
            ("total_ht", stored.total_ht, self.total_ht),
            ("total_tva", stored.total_tva, self.total_tva),
            ("total_ttc", stored.total_ttc, self.total_ttc),
            ("reste_a_payer", stored.reste_a_payer, self.reste_a_payer),
        ]
        .into_iter()
        .filter_map(|(field, stored, computed)| match stored {
            Some(stored) if stored != computed => Some(TotalsDiscrepancy {
                field,
                stored,
                computed,
            }),
            _ => None,
        })
        .collect()
    }
}

/// Totals as recorded by an external source (imported fixtures, legacy data)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredTotals {
    pub total_ht: Option<Decimal>,
    pub total_tva: Option<Decimal>,
    pub total_ttc: Option<Decimal>,
    pub reste_a_payer: Option<Decimal>,
}

/// A stored total that does not match its recomputed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsDiscrepancy {
    pub field: &'static str,
    pub stored: Decimal,
    pub computed: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(Decimal, Decimal, Decimal, Decimal);

    impl LineAmounts for Line {
        fn quantity(&self) -> Decimal {
            self.0
        }
        fn unit_price(&self) -> Decimal {
            self.1
        }
        fn discount_percent(&self) -> Decimal {
            self.2
        }
        fn tax_percent(&self) -> Decimal {
            self.3
        }
    }

    #[test]
    fn test_line_total_applies_discount() {
        assert_eq!(line_total(dec!(2), dec!(100), dec!(10)), dec!(180));
        assert_eq!(line_total(dec!(3), dec!(1500), dec!(0)), dec!(4500));
    }

    #[test]
    fn test_out_of_range_discount_is_not_clamped() {
        assert_eq!(line_total(dec!(1), dec!(100), dec!(150)), dec!(-50));
        assert_eq!(line_total(dec!(1), dec!(100), dec!(-10)), dec!(110));
    }

    #[test]
    fn test_line_total_with_tax() {
        assert_eq!(line_total_with_tax(dec!(1), dec!(2000), dec!(0), dec!(19)), dec!(2380));
    }

    #[test]
    fn test_tax_uses_each_line_rate() {
        let lines = vec![
            Line(dec!(1), dec!(1000), dec!(0), dec!(19)),
            Line(dec!(2), dec!(100), dec!(50), dec!(7)),
        ];
        assert_eq!(invoice_subtotal(&lines), dec!(1100));
        assert_eq!(invoice_tax(&lines, true), dec!(197));
        assert_eq!(invoice_tax(&lines, false), Decimal::ZERO);
    }

    #[test]
    fn test_empty_invoice() {
        let lines: Vec<Line> = Vec::new();
        let totals = InvoiceTotals::compute(&lines, &InvoiceSettings::default(), Decimal::ZERO);
        assert_eq!(totals.total_ht, Decimal::ZERO);
        assert_eq!(totals.total_ttc, dec!(1));
    }

    #[test]
    fn test_remainder_due() {
        assert_eq!(remainder_due(dec!(2381), false, dec!(500)), dec!(2381));
        assert_eq!(remainder_due(dec!(2381), true, dec!(500)), dec!(1881));
        assert_eq!(remainder_due(dec!(2381), true, dec!(3000)), Decimal::ZERO);
        assert_eq!(remainder_due(dec!(2381), true, dec!(-5)), dec!(2381));
    }

    #[test]
    fn test_discrepancies_only_for_stored_fields() {
        let lines = vec![Line(dec!(1), dec!(2000), dec!(0), dec!(19))];
        let totals = InvoiceTotals::compute(&lines, &InvoiceSettings::default(), Decimal::ZERO);
        let stored = StoredTotals {
            total_ht: Some(dec!(2000)),
            total_ttc: Some(dec!(2380)),
            ..Default::default()
        };

        let found = totals.discrepancies(&stored);
        assert_eq!(
            found,
            vec![TotalsDiscrepancy {
                field: "total_ttc",
                stored: dec!(2380),
                computed: dec!(2381),
            }]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn amount() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|minor| Decimal::new(minor, 3))
    }

    fn percent() -> impl Strategy<Value = Decimal> {
        (0i64..=10_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
    }

    proptest! {
        #[test]
        fn line_total_monotonic_in_quantity(
            q1 in amount(), q2 in amount(), price in amount(), discount in percent()
        ) {
            let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
            prop_assert!(line_total(lo, price, discount) <= line_total(hi, price, discount));
        }

        #[test]
        fn line_total_monotonic_in_price(
            qty in amount(), p1 in amount(), p2 in amount(), discount in percent()
        ) {
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            prop_assert!(line_total(qty, lo, discount) <= line_total(qty, hi, discount));
        }

        #[test]
        fn line_total_non_increasing_in_discount(
            qty in amount(), price in amount(), d1 in percent(), d2 in percent()
        ) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(line_total(qty, price, hi) <= line_total(qty, price, lo));
        }

        #[test]
        fn remainder_never_negative(ttc in amount(), advance in -10_000_000i64..20_000_000i64) {
            let advance = Decimal::new(advance, 3);
            prop_assert!(remainder_due(ttc, true, advance) >= Decimal::ZERO);
            if advance <= Decimal::ZERO {
                prop_assert_eq!(remainder_due(ttc, true, advance), ttc);
            }
        }
    }
}
