//! Custom Test Assertions
//!
//! Assertion helpers for amounts and invoice totals with messages that name
//! the values involved.

use rust_decimal::Decimal;

use domain_invoicing::{InvoiceSettings, InvoiceTotals, FISCAL_STAMP};

/// Asserts that two amounts differ by at most `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts the relations every set of totals must satisfy
///
/// `ttc = ht + tva + timbre`, tax is zero when disabled and the stamp
/// follows its setting. With an advance the remainder stays between zero and
/// the total; without one it is the total.
pub fn assert_totals_consistent(totals: &InvoiceTotals, settings: &InvoiceSettings) {
    assert_eq!(
        totals.total_ttc,
        totals.total_ht + totals.total_tva + totals.timbre,
        "total_ttc must be ht + tva + timbre: {:?}",
        totals
    );
    if !settings.tva_active {
        assert_eq!(totals.total_tva, Decimal::ZERO, "tax must be zero when disabled");
    }
    let expected_stamp = if settings.timbre_active { FISCAL_STAMP } else { Decimal::ZERO };
    assert_eq!(totals.timbre, expected_stamp, "stamp must follow its setting");
    if settings.avance_active {
        assert!(
            totals.reste_a_payer >= Decimal::ZERO,
            "remainder must not be negative: {}",
            totals.reste_a_payer
        );
        assert!(
            totals.reste_a_payer <= totals.total_ttc.max(Decimal::ZERO),
            "remainder {} exceeds total {}",
            totals.reste_a_payer,
            totals.total_ttc
        );
    } else {
        assert_eq!(totals.reste_a_payer, totals.total_ttc, "no advance, remainder is the total");
    }
}
