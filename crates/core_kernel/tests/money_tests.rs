//! Unit tests for the Money and formatting modules
//!
//! Tests cover money creation, arithmetic, currency metadata and the
//! French display format.

use core_kernel::{format_amount, format_numeral, Currency, Money, MoneyError, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_exact_amount() {
        let m = Money::new(dec!(100.123456), Currency::DT);
        assert_eq!(m.amount(), dec!(100.123456));
        assert_eq!(m.currency(), Currency::DT);
    }

    #[test]
    fn test_from_minor_converts_millimes() {
        let m = Money::from_minor(1500, Currency::DT);
        assert_eq!(m.amount(), dec!(1.5));
    }

    #[test]
    fn test_zero() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_negative() {
        let m = Money::new(dec!(-10), Currency::USD);
        assert!(m.is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = Money::new(dec!(2000), Currency::DT);
        let b = Money::new(dec!(380), Currency::DT);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(2380));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(1620));
    }

    #[test]
    fn test_checked_sub_currency_mismatch() {
        let a = Money::new(dec!(1), Currency::USD);
        let b = Money::new(dec!(1), Currency::EUR);
        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("USD".to_string(), "EUR".to_string()))
        );
    }

    #[test]
    fn test_round_to_currency() {
        let m = Money::new(dec!(2380.4995), Currency::DT).round_to_currency();
        assert_eq!(m.amount(), dec!(2380.500));
    }

    #[test]
    fn test_multiply_by_rate() {
        let base = Money::new(dec!(1500), Currency::DT);
        let tax = base.multiply(Rate::from_percentage(dec!(19)).as_decimal());
        assert_eq!(tax.amount(), dec!(285));
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Currency::DT.code(), "DT");
        assert_eq!(Currency::DT.iso_code(), "TND");
        assert_eq!(Currency::EUR.iso_code(), "EUR");
        assert_eq!(Currency::USD.iso_code(), "USD");
    }

    #[test]
    fn test_all_currencies_use_three_decimals() {
        for currency in Currency::ALL {
            assert_eq!(currency.decimal_places(), 3);
        }
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(Currency::DT.major_unit_name(), "dinars");
        assert_eq!(Currency::DT.minor_unit_name(), "millimes");
        assert_eq!(Currency::EUR.major_unit_name(), "euros");
        assert_eq!(Currency::EUR.minor_unit_name(), "centimes");
        assert_eq!(Currency::USD.major_unit_name(), "dollars");
        assert_eq!(Currency::USD.minor_unit_name(), "cents");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Currency::DT).unwrap(), "\"DT\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::EUR);
    }

    #[test]
    fn test_default_is_local_currency() {
        assert_eq!(Currency::default(), Currency::DT);
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_local_currency_exact_string() {
        assert_eq!(format_amount(dec!(2380), Currency::DT), "2 380,000 DT");
    }

    #[test]
    fn test_fraction_digits_are_always_three() {
        assert_eq!(format_amount(dec!(12.5), Currency::DT), "12,500 DT");
        assert_eq!(format_amount(dec!(12.3456), Currency::EUR), "12,346 €");
        assert_eq!(format_amount(dec!(0.001), Currency::USD), "0,001 $US");
    }

    #[test]
    fn test_format_numeral_without_symbol() {
        assert_eq!(format_numeral(dec!(1000000), 3), "1 000 000,000");
        assert_eq!(format_numeral(dec!(42), 0), "42");
    }

    #[test]
    fn test_money_format_matches_free_function() {
        let m = Money::new(dec!(98765.4321), Currency::EUR);
        assert_eq!(m.format(), format_amount(dec!(98765.4321), Currency::EUR));
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_amount_always_has_three_decimals(minor in -1_000_000_000i64..1_000_000_000i64) {
            let amount = Decimal::new(minor, 3);
            let text = format_amount(amount, Currency::DT);
            let numeral = text.trim_end_matches(" DT");
            let (_, fraction) = numeral.split_once(',').unwrap();
            prop_assert_eq!(fraction.len(), 3);
        }

        #[test]
        fn formatting_round_trips_digits(minor in 0i64..1_000_000_000_000i64) {
            let amount = Decimal::new(minor, 3);
            let text = format_amount(amount, Currency::DT);
            let digits: String = text
                .trim_end_matches(" DT")
                .chars()
                .filter(|c| *c != ' ')
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            prop_assert_eq!(digits.parse::<Decimal>().unwrap(), amount);
        }
    }
}
