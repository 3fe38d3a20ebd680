//! French amounts in words
//!
//! Spells an amount the way it is written on the legal line of an invoice
//! ("Arrêtée la présente facture à la somme de: ..."). The integer part is
//! followed by the major unit name; a nonzero thousandths part is appended
//! with `et` and the minor unit name.
//!
//! Numbers below one hundred are driven by the [`DECADES`] table, one row
//! per tens digit. Each row names the stem, the value it stands for, whether
//! a trailing one is linked with `et` and whether the bare stem takes a
//! plural `s`. This covers the irregular French forms:
//!
//! | value | words |
//! |---|---|
//! | 21, 31 .. 61 | `vingt-et-un` .. `soixante-et-un` |
//! | 70 .. 79 | `soixante-dix` .. `soixante-dix-neuf`, with `soixante-et-onze` |
//! | 80 | `quatre-vingts` |
//! | 81 .. 99 | `quatre-vingt-un` .. `quatre-vingt-dix-neuf` |

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use core_kernel::Currency;

const ZERO: &str = "zéro";
const NEGATIVE: &str = "moins";
const FRACTION_LINK: &str = "et";

/// Subunits per major unit; amounts are spelled to the thousandth
const SUBUNITS: u32 = 1000;

const UNITS: [&str; 17] = [
    ZERO, "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix",
    "onze", "douze", "treize", "quatorze", "quinze", "seize",
];

/// One row of the tens table
struct Decade {
    stem: &'static str,
    /// Value the stem stands for; the rest is spelled after a hyphen
    base: u32,
    /// A rest ending in one is linked with `et`
    links_one: bool,
    /// The bare stem takes a plural `s`
    plural_when_bare: bool,
}

/// Tens table indexed by tens digit minus two
const DECADES: [Decade; 8] = [
    Decade { stem: "vingt", base: 20, links_one: true, plural_when_bare: false },
    Decade { stem: "trente", base: 30, links_one: true, plural_when_bare: false },
    Decade { stem: "quarante", base: 40, links_one: true, plural_when_bare: false },
    Decade { stem: "cinquante", base: 50, links_one: true, plural_when_bare: false },
    Decade { stem: "soixante", base: 60, links_one: true, plural_when_bare: false },
    Decade { stem: "soixante", base: 60, links_one: true, plural_when_bare: false },
    Decade { stem: "quatre-vingt", base: 80, links_one: false, plural_when_bare: true },
    Decade { stem: "quatre-vingt", base: 80, links_one: false, plural_when_bare: false },
];

/// Scale words for successive groups of three digits, singular and plural
///
/// `mille` is invariable and never preceded by `un`.
const SCALES: [(&str, &str); 10] = [
    ("", ""),
    ("mille", "mille"),
    ("million", "millions"),
    ("milliard", "milliards"),
    ("billion", "billions"),
    ("billiard", "billiards"),
    ("trillion", "trillions"),
    ("trilliard", "trilliards"),
    ("quadrillion", "quadrillions"),
    ("quadrilliard", "quadrilliards"),
];

/// Spells an amount in French with its currency unit names
///
/// The amount is rounded half away from zero to the thousandth first. Only an
/// exact zero is spelled without a unit.
///
/// # Examples
///
/// ```
/// use domain_invoicing::amount_to_words;
/// use core_kernel::Currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_to_words(dec!(0), Currency::DT), "zéro");
/// assert_eq!(amount_to_words(dec!(0.0004), Currency::USD), "zéro dollars");
/// assert_eq!(
///     amount_to_words(dec!(2381), Currency::DT),
///     "deux mille trois cent quatre-vingt-un dinars"
/// );
/// assert_eq!(
///     amount_to_words(dec!(71.5), Currency::EUR),
///     "soixante-et-onze euros et cinq cents centimes"
/// );
/// ```
pub fn amount_to_words(amount: Decimal, currency: Currency) -> String {
    if amount.is_zero() {
        return ZERO.to_string();
    }
    let rounded = amount.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);

    let magnitude = rounded.abs();
    let integer = magnitude.trunc();
    let fraction = ((magnitude - integer) * Decimal::from(SUBUNITS))
        .to_u32()
        .unwrap_or_default();
    let integer = integer.to_u128().unwrap_or_default();

    let mut words = Vec::with_capacity(6);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        words.push(NEGATIVE.to_string());
    }
    words.push(integer_to_words(integer));
    words.push(currency.major_unit_name().to_string());
    if fraction > 0 {
        words.push(FRACTION_LINK.to_string());
        words.push(integer_to_words(u128::from(fraction)));
        words.push(currency.minor_unit_name().to_string());
    }
    words.join(" ")
}

/// Spells a non-negative integer in French
pub fn integer_to_words(n: u128) -> String {
    if n == 0 {
        return ZERO.to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as u32);
        rest /= 1000;
    }

    let mut words = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let (singular, plural) = SCALES.get(scale).copied().unwrap_or(("", ""));
        match scale {
            0 => words.push(below_thousand(group)),
            1 if group == 1 => words.push(singular.to_string()),
            _ => {
                words.push(below_thousand(group));
                words.push(if group > 1 { plural } else { singular }.to_string());
            }
        }
    }
    words.join(" ")
}

/// Spells 1..=999
fn below_thousand(n: u32) -> String {
    let hundreds = n / 100;
    let rest = n % 100;

    let mut words = Vec::with_capacity(3);
    match hundreds {
        0 => {}
        1 => words.push("cent".to_string()),
        h if rest == 0 => words.push(format!("{} cents", UNITS[h as usize])),
        h => words.push(format!("{} cent", UNITS[h as usize])),
    }
    if rest > 0 {
        words.push(below_hundred(rest));
    }
    words.join(" ")
}

/// Spells 1..=99
fn below_hundred(n: u32) -> String {
    match n {
        0..=16 => UNITS[n as usize].to_string(),
        17..=19 => format!("dix-{}", UNITS[(n - 10) as usize]),
        _ => {
            let decade = &DECADES[(n / 10 - 2) as usize];
            let rest = n - decade.base;
            if rest == 0 {
                if decade.plural_when_bare {
                    format!("{}s", decade.stem)
                } else {
                    decade.stem.to_string()
                }
            } else if decade.links_one && rest % 10 == 1 {
                format!("{}-et-{}", decade.stem, below_hundred(rest))
            } else {
                format!("{}-{}", decade.stem, below_hundred(rest))
            }
        }
    }
}
