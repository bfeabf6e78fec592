//! Shared helpers for worksheet calculations and display formatting.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (away from zero at the midpoint), the standard convention for
/// monetary lines on the worksheets.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary value as `$1,234.56` (or `-$1,234.56`), rounded to
/// cents.
pub fn fmt_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded.is_sign_negative();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if negative {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}

/// Formats a value as a whole number with thousands separators, e.g. watt
/// counts on the proposal (`8,925`).
pub fn fmt_whole(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let grouped = group_thousands(&rounded.abs().to_string());
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a ratio as a whole percentage, e.g. `1.05` → `105%`.
pub fn fmt_ratio_percent(ratio: Decimal) -> String {
    let percent = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{percent}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_rounds_away_from_zero_for_negatives() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(0.10)), dec!(0.10));
    }

    #[test]
    fn fmt_currency_groups_thousands() {
        assert_eq!(fmt_currency(dec!(27221.25)), "$27,221.25");
        assert_eq!(fmt_currency(dec!(1234567.891)), "$1,234,567.89");
    }

    #[test]
    fn fmt_currency_handles_small_and_zero_values() {
        assert_eq!(fmt_currency(dec!(585.47)), "$585.47");
        assert_eq!(fmt_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn fmt_currency_prefixes_sign_for_negatives() {
        assert_eq!(fmt_currency(dec!(-4877.97)), "-$4,877.97");
    }

    #[test]
    fn fmt_whole_rounds_and_groups() {
        assert_eq!(fmt_whole(dec!(8925)), "8,925");
        assert_eq!(fmt_whole(dec!(10263.75)), "10,264");
        assert_eq!(fmt_whole(dec!(999)), "999");
    }

    #[test]
    fn fmt_ratio_percent_scales_and_rounds() {
        assert_eq!(fmt_ratio_percent(dec!(1.05)), "105%");
        assert_eq!(fmt_ratio_percent(dec!(0.976)), "98%");
        assert_eq!(fmt_ratio_percent(Decimal::ZERO), "0%");
    }
}
