//! Rounding and display policy shared by every calculator.
//!
//! Intermediate math keeps full `Decimal` precision; values are rounded half
//! away from zero only when they leave a calculator.

use psq_domain::coerce::decimal_from_f64;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub fn round_half_up(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// `f64` flavour of [`round_half_up`]; NaN and infinities yield `0.0`.
pub fn round_half_up_f64(value: f64, decimals: u32) -> f64 {
    decimal_from_f64(value)
        .map(|v| round_half_up(v, decimals))
        .and_then(|v| v.to_f64())
        .unwrap_or(0.0)
}

pub fn sanitize_f64(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Division that reads a zero divisor (or an overflowing quotient) as zero.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

pub(crate) fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// `$1,234.56`, `-$12.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value, 2);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

pub fn format_currency_f64(value: f64) -> String {
    format_currency(decimal_from_f64(value).unwrap_or_default())
}

/// Formats a fraction as a percentage: `0.0385` → `3.85%`. A fraction too
/// large to scale renders as zero.
pub fn format_percent(fraction: Decimal, decimals: u32) -> String {
    let percent = fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| round_half_up(p, decimals))
        .unwrap_or_default();
    format!("{:.*}%", decimals as usize, percent)
}

pub fn format_percent_f64(fraction: f64, decimals: u32) -> String {
    format_percent(decimal_from_f64(fraction).unwrap_or_default(), decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_ties_away_from_zero() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
        assert_eq!(round_half_up(dec!(0.00125), 4), dec!(0.0013));
        assert_eq!(round_half_up(dec!(0.038461538), 4), dec!(0.0385));
    }

    #[test]
    fn test_round_half_up_f64_guards_non_finite() {
        assert_eq!(round_half_up_f64(0.125, 2), 0.13);
        assert_eq!(round_half_up_f64(f64::NAN, 2), 0.0);
        assert_eq!(round_half_up_f64(f64::NEG_INFINITY, 2), 0.0);
        assert_eq!(sanitize_f64(f64::NAN), 0.0);
        assert_eq!(sanitize_f64(12.5), 12.5);
    }

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-12.5)), "-$12.50");
        assert_eq!(format_currency(dec!(999.995)), "$1,000.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_currency_f64_guards_non_finite() {
        assert_eq!(format_currency_f64(f64::NAN), "$0.00");
        assert_eq!(format_currency_f64(f64::INFINITY), "$0.00");
        assert_eq!(format_currency_f64(800.8), "$800.80");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.0385), 2), "3.85%");
        assert_eq!(format_percent(dec!(0.816175), 1), "81.6%");
        assert_eq!(format_percent_f64(f64::NAN, 2), "0.00%");
    }

    #[test]
    fn test_format_percent_unscalable_fraction_is_zero() {
        assert_eq!(format_percent(dec!(9596000000000000000000000000), 2), "0.00%");
        assert_eq!(format_percent(Decimal::MAX, 1), "0.0%");
        assert_eq!(format_percent(Decimal::MIN, 2), "0.00%");
    }
}
