//! Derives the rate a program charges on its marked-up total.

use crate::rounding::{percent_to_fraction, round_half_up, safe_div};
use psq_domain::{EngineConfig, FlatRate, ProgramInput};
use rust_decimal::Decimal;

/// `adjustment / (1 + adjustment)`, rounded to the rate precision and capped.
///
/// `adjustment` is a fraction. Non-positive adjustments derive a zero rate.
pub fn auto_flat_rate(adjustment: Decimal, config: &EngineConfig) -> Decimal {
    if adjustment <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let derived = round_half_up(
        safe_div(adjustment, Decimal::ONE + adjustment),
        config.rate_decimals,
    );
    derived.min(config.flat_rate_cap)
}

/// Picks the manual override when present, otherwise derives the rate from
/// the program's price adjustment (or supplemental fee).
pub fn derive_flat_rate(input: &ProgramInput, config: &EngineConfig) -> FlatRate {
    match input.flat_rate_override_percent {
        Some(percent) => FlatRate::manual(percent_to_fraction(percent).max(Decimal::ZERO)),
        None => FlatRate::auto(auto_flat_rate(
            percent_to_fraction(input.price_adjustment_percent),
            config,
        )),
    }
}
