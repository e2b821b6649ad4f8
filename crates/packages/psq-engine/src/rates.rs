use crate::rounding::{percent_to_fraction, round_half_up, safe_div};
use psq_domain::coerce::{MAX_AMOUNT, bounded};
use psq_domain::{EngineConfig, ProgramInput, Savings};
use rust_decimal::Decimal;

/// Input percentages as fractions, with tip already gated by business type.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rates {
    pub tax: Decimal,
    pub tip: Decimal,
    pub adjustment: Decimal,
    pub current_rate: Decimal,
    pub cash_discount: Decimal,
}

impl Rates {
    pub fn from_input(input: &ProgramInput) -> Self {
        let tip = if input.business_type.collects_tips() {
            percent_to_fraction(input.tip_rate_percent)
        } else {
            Decimal::ZERO
        };
        Self {
            tax: percent_to_fraction(input.tax_rate_percent),
            tip,
            adjustment: percent_to_fraction(input.price_adjustment_percent),
            current_rate: percent_to_fraction(input.current_rate_percent),
            cash_discount: percent_to_fraction(input.cash_discount_percent),
        }
    }

    /// Strips tax and tip out of a gross volume. A base past the amount
    /// bound (tax and tip summing to nearly -100 %) reads as zero.
    pub fn base_from_gross(&self, gross: Decimal) -> Decimal {
        bounded(safe_div(gross, Decimal::ONE + self.tax + self.tip), MAX_AMOUNT)
    }
}

/// Rounds the card savings and the monthly/annual totals.
///
/// `monthly` is the unrounded net gain; annual is taken from it before any
/// rounding so twelve months of rounding error never compound.
pub(crate) fn savings(
    current_cost: Decimal,
    net_change: Decimal,
    monthly: Decimal,
    config: &EngineConfig,
) -> Savings {
    let cards_only = round_half_up(current_cost - net_change, config.currency_decimals);
    Savings {
        processing_cost_savings_cards_only: cards_only,
        processing_cost_savings_percent: round_half_up(
            safe_div(cards_only, current_cost),
            config.rate_decimals,
        ),
        total_net_gain_monthly: round_half_up(monthly, config.currency_decimals),
        total_net_gain_annual: round_half_up(monthly * Decimal::from(12), config.currency_decimals),
    }
}
