//! Dual pricing: the card price carries a price differential over cash.
//!
//! Order of operations is base → + price differential → + tax → + tip.

use crate::rates::{Rates, savings};
use crate::rounding::round_half_up;
use psq_domain::{CostBreakdown, DualPricingResult, EngineConfig, FlatRate, ProgramInput, VolumeBreakdown};
use rust_decimal::Decimal;

/// Unrounded card-side figures shared with cash discounting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CardBranch {
    pub base: Decimal,
    pub price_adjusted_base: Decimal,
    pub card_processed_total: Decimal,
    pub processor_charge: Decimal,
    pub markup_collected: Decimal,
    pub current_cost: Decimal,
}

impl CardBranch {
    pub fn compute(input: &ProgramInput, rates: &Rates, flat_rate: &FlatRate) -> Self {
        let gross = input.monthly_card_volume;
        let base = rates.base_from_gross(gross);
        let price_adjusted_base = base * (Decimal::ONE + rates.adjustment);
        let card_processed_total =
            price_adjusted_base * (Decimal::ONE + rates.tax) * (Decimal::ONE + rates.tip);

        Self {
            base,
            price_adjusted_base,
            card_processed_total,
            processor_charge: card_processed_total * flat_rate.rate,
            markup_collected: base * rates.adjustment,
            current_cost: gross * rates.current_rate,
        }
    }

    /// Markup collected minus processor charge.
    pub fn recovery(&self) -> Decimal {
        self.markup_collected - self.processor_charge
    }

    pub fn net_change(&self) -> Decimal {
        self.processor_charge - self.markup_collected
    }

    pub fn card_savings(&self) -> Decimal {
        self.current_cost - self.net_change()
    }

    pub fn volume(&self, config: &EngineConfig) -> VolumeBreakdown {
        let dp = config.currency_decimals;
        VolumeBreakdown {
            base_pre_tax_pre_tip: round_half_up(self.base, dp),
            price_adjusted_base: round_half_up(self.price_adjusted_base, dp),
            card_processed_total: round_half_up(self.card_processed_total, dp),
        }
    }

    pub fn cost(&self, config: &EngineConfig) -> CostBreakdown {
        let dp = config.currency_decimals;
        CostBreakdown {
            processor_charge_on_cards: round_half_up(self.processor_charge, dp),
            markup_or_fee_collected_on_cards: round_half_up(self.markup_collected, dp),
            current_processing_cost: round_half_up(self.current_cost, dp),
            net_change_in_card_processing_cost: round_half_up(self.net_change(), dp),
        }
    }
}

pub fn calculate(input: &ProgramInput, flat_rate: FlatRate, config: &EngineConfig) -> DualPricingResult {
    let rates = Rates::from_input(input);
    let card = CardBranch::compute(input, &rates, &flat_rate);

    DualPricingResult {
        volume: card.volume(config),
        cost: card.cost(config),
        savings: savings(card.current_cost, card.net_change(), card.card_savings(), config),
        flat_rate,
        recovery: round_half_up(card.recovery(), config.currency_decimals),
    }
}
