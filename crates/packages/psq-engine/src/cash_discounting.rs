//! Cash discounting: menu prices carry a markup and cash payers get a
//! discount off the menu price. The card side follows the dual pricing
//! chain with the markup in place of the price differential.

use crate::dual_pricing::CardBranch;
use crate::rates::{Rates, savings};
use crate::rounding::round_half_up;
use psq_domain::{CashBranch, CashDiscountingResult, EngineConfig, FlatRate, ProgramInput};
use rust_decimal::Decimal;

/// Unrounded cash-side figures; all zero when there is no cash volume.
#[derive(Debug, Clone, Copy, Default)]
struct CashSide {
    base_cash: Decimal,
    menu_priced_cash_base: Decimal,
    cash_discount_given: Decimal,
    net_cash_base: Decimal,
    cash_processed_total: Decimal,
}

impl CashSide {
    fn compute(gross_cash: Decimal, rates: &Rates) -> Self {
        if gross_cash <= Decimal::ZERO {
            return Self::default();
        }

        let base_cash = rates.base_from_gross(gross_cash);
        let menu_priced_cash_base = base_cash * (Decimal::ONE + rates.adjustment);
        let cash_discount_given = menu_priced_cash_base * rates.cash_discount;
        let net_cash_base = menu_priced_cash_base - cash_discount_given;

        Self {
            base_cash,
            menu_priced_cash_base,
            cash_discount_given,
            net_cash_base,
            cash_processed_total: net_cash_base
                * (Decimal::ONE + rates.tax)
                * (Decimal::ONE + rates.tip),
        }
    }

    /// Markup earned on cash sales less the discount handed back. Negative
    /// when the discount outweighs the markup.
    fn extra_revenue(&self) -> Decimal {
        (self.menu_priced_cash_base - self.base_cash) - self.cash_discount_given
    }

    fn rounded(&self, dp: u32) -> CashBranch {
        CashBranch {
            base_cash: round_half_up(self.base_cash, dp),
            menu_priced_cash_base: round_half_up(self.menu_priced_cash_base, dp),
            cash_discount_given: round_half_up(self.cash_discount_given, dp),
            net_cash_base: round_half_up(self.net_cash_base, dp),
            cash_processed_total: round_half_up(self.cash_processed_total, dp),
            extra_cash_revenue: round_half_up(self.extra_revenue(), dp),
        }
    }
}

pub fn calculate(
    input: &ProgramInput,
    flat_rate: FlatRate,
    config: &EngineConfig,
) -> CashDiscountingResult {
    let rates = Rates::from_input(input);
    let card = CardBranch::compute(input, &rates, &flat_rate);
    let cash = CashSide::compute(input.monthly_cash_volume, &rates);

    let monthly = card.card_savings() + cash.extra_revenue();

    CashDiscountingResult {
        volume: card.volume(config),
        cost: card.cost(config),
        savings: savings(card.current_cost, card.net_change(), monthly, config),
        flat_rate,
        recovery: round_half_up(card.recovery(), config.currency_decimals),
        cash: cash.rounded(config.currency_decimals),
    }
}
