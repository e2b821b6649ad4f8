//! Merchant credit and payback period for the one-time investment that comes
//! with a program switch.

use crate::rounding::{percent_to_fraction, round_half_up, safe_div};
use psq_domain::{CreditAndRoi, CreditRequest, EngineConfig, ProgramInput, ProgramResult};
use psq_domain::coerce::{self, MAX_AMOUNT, MAX_PERCENT};
use rust_decimal::Decimal;

/// Every figure the credit formula needs, already resolved against defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditTerms {
    pub hardware_total: Decimal,
    pub investment_total: Decimal,
    /// Fraction of the margin returned to the merchant.
    pub profit_share: Decimal,
    pub payback_window_months: u32,
    /// Percent number, e.g. `3.85`.
    pub flat_rate_percent: Decimal,
    /// Percent number, e.g. `2`.
    pub interchange_cost_percent: Decimal,
    pub adjusted_monthly_card_volume: Decimal,
    pub total_monthly_savings: Decimal,
}

impl CreditTerms {
    /// Resolves the terms for a computed quote. The price-adjusted card total
    /// stands in for the adjusted monthly card volume.
    pub fn for_quote(
        request: &CreditRequest,
        input: &ProgramInput,
        result: &ProgramResult,
        config: &EngineConfig,
    ) -> Self {
        let profit_share_percent = request
            .profit_share_percent()
            .unwrap_or(config.default_profit_share_percent);
        Self {
            hardware_total: request.investment.hardware_total(),
            investment_total: request.investment.total(),
            profit_share: percent_to_fraction(profit_share_percent),
            payback_window_months: request
                .payback_window_months
                .unwrap_or(config.default_payback_window_months),
            flat_rate_percent: result.flat_rate().percent(),
            interchange_cost_percent: coerce::bounded(input.interchange_cost_percent, MAX_PERCENT),
            adjusted_monthly_card_volume: result.volume().card_processed_total,
            total_monthly_savings: result.savings().total_net_gain_monthly,
        }
    }
}

pub fn merchant_credit(terms: &CreditTerms, config: &EngineConfig) -> CreditAndRoi {
    let dp = config.currency_decimals;
    let net_margin = terms.flat_rate_percent - terms.interchange_cost_percent;
    let volume_factor = safe_div(terms.adjusted_monthly_card_volume, config.credit_volume_scale);

    // Absurd inputs can overflow the product; read that as no credit.
    let raw_credit = [
        Decimal::from(terms.payback_window_months),
        terms.profit_share,
        volume_factor,
        config.credit_multiplier,
    ]
    .into_iter()
    .try_fold(net_margin, |acc, factor| acc.checked_mul(factor))
    .unwrap_or(Decimal::ZERO);
    let credit = round_half_up(coerce::bounded(raw_credit, MAX_AMOUNT).max(Decimal::ZERO), dp);

    let investment_total = terms.investment_total.max(Decimal::ZERO);
    let total_due = (investment_total - credit).max(Decimal::ZERO);

    let payback_months = (terms.total_monthly_savings > Decimal::ZERO)
        .then(|| round_half_up(safe_div(total_due, terms.total_monthly_savings), dp));

    CreditAndRoi {
        hardware_total: round_half_up(terms.hardware_total, dp),
        investment_total: round_half_up(investment_total, dp),
        merchant_credit_amount: credit,
        total_investment_after_credit: round_half_up(total_due, dp),
        payback_months,
    }
}

/// Resolves the terms for a quote and computes its credit in one step.
pub fn calculate_credit(
    request: &CreditRequest,
    input: &ProgramInput,
    result: &ProgramResult,
    config: &EngineConfig,
) -> CreditAndRoi {
    merchant_credit(&CreditTerms::for_quote(request, input, result, config), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms() -> CreditTerms {
        CreditTerms {
            hardware_total: dec!(5000),
            investment_total: dec!(6000),
            profit_share: dec!(0.5),
            payback_window_months: 24,
            flat_rate_percent: dec!(3.85),
            interchange_cost_percent: dec!(2),
            adjusted_monthly_card_volume: dec!(20800),
            total_monthly_savings: dec!(326.47),
        }
    }

    #[test]
    fn test_credit_and_payback() {
        let roi = merchant_credit(&terms(), &EngineConfig::default());
        // 1.85 * 24 * 0.5 * 0.208 * 1000
        assert_eq!(roi.merchant_credit_amount, dec!(4617.60));
        assert_eq!(roi.total_investment_after_credit, dec!(1382.40));
        assert_eq!(roi.payback_months, Some(dec!(4.23)));
        assert_eq!(roi.investment_total, dec!(6000));
        assert_eq!(roi.hardware_total, dec!(5000));
    }

    #[test]
    fn test_negative_margin_clamps_credit_to_zero() {
        let roi = merchant_credit(
            &CreditTerms {
                interchange_cost_percent: dec!(4.5),
                ..terms()
            },
            &EngineConfig::default(),
        );
        assert_eq!(roi.merchant_credit_amount, Decimal::ZERO);
        assert_eq!(roi.total_investment_after_credit, dec!(6000));
    }

    #[test]
    fn test_credit_larger_than_investment_leaves_nothing_due() {
        let roi = merchant_credit(
            &CreditTerms {
                investment_total: dec!(1000),
                ..terms()
            },
            &EngineConfig::default(),
        );
        assert_eq!(roi.total_investment_after_credit, Decimal::ZERO);
        assert_eq!(roi.payback_months, Some(Decimal::ZERO));
    }

    #[test]
    fn test_payback_is_none_without_savings() {
        for savings in [Decimal::ZERO, dec!(-125.40)] {
            let roi = merchant_credit(
                &CreditTerms {
                    total_monthly_savings: savings,
                    ..terms()
                },
                &EngineConfig::default(),
            );
            assert_eq!(roi.payback_months, None);
        }
    }

    #[test]
    fn test_multiplier_comes_from_config() {
        let config = EngineConfig {
            credit_multiplier: dec!(500),
            ..Default::default()
        };
        let roi = merchant_credit(&terms(), &config);
        assert_eq!(roi.merchant_credit_amount, dec!(2308.80));
    }
}
