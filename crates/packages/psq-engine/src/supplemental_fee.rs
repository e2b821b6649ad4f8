//! Supplemental fee: a surcharge added to each ticket.
//!
//! The fee may be charged before or after the tip and on the pre-tax or
//! post-tax amount. Each of the four combinations changes which amount the
//! fee applies to, which amount the tip applies to and what the card network
//! finally processes.

use crate::rates::{Rates, savings};
use crate::rounding::round_half_up;
use psq_domain::{
    CostBreakdown, EngineConfig, FeeCombo, FeeTaxBasis, FlatRate, ProgramInput,
    SupplementalFeeResult, TipTiming, VolumeBreakdown,
};
use rust_decimal::Decimal;

/// The three volumes that differ between combos.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ComboVolumes {
    fee_eligible: Decimal,
    tip_eligible: Decimal,
    card_processed_total: Decimal,
}

fn combo_volumes(combo: FeeCombo, base: Decimal, rates: &Rates) -> ComboVolumes {
    let one = Decimal::ONE;
    let fee = one + rates.adjustment;
    let tax = one + rates.tax;
    let tip = one + rates.tip;
    let post_tax_pre_tip = base * tax;

    match (combo.tip_timing, combo.fee_tax_basis) {
        (TipTiming::BeforeTip, FeeTaxBasis::PostTax) => ComboVolumes {
            fee_eligible: post_tax_pre_tip,
            tip_eligible: post_tax_pre_tip * fee,
            card_processed_total: post_tax_pre_tip * fee * tip,
        },
        (TipTiming::BeforeTip, FeeTaxBasis::PreTax) => ComboVolumes {
            fee_eligible: base,
            tip_eligible: base * fee * tax,
            card_processed_total: base * fee * tax * tip,
        },
        (TipTiming::AfterTip, FeeTaxBasis::PostTax) => ComboVolumes {
            fee_eligible: post_tax_pre_tip * tip,
            tip_eligible: post_tax_pre_tip,
            card_processed_total: post_tax_pre_tip * tip * fee,
        },
        (TipTiming::AfterTip, FeeTaxBasis::PreTax) => ComboVolumes {
            fee_eligible: base * tip,
            tip_eligible: base,
            card_processed_total: base * tax * tip * fee,
        },
    }
}

/// Runs the formula chain for the combo named by the input, falling back to
/// BEFORE_TIP/POST_TAX when either flag is missing.
pub fn calculate(
    input: &ProgramInput,
    flat_rate: FlatRate,
    config: &EngineConfig,
) -> SupplementalFeeResult {
    let (combo, combo_fallback) = match input.fee_combo() {
        Some(combo) => (combo, false),
        None => (FeeCombo::default(), true),
    };
    SupplementalFeeResult {
        combo_fallback,
        ..calculate_for_combo(input, combo, flat_rate, config)
    }
}

/// Runs the formula chain for an explicit combo, ignoring the input's flags.
pub fn calculate_for_combo(
    input: &ProgramInput,
    combo: FeeCombo,
    flat_rate: FlatRate,
    config: &EngineConfig,
) -> SupplementalFeeResult {
    let dp = config.currency_decimals;
    let rates = Rates::from_input(input);
    let fee = rates.adjustment;

    let base = rates.base_from_gross(input.monthly_card_volume);
    let volumes = combo_volumes(combo, base, &rates);

    let fee_collected = volumes.fee_eligible * fee;
    let tip_amount = volumes.tip_eligible * rates.tip;
    let processor_charge = volumes.card_processed_total * flat_rate.rate;
    let net_change = processor_charge - fee_collected;
    let current_cost = input.monthly_card_volume * rates.current_rate;
    // Cash carries no processing cost; the fee on it is pure upside.
    let fee_collected_on_cash = input.monthly_cash_volume * fee;
    let monthly = current_cost - net_change + fee_collected_on_cash;

    SupplementalFeeResult {
        volume: VolumeBreakdown {
            base_pre_tax_pre_tip: round_half_up(base, dp),
            price_adjusted_base: round_half_up(base * (Decimal::ONE + fee), dp),
            card_processed_total: round_half_up(volumes.card_processed_total, dp),
        },
        cost: CostBreakdown {
            processor_charge_on_cards: round_half_up(processor_charge, dp),
            markup_or_fee_collected_on_cards: round_half_up(fee_collected, dp),
            current_processing_cost: round_half_up(current_cost, dp),
            net_change_in_card_processing_cost: round_half_up(net_change, dp),
        },
        savings: savings(current_cost, net_change, monthly, config),
        flat_rate,
        combo,
        combo_fallback: false,
        fee_eligible_volume: round_half_up(volumes.fee_eligible, dp),
        tip_eligible_volume: round_half_up(volumes.tip_eligible, dp),
        tip_amount: round_half_up(tip_amount, dp),
        fee_collected_on_cash: round_half_up(fee_collected_on_cash, dp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat_rate::derive_flat_rate;
    use psq_domain::{BusinessType, ProgramType};
    use rust_decimal_macros::dec;

    fn restaurant(tip_timing: Option<TipTiming>, basis: Option<FeeTaxBasis>) -> ProgramInput {
        ProgramInput {
            program_type: ProgramType::SupplementalFee,
            business_type: BusinessType::Restaurant,
            monthly_card_volume: dec!(20000),
            tax_rate_percent: dec!(10),
            tip_rate_percent: dec!(20),
            price_adjustment_percent: dec!(4),
            current_rate_percent: dec!(3),
            tip_timing,
            fee_tax_basis: basis,
            ..Default::default()
        }
    }

    fn run(input: &ProgramInput) -> SupplementalFeeResult {
        let config = EngineConfig::default();
        calculate(input, derive_flat_rate(input, &config), &config)
    }

    #[test]
    fn test_before_tip_pre_tax() {
        let result = run(&restaurant(Some(TipTiming::BeforeTip), Some(FeeTaxBasis::PreTax)));
        assert_eq!(result.fee_eligible_volume, dec!(15384.62));
        assert_eq!(result.cost.markup_or_fee_collected_on_cards, dec!(615.38));
        assert_eq!(result.tip_eligible_volume, dec!(17600.00));
        assert_eq!(result.tip_amount, dec!(3520.00));
        assert_eq!(result.volume.card_processed_total, dec!(21120.00));
        assert!(!result.combo_fallback);
    }

    #[test]
    fn test_after_tip_post_tax() {
        let result = run(&restaurant(Some(TipTiming::AfterTip), Some(FeeTaxBasis::PostTax)));
        assert_eq!(result.fee_eligible_volume, dec!(20307.69));
        assert_eq!(result.cost.markup_or_fee_collected_on_cards, dec!(812.31));
        assert_eq!(result.tip_eligible_volume, dec!(16923.08));
        assert_eq!(result.tip_amount, dec!(3384.62));
        assert_eq!(result.volume.card_processed_total, dec!(21120.00));
    }

    #[test]
    fn test_after_tip_pre_tax() {
        let result = run(&restaurant(Some(TipTiming::AfterTip), Some(FeeTaxBasis::PreTax)));
        assert_eq!(result.fee_eligible_volume, dec!(18461.54));
        assert_eq!(result.cost.markup_or_fee_collected_on_cards, dec!(738.46));
        assert_eq!(result.tip_eligible_volume, dec!(15384.62));
        assert_eq!(result.tip_amount, dec!(3076.92));
    }

    #[test]
    fn test_missing_flag_falls_back_to_default_combo() {
        let explicit = run(&restaurant(Some(TipTiming::BeforeTip), Some(FeeTaxBasis::PostTax)));
        let partial = run(&restaurant(Some(TipTiming::AfterTip), None));
        let absent = run(&restaurant(None, None));

        assert!(partial.combo_fallback);
        assert!(absent.combo_fallback);
        assert_eq!(partial.combo, FeeCombo::default());
        assert_eq!(partial.fee_eligible_volume, explicit.fee_eligible_volume);
        assert_eq!(absent.savings, explicit.savings);
    }

    #[test]
    fn test_retail_ignores_tip() {
        let mut input = restaurant(Some(TipTiming::AfterTip), Some(FeeTaxBasis::PostTax));
        input.business_type = BusinessType::Retail;
        let result = run(&input);
        // base = 20000 / 1.10, fee on base * 1.10
        assert_eq!(result.volume.base_pre_tax_pre_tip, dec!(18181.82));
        assert_eq!(result.fee_eligible_volume, dec!(20000.00));
        assert_eq!(result.tip_amount, Decimal::ZERO);
        assert_eq!(result.volume.card_processed_total, dec!(20800.00));
    }
}
