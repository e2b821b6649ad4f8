use crate::program::{FeeCombo, ProgramType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the effective flat rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Auto,
    Manual,
}

/// The processing rate the program itself charges, as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRate {
    #[serde(rename = "effectiveFlatRate")]
    pub rate: Decimal,
    #[serde(rename = "flatRateSource")]
    pub source: RateSource,
}

impl FlatRate {
    pub const fn auto(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Auto,
        }
    }

    pub const fn manual(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Manual,
        }
    }

    /// The rate as a percent number (`0.0385` → `3.85`).
    pub fn percent(&self) -> Decimal {
        self.rate * Decimal::ONE_HUNDRED
    }

    pub fn is_auto_derived(&self) -> bool {
        self.source == RateSource::Auto
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeBreakdown {
    pub base_pre_tax_pre_tip: Decimal,
    pub price_adjusted_base: Decimal,
    pub card_processed_total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub processor_charge_on_cards: Decimal,
    pub markup_or_fee_collected_on_cards: Decimal,
    pub current_processing_cost: Decimal,
    pub net_change_in_card_processing_cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub processing_cost_savings_cards_only: Decimal,
    /// Fraction of the current processing cost saved on cards.
    pub processing_cost_savings_percent: Decimal,
    pub total_net_gain_monthly: Decimal,
    pub total_net_gain_annual: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualPricingResult {
    #[serde(flatten)]
    pub volume: VolumeBreakdown,
    #[serde(flatten)]
    pub cost: CostBreakdown,
    #[serde(flatten)]
    pub savings: Savings,
    #[serde(flatten)]
    pub flat_rate: FlatRate,
    /// Markup collected minus processor charge; negative when under-recovered.
    pub recovery: Decimal,
}

/// The cash-tender side of a cash discounting quote. Informational only:
/// cash never touches a card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBranch {
    pub base_cash: Decimal,
    pub menu_priced_cash_base: Decimal,
    pub cash_discount_given: Decimal,
    pub net_cash_base: Decimal,
    pub cash_processed_total: Decimal,
    pub extra_cash_revenue: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashDiscountingResult {
    #[serde(flatten)]
    pub volume: VolumeBreakdown,
    #[serde(flatten)]
    pub cost: CostBreakdown,
    #[serde(flatten)]
    pub savings: Savings,
    #[serde(flatten)]
    pub flat_rate: FlatRate,
    pub recovery: Decimal,
    #[serde(flatten)]
    pub cash: CashBranch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementalFeeResult {
    #[serde(flatten)]
    pub volume: VolumeBreakdown,
    #[serde(flatten)]
    pub cost: CostBreakdown,
    #[serde(flatten)]
    pub savings: Savings,
    #[serde(flatten)]
    pub flat_rate: FlatRate,
    #[serde(flatten)]
    pub combo: FeeCombo,
    /// Set when the flags were missing and the default combo was used.
    pub combo_fallback: bool,
    pub fee_eligible_volume: Decimal,
    pub tip_eligible_volume: Decimal,
    pub tip_amount: Decimal,
    pub fee_collected_on_cash: Decimal,
}

/// Output of one calculation. Consumers match on the program instead of
/// probing optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "programType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramResult {
    DualPricing(DualPricingResult),
    CashDiscounting(CashDiscountingResult),
    SupplementalFee(SupplementalFeeResult),
}

impl ProgramResult {
    pub fn program_type(&self) -> ProgramType {
        match self {
            Self::DualPricing(_) => ProgramType::DualPricing,
            Self::CashDiscounting(_) => ProgramType::CashDiscounting,
            Self::SupplementalFee(_) => ProgramType::SupplementalFee,
        }
    }

    pub fn volume(&self) -> &VolumeBreakdown {
        match self {
            Self::DualPricing(r) => &r.volume,
            Self::CashDiscounting(r) => &r.volume,
            Self::SupplementalFee(r) => &r.volume,
        }
    }

    pub fn cost(&self) -> &CostBreakdown {
        match self {
            Self::DualPricing(r) => &r.cost,
            Self::CashDiscounting(r) => &r.cost,
            Self::SupplementalFee(r) => &r.cost,
        }
    }

    pub fn savings(&self) -> &Savings {
        match self {
            Self::DualPricing(r) => &r.savings,
            Self::CashDiscounting(r) => &r.savings,
            Self::SupplementalFee(r) => &r.savings,
        }
    }

    pub fn flat_rate(&self) -> &FlatRate {
        match self {
            Self::DualPricing(r) => &r.flat_rate,
            Self::CashDiscounting(r) => &r.flat_rate,
            Self::SupplementalFee(r) => &r.flat_rate,
        }
    }
}
