use crate::coerce::{self, MAX_AMOUNT, MAX_PERCENT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! impl_wire_name {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = psq_error::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(psq_error::Error::InvalidArgument(format!(
                        "unknown {}: {:?}",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    #[default]
    DualPricing,
    CashDiscounting,
    SupplementalFee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    #[default]
    Restaurant,
    Retail,
}

/// Whether the supplemental fee is charged before or after the tip is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipTiming {
    #[default]
    BeforeTip,
    AfterTip,
}

/// Whether the supplemental fee is charged on the pre-tax or post-tax amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeTaxBasis {
    PreTax,
    #[default]
    PostTax,
}

impl_wire_name!(ProgramType {
    DualPricing => "DUAL_PRICING",
    CashDiscounting => "CASH_DISCOUNTING",
    SupplementalFee => "SUPPLEMENTAL_FEE",
});

impl_wire_name!(BusinessType {
    Restaurant => "RESTAURANT",
    Retail => "RETAIL",
});

impl_wire_name!(TipTiming {
    BeforeTip => "BEFORE_TIP",
    AfterTip => "AFTER_TIP",
});

impl_wire_name!(FeeTaxBasis {
    PreTax => "PRE_TAX",
    PostTax => "POST_TAX",
});

impl BusinessType {
    /// Retail merchants never collect tips.
    pub const fn collects_tips(&self) -> bool {
        matches!(self, Self::Restaurant)
    }
}

/// The `(tipTiming, feeTaxBasis)` pair that picks a supplemental fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCombo {
    pub tip_timing: TipTiming,
    pub fee_tax_basis: FeeTaxBasis,
}

impl FeeCombo {
    pub const fn new(tip_timing: TipTiming, fee_tax_basis: FeeTaxBasis) -> Self {
        Self {
            tip_timing,
            fee_tax_basis,
        }
    }

    /// Builds a combo only when both flags are known.
    pub fn from_flags(tip_timing: Option<TipTiming>, fee_tax_basis: Option<FeeTaxBasis>) -> Option<Self> {
        Some(Self::new(tip_timing?, fee_tax_basis?))
    }

    pub const ALL: [FeeCombo; 4] = [
        FeeCombo::new(TipTiming::BeforeTip, FeeTaxBasis::PostTax),
        FeeCombo::new(TipTiming::BeforeTip, FeeTaxBasis::PreTax),
        FeeCombo::new(TipTiming::AfterTip, FeeTaxBasis::PostTax),
        FeeCombo::new(TipTiming::AfterTip, FeeTaxBasis::PreTax),
    ];
}

impl std::fmt::Display for FeeCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.tip_timing, self.fee_tax_basis)
    }
}

/// One merchant quote request, as collected by the input forms.
///
/// Every `*_percent` field is a percent number (`4` means 4 %). Volumes are
/// gross monthly amounts, inclusive of tax and tip as charged today.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramInput {
    #[serde(deserialize_with = "coerce::lenient_enum")]
    pub program_type: ProgramType,
    #[serde(deserialize_with = "coerce::lenient_enum")]
    pub business_type: BusinessType,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub monthly_card_volume: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub monthly_cash_volume: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub current_rate_percent: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub interchange_cost_percent: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub tax_rate_percent: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub tip_rate_percent: Decimal,
    /// Price differential, menu markup or supplemental fee, depending on
    /// `program_type`.
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub price_adjustment_percent: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub cash_discount_percent: Decimal,
    #[serde(
        deserialize_with = "coerce::lenient_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub flat_rate_override_percent: Option<Decimal>,
    #[serde(
        deserialize_with = "coerce::lenient_optional_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub tip_timing: Option<TipTiming>,
    #[serde(
        deserialize_with = "coerce::lenient_optional_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee_tax_basis: Option<FeeTaxBasis>,
}

impl ProgramInput {
    /// Returns a copy with every out-of-range number treated as malformed.
    ///
    /// Negative values are left alone; the formulas accept them.
    pub fn sanitized(&self) -> Self {
        Self {
            monthly_card_volume: coerce::bounded(self.monthly_card_volume, MAX_AMOUNT),
            monthly_cash_volume: coerce::bounded(self.monthly_cash_volume, MAX_AMOUNT),
            current_rate_percent: coerce::bounded(self.current_rate_percent, MAX_PERCENT),
            interchange_cost_percent: coerce::bounded(self.interchange_cost_percent, MAX_PERCENT),
            tax_rate_percent: coerce::bounded(self.tax_rate_percent, MAX_PERCENT),
            tip_rate_percent: coerce::bounded(self.tip_rate_percent, MAX_PERCENT),
            price_adjustment_percent: coerce::bounded(self.price_adjustment_percent, MAX_PERCENT),
            cash_discount_percent: coerce::bounded(self.cash_discount_percent, MAX_PERCENT),
            flat_rate_override_percent: coerce::bounded_opt(
                self.flat_rate_override_percent,
                MAX_PERCENT,
            ),
            ..*self
        }
    }

    /// The supplemental fee combo named by the flags, if both are present.
    pub fn fee_combo(&self) -> Option<FeeCombo> {
        FeeCombo::from_flags(self.tip_timing, self.fee_tax_basis)
    }
}
