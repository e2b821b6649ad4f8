use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tuning knobs for every calculation. Passed explicitly so one process can
/// quote for several tenants with different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places kept on currency outputs.
    pub currency_decimals: u32,
    /// Decimal places kept on derived rates and savings ratios.
    pub rate_decimals: u32,
    /// Upper bound on an auto-derived flat rate, as a fraction.
    pub flat_rate_cap: Decimal,
    pub default_profit_share_percent: Decimal,
    pub default_payback_window_months: u32,
    /// Restores dollar units in the merchant credit formula.
    pub credit_multiplier: Decimal,
    /// Card volume is scaled per this many dollars in the credit formula.
    pub credit_volume_scale: Decimal,
    /// Reject supplemental fee quotes whose combo flags are missing instead
    /// of falling back to BEFORE_TIP/POST_TAX.
    pub strict_fee_combo: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency_decimals: 2,
            rate_decimals: 4,
            flat_rate_cap: Decimal::new(4, 2),
            default_profit_share_percent: Decimal::new(50, 0),
            default_payback_window_months: 24,
            credit_multiplier: Decimal::new(1000, 0),
            credit_volume_scale: Decimal::new(100_000, 0),
            strict_fee_combo: false,
        }
    }
}
