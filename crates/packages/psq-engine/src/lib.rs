#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Projected savings from switching a merchant to a dual pricing, cash
//! discounting or supplemental fee program.
//!
//! Every calculation is a pure function of a [`ProgramInput`] and an
//! [`EngineConfig`]: no shared state, no I/O, and no error path. Malformed
//! or out-of-range numbers produce a well-formed (if meaningless) result.
//!
//! # Example
//!
//! ```
//! use psq_domain::{BusinessType, EngineConfig, ProgramInput, ProgramType};
//! use rust_decimal_macros::dec;
//!
//! let input = ProgramInput {
//!     program_type: ProgramType::DualPricing,
//!     business_type: BusinessType::Retail,
//!     monthly_card_volume: dec!(20000),
//!     tax_rate_percent: dec!(10),
//!     price_adjustment_percent: dec!(4),
//!     current_rate_percent: dec!(2),
//!     ..Default::default()
//! };
//!
//! let result = psq_engine::calculate(&input, &EngineConfig::default());
//! assert_eq!(result.savings().total_net_gain_monthly, dec!(326.47));
//! ```

pub mod cash_discounting;
pub mod credit;
pub mod dual_pricing;
pub mod flat_rate;
mod rates;
pub mod rounding;
pub mod supplemental_fee;

pub use credit::{CreditTerms, calculate_credit, merchant_credit};
pub use flat_rate::derive_flat_rate;

use psq_domain::{EngineConfig, FeeCombo, ProgramInput, ProgramResult, ProgramType, SupplementalFeeResult};

/// Derives the flat rate and runs the calculator for the input's program.
pub fn calculate(input: &ProgramInput, config: &EngineConfig) -> ProgramResult {
    let input = input.sanitized();
    let flat_rate = derive_flat_rate(&input, config);

    match input.program_type {
        ProgramType::DualPricing => {
            ProgramResult::DualPricing(dual_pricing::calculate(&input, flat_rate, config))
        }
        ProgramType::CashDiscounting => {
            ProgramResult::CashDiscounting(cash_discounting::calculate(&input, flat_rate, config))
        }
        ProgramType::SupplementalFee => {
            ProgramResult::SupplementalFee(supplemental_fee::calculate(&input, flat_rate, config))
        }
    }
}

/// Supplemental fee figures for all four combos, in [`FeeCombo::ALL`] order,
/// so a report can show the merchant every option side by side.
pub fn compare_fee_combos(input: &ProgramInput, config: &EngineConfig) -> [SupplementalFeeResult; 4] {
    let input = input.sanitized();
    let flat_rate = derive_flat_rate(&input, config);
    FeeCombo::ALL.map(|combo| supplemental_fee::calculate_for_combo(&input, combo, flat_rate, config))
}
