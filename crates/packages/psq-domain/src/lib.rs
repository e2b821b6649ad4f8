//! Records exchanged with the savings engine: the merchant input, the
//! per-program results, merchant credit figures and engine settings.

pub mod coerce;
mod config;
mod credit;
mod program;
mod result;

pub use config::EngineConfig;
pub use credit::{CreditAndRoi, CreditRequest, HardwareLine, Investment};
pub use program::{BusinessType, FeeCombo, FeeTaxBasis, ProgramInput, ProgramType, TipTiming};
pub use result::{
    CashBranch, CashDiscountingResult, CostBreakdown, DualPricingResult, FlatRate, ProgramResult,
    RateSource, Savings, SupplementalFeeResult, VolumeBreakdown,
};
