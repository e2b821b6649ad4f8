#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Savings quote service.
//!
//! Wraps the calculation engine for the intake forms and the report
//! generator: decodes a quote request, runs the program calculator, appends
//! the merchant credit when asked for one and renders the headline figures.

use psq_domain::{
    CreditAndRoi, CreditRequest, EngineConfig, FeeCombo, ProgramInput, ProgramResult,
    ProgramType, SupplementalFeeResult,
};
use psq_engine::rounding::{format_currency, format_percent};
use psq_error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A savings quote request as posted by the intake form: the program inputs
/// plus an optional investment to compute a merchant credit for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub input: ProgramInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<CreditRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub result: ProgramResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<CreditAndRoi>,
}

/// Display strings for the report's headline block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub program_type: String,
    pub effective_flat_rate: String,
    pub current_processing_cost: String,
    pub savings_percent: String,
    pub net_gain_monthly: String,
    pub net_gain_annual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<String>,
}

impl Quote {
    pub fn summary(&self) -> QuoteSummary {
        let savings = self.result.savings();
        QuoteSummary {
            program_type: self.result.program_type().to_string(),
            effective_flat_rate: format_percent(self.result.flat_rate().rate, 2),
            current_processing_cost: format_currency(
                self.result.cost().current_processing_cost,
            ),
            savings_percent: format_percent(savings.processing_cost_savings_percent, 2),
            net_gain_monthly: format_currency(savings.total_net_gain_monthly),
            net_gain_annual: format_currency(savings.total_net_gain_annual),
            merchant_credit: self
                .credit
                .map(|credit| format_currency(credit.merchant_credit_amount)),
            payback_months: self
                .credit
                .and_then(|credit| credit.payback_months)
                .map(|months| months.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuoteService {
    config: EngineConfig,
}

impl QuoteService {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the calculator for the input's program.
    ///
    /// A supplemental fee input missing either combo flag is rejected when
    /// `strict_fee_combo` is set and otherwise priced as BEFORE_TIP/POST_TAX.
    #[instrument(skip_all, fields(program = %input.program_type))]
    pub fn calculate(&self, input: &ProgramInput) -> Result<ProgramResult> {
        if input.program_type == ProgramType::SupplementalFee && input.fee_combo().is_none() {
            if self.config.strict_fee_combo {
                return Err(Error::InvalidArgument(
                    "supplemental fee requires both tipTiming and feeTaxBasis".into(),
                ));
            }
            warn!(
                tip_timing = ?input.tip_timing,
                fee_tax_basis = ?input.fee_tax_basis,
                fallback = %FeeCombo::default(),
                "fee combo flags missing, using fallback combo"
            );
        }

        let result = psq_engine::calculate(input, &self.config);
        debug!(
            flat_rate = %result.flat_rate().rate,
            auto_derived = result.flat_rate().is_auto_derived(),
            net_gain_monthly = %result.savings().total_net_gain_monthly,
            "program savings calculated"
        );
        Ok(result)
    }

    #[instrument(skip_all, fields(program = %request.input.program_type))]
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let result = self.calculate(&request.input)?;
        let credit = request.credit.as_ref().map(|credit| {
            let roi = psq_engine::calculate_credit(credit, &request.input, &result, &self.config);
            info!(
                merchant_credit = %roi.merchant_credit_amount,
                remaining = %roi.total_investment_after_credit,
                payback_months = ?roi.payback_months,
                "merchant credit appended"
            );
            roi
        });

        Ok(Quote { result, credit })
    }

    /// Decodes a JSON request body and quotes it. Numbers and enum names are
    /// decoded leniently; only a body that is not a JSON object is rejected.
    pub fn quote_json(&self, body: &str) -> Result<Quote> {
        let request: QuoteRequest = serde_json::from_str(body)
            .map_err(|e| Error::InvalidArgument(format!("malformed quote request: {e}")))?;
        self.quote(&request)
    }

    /// All four supplemental fee combos for the input, in [`FeeCombo::ALL`] order.
    #[instrument(skip_all)]
    pub fn compare_fee_combos(&self, input: &ProgramInput) -> [SupplementalFeeResult; 4] {
        let results = psq_engine::compare_fee_combos(input, &self.config);
        debug!(combos = results.len(), "supplemental fee combos compared");
        results
    }
}
