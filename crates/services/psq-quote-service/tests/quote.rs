use psq_domain::{EngineConfig, FeeCombo, ProgramResult, ProgramType};
use psq_error::Error;
use psq_quote_service::{QuoteRequest, QuoteService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const RETAIL_DUAL_PRICING: &str = r#"{
    "programType": "DUAL_PRICING",
    "businessType": "RETAIL",
    "monthlyCardVolume": 20000,
    "taxRatePercent": "10",
    "tipRatePercent": 18,
    "priceAdjustmentPercent": 4,
    "currentRatePercent": 2,
    "interchangeCostPercent": 2,
    "credit": {
        "investment": {
            "hardware": [
                { "description": "Smart terminal", "quantity": 2, "unitPrice": 2500 }
            ],
            "additionalCosts": 1000
        }
    }
}"#;

#[test]
fn test_quote_json_with_credit() {
    let quote = QuoteService::default().quote_json(RETAIL_DUAL_PRICING).unwrap();

    assert_eq!(quote.result.program_type(), ProgramType::DualPricing);
    assert_eq!(quote.result.savings().total_net_gain_monthly, dec!(326.47));

    let credit = quote.credit.expect("credit requested");
    assert_eq!(credit.merchant_credit_amount, dec!(4617.60));
    assert_eq!(credit.total_investment_after_credit, dec!(1382.40));
    assert_eq!(credit.payback_months, Some(dec!(4.23)));
}

#[test]
fn test_quote_summary_strings() {
    let summary = QuoteService::default()
        .quote_json(RETAIL_DUAL_PRICING)
        .unwrap()
        .summary();

    assert_eq!(summary.program_type, "DUAL_PRICING");
    assert_eq!(summary.effective_flat_rate, "3.85%");
    assert_eq!(summary.current_processing_cost, "$400.00");
    assert_eq!(summary.savings_percent, "81.62%");
    assert_eq!(summary.net_gain_monthly, "$326.47");
    assert_eq!(summary.net_gain_annual, "$3,917.67");
    assert_eq!(summary.merchant_credit.as_deref(), Some("$4,617.60"));
    assert_eq!(summary.payback_months.as_deref(), Some("4.23"));
}

#[test]
fn test_quote_without_credit() {
    let request = QuoteRequest::default();
    let quote = QuoteService::default().quote(&request).unwrap();

    assert!(quote.credit.is_none());
    assert_eq!(quote.result.savings().total_net_gain_monthly, Decimal::ZERO);
    assert!(quote.summary().merchant_credit.is_none());
}

#[test]
fn test_malformed_fields_still_quote() {
    let body = r#"{
        "programType": "supplemental-fee",
        "monthlyCardVolume": "lots",
        "tipTiming": "sometime",
        "feeTaxBasis": "PRE_TAX"
    }"#;
    let quote = QuoteService::default().quote_json(body).unwrap();

    let ProgramResult::SupplementalFee(fee) = quote.result else {
        panic!("expected a supplemental fee result");
    };
    assert!(fee.combo_fallback);
    assert_eq!(fee.combo, FeeCombo::default());
    assert_eq!(fee.volume.card_processed_total, Decimal::ZERO);
}

#[test]
fn test_non_object_body_is_rejected() {
    let service = QuoteService::default();
    for body in ["", "[1, 2]", "\"quote\"", "{"] {
        assert!(
            matches!(service.quote_json(body), Err(Error::InvalidArgument(_))),
            "body {body:?} should be rejected"
        );
    }
}

#[test]
fn test_strict_fee_combo_rejects_json_without_flags() {
    let service = QuoteService::new(EngineConfig {
        strict_fee_combo: true,
        ..Default::default()
    });
    let result = service.quote_json(r#"{ "programType": "SUPPLEMENTAL_FEE" }"#);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_compare_fee_combos_follows_combo_order() {
    let request: QuoteRequest = serde_json::from_str(
        r#"{
            "programType": "SUPPLEMENTAL_FEE",
            "businessType": "RESTAURANT",
            "monthlyCardVolume": 20000,
            "taxRatePercent": 10,
            "tipRatePercent": 20,
            "priceAdjustmentPercent": 4,
            "currentRatePercent": 3
        }"#,
    )
    .unwrap();

    let results = QuoteService::default().compare_fee_combos(&request.input);
    for (result, combo) in results.iter().zip(FeeCombo::ALL) {
        assert_eq!(result.combo, combo);
        assert!(!result.combo_fallback);
    }
    assert_eq!(results[0].tip_amount, dec!(3520.00));
    assert_eq!(results[3].tip_amount, dec!(3076.92));
}

#[test]
fn test_extreme_inputs_quote_and_summarise() {
    let service = QuoteService::default();

    let near_singular = r#"{
        "businessType": "RETAIL",
        "monthlyCardVolume": 1000000,
        "taxRatePercent": "-99.99999999999999999999",
        "priceAdjustmentPercent": 1000,
        "currentRatePercent": 2
    }"#;
    let quote = service.quote_json(near_singular).unwrap();
    assert_eq!(quote.result.volume().base_pre_tax_pre_tip, Decimal::ZERO);
    assert_eq!(quote.summary().net_gain_monthly, "$20,000.00");

    let tiny_current_cost = r#"{
        "monthlyCardVolume": 1,
        "priceAdjustmentPercent": 10000,
        "currentRatePercent": "0.000000000000000000000001"
    }"#;
    let quote = service.quote_json(tiny_current_cost).unwrap();
    assert!(quote.result.savings().processing_cost_savings_percent > dec!(1000000000000000000000000000));
    assert_eq!(quote.summary().savings_percent, "0.00%");
}
