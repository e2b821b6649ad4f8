use crate::coerce::{self, MAX_AMOUNT, MAX_PERCENT};
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// One hardware item on the quote (terminal, printer, cash drawer...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareLine {
    pub description: String,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub unit_price: Decimal,
}

impl HardwareLine {
    /// Quantity times unit price in cents; negative or out-of-range parts count as zero.
    pub fn line_total(&self) -> Decimal {
        let quantity = coerce::bounded(self.quantity, MAX_AMOUNT).max(Decimal::ZERO);
        let unit_price = coerce::bounded(self.unit_price, MAX_AMOUNT).max(Decimal::ZERO);
        coerce::bounded(quantity * unit_price, MAX_AMOUNT)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// The one-time hardware and setup spend a merchant takes on with the switch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Investment {
    pub hardware: Vec<HardwareLine>,
    /// Software setup, installation, shipping and other upfront costs.
    #[serde(deserialize_with = "coerce::lenient_decimal")]
    pub additional_costs: Decimal,
}

impl Investment {
    pub fn hardware_total(&self) -> Decimal {
        self.hardware
            .iter()
            .map(HardwareLine::line_total)
            .fold(Decimal::ZERO, |acc, line| coerce::bounded(acc + line, MAX_AMOUNT))
    }

    pub fn total(&self) -> Decimal {
        let additional = coerce::bounded(self.additional_costs, MAX_AMOUNT).max(Decimal::ZERO);
        coerce::bounded(self.hardware_total() + additional, MAX_AMOUNT)
    }
}

/// Asks for a merchant credit computation alongside the savings quote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditRequest {
    pub investment: Investment,
    /// Share of the projected processing margin returned to the merchant,
    /// as a percent number. Falls back to the engine default.
    #[serde(
        deserialize_with = "coerce::lenient_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_share_percent: Option<Decimal>,
    #[serde(
        deserialize_with = "coerce::lenient_optional_months",
        skip_serializing_if = "Option::is_none"
    )]
    pub payback_window_months: Option<u32>,
}

impl CreditRequest {
    pub fn profit_share_percent(&self) -> Option<Decimal> {
        coerce::bounded_opt(self.profit_share_percent, MAX_PERCENT)
    }
}

/// Credit and payback figures appended to a savings quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAndRoi {
    pub hardware_total: Decimal,
    pub investment_total: Decimal,
    pub merchant_credit_amount: Decimal,
    pub total_investment_after_credit: Decimal,
    /// Months until savings repay the remaining investment; `None` when the
    /// quote saves nothing.
    pub payback_months: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(quantity: Decimal, unit_price: Decimal) -> HardwareLine {
        HardwareLine {
            description: "terminal".into(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_investment_total() {
        let investment = Investment {
            hardware: vec![line(dec!(2), dec!(499.995)), line(dec!(1), dec!(129))],
            additional_costs: dec!(250),
        };
        assert_eq!(investment.hardware_total(), dec!(1128.99));
        assert_eq!(investment.total(), dec!(1378.99));
    }

    #[test]
    fn test_negative_parts_count_as_zero() {
        let investment = Investment {
            hardware: vec![line(dec!(-3), dec!(100)), line(dec!(1), dec!(-50))],
            additional_costs: dec!(-10),
        };
        assert_eq!(investment.total(), Decimal::ZERO);
    }
}
