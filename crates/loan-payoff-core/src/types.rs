use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%), e.g. a periodic rate.
pub type Rate = Decimal;

/// Rates expressed as percentages (5 = 5%), as loan records store them.
pub type Percent = Decimal;

/// Number of decimal places kept on every computed monetary field.
pub const MONEY_DP: u32 = 2;

/// Round to the cent, half-up. Applied per computed field, not only to totals.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal places kept on reported percentages.
pub const PERCENT_DP: u32 = 2;

/// Round a percentage to two places, half-up.
pub fn round_percent(value: Percent) -> Percent {
    value.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.0049)), dec!(1.00));
        assert_eq!(round_money(dec!(536.821623)), dec!(536.82));
        assert_eq!(round_percent(dec!(5.116189788)), dec!(5.12));
        assert_eq!(round_percent(dec!(12.675)), dec!(12.68));
    }

    #[test]
    fn test_envelope_carries_warnings() {
        let out = with_metadata(
            "Test",
            &serde_json::json!({ "k": 1 }),
            vec!["careful".into()],
            7,
            dec!(1.5),
        );
        assert_eq!(out.warnings, vec!["careful".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.assumptions["k"], 1);
    }
}
