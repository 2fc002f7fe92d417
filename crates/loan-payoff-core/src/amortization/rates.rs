//! Nominal to effective annual rate conversion.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::frequency::PaymentFrequency;
use crate::error::LoanPayoffError;
use crate::time_value;
use crate::types::*;
use crate::LoanPayoffResult;

/// Input for the effective rate conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateInput {
    pub nominal_rate_percent: Percent,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

/// The same nominal rate compounded at one cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceRate {
    pub frequency: PaymentFrequency,
    pub payments_per_year: u32,
    pub effective_annual_rate_percent: Percent,
}

/// Output of the effective rate conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateOutput {
    pub effective_annual_rate_percent: Percent,
    /// Rate charged per period, in percent
    pub periodic_rate_percent: Percent,
    pub payments_per_year: u32,
    /// EAR minus the nominal rate, in percentage points
    pub compounding_premium_percent: Percent,
    /// EAR at every supported cadence for comparison
    pub by_frequency: Vec<CadenceRate>,
}

/// `((1 + r)^k − 1) × 100` with `r = nominal / 100 / k`, rounded to 2 dp.
pub fn effective_annual_rate(
    nominal_rate_percent: Percent,
    frequency: PaymentFrequency,
) -> LoanPayoffResult<Percent> {
    let k = frequency.payments_per_year();
    let r = nominal_rate_percent / dec!(100) / Decimal::from(k);
    let ear = time_value::effective_rate(r, k)?;
    Ok(round_percent(ear * dec!(100)))
}

pub fn calculate_effective_rate(
    input: &EffectiveRateInput,
) -> LoanPayoffResult<ComputationOutput<EffectiveRateOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.nominal_rate_percent < Decimal::ZERO {
        return Err(LoanPayoffError::invalid(
            "nominal_rate_percent",
            "Nominal rate cannot be negative",
        ));
    }

    let ear = effective_annual_rate(input.nominal_rate_percent, input.frequency)?;
    let k = input.frequency.payments_per_year();

    let by_frequency = PaymentFrequency::ALL
        .iter()
        .map(|f| {
            Ok(CadenceRate {
                frequency: *f,
                payments_per_year: f.payments_per_year(),
                effective_annual_rate_percent: effective_annual_rate(
                    input.nominal_rate_percent,
                    *f,
                )?,
            })
        })
        .collect::<LoanPayoffResult<Vec<_>>>()?;

    let output = EffectiveRateOutput {
        effective_annual_rate_percent: ear,
        periodic_rate_percent: (input.nominal_rate_percent / Decimal::from(k)).round_dp(6),
        payments_per_year: k,
        compounding_premium_percent: ear - input.nominal_rate_percent,
        by_frequency,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Effective annual rate ((1 + r/k)^k - 1)",
        &serde_json::json!({
            "nominal_rate_percent": input.nominal_rate_percent.to_string(),
            "frequency": input.frequency,
        }),
        warnings,
        elapsed,
        output,
    ))
}
