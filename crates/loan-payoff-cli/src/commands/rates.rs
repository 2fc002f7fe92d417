use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use loan_payoff_core::amortization::rates::{self, EffectiveRateInput};
use loan_payoff_core::amortization::sufficiency::{self, SufficiencyInput};
use loan_payoff_core::amortization::PaymentFrequency;

use crate::input;

/// Arguments for the effective annual rate
#[derive(Args)]
pub struct EffectiveRateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Nominal annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Compounding cadence
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,
}

/// Arguments for the payment sufficiency check
#[derive(Args)]
pub struct SufficiencyArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Proposed payment per period
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Payment cadence
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,
}

pub fn run_effective_rate(args: EffectiveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate_input: EffectiveRateInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EffectiveRateInput {
            nominal_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            frequency: args.frequency,
        },
    };

    let result = rates::calculate_effective_rate(&rate_input)?;
    info!(
        ear = %result.result.effective_annual_rate_percent,
        "effective annual rate computed"
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_sufficiency(args: SufficiencyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let check: SufficiencyInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SufficiencyInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            payment_amount: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            frequency: args.frequency,
        },
    };

    let result = sufficiency::check_payment_sufficiency(&check)?;
    info!(
        sufficient = result.result.is_sufficient,
        "payment sufficiency checked"
    );
    Ok(serde_json::to_value(result)?)
}
