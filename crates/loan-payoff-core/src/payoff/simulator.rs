//! Baseline versus accelerated payoff comparison.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::params::LoanParameters;
use crate::amortization::metrics::{total_interest, total_paid};
use crate::amortization::schedule::non_convergence_warning;
use crate::amortization::{generate_schedule, AmortizationSchedule};
use crate::types::*;
use crate::LoanPayoffResult;

/// Differential impact of extra payments on a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffSimulationResult {
    pub baseline_payoff_date: NaiveDate,
    pub accelerated_payoff_date: NaiveDate,
    pub baseline_total_interest: Money,
    pub accelerated_total_interest: Money,
    /// baseline_total_interest − accelerated_total_interest
    pub interest_saved: Money,
    /// Baseline periods minus accelerated periods
    pub periods_saved: i64,
    pub baseline_periods: u32,
    pub accelerated_periods: u32,
    pub baseline_total_paid: Money,
    pub accelerated_total_paid: Money,
    pub baseline_converged: bool,
    pub accelerated_converged: bool,
    pub accelerated_schedule: AmortizationSchedule,
}

/// Run the schedule twice, without and with extras, and compare.
///
/// Never fails: both schedules terminate through the period cap at worst.
pub fn simulate_payoff(params: &LoanParameters) -> PayoffSimulationResult {
    let baseline = generate_schedule(&params.baseline_schedule());
    let accelerated = generate_schedule(&params.accelerated_schedule());
    compare(params.start_date, &baseline, accelerated)
}

fn compare(
    start_date: NaiveDate,
    baseline: &AmortizationSchedule,
    accelerated: AmortizationSchedule,
) -> PayoffSimulationResult {
    let baseline_total_interest = total_interest(baseline);
    let accelerated_total_interest = total_interest(&accelerated);

    PayoffSimulationResult {
        baseline_payoff_date: baseline.payoff_date(start_date),
        accelerated_payoff_date: accelerated.payoff_date(start_date),
        baseline_total_interest,
        accelerated_total_interest,
        interest_saved: baseline_total_interest - accelerated_total_interest,
        periods_saved: baseline.len() as i64 - accelerated.len() as i64,
        baseline_periods: baseline.len() as u32,
        accelerated_periods: accelerated.len() as u32,
        baseline_total_paid: total_paid(baseline),
        accelerated_total_paid: total_paid(&accelerated),
        baseline_converged: baseline.is_paid_off(),
        accelerated_converged: accelerated.is_paid_off(),
        accelerated_schedule: accelerated,
    }
}

/// Validate the loan, simulate the payoff and attach warnings.
pub fn run_payoff_simulation(
    params: &LoanParameters,
) -> LoanPayoffResult<ComputationOutput<PayoffSimulationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;

    let baseline = generate_schedule(&params.baseline_schedule());
    let accelerated = generate_schedule(&params.accelerated_schedule());

    if !baseline.is_paid_off() {
        warnings.push(non_convergence_warning("Baseline", &baseline));
    }
    if !accelerated.is_paid_off() {
        warnings.push(non_convergence_warning("Accelerated", &accelerated));
    }
    if !params.has_acceleration() {
        warnings.push("No extra or one-time payment supplied; schedules are identical".into());
    } else if accelerated.len() >= baseline.len() && baseline.is_paid_off() {
        warnings.push("Extra payments do not shorten the loan".into());
    }
    if params.one_time_payment > Decimal::ZERO
        && accelerated.one_time_payment_period.is_none()
    {
        warnings.push(
            "One-time payment was never applied: its date falls after the loan is paid off".into(),
        );
    }

    let result = compare(params.start_date, &baseline, accelerated);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Payoff simulation (baseline vs accelerated amortization)",
        params,
        warnings,
        elapsed,
        result,
    ))
}
