//! Single-loan overview for a stored loan record: how long it runs, what it
//! costs, and whether its payment is viable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::params::LoanParameters;
use crate::amortization::metrics::{total_extra_paid, total_interest, total_paid};
use crate::amortization::rates::effective_annual_rate;
use crate::amortization::schedule::non_convergence_warning;
use crate::amortization::sufficiency::is_payment_sufficient;
use crate::amortization::{generate_schedule, PaymentFrequency};
use crate::types::*;
use crate::LoanPayoffResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub current_balance: Money,
    pub payment_amount: Money,
    pub frequency: PaymentFrequency,
    pub payments_per_year: u32,
    pub number_of_payments: u32,
    pub payoff_date: NaiveDate,
    pub years_to_payoff: Decimal,
    pub total_interest: Money,
    pub total_paid: Money,
    pub total_extra_paid: Money,
    pub effective_annual_rate_percent: Percent,
    pub is_payment_sufficient: bool,
    pub converged: bool,
    pub final_balance: Money,
}

/// Summarise a loan as currently configured, extras included.
pub fn summarize_loan(params: &LoanParameters) -> LoanPayoffResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;

    let schedule = generate_schedule(&params.accelerated_schedule());
    let sufficient = is_payment_sufficient(
        params.current_balance,
        params.annual_rate_percent,
        params.payment_amount,
        params.frequency,
    );
    let ear = effective_annual_rate(params.annual_rate_percent, params.frequency)?;

    if !sufficient {
        warnings.push(format!(
            "Payment of {} does not cover one period of interest",
            params.payment_amount
        ));
    }
    if !schedule.is_paid_off() {
        warnings.push(non_convergence_warning("Loan", &schedule));
    }

    let periods = schedule.len() as u32;
    let years_to_payoff =
        (Decimal::from(periods) * params.frequency.months_per_period() / dec!(12)).round_dp(2);

    let output = LoanSummary {
        current_balance: params.current_balance,
        payment_amount: params.payment_amount,
        frequency: params.frequency,
        payments_per_year: params.frequency.payments_per_year(),
        number_of_payments: periods,
        payoff_date: schedule.payoff_date(params.start_date),
        years_to_payoff,
        total_interest: total_interest(&schedule),
        total_paid: total_paid(&schedule),
        total_extra_paid: total_extra_paid(&schedule),
        effective_annual_rate_percent: ear,
        is_payment_sufficient: sufficient,
        converged: schedule.is_paid_off(),
        final_balance: schedule.final_balance(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan summary (amortization, EAR, payment sufficiency)",
        params,
        warnings,
        elapsed,
        output,
    ))
}
