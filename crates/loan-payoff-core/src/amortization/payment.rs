//! Closed-form level payment for a fully amortizing fixed-rate loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::frequency::PaymentFrequency;
use crate::error::LoanPayoffError;
use crate::time_value;
use crate::types::*;
use crate::LoanPayoffResult;

/// Input for the payment calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub principal: Money,
    /// Nominal annual rate in percent (5 = 5%)
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    /// Cadence of the payment; monthly when omitted
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

/// Output of the payment calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    /// Level payment per period, rounded to the cent
    pub payment: Money,
    pub frequency: PaymentFrequency,
    pub number_of_payments: u32,
    pub periodic_rate: Rate,
    /// payment × number_of_payments
    pub total_of_payments: Money,
    /// total_of_payments − principal; the schedule total differs by rounding
    pub estimated_total_interest: Money,
}

/// Number of payments needed to cover `term_months` at the given cadence.
pub fn number_of_payments(term_months: u32, frequency: PaymentFrequency) -> u32 {
    let scaled = u64::from(term_months) * u64::from(frequency.payments_per_year());
    // Half-up rounding of scaled / 12
    let periods = (scaled + 6) / 12;
    u32::try_from(periods).unwrap_or(u32::MAX).max(1)
}

/// Level monthly payment: `P × r(1+r)^n / ((1+r)^n − 1)` with
/// `r = annual_rate_percent / 100 / 12`, or `P / n` at a zero rate.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> LoanPayoffResult<Money> {
    periodic_payment(
        principal,
        annual_rate_percent,
        term_months,
        PaymentFrequency::Monthly,
    )
}

/// Level payment at any cadence for a loan running `term_months`.
pub fn periodic_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
    frequency: PaymentFrequency,
) -> LoanPayoffResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(LoanPayoffError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if term_months == 0 {
        return Err(LoanPayoffError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanPayoffError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }

    let k = frequency.payments_per_year();
    let n = number_of_payments(term_months, frequency);
    let r = annual_rate_percent / dec!(100) / Decimal::from(k);

    let payment = time_value::pmt(r, n, principal)?;
    Ok(round_money(payment))
}

/// Compute the level payment and wrap it in the standard envelope.
pub fn calculate_payment(input: &PaymentInput) -> LoanPayoffResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = periodic_payment(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
        input.frequency,
    )?;

    let k = input.frequency.payments_per_year();
    let n = number_of_payments(input.term_months, input.frequency);
    let periodic_rate = input.annual_rate_percent / dec!(100) / Decimal::from(k);
    let total_of_payments = round_money(payment * Decimal::from(n));

    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payment is straight-line principal".into());
    }
    if u64::from(n) * 12 != u64::from(input.term_months) * u64::from(k) {
        warnings.push(format!(
            "Term of {} months is not a whole number of {} periods; using {n} payments",
            input.term_months, input.frequency
        ));
    }

    let output = PaymentOutput {
        payment,
        frequency: input.frequency,
        number_of_payments: n,
        periodic_rate,
        total_of_payments,
        estimated_total_interest: total_of_payments - round_money(input.principal),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level payment (annuity formula, cent rounding half-up)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_months": input.term_months,
            "frequency": input.frequency,
        }),
        warnings,
        elapsed,
        output,
    ))
}
