//! Period-by-period amortization schedule with recurring and one-time extra
//! payments.
//!
//! The generator is a single forward pass: each period accrues interest on
//! the running balance, applies the scheduled payment plus any extra, and
//! records a cent-rounded snapshot. It never fails. A payment that cannot
//! retire the loan runs until the period cap and leaves a positive balance,
//! which callers inspect through [`AmortizationSchedule::is_paid_off`] and
//! [`AmortizationSchedule::final_balance`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::frequency::PaymentFrequency;
use super::metrics;
use super::sufficiency::is_payment_sufficient;
use crate::error::LoanPayoffError;
use crate::types::*;
use crate::LoanPayoffResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard cap on schedule length (100 years of monthly payments).
pub const MAX_PERIODS: u32 = 1200;

/// Balance at or below which the loan is considered fully paid.
pub const PAYOFF_THRESHOLD: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs to the schedule generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Outstanding balance at `start_date`
    pub balance: Money,
    /// Nominal annual rate in percent (5 = 5%)
    pub annual_rate_percent: Percent,
    /// Scheduled payment per period at `frequency`
    pub periodic_payment: Money,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Date of the first payment
    pub start_date: NaiveDate,
    /// Recurring extra, always quoted per month
    #[serde(default)]
    pub extra_monthly_payment: Money,
    #[serde(default)]
    pub one_time_payment: Money,
    /// First payment date on or after which the one-time payment is applied.
    /// Absent means the first period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_payment_date: Option<NaiveDate>,
}

/// One period of the schedule. Monetary fields are rounded to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub payment_number: u32,
    pub date: NaiveDate,
    /// Total paid this period, extra included
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub extra_payment_applied: Money,
    pub remaining_balance: Money,
}

/// Chronological schedule; `payment_number` runs 1..=len without gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    /// Period in which the one-time payment landed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_payment_period: Option<u32>,
    /// Set only when the loop ended because the balance cleared
    #[serde(default)]
    pub paid_off: bool,
    /// Balance outstanding when generation stopped, rounded to the cent
    #[serde(default)]
    pub closing_balance: Money,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationRow> {
        self.rows.iter()
    }

    pub fn last(&self) -> Option<&AmortizationRow> {
        self.rows.last()
    }

    /// Balance still owed when generation stopped. Zero once paid off; the
    /// full starting balance if the first period could not be computed.
    pub fn final_balance(&self) -> Money {
        self.closing_balance
    }

    /// True when the schedule ended because the balance cleared, false when
    /// it was cut off by the period cap or by decimal overflow.
    pub fn is_paid_off(&self) -> bool {
        self.paid_off
    }

    pub fn hit_period_cap(&self) -> bool {
        self.rows.len() >= MAX_PERIODS as usize
    }

    /// Date of the last payment, or `fallback` for an empty schedule.
    pub fn payoff_date(&self, fallback: NaiveDate) -> NaiveDate {
        self.last().map(|r| r.date).unwrap_or(fallback)
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationRow;
    type IntoIter = std::slice::Iter<'a, AmortizationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl ScheduleParams {
    pub fn validate(&self) -> LoanPayoffResult<()> {
        if self.balance <= Decimal::ZERO {
            return Err(LoanPayoffError::invalid("balance", "Balance must be positive"));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if self.periodic_payment <= Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "periodic_payment",
                "Payment must be positive",
            ));
        }
        if self.extra_monthly_payment < Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "extra_monthly_payment",
                "Extra payment cannot be negative",
            ));
        }
        if self.one_time_payment < Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "one_time_payment",
                "One-time payment cannot be negative",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Convert a per-month extra into the equivalent per-period amount.
pub fn recurring_extra_per_period(extra_monthly: Money, frequency: PaymentFrequency) -> Money {
    if frequency == PaymentFrequency::Monthly {
        extra_monthly
    } else {
        extra_monthly.saturating_mul(dec!(12)) / Decimal::from(frequency.payments_per_year())
    }
}

/// Unrounded result of one period.
struct PeriodOutcome {
    interest: Decimal,
    payment: Decimal,
    principal: Decimal,
    extra: Decimal,
    balance: Decimal,
}

/// Advance one period. `None` when the balance has outgrown decimal range.
fn settle_period(
    balance: Decimal,
    periodic_rate: Rate,
    scheduled: Money,
    extra: Money,
) -> Option<PeriodOutcome> {
    let interest = balance.checked_mul(periodic_rate)?;
    let amount_due = balance.checked_add(interest)?;

    let mut extra = extra;
    // A saturated sum is never below the amount due, so the clamp still holds
    let mut payment = scheduled.saturating_add(extra);
    if payment > amount_due {
        payment = amount_due;
        extra = (payment - scheduled).max(Decimal::ZERO);
    }

    let mut principal = payment - interest;
    let mut remaining = balance.checked_sub(principal)?.max(Decimal::ZERO);

    // Sub-cent dust left by rounded payments is folded into this payment.
    // The extra component is left as is.
    if remaining > Decimal::ZERO && remaining <= PAYOFF_THRESHOLD {
        principal = principal.checked_add(remaining)?;
        payment = payment.checked_add(remaining)?;
        remaining = Decimal::ZERO;
    }

    Some(PeriodOutcome {
        interest,
        payment,
        principal,
        extra,
        balance: remaining,
    })
}

/// Generate the amortization schedule.
///
/// Terminates when the balance falls to 0.01 or below, after
/// [`MAX_PERIODS`] periods, or early if a divergent balance leaves decimal
/// range. Only the first exit marks the schedule paid off; the other two
/// leave a positive `closing_balance`, even when no row was produced.
pub fn generate_schedule(params: &ScheduleParams) -> AmortizationSchedule {
    let k = params.frequency.payments_per_year();
    let periodic_rate = params.annual_rate_percent / dec!(100) / Decimal::from(k);
    let recurring_extra = recurring_extra_per_period(params.extra_monthly_payment, params.frequency);

    let mut rows: Vec<AmortizationRow> = Vec::new();
    let mut balance = params.balance;
    let mut one_time_pending = params.one_time_payment > Decimal::ZERO;
    let mut one_time_payment_period = None;
    let mut index: u32 = 0;

    while balance > PAYOFF_THRESHOLD && index < MAX_PERIODS {
        let Some(date) = params.frequency.date_after(params.start_date, index) else {
            break;
        };

        let one_time_due = one_time_pending
            && params
                .one_time_payment_date
                .map_or(true, |target| date >= target);
        let extra = if one_time_due {
            recurring_extra.saturating_add(params.one_time_payment)
        } else {
            recurring_extra
        };

        let Some(outcome) = settle_period(balance, periodic_rate, params.periodic_payment, extra)
        else {
            break;
        };

        index += 1;
        if one_time_due {
            one_time_pending = false;
            one_time_payment_period = Some(index);
        }
        balance = outcome.balance;

        rows.push(AmortizationRow {
            payment_number: index,
            date,
            payment: round_money(outcome.payment),
            principal_portion: round_money(outcome.principal),
            interest_portion: round_money(outcome.interest),
            extra_payment_applied: round_money(outcome.extra),
            remaining_balance: round_money(outcome.balance),
        });
    }

    let paid_off = balance <= PAYOFF_THRESHOLD;
    AmortizationSchedule {
        rows,
        one_time_payment_period,
        paid_off,
        closing_balance: if paid_off {
            Decimal::ZERO
        } else {
            round_money(balance)
        },
    }
}

// ---------------------------------------------------------------------------
// Report entry point
// ---------------------------------------------------------------------------

/// Schedule plus the totals derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub number_of_payments: u32,
    pub payoff_date: NaiveDate,
    pub final_balance: Money,
    /// False when the schedule was cut off with a balance outstanding
    pub converged: bool,
    pub total_interest: Money,
    pub total_paid: Money,
    pub total_principal: Money,
    pub total_extra_paid: Money,
    pub schedule: AmortizationSchedule,
}

/// Warning text for a schedule that did not clear its balance.
pub(crate) fn non_convergence_warning(label: &str, schedule: &AmortizationSchedule) -> String {
    if schedule.hit_period_cap() {
        format!(
            "{label} schedule reached the {MAX_PERIODS}-period cap with {} still outstanding; \
             the payment never retires the loan",
            schedule.final_balance()
        )
    } else {
        format!(
            "{label} schedule stopped after {} periods with {} outstanding; \
             the balance grew beyond computable range",
            schedule.len(),
            schedule.final_balance()
        )
    }
}

/// Generate a validated schedule with totals and warnings.
pub fn build_schedule(
    params: &ScheduleParams,
) -> LoanPayoffResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;

    if !is_payment_sufficient(
        params.balance,
        params.annual_rate_percent,
        params.periodic_payment,
        params.frequency,
    ) {
        warnings.push(format!(
            "Payment of {} does not exceed first-period interest; the balance cannot decrease \
             without extra payments",
            params.periodic_payment
        ));
    }

    let schedule = generate_schedule(params);

    let converged = schedule.is_paid_off();
    if !converged {
        warnings.push(non_convergence_warning("Amortization", &schedule));
    }
    if params.one_time_payment > Decimal::ZERO && schedule.one_time_payment_period.is_none() {
        warnings.push(
            "One-time payment was never applied: its date falls after the loan is paid off".into(),
        );
    }

    let output = ScheduleOutput {
        number_of_payments: schedule.len() as u32,
        payoff_date: schedule.payoff_date(params.start_date),
        final_balance: schedule.final_balance(),
        converged,
        total_interest: metrics::total_interest(&schedule),
        total_paid: metrics::total_paid(&schedule),
        total_principal: metrics::total_principal(&schedule),
        total_extra_paid: metrics::total_extra_paid(&schedule),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Iterative amortization (per-period cent rounding)",
        &serde_json::json!({
            "balance": params.balance.to_string(),
            "annual_rate_percent": params.annual_rate_percent.to_string(),
            "periodic_payment": params.periodic_payment.to_string(),
            "frequency": params.frequency,
            "start_date": params.start_date,
            "extra_monthly_payment": params.extra_monthly_payment.to_string(),
            "one_time_payment": params.one_time_payment.to_string(),
            "one_time_payment_date": params.one_time_payment_date,
            "max_periods": MAX_PERIODS,
        }),
        warnings,
        elapsed,
        output,
    ))
}
