use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{PaymentFrequency, ScheduleParams};
use crate::error::LoanPayoffError;
use crate::types::{Money, Percent};
use crate::LoanPayoffResult;

/// A stored loan record plus the acceleration the borrower is considering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    pub current_balance: Money,
    /// Nominal annual rate in percent (5 = 5%)
    pub annual_rate_percent: Percent,
    /// Scheduled payment per period at `frequency`
    pub payment_amount: Money,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    /// Recurring extra, quoted per month whatever the cadence
    #[serde(default)]
    pub extra_periodic_payment: Money,
    #[serde(default)]
    pub one_time_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn validate(&self) -> LoanPayoffResult<()> {
        if self.current_balance <= Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "current_balance",
                "Balance must be positive",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if self.payment_amount <= Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "payment_amount",
                "Payment must be positive",
            ));
        }
        if self.extra_periodic_payment < Decimal::ZERO {
            return Err(LoanPayoffError::invalid(
                "extra_periodic_payment",
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

    pub fn has_acceleration(&self) -> bool {
        self.extra_periodic_payment > Decimal::ZERO || self.one_time_payment > Decimal::ZERO
    }

    /// Schedule inputs with every extra payment stripped.
    pub fn baseline_schedule(&self) -> ScheduleParams {
        ScheduleParams {
            balance: self.current_balance,
            annual_rate_percent: self.annual_rate_percent,
            periodic_payment: self.payment_amount,
            frequency: self.frequency,
            start_date: self.start_date,
            extra_monthly_payment: Decimal::ZERO,
            one_time_payment: Decimal::ZERO,
            one_time_payment_date: None,
        }
    }

    /// Schedule inputs including the recurring and one-time extras.
    pub fn accelerated_schedule(&self) -> ScheduleParams {
        ScheduleParams {
            extra_monthly_payment: self.extra_periodic_payment,
            one_time_payment: self.one_time_payment,
            one_time_payment_date: self.one_time_payment_date,
            ..self.baseline_schedule()
        }
    }
}
