//! Whether a payment can ever reduce principal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::frequency::PaymentFrequency;
use crate::error::LoanPayoffError;
use crate::types::*;
use crate::LoanPayoffResult;

/// Input for the sufficiency check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SufficiencyInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub payment_amount: Money,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

/// Output of the sufficiency check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SufficiencyOutput {
    pub is_sufficient: bool,
    /// Interest accrued on the principal over one period
    pub period_interest: Money,
    /// Smallest cent amount that still reduces principal
    pub minimum_payment: Money,
    /// payment_amount − period_interest; negative when the balance grows
    pub principal_reduction: Money,
}

/// Interest accrued on `principal` over one period at the given cadence.
pub fn period_interest(
    principal: Money,
    annual_rate_percent: Percent,
    frequency: PaymentFrequency,
) -> Money {
    let periodic_rate =
        annual_rate_percent / dec!(100) / Decimal::from(frequency.payments_per_year());
    // Out-of-range interest can never be covered
    principal.saturating_mul(periodic_rate)
}

/// True iff `payment_amount` exceeds one period's interest on `principal`.
///
/// Necessary but not sufficient for a schedule to converge; combine with
/// `AmortizationSchedule::is_paid_off`.
pub fn is_payment_sufficient(
    principal: Money,
    annual_rate_percent: Percent,
    payment_amount: Money,
    frequency: PaymentFrequency,
) -> bool {
    payment_amount > period_interest(principal, annual_rate_percent, frequency)
}

pub fn check_payment_sufficiency(
    input: &SufficiencyInput,
) -> LoanPayoffResult<ComputationOutput<SufficiencyOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal <= Decimal::ZERO {
        return Err(LoanPayoffError::invalid("principal", "Principal must be positive"));
    }
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(LoanPayoffError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    if input.payment_amount <= Decimal::ZERO {
        return Err(LoanPayoffError::invalid(
            "payment_amount",
            "Payment must be positive",
        ));
    }

    let interest = period_interest(input.principal, input.annual_rate_percent, input.frequency);
    let is_sufficient = is_payment_sufficient(
        input.principal,
        input.annual_rate_percent,
        input.payment_amount,
        input.frequency,
    );
    let minimum_payment = round_money(interest).saturating_add(dec!(0.01));

    if !is_sufficient {
        warnings.push(format!(
            "Payment of {} leaves the balance growing by {} per period",
            input.payment_amount,
            round_money(interest - input.payment_amount)
        ));
    }

    let output = SufficiencyOutput {
        is_sufficient,
        period_interest: round_money(interest),
        minimum_payment,
        principal_reduction: round_money(input.payment_amount - interest),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Payment sufficiency (payment > one period of interest)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "payment_amount": input.payment_amount.to_string(),
            "frequency": input.frequency,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_payment() {
        // 100k at 12%: 1000 a month in interest
        assert!(!is_payment_sufficient(
            dec!(100000),
            dec!(12),
            dec!(500),
            PaymentFrequency::Monthly
        ));
    }

    #[test]
    fn test_payment_equal_to_interest_is_insufficient() {
        assert!(!is_payment_sufficient(
            dec!(100000),
            dec!(12),
            dec!(1000),
            PaymentFrequency::Monthly
        ));
        assert!(is_payment_sufficient(
            dec!(100000),
            dec!(12),
            dec!(1000.01),
            PaymentFrequency::Monthly
        ));
    }

    #[test]
    fn test_cadence_changes_period_interest() {
        // Yearly interest on 100k at 12% is 12k
        assert!(!is_payment_sufficient(
            dec!(100000),
            dec!(12),
            dec!(5000),
            PaymentFrequency::Yearly
        ));
        assert!(is_payment_sufficient(
            dec!(100000),
            dec!(12),
            dec!(500),
            PaymentFrequency::Weekly
        ));
    }

    #[test]
    fn test_zero_rate_any_payment_sufficient() {
        assert!(is_payment_sufficient(
            dec!(100000),
            Decimal::ZERO,
            dec!(0.01),
            PaymentFrequency::Monthly
        ));
    }

    #[test]
    fn test_out_of_range_interest_is_insufficient() {
        let principal = Decimal::MAX - dec!(1);
        assert_eq!(
            period_interest(principal, dec!(1000000), PaymentFrequency::Monthly),
            Decimal::MAX
        );
        assert!(!is_payment_sufficient(
            principal,
            dec!(1000000),
            Decimal::MAX - dec!(1),
            PaymentFrequency::Monthly
        ));
    }

    #[test]
    fn test_check_sufficiency_report() {
        let input = SufficiencyInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(12),
            payment_amount: dec!(500),
            frequency: PaymentFrequency::Monthly,
        };
        let out = check_payment_sufficiency(&input).unwrap();
        assert!(!out.result.is_sufficient);
        assert_eq!(out.result.period_interest, dec!(1000));
        assert_eq!(out.result.minimum_payment, dec!(1000.01));
        assert_eq!(out.result.principal_reduction, dec!(-500));
        assert_eq!(out.warnings.len(), 1);
    }
}
