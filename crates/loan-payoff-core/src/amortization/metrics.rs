//! Reductions over a generated schedule. Totals are sums of the
//! already-rounded row fields.

use super::schedule::AmortizationSchedule;
use crate::types::Money;

/// Sum of `interest_portion` across all rows.
pub fn total_interest(schedule: &AmortizationSchedule) -> Money {
    schedule.iter().map(|r| r.interest_portion).sum()
}

/// Sum of `payment` across all rows.
pub fn total_paid(schedule: &AmortizationSchedule) -> Money {
    schedule.iter().map(|r| r.payment).sum()
}

pub fn total_principal(schedule: &AmortizationSchedule) -> Money {
    schedule.iter().map(|r| r.principal_portion).sum()
}

pub fn total_extra_paid(schedule: &AmortizationSchedule) -> Money {
    schedule.iter().map(|r| r.extra_payment_applied).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::AmortizationRow;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(n: u32, payment: Money, interest: Money, extra: Money) -> AmortizationRow {
        AmortizationRow {
            payment_number: n,
            date: NaiveDate::from_ymd_opt(2024, n, 1).unwrap(),
            payment,
            principal_portion: payment - interest,
            interest_portion: interest,
            extra_payment_applied: extra,
            remaining_balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty_schedule_totals_are_zero() {
        let schedule = AmortizationSchedule::default();
        assert_eq!(total_interest(&schedule), Decimal::ZERO);
        assert_eq!(total_paid(&schedule), Decimal::ZERO);
        assert_eq!(total_extra_paid(&schedule), Decimal::ZERO);
    }

    #[test]
    fn test_totals_sum_rows() {
        let schedule = AmortizationSchedule {
            rows: vec![
                row(1, dec!(100), dec!(10.25), dec!(0)),
                row(2, dec!(100), dec!(9.40), dec!(20)),
                row(3, dec!(45.10), dec!(0.45), dec!(0)),
            ],
            ..Default::default()
        };
        assert_eq!(total_interest(&schedule), dec!(20.10));
        assert_eq!(total_paid(&schedule), dec!(245.10));
        assert_eq!(total_principal(&schedule), dec!(225.00));
        assert_eq!(total_extra_paid(&schedule), dec!(20));
    }
}
