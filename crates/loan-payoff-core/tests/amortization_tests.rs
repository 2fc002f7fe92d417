use chrono::NaiveDate;
use loan_payoff_core::amortization::metrics::{total_interest, total_paid};
use loan_payoff_core::amortization::payment::monthly_payment;
use loan_payoff_core::amortization::schedule::{MAX_PERIODS, PAYOFF_THRESHOLD};
use loan_payoff_core::amortization::sufficiency::is_payment_sufficient;
use loan_payoff_core::amortization::{generate_schedule, PaymentFrequency, ScheduleParams};
use loan_payoff_core::LoanPayoffError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn mortgage(payment: Decimal) -> ScheduleParams {
    ScheduleParams {
        balance: dec!(100000),
        annual_rate_percent: dec!(5),
        periodic_payment: payment,
        frequency: PaymentFrequency::Monthly,
        start_date: start(),
        extra_monthly_payment: Decimal::ZERO,
        one_time_payment: Decimal::ZERO,
        one_time_payment_date: None,
    }
}

// ===========================================================================
// Payment calculator
// ===========================================================================

#[test]
fn test_monthly_payment_known_answer() {
    let payment = monthly_payment(dec!(100000), dec!(5), 360).unwrap();
    assert_eq!(payment, dec!(536.82));
}

#[test]
fn test_monthly_payment_invalid_term() {
    let err = monthly_payment(dec!(100000), dec!(5), 0).unwrap_err();
    assert!(matches!(err, LoanPayoffError::InvalidInput { .. }));
}

// ===========================================================================
// Schedule generator: reference scenario
// ===========================================================================

#[test]
fn test_thirty_year_schedule_pays_off() {
    let payment = monthly_payment(dec!(100000), dec!(5), 360).unwrap();
    let schedule = generate_schedule(&mortgage(payment));

    // 536.82 is just under the exact level payment (536.8216...), so 360
    // payments leave 1.35 of principal that clears in a short 361st period.
    assert_eq!(schedule.len(), 361);
    for row in schedule.rows.iter().take(360) {
        assert_eq!(row.payment, dec!(536.82));
    }
    let residual = schedule.last().unwrap();
    assert_eq!(residual.payment_number, 361);
    assert_eq!(residual.payment, dec!(1.36));
    assert_eq!(residual.principal_portion, dec!(1.35));
    assert_eq!(residual.interest_portion, dec!(0.01));
    assert_eq!(residual.remaining_balance, Decimal::ZERO);
    assert!(schedule.is_paid_off());
    assert_eq!(schedule.final_balance(), Decimal::ZERO);

    let interest = total_interest(&schedule);
    assert_eq!(interest, dec!(93256.56));
    assert!((total_paid(&schedule) - (dec!(100000) + interest)).abs() < dec!(1));
}

#[test]
fn test_extra_monthly_payment_shortens_schedule() {
    let payment = monthly_payment(dec!(100000), dec!(5), 360).unwrap();
    let baseline = generate_schedule(&mortgage(payment));

    let mut params = mortgage(payment);
    params.extra_monthly_payment = dec!(200);
    let accelerated = generate_schedule(&params);

    assert!(accelerated.len() < 360);
    assert!(accelerated.is_paid_off());
    assert!(total_interest(&accelerated) < total_interest(&baseline));
    assert_eq!(accelerated.rows[0].extra_payment_applied, dec!(200));
    assert_eq!(accelerated.rows[0].payment, dec!(736.82));
}

// ===========================================================================
// Testable properties
// ===========================================================================

#[test]
fn test_balance_is_monotonic_and_ends_at_zero() {
    let mut params = mortgage(dec!(536.82));
    params.extra_monthly_payment = dec!(75);
    params.one_time_payment = dec!(3000);
    params.one_time_payment_date = NaiveDate::from_ymd_opt(2026, 6, 15);
    let schedule = generate_schedule(&params);

    let mut previous = params.balance;
    for row in &schedule {
        assert!(row.remaining_balance <= previous);
        assert!(row.remaining_balance >= Decimal::ZERO);
        previous = row.remaining_balance;
    }
    assert_eq!(previous, Decimal::ZERO);
    // Only the final row reaches zero
    let zeros = schedule
        .iter()
        .filter(|r| r.remaining_balance.is_zero())
        .count();
    assert_eq!(zeros, 1);
}

#[test]
fn test_zero_rate_is_straight_line() {
    let params = ScheduleParams {
        balance: dec!(10000),
        annual_rate_percent: Decimal::ZERO,
        periodic_payment: dec!(300),
        frequency: PaymentFrequency::Monthly,
        start_date: start(),
        extra_monthly_payment: Decimal::ZERO,
        one_time_payment: Decimal::ZERO,
        one_time_payment_date: None,
    };
    let schedule = generate_schedule(&params);

    assert_eq!(schedule.len(), 34);
    for row in &schedule {
        assert_eq!(row.interest_portion, Decimal::ZERO);
        assert_eq!(row.principal_portion, row.payment);
    }
    assert_eq!(schedule.last().unwrap().payment, dec!(100));
    assert_eq!(total_interest(&schedule), Decimal::ZERO);
    assert_eq!(total_paid(&schedule), dec!(10000));
}

#[test]
fn test_schedule_never_exceeds_cap() {
    for frequency in PaymentFrequency::ALL {
        let mut params = mortgage(dec!(1));
        params.frequency = frequency;
        let schedule = generate_schedule(&params);
        assert!(schedule.len() <= MAX_PERIODS as usize);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let mut params = mortgage(dec!(600));
    params.frequency = PaymentFrequency::Biweekly;
    params.extra_monthly_payment = dec!(40);
    params.one_time_payment = dec!(2500);
    params.one_time_payment_date = NaiveDate::from_ymd_opt(2027, 3, 10);

    let first = generate_schedule(&params);
    let second = generate_schedule(&params);
    assert_eq!(first, second);
}

#[test]
fn test_one_time_payment_applied_exactly_once() {
    let mut params = mortgage(dec!(536.82));
    params.one_time_payment = dec!(10000);
    params.one_time_payment_date = NaiveDate::from_ymd_opt(2028, 12, 1);
    let schedule = generate_schedule(&params);

    let with_lump: Vec<_> = schedule
        .iter()
        .filter(|r| r.extra_payment_applied >= dec!(10000))
        .collect();
    assert_eq!(with_lump.len(), 1);
    assert_eq!(with_lump[0].date, NaiveDate::from_ymd_opt(2028, 12, 1).unwrap());
    assert_eq!(schedule.one_time_payment_period, Some(with_lump[0].payment_number));

    let others_with_extra = schedule
        .iter()
        .filter(|r| r.payment_number != with_lump[0].payment_number)
        .filter(|r| r.extra_payment_applied > Decimal::ZERO)
        .count();
    assert_eq!(others_with_extra, 0);
}

#[test]
fn test_final_row_is_clamped_to_amount_due() {
    let mut params = mortgage(dec!(536.82));
    params.extra_monthly_payment = dec!(200);
    let schedule = generate_schedule(&params);

    let n = schedule.len();
    let previous = &schedule.rows[n - 2];
    let last = &schedule.rows[n - 1];
    let due = previous.remaining_balance + last.interest_portion;
    assert!(
        (last.payment - due).abs() <= dec!(0.01),
        "final payment {} should equal balance + interest {}",
        last.payment,
        due
    );
    assert!(last.payment < dec!(736.82));
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_row_split_reconciles() {
    let schedule = generate_schedule(&mortgage(dec!(536.82)));
    for row in &schedule {
        // Each field is rounded on its own, so allow one cent of slack
        let diff = row.payment - (row.principal_portion + row.interest_portion);
        assert!(diff.abs() <= dec!(0.01));
    }
}

// ===========================================================================
// Non-convergent loans
// ===========================================================================

#[test]
fn test_insufficient_payment_runs_to_cap() {
    let params = ScheduleParams {
        balance: dec!(100000),
        annual_rate_percent: dec!(12),
        periodic_payment: dec!(500),
        frequency: PaymentFrequency::Monthly,
        start_date: start(),
        extra_monthly_payment: Decimal::ZERO,
        one_time_payment: Decimal::ZERO,
        one_time_payment_date: None,
    };

    assert!(!is_payment_sufficient(
        params.balance,
        params.annual_rate_percent,
        params.periodic_payment,
        params.frequency
    ));

    let schedule = generate_schedule(&params);
    assert_eq!(schedule.len(), MAX_PERIODS as usize);
    assert!(schedule.hit_period_cap());
    assert!(!schedule.is_paid_off());
    assert!(schedule.final_balance() > PAYOFF_THRESHOLD);
}

// ===========================================================================
// Cadences
// ===========================================================================

#[test]
fn test_biweekly_half_payments_retire_loan_sooner() {
    let params = ScheduleParams {
        periodic_payment: dec!(268.41),
        frequency: PaymentFrequency::Biweekly,
        ..mortgage(dec!(536.82))
    };
    let schedule = generate_schedule(&params);

    assert!(schedule.is_paid_off());
    let payoff = schedule.payoff_date(start());
    assert!(payoff < NaiveDate::from_ymd_opt(2054, 1, 1).unwrap());
    assert_eq!(schedule.rows[1].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

    let monthly = generate_schedule(&mortgage(dec!(536.82)));
    assert!(total_interest(&schedule) < total_interest(&monthly));
}

#[test]
fn test_quarterly_extra_is_converted_from_monthly() {
    let params = ScheduleParams {
        periodic_payment: dec!(1700),
        frequency: PaymentFrequency::Quarterly,
        extra_monthly_payment: dec!(100),
        ..mortgage(dec!(1700))
    };
    let schedule = generate_schedule(&params);
    assert_eq!(schedule.rows[0].extra_payment_applied, dec!(300));
    assert_eq!(schedule.rows[1].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
}
