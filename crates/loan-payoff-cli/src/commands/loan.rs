use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, warn};

use loan_payoff_core::amortization::payment::{self, PaymentInput};
use loan_payoff_core::amortization::schedule::{self, ScheduleParams};
use loan_payoff_core::amortization::PaymentFrequency;
use loan_payoff_core::payoff::{simulator, summary, LoanParameters};

use crate::input;

/// Arguments describing a loan and any extra payments against it
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance
    #[arg(long, alias = "principal")]
    pub balance: Option<Decimal>,

    /// Nominal annual rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Scheduled payment per period
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Derive the payment from a term instead of --payment
    #[arg(long)]
    pub term_months: Option<u32>,

    /// weekly, biweekly, monthly, quarterly or yearly (unknown values mean monthly)
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,

    /// First payment date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Recurring extra payment, quoted per month
    #[arg(long, default_value = "0")]
    pub extra_monthly: Decimal,

    /// One-time lump sum payment
    #[arg(long, default_value = "0")]
    pub one_time: Decimal,

    /// Date on or after which the lump sum is applied, YYYY-MM-DD
    #[arg(long)]
    pub one_time_date: Option<NaiveDate>,
}

/// Arguments for the payment calculator
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent (5 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Payment cadence
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Only keep the first N rows of the schedule in the output
    #[arg(long)]
    pub rows: Option<usize>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build loan parameters from individual flags.
fn loan_from_flags(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let balance = args
        .balance
        .ok_or("--balance is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;

    let payment_amount = match (args.payment, args.term_months) {
        (Some(p), _) => p,
        (None, Some(term)) => {
            let derived = payment::periodic_payment(balance, rate, term, args.frequency)?;
            debug!(%derived, term, "derived payment from term");
            derived
        }
        (None, None) => return Err("--payment or --term-months is required".into()),
    };

    Ok(LoanParameters {
        current_balance: balance,
        annual_rate_percent: rate,
        payment_amount,
        frequency: args.frequency,
        start_date: args.start_date.unwrap_or_else(today),
        extra_periodic_payment: args.extra_monthly,
        one_time_payment: args.one_time,
        one_time_payment_date: args.one_time_date,
    })
}

fn load_loan(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    match input::load::<LoanParameters>(args.input.as_deref())? {
        Some(params) => Ok(params),
        None => loan_from_flags(args),
    }
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: PaymentInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PaymentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            frequency: args.frequency,
        },
    };

    let result = payment::calculate_payment(&payment_input)?;
    info!(payment = %result.result.payment, "level payment computed");
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params: ScheduleParams = match input::load(args.loan.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let loan = loan_from_flags(&args.loan)?;
            loan.accelerated_schedule()
        }
    };

    let mut result = schedule::build_schedule(&params)?;
    info!(
        periods = result.result.number_of_payments,
        payoff = %result.result.payoff_date,
        "schedule generated"
    );
    if !result.result.converged {
        warn!(
            balance = %result.result.final_balance,
            "schedule did not retire the loan"
        );
    }
    if let Some(limit) = args.rows {
        result.result.schedule.rows.truncate(limit);
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_payoff(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_loan(&args)?;
    debug!(?params, "running payoff simulation");

    let result = simulator::run_payoff_simulation(&params)?;
    info!(
        interest_saved = %result.result.interest_saved,
        periods_saved = result.result.periods_saved,
        "payoff simulation complete"
    );
    if !result.result.baseline_converged {
        warn!("baseline schedule did not retire the loan");
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_loan(&args)?;
    debug!(?params, "summarising loan");

    let result = summary::summarize_loan(&params)?;
    info!(
        periods = result.result.number_of_payments,
        total_interest = %result.result.total_interest,
        "loan summary complete"
    );
    if !result.result.converged {
        warn!("loan does not pay off within the period cap");
    }
    Ok(serde_json::to_value(result)?)
}
