mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;

use commands::loan::{LoanArgs, PaymentArgs, ScheduleArgs};
use commands::rates::{EffectiveRateArgs, SufficiencyArgs};

/// Loan amortization schedules and payoff simulations
#[derive(Parser)]
#[command(
    name = "loanpay",
    version,
    about = "Loan amortization schedules and payoff simulations",
    long_about = "A CLI for amortizing household loans with decimal precision. \
                  Computes level payments, period-by-period schedules, the effect \
                  of extra and one-time payments, effective annual rates, and \
                  whether a payment can ever retire the loan."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true, env = "LOANPAY_OUTPUT")]
    output: OutputFormat,

    /// Log debug detail to stderr (LOANPAY_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Level payment for a principal, rate and term
    Payment(PaymentArgs),
    /// Period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Compare payoff with and without extra payments
    Payoff(LoanArgs),
    /// Cost, payoff date and viability of a loan as configured
    Summary(LoanArgs),
    /// Effective annual rate for a nominal rate and cadence
    EffectiveRate(EffectiveRateArgs),
    /// Check whether a payment exceeds one period of interest
    Sufficiency(SufficiencyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(output = ?cli.output, "parsed command line");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Payoff(args) => commands::loan::run_payoff(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::EffectiveRate(args) => commands::rates::run_effective_rate(args),
        Commands::Sufficiency(args) => commands::rates::run_sufficiency(args),
        Commands::Version => {
            println!("loanpay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
