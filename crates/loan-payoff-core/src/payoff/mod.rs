//! Payoff analysis over stored loan records: baseline versus accelerated
//! repayment, and the single-loan summary report.

pub mod params;
pub mod simulator;
pub mod summary;

pub use params::LoanParameters;
pub use simulator::{simulate_payoff, PayoffSimulationResult};
