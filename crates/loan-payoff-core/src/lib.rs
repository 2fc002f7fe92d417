pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "payoff")]
pub mod payoff;

pub use error::LoanPayoffError;
pub use types::*;

/// Standard result type for all loan-payoff operations
pub type LoanPayoffResult<T> = Result<T, LoanPayoffError>;
