use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanPayoffError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanPayoffError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanPayoffError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanPayoffError {
    fn from(e: serde_json::Error) -> Self {
        LoanPayoffError::SerializationError(e.to_string())
    }
}
