use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::amortization::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_payoff_core::amortization::payment::calculate_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::amortization::ScheduleParams =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_payoff_core::amortization::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_effective_rate(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::amortization::rates::EffectiveRateInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_payoff_core::amortization::rates::calculate_effective_rate(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn check_payment_sufficiency(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::amortization::sufficiency::SufficiencyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_payoff_core::amortization::sufficiency::check_payment_sufficiency(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payoff
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_payoff(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::payoff::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_payoff_core::payoff::simulator::run_payoff_simulation(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_loan(input_json: String) -> NapiResult<String> {
    let input: loan_payoff_core::payoff::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_payoff_core::payoff::summary::summarize_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
