use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanPayoffError;
use crate::types::{Money, Rate};
use crate::LoanPayoffResult;

/// Compound growth factor `(1 + rate)^periods`.
pub fn compound_factor(rate: Rate, periods: u32) -> LoanPayoffResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| LoanPayoffError::ArithmeticOverflow {
            context: format!("compound factor over {periods} periods"),
        })
}

/// Level payment (PMT) that retires `principal` over `nper` periods at
/// `rate` per period. Returned as a positive amount, unrounded.
pub fn pmt(rate: Rate, nper: u32, principal: Money) -> LoanPayoffResult<Money> {
    if nper == 0 {
        return Err(LoanPayoffError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(LoanPayoffError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| LoanPayoffError::ArithmeticOverflow {
            context: "PMT numerator".into(),
        })?;

    Ok(numerator / denominator)
}

/// Annualised rate after compounding a periodic rate `periods_per_year` times.
pub fn effective_rate(periodic_rate: Rate, periods_per_year: u32) -> LoanPayoffResult<Rate> {
    Ok(compound_factor(periodic_rate, periods_per_year)? - Decimal::ONE)
}
