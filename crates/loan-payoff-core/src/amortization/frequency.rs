//! Payment cadence and its calendar arithmetic.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How often a loan payment falls due.
///
/// Parsing is lenient: any unrecognised cadence is treated as monthly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

/// Calendar distance between two consecutive payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStep {
    Days(u32),
    Months(u32),
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        PaymentFrequency::Weekly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Yearly,
    ];

    pub fn payments_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Yearly => 1,
        }
    }

    /// Months covered by one period; fractional for weekly cadences (12/52).
    pub fn months_per_period(self) -> Decimal {
        Decimal::from(12) / Decimal::from(self.payments_per_year())
    }

    pub fn step(self) -> PeriodStep {
        match self {
            PaymentFrequency::Weekly => PeriodStep::Days(7),
            PaymentFrequency::Biweekly => PeriodStep::Days(14),
            PaymentFrequency::Monthly => PeriodStep::Months(1),
            PaymentFrequency::Quarterly => PeriodStep::Months(3),
            PaymentFrequency::Yearly => PeriodStep::Months(12),
        }
    }

    /// Date of the period `index` steps after `start` (index 0 is `start`).
    ///
    /// Always measured from `start`, so a loan starting on the 31st keeps
    /// landing on month-end instead of drifting to the 28th.
    pub fn date_after(self, start: NaiveDate, index: u32) -> Option<NaiveDate> {
        match self.step() {
            PeriodStep::Days(d) => {
                start.checked_add_days(Days::new(u64::from(d) * u64::from(index)))
            }
            PeriodStep::Months(m) => start.checked_add_months(Months::new(m.checked_mul(index)?)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Yearly => "yearly",
        }
    }
}

/// Payments per year for a cadence: weekly 52, biweekly 26, monthly 12,
/// quarterly 4, yearly 1.
pub fn payments_per_year(frequency: PaymentFrequency) -> u32 {
    frequency.payments_per_year()
}

impl From<&str> for PaymentFrequency {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => PaymentFrequency::Weekly,
            "biweekly" | "bi-weekly" | "fortnightly" => PaymentFrequency::Biweekly,
            "quarterly" => PaymentFrequency::Quarterly,
            "yearly" | "annual" | "annually" => PaymentFrequency::Yearly,
            _ => PaymentFrequency::Monthly,
        }
    }
}

impl From<String> for PaymentFrequency {
    fn from(s: String) -> Self {
        PaymentFrequency::from(s.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PaymentFrequency::from(s))
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
