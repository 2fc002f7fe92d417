//! Amortization engine: payment cadence, level payments, period-by-period
//! schedules and the metrics derived from them.

pub mod frequency;
pub mod metrics;
pub mod payment;
pub mod rates;
pub mod schedule;
pub mod sufficiency;

pub use frequency::{payments_per_year, PaymentFrequency};
pub use schedule::{generate_schedule, AmortizationRow, AmortizationSchedule, ScheduleParams};
