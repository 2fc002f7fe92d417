use serde_json::Value;

use super::{format_scalar, result_object};

/// Headline fields, most specific first. The first one present wins.
const PRIORITY_KEYS: [&str; 6] = [
    "interest_saved",
    "payment",
    "effective_annual_rate_percent",
    "is_sufficient",
    "payoff_date",
    "total_interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let Some(result) = result_object(value) else {
        println!("{}", format_scalar(value));
        return;
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = result.get(key).filter(|v| !v.is_null()) {
            println!("{}", format_scalar(val));
            return;
        }
    }

    if let Some((key, val)) = result.iter().next() {
        println!("{}: {}", key, format_scalar(val));
    }
}
