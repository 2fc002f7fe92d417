use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_object, table_rows};

/// Field/value table for scalar results, then one columnar table per
/// schedule or comparison list, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(result) = result_object(value) else {
        println!("{}", format_scalar(value));
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();
    for (key, val) in result {
        match table_rows(val) {
            Some(rows) => nested.push((key, rows)),
            None => builder.push_record([key.as_str(), &format_scalar(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, rows) in nested {
        println!("\n{}:", key);
        print_rows(rows);
    }

    if let Some(envelope) = value.as_object() {
        print_footer(envelope);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(format_scalar).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_footer(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
