use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render output as tables.
///
/// Scalar fields of the result become a Field/Value table; each array of
/// objects (financing plans, tiers, incentives, cash-flow years) gets its
/// own titled table underneath.
pub fn print_table(value: &Value) {
    let (result, envelope) = match value {
        Value::Object(map) if map.contains_key("result") => {
            (map.get("result").unwrap_or(value), Some(map))
        }
        _ => (value, None),
    };

    match result {
        Value::Object(map) => {
            print_scalar_fields(map);
            for (key, val) in map {
                if let Value::Array(rows) = val {
                    if rows.iter().any(|r| r.is_object()) {
                        println!("\n{key}:");
                        print_rows(rows);
                    }
                }
                if let Value::Object(nested) = val {
                    println!("\n{key}:");
                    print_scalar_fields(nested);
                }
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", other),
    }

    if let Some(map) = envelope {
        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    if let Value::String(s) = w {
                        println!("  - {}", s);
                    }
                }
            }
        }
        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {}", methodology);
        }
    }
}

/// Field/Value table of everything that is not an array or object.
fn print_scalar_fields(map: &serde_json::Map<String, Value>) {
    let scalars: Vec<(&str, String)> = map
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.as_str(), display_value(v)))
        .collect();
    if scalars.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalars {
        builder.push_record([key, &val]);
    }
    println!("{}", Table::from(builder));
}

/// One table for an array of uniform objects.
fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", display_value(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(display_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
