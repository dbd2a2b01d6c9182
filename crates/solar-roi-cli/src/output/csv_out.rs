use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Arrays of objects become one CSV with headers from the first row; a
/// result object falls back to two-column field/value rows. Estimates pick
/// the financing table, which is the part people pull into spreadsheets.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            // Prefer the main tabular section of the result when present
            let tabular = ["financing", "series", "incentives"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_array));
            match tabular {
                Some(rows) => write_rows(&mut wtr, rows),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in map {
                        if !val.is_array() && !val.is_object() {
                            let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
                        }
                    }
                }
            }
        }
        other => {
            let _ = wtr.write_record([&csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&csv_value(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
