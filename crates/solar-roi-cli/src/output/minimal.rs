use serde_json::Value;

/// Print just the headline numbers.
///
/// Looks for the fields a lead actually asks about, in priority order, then
/// falls back to the first scalar in the result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "system_size_kw",
        "estimated_annual_production",
        "total_estimated_benefit",
        "net_cost_after_incentives",
        "payback_years",
        "total_benefit",
    ];

    if let Value::Object(map) = result {
        let mut printed = false;
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}: {}", key, scalar(val));
                    printed = true;
                }
            }
        }
        if printed {
            return;
        }
        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
            println!("{}: {}", key, scalar(val));
            return;
        }
    }

    if let Value::Array(rows) = result {
        for row in rows {
            if let Value::Object(map) = row {
                let line: Vec<String> = map
                    .iter()
                    .filter(|(_, v)| !v.is_array() && !v.is_object())
                    .map(|(k, v)| format!("{}={}", k, scalar(v)))
                    .collect();
                println!("{}", line.join(" "));
            } else {
                println!("{}", scalar(row));
            }
        }
        return;
    }

    println!("{}", scalar(result));
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
