use serde_json::Value;

use crate::output::{classify, ResultShape};

/// Print just the key answer: per-case NPV for an analysis, NPV for a
/// schedule, otherwise the first well-known field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match classify(result_obj) {
        ResultShape::Analysis(analysis) => {
            for (case, result) in analysis.cases.iter() {
                println!("{case}: {}", result.net_present_value);
            }
            return;
        }
        ResultShape::Schedule(schedule) => {
            println!("{}", schedule.net_present_value);
            return;
        }
        ResultShape::Other => {}
    }

    let priority_keys = ["wacc", "netPresentValue", "paybackPeriodYears"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
