use serde_json::Value;
use std::io;

use valeri_core::projection::ScenarioResult;

use crate::output::{classify, ResultShape};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout. Values are written unrounded.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => match classify(result) {
                ResultShape::Analysis(analysis) => {
                    let _ = wtr.write_record(["case", "discount_rate", "net_present_value", "payback_period_years"]);
                    for (case, result) in analysis.cases.iter() {
                        let payback = result
                            .payback_period_years
                            .map(|p| p.to_string())
                            .unwrap_or_default();
                        let _ = wtr.write_record([
                            case.name().to_string(),
                            result.discount_rate.to_string(),
                            result.net_present_value.to_string(),
                            payback,
                        ]);
                    }
                }
                ResultShape::Schedule(schedule) => write_schedule(&mut wtr, &schedule),
                ResultShape::Other => write_fields(&mut wtr, result),
            },
            None => write_fields(&mut wtr, value),
        },
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_schedule(wtr: &mut StdoutWriter<'_>, schedule: &ScenarioResult) {
    let _ = wtr.write_record(["year", "price", "nominal", "discounted", "cumulative"]);
    for row in &schedule.cash_flows {
        let _ = wtr.write_record([
            row.year.to_string(),
            row.price.to_string(),
            row.nominal.to_string(),
            row.discounted.to_string(),
            row.cumulative.to_string(),
        ]);
    }
}

/// Two-column CSV: field, value
fn write_fields(wtr: &mut StdoutWriter<'_>, value: &Value) {
    let _ = wtr.write_record(["field", "value"]);
    if let Value::Object(map) = value {
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record(["value", &format_csv_value(value)]);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
