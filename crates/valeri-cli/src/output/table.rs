use serde_json::Value;
use tabled::{builder::Builder, Table};

use valeri_core::projection::ScenarioResult;
use valeri_core::scenarios::ProjectAnalysis;
use valeri_core::{Currency, ScenarioCase};

use crate::format;
use crate::output::{classify, ResultShape};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                match classify(result) {
                    ResultShape::Analysis(analysis) => print_analysis(&analysis),
                    ResultShape::Schedule(schedule) => {
                        print_schedule_summary(&schedule);
                        print_cash_flows(&schedule);
                    }
                    ResultShape::Other => print_flat_object(result),
                }
                print_envelope_notes(map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{value}");
        }
    }
}

/// Scenario summary followed by the likely case's schedule.
fn print_analysis(analysis: &ProjectAnalysis) {
    let currency = analysis.inputs.currency;
    let mut builder = Builder::default();
    builder.push_record(["Scenario", "WACC", "NPV", "Payback"]);
    for (case, result) in analysis.cases.iter() {
        builder.push_record([
            case.name().to_string(),
            format::percent(result.discount_rate),
            format::currency_whole(result.net_present_value, currency),
            format::payback(result.payback_period_years, result.lifetime()),
        ]);
    }
    println!("{}", Table::from(builder));

    println!("\nCash flows ({} case):", ScenarioCase::Likely);
    print_cash_flows(analysis.case(ScenarioCase::Likely));
}

fn print_schedule_summary(result: &ScenarioResult) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Discount rate".to_string(), format::percent(result.discount_rate)]);
    builder.push_record([
        "NPV".to_string(),
        format::currency_whole(result.net_present_value, Currency::default()),
    ]);
    builder.push_record([
        "Payback".to_string(),
        format::payback(result.payback_period_years, result.lifetime()),
    ]);
    println!("{}", Table::from(builder));
}

fn print_cash_flows(result: &ScenarioResult) {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Energy Price", "Cash Flow", "Discounted", "Cumulative"]);
    for row in &result.cash_flows {
        builder.push_record([
            row.year.to_string(),
            format::fixed(row.price, 4),
            format::fixed(row.nominal, 2),
            format::fixed(row.discounted, 2),
            format::fixed(row.cumulative, 2),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", format_value(value));
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
