pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use valeri_core::projection::ScenarioResult;
use valeri_core::scenarios::ProjectAnalysis;

/// What a command's `result` holds, recovered from its JSON form.
pub(crate) enum ResultShape {
    Analysis(Box<ProjectAnalysis>),
    Schedule(Box<ScenarioResult>),
    Other,
}

/// Classify the `result` section of an envelope so formatters can render
/// typed data instead of raw JSON.
pub(crate) fn classify(result: &Value) -> ResultShape {
    if result.get("cases").is_some() {
        if let Ok(analysis) = serde_json::from_value::<ProjectAnalysis>(result.clone()) {
            return ResultShape::Analysis(Box::new(analysis));
        }
    }
    if result.get("cashFlows").is_some() {
        if let Ok(schedule) = serde_json::from_value::<ScenarioResult>(result.clone()) {
            return ResultShape::Schedule(Box::new(schedule));
        }
    }
    ResultShape::Other
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
