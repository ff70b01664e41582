use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use valeri_core::capital::wacc::{calculate_wacc, WaccInput};
use valeri_core::capital::CapitalStructure;
use valeri_core::projection::{
    horizon_series, project_cash_flows, validate_horizon, validate_lifetime, ScenarioInputs,
};
use valeri_core::scenarios::{evaluate_project, ProjectAnalysis, ProjectInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Capital structure
// ---------------------------------------------------------------------------

/// Equity ratio field edited in percent; returns both ratios as fractions.
#[napi]
pub fn capital_structure_from_equity(equity_entry: String) -> NapiResult<String> {
    let cs = CapitalStructure::from_equity_entry(&equity_entry);
    serde_json::to_string(&cs).map_err(to_napi_error)
}

#[napi]
pub fn compute_wacc(input_json: String) -> NapiResult<String> {
    let input: WaccInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculate_wacc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionRequest {
    #[serde(flatten)]
    inputs: ScenarioInputs,
    discount_rate: Decimal,
    #[serde(default)]
    horizon_years: Option<u32>,
}

/// One scenario's schedule. With `horizonYears` set, the response also holds
/// the cumulative series over that horizon (`null` past the lifetime).
#[napi]
pub fn project_scenario(input_json: String) -> NapiResult<String> {
    let req: ProjectionRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validate_lifetime("projectLifetime", req.inputs.project_lifetime).map_err(to_napi_error)?;
    if let Some(h) = req.horizon_years {
        validate_horizon("horizonYears", h).map_err(to_napi_error)?;
    }
    let result = project_cash_flows(&req.inputs, req.discount_rate).map_err(to_napi_error)?;
    let horizon = req.horizon_years.map(|h| horizon_series(&result, h));
    serde_json::to_string(&serde_json::json!({
        "result": result,
        "horizon": horizon,
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Three-scenario analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate(input_json: String) -> NapiResult<String> {
    let input: ProjectInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = evaluate_project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Check a stored analysis blob before a view renders it.
#[napi]
pub fn load_analysis(blob: String) -> NapiResult<String> {
    let analysis = ProjectAnalysis::from_json(&blob).map_err(to_napi_error)?;
    analysis.to_json().map_err(to_napi_error)
}

#[napi]
pub fn default_project_input() -> NapiResult<String> {
    serde_json::to_string(&ProjectInput::default()).map_err(to_napi_error)
}
