use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::capital::wacc::{calculate_wacc, WaccInput};
use crate::comparison::{build_chart_series, ChartSeries};
use crate::projection::{project_cash_flows, ScenarioResult};
use crate::scenarios::project::{validate_project_input, ProjectInput};
use crate::types::{with_metadata, ComputationOutput, Rate, ScenarioCase, ScenarioSet};
use crate::ValeriResult;

/// The stored shape of a finished appraisal, read back by views that only
/// render. Serialised in camelCase; rates are fractions and decimals are
/// strings, so a JSON round trip is exact. There is no schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub inputs: ProjectInput,
    pub cases: ScenarioSet<ScenarioResult>,
    pub chart_series: ChartSeries,
}

impl ProjectAnalysis {
    pub fn to_json(&self) -> ValeriResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ValeriResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn case(&self, case: ScenarioCase) -> &ScenarioResult {
        self.cases.get(case)
    }
}

/// Discount rate for one scenario from the shared capital structure.
fn scenario_wacc(
    input: &ProjectInput,
    case: ScenarioCase,
    warnings: &mut Vec<String>,
) -> ValeriResult<Rate> {
    let params = input.scenarios.get(case);
    let wacc = calculate_wacc(&WaccInput {
        capital_structure: input.capital_structure,
        equity_cost_rate: params.equity_cost_rate,
        debt_cost_rate: params.debt_cost_rate,
    })?;
    warnings.extend(wacc.warnings.into_iter().map(|w| format!("{case}: {w}")));
    Ok(wacc.result.wacc)
}

/// Validate, discount and project a single scenario. Carries the same WACC
/// warnings for that case as [`evaluate_project`].
pub fn evaluate_scenario(
    input: &ProjectInput,
    case: ScenarioCase,
) -> ValeriResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_project_input(input)?;
    let wacc = scenario_wacc(input, case, &mut warnings)?;
    let result = project_cash_flows(&input.scenario_inputs(case), wacc)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Cash-flow schedule, {case} case"),
        &serde_json::json!({
            "case": case,
            "discount_rate": "WACC from the shared capital structure",
        }),
        warnings,
        elapsed,
        result,
    ))
}

/// Run the likely, worst and best cases and assemble the stored analysis.
///
/// Each case gets its own WACC from the shared capital structure and the
/// case's cost-of-capital rates, then an independent projection.
pub fn evaluate_project(input: &ProjectInput) -> ValeriResult<ComputationOutput<ProjectAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_project_input(input)?;

    let inputs = input.all_scenario_inputs();
    let cases = inputs.try_map(|case, scenario| {
        let wacc = scenario_wacc(input, case, &mut warnings)?;
        debug!("{case}: discounting at {wacc}");
        project_cash_flows(scenario, wacc)
    })?;

    for (case, result) in cases.iter() {
        if result.payback_period_years.is_none() {
            warnings.push(format!(
                "{case}: investment not recovered within the {}-year lifetime",
                result.lifetime()
            ));
        }
        if result.net_present_value < Decimal::ZERO {
            warnings.push(format!(
                "{case}: negative NPV ({:.2}); project destroys value at this discount rate",
                result.net_present_value
            ));
        }
    }

    let chart_series = build_chart_series(&inputs, &cases, input.display_horizon);
    let analysis = ProjectAnalysis {
        inputs: input.clone(),
        cases,
        chart_series,
    };

    info!(
        "evaluated project: npv likely={:.2} worst={:.2} best={:.2}",
        analysis.cases.likely.net_present_value,
        analysis.cases.worst.net_present_value,
        analysis.cases.best.net_present_value
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-scenario discounted cash flow appraisal",
        &serde_json::json!({
            "discounting": "end-of-year, year 0 undiscounted",
            "discount_rate": "WACC per scenario",
            "payback": "discounted, linear within crossing year",
            "display_horizon": input.display_horizon,
        }),
        warnings,
        elapsed,
        analysis,
    ))
}
