use clap::Args;
use log::info;
use serde_json::{json, Value};

use valeri_core::scenarios::{evaluate_project, evaluate_scenario, ProjectAnalysis, ProjectInput};
use valeri_core::ScenarioCase;

use crate::input;

/// Arguments for a three-scenario evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON/YAML project input (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluate the built-in default project when no input is given
    #[arg(long)]
    pub defaults: bool,

    /// Write the finished analysis to this file for `show` / `table`
    #[arg(long)]
    pub save: Option<String>,
}

/// Arguments for re-rendering a saved analysis
#[derive(Args)]
pub struct ShowArgs {
    /// Path to a file written by `evaluate --save`
    #[arg(long)]
    pub analysis: String,
}

/// Arguments for a single scenario's cash-flow table
#[derive(Args)]
pub struct TableArgs {
    /// Path to a file written by `evaluate --save`
    #[arg(long, conflicts_with = "input")]
    pub analysis: Option<String>,

    /// Path to a JSON/YAML project input to evaluate instead
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario to tabulate: likely, worst or best
    #[arg(long, default_value = "likely")]
    pub case: String,
}

/// Arguments for the input template
#[derive(Args)]
pub struct TemplateArgs {}

fn read_project_input(
    path: Option<&str>,
    defaults: bool,
) -> Result<ProjectInput, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_document(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }
    if defaults {
        return Ok(ProjectInput::default());
    }
    Err("--input is required (or pipe a project on stdin, or pass --defaults)".into())
}

fn parse_case(name: &str) -> Result<ScenarioCase, Box<dyn std::error::Error>> {
    ScenarioCase::parse(name)
        .ok_or_else(|| format!("Unknown case '{name}'; expected likely, worst or best").into())
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let project = read_project_input(args.input.as_deref(), args.defaults)?;
    let output = evaluate_project(&project)?;

    if let Some(ref path) = args.save {
        input::file::write_text(path, &output.result.to_json()?)?;
        info!("saved analysis to {path}");
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_show(args: ShowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis: ProjectAnalysis = input::file::read_document(&args.analysis)?;
    Ok(json!({
        "result": analysis,
        "methodology": "Stored three-scenario analysis",
        "warnings": [],
    }))
}

pub fn run_table(args: TableArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let case = parse_case(&args.case)?;

    if let Some(ref path) = args.analysis {
        let analysis: ProjectAnalysis = input::file::read_document(path)?;
        return Ok(json!({
            "result": analysis.case(case),
            "methodology": format!("Cash-flow schedule, {case} case"),
            "warnings": [],
        }));
    }

    let project = read_project_input(args.input.as_deref(), false)?;
    let output = evaluate_scenario(&project, case)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_template(_args: TemplateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(ProjectInput::default())?)
}
