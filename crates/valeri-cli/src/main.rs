mod commands;
mod format;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{EvaluateArgs, ShowArgs, TableArgs, TemplateArgs};
use commands::projection::{ProjectArgs, WaccArgs};

/// Three-scenario appraisal of energy-efficiency investments
#[derive(Parser)]
#[command(
    name = "valeri",
    version,
    about = "Three-scenario appraisal of energy-efficiency investments",
    long_about = "Computes WACC, discounted cash flows, NPV and discounted payback \
                  for an energy-saving investment under likely, worst and best cases. \
                  Rates are fractions (0.065 = 6.5%) unless a flag says otherwise."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all three scenarios of a project
    Evaluate(EvaluateArgs),
    /// Re-render a saved analysis without recomputing it
    Show(ShowArgs),
    /// Cash-flow table of one scenario from a saved analysis
    Table(TableArgs),
    /// Project a single scenario from flags
    Project(ProjectArgs),
    /// Weighted Average Cost of Capital from the capital structure
    Wacc(WaccArgs),
    /// Print a project input pre-filled with default values
    Template(TemplateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::analysis::run_evaluate(args),
        Commands::Show(args) => commands::analysis::run_show(args),
        Commands::Table(args) => commands::analysis::run_table(args),
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Wacc(args) => commands::projection::run_wacc(args),
        Commands::Template(args) => commands::analysis::run_template(args),
        Commands::Version => {
            println!("valeri {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
