pub mod analysis;
pub mod project;

pub use analysis::{evaluate_project, evaluate_scenario, ProjectAnalysis};
pub use project::{validate_project_input, ProjectInput, ScenarioParameters, MAX_PROJECT_LIFETIME};
