//! Year-by-year discounted cash flow projection for a single scenario.

pub mod cash_flows;
pub mod horizon;
pub mod payback;

pub use cash_flows::{
    project_cash_flows, validate_lifetime, CashFlowYear, ScenarioInputs, ScenarioResult,
    MAX_PROJECT_LIFETIME,
};
pub use horizon::{horizon_series, validate_horizon, HorizonPoint, DEFAULT_DISPLAY_HORIZON};
