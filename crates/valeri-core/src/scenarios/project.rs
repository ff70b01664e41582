use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::capital::CapitalStructure;
use crate::error::ValeriError;
use crate::projection::{
    validate_horizon, validate_lifetime, ScenarioInputs, DEFAULT_DISPLAY_HORIZON,
};
use crate::types::{Currency, Money, Rate, ScenarioCase, ScenarioSet};
use crate::ValeriResult;

pub use crate::projection::MAX_PROJECT_LIFETIME;

/// Parameters that differ between the likely, worst and best cases.
/// All rates are fractions (0.02 = 2%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub initial_investment: Money,
    #[serde(default)]
    pub subsidy: Money,
    #[serde(default)]
    pub annual_operating_cost: Money,
    #[serde(default)]
    pub annual_other_revenue: Money,
    pub annual_savings_volume: Decimal,
    pub price_escalation_rate: Rate,
    #[serde(default)]
    pub cost_escalation_rate: Rate,
    pub project_lifetime: u32,
    pub equity_cost_rate: Rate,
    pub debt_cost_rate: Rate,
}

/// A complete appraisal request: shared parameters plus one parameter set per
/// scenario. This is also the `inputs` section of a stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(default)]
    pub currency: Currency,
    /// Energy price per unit at year 0, shared by all scenarios
    pub base_price: Money,
    pub capital_structure: CapitalStructure,
    /// Years shown on the cumulative chart
    #[serde(default = "default_display_horizon")]
    pub display_horizon: u32,
    pub scenarios: ScenarioSet<ScenarioParameters>,
}

fn default_display_horizon() -> u32 {
    DEFAULT_DISPLAY_HORIZON
}

impl ProjectInput {
    /// Engine input for one scenario, with the shared base price filled in.
    pub fn scenario_inputs(&self, case: ScenarioCase) -> ScenarioInputs {
        let p = self.scenarios.get(case);
        ScenarioInputs {
            initial_investment: p.initial_investment,
            subsidy: p.subsidy,
            annual_operating_cost: p.annual_operating_cost,
            annual_other_revenue: p.annual_other_revenue,
            annual_savings_volume: p.annual_savings_volume,
            base_price: self.base_price,
            price_escalation_rate: p.price_escalation_rate,
            cost_escalation_rate: p.cost_escalation_rate,
            project_lifetime: p.project_lifetime,
            equity_cost_rate: p.equity_cost_rate,
            debt_cost_rate: p.debt_cost_rate,
        }
    }

    pub fn all_scenario_inputs(&self) -> ScenarioSet<ScenarioInputs> {
        self.scenarios.map(|case, _| self.scenario_inputs(case))
    }
}

impl Default for ProjectInput {
    /// Starting values of a fresh appraisal form.
    fn default() -> Self {
        Self {
            currency: Currency::EUR,
            base_price: dec!(0.30),
            capital_structure: CapitalStructure::default(),
            display_horizon: DEFAULT_DISPLAY_HORIZON,
            scenarios: ScenarioSet {
                likely: ScenarioParameters {
                    initial_investment: dec!(10000),
                    subsidy: Decimal::ZERO,
                    annual_operating_cost: Decimal::ZERO,
                    annual_other_revenue: Decimal::ZERO,
                    annual_savings_volume: dec!(5000),
                    price_escalation_rate: dec!(0.02),
                    cost_escalation_rate: dec!(0.02),
                    project_lifetime: 15,
                    equity_cost_rate: dec!(0.08),
                    debt_cost_rate: dec!(0.04),
                },
                worst: ScenarioParameters {
                    initial_investment: dec!(12000),
                    subsidy: Decimal::ZERO,
                    annual_operating_cost: Decimal::ZERO,
                    annual_other_revenue: Decimal::ZERO,
                    annual_savings_volume: dec!(4000),
                    price_escalation_rate: dec!(0.01),
                    cost_escalation_rate: dec!(0.03),
                    project_lifetime: 12,
                    equity_cost_rate: dec!(0.10),
                    debt_cost_rate: dec!(0.06),
                },
                best: ScenarioParameters {
                    initial_investment: dec!(9000),
                    subsidy: Decimal::ZERO,
                    annual_operating_cost: Decimal::ZERO,
                    annual_other_revenue: Decimal::ZERO,
                    annual_savings_volume: dec!(6000),
                    price_escalation_rate: dec!(0.03),
                    cost_escalation_rate: dec!(0.01),
                    project_lifetime: 20,
                    equity_cost_rate: dec!(0.07),
                    debt_cost_rate: dec!(0.03),
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject inputs the engine would turn into meaningless figures.
pub fn validate_project_input(input: &ProjectInput) -> ValeriResult<()> {
    if input.base_price < Decimal::ZERO {
        return Err(ValeriError::InvalidInput {
            field: "base_price".into(),
            reason: "Base price cannot be negative".into(),
        });
    }

    validate_horizon("display_horizon", input.display_horizon)?;

    let cs = &input.capital_structure;
    for (field, ratio) in [("equity_ratio", cs.equity_ratio), ("debt_ratio", cs.debt_ratio)] {
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return Err(ValeriError::InvalidInput {
                field: format!("capital_structure.{field}"),
                reason: "Ratio must be between 0 and 1".into(),
            });
        }
    }

    for (case, params) in input.scenarios.iter() {
        validate_scenario_parameters(case, params)?;
    }
    Ok(())
}

fn validate_scenario_parameters(case: ScenarioCase, p: &ScenarioParameters) -> ValeriResult<()> {
    let amounts = [
        ("initial_investment", p.initial_investment),
        ("subsidy", p.subsidy),
        ("annual_operating_cost", p.annual_operating_cost),
        ("annual_other_revenue", p.annual_other_revenue),
        ("annual_savings_volume", p.annual_savings_volume),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(ValeriError::InvalidInput {
                field: format!("{case}.{field}"),
                reason: "Cannot be negative".into(),
            });
        }
    }

    validate_lifetime(&format!("{case}.project_lifetime"), p.project_lifetime)?;

    let rates = [
        ("price_escalation_rate", p.price_escalation_rate),
        ("cost_escalation_rate", p.cost_escalation_rate),
    ];
    for (field, rate) in rates {
        if rate <= dec!(-1) {
            return Err(ValeriError::InvalidInput {
                field: format!("{case}.{field}"),
                reason: "Escalation rate must be greater than -100%".into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_project_input(&ProjectInput::default()).is_ok());
    }

    #[test]
    fn test_scenario_inputs_share_base_price() {
        let input = ProjectInput::default();
        for case in ScenarioCase::ALL {
            assert_eq!(input.scenario_inputs(case).base_price, dec!(0.30));
        }
        assert_eq!(input.scenario_inputs(ScenarioCase::Worst).project_lifetime, 12);
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let mut input = ProjectInput::default();
        input.scenarios.best.project_lifetime = 0;
        match validate_project_input(&input).unwrap_err() {
            ValeriError::InvalidInput { field, .. } => assert_eq!(field, "best.project_lifetime"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let mut input = ProjectInput::default();
        input.display_horizon = u32::MAX;
        match validate_project_input(&input).unwrap_err() {
            ValeriError::InvalidInput { field, .. } => assert_eq!(field, "display_horizon"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }

        input.display_horizon = 0;
        assert!(validate_project_input(&input).is_err());

        input.display_horizon = MAX_PROJECT_LIFETIME;
        assert!(validate_project_input(&input).is_ok());
    }

    #[test]
    fn test_negative_subsidy_rejected() {
        let mut input = ProjectInput::default();
        input.scenarios.worst.subsidy = dec!(-1);
        match validate_project_input(&input).unwrap_err() {
            ValeriError::InvalidInput { field, .. } => assert_eq!(field, "worst.subsidy"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = serde_json::json!({
            "basePrice": "0.30",
            "capitalStructure": {"equityRatio": "0.3", "debtRatio": "0.7"},
            "scenarios": {
                "likely": {"initialInvestment": 10000, "annualSavingsVolume": 1000,
                           "priceEscalationRate": 0.02, "projectLifetime": 15,
                           "equityCostRate": 0.08, "debtCostRate": 0.04},
                "worst": {"initialInvestment": 10000, "annualSavingsVolume": 1000,
                          "priceEscalationRate": 0.02, "projectLifetime": 15,
                          "equityCostRate": 0.08, "debtCostRate": 0.04},
                "best": {"initialInvestment": 10000, "annualSavingsVolume": 1000,
                         "priceEscalationRate": 0.02, "projectLifetime": 15,
                         "equityCostRate": 0.08, "debtCostRate": 0.04}
            }
        });
        let input: ProjectInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.currency, Currency::EUR);
        assert_eq!(input.display_horizon, DEFAULT_DISPLAY_HORIZON);
        assert_eq!(input.scenarios.likely.subsidy, Decimal::ZERO);
        assert_eq!(input.scenarios.likely.cost_escalation_rate, Decimal::ZERO);
    }
}
