use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::capital::CapitalStructure;
use crate::error::ValeriError;
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::ValeriResult;

/// Input parameters for a scenario's Weighted Average Cost of Capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccInput {
    /// Shared equity / debt split
    pub capital_structure: CapitalStructure,
    /// Required return on equity for this scenario
    pub equity_cost_rate: Rate,
    /// Interest rate on debt for this scenario
    pub debt_cost_rate: Rate,
}

/// Output of the WACC calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccOutput {
    /// Weighted average cost of capital
    pub wacc: Rate,
    /// equity_ratio * equity_cost_rate
    pub equity_component: Rate,
    /// debt_ratio * debt_cost_rate
    pub debt_component: Rate,
}

/// Weighted Average Cost of Capital.
///
/// WACC = We * Re + Wd * Rd
///
/// No bounds checking: the weights and rates are trusted fractions.
pub fn compute_wacc(
    equity_ratio: Rate,
    debt_ratio: Rate,
    equity_cost_rate: Rate,
    debt_cost_rate: Rate,
) -> Rate {
    equity_ratio * equity_cost_rate + debt_ratio * debt_cost_rate
}

/// Validated WACC with the usual envelope and reasonableness warnings.
pub fn calculate_wacc(input: &WaccInput) -> ValeriResult<ComputationOutput<WaccOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_wacc_input(input)?;

    let cs = &input.capital_structure;
    let weight_sum = cs.weight_sum();
    if (weight_sum - Decimal::ONE).abs() > dec!(0.01) {
        return Err(ValeriError::InvalidInput {
            field: "equity_ratio + debt_ratio".into(),
            reason: format!("Capital structure weights must sum to 1.0, got {weight_sum}"),
        });
    }

    let equity_component = cs.equity_ratio * input.equity_cost_rate;
    let debt_component = cs.debt_ratio * input.debt_cost_rate;
    let wacc = compute_wacc(
        cs.equity_ratio,
        cs.debt_ratio,
        input.equity_cost_rate,
        input.debt_cost_rate,
    );

    if wacc > dec!(0.20) {
        warnings.push(format!(
            "WACC of {wacc} exceeds 20%; check that rates were entered as fractions"
        ));
    }
    if input.debt_cost_rate > input.equity_cost_rate {
        warnings.push(format!(
            "Cost of debt ({}) exceeds cost of equity ({}); unusual for a going concern",
            input.debt_cost_rate, input.equity_cost_rate
        ));
    }

    let output = WaccOutput {
        wacc,
        equity_component,
        debt_component,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "WACC from capital structure weights",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_wacc_input(input: &WaccInput) -> ValeriResult<()> {
    let cs = &input.capital_structure;
    if cs.equity_ratio < Decimal::ZERO || cs.equity_ratio > Decimal::ONE {
        return Err(ValeriError::InvalidInput {
            field: "equity_ratio".into(),
            reason: "Equity ratio must be between 0 and 1".into(),
        });
    }
    if cs.debt_ratio < Decimal::ZERO || cs.debt_ratio > Decimal::ONE {
        return Err(ValeriError::InvalidInput {
            field: "debt_ratio".into(),
            reason: "Debt ratio must be between 0 and 1".into(),
        });
    }
    if input.equity_cost_rate < Decimal::ZERO {
        return Err(ValeriError::InvalidInput {
            field: "equity_cost_rate".into(),
            reason: "Cost of equity cannot be negative".into(),
        });
    }
    if input.debt_cost_rate < Decimal::ZERO {
        return Err(ValeriError::InvalidInput {
            field: "debt_cost_rate".into(),
            reason: "Cost of debt cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> WaccInput {
        WaccInput {
            capital_structure: CapitalStructure::from_equity_percent(dec!(30)),
            equity_cost_rate: dec!(0.10),
            debt_cost_rate: dec!(0.05),
        }
    }

    #[test]
    fn test_basic_wacc() {
        let result = calculate_wacc(&sample_input()).unwrap();
        let out = &result.result;

        // 0.3 * 0.10 + 0.7 * 0.05 = 0.03 + 0.035 = 0.065
        assert_eq!(out.wacc, dec!(0.065));
        assert_eq!(out.equity_component, dec!(0.03));
        assert_eq!(out.debt_component, dec!(0.035));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_all_equity_returns_cost_of_equity() {
        assert_eq!(
            compute_wacc(Decimal::ONE, Decimal::ZERO, dec!(0.08), dec!(0.04)),
            dec!(0.08)
        );
    }

    #[test]
    fn test_all_debt_returns_cost_of_debt() {
        assert_eq!(
            compute_wacc(Decimal::ZERO, Decimal::ONE, dec!(0.08), dec!(0.04)),
            dec!(0.04)
        );
    }

    #[test]
    fn test_wacc_linear_in_equity_share() {
        let re = dec!(0.09);
        let rd = dec!(0.03);
        let at = |e: Decimal| compute_wacc(e, Decimal::ONE - e, re, rd);

        // Equal steps in equity share give equal steps in WACC.
        let step_low = at(dec!(0.25)) - at(dec!(0.0));
        let step_high = at(dec!(1.0)) - at(dec!(0.75));
        assert_eq!(step_low, step_high);
        assert_eq!(at(dec!(0.5)), (re + rd) / dec!(2));
    }

    #[test]
    fn test_wacc_weights_must_sum_to_one() {
        let mut input = sample_input();
        input.capital_structure = CapitalStructure::new(dec!(0.5), dec!(0.6));

        match calculate_wacc(&input).unwrap_err() {
            ValeriError::InvalidInput { field, .. } => assert!(field.contains("ratio")),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut input = sample_input();
        input.debt_cost_rate = dec!(-0.01);
        assert!(calculate_wacc(&input).is_err());
    }

    #[test]
    fn test_percent_entered_as_whole_number_warns() {
        let mut input = sample_input();
        input.equity_cost_rate = dec!(7.0);
        let result = calculate_wacc(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("fractions")));
    }

    #[test]
    fn test_methodology_string() {
        let result = calculate_wacc(&sample_input()).unwrap();
        assert_eq!(result.methodology, "WACC from capital structure weights");
    }
}
