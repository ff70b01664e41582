use serde::{Deserialize, Serialize};

use crate::projection::ScenarioResult;
use crate::types::Money;

/// Investment vs. recovered value for one scenario's bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonBars {
    pub investment: Money,
    /// Sum of discounted flows for years 1..=lifetime
    pub discounted_inflows: Money,
    pub net_present_value: Money,
}

/// Recover the discounted inflows from a finished projection.
///
/// Follows from `NPV = -I0 + subsidy + sum(discounted(t))`, so this is
/// `npv + I0 - subsidy`.
pub fn discounted_inflows(result: &ScenarioResult, initial_investment: Money, subsidy: Money) -> Money {
    result.net_present_value + initial_investment - subsidy
}

pub fn comparison_bars(
    result: &ScenarioResult,
    initial_investment: Money,
    subsidy: Money,
) -> ComparisonBars {
    ComparisonBars {
        investment: initial_investment,
        discounted_inflows: discounted_inflows(result, initial_investment, subsidy),
        net_present_value: result.net_present_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project_cash_flows, ScenarioInputs};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn inputs() -> ScenarioInputs {
        ScenarioInputs {
            initial_investment: dec!(12000),
            subsidy: dec!(2000),
            annual_operating_cost: dec!(150),
            annual_other_revenue: dec!(40),
            annual_savings_volume: dec!(4000),
            base_price: dec!(0.30),
            price_escalation_rate: dec!(0.03),
            cost_escalation_rate: dec!(0.02),
            project_lifetime: 12,
            equity_cost_rate: dec!(0.09),
            debt_cost_rate: dec!(0.04),
        }
    }

    #[test]
    fn test_inflows_match_sum_of_discounted_years() {
        let inp = inputs();
        let result = project_cash_flows(&inp, dec!(0.055)).unwrap();
        let summed: Decimal = result.cash_flows.iter().skip(1).map(|cf| cf.discounted).sum();
        let recovered = discounted_inflows(&result, inp.initial_investment, inp.subsidy);
        assert!((recovered - summed).abs() < dec!(0.000001));
    }

    #[test]
    fn test_bars_carry_investment_and_npv() {
        let inp = inputs();
        let result = project_cash_flows(&inp, dec!(0.055)).unwrap();
        let bars = comparison_bars(&result, inp.initial_investment, inp.subsidy);
        assert_eq!(bars.investment, dec!(12000));
        assert_eq!(bars.net_present_value, result.net_present_value);
        let npv_back = bars.discounted_inflows - bars.investment + inp.subsidy;
        assert!((npv_back - bars.net_present_value).abs() < dec!(0.000001));
    }
}
