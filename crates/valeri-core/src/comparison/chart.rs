use serde::{Deserialize, Serialize};

use crate::comparison::metrics::{comparison_bars, ComparisonBars};
use crate::projection::{horizon_series, ScenarioInputs, ScenarioResult};
use crate::types::{Money, ScenarioSet};

/// Data behind the cumulative-flow line chart and the comparison bar chart.
/// The presentation layer owns any chart state; this is plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub horizon_years: u32,
    /// x-axis, `0..=horizon_years`
    pub years: Vec<u32>,
    /// Cumulative discounted flow per scenario; `null` marks years after the
    /// project's lifetime
    pub cumulative: ScenarioSet<Vec<Option<Money>>>,
    pub comparison: ScenarioSet<ComparisonBars>,
}

pub fn build_chart_series(
    inputs: &ScenarioSet<ScenarioInputs>,
    results: &ScenarioSet<ScenarioResult>,
    horizon_years: u32,
) -> ChartSeries {
    ChartSeries {
        horizon_years,
        years: (0..=horizon_years).collect(),
        cumulative: results.map(|_, result| {
            horizon_series(result, horizon_years)
                .into_iter()
                .map(|p| p.cumulative)
                .collect()
        }),
        comparison: results.map(|case, result| {
            let inp = inputs.get(case);
            comparison_bars(result, inp.initial_investment, inp.subsidy)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_cash_flows;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn inputs(lifetime: u32) -> ScenarioInputs {
        ScenarioInputs {
            initial_investment: dec!(5000),
            subsidy: Decimal::ZERO,
            annual_operating_cost: Decimal::ZERO,
            annual_other_revenue: Decimal::ZERO,
            annual_savings_volume: dec!(3000),
            base_price: dec!(0.25),
            price_escalation_rate: dec!(0.02),
            cost_escalation_rate: Decimal::ZERO,
            project_lifetime: lifetime,
            equity_cost_rate: dec!(0.08),
            debt_cost_rate: dec!(0.04),
        }
    }

    #[test]
    fn test_series_break_after_each_lifetime() {
        let set = ScenarioSet {
            likely: inputs(15),
            worst: inputs(10),
            best: inputs(20),
        };
        let results = set
            .try_map(|_, inp| project_cash_flows(inp, dec!(0.06)))
            .unwrap();
        let chart = build_chart_series(&set, &results, 20);

        assert_eq!(chart.years.len(), 21);
        assert!(chart.cumulative.worst[10].is_some());
        assert!(chart.cumulative.worst[11].is_none());
        assert!(chart.cumulative.likely[15].is_some());
        assert!(chart.cumulative.likely[16].is_none());
        assert!(chart.cumulative.best.iter().all(Option::is_some));
        assert_eq!(chart.comparison.best.investment, dec!(5000));
    }
}
