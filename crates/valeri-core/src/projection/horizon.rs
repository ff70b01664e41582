use serde::{Deserialize, Serialize};

use crate::error::ValeriError;
use crate::projection::{ScenarioResult, MAX_PROJECT_LIFETIME};
use crate::types::Money;
use crate::ValeriResult;

/// Years shown on the cumulative chart regardless of economic lifetime.
pub const DEFAULT_DISPLAY_HORIZON: u32 = 20;

/// A point on a fixed display horizon. `cumulative` is `None` past the end of
/// the project's lifetime: the project is no longer active, which is not the
/// same as a zero cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonPoint {
    pub year: u32,
    pub cumulative: Option<Money>,
}

/// A horizon must span at least one year and no more than the longest
/// accepted lifetime.
pub fn validate_horizon(field: &str, horizon_years: u32) -> ValeriResult<()> {
    if horizon_years == 0 || horizon_years > MAX_PROJECT_LIFETIME {
        return Err(ValeriError::InvalidInput {
            field: field.into(),
            reason: format!("Display horizon must be between 1 and {MAX_PROJECT_LIFETIME} years"),
        });
    }
    Ok(())
}

/// Lay a projected schedule onto years `0..=horizon_years`.
///
/// A horizon shorter than the lifetime truncates the series; nothing is
/// re-accumulated either way.
pub fn horizon_series(result: &ScenarioResult, horizon_years: u32) -> Vec<HorizonPoint> {
    (0..=horizon_years)
        .map(|year| HorizonPoint {
            year,
            cumulative: result
                .cash_flows
                .get(year as usize)
                .map(|cf| cf.cumulative),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CashFlowYear;
    use rust_decimal_macros::dec;

    fn three_year_result() -> ScenarioResult {
        let rows = [dec!(-100), dec!(-60), dec!(-20), dec!(20)];
        ScenarioResult {
            discount_rate: dec!(0.05),
            net_present_value: dec!(20),
            payback_period_years: Some(dec!(2.5)),
            cash_flows: rows
                .iter()
                .enumerate()
                .map(|(i, c)| CashFlowYear {
                    year: i as u32,
                    price: dec!(1),
                    nominal: dec!(0),
                    discounted: dec!(0),
                    cumulative: *c,
                })
                .collect(),
        }
    }

    #[test]
    fn test_years_past_lifetime_are_breaks() {
        let series = horizon_series(&three_year_result(), 5);
        assert_eq!(series.len(), 6);
        assert_eq!(series[3].cumulative, Some(dec!(20)));
        assert_eq!(series[4].cumulative, None);
        assert_eq!(series[5].cumulative, None);
        assert_eq!(series[5].year, 5);
    }

    #[test]
    fn test_short_horizon_truncates() {
        let series = horizon_series(&three_year_result(), 1);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].cumulative, Some(dec!(-60)));
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(validate_horizon("horizon_years", DEFAULT_DISPLAY_HORIZON).is_ok());
        assert!(validate_horizon("horizon_years", MAX_PROJECT_LIFETIME).is_ok());
        assert!(validate_horizon("horizon_years", 0).is_err());
        assert!(validate_horizon("horizon_years", MAX_PROJECT_LIFETIME + 1).is_err());
    }

    #[test]
    fn test_break_serializes_as_null() {
        let series = horizon_series(&three_year_result(), 4);
        let json = serde_json::to_value(&series[4]).unwrap();
        assert_eq!(json, serde_json::json!({"year": 4, "cumulative": null}));
    }
}
