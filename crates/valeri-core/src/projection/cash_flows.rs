use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValeriError;
use crate::projection::payback::PaybackTracker;
use crate::time_value::{escalate, present_value};
use crate::types::{Money, Rate, Years};
use crate::ValeriResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the engine needs to project one scenario. Rates are fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInputs {
    pub initial_investment: Money,
    /// Grant received at year 0
    pub subsidy: Money,
    /// Operating cost in year-1 nominal terms
    pub annual_operating_cost: Money,
    /// Revenue besides energy savings, year-1 nominal terms
    pub annual_other_revenue: Money,
    /// Units of energy saved per year (e.g. kWh)
    pub annual_savings_volume: Decimal,
    /// Price per unit at year 0
    pub base_price: Money,
    /// Escalation applied to the unit price
    pub price_escalation_rate: Rate,
    /// Escalation applied to operating cost and other revenue
    pub cost_escalation_rate: Rate,
    /// Economic lifetime in years
    pub project_lifetime: u32,
    pub equity_cost_rate: Rate,
    pub debt_cost_rate: Rate,
}

/// One row of the projected schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    pub year: u32,
    /// Escalated unit price for the year
    pub price: Money,
    pub nominal: Money,
    pub discounted: Money,
    /// Running sum of discounted flows including year 0
    pub cumulative: Money,
}

/// Projection outcome for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    /// Discount rate (WACC) the schedule was discounted at
    pub discount_rate: Rate,
    pub net_present_value: Money,
    /// `None` when the cumulative discounted flow stays negative over the lifetime
    pub payback_period_years: Option<Years>,
    /// Years 0..=lifetime in ascending order
    pub cash_flows: Vec<CashFlowYear>,
}

impl ScenarioResult {
    /// Modeled lifetime in years.
    pub fn lifetime(&self) -> u32 {
        self.cash_flows.last().map(|cf| cf.year).unwrap_or(0)
    }

    /// Year-0 flow, `subsidy - initial_investment`.
    pub fn year_zero_flow(&self) -> Money {
        self.cash_flows
            .first()
            .map(|cf| cf.nominal)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn final_cumulative(&self) -> Money {
        self.cash_flows
            .last()
            .map(|cf| cf.cumulative)
            .unwrap_or(Decimal::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Longest lifetime, and longest display horizon, accepted from a caller.
pub const MAX_PROJECT_LIFETIME: u32 = 100;

/// Reject a lifetime outside `1..=MAX_PROJECT_LIFETIME`.
pub fn validate_lifetime(field: &str, years: u32) -> ValeriResult<()> {
    if years == 0 || years > MAX_PROJECT_LIFETIME {
        return Err(ValeriError::InvalidInput {
            field: field.into(),
            reason: format!("Project lifetime must be between 1 and {MAX_PROJECT_LIFETIME} years"),
        });
    }
    Ok(())
}

fn overflow(context: String) -> ValeriError {
    ValeriError::Overflow { context }
}

/// Project a scenario's cash flows over its lifetime and discount them.
///
/// Year 0 carries `subsidy - initial_investment` undiscounted. For each year
/// `t` in `1..=project_lifetime`:
///
/// ```text
/// price(t)      = base_price * (1 + price_escalation)^t
/// nominal(t)    = volume * price(t)
///                 - operating_cost * (1 + cost_escalation)^t
///                 + other_revenue  * (1 + cost_escalation)^t
/// discounted(t) = nominal(t) / (1 + discount_rate)^t
/// ```
///
/// The payback period is interpolated linearly inside the first year the
/// cumulative discounted flow turns non-negative.
///
/// Inputs are not validated here. The only failures are arithmetic that
/// `Decimal` cannot represent: a zero discount factor (rate of -100%), an
/// overflowing compounding factor, or flows whose sums exceed `Decimal::MAX`.
pub fn project_cash_flows(
    inputs: &ScenarioInputs,
    discount_rate: Rate,
) -> ValeriResult<ScenarioResult> {
    let lifetime = inputs.project_lifetime;
    let year_zero = inputs
        .subsidy
        .checked_sub(inputs.initial_investment)
        .ok_or_else(|| overflow("year-0 cash flow".to_string()))?;

    let mut npv = year_zero;
    let mut cumulative = year_zero;
    let mut payback = PaybackTracker::new(year_zero);
    let mut cash_flows = Vec::with_capacity(lifetime as usize + 1);

    cash_flows.push(CashFlowYear {
        year: 0,
        price: inputs.base_price,
        nominal: year_zero,
        discounted: year_zero,
        cumulative,
    });

    for t in 1..=lifetime {
        let price = escalate(inputs.base_price, inputs.price_escalation_rate, t)?;
        let savings_value = inputs
            .annual_savings_volume
            .checked_mul(price)
            .ok_or_else(|| overflow(format!("savings value in year {t}")))?;
        let operating_cost = escalate(inputs.annual_operating_cost, inputs.cost_escalation_rate, t)?;
        let other_revenue = escalate(inputs.annual_other_revenue, inputs.cost_escalation_rate, t)?;

        let nominal = savings_value
            .checked_sub(operating_cost)
            .and_then(|v| v.checked_add(other_revenue))
            .ok_or_else(|| overflow(format!("nominal cash flow in year {t}")))?;
        let discounted = present_value(nominal, discount_rate, t)?;

        npv = npv
            .checked_add(discounted)
            .ok_or_else(|| overflow(format!("net present value in year {t}")))?;
        cumulative = cumulative
            .checked_add(discounted)
            .ok_or_else(|| overflow(format!("cumulative cash flow in year {t}")))?;
        payback.observe(t, discounted, cumulative);

        cash_flows.push(CashFlowYear {
            year: t,
            price,
            nominal,
            discounted,
            cumulative,
        });
    }

    let payback_period_years = payback.finish();
    debug!(
        "projected {lifetime} years at {discount_rate}: npv={npv}, payback={payback_period_years:?}"
    );

    Ok(ScenarioResult {
        discount_rate,
        net_present_value: npv,
        payback_period_years,
        cash_flows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
