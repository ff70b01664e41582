use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use valeri_core::capital::wacc::{self, WaccInput};
use valeri_core::capital::{compute_wacc, CapitalStructure};
use valeri_core::projection::{
    horizon_series, project_cash_flows, validate_horizon, validate_lifetime, HorizonPoint,
    ScenarioInputs, ScenarioResult,
};
use valeri_core::{with_metadata, Rate};

use crate::input;

/// Arguments for WACC calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct WaccArgs {
    /// Equity share in percent; clamped to 0-100, debt takes the rest
    #[arg(long)]
    pub equity_pct: Option<String>,

    /// Cost of equity (e.g. 0.08 for 8%)
    #[arg(long)]
    pub equity_cost: Option<Decimal>,

    /// Cost of debt (e.g. 0.04 for 4%)
    #[arg(long)]
    pub debt_cost: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a single-scenario projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProjectArgs {
    /// Upfront investment
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Grant received at year 0
    #[arg(long, default_value = "0")]
    pub subsidy: Decimal,

    /// Operating cost per year, year-1 terms
    #[arg(long, default_value = "0")]
    pub operating_cost: Decimal,

    /// Other revenue per year, year-1 terms
    #[arg(long, default_value = "0")]
    pub other_revenue: Decimal,

    /// Energy units saved per year
    #[arg(long)]
    pub savings_volume: Option<Decimal>,

    /// Energy price per unit at year 0
    #[arg(long)]
    pub base_price: Option<Decimal>,

    /// Annual energy price escalation (fraction)
    #[arg(long, default_value = "0")]
    pub price_escalation: Decimal,

    /// Annual escalation of operating cost and other revenue (fraction)
    #[arg(long, default_value = "0")]
    pub cost_escalation: Decimal,

    /// Project lifetime in years
    #[arg(long)]
    pub lifetime: Option<u32>,

    /// Discount rate; when absent it is derived from the capital structure flags
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Equity share in percent
    #[arg(long)]
    pub equity_pct: Option<String>,

    /// Cost of equity (fraction); required with --equity-pct
    #[arg(long)]
    pub equity_cost: Option<Decimal>,

    /// Cost of debt (fraction); required with --equity-pct
    #[arg(long)]
    pub debt_cost: Option<Decimal>,

    /// Also lay the cumulative flow onto a fixed display horizon
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// File / stdin form of a single-scenario projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionDocument {
    #[serde(flatten)]
    inputs: ScenarioInputs,
    discount_rate: Rate,
    #[serde(default)]
    horizon_years: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionReport {
    #[serde(flatten)]
    result: ScenarioResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    horizon: Option<Vec<HorizonPoint>>,
}

/// An explicit rate wins; otherwise the rate is the WACC of the capital
/// structure flags, which then need both cost rates.
fn resolve_discount_rate(
    discount_rate: Option<Decimal>,
    equity_pct: Option<&str>,
    equity_cost: Option<Decimal>,
    debt_cost: Option<Decimal>,
) -> Result<Rate, Box<dyn std::error::Error>> {
    match (discount_rate, equity_pct) {
        (Some(rate), _) => Ok(rate),
        (None, Some(equity)) => {
            let cs = CapitalStructure::from_equity_entry(equity);
            let equity_cost = equity_cost.ok_or("--equity-cost is required with --equity-pct")?;
            let debt_cost = debt_cost.ok_or("--debt-cost is required with --equity-pct")?;
            Ok(compute_wacc(cs.equity_ratio, cs.debt_ratio, equity_cost, debt_cost))
        }
        (None, None) => Err("--discount-rate or --equity-pct is required".into()),
    }
}

pub fn run_wacc(args: WaccArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let wacc_input: WaccInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let equity = args
            .equity_pct
            .ok_or("--equity-pct is required (or provide --input)")?;
        WaccInput {
            capital_structure: CapitalStructure::from_equity_entry(&equity),
            equity_cost_rate: args
                .equity_cost
                .ok_or("--equity-cost is required (or provide --input)")?,
            debt_cost_rate: args
                .debt_cost
                .ok_or("--debt-cost is required (or provide --input)")?,
        }
    };

    let result = wacc::calculate_wacc(&wacc_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: ProjectionDocument = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let discount_rate = resolve_discount_rate(
            args.discount_rate,
            args.equity_pct.as_deref(),
            args.equity_cost,
            args.debt_cost,
        )?;
        ProjectionDocument {
            inputs: ScenarioInputs {
                initial_investment: args
                    .initial_investment
                    .ok_or("--initial-investment is required (or provide --input)")?,
                subsidy: args.subsidy,
                annual_operating_cost: args.operating_cost,
                annual_other_revenue: args.other_revenue,
                annual_savings_volume: args
                    .savings_volume
                    .ok_or("--savings-volume is required (or provide --input)")?,
                base_price: args
                    .base_price
                    .ok_or("--base-price is required (or provide --input)")?,
                price_escalation_rate: args.price_escalation,
                cost_escalation_rate: args.cost_escalation,
                project_lifetime: args
                    .lifetime
                    .ok_or("--lifetime is required (or provide --input)")?,
                equity_cost_rate: args.equity_cost.unwrap_or(Decimal::ZERO),
                debt_cost_rate: args.debt_cost.unwrap_or(Decimal::ZERO),
            },
            discount_rate,
            horizon_years: args.horizon,
        }
    };

    validate_lifetime("lifetime", doc.inputs.project_lifetime)?;
    if let Some(horizon) = doc.horizon_years {
        validate_horizon("horizon", horizon)?;
    }

    let start = Instant::now();
    let result = project_cash_flows(&doc.inputs, doc.discount_rate)?;

    let mut warnings = Vec::new();
    if result.payback_period_years.is_none() {
        warnings.push(format!(
            "Investment not recovered within the {}-year lifetime",
            result.lifetime()
        ));
    }

    let report = ProjectionReport {
        horizon: doc.horizon_years.map(|h| horizon_series(&result, h)),
        result,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Discounted cash flow projection",
        &doc,
        warnings,
        elapsed,
        report,
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_explicit_rate_wins() {
        let rate = resolve_discount_rate(Some(dec!(0.065)), Some("30"), None, None).unwrap();
        assert_eq!(rate, dec!(0.065));
    }

    #[test]
    fn test_rate_from_capital_structure() {
        let rate =
            resolve_discount_rate(None, Some("30"), Some(dec!(0.08)), Some(dec!(0.04))).unwrap();
        assert_eq!(rate, dec!(0.052));
    }

    #[test]
    fn test_equity_pct_needs_both_cost_rates() {
        let err = resolve_discount_rate(None, Some("30"), None, Some(dec!(0.04))).unwrap_err();
        assert!(err.to_string().contains("--equity-cost"));
        let err = resolve_discount_rate(None, Some("30"), Some(dec!(0.08)), None).unwrap_err();
        assert!(err.to_string().contains("--debt-cost"));
        assert!(resolve_discount_rate(None, None, None, None).is_err());
    }
}
