use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions, e.g. an interpolated payback period
pub type Years = Decimal;

/// Currency code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    EUR,
    CHF,
    GBP,
    USD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
            Currency::CHF => "CHF",
            Currency::GBP => "£",
            Currency::USD => "$",
        }
    }
}

/// One of the three parameter sets every appraisal is run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCase {
    Likely,
    Worst,
    Best,
}

impl ScenarioCase {
    /// Evaluation and display order.
    pub const ALL: [ScenarioCase; 3] = [ScenarioCase::Likely, ScenarioCase::Worst, ScenarioCase::Best];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioCase::Likely => "likely",
            ScenarioCase::Worst => "worst",
            ScenarioCase::Best => "best",
        }
    }

    pub fn parse(name: &str) -> Option<ScenarioCase> {
        match name.trim().to_ascii_lowercase().as_str() {
            "likely" => Some(ScenarioCase::Likely),
            "worst" => Some(ScenarioCase::Worst),
            "best" => Some(ScenarioCase::Best),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScenarioCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value held once per scenario, keyed `likely` / `worst` / `best` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet<T> {
    pub likely: T,
    pub worst: T,
    pub best: T,
}

impl<T> ScenarioSet<T> {
    pub fn get(&self, case: ScenarioCase) -> &T {
        match case {
            ScenarioCase::Likely => &self.likely,
            ScenarioCase::Worst => &self.worst,
            ScenarioCase::Best => &self.best,
        }
    }

    /// Iterate in `ScenarioCase::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioCase, &T)> {
        ScenarioCase::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(ScenarioCase, &T) -> Result<U, E>,
    ) -> Result<ScenarioSet<U>, E> {
        Ok(ScenarioSet {
            likely: f(ScenarioCase::Likely, &self.likely)?,
            worst: f(ScenarioCase::Worst, &self.worst)?,
            best: f(ScenarioCase::Best, &self.best)?,
        })
    }

    pub fn map<U>(&self, mut f: impl FnMut(ScenarioCase, &T) -> U) -> ScenarioSet<U> {
        ScenarioSet {
            likely: f(ScenarioCase::Likely, &self.likely),
            worst: f(ScenarioCase::Worst, &self.worst),
            best: f(ScenarioCase::Best, &self.best),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
