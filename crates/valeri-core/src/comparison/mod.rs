//! Figures derived from finished projections for side-by-side display.

pub mod chart;
pub mod metrics;

pub use chart::{build_chart_series, ChartSeries};
pub use metrics::{comparison_bars, discounted_inflows, ComparisonBars};
