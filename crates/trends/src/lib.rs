//! `winnerlens-trends` — simulated market-trend reports.
//!
//! No external data source is queried; volumes are synthesized from a
//! per-category baseline so dashboards have something plausible to chart.

pub mod report;
pub mod simulate;

pub use report::{ChartData, Dataset, RisingKeyword, TrendReport, TrendSummary};
pub use simulate::{simulate_trends, CategoryProfile, DEFAULT_CATEGORY, DEFAULT_PERIOD, MONTH_LABELS};
