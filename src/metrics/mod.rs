//! Metric frameworks
//!
//! Per-iteration metrics consume one clustering state; process metrics
//! fold the whole iteration sequence into summary statistics.
//!
//! # Submodules
//! - `value` - `MetricValue`, per-iteration records, run history
//! - `catalog` - closed per-iteration metric enumeration and dispatch
//! - `iteration_metrics` - the metric computations themselves
//! - `process` - cross-iteration folds

mod catalog;
mod iteration_metrics;
mod process;
mod value;

pub use catalog::{resolve_metrics, MetricContext, MetricKind};
pub use iteration_metrics::hindex_from_counts;
pub use process::ProcessMetricKind;
pub use value::{MetricRecord, MetricValue, RunHistory};
