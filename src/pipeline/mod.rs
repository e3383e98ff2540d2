//! Analysis driver
//!
//! # Submodules
//! - `runner` - convergence loop, growth schedule, process-metric summary

mod runner;

pub use runner::{ClusterRun, GrowthSchedule, RunConfig, Runner};
