//! Geometry kernel adapter
//!
//! Wraps the `geo` crate behind the handful of operations the clustering
//! core needs, plus best-effort validity repair.
//!
//! # Submodules
//! - `kernel` - buffer, union, predicates, distances, measurements
//! - `repair` - validity repair ladder and multi-part fusion

pub mod kernel;
mod repair;

pub use repair::{
    fuse_parts, repair_polygon, validity_outcome, RepairOutcome, TOLERANCE_CEILING, TOLERANCE_STEP,
};
