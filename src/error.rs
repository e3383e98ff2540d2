//! Error types for footprint construction, metric resolution, and
//! process-metric folds.
//!
//! Geometry repair exhaustion is deliberately *not* represented here: a
//! polygon that stays invalid at the tolerance ceiling is kept and surfaced
//! through `RepairOutcome` on the footprint, so callers can decide whether
//! to reject degenerate inputs.

use thiserror::Error;

/// Failures raised by the clustering core.
///
/// All of these are fail-fast: none is retried or recovered internally.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A footprint was constructed from a non-polygonal geometry.
    #[error("expected Polygon or MultiPolygon geometry, got {kind}")]
    UnsupportedGeometry { kind: &'static str },

    /// A growth offset was NaN or infinite.
    #[error("growth offset must be finite, got {value}")]
    NonFiniteOffset { value: f64 },

    /// An unregistered per-iteration metric name was requested.
    #[error("unknown metric '{name}'")]
    UnknownMetric { name: String },

    /// An unregistered process-metric name was requested.
    #[error("unknown process metric '{name}'")]
    UnknownProcessMetric { name: String },

    /// A metric was invoked without the reference data it consumes.
    #[error("metric '{metric}' requires a {context} reference")]
    MissingContext {
        metric: &'static str,
        context: &'static str,
    },

    /// A process metric asked an iteration record for a field it lacks.
    #[error("iteration '{label}' has no field '{field}'")]
    MissingField { label: String, field: String },

    /// A process metric asked for a field that is not a plain number.
    #[error("field '{field}' of iteration '{label}' is not numeric")]
    NonNumericField { label: String, field: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
