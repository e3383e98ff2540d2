//! Best-effort polygon validity repair and multi-part fusion.
//!
//! Invalid rings (self-touching exteriors, bow-ties from digitized
//! footprints) are repaired by simplifying with a linearly increasing
//! tolerance. The ladder is bounded: past the ceiling the shape is kept
//! as-is and the failure is surfaced as a status, not an error, so callers
//! can still decide to reject degenerate inputs.

use geo::{BooleanOps, Buffer, MultiPolygon, Polygon, Simplify, Validation};
use tracing::warn;

/// Tolerance added per repair attempt.
pub const TOLERANCE_STEP: f64 = 0.5;

/// Repair gives up once the tolerance reaches this value.
pub const TOLERANCE_CEILING: f64 = 10.0;

/// Outward offset applied to each part when fusing a multi-polygon.
const FUSE_EPSILON: f64 = 1e-3;

/// How construction left a footprint's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepairOutcome {
    /// The shape was valid as supplied.
    Clean,
    /// The shape was invalid and became valid after simplification with
    /// the recorded tolerance.
    Repaired { tolerance: f64 },
    /// The tolerance ceiling was reached without achieving validity; the
    /// best-effort shape is kept and downstream predicates may see
    /// degenerate geometry.
    Exhausted,
}

impl RepairOutcome {
    /// True unless repair gave up.
    pub fn is_valid(&self) -> bool {
        !matches!(self, RepairOutcome::Exhausted)
    }
}

/// Repair a single polygon by iterative simplification.
///
/// The tolerance starts at [`TOLERANCE_STEP`] and grows by the same step
/// each round, simplifying the previous round's output, until the polygon
/// is valid or the ceiling is reached.
pub fn repair_polygon(polygon: Polygon<f64>) -> (MultiPolygon<f64>, RepairOutcome) {
    if polygon.is_valid() {
        return (MultiPolygon::new(vec![polygon]), RepairOutcome::Clean);
    }
    let mut tolerance = 0.0;
    let mut current = polygon;
    loop {
        tolerance += TOLERANCE_STEP;
        current = current.simplify(tolerance);
        if current.is_valid() {
            return (
                MultiPolygon::new(vec![current]),
                RepairOutcome::Repaired { tolerance },
            );
        }
        if tolerance >= TOLERANCE_CEILING {
            warn!(tolerance, "polygon still invalid at repair ceiling");
            return (MultiPolygon::new(vec![current]), RepairOutcome::Exhausted);
        }
    }
}

/// Fuse the parts of a multi-polygon into as few parts as possible.
///
/// Each part is buffered outward by a minute epsilon and unioned into the
/// accumulator, left to right, so parts separated only by digitizing slack
/// coalesce. Parts that are genuinely disconnected stay separate parts of
/// the result.
pub fn fuse_parts(shape: MultiPolygon<f64>) -> (MultiPolygon<f64>, RepairOutcome) {
    let mut parts = shape.0.into_iter();
    let Some(first) = parts.next() else {
        return (MultiPolygon::new(Vec::new()), RepairOutcome::Clean);
    };
    let mut fused = first.buffer(FUSE_EPSILON);
    for part in parts {
        fused = fused.union(&part.buffer(FUSE_EPSILON));
    }
    let outcome = validity_outcome(&fused);
    (fused, outcome)
}

/// Classify an already-built shape (e.g. a buffer output) by validity.
pub fn validity_outcome(shape: &MultiPolygon<f64>) -> RepairOutcome {
    if shape.is_valid() {
        RepairOutcome::Clean
    } else {
        warn!("derived shape failed validity check");
        RepairOutcome::Exhausted
    }
}
