//! The validated footprint value type.

use geo::{Geometry, MultiPolygon, Polygon};

use crate::error::{ClusterError, Result};
use crate::geometry::{fuse_parts, kernel, repair_polygon, validity_outcome, RepairOutcome};

/// One building footprint, or one fused cluster of footprints.
///
/// Construction validates (and if necessary repairs) the geometry; the
/// result is immutable. [`Footprint::grow`] returns a new footprint rather
/// than mutating in place.
#[derive(Debug, Clone)]
pub struct Footprint {
    shape: MultiPolygon<f64>,
    repair: RepairOutcome,
}

impl Footprint {
    /// Build a footprint from a polygon or multi-polygon geometry.
    ///
    /// Single polygons go through the validity-repair ladder; multi-polygon
    /// parts are fused with an epsilon buffer. Any other geometry kind is
    /// rejected.
    pub fn new(geometry: Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::Polygon(p) => Ok(Self::from_polygon(p)),
            Geometry::MultiPolygon(mp) => {
                let (shape, repair) = fuse_parts(mp);
                Ok(Self { shape, repair })
            }
            other => Err(ClusterError::UnsupportedGeometry {
                kind: kind_name(&other),
            }),
        }
    }

    /// Build a footprint from a single polygon.
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        let (shape, repair) = repair_polygon(polygon);
        Self { shape, repair }
    }

    /// Wrap a shape produced by the kernel (buffer or union output).
    pub(crate) fn from_shape(shape: MultiPolygon<f64>) -> Self {
        let repair = validity_outcome(&shape);
        Self { shape, repair }
    }

    /// Offset the boundary by `offset`, returning a new footprint.
    ///
    /// Positive offsets grow, negative offsets shrink; keeping a
    /// non-positive offset meaningful is the caller's business. The offset
    /// must be finite.
    pub fn grow(&self, offset: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(ClusterError::NonFiniteOffset { value: offset });
        }
        Ok(Self::from_shape(kernel::buffer(&self.shape, offset)))
    }

    /// The underlying geometry.
    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    /// How construction left this geometry (clean, repaired, or kept
    /// despite exhausting the repair ladder).
    pub fn repair(&self) -> RepairOutcome {
        self.repair
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        kernel::area(&self.shape)
    }

    /// Total boundary length, interior rings included.
    pub fn perimeter(&self) -> f64 {
        kernel::perimeter(&self.shape)
    }
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
