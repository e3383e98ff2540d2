//! Thin wrappers over the `geo` kernel.
//!
//! Everything the clustering core needs from computational geometry goes
//! through this module: buffering, boolean ops, predicates, distances, and
//! measurements. All shapes are `MultiPolygon<f64>` so that buffer and
//! union outputs never need lossy conversions.

use geo::line_measures::{Distance, Length};
use geo::{
    Area, BooleanOps, BoundingRect, Buffer, Centroid, ConvexHull, Euclidean, Intersects,
    MultiPolygon, Point, Polygon, Translate,
};

/// Offset every part of `shape` by `offset` and re-union the results.
///
/// The union of per-part buffers equals the buffer of the whole shape, and
/// only needs the single-polygon buffer primitive. Negative offsets shrink;
/// a shape can buffer away to nothing.
pub fn buffer(shape: &MultiPolygon<f64>, offset: f64) -> MultiPolygon<f64> {
    let mut parts = shape.0.iter();
    let Some(first) = parts.next() else {
        return MultiPolygon::new(Vec::new());
    };
    let mut out = first.buffer(offset);
    for part in parts {
        out = out.union(&part.buffer(offset));
    }
    out
}

/// Geometric union of two shapes.
pub fn union(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.union(b)
}

/// True when the shapes share any point, including bare boundary contact.
pub fn intersects(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    a.intersects(b)
}

/// True when the shapes share positive area.
///
/// This is the merge predicate: two clusters whose boundaries merely touch
/// (gap exactly zero after growth) stay separate until they overlap.
pub fn overlaps(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
    a.intersection(b).unsigned_area() > 0.0
}

/// Minimum Euclidean distance between two shapes, taken over part pairs.
/// Zero if either shape is empty.
pub fn distance(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
    let mut min = f64::INFINITY;
    for pa in &a.0 {
        for pb in &b.0 {
            min = min.min(Euclidean.distance(pa, pb));
        }
    }
    if min.is_finite() {
        min
    } else {
        0.0
    }
}

/// Unsigned area of a shape.
pub fn area(shape: &MultiPolygon<f64>) -> f64 {
    shape.unsigned_area()
}

/// Area of `shape ∩ clip`.
pub fn clipped_area(shape: &MultiPolygon<f64>, clip: &Polygon<f64>) -> f64 {
    let clip = MultiPolygon::new(vec![clip.clone()]);
    shape.intersection(&clip).unsigned_area()
}

/// Total boundary length: exteriors plus interior rings of every part.
pub fn perimeter(shape: &MultiPolygon<f64>) -> f64 {
    shape
        .0
        .iter()
        .map(|p| {
            Euclidean.length(p.exterior())
                + p.interiors()
                    .iter()
                    .map(|ring| Euclidean.length(ring))
                    .sum::<f64>()
        })
        .sum()
}

/// Distance between the centroids of two shapes. Zero when either shape is
/// empty and has no centroid.
pub fn centroid_distance(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
    match (a.centroid(), b.centroid()) {
        (Some(ca), Some(cb)) => Euclidean.distance(ca, cb),
        _ => 0.0,
    }
}

/// Convex hull of every vertex of every shape.
pub fn convex_hull(shapes: &[&MultiPolygon<f64>]) -> Polygon<f64> {
    let parts: Vec<Polygon<f64>> = shapes
        .iter()
        .flat_map(|mp| mp.0.iter().cloned())
        .collect();
    MultiPolygon::new(parts).convex_hull()
}

/// Bottom-left corner of the axis-aligned bounds of a set of shapes, or
/// `None` when every shape is empty.
pub fn min_corner(shapes: &[&MultiPolygon<f64>]) -> Option<Point<f64>> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for mp in shapes {
        if let Some(rect) = mp.bounding_rect() {
            min_x = min_x.min(rect.min().x);
            min_y = min_y.min(rect.min().y);
        }
    }
    (min_x.is_finite() && min_y.is_finite()).then(|| Point::new(min_x, min_y))
}

/// Translate a shape by `(dx, dy)`.
pub fn translate(shape: &MultiPolygon<f64>, dx: f64, dy: f64) -> MultiPolygon<f64> {
    shape.translate(dx, dy)
}
