//! Ordered footprint container.

use geo::{Geometry, MultiPolygon, Polygon};

use crate::cluster::{Footprint, Uniter};
use crate::error::Result;
use crate::geometry::kernel;

/// An ordered sequence of footprints.
///
/// Insertion order is iteration order and no deduplication happens here.
/// A collection built through [`Uniter`] additionally carries the
/// clustering invariant: no two elements share positive area.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<Footprint>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a single footprint.
    pub fn add(&mut self, footprint: Footprint) {
        self.items.push(footprint);
    }

    /// Append every footprint of a sequence, in order.
    pub fn extend(&mut self, footprints: impl IntoIterator<Item = Footprint>) {
        self.items.extend(footprints);
    }

    pub fn get(&self, index: usize) -> Option<&Footprint> {
        self.items.get(index)
    }

    /// Fresh forward cursor over the backing sequence.
    pub fn iter(&self) -> std::slice::Iter<'_, Footprint> {
        self.items.iter()
    }

    pub(crate) fn into_items(self) -> Vec<Footprint> {
        self.items
    }

    /// Build a collision-free collection from raw geometries.
    ///
    /// Every geometry becomes a footprint and is merged through the
    /// [`Uniter`], so inputs that already overlap coalesce immediately.
    /// The result is shifted so its bottom-left corner sits at the origin.
    pub fn from_geometries(geometries: impl IntoIterator<Item = Geometry<f64>>) -> Result<Self> {
        let mut collection = Collection::new();
        for geometry in geometries {
            collection = Uniter::merge(collection, Footprint::new(geometry)?);
        }
        Ok(collection.shift_to_origin())
    }

    /// Translate every footprint so the set's minimum corner is (0, 0).
    pub fn shift_to_origin(&self) -> Self {
        let shapes = self.shapes();
        let Some(corner) = kernel::min_corner(&shapes) else {
            return self.clone();
        };
        let mut shifted = Collection::new();
        for footprint in &self.items {
            shifted.add(Footprint::from_shape(kernel::translate(
                footprint.shape(),
                -corner.x(),
                -corner.y(),
            )));
        }
        shifted
    }

    /// Convex hull of the whole set.
    pub fn hull(&self) -> Polygon<f64> {
        kernel::convex_hull(&self.shapes())
    }

    fn shapes(&self) -> Vec<&MultiPolygon<f64>> {
        self.items.iter().map(Footprint::shape).collect()
    }
}

impl IntoIterator for Collection {
    type Item = Footprint;
    type IntoIter = std::vec::IntoIter<Footprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Footprint;
    type IntoIter = std::slice::Iter<'a, Footprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
