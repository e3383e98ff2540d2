//! One grow-and-remerge step of the clustering loop.

use crate::cluster::{Collection, Uniter};
use crate::error::{ClusterError, Result};

/// Advances clustering state by one unit of outward growth.
///
/// Consumes the input collection: once [`Iteration::make`] has produced the
/// next state, nothing aliases the old one.
pub struct Iteration {
    collection: Collection,
    offset: f64,
}

impl Iteration {
    /// Stage an iteration over `collection` with the given growth offset.
    pub fn new(collection: Collection, offset: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(ClusterError::NonFiniteOffset { value: offset });
        }
        Ok(Self { collection, offset })
    }

    /// Grow every element by the offset, then re-merge the grown candidates
    /// into a fresh collection, in the original order.
    pub fn make(self) -> Result<Collection> {
        let mut grown = Vec::with_capacity(self.collection.len());
        for footprint in &self.collection {
            grown.push(footprint.grow(self.offset)?);
        }
        let mut merged = Collection::new();
        for candidate in grown {
            merged = Uniter::merge(merged, candidate);
        }
        Ok(merged)
    }
}
