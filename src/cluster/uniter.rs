//! Merge engine: fuses a candidate footprint into a disjoint collection.

use tracing::debug;

use crate::cluster::{Collection, Footprint};
use crate::geometry::kernel;

/// Fuses one candidate into an existing pairwise-disjoint collection.
///
/// The fusion is transitive: two kept elements that both overlap the
/// candidate end up in one cluster even if they never overlap each other.
pub struct Uniter;

impl Uniter {
    /// Merge `candidate` into `collection`, preserving disjointness.
    ///
    /// Each sweep collects every kept element overlapping the fused
    /// candidate, removes them, and unions them into it; sweeps repeat
    /// until nothing new overlaps, so the fused result does not depend on
    /// element order. Survivors keep their relative order and the fused
    /// candidate is appended last.
    ///
    /// One sweep costs O(n) overlap tests; building an n-element
    /// collection by n sequential merges is O(n²) geometric work.
    pub fn merge(collection: Collection, candidate: Footprint) -> Collection {
        let mut kept: Vec<Option<Footprint>> = collection.into_items().into_iter().map(Some).collect();
        let mut fused = candidate;
        loop {
            let matches: Vec<usize> = kept
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| {
                    slot.as_ref()
                        .filter(|fp| kernel::overlaps(fp.shape(), fused.shape()))
                        .map(|_| i)
                })
                .collect();
            if matches.is_empty() {
                break;
            }
            debug!(fused_elements = matches.len(), "uniter sweep fused elements");
            for index in matches {
                if let Some(absorbed) = kept[index].take() {
                    fused = Footprint::from_shape(kernel::union(absorbed.shape(), fused.shape()));
                }
            }
        }
        let mut merged = Collection::new();
        merged.extend(kept.into_iter().flatten());
        merged.add(fused);
        merged
    }
}
