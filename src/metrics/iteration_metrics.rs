//! Per-iteration metric implementations.
//!
//! Each function consumes a read-only view of one clustering state. The
//! catalog in `catalog.rs` handles naming, context requirements, and
//! dispatch; everything here is plain geometry and arithmetic.

use geo::Polygon;

use crate::cluster::Collection;
use crate::geometry::kernel;

/// Sentinel for "no pair exists"; collapses to 0 in the public results.
const NO_PAIR: f64 = 1.0e7;

/// Count of clusters in the collection.
pub(crate) fn cluster_number(collection: &Collection) -> f64 {
    collection.len() as f64
}

/// Minimum pairwise distance over all unordered cluster pairs; 0 when
/// fewer than two clusters exist.
pub(crate) fn minimum_cluster_distance(collection: &Collection) -> f64 {
    let mut min = NO_PAIR;
    for (i, a) in collection.iter().enumerate() {
        for b in collection.iter().skip(i + 1) {
            min = min.min(kernel::distance(a.shape(), b.shape()));
        }
    }
    if min == NO_PAIR {
        0.0
    } else {
        min
    }
}

/// Half the largest nearest-neighbor distance: for each cluster take the
/// distance to its closest neighbor, take the maximum over clusters, and
/// halve it. 0 when fewer than two clusters exist.
pub(crate) fn dlimit(collection: &Collection) -> f64 {
    if collection.len() < 2 {
        return 0.0;
    }
    let mut largest = 0.0_f64;
    for (i, a) in collection.iter().enumerate() {
        let mut nearest = NO_PAIR;
        for (j, b) in collection.iter().enumerate() {
            if i != j {
                nearest = nearest.min(kernel::distance(a.shape(), b.shape()));
            }
        }
        largest = largest.max(nearest);
    }
    largest / 2.0
}

/// Sum over clusters of the area of `cluster ∩ hull`.
pub(crate) fn total_area(collection: &Collection, hull: &Polygon<f64>) -> f64 {
    collection
        .iter()
        .map(|fp| kernel::clipped_area(fp.shape(), hull))
        .sum()
}

/// Sum of cluster boundary lengths; no hull clipping.
pub(crate) fn total_perimeter(collection: &Collection) -> f64 {
    collection.iter().map(|fp| fp.perimeter()).sum()
}

/// Upper-triangular matrix of pairwise centroid distances, zero on and
/// below the diagonal.
pub(crate) fn distance_matrix(collection: &Collection) -> Vec<Vec<f64>> {
    let n = collection.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for (i, a) in collection.iter().enumerate() {
        for (j, b) in collection.iter().enumerate() {
            if j > i {
                matrix[i][j] = kernel::centroid_distance(a.shape(), b.shape());
            }
        }
    }
    matrix
}

/// Sum of every matrix entry, structural zeros included.
pub(crate) fn matrix_sum(matrix: &[Vec<f64>]) -> f64 {
    matrix.iter().flatten().sum()
}

/// Mean of every matrix entry, structural zeros included; 0 for an empty
/// matrix rather than NaN.
pub(crate) fn matrix_mean(matrix: &[Vec<f64>]) -> f64 {
    let entries = matrix.iter().map(Vec::len).sum::<usize>();
    if entries == 0 {
        0.0
    } else {
        matrix_sum(matrix) / entries as f64
    }
}

/// Concentration index over the reference collection.
///
/// Counts, for each current cluster, how many reference footprints it
/// intersects, then reduces the count distribution with
/// [`hindex_from_counts`].
pub(crate) fn hindex(collection: &Collection, reference: &Collection) -> f64 {
    let counts: Vec<usize> = collection
        .iter()
        .map(|cluster| {
            reference
                .iter()
                .filter(|original| kernel::intersects(cluster.shape(), original.shape()))
                .count()
        })
        .collect();
    hindex_from_counts(&counts) as f64
}

/// Reduce a per-cluster subsumption-count distribution to the index.
///
/// Walking the distinct counts in descending order, return the first count
/// value that is at most the cumulative multiplicity of all strictly
/// larger counts; 1 when none qualifies.
pub fn hindex_from_counts(counts: &[usize]) -> u32 {
    let mut distinct: Vec<(usize, usize)> = Vec::new();
    let mut sorted = counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for value in sorted {
        match distinct.last_mut() {
            Some((v, multiplicity)) if *v == value => *multiplicity += 1,
            _ => distinct.push((value, 1)),
        }
    }
    let mut larger = 0usize;
    for (value, multiplicity) in distinct {
        if value <= larger {
            return value as u32;
        }
        larger += multiplicity;
    }
    1
}

/// Sum over clusters of `area(cluster ∩ region) / area(region)`.
pub(crate) fn area_ratio(collection: &Collection, region: &Polygon<f64>) -> f64 {
    let region_area = kernel::area(&geo::MultiPolygon::new(vec![region.clone()]));
    if region_area == 0.0 {
        return 0.0;
    }
    collection
        .iter()
        .map(|fp| kernel::clipped_area(fp.shape(), region) / region_area)
        .sum()
}

/// Count of unordered cluster pairs whose rounded distance equals `target`.
pub(crate) fn pairs_at_distance(collection: &Collection, target: f64) -> f64 {
    let mut count = 0u32;
    for (i, a) in collection.iter().enumerate() {
        for b in collection.iter().skip(i + 1) {
            if kernel::distance(a.shape(), b.shape()).round() == target {
                count += 1;
            }
        }
    }
    count as f64
}
