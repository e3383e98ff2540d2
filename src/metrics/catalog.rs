//! The per-iteration metric catalog.
//!
//! Metrics form a closed enumeration instead of a string-keyed class
//! registry, so dispatch is exhaustive at compile time; string names only
//! enter at the configuration boundary through [`MetricKind::from_name`].

use geo::Polygon;

use crate::cluster::Collection;
use crate::error::{ClusterError, Result};
use crate::metrics::iteration_metrics as calc;
use crate::metrics::MetricValue;

/// Rounded pairwise distance matched by `clusters_at_distance`.
const DISTANCE_AT: f64 = 5.0;

/// Fraction of the reference Dlimit matched by
/// `clusters_at_percent_distance`.
const DLIMIT_FRACTION: f64 = 0.25;

/// References handed to metrics alongside the current collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricContext<'a> {
    /// The first-iteration collection, kept immutable across the run as
    /// the topology reference.
    pub initial: Option<&'a Collection>,
    /// Convex hull of the original footprint set.
    pub hull: Option<&'a Polygon<f64>>,
    /// Optional sample region overriding the hull for cell ratios.
    pub sample: Option<&'a Polygon<f64>>,
}

/// One per-iteration metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    ClusterNumber,
    MinimumClusterDistance,
    Dlimit,
    TotalArea,
    TotalPerimeter,
    DistanceMatrix,
    DistanceMatrixMean,
    DistanceMatrixSum,
    Hindex,
    AreaRatio,
    AreaRatioCell,
    ClustersAtDistance,
    ClustersAtPercentDistance,
}

impl MetricKind {
    /// Resolve a configured metric name. Unknown names fail fast, before
    /// any geometric computation runs.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "cluster_number" => Self::ClusterNumber,
            "minimum_cluster_distance" => Self::MinimumClusterDistance,
            "Dlimit" => Self::Dlimit,
            "total_area" => Self::TotalArea,
            "total_perimeter" => Self::TotalPerimeter,
            "distance_matrix" => Self::DistanceMatrix,
            "distance_matrix_mean" => Self::DistanceMatrixMean,
            "distance_matrix_sum" => Self::DistanceMatrixSum,
            "hindex" => Self::Hindex,
            "area_ratio" => Self::AreaRatio,
            "area_ratio_cell" => Self::AreaRatioCell,
            "clusters_at_distance" => Self::ClustersAtDistance,
            "clusters_at_percent_distance" => Self::ClustersAtPercentDistance,
            _ => {
                return Err(ClusterError::UnknownMetric {
                    name: name.to_string(),
                })
            }
        })
    }

    /// The configuration/export name of this metric.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClusterNumber => "cluster_number",
            Self::MinimumClusterDistance => "minimum_cluster_distance",
            Self::Dlimit => "Dlimit",
            Self::TotalArea => "total_area",
            Self::TotalPerimeter => "total_perimeter",
            Self::DistanceMatrix => "distance_matrix",
            Self::DistanceMatrixMean => "distance_matrix_mean",
            Self::DistanceMatrixSum => "distance_matrix_sum",
            Self::Hindex => "hindex",
            Self::AreaRatio => "area_ratio",
            Self::AreaRatioCell => "area_ratio_cell",
            Self::ClustersAtDistance => "clusters_at_distance",
            Self::ClustersAtPercentDistance => "clusters_at_percent_distance",
        }
    }

    /// Compute this metric on one clustering state.
    pub fn calculate(
        &self,
        collection: &Collection,
        context: &MetricContext<'_>,
    ) -> Result<MetricValue> {
        Ok(match self {
            Self::ClusterNumber => calc::cluster_number(collection).into(),
            Self::MinimumClusterDistance => calc::minimum_cluster_distance(collection).into(),
            Self::Dlimit => calc::dlimit(collection).into(),
            Self::TotalArea => {
                calc::total_area(collection, self.require_hull(context)?).into()
            }
            Self::TotalPerimeter => calc::total_perimeter(collection).into(),
            Self::DistanceMatrix => MetricValue::Matrix(calc::distance_matrix(collection)),
            Self::DistanceMatrixMean => {
                calc::matrix_mean(&calc::distance_matrix(collection)).into()
            }
            Self::DistanceMatrixSum => {
                calc::matrix_sum(&calc::distance_matrix(collection)).into()
            }
            Self::Hindex => calc::hindex(collection, self.require_initial(context)?).into(),
            Self::AreaRatio => {
                calc::area_ratio(collection, self.require_hull(context)?).into()
            }
            Self::AreaRatioCell => {
                // A supplied sample region wins over the hull.
                let region = match context.sample {
                    Some(sample) => sample,
                    None => self.require_hull(context)?,
                };
                calc::area_ratio(collection, region).into()
            }
            Self::ClustersAtDistance => calc::pairs_at_distance(collection, DISTANCE_AT).into(),
            Self::ClustersAtPercentDistance => {
                let reference = self.require_initial(context)?;
                let target = DLIMIT_FRACTION * calc::dlimit(reference);
                calc::pairs_at_distance(collection, target).into()
            }
        })
    }

    fn require_hull<'a>(&self, context: &MetricContext<'a>) -> Result<&'a Polygon<f64>> {
        context.hull.ok_or(ClusterError::MissingContext {
            metric: self.name(),
            context: "hull",
        })
    }

    fn require_initial<'a>(&self, context: &MetricContext<'a>) -> Result<&'a Collection> {
        context.initial.ok_or(ClusterError::MissingContext {
            metric: self.name(),
            context: "initial collection",
        })
    }
}

/// Resolve an ordered list of metric names into a catalog.
pub fn resolve_metrics<S: AsRef<str>>(names: &[S]) -> Result<Vec<MetricKind>> {
    names.iter().map(|n| MetricKind::from_name(n.as_ref())).collect()
}
