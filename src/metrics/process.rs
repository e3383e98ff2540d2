//! Process metrics: folds over the whole per-iteration result sequence.

use crate::error::{ClusterError, Result};
use crate::metrics::{MetricRecord, MetricValue, RunHistory};

/// One cross-iteration summary statistic, applied to a chosen base field
/// of the iteration records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMetricKind {
    Xy,
    TotalSum,
    TotalNrSum,
    MaxVariation,
    IterMaxVariation,
    ClustersReductionDistance,
}

impl ProcessMetricKind {
    /// Every process metric, in the canonical configuration order.
    pub const ALL: [ProcessMetricKind; 6] = [
        Self::Xy,
        Self::TotalSum,
        Self::TotalNrSum,
        Self::MaxVariation,
        Self::IterMaxVariation,
        Self::ClustersReductionDistance,
    ];

    /// Resolve a configured process-metric name; unknown names fail fast.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "xy" => Self::Xy,
            "total_sum" => Self::TotalSum,
            "total_nr_sum" => Self::TotalNrSum,
            "max_variation" => Self::MaxVariation,
            "iter_max_variation" => Self::IterMaxVariation,
            "clusters_reduction_distance" => Self::ClustersReductionDistance,
            _ => {
                return Err(ClusterError::UnknownProcessMetric {
                    name: name.to_string(),
                })
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::TotalSum => "total_sum",
            Self::TotalNrSum => "total_nr_sum",
            Self::MaxVariation => "max_variation",
            Self::IterMaxVariation => "iter_max_variation",
            Self::ClustersReductionDistance => "clusters_reduction_distance",
        }
    }

    /// Fold the history's `field` values into one summary value.
    pub fn calculate(&self, history: &RunHistory, field: &str) -> Result<MetricValue> {
        match self {
            Self::Xy => xy(history, field),
            Self::TotalSum => total_sum(history, field),
            Self::TotalNrSum => total_nr_sum(history, field),
            Self::MaxVariation => max_variation(history, field),
            Self::IterMaxVariation => iter_max_variation(history, field),
            Self::ClustersReductionDistance => clusters_reduction(history, field),
        }
    }
}

/// Numeric field lookup with precise failure labels.
fn field_value(label: u32, record: &MetricRecord, field: &str) -> Result<f64> {
    let value = record.get(field).ok_or_else(|| ClusterError::MissingField {
        label: label.to_string(),
        field: field.to_string(),
    })?;
    value.as_number().ok_or_else(|| ClusterError::NonNumericField {
        label: label.to_string(),
        field: field.to_string(),
    })
}

/// Earliest iteration whose index equals the (truncated) field value,
/// short-circuiting on the first positive partial sum; iterations whose
/// index exceeds the value contribute `value - 1`.
fn xy(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut acc = 0.0;
    for (label, record) in history.iter_numbered() {
        let value = field_value(label, record, field)?.trunc();
        let index = label as f64;
        if index == value {
            acc += index;
        } else if index > value {
            acc += value - 1.0;
        }
        if acc > 0.0 {
            break;
        }
    }
    Ok(MetricValue::Number(acc))
}

/// Sum of the raw field value across all iterations.
fn total_sum(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut acc = 0.0;
    for (label, record) in history.iter_numbered() {
        acc += field_value(label, record, field)?;
    }
    Ok(MetricValue::Number(acc))
}

/// Like `total_sum`, but an iteration whose whole record repeats the
/// previous record verbatim is skipped.
fn total_nr_sum(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut acc = 0.0;
    let mut previous: Option<&MetricRecord> = None;
    for (label, record) in history.iter_numbered() {
        if previous != Some(record) {
            acc += field_value(label, record, field)?;
        }
        previous = Some(record);
    }
    Ok(MetricValue::Number(acc))
}

/// Largest drop of the field between consecutive iterations; never
/// negative.
fn max_variation(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut best = 0.0_f64;
    let mut previous: Option<f64> = None;
    for (label, record) in history.iter_numbered() {
        let value = field_value(label, record, field)?;
        if let Some(prev) = previous {
            best = best.max(prev - value);
        }
        previous = Some(value);
    }
    Ok(MetricValue::Number(best))
}

/// 0-based position, within the sequence of consecutive differences, of
/// the maximum drop; ties resolve to the earliest position, and 0 when
/// fewer than two iterations exist.
fn iter_max_variation(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut diffs = Vec::new();
    let mut previous: Option<f64> = None;
    for (label, record) in history.iter_numbered() {
        let value = field_value(label, record, field)?;
        if let Some(prev) = previous {
            diffs.push(prev - value);
        }
        previous = Some(value);
    }
    let mut best = f64::NEG_INFINITY;
    let mut position = 0usize;
    for (i, diff) in diffs.iter().enumerate() {
        if *diff > best {
            best = *diff;
            position = i;
        }
    }
    Ok(MetricValue::Number(position as f64))
}

/// Iteration labels where the field dropped by at least half of its
/// previous value.
fn clusters_reduction(history: &RunHistory, field: &str) -> Result<MetricValue> {
    let mut labels = Vec::new();
    let mut previous: Option<f64> = None;
    for (label, record) in history.iter_numbered() {
        let value = field_value(label, record, field)?;
        if let Some(prev) = previous {
            if prev - value >= prev * 0.5 {
                labels.push(label);
            }
        }
        previous = Some(value);
    }
    Ok(MetricValue::Labels(labels))
}
