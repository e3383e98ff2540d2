//! Result value types shared by the metric and process-metric catalogs.

use indexmap::IndexMap;
use serde::Serialize;

/// One computed metric value.
///
/// Serializes untagged so an exported record reads as plain JSON scalars,
/// matrices, and index lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A plain scalar (counts are reported as numbers too).
    Number(f64),
    /// An upper-triangular pairwise matrix.
    Matrix(Vec<Vec<f64>>),
    /// A list of iteration labels.
    Labels(Vec<u32>),
}

impl MetricValue {
    /// The scalar payload, if this is a plain number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

/// Metric-name → value dictionary for one iteration, in catalog order.
pub type MetricRecord = IndexMap<String, MetricValue>;

/// The full per-iteration result sequence, keyed by stringified iteration
/// label in insertion order. The terminal process-metric aggregate is kept
/// separately by the runner and exported under the label `"whole"`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RunHistory {
    records: IndexMap<String, MetricRecord>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record the metrics of iteration `label`.
    pub fn insert(&mut self, label: u32, record: MetricRecord) {
        self.records.insert(label.to_string(), record);
    }

    pub fn get(&self, label: &str) -> Option<&MetricRecord> {
        self.records.get(label)
    }

    /// Iterate the numerically labeled records in insertion order.
    ///
    /// Non-numeric labels are skipped, so a history that has already had an
    /// aggregate record attached still folds correctly.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (u32, &MetricRecord)> {
        self.records
            .iter()
            .filter_map(|(label, record)| label.parse::<u32>().ok().map(|n| (n, record)))
    }
}
