//! The convergence loop: grow and re-merge until one cluster remains,
//! recording metrics at every step and folding process metrics at the end.

use anyhow::Context;
use geo::Polygon;
use rayon::prelude::*;
use tracing::info;

use crate::cluster::{Collection, Iteration};
use crate::error::Result;
use crate::metrics::{
    resolve_metrics, MetricContext, MetricKind, MetricRecord, ProcessMetricKind, RunHistory,
};

/// Growth offset supplied to each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthSchedule {
    /// The same offset every iteration.
    Constant(f64),
    /// Offset `step × i` at iteration `i`, so growth accelerates.
    Ramp(f64),
}

impl GrowthSchedule {
    /// The offset applied when producing iteration `iteration` (>= 1).
    pub fn offset_at(&self, iteration: u32) -> f64 {
        match self {
            GrowthSchedule::Constant(offset) => *offset,
            GrowthSchedule::Ramp(step) => step * f64::from(iteration),
        }
    }
}

/// Everything the driver needs to run one clustering analysis.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub schedule: GrowthSchedule,
    /// Hard cap on growth steps; the loop also stops once one cluster
    /// remains.
    pub max_iterations: u32,
    /// Ordered per-iteration metric catalog.
    pub metrics: Vec<MetricKind>,
    /// Ordered process-metric catalog.
    pub process_metrics: Vec<ProcessMetricKind>,
    /// Base fields folded by every process metric.
    pub tracked_fields: Vec<String>,
    /// Optional sample region for `area_ratio_cell`.
    pub sample: Option<Polygon<f64>>,
}

impl RunConfig {
    /// The standard analysis configuration.
    pub fn default_catalog() -> Self {
        Self {
            schedule: GrowthSchedule::Constant(1.0),
            max_iterations: 100,
            metrics: vec![
                MetricKind::ClusterNumber,
                MetricKind::Dlimit,
                MetricKind::MinimumClusterDistance,
                MetricKind::Hindex,
                MetricKind::TotalPerimeter,
                MetricKind::TotalArea,
                MetricKind::AreaRatio,
                MetricKind::DistanceMatrixMean,
            ],
            process_metrics: ProcessMetricKind::ALL.to_vec(),
            tracked_fields: vec!["cluster_number".to_string(), "total_area".to_string()],
            sample: None,
        }
    }

    /// Build a config from externally supplied metric registries.
    ///
    /// Both lists resolve through the catalogs; an unknown name fails here,
    /// before any geometry is touched.
    pub fn with_names<S: AsRef<str>>(metric_names: &[S], process_names: &[S]) -> Result<Self> {
        let metrics = resolve_metrics(metric_names)?;
        let process_metrics = process_names
            .iter()
            .map(|name| ProcessMetricKind::from_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            metrics,
            process_metrics,
            ..Self::default_catalog()
        })
    }
}

/// Output of a full clustering run.
pub struct ClusterRun {
    /// Per-iteration metric records, keyed by stringified iteration label.
    pub history: RunHistory,
    /// Process-metric aggregate, keyed `"{field}_{process_metric}"`; meant
    /// to be exported under the label `"whole"`.
    pub summary: MetricRecord,
    /// The terminal clustering state.
    pub final_collection: Collection,
    /// Label of the last recorded iteration.
    pub iterations: u32,
}

/// Drives the metric/grow/re-merge loop over a starting collection.
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run to convergence, discarding intermediate collections.
    pub fn run(&self, initial: Collection) -> anyhow::Result<ClusterRun> {
        self.run_with(initial, |_, _| {})
    }

    /// Run to convergence, handing every iteration's collection to
    /// `observer` (for rendering or export) before it is consumed.
    pub fn run_with(
        &self,
        initial: Collection,
        mut observer: impl FnMut(u32, &Collection),
    ) -> anyhow::Result<ClusterRun> {
        let hull = initial.hull();
        // The first-iteration state stays alive for the whole run as the
        // topology reference for hindex and distance-ratio metrics.
        let reference = initial.clone();
        let context = MetricContext {
            initial: Some(&reference),
            hull: Some(&hull),
            sample: self.config.sample.as_ref(),
        };

        let mut history = RunHistory::new();
        let mut current = initial;
        let mut label = 0u32;
        loop {
            let record = self
                .record_metrics(&current, &context)
                .with_context(|| format!("computing metrics for iteration {label}"))?;
            observer(label, &current);
            let clusters = current.len();
            info!(iteration = label, clusters, "recorded iteration metrics");
            history.insert(label, record);

            if clusters <= 1 || label >= self.config.max_iterations {
                break;
            }
            label += 1;
            let offset = self.config.schedule.offset_at(label);
            current = Iteration::new(current, offset)?.make()?;
        }

        let mut summary = MetricRecord::new();
        for field in &self.config.tracked_fields {
            for process_metric in &self.config.process_metrics {
                let value = process_metric
                    .calculate(&history, field)
                    .with_context(|| format!("folding '{}' over '{}'", process_metric.name(), field))?;
                summary.insert(format!("{}_{}", field, process_metric.name()), value);
            }
        }

        Ok(ClusterRun {
            history,
            summary,
            final_collection: current,
            iterations: label,
        })
    }

    /// Compute the configured metrics for one state, in catalog order.
    ///
    /// Metrics are read-only over the same collection, so they run in
    /// parallel; the record preserves catalog order regardless.
    fn record_metrics(
        &self,
        collection: &Collection,
        context: &MetricContext<'_>,
    ) -> Result<MetricRecord> {
        let computed: Vec<_> = self
            .config
            .metrics
            .par_iter()
            .map(|metric| (metric.name(), metric.calculate(collection, context)))
            .collect();
        let mut record = MetricRecord::new();
        for (name, value) in computed {
            record.insert(name.to_string(), value?);
        }
        Ok(record)
    }
}
