//! Iterative morphological clustering of 2-D building footprints.
//!
//! Footprints are validated, repeatedly grown (buffered) and merged
//! (unioned) until they coalesce into a single cluster, while a catalog of
//! metrics measures every intermediate state and a second catalog of
//! process metrics summarizes the whole iteration sequence.
//!
//! The crate is a library: reading footprints from geographic file
//! formats, rendering, and persistence are collaborator concerns. The
//! typical entry points are [`Collection::from_geometries`] to build a
//! collision-free initial state and [`Runner::run`] to drive the loop.
//!
//! ```ignore
//! use morphocluster::{Collection, RunConfig, Runner};
//!
//! let collection = Collection::from_geometries(geometries)?;
//! let run = Runner::new(RunConfig::default_catalog()).run(collection)?;
//! println!("{}", serde_json::to_string(&run.history)?);
//! ```

pub mod cluster;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod pipeline;

pub use cluster::{Collection, Footprint, Iteration, Uniter};
pub use error::ClusterError;
pub use geometry::RepairOutcome;
pub use metrics::{
    resolve_metrics, MetricContext, MetricKind, MetricRecord, MetricValue, ProcessMetricKind,
    RunHistory,
};
pub use pipeline::{ClusterRun, GrowthSchedule, RunConfig, Runner};
