//! Serializable reports produced by the fusion pipeline.
//!
//! `FusionReport` is the entry point: it carries the region associations,
//! one `TtcEstimate` per associated pair, per-stage counters, and timings.

pub mod report;
pub mod stages;
pub mod timing;

pub use report::{FusionReport, TtcEstimate};
pub use stages::{ClusterStats, MatchFilterStats, PointAssignmentStats, RegionExtent};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
