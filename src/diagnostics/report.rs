use super::stages::{MatchFilterStats, PointAssignmentStats, RegionExtent};
use super::timing::TimingBreakdown;
use crate::association::RegionLink;
use crate::ttc::{CameraTtc, LidarTtc};
use crate::types::RegionId;
use serde::Serialize;

/// Both TTC estimates for one associated region pair.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtcEstimate {
    pub prev_id: RegionId,
    pub curr_id: RegionId,
    pub lidar: LidarTtc,
    pub camera: CameraTtc,
    pub extent: RegionExtent,
}

impl TtcEstimate {
    /// `true` when both estimates are finite and the range estimate saw
    /// in-lane points in both frames.
    pub fn is_complete(&self) -> bool {
        self.lidar.is_usable() && self.camera.ttc.is_finite()
    }
}

/// Result of [`FusionPipeline::process`](crate::FusionPipeline::process).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionReport {
    pub associations: Vec<RegionLink>,
    pub estimates: Vec<TtcEstimate>,
    pub point_assignment: PointAssignmentStats,
    pub match_filters: Vec<MatchFilterStats>,
    pub timings: TimingBreakdown,
}

impl FusionReport {
    pub fn estimate_for(&self, curr_id: RegionId) -> Option<&TtcEstimate> {
        self.estimates.iter().find(|e| e.curr_id == curr_id)
    }

    pub fn print_text_summary(&self) {
        println!(
            "points: {} total, {} assigned, {} outside, {} ambiguous",
            self.point_assignment.total,
            self.point_assignment.assigned,
            self.point_assignment.outside,
            self.point_assignment.ambiguous
        );
        for link in &self.associations {
            match link.curr_id {
                Some(curr) => println!("region {} => {} ({} votes)", link.prev_id, curr, link.votes),
                None => println!("region {} => no match", link.prev_id),
            }
        }
        for e in &self.estimates {
            println!(
                "region {}: ttc lidar={:.3}s camera={:.3}s (min_x={:.2}m, {} pts, {} matches)",
                e.curr_id,
                e.lidar.ttc,
                e.camera.ttc,
                e.lidar.min_x_curr,
                e.extent.points,
                e.camera.matches
            );
        }
        println!(
            "total: {:.3} ms ({:.3} ms in stages)",
            self.timings.total_ms,
            self.timings.stages_ms()
        );
    }
}
