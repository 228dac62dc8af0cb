use crate::types::{ObjectRegion, RegionId};
use serde::{Deserialize, Serialize};

/// Outcome of one outlier-rejection call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    pub input: usize,
    pub clusters: usize,
    /// Size of the kept cluster.
    pub largest: usize,
}

/// Counters of the range point → region assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointAssignmentStats {
    pub total: usize,
    pub assigned: usize,
    /// Enclosed by no shrunk region.
    pub outside: usize,
    /// Enclosed by more than one shrunk region.
    pub ambiguous: usize,
}

/// Counters of the match → region assignment for one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilterStats {
    pub region_id: RegionId,
    pub enclosed: usize,
    pub removed: usize,
    pub kept: usize,
    pub mean_displacement_px: f64,
}

/// Top-view summary of the range points assigned to a region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionExtent {
    pub region_id: RegionId,
    pub points: usize,
    /// Closest forward distance (metres); `None` without points.
    pub min_x: Option<f64>,
    /// `max(y) − min(y)` (metres); `None` without points.
    pub lateral_extent: Option<f64>,
}

impl RegionExtent {
    pub fn from_region(region: &ObjectRegion) -> Self {
        let pts = &region.lidar_points;
        let bounds = pts.iter().fold(None, |acc: Option<(f64, f64, f64)>, p| {
            Some(match acc {
                None => (p.x, p.y, p.y),
                Some((xmin, ymin, ymax)) => (xmin.min(p.x), ymin.min(p.y), ymax.max(p.y)),
            })
        });
        Self {
            region_id: region.id,
            points: pts.len(),
            min_x: bounds.map(|b| b.0),
            lateral_extent: bounds.map(|b| b.2 - b.1),
        }
    }
}
