//! Range point → object region assignment.
//!
//! Each point is projected into the image and tested against every region
//! after shrinking it by `shrink_factor`. A point is kept only when exactly
//! one shrunk region encloses it; points seen by several overlapping regions
//! are ambiguous and dropped rather than given to the nearest or first one.
use crate::calibration::{project_with, Calibration};
use crate::diagnostics::PointAssignmentStats;
use crate::error::FusionError;
use crate::types::{LidarPoint, ObjectRegion, Rect};
use log::debug;

/// Append each unambiguous point to its enclosing region's `lidar_points`.
pub fn cluster_lidar_with_regions(
    regions: &mut [ObjectRegion],
    points: &[LidarPoint],
    shrink_factor: f64,
    calibration: &Calibration,
) -> Result<PointAssignmentStats, FusionError> {
    if !(0.0..1.0).contains(&shrink_factor) {
        return Err(FusionError::InvalidShrinkFactor {
            value: shrink_factor,
        });
    }
    let shrunk: Vec<Rect> = regions.iter().map(|r| r.roi.shrink(shrink_factor)).collect();
    let composite = calibration.composite();

    let mut stats = PointAssignmentStats {
        total: points.len(),
        ..Default::default()
    };
    for point in points {
        let [u, v] = project_with(&composite, point);
        let mut enclosing = shrunk
            .iter()
            .enumerate()
            .filter(|(_, roi)| roi.contains(u, v))
            .map(|(i, _)| i);
        match (enclosing.next(), enclosing.next()) {
            (Some(idx), None) => {
                regions[idx].lidar_points.push(*point);
                stats.assigned += 1;
            }
            (None, _) => stats.outside += 1,
            (Some(_), Some(_)) => stats.ambiguous += 1,
        }
    }
    debug!(
        "cluster_lidar_with_regions: {} points, {} assigned, {} outside, {} ambiguous",
        stats.total, stats.assigned, stats.outside, stats.ambiguous
    );
    Ok(stats)
}
