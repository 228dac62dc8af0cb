//! Range-based TTC under a constant-velocity model.
//!
//! Both frames are cleaned with [`remove_lidar_outliers`], the closest
//! forward distance inside the ego lane is taken per frame, and
//! `TTC = d1 · dT / (d0 − d1)`. Equal minima give an infinite or NaN value,
//! and a frame without any in-lane point contributes the `1e9` sentinel.
use crate::diagnostics::ClusterStats;
use crate::params::LidarTtcParams;
use crate::spatial::remove_lidar_outliers_with_stats;
use crate::types::LidarPoint;
use log::debug;
use serde::Serialize;

/// Distance reported for a frame without any qualifying point.
pub const NO_POINT_DISTANCE: f64 = 1e9;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LidarTtc {
    pub ttc: f64,
    pub min_x_prev: f64,
    pub min_x_curr: f64,
    pub prev_clusters: ClusterStats,
    pub curr_clusters: ClusterStats,
}

impl LidarTtc {
    /// `true` when both frames had at least one in-lane point.
    pub fn has_in_lane_points(&self) -> bool {
        self.min_x_prev < NO_POINT_DISTANCE && self.min_x_curr < NO_POINT_DISTANCE
    }

    /// Finite TTC backed by real points in both frames. A one-sided sentinel
    /// produces a finite but meaningless value, which this rejects.
    pub fn is_usable(&self) -> bool {
        self.ttc.is_finite() && self.has_in_lane_points()
    }
}

/// Closest `x` among points with `|y| <= half_lane`, or the sentinel.
pub fn closest_in_lane(points: &[LidarPoint], half_lane: f64) -> f64 {
    points
        .iter()
        .filter(|p| p.y.abs() <= half_lane)
        .fold(NO_POINT_DISTANCE, |acc, p| if p.x < acc { p.x } else { acc })
}

/// Constant-velocity TTC from two closest distances.
#[inline]
pub fn ttc_from_distances(min_x_prev: f64, min_x_curr: f64, frame_rate: f64) -> f64 {
    let dt = 1.0 / frame_rate;
    min_x_curr * dt / (min_x_prev - min_x_curr)
}

/// Estimate TTC from the range points of the same object in two frames.
pub fn compute_ttc_lidar(
    prev: &[LidarPoint],
    curr: &[LidarPoint],
    frame_rate: f64,
    params: &LidarTtcParams,
) -> LidarTtc {
    let (prev_clean, prev_clusters) =
        remove_lidar_outliers_with_stats(prev, params.cluster_tolerance);
    let (curr_clean, curr_clusters) =
        remove_lidar_outliers_with_stats(curr, params.cluster_tolerance);

    let min_x_prev = closest_in_lane(&prev_clean, params.ego_lane_half_width);
    let min_x_curr = closest_in_lane(&curr_clean, params.ego_lane_half_width);
    let ttc = ttc_from_distances(min_x_prev, min_x_curr, frame_rate);
    debug!(
        "compute_ttc_lidar: min_x prev={:.3} curr={:.3} ttc={:.3}s",
        min_x_prev, min_x_curr, ttc
    );

    LidarTtc {
        ttc,
        min_x_prev,
        min_x_curr,
        prev_clusters,
        curr_clusters,
    }
}
