//! Range-point pre-filtering.
//!
//! Keeps only returns inside a forward box in front of the platform and above
//! a reflectivity floor, which strips road-surface hits and far clutter before
//! points are projected into the image.
use crate::types::LidarPoint;
use serde::{Deserialize, Serialize};

/// Forward crop box in sensor-frame metres.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LidarCrop {
    pub min_x: f64,
    pub max_x: f64,
    /// Half-width of the box; points with `|y| > max_y` are dropped.
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Minimum reflectivity.
    pub min_r: f64,
}

impl Default for LidarCrop {
    fn default() -> Self {
        Self {
            min_x: 2.0,
            max_x: 20.0,
            max_y: 2.0,
            min_z: -1.5,
            max_z: -0.9,
            min_r: 0.1,
        }
    }
}

impl LidarCrop {
    #[inline]
    pub fn keeps(&self, p: &LidarPoint) -> bool {
        p.x >= self.min_x
            && p.x <= self.max_x
            && p.y.abs() <= self.max_y
            && p.z >= self.min_z
            && p.z <= self.max_z
            && p.r >= self.min_r
    }
}

/// Retain the points inside `crop`, preserving order.
pub fn crop_lidar_points(points: &mut Vec<LidarPoint>, crop: &LidarCrop) {
    points.retain(|p| crop.keeps(p));
}
