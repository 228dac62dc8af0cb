//! Core data model shared by the association and estimation stages.
//!
//! Range points and keypoints are immutable inputs produced upstream. An
//! [`ObjectRegion`] owns the collections filled during association, so every
//! stage mutates at most the region it was handed.
use serde::{Deserialize, Serialize};

/// Single range-sensor return in sensor-frame metres (x forward, y left, z up).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LidarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Reflectivity, carried through untouched.
    pub r: f64,
}

impl LidarPoint {
    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r }
    }

    /// Spatial part only, as used by the k-d tree.
    #[inline]
    pub fn xyz(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Keypoint location in image pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub x: f64,
    pub y: f64,
}

impl KeyPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &KeyPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pairing of a previous-frame keypoint with a current-frame keypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointMatch {
    pub prev_idx: usize,
    pub curr_idx: usize,
}

impl KeypointMatch {
    pub fn new(prev_idx: usize, curr_idx: usize) -> Self {
        Self { prev_idx, curr_idx }
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// Containment is half-open: the left/top edges belong to the rectangle,
/// the right/bottom edges do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.x <= px && px < self.x + self.width && self.y <= py && py < self.y + self.height
    }

    #[inline]
    pub fn contains_keypoint(&self, kp: &KeyPoint) -> bool {
        self.contains(kp.x, kp.y)
    }

    /// Shrink symmetrically by `factor` of the width and height, keeping the centre.
    pub fn shrink(&self, factor: f64) -> Rect {
        Rect {
            x: self.x + factor * self.width / 2.0,
            y: self.y + factor * self.height / 2.0,
            width: self.width * (1.0 - factor),
            height: self.height * (1.0 - factor),
        }
    }
}

pub type RegionId = u32;

/// Detected object region plus the range points and matches associated to it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRegion {
    pub id: RegionId,
    pub roi: Rect,
    #[serde(default)]
    pub lidar_points: Vec<LidarPoint>,
    #[serde(default)]
    pub matches: Vec<KeypointMatch>,
}

impl ObjectRegion {
    pub fn new(id: RegionId, roi: Rect) -> Self {
        Self {
            id,
            roi,
            lidar_points: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Drop everything collected by previous association runs.
    pub fn clear_associations(&mut self) {
        self.lidar_points.clear();
        self.matches.clear();
    }
}

/// One synchronised camera/range frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub keypoints: Vec<KeyPoint>,
    pub regions: Vec<ObjectRegion>,
    #[serde(default)]
    pub lidar_points: Vec<LidarPoint>,
}

impl Frame {
    pub fn region(&self, id: RegionId) -> Option<&ObjectRegion> {
        self.regions.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(10.0, 20.0), "top-left corner is inside");
        assert!(!r.contains(40.0, 30.0), "right edge is outside");
        assert!(!r.contains(20.0, 60.0), "bottom edge is outside");
        assert!(r.contains(39.999, 59.999));
    }

    #[test]
    fn shrink_keeps_centre() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).shrink(0.2);
        assert_eq!(r, Rect::new(10.0, 5.0, 80.0, 40.0));
        let c0 = (50.0, 25.0);
        assert_eq!((r.x + r.width / 2.0, r.y + r.height / 2.0), c0);
    }
}
