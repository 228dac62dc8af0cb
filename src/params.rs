//! Parameter types configuring the fusion stages.
//!
//! Groups the knobs for range-based TTC (clustering and ego-lane gating),
//! camera-based TTC (pair separation floor), and the association stages
//! (region shrink, match outlier ratio). Defaults are tuned for a forward
//! camera/range rig running at 10 Hz.

use crate::lidar::LidarCrop;
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FusionParams {
    /// Sensor frame rate in Hz; the inter-frame time is `1 / frame_rate`.
    pub frame_rate: f64,
    pub lidar: LidarTtcParams,
    pub camera: CameraTtcParams,
    pub association: AssociationParams,
    /// Optional forward-box crop applied to the current frame's range points
    /// before they are assigned to regions.
    pub crop: Option<LidarCrop>,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            frame_rate: 10.0,
            lidar: LidarTtcParams::default(),
            camera: CameraTtcParams::default(),
            association: AssociationParams::default(),
            crop: None,
        }
    }
}

/// Range-based TTC parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LidarTtcParams {
    /// Maximum neighbour distance (metres) for two points to share a cluster.
    pub cluster_tolerance: f64,
    /// Points with `|y|` above this are outside the ego lane (metres).
    pub ego_lane_half_width: f64,
}

impl Default for LidarTtcParams {
    fn default() -> Self {
        Self {
            cluster_tolerance: 0.1,
            ego_lane_half_width: 2.0,
        }
    }
}

/// Camera-based TTC parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraTtcParams {
    /// Minimum current-frame separation (pixels) for a keypoint pair to vote.
    pub min_keypoint_distance_px: f64,
}

impl Default for CameraTtcParams {
    fn default() -> Self {
        Self {
            min_keypoint_distance_px: 100.0,
        }
    }
}

/// Region association parameters.
///
/// - `shrink_factor`: fraction in `[0, 1)` removed from region width/height
///   before range points are tested against it.
/// - `match_outlier_ratio`: matches whose displacement is at least this
///   multiple of the region mean are dropped.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssociationParams {
    pub shrink_factor: f64,
    pub match_outlier_ratio: f64,
}

impl Default for AssociationParams {
    fn default() -> Self {
        Self {
            shrink_factor: 0.10,
            match_outlier_ratio: 1.5,
        }
    }
}
