//! Time-to-collision estimation for objects ahead of a moving platform,
//! fusing range-sensor points with keypoint matches between two frames.
//!
//! Per frame pair the range points and matches are associated with detected
//! object regions, regions are linked across frames by match voting, and
//! TTC is estimated independently from the range data (closest in-lane point
//! of the dominant cluster) and from the image data (median keypoint
//! distance ratio).

// Public modules (stable-ish surface)
pub mod calibration;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod types;

// Building blocks, usable on their own.
pub mod association;
pub mod lidar;
pub mod spatial;
pub mod ttc;

// --- High-level re-exports -------------------------------------------------

pub use crate::calibration::Calibration;
pub use crate::error::{FrameSide, FusionError};
pub use crate::params::{AssociationParams, CameraTtcParams, FusionParams, LidarTtcParams};
pub use crate::pipeline::FusionPipeline;
pub use crate::types::{Frame, KeyPoint, KeypointMatch, LidarPoint, ObjectRegion, Rect, RegionId};

pub use crate::diagnostics::{FusionReport, TtcEstimate};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ttc_fusion::prelude::*;
///
/// # fn main() {
/// let prev = vec![LidarPoint::new(10.0, 0.0, -1.0, 0.5)];
/// let curr = vec![LidarPoint::new(9.5, 0.0, -1.0, 0.5)];
/// let out = compute_ttc_lidar(&prev, &curr, 10.0, &LidarTtcParams::default());
/// println!("ttc={:.2}s", out.ttc);
/// # }
/// ```
pub mod prelude {
    pub use crate::association::{
        cluster_lidar_with_regions, cluster_matches_with_region, match_regions,
    };
    pub use crate::spatial::remove_lidar_outliers;
    pub use crate::ttc::{compute_ttc_camera, compute_ttc_lidar};
    pub use crate::{
        Calibration, Frame, FusionParams, FusionPipeline, KeyPoint, KeypointMatch, LidarPoint,
        LidarTtcParams, ObjectRegion, Rect,
    };
}
