//! Time-to-collision estimators.
//!
//! - [`lidar`]: closest in-lane range point after outlier rejection.
//! - [`camera`]: median keypoint distance ratio.
//!
//! Neither estimator fails on degenerate data: NaN or infinite values mean
//! "not enough information this frame" and are left to the caller.

pub mod camera;
pub mod lidar;

pub use camera::{compute_ttc_camera, median, ttc_from_distance_ratios, CameraTtc};
pub use lidar::{compute_ttc_lidar, LidarTtc};
