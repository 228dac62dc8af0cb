//! Association of raw measurements with object regions.
//!
//! - [`points`]: range points → regions of the same frame (via projection).
//! - [`matches`]: keypoint matches → one region, with displacement filtering.
//! - [`regions`]: previous-frame regions → current-frame regions.

pub mod matches;
pub mod points;
pub mod regions;

pub use matches::{cluster_matches_with_region, cluster_matches_with_regions};
pub use points::cluster_lidar_with_regions;
pub use regions::{match_regions, RegionLink, RegionMatches};
