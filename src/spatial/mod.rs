//! Spatial indexing and clustering of range points.
//!
//! - [`kdtree`]: 3D k-d tree with radius search.
//! - [`cluster`]: Euclidean region growing on top of the tree.
//! - [`outliers`]: dominant-cluster selection used before range TTC.

pub mod cluster;
pub mod kdtree;
pub mod outliers;

pub use cluster::{euclidean_cluster, Cluster};
pub use kdtree::KdTree3;
pub use outliers::{remove_lidar_outliers, remove_lidar_outliers_with_stats};
