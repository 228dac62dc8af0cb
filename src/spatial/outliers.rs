//! Range-point outlier rejection by dominant-cluster selection.
//!
//! The largest Euclidean cluster is taken to be the object; every smaller
//! cluster is discarded as noise (ground returns, spray, neighbouring
//! clutter). No confidence is attached to the choice and a genuine second
//! object inside the same region is dropped along with the noise.
use super::cluster::euclidean_cluster;
use super::kdtree::KdTree3;
use crate::diagnostics::ClusterStats;
use crate::types::LidarPoint;
use log::debug;

/// Keep the points of the largest cluster, in discovery order.
pub fn remove_lidar_outliers(points: &[LidarPoint], cluster_tolerance: f64) -> Vec<LidarPoint> {
    remove_lidar_outliers_with_stats(points, cluster_tolerance).0
}

/// Same as [`remove_lidar_outliers`] and also reports the cluster layout.
///
/// On equal sizes the first cluster in clustering order wins.
pub fn remove_lidar_outliers_with_stats(
    points: &[LidarPoint],
    cluster_tolerance: f64,
) -> (Vec<LidarPoint>, ClusterStats) {
    if points.is_empty() {
        return (Vec::new(), ClusterStats::default());
    }
    let coords: Vec<[f64; 3]> = points.iter().map(LidarPoint::xyz).collect();
    let tree = KdTree3::from_points(&coords);
    let clusters = euclidean_cluster(&coords, &tree, cluster_tolerance);

    let mut best: Option<&Vec<usize>> = None;
    for cluster in &clusters {
        if best.map_or(true, |b| cluster.len() > b.len()) {
            best = Some(cluster);
        }
    }
    let kept: Vec<LidarPoint> = best
        .map(|c| c.iter().map(|&i| points[i]).collect())
        .unwrap_or_default();

    let stats = ClusterStats {
        input: points.len(),
        clusters: clusters.len(),
        largest: kept.len(),
    };
    debug!(
        "remove_lidar_outliers: {} points -> {} clusters, keeping {}",
        stats.input, stats.clusters, stats.largest
    );
    (kept, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(cx: f64, cy: f64, n: usize, r: f64) -> Vec<LidarPoint> {
        (0..n)
            .map(|i| LidarPoint::new(cx + 0.02 * i as f64, cy, -1.0, r))
            .collect()
    }

    #[test]
    fn keeps_the_dominant_cluster() {
        let mut points = blob(10.0, 0.0, 3, 0.1);
        points.extend(blob(20.0, 1.0, 10, 0.7));
        points.extend(blob(30.0, -1.0, 2, 0.3));
        let (kept, stats) = remove_lidar_outliers_with_stats(&points, 0.1);
        assert_eq!(stats.clusters, 3);
        assert_eq!(kept.len(), 10);
        assert!(kept.iter().all(|p| p.r == 0.7), "payload must be preserved");
        assert!(kept.iter().all(|p| (20.0..20.5).contains(&p.x)));
    }

    #[test]
    fn tie_keeps_first_cluster() {
        let mut points = blob(5.0, 0.0, 4, 0.1);
        points.extend(blob(15.0, 0.0, 4, 0.9));
        let kept = remove_lidar_outliers(&points, 0.1);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|p| p.r == 0.1));
    }

    #[test]
    fn empty_input_returns_empty() {
        let (kept, stats) = remove_lidar_outliers_with_stats(&[], 0.1);
        assert!(kept.is_empty());
        assert_eq!(stats.clusters, 0);
    }

    #[test]
    fn rejection_is_idempotent() {
        let mut points = blob(8.0, 0.5, 12, 0.4);
        points.push(LidarPoint::new(8.1, 1.5, -1.0, 0.2));
        let once = remove_lidar_outliers(&points, 0.1);
        let twice = remove_lidar_outliers(&once, 0.1);
        assert_eq!(once.len(), 12);
        let mut a: Vec<_> = once.iter().map(|p| p.x.to_bits()).collect();
        let mut b: Vec<_> = twice.iter().map(|p| p.x.to_bits()).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
