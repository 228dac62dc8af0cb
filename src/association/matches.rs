//! Keypoint match → object region assignment.
//!
//! A match belongs to a region when its current-frame keypoint lies inside
//! the region's (unshrunk) rectangle. The region's own displacement
//! statistics then drive a single-pass filter: matches whose displacement is
//! at least `ratio` times the region mean are removed.
use crate::diagnostics::MatchFilterStats;
use crate::error::{resolve_match, FusionError};
use crate::types::{KeyPoint, KeypointMatch, ObjectRegion};
use log::debug;
use rayon::prelude::*;

/// Append enclosed matches to `region.matches`, then drop displacement
/// outliers among all of the region's matches.
///
/// Matches already held by the region take part in the mean and in the
/// filter. When every displacement is zero the mean is zero and every match
/// is removed; the region is left empty in that case.
pub fn cluster_matches_with_region(
    region: &mut ObjectRegion,
    kpts_prev: &[KeyPoint],
    kpts_curr: &[KeyPoint],
    matches: &[KeypointMatch],
    outlier_ratio: f64,
) -> Result<MatchFilterStats, FusionError> {
    let mut candidates: Vec<(KeypointMatch, f64)> = Vec::with_capacity(region.matches.len());
    for m in &region.matches {
        let (kp_prev, kp_curr) = resolve_match(kpts_prev, kpts_curr, m)?;
        candidates.push((*m, kp_prev.distance(kp_curr)));
    }
    let held = candidates.len();
    for m in matches {
        let (kp_prev, kp_curr) = resolve_match(kpts_prev, kpts_curr, m)?;
        if region.roi.contains_keypoint(kp_curr) {
            candidates.push((*m, kp_prev.distance(kp_curr)));
        }
    }

    let mut stats = MatchFilterStats {
        region_id: region.id,
        enclosed: candidates.len() - held,
        ..Default::default()
    };
    if candidates.is_empty() {
        return Ok(stats);
    }

    let mean = candidates.iter().map(|(_, d)| d).sum::<f64>() / candidates.len() as f64;
    let threshold = mean * outlier_ratio;
    let total = candidates.len();
    region.matches = candidates
        .into_iter()
        .filter(|(_, d)| *d < threshold)
        .map(|(m, _)| m)
        .collect();

    stats.kept = region.matches.len();
    stats.removed = total - stats.kept;
    stats.mean_displacement_px = mean;
    debug!(
        "cluster_matches_with_region: region {} held={} enclosed={} removed={} mean={:.2}px",
        region.id, held, stats.enclosed, stats.removed, mean
    );
    Ok(stats)
}

/// Run [`cluster_matches_with_region`] for every region in parallel.
///
/// Each worker owns exactly one region; stats come back in region order.
pub fn cluster_matches_with_regions(
    regions: &mut [ObjectRegion],
    kpts_prev: &[KeyPoint],
    kpts_curr: &[KeyPoint],
    matches: &[KeypointMatch],
    outlier_ratio: f64,
) -> Result<Vec<MatchFilterStats>, FusionError> {
    regions
        .par_iter_mut()
        .map(|region| {
            cluster_matches_with_region(region, kpts_prev, kpts_curr, matches, outlier_ratio)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn scene() -> (Vec<KeyPoint>, Vec<KeyPoint>, Vec<KeypointMatch>) {
        // Four matches inside the box with displacement 2 px and one with 20 px.
        let prev = vec![
            KeyPoint::new(10.0, 10.0),
            KeyPoint::new(20.0, 10.0),
            KeyPoint::new(30.0, 10.0),
            KeyPoint::new(40.0, 10.0),
            KeyPoint::new(30.0, 30.0),
            KeyPoint::new(500.0, 500.0),
        ];
        let curr = vec![
            KeyPoint::new(12.0, 10.0),
            KeyPoint::new(22.0, 10.0),
            KeyPoint::new(32.0, 10.0),
            KeyPoint::new(42.0, 10.0),
            KeyPoint::new(50.0, 30.0),
            KeyPoint::new(502.0, 500.0),
        ];
        let matches = (0..6).map(|i| KeypointMatch::new(i, i)).collect();
        (prev, curr, matches)
    }

    #[test]
    fn displacement_outlier_is_removed() {
        let (prev, curr, matches) = scene();
        let mut region = ObjectRegion::new(3, Rect::new(0.0, 0.0, 100.0, 100.0));
        let stats =
            cluster_matches_with_region(&mut region, &prev, &curr, &matches, 1.5).unwrap();
        // mean = (4·2 + 20) / 5 = 5.6 → threshold 8.4
        assert_eq!(stats.enclosed, 5);
        assert_eq!(stats.removed, 1);
        assert!((stats.mean_displacement_px - 5.6).abs() < 1e-12);
        assert_eq!(
            region.matches,
            (0..4).map(|i| KeypointMatch::new(i, i)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn consecutive_outliers_are_all_removed() {
        let prev = vec![KeyPoint::new(0.0, 0.0); 6];
        let curr = vec![
            KeyPoint::new(1.0, 0.0),
            KeyPoint::new(30.0, 0.0),
            KeyPoint::new(30.0, 0.0),
            KeyPoint::new(1.0, 0.0),
            KeyPoint::new(1.0, 0.0),
            KeyPoint::new(1.0, 0.0),
        ];
        let matches: Vec<_> = (0..6).map(|i| KeypointMatch::new(i, i)).collect();
        let mut region = ObjectRegion::new(1, Rect::new(0.0, -10.0, 100.0, 20.0));
        // mean = 64 / 6 ≈ 10.67 → threshold 16
        cluster_matches_with_region(&mut region, &prev, &curr, &matches, 1.5).unwrap();
        let kept: Vec<usize> = region.matches.iter().map(|m| m.curr_idx).collect();
        assert_eq!(kept, vec![0, 3, 4, 5]);
    }

    #[test]
    fn previously_held_matches_are_filtered_too() {
        let prev = vec![
            KeyPoint::new(10.0, 10.0),
            KeyPoint::new(20.0, 10.0),
            KeyPoint::new(30.0, 10.0),
        ];
        let curr = vec![
            KeyPoint::new(60.0, 10.0),
            KeyPoint::new(21.0, 10.0),
            KeyPoint::new(31.0, 10.0),
        ];
        let mut region = ObjectRegion::new(2, Rect::new(0.0, 0.0, 100.0, 100.0));
        region.matches.push(KeypointMatch::new(0, 0)); // 50 px
        let fresh = [KeypointMatch::new(1, 1), KeypointMatch::new(2, 2)];
        let stats = cluster_matches_with_region(&mut region, &prev, &curr, &fresh, 1.5).unwrap();
        // mean = (50 + 1 + 1) / 3 ≈ 17.3 → threshold 26
        assert_eq!(region.matches, fresh.to_vec());
        assert_eq!(stats.enclosed, 2);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.kept, 2);
        assert!((stats.mean_displacement_px - 52.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_displacement_empties_region() {
        let kps = vec![KeyPoint::new(5.0, 5.0), KeyPoint::new(6.0, 6.0)];
        let matches = vec![KeypointMatch::new(0, 0), KeypointMatch::new(1, 1)];
        let mut region = ObjectRegion::new(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        let stats = cluster_matches_with_region(&mut region, &kps, &kps, &matches, 1.5).unwrap();
        assert_eq!(stats.enclosed, 2);
        assert_eq!(stats.removed, 2);
        assert!(region.matches.is_empty());
    }

    #[test]
    fn region_without_matches_stays_empty() {
        let (prev, curr, matches) = scene();
        let mut region = ObjectRegion::new(9, Rect::new(900.0, 900.0, 10.0, 10.0));
        let stats =
            cluster_matches_with_region(&mut region, &prev, &curr, &matches, 1.5).unwrap();
        assert_eq!(stats.enclosed, 0);
        assert!(region.matches.is_empty());
    }

    #[test]
    fn parallel_assignment_preserves_region_order() {
        let (prev, curr, matches) = scene();
        let mut regions = vec![
            ObjectRegion::new(1, Rect::new(0.0, 0.0, 100.0, 100.0)),
            ObjectRegion::new(2, Rect::new(450.0, 450.0, 100.0, 100.0)),
        ];
        let stats =
            cluster_matches_with_regions(&mut regions, &prev, &curr, &matches, 1.5).unwrap();
        assert_eq!(stats.iter().map(|s| s.region_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(regions[0].matches.len(), 4);
        assert_eq!(regions[1].matches, vec![KeypointMatch::new(5, 5)]);
    }

    #[test]
    fn bad_index_fails_fast() {
        let (prev, curr, _) = scene();
        let mut region = ObjectRegion::new(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        let err = cluster_matches_with_region(
            &mut region,
            &prev,
            &curr,
            &[KeypointMatch::new(0, 42)],
            1.5,
        )
        .unwrap_err();
        assert!(matches!(err, FusionError::KeypointIndexOutOfRange { .. }));
        assert!(region.matches.is_empty());
    }
}
