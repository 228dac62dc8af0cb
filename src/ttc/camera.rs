//! Camera-based TTC from keypoint distance ratios.
//!
//! For every pair of matches the distance between the two keypoints is
//! measured in both frames. Under a pinhole model and constant velocity the
//! ratio `d_curr / d_prev` equals `x_prev / x_curr`, so
//! `TTC = −dT / (1 − ratio)`. The median ratio is used to stay robust
//! against mismatched pairs. A negative TTC means the object is receding.
use crate::error::{resolve_match, FusionError};
use crate::params::CameraTtcParams;
use crate::types::{KeyPoint, KeypointMatch};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTtc {
    /// NaN when no pair passed the separation gates.
    pub ttc: f64,
    pub median_ratio: Option<f64>,
    pub accepted_pairs: usize,
    pub matches: usize,
}

/// Median of `values`, sorting them in place. `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = values.len();
    Some(if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    } else {
        values[n / 2]
    })
}

#[inline]
pub fn ttc_from_median_ratio(median_ratio: f64, frame_rate: f64) -> f64 {
    let dt = 1.0 / frame_rate;
    -dt / (1.0 - median_ratio)
}

/// TTC from a set of accepted distance ratios. NaN when `ratios` is empty.
pub fn ttc_from_distance_ratios(ratios: &mut [f64], frame_rate: f64) -> f64 {
    median(ratios).map_or(f64::NAN, |med| ttc_from_median_ratio(med, frame_rate))
}

/// Distance ratios over all unordered match pairs that pass the gates:
/// previous separation above machine epsilon, current separation at least
/// `min_dist` pixels.
pub fn distance_ratios(
    kpts_prev: &[KeyPoint],
    kpts_curr: &[KeyPoint],
    matches: &[KeypointMatch],
    min_dist: f64,
) -> Result<Vec<f64>, FusionError> {
    let resolved = matches
        .iter()
        .map(|m| resolve_match(kpts_prev, kpts_curr, m))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ratios = Vec::new();
    for (i, (outer_prev, outer_curr)) in resolved.iter().enumerate() {
        for (inner_prev, inner_curr) in &resolved[i + 1..] {
            let dist_curr = outer_curr.distance(inner_curr);
            let dist_prev = outer_prev.distance(inner_prev);
            if dist_prev > f64::EPSILON && dist_curr >= min_dist {
                ratios.push(dist_curr / dist_prev);
            }
        }
    }
    Ok(ratios)
}

/// Estimate TTC from the matches associated with one object.
pub fn compute_ttc_camera(
    kpts_prev: &[KeyPoint],
    kpts_curr: &[KeyPoint],
    matches: &[KeypointMatch],
    frame_rate: f64,
    params: &CameraTtcParams,
) -> Result<CameraTtc, FusionError> {
    let mut ratios = distance_ratios(
        kpts_prev,
        kpts_curr,
        matches,
        params.min_keypoint_distance_px,
    )?;
    let accepted_pairs = ratios.len();
    let median_ratio = median(&mut ratios);
    let ttc = median_ratio.map_or(f64::NAN, |med| ttc_from_median_ratio(med, frame_rate));
    debug!(
        "compute_ttc_camera: {} matches, {} pairs, median ratio {:?}, ttc={:.3}s",
        matches.len(),
        accepted_pairs,
        median_ratio,
        ttc
    );
    Ok(CameraTtc {
        ttc,
        median_ratio,
        accepted_pairs,
        matches: matches.len(),
    })
}
