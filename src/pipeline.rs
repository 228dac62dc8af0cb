//! Frame-pair pipeline driving association and both TTC estimators.
//!
//! [`FusionPipeline`] wires the stages together for one pair of consecutive
//! frames:
//! - crop and project the current frame's range points into its regions;
//! - link previous regions to current regions by match voting;
//! - collect and filter the matches of every current region;
//! - estimate range and camera TTC for each linked pair.
//!
//! The previous frame is expected to have gone through
//! [`FusionPipeline::prepare_frame`] when it was the current one, so its
//! regions already hold their range points.
//!
//! ```no_run
//! use ttc_fusion::{Calibration, FusionParams, FusionPipeline, Frame};
//!
//! # fn example(mut prev: Frame, mut curr: Frame, matches: Vec<ttc_fusion::KeypointMatch>) {
//! let pipeline = FusionPipeline::new(FusionParams::default(), Calibration::default()).unwrap();
//! pipeline.prepare_frame(&mut prev).unwrap();
//! let report = pipeline.process(&prev, &mut curr, &matches).unwrap();
//! for e in &report.estimates {
//!     println!("{} -> lidar {:.2}s camera {:.2}s", e.curr_id, e.lidar.ttc, e.camera.ttc);
//! }
//! # }
//! ```
use crate::association::{cluster_lidar_with_regions, cluster_matches_with_regions, match_regions};
use crate::calibration::Calibration;
use crate::diagnostics::{
    elapsed_ms, FusionReport, PointAssignmentStats, RegionExtent, TimingBreakdown, TtcEstimate,
};
use crate::error::FusionError;
use crate::lidar::crop_lidar_points;
use crate::params::FusionParams;
use crate::ttc::{compute_ttc_camera, compute_ttc_lidar};
use crate::types::{Frame, KeypointMatch, ObjectRegion, RegionId};
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

pub struct FusionPipeline {
    params: FusionParams,
    calibration: Calibration,
}

impl FusionPipeline {
    /// Create a pipeline, validating the association parameters.
    pub fn new(params: FusionParams, calibration: Calibration) -> Result<Self, FusionError> {
        let shrink = params.association.shrink_factor;
        if !(0.0..1.0).contains(&shrink) {
            return Err(FusionError::InvalidShrinkFactor { value: shrink });
        }
        Ok(Self {
            params,
            calibration,
        })
    }

    pub fn params(&self) -> &FusionParams {
        &self.params
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Crop the frame's range points (when configured) and distribute them
    /// over its regions. Previous associations on the regions are cleared.
    pub fn prepare_frame(&self, frame: &mut Frame) -> Result<PointAssignmentStats, FusionError> {
        if let Some(crop) = &self.params.crop {
            let before = frame.lidar_points.len();
            crop_lidar_points(&mut frame.lidar_points, crop);
            debug!(
                "FusionPipeline::prepare_frame crop {} -> {} points",
                before,
                frame.lidar_points.len()
            );
        }
        for region in &mut frame.regions {
            region.clear_associations();
        }
        cluster_lidar_with_regions(
            &mut frame.regions,
            &frame.lidar_points,
            self.params.association.shrink_factor,
            &self.calibration,
        )
    }

    /// Run the full frame-pair flow. `matches` index `prev.keypoints` and
    /// `curr.keypoints`.
    pub fn process(
        &self,
        prev: &Frame,
        curr: &mut Frame,
        matches: &[KeypointMatch],
    ) -> Result<FusionReport, FusionError> {
        debug!(
            "FusionPipeline::process start prev_regions={} curr_regions={} matches={}",
            prev.regions.len(),
            curr.regions.len(),
            matches.len()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let point_assignment = self.prepare_frame(curr)?;
        timings.record_since("lidar_to_regions", stage);

        let stage = Instant::now();
        let associations = match_regions(
            matches,
            &prev.keypoints,
            &curr.keypoints,
            &prev.regions,
            &curr.regions,
        )?;
        timings.record_since("region_matching", stage);

        let stage = Instant::now();
        let match_filters = cluster_matches_with_regions(
            &mut curr.regions,
            &prev.keypoints,
            &curr.keypoints,
            matches,
            self.params.association.match_outlier_ratio,
        )?;
        timings.record_since("matches_to_regions", stage);

        let stage = Instant::now();
        let curr: &Frame = curr;
        let pairs: Vec<(&ObjectRegion, &ObjectRegion)> = associations
            .matched()
            .filter_map(|(prev_id, curr_id)| {
                let pair = find(&prev.regions, prev_id).zip(find(&curr.regions, curr_id));
                if pair.is_none() {
                    debug!("FusionPipeline::process missing region for {prev_id} => {curr_id}");
                }
                pair
            })
            .collect();
        let estimates = pairs
            .par_iter()
            .map(|(prev_region, curr_region)| {
                self.estimate_pair(prev, curr, prev_region, curr_region)
            })
            .collect::<Result<Vec<_>, _>>()?;
        timings.record_since("ttc", stage);

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "FusionPipeline::process done links={} estimates={} total_ms={:.3}",
            associations.links.len(),
            estimates.len(),
            timings.total_ms
        );
        Ok(FusionReport {
            associations: associations.links,
            estimates,
            point_assignment,
            match_filters,
            timings,
        })
    }

    fn estimate_pair(
        &self,
        prev: &Frame,
        curr: &Frame,
        prev_region: &ObjectRegion,
        curr_region: &ObjectRegion,
    ) -> Result<TtcEstimate, FusionError> {
        if prev_region.lidar_points.is_empty() || curr_region.lidar_points.is_empty() {
            debug!(
                "FusionPipeline: region pair {} => {} lacks range points",
                prev_region.id, curr_region.id
            );
        }
        let lidar = compute_ttc_lidar(
            &prev_region.lidar_points,
            &curr_region.lidar_points,
            self.params.frame_rate,
            &self.params.lidar,
        );
        let camera = compute_ttc_camera(
            &prev.keypoints,
            &curr.keypoints,
            &curr_region.matches,
            self.params.frame_rate,
            &self.params.camera,
        )?;
        Ok(TtcEstimate {
            prev_id: prev_region.id,
            curr_id: curr_region.id,
            lidar,
            camera,
            extent: RegionExtent::from_region(curr_region),
        })
    }
}

fn find(regions: &[ObjectRegion], id: RegionId) -> Option<&ObjectRegion> {
    regions.iter().find(|r| r.id == id)
}
