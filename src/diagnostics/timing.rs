//! Wall-clock timings of [`FusionPipeline::process`](crate::FusionPipeline::process).
//!
//! Stages are recorded in execution order under the names
//! `lidar_to_regions`, `region_matching`, `matches_to_regions` and `ttc`.
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One named stage of a frame-pair run and its duration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: String,
    pub elapsed_ms: f64,
}

/// Stage durations of one frame-pair run plus the end-to-end total, which
/// also covers the glue between stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record the time elapsed since `start` under `stage`.
    pub fn record_since(&mut self, stage: &str, start: Instant) {
        self.stages.push(StageTiming {
            stage: stage.to_owned(),
            elapsed_ms: elapsed_ms(start),
        });
    }

    /// Duration of the first stage named `stage`.
    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// Sum of the recorded stage durations.
    pub fn stages_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_keep_recording_order() {
        let mut timings = TimingBreakdown::default();
        let start = Instant::now();
        timings.record_since("region_matching", start);
        timings.record_since("ttc", start);
        let names: Vec<&str> = timings.stages.iter().map(|s| s.stage.as_str()).collect();
        assert_eq!(names, vec!["region_matching", "ttc"]);
        assert!(timings.stage_ms("ttc").is_some_and(|ms| ms >= 0.0));
        assert_eq!(timings.stage_ms("lidar_to_regions"), None);
        assert!(timings.stages_ms() >= 0.0);
    }
}
