//! JSON configuration for tools embedding the pipeline.
//!
//! ```json
//! {
//!   "params": { "frameRate": 10.0, "association": { "shrinkFactor": 0.1 } },
//!   "calibration": { "projection": [...], "rectification": [...], "extrinsic": [...] }
//! }
//! ```
//! Both blocks are optional. Matrices are stored column-major, as nalgebra
//! serializes them.
use crate::calibration::Calibration;
use crate::params::FusionParams;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub params: FusionParams,
    pub calibration: Calibration,
}

pub fn parse_config(contents: &str) -> Result<FusionConfig, String> {
    serde_json::from_str(contents).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<FusionConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
