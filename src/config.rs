use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and penalties used by the rule sets.
///
/// Every field can be given on the command line or in a JSON file; missing
/// JSON fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, structopt::StructOpt)]
#[serde(default)]
pub struct ScoringConfig {
    /// Keypoints scoring at or below this are treated as not visible.
    #[structopt(long, default_value = "0.5")]
    pub confidence_threshold: f32,

    /// Knees wider than this multiple of the hip width count as misaligned.
    #[structopt(long, default_value = "1.2")]
    pub knee_to_hip_ratio: f32,
    #[structopt(long, default_value = "20")]
    pub knee_alignment_penalty: u32,

    /// Largest horizontal nose offset from the shoulder midpoint.
    #[structopt(long, default_value = "30")]
    pub spine_offset_max: f32,
    #[structopt(long, default_value = "15")]
    pub spine_alignment_penalty: u32,

    #[structopt(long, default_value = "70")]
    pub elbow_angle_min: f32,
    #[structopt(long, default_value = "110")]
    pub elbow_angle_max: f32,
    #[structopt(long, default_value = "25")]
    pub elbow_angle_penalty: u32,

    /// Height above the hip of the vertical reference point for the hinge angle.
    #[structopt(long, default_value = "50")]
    pub hip_hinge_reference_height: f32,
    #[structopt(long, default_value = "60")]
    pub hip_hinge_angle_min: f32,
    #[structopt(long, default_value = "20")]
    pub hip_hinge_penalty: u32,

    #[structopt(long, default_value = "20")]
    pub shoulder_level_max: f32,
    #[structopt(long, default_value = "10")]
    pub shoulder_level_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            knee_to_hip_ratio: 1.2,
            knee_alignment_penalty: 20,
            spine_offset_max: 30.0,
            spine_alignment_penalty: 15,
            elbow_angle_min: 70.0,
            elbow_angle_max: 110.0,
            elbow_angle_penalty: 25,
            hip_hinge_reference_height: 50.0,
            hip_hinge_angle_min: 60.0,
            hip_hinge_penalty: 20,
            shoulder_level_max: 20.0,
            shoulder_level_penalty: 10,
        }
    }
}

impl ScoringConfig {
    pub fn load<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::ReadConfig(e, path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|e| Error::ParseConfig(e, path.to_path_buf()))
    }
}
