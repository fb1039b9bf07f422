use crate::{
    config::ScoringConfig,
    pose::{KeypointKind::*, Pose},
    rules::{RuleSet, Scorecard},
};
use tracing::debug;

pub const SHOULDER_LEVEL: &str = "Keep your shoulders level";

/// Posture checks for exercises without a dedicated rule set.
pub struct GenericRules;

impl RuleSet for GenericRules {
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        if !pose.all_visible(
            &[Nose, LeftShoulder, RightShoulder],
            config.confidence_threshold,
        ) {
            debug!(check = "shoulder_level", "head or shoulders not visible, skipping");
            return;
        }

        let tilt = (pose.point(LeftShoulder).y() - pose.point(RightShoulder).y()).abs();
        if tilt > config.shoulder_level_max {
            scorecard.penalize(config.shoulder_level_penalty, SHOULDER_LEVEL);
        }
    }
}
