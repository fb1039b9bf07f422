use crate::{
    config::ScoringConfig,
    geometry::angle_between,
    pose::{KeypointKind::*, Pose},
    rules::{RuleSet, Scorecard},
};
use tracing::debug;

pub const ELBOW_ANGLE: &str = "Keep your elbows at 90 degrees during the movement";

pub struct BenchPressRules;

impl RuleSet for BenchPressRules {
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        if !pose.all_visible(
            &[LeftShoulder, LeftElbow, LeftWrist],
            config.confidence_threshold,
        ) {
            debug!(check = "elbow_angle", "left arm not visible, skipping");
            return;
        }

        let elbow_angle = match angle_between(
            pose.point(LeftShoulder),
            pose.point(LeftElbow),
            pose.point(LeftWrist),
        ) {
            Ok(angle) => angle,
            Err(e) => {
                debug!(check = "elbow_angle", error = %e, "skipping");
                return;
            }
        };

        if elbow_angle < config.elbow_angle_min || elbow_angle > config.elbow_angle_max {
            scorecard.penalize(config.elbow_angle_penalty, ELBOW_ANGLE);
        }
    }
}
