use crate::{
    config::ScoringConfig,
    geometry::angle_between,
    pose::{KeypointKind::*, Pose},
    rules::{RuleSet, Scorecard},
};
use tracing::debug;

pub const HIP_HINGE: &str = "Maintain proper hip hinge throughout the movement";

pub struct DeadliftRules;

impl RuleSet for DeadliftRules {
    /// Hip hinge: the angle at the hip between the knee and a point straight
    /// above the hip. The ankle gates the check but takes no part in it.
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        if !pose.all_visible(&[LeftHip, LeftKnee, LeftAnkle], config.confidence_threshold) {
            debug!(check = "hip_hinge", "left leg not visible, skipping");
            return;
        }

        let hip = pose.point(LeftHip);
        let above_hip = hip.translate(0.0, -config.hip_hinge_reference_height);

        let hip_angle = match angle_between(pose.point(LeftKnee), hip, above_hip) {
            Ok(angle) => angle,
            Err(e) => {
                debug!(check = "hip_hinge", error = %e, "skipping");
                return;
            }
        };

        if hip_angle < config.hip_hinge_angle_min {
            scorecard.penalize(config.hip_hinge_penalty, HIP_HINGE);
        }
    }
}
