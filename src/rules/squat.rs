use crate::{
    config::ScoringConfig,
    pose::{KeypointKind::*, Pose},
    rules::{RuleSet, Scorecard},
};
use tracing::debug;

pub const KNEE_ALIGNMENT: &str = "Keep your knees aligned with your hips";
pub const SPINE_ALIGNMENT: &str = "Keep your spine neutral and aligned";

pub struct SquatRules;

impl SquatRules {
    /// Knees drifting wider than the hips. Only the knees gate the check.
    fn knee_alignment(pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        if !pose.all_visible(&[LeftKnee, RightKnee], config.confidence_threshold) {
            debug!(check = "knee_alignment", "knees not visible, skipping");
            return;
        }

        let knee_distance = (pose.point(LeftKnee).x() - pose.point(RightKnee).x()).abs();
        let hip_distance = (pose.point(LeftHip).x() - pose.point(RightHip).x()).abs();

        if knee_distance > hip_distance * config.knee_to_hip_ratio {
            scorecard.penalize(config.knee_alignment_penalty, KNEE_ALIGNMENT);
        }
    }

    /// Head drifting sideways from the shoulder midpoint.
    fn spine_alignment(pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        if !pose.all_visible(
            &[Nose, LeftShoulder, RightShoulder],
            config.confidence_threshold,
        ) {
            debug!(check = "spine_alignment", "head or shoulders not visible, skipping");
            return;
        }

        let shoulder_center = (pose.point(LeftShoulder).x() + pose.point(RightShoulder).x()) / 2.0;
        let offset = (pose.point(Nose).x() - shoulder_center).abs();

        if offset > config.spine_offset_max {
            scorecard.penalize(config.spine_alignment_penalty, SPINE_ALIGNMENT);
        }
    }
}

impl RuleSet for SquatRules {
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        Self::knee_alignment(pose, config, scorecard);
        Self::spine_alignment(pose, config, scorecard);
    }
}
