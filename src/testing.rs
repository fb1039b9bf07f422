//! Pose fixtures shared by the unit tests.

use crate::pose::{Keypoint, KeypointKind, Pose, NUM_KEYPOINTS};

/// An upright figure that passes every rule set: level shoulders, head
/// centered, knees under the hips, left elbow bent at 90 degrees.
const NEUTRAL: [(f32, f32); NUM_KEYPOINTS] = [
    (0.0, -80.0),
    (-20.0, -70.0),
    (20.0, -70.0),
    (-30.0, -60.0),
    (30.0, -60.0),
    (-40.0, -20.0),
    (40.0, -20.0),
    (-40.0, 20.0),
    (40.0, 20.0),
    (0.0, 20.0),
    (10.0, 20.0),
    (-30.0, 40.0),
    (30.0, 40.0),
    (-30.0, 100.0),
    (30.0, 100.0),
    (-30.0, 160.0),
    (30.0, 160.0),
];

pub(crate) fn neutral_keypoints() -> Vec<Keypoint> {
    NEUTRAL
        .iter()
        .map(|&(x, y)| Keypoint::new(x, y, 1.0).unwrap())
        .collect()
}

pub(crate) fn pose_from(keypoints: &[Keypoint]) -> Pose {
    Pose::try_from(keypoints).unwrap()
}

/// Copy of `keypoints` with `kind` placed at `(x, y)`.
pub(crate) fn moved(keypoints: &[Keypoint], kind: KeypointKind, x: f32, y: f32) -> Vec<Keypoint> {
    let mut keypoints = keypoints.to_vec();
    let score = keypoints[kind.idx()].score;
    keypoints[kind.idx()] = Keypoint::new(x, y, score).unwrap();
    keypoints
}

/// Copy of `keypoints` with the confidence of `kind` replaced.
pub(crate) fn rescored(keypoints: &[Keypoint], kind: KeypointKind, score: f32) -> Vec<Keypoint> {
    let mut keypoints = keypoints.to_vec();
    keypoints[kind.idx()].score = score;
    keypoints
}
