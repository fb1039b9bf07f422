use crate::{
    config::ScoringConfig,
    exercise::Exercise,
    pose::{Keypoint, Pose},
    rules::{RuleSet, Scorecard},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

pub const INSUFFICIENT_POSE_DATA: &str = "Insufficient pose data detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// The input could not be scored.
    Error,
    /// A form fault was detected.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Warning,
            message: message.into(),
        }
    }
}

/// The result of scoring one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAnalysis {
    /// Form quality in `0..=100`.
    pub score: u32,
    /// Feedback in the order the checks ran.
    pub feedback: Vec<Feedback>,
    /// The keypoints that were scored, unchanged.
    pub landmarks: Vec<Keypoint>,
    /// The rule set that ran, or `None` when the input was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Exercise>,
}

impl FormAnalysis {
    fn insufficient(landmarks: &[Keypoint]) -> Self {
        Self {
            score: 0,
            feedback: vec![Feedback::error(INSUFFICIENT_POSE_DATA)],
            landmarks: landmarks.to_vec(),
            exercise: None,
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Feedback> {
        self.feedback
            .iter()
            .filter(|feedback| feedback.kind == FeedbackKind::Warning)
    }
}

/// Scores frames against a fixed [`ScoringConfig`].
///
/// The analyzer holds no per-call state, so a single instance can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct FormAnalyzer {
    config: ScoringConfig,
}

impl FormAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[instrument(
        name = "FormAnalyzer::analyze",
        skip(self, keypoints),
        fields(keypoints = keypoints.len())
    )]
    pub fn analyze(&self, keypoints: &[Keypoint], exercise: Exercise) -> FormAnalysis {
        let pose = match Pose::try_from(keypoints) {
            Ok(pose) => pose,
            Err(e) => {
                debug!(error = %e, "rejecting frame");
                return FormAnalysis::insufficient(keypoints);
            }
        };

        let mut scorecard = Scorecard::new();
        exercise.evaluate(&pose, &self.config, &mut scorecard);
        let (score, feedback) = scorecard.finish();

        trace!(score, warnings = feedback.len());

        FormAnalysis {
            score,
            feedback,
            landmarks: keypoints.to_vec(),
            exercise: Some(exercise),
        }
    }

    /// Score against the rule set selected by a free-form exercise name.
    pub fn analyze_named(&self, keypoints: &[Keypoint], exercise_type: &str) -> FormAnalysis {
        self.analyze(keypoints, Exercise::from_name(exercise_type))
    }
}

/// Score `keypoints` with the default configuration.
pub fn analyze_form(keypoints: &[Keypoint], exercise_type: &str) -> FormAnalysis {
    FormAnalyzer::default().analyze_named(keypoints, exercise_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pose::KeypointKind::*,
        rules::{
            bench_press::ELBOW_ANGLE, deadlift::HIP_HINGE, generic::SHOULDER_LEVEL,
            squat::KNEE_ALIGNMENT, squat::SPINE_ALIGNMENT,
        },
        synthetic::SyntheticSource,
        testing::{moved, neutral_keypoints, rescored},
    };

    const ALL_EXERCISES: [&str; 5] = ["squat", "bench press", "deadlift", "yoga", "SQUAT"];

    fn messages(analysis: &FormAnalysis) -> Vec<&str> {
        analysis
            .feedback
            .iter()
            .map(|feedback| feedback.message.as_str())
            .collect()
    }

    fn spread_knees(keypoints: &[Keypoint]) -> Vec<Keypoint> {
        let keypoints = moved(keypoints, LeftKnee, -90.0, 100.0);
        moved(&keypoints, RightKnee, 90.0, 100.0)
    }

    mod insufficient_tests {
        use super::*;

        #[test]
        fn single_keypoint() {
            let keypoints = vec![Keypoint::new(0.0, 0.0, 0.5).unwrap()];
            for exercise in &ALL_EXERCISES {
                let analysis = analyze_form(&keypoints, exercise);
                assert_eq!(analysis.score, 0);
                assert_eq!(analysis.feedback, vec![Feedback::error(INSUFFICIENT_POSE_DATA)]);
                assert_eq!(analysis.landmarks, keypoints);
                assert_eq!(analysis.exercise, None);
                assert_eq!(analysis.warnings().count(), 0);
            }
        }

        #[test]
        fn empty_input() {
            let analysis = analyze_form(&[], "deadlift");
            assert_eq!(analysis.feedback.len(), 1);
            assert_eq!(analysis.feedback[0].kind, FeedbackKind::Error);
        }

        #[test]
        fn sixteen_keypoints() {
            let mut keypoints = neutral_keypoints();
            keypoints.pop();
            let analysis = analyze_form(&keypoints, "squat");
            assert_eq!(messages(&analysis), vec![INSUFFICIENT_POSE_DATA]);
        }
    }

    mod neutral_pose_tests {
        use super::*;

        #[test]
        fn perfect_score_for_every_exercise() {
            let keypoints = neutral_keypoints();
            for exercise in &ALL_EXERCISES {
                let analysis = analyze_form(&keypoints, exercise);
                assert_eq!(analysis.score, 100, "{}", exercise);
                assert!(analysis.feedback.is_empty(), "{}", exercise);
            }
        }

        #[test]
        fn landmarks_are_carried_through() {
            let keypoints = neutral_keypoints();
            let analysis = analyze_form(&keypoints, "squat");
            assert_eq!(analysis.landmarks, keypoints);
            assert_eq!(analysis.exercise, Some(Exercise::Squat));
        }
    }

    mod squat_tests {
        use super::*;

        #[test]
        fn wide_knees() {
            let keypoints = spread_knees(&neutral_keypoints());
            let analysis = analyze_form(&keypoints, "squat");
            assert!(analysis.score <= 80);
            assert_eq!(analysis.score, 80);
            assert_eq!(messages(&analysis), vec![KNEE_ALIGNMENT]);
            assert_eq!(analysis.feedback[0].kind, FeedbackKind::Warning);
        }

        #[test]
        fn wide_knees_low_confidence() {
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = rescored(&keypoints, LeftKnee, 0.3);
            let keypoints = rescored(&keypoints, RightKnee, 0.3);
            let analysis = analyze_form(&keypoints, "squat");
            assert_eq!(analysis.score, 100);
            assert!(analysis.feedback.is_empty());
        }

        #[test]
        fn confidence_at_threshold_is_not_visible() {
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = rescored(&keypoints, RightKnee, 0.5);
            assert_eq!(analyze_form(&keypoints, "squat").score, 100);
        }

        #[test]
        fn hips_are_not_gated() {
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = rescored(&keypoints, LeftHip, 0.0);
            let keypoints = rescored(&keypoints, RightHip, 0.0);
            assert_eq!(analyze_form(&keypoints, "squat").score, 80);
        }

        #[test]
        fn head_off_center() {
            let keypoints = moved(&neutral_keypoints(), Nose, 40.0, -80.0);
            let analysis = analyze_form(&keypoints, "squat");
            assert_eq!(analysis.score, 85);
            assert_eq!(messages(&analysis), vec![SPINE_ALIGNMENT]);
        }

        #[test]
        fn both_faults_in_order() {
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = moved(&keypoints, Nose, -45.0, -80.0);
            let analysis = analyze_form(&keypoints, "Squat");
            assert_eq!(analysis.score, 65);
            assert_eq!(messages(&analysis), vec![KNEE_ALIGNMENT, SPINE_ALIGNMENT]);
        }
    }

    mod bench_press_tests {
        use super::*;

        #[test]
        fn straight_arm() {
            let keypoints = moved(&neutral_keypoints(), LeftWrist, -40.0, 60.0);
            let analysis = analyze_form(&keypoints, "bench press");
            assert_eq!(analysis.score, 75);
            assert_eq!(messages(&analysis), vec![ELBOW_ANGLE]);
        }

        #[test]
        fn closed_arm() {
            // wrist folded back towards the shoulder: roughly 14 degrees
            let keypoints = moved(&neutral_keypoints(), LeftWrist, -30.0, -20.0);
            assert_eq!(analyze_form(&keypoints, "bench press").score, 75);
        }

        #[test]
        fn degenerate_elbow_is_skipped() {
            let keypoints = moved(&neutral_keypoints(), LeftWrist, -40.0, 20.0);
            let analysis = analyze_form(&keypoints, "bench press");
            assert_eq!(analysis.score, 100);
            assert!(analysis.feedback.is_empty());
        }

        #[test]
        fn hidden_wrist() {
            let keypoints = moved(&neutral_keypoints(), LeftWrist, -40.0, 60.0);
            let keypoints = rescored(&keypoints, LeftWrist, 0.1);
            assert_eq!(analyze_form(&keypoints, "bench press").score, 100);
        }
    }

    mod deadlift_tests {
        use super::*;

        #[test]
        fn knee_above_hip() {
            let keypoints = moved(&neutral_keypoints(), LeftKnee, 0.0, 0.0);
            let analysis = analyze_form(&keypoints, "deadlift");
            assert_eq!(analysis.score, 80);
            assert_eq!(messages(&analysis), vec![HIP_HINGE]);
        }

        #[test]
        fn ankle_gates_the_check() {
            let keypoints = moved(&neutral_keypoints(), LeftKnee, 0.0, 0.0);
            let keypoints = rescored(&keypoints, LeftAnkle, 0.2);
            assert_eq!(analyze_form(&keypoints, "deadlift").score, 100);
        }
    }

    mod generic_tests {
        use super::*;

        #[test]
        fn uneven_shoulders() {
            let keypoints = moved(&neutral_keypoints(), RightShoulder, 40.0, 10.0);
            let analysis = analyze_form(&keypoints, "yoga");
            assert_eq!(analysis.score, 90);
            assert_eq!(messages(&analysis), vec![SHOULDER_LEVEL]);
            assert_eq!(analysis.warnings().count(), 1);
            assert_eq!(analysis.exercise, Some(Exercise::Generic));
        }

        #[test]
        fn exercise_specific_rules_do_not_run() {
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = moved(&keypoints, Nose, 60.0, -80.0);
            let keypoints = moved(&keypoints, LeftWrist, -40.0, 60.0);
            let keypoints = moved(&keypoints, LeftKnee, -30.0, 0.0);
            let analysis = analyze_form(&keypoints, "yoga");
            assert_eq!(analysis.score, 100);
            assert!(analysis.feedback.is_empty());
        }

        #[test]
        fn nose_gates_the_check() {
            let keypoints = moved(&neutral_keypoints(), RightShoulder, 40.0, 10.0);
            let keypoints = rescored(&keypoints, Nose, 0.0);
            assert_eq!(analyze_form(&keypoints, "yoga").score, 100);
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn custom_penalty() {
            let analyzer = FormAnalyzer::new(ScoringConfig {
                knee_alignment_penalty: 33,
                ..Default::default()
            });
            let keypoints = spread_knees(&neutral_keypoints());
            assert_eq!(analyzer.analyze(&keypoints, Exercise::Squat).score, 67);
        }

        #[test]
        fn score_never_negative() {
            let analyzer = FormAnalyzer::new(ScoringConfig {
                knee_alignment_penalty: 80,
                spine_alignment_penalty: 80,
                ..Default::default()
            });
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = moved(&keypoints, Nose, 50.0, -80.0);
            let analysis = analyzer.analyze(&keypoints, Exercise::Squat);
            assert_eq!(analysis.score, 0);
            assert_eq!(analysis.feedback.len(), 2);
        }

        #[test]
        fn lower_confidence_threshold() {
            let analyzer = FormAnalyzer::new(ScoringConfig {
                confidence_threshold: 0.2,
                ..Default::default()
            });
            let keypoints = spread_knees(&neutral_keypoints());
            let keypoints = rescored(&keypoints, LeftKnee, 0.3);
            let keypoints = rescored(&keypoints, RightKnee, 0.3);
            assert_eq!(analyzer.analyze(&keypoints, Exercise::Squat).score, 80);
        }
    }

    mod property_tests {
        use super::*;

        #[test]
        fn idempotent() {
            let keypoints = spread_knees(&neutral_keypoints());
            let first = analyze_form(&keypoints, "squat");
            let second = analyze_form(&keypoints, "squat");
            assert_eq!(first, second);
        }

        #[test]
        fn synthetic_scores_in_range() {
            let analyzer = FormAnalyzer::default();
            for keypoints in SyntheticSource::new(7).take(200) {
                let keypoints = keypoints.unwrap();
                for exercise in &ALL_EXERCISES {
                    let analysis = analyzer.analyze_named(&keypoints, exercise);
                    assert!(analysis.score <= 100);
                    assert!(analysis
                        .feedback
                        .iter()
                        .all(|feedback| feedback.kind == FeedbackKind::Warning));
                }
            }
        }

        #[test]
        fn json_shape() {
            let analysis = analyze_form(&[], "squat");
            let value = serde_json::to_value(&analysis).unwrap();
            assert_eq!(
                value,
                serde_json::json!({
                    "score": 0,
                    "feedback": [{"type": "error", "message": INSUFFICIENT_POSE_DATA}],
                    "landmarks": [],
                })
            );
        }
    }
}
