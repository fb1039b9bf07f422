use crate::{analysis::Feedback, config::ScoringConfig, exercise::Exercise, pose::Pose};

pub mod bench_press;
pub mod deadlift;
pub mod generic;
pub mod squat;

/// Every rule set starts from this score and only subtracts.
pub const BASE_SCORE: u32 = 100;

/// A group of geometric checks applied to one pose.
pub trait RuleSet {
    /// Run every check, recording penalties and feedback on `scorecard`.
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard);
}

/// Running score and feedback for a single rule-set pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    score: u32,
    feedback: Vec<Feedback>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            score: BASE_SCORE,
            feedback: Vec::new(),
        }
    }

    /// Subtract `penalty`, stopping at zero, and record a warning.
    pub fn penalize(&mut self, penalty: u32, message: &str) {
        self.score = self.score.saturating_sub(penalty);
        self.feedback.push(Feedback::warning(message));
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn finish(self) -> (u32, Vec<Feedback>) {
        (self.score, self.feedback)
    }
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet for Exercise {
    fn evaluate(&self, pose: &Pose, config: &ScoringConfig, scorecard: &mut Scorecard) {
        match self {
            Self::Squat => squat::SquatRules.evaluate(pose, config, scorecard),
            Self::BenchPress => bench_press::BenchPressRules.evaluate(pose, config, scorecard),
            Self::Deadlift => deadlift::DeadliftRules.evaluate(pose, config, scorecard),
            Self::Generic => generic::GenericRules.evaluate(pose, config, scorecard),
        }
    }
}
