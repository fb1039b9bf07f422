//! Exercise form scoring from a single frame of body keypoints.
//!
//! A frame is 17 keypoints in the usual pose-model order (see
//! [`KeypointKind`]). [`analyze_form`] picks a rule set from the exercise
//! name, subtracts fixed penalties from a base score of 100 for each fault it
//! finds, and reports one feedback message per fault. Keypoints whose
//! confidence does not exceed the configured threshold are treated as hidden
//! and the checks that need them are skipped.

pub mod analysis;
pub mod config;
pub mod error;
pub mod exercise;
pub mod geometry;
pub mod pose;
pub mod rules;
pub mod session;
pub mod synthetic;

#[cfg(test)]
mod testing;

pub use analysis::{analyze_form, Feedback, FeedbackKind, FormAnalysis, FormAnalyzer};
pub use config::ScoringConfig;
pub use error::Error;
pub use exercise::Exercise;
pub use geometry::{angle_between, Point};
pub use pose::{Keypoint, KeypointKind, Pose, NUM_KEYPOINTS};
pub use session::{Session, SessionReport};
