use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The exercises with a dedicated rule set. Anything else is scored with the
/// generic posture rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Squat,
    BenchPress,
    Deadlift,
    Generic,
}

impl Exercise {
    /// Match `name` case-insensitively against the known exercise names.
    ///
    /// Only an exact match selects a dedicated rule set, so `"squats"` and
    /// `" squat"` are both generic.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "squat" => Self::Squat,
            "bench press" => Self::BenchPress,
            "deadlift" => Self::Deadlift,
            _ => Self::Generic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::BenchPress => "bench press",
            Self::Deadlift => "deadlift",
            Self::Generic => "generic",
        }
    }
}

impl FromStr for Exercise {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
