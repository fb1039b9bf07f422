use crate::{analysis::FormAnalysis, error::Error, exercise::Exercise};
use num_traits::cast::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// One finished set and its analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRecord {
    pub set_number: u32,
    pub exercise: Exercise,
    pub analysis: FormAnalysis,
}

/// The analyses collected over a workout, one per set.
#[derive(Debug, Clone, Default)]
pub struct Session {
    sets: Vec<SetRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetSummary {
    pub set_number: u32,
    pub exercise: Exercise,
    pub score: u32,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Mean set score rounded to the nearest integer; `None` without sets.
    pub overall_score: Option<u32>,
    pub total_sets: usize,
    pub sets: Vec<SetSummary>,
    /// How many sets produced each feedback message.
    pub feedback_counts: BTreeMap<String, usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, set_number: u32, exercise: Exercise, analysis: FormAnalysis) {
        self.sets.push(SetRecord {
            set_number,
            exercise,
            analysis,
        });
    }

    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    fn overall_score(&self) -> Result<Option<u32>, Error> {
        if self.sets.is_empty() {
            return Ok(None);
        }
        let total: u64 = self
            .sets
            .iter()
            .map(|set| u64::from(set.analysis.score))
            .sum();
        let mean = total.to_f64().ok_or(Error::ConvertToF64)?
            / self.sets.len().to_f64().ok_or(Error::ConvertToF64)?;
        mean.round().to_u32().ok_or(Error::ConvertToU32).map(Some)
    }

    pub fn report(&self) -> Result<SessionReport, Error> {
        let mut feedback_counts = BTreeMap::new();
        let sets: Vec<_> = self
            .sets
            .iter()
            .map(
                |SetRecord {
                     set_number,
                     exercise,
                     analysis,
                 }| {
                    let feedback: Vec<_> = analysis
                        .feedback
                        .iter()
                        .map(|feedback| feedback.message.clone())
                        .collect();
                    for message in &feedback {
                        *feedback_counts.entry(message.clone()).or_insert(0) += 1;
                    }
                    SetSummary {
                        set_number: *set_number,
                        exercise: *exercise,
                        score: analysis.score,
                        feedback,
                    }
                },
            )
            .collect();

        Ok(SessionReport {
            overall_score: self.overall_score()?,
            total_sets: self.sets.len(),
            sets,
            feedback_counts,
        })
    }
}
