//! Scoring strategies. The controller derives overall score and
//! recommendation from whatever category scores a strategy returns.

use std::ops::Range;

use rand::Rng;
use shared::domain::{AnswerSet, CategoryScores};
use tracing::debug;

pub trait ScoringStrategy: Send + Sync {
    fn score(&self, answers: &AnswerSet) -> CategoryScores;
}

pub const PSYCHOMETRIC_RANGE: Range<u32> = 70..100;
pub const TECHNICAL_RANGE: Range<u32> = 60..100;
pub const WISCAR_RANGE: Range<u32> = 75..100;

/// Samples each category independently from its fixed range. Answers are
/// not consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScoring;

impl ScoringStrategy for RandomScoring {
    fn score(&self, answers: &AnswerSet) -> CategoryScores {
        let mut rng = rand::thread_rng();
        let scores = CategoryScores {
            psychometric: rng.gen_range(PSYCHOMETRIC_RANGE),
            technical: rng.gen_range(TECHNICAL_RANGE),
            wiscar: rng.gen_range(WISCAR_RANGE),
        };
        debug!(
            answered = answers.len(),
            psychometric = scores.psychometric,
            technical = scores.technical,
            wiscar = scores.wiscar,
            "placeholder scoring sampled category scores without reading answers"
        );
        scores
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedScoring(pub CategoryScores);

impl FixedScoring {
    pub fn new(psychometric: u32, technical: u32, wiscar: u32) -> Self {
        Self(CategoryScores {
            psychometric,
            technical,
            wiscar,
        })
    }
}

impl ScoringStrategy for FixedScoring {
    fn score(&self, _answers: &AnswerSet) -> CategoryScores {
        self.0
    }
}
