use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog;

/// Storage key under which the latest completed run is persisted.
pub const RESULTS_STORAGE_KEY: &str = "assessmentResults";

/// Value a scale question shows before the user has touched it.
pub const SCALE_DISPLAY_DEFAULT: i64 = 3;

pub const SCENARIO_GUIDANCE: &str =
    "Choose the option that best represents your approach or understanding.";

pub const SCALE_LABELS: [&str; 3] = ["Strongly Disagree", "Neutral", "Strongly Agree"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifies one run of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowId(pub Uuid);

impl FlowId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Psychometric,
    Technical,
    Wiscar,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Psychometric, Category::Technical, Category::Wiscar];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Psychometric => "Psychometric",
            Category::Technical => "Technical",
            Category::Wiscar => "WISCAR",
        }
    }

    pub fn evaluation_label(self) -> String {
        format!("{} Evaluation", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Choice { options: Vec<String> },
    /// A choice question framed as a workplace situation.
    Scenario { options: Vec<String> },
    Scale { min: i64, max: i64, step: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn choice(
        id: &str,
        category: Category,
        prompt: &str,
        options: &[&str],
    ) -> Self {
        Self {
            id: QuestionId::from(id),
            category,
            prompt: prompt.to_string(),
            kind: QuestionKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    pub fn scenario(
        id: &str,
        category: Category,
        prompt: &str,
        options: &[&str],
    ) -> Self {
        Self {
            id: QuestionId::from(id),
            category,
            prompt: prompt.to_string(),
            kind: QuestionKind::Scenario {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    pub fn scale(id: &str, category: Category, prompt: &str, min: i64, max: i64, step: i64) -> Self {
        Self {
            id: QuestionId::from(id),
            category,
            prompt: prompt.to_string(),
            kind: QuestionKind::Scale { min, max, step },
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::Choice { options } | QuestionKind::Scenario { options } => {
                Some(options.as_slice())
            }
            QuestionKind::Scale { .. } => None,
        }
    }

    pub fn guidance(&self) -> Option<&'static str> {
        match self.kind {
            QuestionKind::Scenario { .. } => Some(SCENARIO_GUIDANCE),
            _ => None,
        }
    }

    /// The value a widget shows when nothing has been recorded yet. This is
    /// display state only and never counts as an answer.
    pub fn display_default(&self) -> Option<AnswerValue> {
        match self.kind {
            QuestionKind::Scale { min, max, .. } => {
                Some(AnswerValue::Scale(SCALE_DISPLAY_DEFAULT.clamp(min, max)))
            }
            _ => None,
        }
    }

    pub fn check_answer(&self, value: &AnswerValue) -> Result<(), AnswerError> {
        match (&self.kind, value) {
            (
                QuestionKind::Choice { options } | QuestionKind::Scenario { options },
                AnswerValue::Choice(selected),
            ) => {
                if options.iter().any(|option| option == selected) {
                    Ok(())
                } else {
                    Err(AnswerError::UnknownOption {
                        question_id: self.id.clone(),
                        option: selected.clone(),
                    })
                }
            }
            (QuestionKind::Scale { min, max, step }, AnswerValue::Scale(v)) => {
                if v < min || v > max {
                    return Err(AnswerError::OutOfRange {
                        question_id: self.id.clone(),
                        value: *v,
                        min: *min,
                        max: *max,
                    });
                }
                // Unvalidated questions may carry a zero step or span the whole i64 range.
                let offset = i128::from(*v) - i128::from(*min);
                if offset.checked_rem(i128::from(*step)) != Some(0) {
                    return Err(AnswerError::OffStep {
                        question_id: self.id.clone(),
                        value: *v,
                        step: *step,
                    });
                }
                Ok(())
            }
            (QuestionKind::Scale { .. }, AnswerValue::Choice(_)) => Err(AnswerError::KindMismatch {
                question_id: self.id.clone(),
                expected: "a number on the scale",
            }),
            (_, AnswerValue::Scale(_)) => Err(AnswerError::KindMismatch {
                question_id: self.id.clone(),
                expected: "one of the listed options",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("question {question_id} has no option {option:?}")]
    UnknownOption { question_id: QuestionId, option: String },
    #[error("value {value} for question {question_id} is outside {min}..={max}")]
    OutOfRange {
        question_id: QuestionId,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("value {value} for question {question_id} is not on the step of {step}")]
    OffStep {
        question_id: QuestionId,
        value: i64,
        step: i64,
    },
    #[error("question {question_id} expects {expected}")]
    KindMismatch {
        question_id: QuestionId,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("question catalog is empty")]
    Empty,
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
    #[error("question {0} has no options")]
    NoOptions(QuestionId),
    #[error("question {id} has an invalid scale {min}..={max} step {step}")]
    InvalidScale {
        id: QuestionId,
        min: i64,
        max: i64,
        step: i64,
    },
}

/// Fixed, ordered question list shared by every flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
            match &question.kind {
                QuestionKind::Choice { options } | QuestionKind::Scenario { options } => {
                    if options.is_empty() {
                        return Err(CatalogError::NoOptions(question.id.clone()));
                    }
                }
                QuestionKind::Scale { min, max, step } => {
                    if min >= max || *step <= 0 {
                        return Err(CatalogError::InvalidScale {
                            id: question.id.clone(),
                            min: *min,
                            max: *max,
                            step: *step,
                        });
                    }
                }
            }
        }

        Ok(Self { questions })
    }

    /// The cybercrime law readiness questionnaire.
    pub fn builtin() -> Self {
        Self {
            questions: catalog::readiness_questions(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Panics if `index` is past the end; callers keep their position
    /// within `0..len()`.
    pub fn at(&self, index: usize) -> &Question {
        &self.questions[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scale(i64),
    Choice(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Scale(v) => write!(f, "{v}"),
            AnswerValue::Choice(option) => f.write_str(option),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: QuestionId, value: AnswerValue) -> Option<AnswerValue> {
        self.0.insert(id, value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.0.iter()
    }
}

/// Per-category scores as produced by a scoring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub psychometric: u32,
    pub technical: u32,
    pub wiscar: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub psychometric: u32,
    pub technical: u32,
    pub wiscar: u32,
    pub overall: u32,
}

impl Scores {
    pub const MAX: u32 = 100;

    /// Clamps each category to 0..=100 and takes the floored mean as overall.
    pub fn from_categories(categories: CategoryScores) -> Self {
        let psychometric = categories.psychometric.min(Self::MAX);
        let technical = categories.technical.min(Self::MAX);
        let wiscar = categories.wiscar.min(Self::MAX);
        Self {
            psychometric,
            technical,
            wiscar,
            overall: (psychometric + technical + wiscar) / 3,
        }
    }

    pub fn category(&self, category: Category) -> u32 {
        match category {
            Category::Psychometric => self.psychometric,
            Category::Technical => self.technical,
            Category::Wiscar => self.wiscar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Further Development Needed")]
    FurtherDevelopmentNeeded,
}

impl Recommendation {
    pub fn from_overall(overall: u32) -> Self {
        if overall >= 80 {
            Recommendation::HighlyRecommended
        } else if overall >= 65 {
            Recommendation::Recommended
        } else {
            Recommendation::FurtherDevelopmentNeeded
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recommendation::HighlyRecommended => "Highly Recommended",
            Recommendation::Recommended => "Recommended",
            Recommendation::FurtherDevelopmentNeeded => "Further Development Needed",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one completed run. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub answers: AnswerSet,
    pub scores: Scores,
    pub recommendation: Recommendation,
    pub completed_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(answers: AnswerSet, scores: Scores, completed_at: DateTime<Utc>) -> Self {
        Self {
            answers,
            recommendation: Recommendation::from_overall(scores.overall),
            scores,
            completed_at,
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
