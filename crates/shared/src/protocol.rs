use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AnswerValue, FlowId, Question, QuestionId, Recommendation, Scores};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Complete,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::Complete => "Complete Assessment",
        }
    }
}

/// Everything a front end needs to draw the current step of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub flow_id: FlowId,
    pub question: Question,
    pub category_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub progress_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<AnswerValue>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub primary_action: PrimaryAction,
    pub completing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAnswerRequest {
    pub flow_id: FlowId,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowActionRequest {
    pub flow_id: FlowId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvanceResponse {
    Blocked { snapshot: FlowSnapshot },
    Moved { snapshot: FlowSnapshot },
    Completing {
        redirect: String,
        redirect_after_ms: u64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingStat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingContent {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub features: Vec<LandingFeature>,
    pub stats: Vec<LandingStat>,
    pub discoveries: Vec<DiscoverySection>,
    pub start_label: String,
    pub start_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitTier {
    #[serde(rename = "Excellent Fit")]
    Excellent,
    #[serde(rename = "Good Fit")]
    Good,
    #[serde(rename = "Developing Fit")]
    Developing,
}

impl FitTier {
    pub fn label(self) -> &'static str {
        match self {
            FitTier::Excellent => "Excellent Fit",
            FitTier::Good => "Good Fit",
            FitTier::Developing => "Developing Fit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    Current,
    Locked,
}

impl PhaseStatus {
    pub fn label(self) -> &'static str {
        match self {
            PhaseStatus::Completed => "completed",
            PhaseStatus::Current => "current",
            PhaseStatus::Locked => "locked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Strong
        } else if score >= 65 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    pub fit: FitTier,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPhase {
    pub phase: String,
    pub duration: String,
    pub courses: Vec<String>,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub label: String,
    pub score: u32,
    pub band: ScoreBand,
}

/// Read-only results page derived from a stored result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsDashboard {
    pub scores: Scores,
    pub score_lines: Vec<ScoreLine>,
    pub recommendation: Recommendation,
    pub completed_at: DateTime<Utc>,
    pub career_paths: Vec<CareerPath>,
    pub learning_path: Vec<LearningPhase>,
}
