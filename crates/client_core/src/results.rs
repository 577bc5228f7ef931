use anyhow::Result;
use shared::{
    domain::{Category, ResultRecord, Scores},
    protocol::{
        CareerPath, FitTier, LearningPhase, PhaseStatus, ResultsDashboard, ScoreBand, ScoreLine,
    },
};
use storage::{load_result, KeyValueStore};
use tracing::info;

use crate::navigation::{Navigator, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsOutcome {
    Redirect(View),
    Render(Box<ResultsDashboard>),
}

/// Reads the persisted record once. Without one, the only outcome is a
/// redirect to the landing view.
pub async fn mount_results(store: &dyn KeyValueStore) -> Result<ResultsOutcome> {
    match load_result(store).await? {
        Some(record) => Ok(ResultsOutcome::Render(Box::new(derive_dashboard(&record)))),
        None => {
            info!("no stored assessment result; redirecting to landing");
            Ok(ResultsOutcome::Redirect(View::Landing))
        }
    }
}

/// Mounts the results view and performs the redirect through `navigator`
/// when there is nothing to show.
pub async fn open_results(
    store: &dyn KeyValueStore,
    navigator: &dyn Navigator,
) -> Result<Option<ResultsDashboard>> {
    match mount_results(store).await? {
        ResultsOutcome::Render(dashboard) => Ok(Some(*dashboard)),
        ResultsOutcome::Redirect(view) => {
            navigator.navigate(view);
            Ok(None)
        }
    }
}

pub fn derive_dashboard(record: &ResultRecord) -> ResultsDashboard {
    let scores = record.scores;
    ResultsDashboard {
        scores,
        score_lines: score_lines(&scores),
        recommendation: record.recommendation,
        completed_at: record.completed_at,
        career_paths: career_paths(&scores),
        learning_path: learning_path(&scores),
    }
}

fn score_lines(scores: &Scores) -> Vec<ScoreLine> {
    let mut lines = vec![ScoreLine {
        label: "Overall Compatibility Score".to_string(),
        score: scores.overall,
        band: ScoreBand::for_score(scores.overall),
    }];
    lines.extend(Category::ALL.into_iter().map(|category| {
        let score = scores.category(category);
        ScoreLine {
            label: category_headline(category).to_string(),
            score,
            band: ScoreBand::for_score(score),
        }
    }));
    lines
}

fn category_headline(category: Category) -> &'static str {
    match category {
        Category::Psychometric => "Psychological Fit",
        Category::Technical => "Technical Readiness",
        Category::Wiscar => "WISCAR Analysis",
    }
}

fn fit(excellent: bool, otherwise: FitTier) -> FitTier {
    if excellent {
        FitTier::Excellent
    } else {
        otherwise
    }
}

pub fn career_paths(scores: &Scores) -> Vec<CareerPath> {
    vec![
        CareerPath {
            title: "Cybercrime Law Consultant".to_string(),
            description:
                "Advise organizations on cybersecurity compliance and legal frameworks".to_string(),
            fit: fit(scores.overall >= 80, FitTier::Good),
            requirements: strings(&[
                "J.D. or Law degree",
                "Cybersecurity certification",
                "2+ years experience",
            ]),
        },
        CareerPath {
            title: "Digital Forensics Investigator".to_string(),
            description:
                "Investigate cybercrimes and provide expert testimony in legal proceedings"
                    .to_string(),
            fit: fit(scores.technical >= 75, FitTier::Developing),
            requirements: strings(&[
                "Technical background",
                "Forensics certification",
                "Legal knowledge",
            ]),
        },
        CareerPath {
            title: "Compliance Officer".to_string(),
            description:
                "Ensure organizational adherence to cybersecurity regulations and policies"
                    .to_string(),
            fit: fit(scores.psychometric >= 75, FitTier::Good),
            requirements: strings(&[
                "Risk management skills",
                "Regulatory knowledge",
                "Communication skills",
            ]),
        },
    ]
}

pub fn learning_path(scores: &Scores) -> Vec<LearningPhase> {
    vec![
        LearningPhase {
            phase: "Foundation".to_string(),
            duration: "3-6 months".to_string(),
            courses: strings(&[
                "Cyber Law Fundamentals",
                "Digital Privacy Basics",
                "Legal Research Methods",
            ]),
            status: if scores.technical >= 70 {
                PhaseStatus::Completed
            } else {
                PhaseStatus::Current
            },
        },
        LearningPhase {
            phase: "Intermediate".to_string(),
            duration: "6-12 months".to_string(),
            courses: strings(&[
                "Advanced Cybersecurity Law",
                "Digital Forensics",
                "Regulatory Compliance",
            ]),
            status: unlocked_at(scores.overall, 75),
        },
        LearningPhase {
            phase: "Advanced".to_string(),
            duration: "12-18 months".to_string(),
            courses: strings(&[
                "Expert Witness Training",
                "International Cyber Law",
                "Leadership in Legal Tech",
            ]),
            status: unlocked_at(scores.overall, 85),
        },
    ]
}

fn unlocked_at(overall: u32, threshold: u32) -> PhaseStatus {
    if overall >= threshold {
        PhaseStatus::Current
    } else {
        PhaseStatus::Locked
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "tests/results_tests.rs"]
mod tests;
