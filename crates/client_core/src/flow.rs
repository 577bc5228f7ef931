use std::{sync::Arc, time::Duration};

use chrono::Utc;
use shared::{
    domain::{
        AnswerSet, AnswerValue, FlowId, Question, QuestionCatalog, QuestionId, ResultRecord, Scores,
    },
    protocol::{FlowSnapshot, PrimaryAction},
};
use storage::{save_result, KeyValueStore};
use tracing::{debug, info, warn};

use crate::{
    error::FlowError,
    navigation::{Navigator, View},
    scoring::ScoringStrategy,
};

/// How long the "Completing Assessment" state stays up before the results
/// view is shown.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub enum AdvanceOutcome {
    /// The current question has no answer yet.
    Blocked,
    Moved { index: usize },
    Completed(Completion),
    AlreadyCompleted,
}

#[derive(Debug)]
pub enum CompletionOutcome {
    Completed(Completion),
    AlreadyCompleted,
}

impl From<CompletionOutcome> for AdvanceOutcome {
    fn from(outcome: CompletionOutcome) -> Self {
        match outcome {
            CompletionOutcome::Completed(completion) => AdvanceOutcome::Completed(completion),
            CompletionOutcome::AlreadyCompleted => AdvanceOutcome::AlreadyCompleted,
        }
    }
}

#[derive(Debug)]
pub struct Completion {
    pub record: ResultRecord,
    pub navigation: PendingNavigation,
}

/// A navigation that becomes due after the completion display delay.
#[derive(Debug, Clone, Copy)]
pub struct PendingNavigation {
    delay: Duration,
    target: View,
}

impl PendingNavigation {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn target(&self) -> View {
        self.target
    }

    pub async fn wait(self) -> View {
        tokio::time::sleep(self.delay).await;
        self.target
    }

    pub async fn deliver(self, navigator: &dyn Navigator) {
        let view = self.wait().await;
        navigator.navigate(view);
    }
}

/// Linear questionnaire state machine.
///
/// The position never leaves `0..catalog.len()`, and the flow never moves
/// past a question that has no recorded answer.
pub struct AssessmentFlow {
    flow_id: FlowId,
    catalog: Arc<QuestionCatalog>,
    store: Arc<dyn KeyValueStore>,
    scoring: Arc<dyn ScoringStrategy>,
    completion_delay: Duration,
    index: usize,
    answers: AnswerSet,
    completing: bool,
    /// Scored once, then reused if the first write fails.
    record: Option<ResultRecord>,
    persisted: bool,
}

impl AssessmentFlow {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        store: Arc<dyn KeyValueStore>,
        scoring: Arc<dyn ScoringStrategy>,
    ) -> Self {
        let flow_id = FlowId::new_v4();
        info!(%flow_id, questions = catalog.len(), "assessment flow started");
        Self {
            flow_id,
            catalog,
            store,
            scoring,
            completion_delay: DEFAULT_COMPLETION_DELAY,
            index: 0,
            answers: AnswerSet::new(),
            completing: false,
            record: None,
            persisted: false,
        }
    }

    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    pub fn flow_id(&self) -> FlowId {
        self.flow_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    pub fn current_question(&self) -> &Question {
        self.catalog.at(self.index)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.answers.get(&self.current_question().id)
    }

    pub fn is_last(&self) -> bool {
        self.index == self.catalog.last_index()
    }

    pub fn is_completing(&self) -> bool {
        self.completing
    }

    /// True once the result record has been written.
    pub fn is_completed(&self) -> bool {
        self.persisted
    }

    pub fn can_advance(&self) -> bool {
        !self.completing && self.current_answer().is_some()
    }

    pub fn can_retreat(&self) -> bool {
        !self.completing && self.index > 0
    }

    /// Stores `value` for the current question, replacing any earlier answer.
    pub fn record_answer(
        &mut self,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<(), FlowError> {
        if self.completing {
            return Err(FlowError::Frozen(self.flow_id));
        }

        let question = self.current_question();
        if &question.id != question_id {
            return Err(FlowError::WrongQuestion {
                expected: question.id.clone(),
                received: question_id.clone(),
            });
        }
        question.check_answer(&value)?;

        debug!(flow_id = %self.flow_id, %question_id, %value, "answer recorded");
        self.answers.insert(question_id.clone(), value);
        Ok(())
    }

    pub async fn advance(&mut self) -> Result<AdvanceOutcome, FlowError> {
        if self.completing {
            // Either done, or an earlier write failed and is retried here.
            return Ok(self.complete().await?.into());
        }
        if self.current_answer().is_none() {
            debug!(flow_id = %self.flow_id, index = self.index, "advance blocked; question unanswered");
            return Ok(AdvanceOutcome::Blocked);
        }

        if self.is_last() {
            return Ok(self.complete().await?.into());
        }

        self.index += 1;
        Ok(AdvanceOutcome::Moved { index: self.index })
    }

    /// Steps back one question. Returns whether the position changed.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Scores the run, persists the record and schedules the move to results.
    /// Writes at most once per flow. A failed write leaves the answers frozen
    /// and is attempted again with the same record on the next call.
    pub async fn complete(&mut self) -> Result<CompletionOutcome, FlowError> {
        if self.persisted {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        self.completing = true;

        // Category scores come from the strategy alone; the default strategy
        // does not look at the answers.
        let record = self
            .record
            .get_or_insert_with(|| {
                let scores = Scores::from_categories(self.scoring.score(&self.answers));
                ResultRecord::new(self.answers.clone(), scores, Utc::now())
            })
            .clone();
        if let Err(err) = save_result(self.store.as_ref(), &record).await {
            warn!(flow_id = %self.flow_id, error = %format!("{err:#}"), "failed to persist assessment result");
            return Err(err.into());
        }
        self.persisted = true;

        info!(
            flow_id = %self.flow_id,
            answered = record.answers.len(),
            overall = record.scores.overall,
            recommendation = %record.recommendation,
            "assessment completed"
        );

        Ok(CompletionOutcome::Completed(Completion {
            record,
            navigation: PendingNavigation {
                delay: self.completion_delay,
                target: View::Results,
            },
        }))
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let question = self.current_question();
        let answer = self.current_answer().cloned();
        let total = self.total();
        FlowSnapshot {
            flow_id: self.flow_id,
            question: question.clone(),
            category_label: question.category.evaluation_label(),
            guidance: question.guidance().map(str::to_string),
            position: self.index + 1,
            total,
            progress_percent: (self.index + 1) as f64 / total as f64 * 100.0,
            display_value: answer.clone().or_else(|| question.display_default()),
            answer,
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
            primary_action: if self.is_last() {
                PrimaryAction::Complete
            } else {
                PrimaryAction::Next
            },
            completing: self.completing,
        }
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
