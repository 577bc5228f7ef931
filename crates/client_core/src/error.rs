use shared::domain::{AnswerError, FlowId, QuestionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("answer targets question {received} but the current question is {expected}")]
    WrongQuestion {
        expected: QuestionId,
        received: QuestionId,
    },
    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),
    #[error("flow {0} is completing; answers are frozen")]
    Frozen(FlowId),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
