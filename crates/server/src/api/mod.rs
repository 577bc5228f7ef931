use std::{sync::Arc, time::Duration};

use client_core::{
    landing::landing_content, mount_results, AdvanceOutcome, AssessmentFlow, CompletionOutcome,
    FlowError, ResultsOutcome, ScoringStrategy, View,
};
use shared::{
    domain::{FlowId, QuestionCatalog},
    error::{ApiError, ErrorCode},
    protocol::{AdvanceResponse, FlowSnapshot, LandingContent, RecordAnswerRequest},
};
use storage::{KeyValueStore, Storage};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Service layer behind the HTTP routes. Holds the single live flow; starting
/// a new one abandons the previous run without persisting anything.
#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub catalog: Arc<QuestionCatalog>,
    pub scoring: Arc<dyn ScoringStrategy>,
    pub completion_delay: Duration,
    active: Arc<Mutex<Option<AssessmentFlow>>>,
}

impl ApiContext {
    pub fn new(
        storage: Storage,
        catalog: Arc<QuestionCatalog>,
        scoring: Arc<dyn ScoringStrategy>,
        completion_delay: Duration,
    ) -> Self {
        Self {
            storage,
            catalog,
            scoring,
            completion_delay,
            active: Arc::new(Mutex::new(None)),
        }
    }

    fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(self.storage.clone())
    }
}

pub fn landing() -> LandingContent {
    landing_content()
}

pub async fn start_flow(ctx: &ApiContext) -> FlowSnapshot {
    let flow = AssessmentFlow::new(ctx.catalog.clone(), ctx.store(), ctx.scoring.clone())
        .with_completion_delay(ctx.completion_delay);
    let snapshot = flow.snapshot();

    let mut active = ctx.active.lock().await;
    if let Some(previous) = active.replace(flow) {
        if !previous.is_completing() {
            info!(
                flow_id = %previous.flow_id(),
                answered = previous.answers().len(),
                "abandoned unfinished assessment flow"
            );
        }
    }
    snapshot
}

pub async fn current_flow(ctx: &ApiContext) -> Result<FlowSnapshot, ApiError> {
    let active = ctx.active.lock().await;
    active
        .as_ref()
        .map(AssessmentFlow::snapshot)
        .ok_or_else(no_active_flow)
}

pub async fn record_answer(
    ctx: &ApiContext,
    req: RecordAnswerRequest,
) -> Result<FlowSnapshot, ApiError> {
    let mut active = ctx.active.lock().await;
    let flow = live_flow(&mut active, req.flow_id)?;
    flow.record_answer(&req.question_id, req.value)
        .map_err(flow_error)?;
    Ok(flow.snapshot())
}

pub async fn advance(ctx: &ApiContext, flow_id: FlowId) -> Result<AdvanceResponse, ApiError> {
    let mut active = ctx.active.lock().await;
    let flow = live_flow(&mut active, flow_id)?;
    let delay = match flow.advance().await.map_err(flow_error)? {
        AdvanceOutcome::Blocked => {
            return Ok(AdvanceResponse::Blocked {
                snapshot: flow.snapshot(),
            })
        }
        AdvanceOutcome::Moved { .. } => {
            return Ok(AdvanceResponse::Moved {
                snapshot: flow.snapshot(),
            })
        }
        AdvanceOutcome::Completed(completion) => completion.navigation.delay(),
        AdvanceOutcome::AlreadyCompleted => ctx.completion_delay,
    };
    Ok(completing(delay))
}

pub async fn complete(ctx: &ApiContext, flow_id: FlowId) -> Result<AdvanceResponse, ApiError> {
    let mut active = ctx.active.lock().await;
    let flow = live_flow(&mut active, flow_id)?;
    // Completion is only offered on the last question once it has an answer.
    if !flow.is_completing() && !(flow.is_last() && flow.can_advance()) {
        return Ok(AdvanceResponse::Blocked {
            snapshot: flow.snapshot(),
        });
    }
    let delay = match flow.complete().await.map_err(flow_error)? {
        CompletionOutcome::Completed(completion) => completion.navigation.delay(),
        CompletionOutcome::AlreadyCompleted => ctx.completion_delay,
    };
    Ok(completing(delay))
}

pub async fn retreat(ctx: &ApiContext, flow_id: FlowId) -> Result<FlowSnapshot, ApiError> {
    let mut active = ctx.active.lock().await;
    let flow = live_flow(&mut active, flow_id)?;
    flow.retreat();
    Ok(flow.snapshot())
}

pub async fn results(ctx: &ApiContext) -> Result<ResultsOutcome, ApiError> {
    mount_results(&ctx.storage).await.map_err(internal)
}

fn completing(delay: Duration) -> AdvanceResponse {
    AdvanceResponse::Completing {
        redirect: View::Results.path().to_string(),
        redirect_after_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
    }
}

fn live_flow(
    active: &mut Option<AssessmentFlow>,
    flow_id: FlowId,
) -> Result<&mut AssessmentFlow, ApiError> {
    let flow = active.as_mut().ok_or_else(no_active_flow)?;
    if flow.flow_id() != flow_id {
        warn!(requested = %flow_id, live = %flow.flow_id(), "request for superseded flow");
        return Err(ApiError::new(
            ErrorCode::Conflict,
            "assessment flow was replaced by a newer run",
        ));
    }
    Ok(flow)
}

fn no_active_flow() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "no assessment in progress")
}

fn flow_error(err: FlowError) -> ApiError {
    match err {
        FlowError::WrongQuestion { .. } | FlowError::InvalidAnswer(_) => {
            ApiError::new(ErrorCode::Validation, err.to_string())
        }
        FlowError::Frozen(_) => ApiError::new(ErrorCode::Conflict, err.to_string()),
        FlowError::Storage(source) => internal(source),
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::internal(format!("{err:#}"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
