use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Json, Router,
};
use client_core::{RandomScoring, ResultsOutcome};
use shared::{
    domain::QuestionCatalog,
    error::{ApiError, ErrorCode},
    protocol::{
        AdvanceResponse, FlowActionRequest, FlowSnapshot, LandingContent, RecordAnswerRequest,
    },
};
use storage::Storage;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::{load_settings, prepare_database_url};

const MAX_REQUEST_BYTES: usize = 16 * 1024;

type HttpResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let api = ApiContext::new(
        storage,
        Arc::new(QuestionCatalog::builtin()),
        Arc::new(RandomScoring),
        settings.completion_delay(),
    );
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, %database_url, "assessment server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(landing_view))
        .route(
            "/assessment",
            get(current_assessment).post(start_assessment),
        )
        .route("/assessment/answer", put(record_answer))
        .route("/assessment/next", post(next_question))
        .route("/assessment/previous", post(previous_question))
        .route("/assessment/complete", post(complete_assessment))
        .route("/results", get(results_view))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => {
            error!(message = %err.message, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(err))
}

/// Body rejections reuse the `ApiError` JSON shape.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> HttpResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })
}

async fn healthz(State(state): State<Arc<AppState>>) -> HttpResult<&'static str> {
    state
        .api
        .storage
        .health_check()
        .await
        .map_err(|e| reject(ApiError::internal(format!("{e:#}"))))?;
    Ok("ok")
}

async fn landing_view() -> Json<LandingContent> {
    Json(api::landing())
}

async fn start_assessment(State(state): State<Arc<AppState>>) -> Json<FlowSnapshot> {
    Json(api::start_flow(&state.api).await)
}

async fn current_assessment(State(state): State<Arc<AppState>>) -> HttpResult<Json<FlowSnapshot>> {
    api::current_flow(&state.api).await.map(Json).map_err(reject)
}

async fn record_answer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordAnswerRequest>, JsonRejection>,
) -> HttpResult<Json<FlowSnapshot>> {
    let req = json_body(payload)?;
    api::record_answer(&state.api, req)
        .await
        .map(Json)
        .map_err(reject)
}

async fn next_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FlowActionRequest>, JsonRejection>,
) -> HttpResult<Json<AdvanceResponse>> {
    let req = json_body(payload)?;
    api::advance(&state.api, req.flow_id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn previous_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FlowActionRequest>, JsonRejection>,
) -> HttpResult<Json<FlowSnapshot>> {
    let req = json_body(payload)?;
    api::retreat(&state.api, req.flow_id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn complete_assessment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FlowActionRequest>, JsonRejection>,
) -> HttpResult<Json<AdvanceResponse>> {
    let req = json_body(payload)?;
    api::complete(&state.api, req.flow_id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn results_view(State(state): State<Arc<AppState>>) -> HttpResult<Response> {
    match api::results(&state.api).await.map_err(reject)? {
        ResultsOutcome::Render(dashboard) => Ok(Json(*dashboard).into_response()),
        ResultsOutcome::Redirect(view) => Ok(Redirect::to(view.path()).into_response()),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
