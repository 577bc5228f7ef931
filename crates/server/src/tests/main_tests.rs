use super::*;
use axum::{
    body::{self, Body},
    http::{header, Request},
};
use client_core::FixedScoring;
use shared::{
    domain::{AnswerValue, Question},
    protocol::ResultsDashboard,
};
use std::time::Duration;
use tower::ServiceExt;

async fn test_app() -> (Router, ApiContext) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let api = ApiContext::new(
        storage,
        Arc::new(QuestionCatalog::builtin()),
        Arc::new(FixedScoring::new(72, 74, 88)),
        Duration::from_millis(1500),
    );
    let app = build_router(Arc::new(AppState { api: api.clone() }));
    (app, api)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn answer_for(question: &Question) -> AnswerValue {
    match question.options() {
        Some(options) => AnswerValue::Choice(options[options.len() - 1].clone()),
        None => AnswerValue::Scale(5),
    }
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _api) = test_app().await;
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn landing_offers_a_single_start_action() {
    let (app, _api) = test_app().await;
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).expect("request")).await;
    assert_eq!(status, StatusCode::OK);

    let landing: LandingContent = serde_json::from_slice(&body).expect("json");
    assert_eq!(landing.start_path, "/assessment");
    assert_eq!(landing.features.len(), 4);
}

#[tokio::test]
async fn results_without_a_record_redirect_to_landing_with_empty_body() {
    let (app, _api) = test_app().await;
    let response = app
        .oneshot(Request::get("/results").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn assessment_is_not_found_before_start() {
    let (app, _api) = test_app().await;
    let (status, body) = send(
        &app,
        Request::get("/assessment").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn answer_errors_map_to_status_codes() {
    let (app, _api) = test_app().await;
    let (_, body) = send(&app, json_request("POST", "/assessment", serde_json::json!({}))).await;
    let first: FlowSnapshot = serde_json::from_slice(&body).expect("json");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/assessment/answer",
            serde_json::json!({
                "flow_id": first.flow_id,
                "question_id": first.question.id,
                "value": 42
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, json_request("POST", "/assessment", serde_json::json!({}))).await;
    let second: FlowSnapshot = serde_json::from_slice(&body).expect("json");
    assert_ne!(first.flow_id, second.flow_id);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/assessment/next",
            serde_json::json!({ "flow_id": first.flow_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn unreadable_bodies_get_json_errors() {
    let (app, _api) = test_app().await;

    let syntax = Request::post("/assessment/next")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"flow_id\": "))
        .expect("request");
    let (status, body) = send(&app, syntax).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ApiError = serde_json::from_slice(&body).expect("json error body");
    assert_eq!(err.code, ErrorCode::Validation);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/assessment/complete",
            serde_json::json!({ "flow_id": "not-a-uuid" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: ApiError = serde_json::from_slice(&body).expect("json error body");
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(!err.message.is_empty());

    let untyped = Request::put("/assessment/answer")
        .body(Body::from("{}"))
        .expect("request");
    let (status, body) = send(&app, untyped).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let err: ApiError = serde_json::from_slice(&body).expect("json error body");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let (app, _api) = test_app().await;
    let payload = serde_json::json!({ "padding": "x".repeat(MAX_REQUEST_BYTES + 1) }).to_string();
    let request = Request::put("/assessment/answer")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .expect("request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn full_run_over_http_persists_and_renders_results() {
    let (app, _api) = test_app().await;
    let (_, body) = send(&app, json_request("POST", "/assessment", serde_json::json!({}))).await;
    let mut snapshot: FlowSnapshot = serde_json::from_slice(&body).expect("json");
    assert_eq!(snapshot.position, 1);

    // Next without an answer is not an error.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/assessment/next",
            serde_json::json!({ "flow_id": snapshot.flow_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let blocked: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(blocked["status"], "blocked");
    assert_eq!(blocked["snapshot"]["can_advance"], false);

    let completing = loop {
        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                "/assessment/answer",
                serde_json::json!({
                    "flow_id": snapshot.flow_id,
                    "question_id": snapshot.question.id,
                    "value": answer_for(&snapshot.question),
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let answered: FlowSnapshot = serde_json::from_slice(&body).expect("json");
        assert!(answered.can_advance);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/assessment/next",
                serde_json::json!({ "flow_id": snapshot.flow_id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        match serde_json::from_slice::<AdvanceResponse>(&body).expect("json") {
            AdvanceResponse::Moved { snapshot: next } => snapshot = next,
            other => break other,
        }
    };

    match completing {
        AdvanceResponse::Completing {
            redirect,
            redirect_after_ms,
        } => {
            assert_eq!(redirect, "/results");
            assert_eq!(redirect_after_ms, 1500);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    let (status, body) = send(
        &app,
        Request::get("/results").body(Body::empty()).expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let dashboard: ResultsDashboard = serde_json::from_slice(&body).expect("json");
    assert_eq!(dashboard.scores.overall, 78);
    assert_eq!(
        dashboard.recommendation,
        shared::domain::Recommendation::Recommended
    );
    let fits: Vec<_> = dashboard.career_paths.iter().map(|p| p.fit).collect();
    assert_eq!(
        fits,
        vec![
            shared::protocol::FitTier::Good,
            shared::protocol::FitTier::Developing,
            shared::protocol::FitTier::Good
        ]
    );
}
