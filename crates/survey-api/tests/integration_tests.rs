//! Integration tests for survey-api: the router driven in-process.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use survey_api::{create_app, AppState};
use survey_core::{EngineConfig, MissingSurveyPolicy};
use tower::ServiceExt;

fn app_with(engine: &EngineConfig) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(engine).unwrap());
    (create_app(Arc::clone(&state)), state)
}

fn app() -> (Router, Arc<AppState>) {
    app_with(&EngineConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, value)
}

fn pulse_survey() -> Value {
    json!({
        "id": "pulse",
        "title": "Weekly pulse",
        "questions": [
            { "id": 1, "text": "Mood", "type": "rating", "required": true,
              "settings": { "min": 1, "max": 5 } },
            { "id": 2, "text": "Blockers", "type": "multiple-choice",
              "options": ["Meetings", "Builds", "Reviews"] }
        ]
    })
}

// =============================================================================
// Surveys
// =============================================================================

#[tokio::test]
async fn test_create_and_fetch_survey() {
    let (app, _) = app();

    let (status, created) = send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "pulse");
    assert!(created["createdAt"].is_string());
    assert_eq!(created["status"], "active");

    let (status, fetched) = send(&app, "GET", "/v1/surveys/pulse", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["questions"][0]["id"], "1");
    assert_eq!(fetched["questions"][1]["type"], "multiple-choice");
}

#[tokio::test]
async fn test_create_assigns_missing_id() {
    let (app, _) = app();
    let (_, created) = send(&app, "POST", "/v1/surveys", Some(json!({ "title": "Anon" }))).await;
    assert!(!created["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let (app, _) = app();
    send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;
    send(
        &app,
        "POST",
        "/v1/surveys",
        Some(json!({ "id": "old", "title": "Old", "status": "archived" })),
    )
    .await;

    let (_, archived) = send(&app, "GET", "/v1/surveys?status=archived", None).await;
    assert_eq!(archived.as_array().unwrap().len(), 1);
    assert_eq!(archived[0]["id"], "old");

    let (_, all) = send(&app, "GET", "/v1/surveys?status=everything", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_survey_is_not_found() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/v1/surveys/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SURVEY/NOT_FOUND");
}

// =============================================================================
// Submissions
// =============================================================================

#[tokio::test]
async fn test_submit_enriches_and_counts() {
    let (app, state) = app();
    send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;

    let (status, stored) = send(
        &app,
        "POST",
        "/v1/surveys/pulse/responses",
        Some(json!({
            "respondentName": "Lin",
            "respondentEmail": "lin@example.com",
            "answers": { "1": "7", "2": ["Builds"], "3": "extra" },
            "completionTime": 30
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["surveyId"], "pulse");
    assert!(stored["submittedAt"].is_string());
    assert_eq!(stored["answers"][0]["questionTitle"], "Mood");
    assert_eq!(stored["answers"][0]["isValid"], false);
    assert_eq!(stored["answers"][1]["isValid"], true);
    assert_eq!(stored["answers"][2]["questionTitle"], "");

    assert_eq!(state.store.response_count("pulse").await, 1);
    assert_eq!(state.metrics.invalid_answers.get(), 1);
    assert_eq!(state.metrics.unmatched_answers.get(), 1);

    let (_, listed) = send(&app, "GET", "/v1/surveys/pulse/responses", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_null_answer_is_stored_invalid() {
    let (app, _) = app();
    send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;

    let (status, stored) = send(
        &app,
        "POST",
        "/v1/surveys/pulse/responses",
        Some(json!({ "answers": { "1": null } })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["answers"][0]["value"], "");
    assert_eq!(stored["answers"][0]["isValid"], false);

    let (_, stats) = send(&app, "GET", "/v1/surveys/pulse/statistics", None).await;
    assert_eq!(stats["completionRate"], 0);
}

#[tokio::test]
async fn test_submit_to_unknown_survey() {
    let (app, state) = app();
    let (status, _) = send(
        &app,
        "POST",
        "/v1/surveys/ghost/responses",
        Some(json!({ "answers": { "1": "3" } })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.metrics.submissions.get(), 0);
}

#[tokio::test]
async fn test_submit_with_mismatched_survey_id() {
    let (app, _) = app();
    send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/surveys/pulse/responses",
        Some(json!({ "surveyId": "other", "answers": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "SUBMIT");
}

// =============================================================================
// Statistics
// =============================================================================

#[tokio::test]
async fn test_statistics_reflect_submissions() {
    let (app, _) = app();
    send(&app, "POST", "/v1/surveys", Some(pulse_survey())).await;

    for answers in [
        json!({ "1": "4", "2": ["Builds", "Reviews"] }),
        json!({ "1": "", "2": "Builds" }),
        json!({ "1": "4" }),
    ] {
        send(
            &app,
            "POST",
            "/v1/surveys/pulse/responses",
            Some(json!({ "answers": answers, "completionTime": 40 })),
        )
        .await;
    }

    let (status, stats) = send(&app, "GET", "/v1/surveys/pulse/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalResponses"], 3);
    assert_eq!(stats["completionRate"], 66);
    assert_eq!(stats["averageCompletionTime"], 40);
    assert_eq!(
        stats["questionStats"][0]["responses"],
        json!([{ "answer": "4", "count": 2, "percentage": 66 }])
    );
    assert_eq!(
        stats["questionStats"][1]["responses"],
        json!([
            { "answer": "Builds", "count": 2, "percentage": 66 },
            { "answer": "Reviews", "count": 1, "percentage": 33 }
        ])
    );
}

#[tokio::test]
async fn test_statistics_for_unknown_survey_zeroed() {
    let (app, _) = app();
    let (status, stats) = send(&app, "GET", "/v1/surveys/ghost/statistics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["surveyId"], "ghost");
    assert_eq!(stats["totalResponses"], 0);
    assert_eq!(stats["completionRate"], 0);
    assert_eq!(stats["questionStats"], json!([]));
}

#[tokio::test]
async fn test_statistics_for_unknown_survey_strict() {
    let engine = EngineConfig {
        missing_survey: MissingSurveyPolicy::Strict,
        ..EngineConfig::default()
    };
    let (app, _) = app_with(&engine);
    let (status, _) = send(&app, "GET", "/v1/surveys/ghost/statistics", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Operations
// =============================================================================

#[tokio::test]
async fn test_health_and_metrics() {
    let (app, _) = app();

    let (status, health) = send(&app, "GET", "/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    send(&app, "GET", "/v1/surveys/any/statistics", None).await;
    let (status, metrics) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = metrics.as_str().unwrap();
    assert!(text.contains("survey_statistics_requests_total 1"));
    assert!(text.contains("survey_submissions_total 0"));
}
