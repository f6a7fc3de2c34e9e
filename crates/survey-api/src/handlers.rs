//! API Handlers
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use survey_core::{Survey, SurveyError, SurveyResponse, SurveySubmission};
use survey_stats::SurveyStatistics;

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

pub async fn create_survey(
    State(state): State<Arc<AppState>>,
    Json(mut survey): Json<Survey>,
) -> (StatusCode, Json<Survey>) {
    if survey.id.is_empty() {
        survey.id = uuid::Uuid::new_v4().to_string();
    }
    survey.stamp_created(Utc::now());
    state.store.upsert_survey(survey.clone()).await;

    tracing::info!(survey_id = %survey.id, questions = survey.questions.len(), "survey stored");
    (StatusCode::CREATED, Json(survey))
}

pub async fn list_surveys(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<StatusFilter>,
) -> Json<Vec<Survey>> {
    Json(state.store.list_surveys(filter.status.as_deref()).await)
}

pub async fn get_survey(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Survey>, ApiError> {
    state
        .store
        .get_survey(&id)
        .await
        .map(Json)
        .ok_or_else(|| SurveyError::MissingSurvey(id).into())
}

/// Validate, enrich and store one submission.
///
/// Invalid answers are stored with `isValid = false`; the submission itself
/// is never rejected for its content.
pub async fn submit_response(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut submission): Json<SurveySubmission>,
) -> Result<(StatusCode, Json<SurveyResponse>), ApiError> {
    if submission.survey_id.is_empty() {
        submission.survey_id = id.clone();
    } else if submission.survey_id != id {
        return Err(SurveyError::InvalidSubmission(format!(
            "surveyId {} does not match path {}",
            submission.survey_id, id
        ))
        .into());
    }

    let survey = state
        .store
        .get_survey(&id)
        .await
        .ok_or_else(|| SurveyError::MissingSurvey(id.clone()))?;

    let outcome = state.pipeline.run(submission.into_response(), &survey)?;
    let summary = &outcome.trace.summary;
    state.metrics.invalid_answers.inc_by(summary.invalid as u64);
    state.metrics.unmatched_answers.inc_by(summary.unmatched as u64);

    let count = state.store.insert_response(outcome.response.clone()).await?;
    state.metrics.submissions.inc();

    tracing::info!(
        survey_id = %id,
        response_id = %outcome.response.id,
        trace_id = %outcome.trace.trace_id,
        invalid = summary.invalid,
        unmatched = summary.unmatched,
        response_count = count,
        "response stored"
    );
    Ok((StatusCode::CREATED, Json(outcome.response)))
}

pub async fn list_responses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SurveyResponse>>, ApiError> {
    if state.store.get_survey(&id).await.is_none() {
        return Err(SurveyError::MissingSurvey(id).into());
    }
    Ok(Json(state.store.responses_for(&id).await))
}

pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SurveyStatistics>, ApiError> {
    let survey = state.store.get_survey(&id).await;
    let responses = state.store.responses_for(&id).await;

    let stats = state.report.compile_for(&id, survey.as_ref(), &responses)?;
    state.metrics.statistics_requests.inc();
    Ok(Json(stats))
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    Ok(state.metrics.encode()?)
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
    )
}
