//! HTTP mapping of the engine error model
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use survey_core::SurveyError;

#[derive(Debug)]
pub enum ApiError {
    Survey(SurveyError),
    Internal(String),
}

impl From<SurveyError> for ApiError {
    fn from(err: SurveyError) -> Self {
        Self::Survey(err)
    }
}

impl From<prometheus::Error> for ApiError {
    fn from(err: prometheus::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Survey(err) => {
                let status = match err {
                    SurveyError::MissingSurvey(_) => StatusCode::NOT_FOUND,
                    SurveyError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
                    SurveyError::Config(_) | SurveyError::Serialize(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.code(), err.to_string())
            }
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message),
        };

        (
            status,
            Json(json!({ "error": { "code": code, "message": message } })),
        )
            .into_response()
    }
}
