//! Survey API /v1: submission and statistics endpoints over an in-memory store
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use survey_core::{EngineConfig, SubmissionPipeline};
use survey_stats::SurveyStatisticsReport;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::ApiError;
pub use metrics::ApiMetrics;
pub use store::InMemoryStore;

pub struct AppState {
    pub store: InMemoryStore,
    pub pipeline: SubmissionPipeline,
    pub report: SurveyStatisticsReport,
    pub metrics: ApiMetrics,
}

impl AppState {
    pub fn new(engine: &EngineConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            store: InMemoryStore::new(),
            pipeline: SubmissionPipeline::standard(engine),
            report: SurveyStatisticsReport::new(engine),
            metrics: ApiMetrics::new()?,
        })
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/surveys", post(handlers::create_survey).get(handlers::list_surveys))
        .route("/v1/surveys/{id}", get(handlers::get_survey))
        .route(
            "/v1/surveys/{id}/responses",
            post(handlers::submit_response).get(handlers::list_responses),
        )
        .route("/v1/surveys/{id}/statistics", get(handlers::get_statistics))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&config.engine)?);
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    tracing::info!("Survey API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
