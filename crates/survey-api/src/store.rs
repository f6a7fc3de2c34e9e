//! In-memory persistence for surveys and responses.
//!
//! Each survey owns an `AtomicU64` response counter that is bumped with
//! `fetch_add` whenever a response is stored, so concurrent submissions never
//! lose an increment.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use survey_core::{filter_by_status, Survey, SurveyError, SurveyResponse};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryStore {
    surveys: RwLock<Vec<Survey>>,
    responses: RwLock<HashMap<String, Vec<SurveyResponse>>>,
    counters: RwLock<HashMap<String, Arc<AtomicU64>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a survey by id
    pub async fn upsert_survey(&self, survey: Survey) {
        self.counters
            .write()
            .await
            .entry(survey.id.clone())
            .or_insert_with(|| Arc::new(AtomicU64::new(0)));

        let mut surveys = self.surveys.write().await;
        match surveys.iter_mut().find(|s| s.id == survey.id) {
            Some(existing) => *existing = survey,
            None => surveys.push(survey),
        }
    }

    pub async fn get_survey(&self, id: &str) -> Option<Survey> {
        self.surveys.read().await.iter().find(|s| s.id == id).cloned()
    }

    pub async fn list_surveys(&self, status: Option<&str>) -> Vec<Survey> {
        let surveys = self.surveys.read().await;
        match status {
            Some(filter) => filter_by_status(&surveys, filter).into_iter().cloned().collect(),
            None => surveys.clone(),
        }
    }

    /// Store a response and return the survey's new response count
    pub async fn insert_response(&self, response: SurveyResponse) -> Result<u64, SurveyError> {
        let counter = self
            .counters
            .read()
            .await
            .get(&response.survey_id)
            .cloned()
            .ok_or_else(|| SurveyError::MissingSurvey(response.survey_id.clone()))?;

        self.responses
            .write()
            .await
            .entry(response.survey_id.clone())
            .or_default()
            .push(response);

        Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub async fn responses_for(&self, survey_id: &str) -> Vec<SurveyResponse> {
        self.responses
            .read()
            .await
            .get(survey_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn response_count(&self, survey_id: &str) -> u64 {
        self.counters
            .read()
            .await
            .get(survey_id)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }
}
