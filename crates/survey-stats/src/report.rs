//! Survey statistics report
//!
//! Combines completion rate, per-question frequencies and the average
//! completion time into the object returned to callers.

use crate::aggregate::{AnswerStat, QuestionStat, QuestionStatisticsAggregator};
use crate::completion::completion_rate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_core::{EngineConfig, MissingSurveyPolicy, Survey, SurveyError, SurveyResponse};
use tracing::debug;

/// Derived statistics for one survey. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatistics {
    pub survey_id: String,
    pub total_responses: u64,
    /// Percentage in `[0, 100]`
    pub completion_rate: u32,
    /// Seconds, truncated mean
    pub average_completion_time: u64,
    pub start_date: Option<DateTime<Utc>>,
    /// Surveys stay open; always null
    pub end_date: Option<DateTime<Utc>>,
    pub question_stats: Vec<QuestionStat>,
}

impl SurveyStatistics {
    /// All-zero statistics for a survey that could not be found
    pub fn empty(survey_id: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            total_responses: 0,
            completion_rate: 0,
            average_completion_time: 0,
            start_date: Some(Utc::now()),
            end_date: None,
            question_stats: Vec::new(),
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionStat> {
        self.question_stats.iter().find(|q| q.question_id == question_id)
    }

    /// Most frequent answer for a question, first seen wins ties
    pub fn top_answer(&self, question_id: &str) -> Option<&AnswerStat> {
        self.question(question_id)?
            .responses
            .iter()
            .fold(None, |best: Option<&AnswerStat>, stat| match best {
                Some(b) if b.count >= stat.count => Some(b),
                _ => Some(stat),
            })
    }
}

/// Mean of `completionTime` over all responses (missing counts as 0)
pub fn average_completion_time(responses: &[SurveyResponse]) -> u64 {
    if responses.is_empty() {
        return 0;
    }
    let total: u64 = responses.iter().map(|r| r.completion_time.unwrap_or(0)).sum();
    total / responses.len() as u64
}

pub struct SurveyStatisticsReport {
    aggregator: QuestionStatisticsAggregator,
    missing_survey: MissingSurveyPolicy,
}

impl SurveyStatisticsReport {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            aggregator: QuestionStatisticsAggregator::new(config),
            missing_survey: config.missing_survey,
        }
    }

    /// Statistics for a loaded survey and all of its responses
    pub fn compile(&self, survey: &Survey, responses: &[SurveyResponse]) -> SurveyStatistics {
        let stats = SurveyStatistics {
            survey_id: survey.id.clone(),
            total_responses: responses.len() as u64,
            completion_rate: completion_rate(responses, survey),
            average_completion_time: average_completion_time(responses),
            start_date: survey.created_at,
            end_date: None,
            question_stats: self.aggregator.aggregate(responses, survey),
        };

        debug!(
            survey_id = %stats.survey_id,
            total_responses = stats.total_responses,
            completion_rate = stats.completion_rate,
            average_completion_time = stats.average_completion_time,
            "statistics compiled"
        );
        stats
    }

    /// Like `compile`, but the survey may be unknown.
    ///
    /// `Zeroed` answers with `SurveyStatistics::empty`, `Strict` fails with
    /// `SurveyError::MissingSurvey`.
    pub fn compile_for(
        &self,
        survey_id: &str,
        survey: Option<&Survey>,
        responses: &[SurveyResponse],
    ) -> Result<SurveyStatistics, SurveyError> {
        match (survey, self.missing_survey) {
            (Some(survey), _) => Ok(self.compile(survey, responses)),
            (None, MissingSurveyPolicy::Zeroed) => {
                debug!(survey_id, "unknown survey, returning zeroed statistics");
                Ok(SurveyStatistics::empty(survey_id))
            }
            (None, MissingSurveyPolicy::Strict) => {
                Err(SurveyError::MissingSurvey(survey_id.to_string()))
            }
        }
    }
}

impl Default for SurveyStatisticsReport {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
