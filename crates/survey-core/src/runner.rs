//! Submission pipeline: chains stages over a response and records a trace
use crate::config::EngineConfig;
use crate::context::SubmissionContext;
use crate::error::SurveyError;
use crate::model::{Survey, SurveyResponse};
use crate::stage::{EnrichAnswers, StageTally, StampSubmittedAt, SubmissionStage};
use crate::validator::AnswerValidator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTrace {
    pub id: String,
    pub in_hash: String,
    pub out_hash: String,
    pub latency_us: u64,
}

impl StageTrace {
    /// The stage left the response exactly as it found it
    pub fn unchanged(&self) -> bool {
        self.in_hash == self.out_hash
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub answers: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionTrace {
    pub pipeline_id: String,
    pub trace_id: String,
    pub stages: Vec<StageTrace>,
    pub summary: SubmissionSummary,
}

/// Enriched response plus what happened to it
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub response: SurveyResponse,
    pub trace: SubmissionTrace,
}

pub struct SubmissionPipeline {
    stages: Vec<Box<dyn SubmissionStage>>,
    pipeline_id: String,
    validator: AnswerValidator,
}

impl SubmissionPipeline {
    pub fn new(stages: Vec<Box<dyn SubmissionStage>>, validator: AnswerValidator) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self {
            stages,
            pipeline_id,
            validator,
        }
    }

    /// Timestamp default, then title enrichment and validation
    pub fn standard(config: &EngineConfig) -> Self {
        Self::new(
            vec![Box::new(StampSubmittedAt), Box::new(EnrichAnswers)],
            AnswerValidator::new(config),
        )
    }

    pub fn run(
        &self,
        response: SurveyResponse,
        survey: &Survey,
    ) -> Result<SubmissionOutcome, SurveyError> {
        self.run_at(response, survey, Utc::now())
    }

    /// Run with an explicit clock reading for `submittedAt` defaults
    pub fn run_at(
        &self,
        mut response: SurveyResponse,
        survey: &Survey,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, SurveyError> {
        let ctx = SubmissionContext::new(self.validator, now);
        let mut traces = Vec::with_capacity(self.stages.len());
        let mut tally = StageTally::default();

        for stage in &self.stages {
            let start = Instant::now();
            let in_hash = hash_response(&response)?;

            tally += stage.apply(&mut response, survey, &ctx);

            let out_hash = hash_response(&response)?;
            traces.push(StageTrace {
                id: stage.id().to_string(),
                in_hash,
                out_hash,
                latency_us: start.elapsed().as_micros() as u64,
            });
        }

        let summary = SubmissionSummary {
            answers: response.answers.len(),
            matched: tally.matched,
            unmatched: tally.unmatched,
            invalid: tally.invalid,
        };
        debug!(
            trace_id = %ctx.trace_id,
            survey_id = %survey.id,
            answers = summary.answers,
            matched = summary.matched,
            unmatched = summary.unmatched,
            invalid = summary.invalid,
            "submission enriched"
        );

        Ok(SubmissionOutcome {
            response,
            trace: SubmissionTrace {
                pipeline_id: self.pipeline_id.clone(),
                trace_id: ctx.trace_id,
                stages: traces,
                summary,
            },
        })
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::standard(&EngineConfig::default())
    }
}

fn hash_response(response: &SurveyResponse) -> Result<String, SurveyError> {
    let bytes = serde_json::to_vec(response)?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}

/// Enrich a response with the default engine settings
pub fn submit(response: SurveyResponse, survey: &Survey) -> Result<SurveyResponse, SurveyError> {
    SubmissionPipeline::default()
        .run(response, survey)
        .map(|outcome| outcome.response)
}
