//! Per-question answer frequencies
//!
//! Produces one `QuestionStat` per survey question, in survey order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use survey_core::{EngineConfig, Question, Survey, SurveyResponse};

/// Frequency of one observed answer value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStat {
    pub answer: String,
    pub count: u32,
    /// `count * 100 / totalResponses`, truncated
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStat {
    pub question_id: String,
    pub question_title: String,
    /// Buckets in order of first occurrence
    pub responses: Vec<AnswerStat>,
    /// Responses holding at least one non-empty answer to this question
    #[serde(default)]
    pub answered_count: u32,
    /// Answers flagged invalid at submission
    #[serde(default)]
    pub invalid_count: u32,
}

impl QuestionStat {
    pub fn count_for(&self, answer: &str) -> u32 {
        self.responses
            .iter()
            .find(|s| s.answer == answer)
            .map_or(0, |s| s.count)
    }
}

/// Answer value → count, in order of first occurrence
type Tally = IndexMap<String, u32>;

fn into_stats(tally: Tally, total_responses: u64) -> Vec<AnswerStat> {
    tally
        .into_iter()
        .map(|(answer, count)| AnswerStat {
            percentage: percentage(count as u64, total_responses),
            answer,
            count,
        })
        .collect()
}

/// Truncated percentage, 0 for an empty population, never above 100
pub fn percentage(count: u64, total: u64) -> u32 {
    if total == 0 {
        0
    } else {
        (count * 100 / total).min(100) as u32
    }
}

pub struct QuestionStatisticsAggregator {
    delimiter: String,
}

impl Default for QuestionStatisticsAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl QuestionStatisticsAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            delimiter: config.multi_choice_delimiter.clone(),
        }
    }

    pub fn aggregate(&self, responses: &[SurveyResponse], survey: &Survey) -> Vec<QuestionStat> {
        survey
            .questions
            .iter()
            .map(|question| self.question_stat(responses, question))
            .collect()
    }

    /// Empty answers never get a bucket; multiple-choice answers count each
    /// selection on its own
    pub fn question_stat(&self, responses: &[SurveyResponse], question: &Question) -> QuestionStat {
        let split = question.kind.is_multi_valued();
        let mut tally = Tally::new();
        let mut answered_count = 0;
        let mut invalid_count = 0;

        for response in responses {
            let mut answered = false;
            for answer in response.answers_for(&question.id) {
                if !answer.is_valid {
                    invalid_count += 1;
                }
                for selection in answer.value.selections(&self.delimiter, split) {
                    *tally.entry(selection.to_string()).or_insert(0) += 1;
                    answered = true;
                }
            }
            if answered {
                answered_count += 1;
            }
        }

        QuestionStat {
            question_id: question.id.clone(),
            question_title: question.text.clone(),
            responses: into_stats(tally, responses.len() as u64),
            answered_count,
            invalid_count,
        }
    }
}

/// Aggregate with the default delimiter
pub fn question_statistics(responses: &[SurveyResponse], survey: &Survey) -> Vec<QuestionStat> {
    QuestionStatisticsAggregator::default().aggregate(responses, survey)
}
