//! Completion rate: share of required-question slots that got an answer
//!
//! A slot is one (response, required question) pair. The result is an integer
//! percentage, truncated.

use survey_core::{Survey, SurveyResponse};

/// Completion rate in `[0, 100]`.
///
/// A survey without required questions is always 100, with or without
/// responses. Otherwise no responses means 0.
pub fn completion_rate(responses: &[SurveyResponse], survey: &Survey) -> u32 {
    let required = survey.required_count() as u64;
    if required == 0 {
        return 100;
    }

    let slots = responses.len() as u64 * required;
    if slots == 0 {
        return 0;
    }

    let answered: u64 = responses
        .iter()
        .map(|response| answered_required(response, survey))
        .sum();

    // Duplicate answers to one question can push the ratio past 1
    (answered * 100 / slots).min(100) as u32
}

/// Non-empty answers in `response` that target a required question
pub fn answered_required(response: &SurveyResponse, survey: &Survey) -> u64 {
    response
        .answers
        .iter()
        .filter(|a| survey.is_required(&a.question_id) && !a.value.is_empty())
        .count() as u64
}
