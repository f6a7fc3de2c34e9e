//! Integration tests for survey-stats: submissions through the pipeline,
//! then the statistics report over the stored results.

use serde_json::json;
use survey_core::{Question, SubmissionPipeline, Survey, SurveyResponse, SurveySubmission};
use survey_stats::{completion_rate, statistics, SurveyStatisticsReport};

fn enrich(survey: &Survey, responses: Vec<SurveyResponse>) -> Vec<SurveyResponse> {
    let pipeline = SubmissionPipeline::default();
    responses
        .into_iter()
        .map(|r| pipeline.run(r, survey).unwrap().response)
        .collect()
}

// =============================================================================
// Headline Scenario
// =============================================================================

#[test]
fn test_single_required_rating_end_to_end() {
    let survey = Survey::new("1", "Pulse")
        .with_question(Question::new("1", "How was it?", "rating").required().with_range(1, 5));

    let responses = enrich(
        &survey,
        vec![
            SurveyResponse::new("1").with_answer("1", "5"),
            SurveyResponse::new("1").with_answer("1", ""),
        ],
    );

    let stats = statistics(&survey, &responses);
    assert_eq!(stats.total_responses, 2);
    assert_eq!(stats.completion_rate, 50);

    let question = stats.question("1").unwrap();
    assert_eq!(question.responses.len(), 1);
    assert_eq!(question.responses[0].answer, "5");
    assert_eq!(question.responses[0].count, 1);
    assert_eq!(question.responses[0].percentage, 50);
    assert_eq!(question.invalid_count, 1);
}

#[test]
fn test_zero_required_always_full() {
    let survey = Survey::new("1", "Optional")
        .with_question(Question::new("1", "Notes", "text"))
        .with_question(Question::new("2", "Pick", "multiple-choice"));

    for count in 0..4 {
        let responses: Vec<SurveyResponse> = (0..count).map(|_| SurveyResponse::new("1")).collect();
        assert_eq!(completion_rate(&responses, &survey), 100, "{} responses", count);
    }
}

#[test]
fn test_zero_responses() {
    let survey = Survey::new("1", "Fresh")
        .with_question(Question::new("1", "Name", "text").required());
    let stats = statistics(&survey, &[]);

    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.average_completion_time, 0);
    assert_eq!(stats.question_stats.len(), 1);
    assert!(stats.question_stats[0].responses.is_empty());
}

#[test]
fn test_null_required_answer_is_invalid_and_unanswered() {
    let survey = Survey::new("5", "Nullable")
        .with_question(Question::new("1", "Rate", "rating").required().with_range(1, 5));

    let submission: SurveySubmission = serde_json::from_value(json!({
        "surveyId": "5",
        "answers": { "1": null }
    }))
    .unwrap();
    let responses = enrich(&survey, vec![submission.into_response()]);

    assert!(!responses[0].answers[0].is_valid);
    assert_eq!(completion_rate(&responses, &survey), 0);

    let stats = statistics(&survey, &responses);
    assert_eq!(stats.question("1").unwrap().invalid_count, 1);
    assert!(stats.question("1").unwrap().responses.is_empty());
}

// =============================================================================
// Mixed Survey
// =============================================================================

#[test]
fn test_mixed_survey_report() {
    let survey: Survey = serde_json::from_value(json!({
        "id": "s-9",
        "title": "Product survey",
        "createdAt": "2024-01-15T09:00:00Z",
        "questions": [
            { "id": "q1", "text": "Plan", "type": "single-choice", "required": true,
              "options": ["Free", "Pro"] },
            { "id": "q2", "text": "Integrations", "type": "multiple-choice", "required": true,
              "options": ["Slack", "Jira", "GitHub"] },
            { "id": "q3", "text": "Comments", "type": "text" }
        ]
    }))
    .unwrap();

    let payloads = [
        json!({ "surveyId": "s-9", "answers": { "q1": "Pro", "q2": ["Slack", "Jira"], "q3": "great" },
                "completionTime": 120 }),
        json!({ "surveyId": "s-9", "answers": { "q1": "Free", "q2": "Slack" },
                "completionTime": 45 }),
        json!({ "surveyId": "s-9", "answers": { "q1": "Pro", "q2": [] } }),
    ];
    let responses = enrich(
        &survey,
        payloads
            .iter()
            .map(|p| {
                serde_json::from_value::<SurveySubmission>(p.clone())
                    .unwrap()
                    .into_response()
            })
            .collect(),
    );

    let stats = SurveyStatisticsReport::default().compile(&survey, &responses);

    // 5 of 6 required slots answered
    assert_eq!(stats.completion_rate, 83);
    // (120 + 45 + 0) / 3
    assert_eq!(stats.average_completion_time, 55);
    assert_eq!(stats.start_date, survey.created_at);

    let plan = stats.question("q1").unwrap();
    assert_eq!(plan.count_for("Pro"), 2);
    assert_eq!(plan.responses[0].percentage, 66);
    assert_eq!(plan.count_for("Free"), 1);
    assert_eq!(plan.responses[1].percentage, 33);

    let integrations = stats.question("q2").unwrap();
    assert_eq!(integrations.count_for("Slack"), 2);
    assert_eq!(integrations.count_for("Jira"), 1);
    assert_eq!(integrations.answered_count, 2);
    assert_eq!(integrations.invalid_count, 1);

    let comments = stats.question("q3").unwrap();
    assert_eq!(comments.count_for("great"), 1);
    assert_eq!(comments.answered_count, 1);
}

#[test]
fn test_statistics_json_shape() {
    let survey = Survey::new("3", "Shape")
        .with_question(Question::new("1", "Rate", "rating").required());
    let responses = enrich(&survey, vec![SurveyResponse::new("3").with_answer("1", "4")]);

    let value = serde_json::to_value(statistics(&survey, &responses)).unwrap();
    assert_eq!(value["surveyId"], "3");
    assert_eq!(value["totalResponses"], 1);
    assert_eq!(value["completionRate"], 100);
    assert_eq!(value["averageCompletionTime"], 0);
    assert!(value["endDate"].is_null());
    assert_eq!(value["questionStats"][0]["questionTitle"], "Rate");
    assert_eq!(
        value["questionStats"][0]["responses"][0],
        json!({ "answer": "4", "count": 1, "percentage": 100 })
    );
}
