//! Survey Stats: completion rate, per-question frequencies and reports
//!
//! Pure functions over a loaded survey and its responses. All percentage and
//! average arithmetic truncates.
//!
//! # Example
//!
//! ```
//! use survey_core::{Question, Survey, SurveyResponse};
//! use survey_stats::SurveyStatisticsReport;
//!
//! let survey = Survey::new("1", "Feedback")
//!     .with_question(Question::new("1", "Rate us", "rating").required());
//!
//! let responses = vec![
//!     SurveyResponse::new("1").with_answer("1", "5"),
//!     SurveyResponse::new("1").with_answer("1", ""),
//! ];
//!
//! let stats = SurveyStatisticsReport::default().compile(&survey, &responses);
//! assert_eq!(stats.completion_rate, 50);
//! assert_eq!(stats.question_stats[0].responses[0].percentage, 50);
//! ```

pub mod aggregate;
pub mod completion;
pub mod report;

pub use aggregate::{
    percentage, question_statistics, AnswerStat, QuestionStat, QuestionStatisticsAggregator,
};
pub use completion::{answered_required, completion_rate};
pub use report::{average_completion_time, SurveyStatistics, SurveyStatisticsReport};

use survey_core::{Survey, SurveyResponse};

/// Quick report with the default engine settings
pub fn statistics(survey: &Survey, responses: &[SurveyResponse]) -> SurveyStatistics {
    SurveyStatisticsReport::default().compile(survey, responses)
}
