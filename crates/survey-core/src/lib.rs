//! Survey Core: data model, answer validation and the submission pipeline
//!
//! Everything here is pure and synchronous. Persistence, transport and the
//! response counter live with the caller.
//!
//! # Example
//!
//! ```
//! use survey_core::{Question, Survey, SurveyResponse, SubmissionPipeline};
//!
//! let survey = Survey::new("1", "Feedback")
//!     .with_question(Question::new("1", "Rate us", "rating").required());
//!
//! let response = SurveyResponse::new("1").with_answer("1", "4");
//! let outcome = SubmissionPipeline::default().run(response, &survey).unwrap();
//!
//! assert!(outcome.response.answers[0].is_valid);
//! assert_eq!(outcome.response.answers[0].question_title, "Rate us");
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod runner;
pub mod stage;
pub mod validator;

pub use config::{EngineConfig, MissingSurveyPolicy};
pub use context::SubmissionContext;
pub use error::SurveyError;
pub use model::{
    filter_by_status, Answer, AnswerMap, AnswerValue, Question, QuestionSettings, QuestionType,
    Survey, SurveyResponse, SurveyStatus, SurveySubmission,
};
pub use runner::{
    submit, StageTrace, SubmissionOutcome, SubmissionPipeline, SubmissionSummary, SubmissionTrace,
};
pub use stage::{EnrichAnswers, StageTally, StampSubmittedAt, SubmissionStage};
pub use validator::{validate_answer, AnswerValidator, Rejection};
