//! Submission Context: state shared by every stage of one pipeline run
use crate::validator::AnswerValidator;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub trace_id: String,
    /// Clock reading used for every default stamped during the run
    pub now: DateTime<Utc>,
    pub validator: AnswerValidator,
}

impl SubmissionContext {
    pub fn new(validator: AnswerValidator, now: DateTime<Utc>) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            now,
            validator,
        }
    }
}
