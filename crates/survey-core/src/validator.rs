//! Answer validation
//!
//! Decides whether a submitted value is acceptable for a question. Rules run
//! in order: the required check first, then the rule for the question type.
//! Nothing here fails; a rejected value is reported as a `Rejection`.

use crate::config::EngineConfig;
use crate::model::{AnswerValue, Question, QuestionType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a value was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Required question left empty
    MissingRequired,
    /// Rating value does not parse as an integer
    NotAnInteger { value: String },
    /// Rating value outside `[min, max]`
    OutOfRange { value: i64, min: i64, max: i64 },
    /// Single-choice value not among the question options
    NotAnOption { value: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "required answer is empty"),
            Self::NotAnInteger { value } => write!(f, "'{}' is not an integer rating", value),
            Self::OutOfRange { value, min, max } => {
                write!(f, "rating {} outside {}..={}", value, min, max)
            }
            Self::NotAnOption { value } => write!(f, "'{}' is not one of the options", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerValidator {
    default_min: i64,
    default_max: i64,
}

impl Default for AnswerValidator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl AnswerValidator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            default_min: config.rating_default_min,
            default_max: config.rating_default_max,
        }
    }

    /// Validity flag for `value` as an answer to `question`
    pub fn validate(&self, value: &AnswerValue, question: &Question) -> bool {
        self.check(value, question).is_ok()
    }

    pub fn check(&self, value: &AnswerValue, question: &Question) -> Result<(), Rejection> {
        if question.required && value.is_empty() {
            return Err(Rejection::MissingRequired);
        }

        match &question.kind {
            QuestionType::Rating => self.check_rating(value, question),
            QuestionType::SingleChoice => {
                if !question.required {
                    return Ok(());
                }
                let choice = value.as_single().unwrap_or_default();
                if question.options.iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(Rejection::NotAnOption {
                        value: choice.to_string(),
                    })
                }
            }
            // Selections are opaque here; only presence matters
            QuestionType::MultipleChoice => self.check_present(value, question),
            _ => self.check_present(value, question),
        }
    }

    /// Effective `(min, max)` for a rating question
    pub fn rating_bounds(&self, question: &Question) -> (i64, i64) {
        let settings = question.settings.unwrap_or_default();
        (
            settings.min.unwrap_or(self.default_min),
            settings.max.unwrap_or(self.default_max),
        )
    }

    fn check_rating(&self, value: &AnswerValue, question: &Question) -> Result<(), Rejection> {
        let raw = value.as_single().unwrap_or_default();
        let rating: i64 = raw.trim().parse().map_err(|_| Rejection::NotAnInteger {
            value: raw.to_string(),
        })?;

        let (min, max) = self.rating_bounds(question);
        if rating < min || rating > max {
            return Err(Rejection::OutOfRange {
                value: rating,
                min,
                max,
            });
        }
        Ok(())
    }

    fn check_present(&self, value: &AnswerValue, question: &Question) -> Result<(), Rejection> {
        if !question.required || !value.is_empty() {
            Ok(())
        } else {
            Err(Rejection::MissingRequired)
        }
    }
}

/// Validate with the default rating bounds (1..=5)
pub fn validate_answer(value: &AnswerValue, question: &Question) -> bool {
    AnswerValidator::default().validate(value, question)
}
