//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("SURVEY/NOT_FOUND/{0}")]
    MissingSurvey(String),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),

    #[error("SUBMIT/{0}")]
    InvalidSubmission(String),
}

impl SurveyError {
    /// Short machine-readable code, the prefix of the display form
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSurvey(_) => "SURVEY/NOT_FOUND",
            Self::Config(_) => "CONFIG",
            Self::Serialize(_) => "SERIALIZE",
            Self::InvalidSubmission(_) => "SUBMIT",
        }
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for SurveyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}
