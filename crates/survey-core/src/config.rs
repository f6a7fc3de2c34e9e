//! Engine configuration
//!
//! Rating fallbacks, the legacy multiple-choice delimiter, and how a
//! statistics request against an unknown survey is answered.

use crate::error::SurveyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when statistics are requested for an unknown survey
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSurveyPolicy {
    /// Answer with an all-zero statistics object
    #[default]
    Zeroed,
    /// Fail with `SurveyError::MissingSurvey`
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Lower rating bound when a question has no `settings.min`
    pub rating_default_min: i64,

    /// Upper rating bound when a question has no `settings.max`
    pub rating_default_max: i64,

    /// Separator for multiple-choice answers submitted as one string
    pub multi_choice_delimiter: String,

    pub missing_survey: MissingSurveyPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rating_default_min: 1,
            rating_default_max: 5,
            multi_choice_delimiter: ",".to_string(),
            missing_survey: MissingSurveyPolicy::Zeroed,
        }
    }
}

impl EngineConfig {
    /// Load config from YAML; omitted keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, SurveyError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SurveyError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&raw)
    }

    fn validate(&self) -> Result<(), SurveyError> {
        if self.rating_default_min > self.rating_default_max {
            return Err(SurveyError::Config(format!(
                "ratingDefaultMin {} exceeds ratingDefaultMax {}",
                self.rating_default_min, self.rating_default_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.rating_default_min, 1);
        assert_eq!(config.rating_default_max, 5);
        assert_eq!(config.multi_choice_delimiter, ",");
        assert_eq!(config.missing_survey, MissingSurveyPolicy::Zeroed);
    }

    #[test]
    fn test_partial_yaml() {
        let config = EngineConfig::from_yaml("ratingDefaultMax: 10\nmissingSurvey: strict\n").unwrap();
        assert_eq!(config.rating_default_min, 1);
        assert_eq!(config.rating_default_max, 10);
        assert_eq!(config.missing_survey, MissingSurveyPolicy::Strict);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = EngineConfig::from_yaml("ratingDefaultMin: 9\nratingDefaultMax: 3\n").unwrap_err();
        assert!(matches!(err, SurveyError::Config(_)));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(EngineConfig::from_yaml("missingSurvey: [").is_err());
    }
}
