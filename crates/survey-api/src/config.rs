//! API configuration from the environment
use survey_core::{EngineConfig, SurveyError};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address, `SURVEY_ADDR`
    pub addr: String,
    /// Loaded from the YAML file named by `SURVEY_ENGINE_CONFIG`, if set
    pub engine: EngineConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, SurveyError> {
        let addr = std::env::var("SURVEY_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let engine = match std::env::var("SURVEY_ENGINE_CONFIG") {
            Ok(path) => EngineConfig::from_path(path)?,
            Err(_) => EngineConfig::default(),
        };
        Ok(Self { addr, engine })
    }
}
