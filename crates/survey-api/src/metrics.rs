//! Prometheus counters for the submission and statistics paths
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub submissions: IntCounter,
    pub invalid_answers: IntCounter,
    pub unmatched_answers: IntCounter,
    pub statistics_requests: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let submissions = counter(&registry, "survey_submissions_total", "Stored survey responses")?;
        let invalid_answers = counter(
            &registry,
            "survey_invalid_answers_total",
            "Answers flagged invalid at submission",
        )?;
        let unmatched_answers = counter(
            &registry,
            "survey_unmatched_answers_total",
            "Answers referencing an unknown question",
        )?;
        let statistics_requests = counter(
            &registry,
            "survey_statistics_requests_total",
            "Statistics reports served",
        )?;

        Ok(Self {
            registry,
            submissions,
            invalid_answers,
            unmatched_answers,
            statistics_requests,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, prometheus::Error> {
    let counter = IntCounter::new(name, help)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}
