//! Binary entrypoint for the Survey API server.
use survey_api::{run, ApiConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        tracing::error!(%err, "server stopped");
        std::process::exit(1);
    }
}
