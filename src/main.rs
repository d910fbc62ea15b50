use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripweaver::config::PlannerConfig;
use tripweaver::gemini::GeminiClient;
use tripweaver::pipeline::Planner;
use tripweaver::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::from_env().context("Failed to load configuration")?;
    let client = GeminiClient::new(&config).context("Failed to build Gemini client")?;
    let planner = Planner::new(Arc::new(client));
    let state = AppState::new(planner).context("Failed to build application state")?;

    tracing::info!(model = %config.model, "Starting TripWeaver");
    web::run(state, config.port).await.context("Server error")?;
    Ok(())
}
