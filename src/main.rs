use std::sync::Arc;

use anyhow::Result;
use tripcraft::api::AppState;
use tripcraft::{OpenAiClient, TripCraftConfig, TripPlanner, cache, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripCraftConfig::load()?;
    let _otel_guard = telemetry::init(&config.logging)?;

    tracing::info!("Starting TripCraft v{}", tripcraft::VERSION);

    if let Err(e) = cache::init(config.cache_dir()) {
        tracing::warn!("Running without section cache: {e}");
    }

    let client = OpenAiClient::new(config.completion.clone())?;
    let planner = TripPlanner::new(Arc::new(client), config.clone());
    let state = Arc::new(AppState { planner });

    web::run(state, config.server.port).await
}
