use anyhow::{Context, Result};
use dotenv::dotenv;

use api::config::AppConfig;
use api::observability::Observability;
use api::routes;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = AppConfig::from_env().context("failed to load API configuration")?;

    let state = AppState::from_config(&config, obs.registry);
    if config.seed_mock_data {
        state
            .store
            .seed_mock()
            .await
            .context("mock driving schools failed validation")?;
    }

    let app = routes::app(state, &config.cors_allowed_origins);

    let addr = config.bind_addr();
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
