use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use strongbots::config::{warn_missing_chat_env, SiteConfig};
use strongbots::services::calendar::HttpCalendarProvider;
use strongbots::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SiteConfig::load();
    warn_missing_chat_env();

    let calendar = HttpCalendarProvider::new(
        config.calendar_api_url.clone(),
        config.calendar_api_key.clone(),
    );
    tracing::info!(url = %config.calendar_api_url, "using remote calendar service");

    let state = Arc::new(AppState::new(config.clone(), Box::new(calendar)));
    let app = strongbots::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
