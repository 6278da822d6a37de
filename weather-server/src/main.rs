use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::OpenWeatherProvider;
use weather_server::{AppState, config::ServerConfig, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_server=info,weather_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ServerConfig::parse();

    let provider = OpenWeatherProvider::with_url(
        config.openweathermap_api_key.clone(),
        config.openweathermap_api_url.clone(),
    );
    if !provider.is_configured() {
        warn!("OPENWEATHERMAP_API_KEY not found. Real-time weather data may not be available.");
    }

    let state = Arc::new(AppState::new(Arc::new(provider)));
    let listener = TcpListener::bind(config.bind).await?;
    serve(listener, state).await
}
