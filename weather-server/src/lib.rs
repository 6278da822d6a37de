//! HTTP weather service: city lookups proxied to an upstream provider, a
//! random sample location and a global average, each behind a per-client
//! rate limit.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rand::seq::IndexedRandom;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};
use weather_core::{ProviderError, WeatherProvider, WeatherResult};

pub mod config;
pub mod data;
pub mod limiter;

use limiter::RateLimiter;

pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
    random_locations: Vec<WeatherResult>,
    global_average: WeatherResult,
    location_limit: RateLimiter,
    random_limit: RateLimiter,
    global_limit: RateLimiter,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            random_locations: data::random_locations(),
            global_average: data::global_average(),
            location_limit: RateLimiter::per_minute(10),
            random_limit: RateLimiter::per_minute(5),
            global_limit: RateLimiter::per_minute(5),
        }
    }

    pub fn with_random_locations(mut self, locations: Vec<WeatherResult>) -> Self {
        self.random_locations = locations;
        self
    }
}

#[derive(Debug)]
pub enum ApiError {
    Provider(ProviderError),
    RateLimited(String),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Provider(err) => {
                let status =
                    StatusCode::from_u16(err.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(json!({ "detail": err.detail }))).into_response()
            }
            ApiError::RateLimited(limit) => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": format!("Rate limit exceeded: {limit}") })),
            )
                .into_response(),
        }
    }
}

fn enforce(limiter: &RateLimiter, addr: SocketAddr, route: &str) -> Result<(), ApiError> {
    if limiter.check(addr.ip()) {
        Ok(())
    } else {
        warn!(client = %addr.ip(), route, "rate limit exceeded");
        Err(ApiError::RateLimited(limiter.describe()))
    }
}

async fn location_weather(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(location): Path<String>,
) -> Result<Json<WeatherResult>, ApiError> {
    enforce(&state.location_limit, addr, "location")?;
    info!(location = %location, "weather lookup");
    Ok(Json(state.provider.current(&location).await?))
}

async fn random_weather(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<WeatherResult>, ApiError> {
    enforce(&state.random_limit, addr, "random")?;
    state
        .random_locations
        .choose(&mut rand::rng())
        .cloned()
        .map(Json)
        .ok_or_else(|| ProviderError::new(500, "No random locations available.").into())
}

async fn global_average(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<WeatherResult>, ApiError> {
    enforce(&state.global_limit, addr, "global")?;
    Ok(Json(state.global_average.clone()))
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather/global/average", get(global_average))
        .route("/weather/random/location", get(random_weather))
        .route("/weather/{location}", get(location_weather))
        .with_state(state)
}

/// Serve the API on `listener` until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "weather service listening");
    axum::serve(listener, app(state).into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
