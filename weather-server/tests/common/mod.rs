#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use weather_core::{ProviderError, WeatherProvider, WeatherResult};
use weather_server::AppState;

/// Echoes the requested city back, except for "Atlantis" which does not exist.
#[derive(Debug, Default)]
pub struct StubProvider {
    pub cities: Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(&self, city: &str) -> Result<WeatherResult, ProviderError> {
        self.cities.lock().unwrap().push(city.to_owned());
        if city == "Atlantis" {
            return Err(ProviderError::new(
                404,
                format!("Weather data not found for location: {city}"),
            ));
        }
        Ok(WeatherResult {
            location: Some(city.into()),
            temperature: Some("22C".into()),
            humidity: Some("60%".into()),
            ..Default::default()
        })
    }
}

pub fn state(provider: Arc<StubProvider>) -> Arc<AppState> {
    Arc::new(AppState::new(provider))
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

/// Run the weather service on an ephemeral local port.
pub async fn spawn_service(state: Arc<AppState>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(weather_server::serve(listener, state));
    addr
}
