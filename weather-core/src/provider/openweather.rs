use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::ProviderError, model::WeatherResult};

use super::WeatherProvider;

pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current weather from OpenWeatherMap, shaped like the service's own payload.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    api_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_url(api_key, OPENWEATHER_API_URL)
    }

    pub fn with_url(api_key: Option<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_url: api_url.into(),
            http: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: serde_json::Number,
    humidity: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_result(self, city: &str) -> WeatherResult {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "N/A".to_string());

        WeatherResult {
            location: Some(self.name.unwrap_or_else(|| city.to_owned()).into()),
            temperature: Some(format!("{}°C", self.main.temp).into()),
            humidity: Some(format!("{}%", self.main.humidity).into()),
            condition: Some(condition.into()),
            description: None,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherResult, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(503, "Weather service unavailable: API key not configured.")
        })?;

        debug!(city, "querying OpenWeather");

        let request_failed = |e: reqwest::Error| {
            ProviderError::new(503, format!("Weather service request failed: {}", describe(e)))
        };

        let res = self
            .http
            .get(&self.api_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(request_failed)?;

        let status = res.status();
        let body = res.text().await.map_err(request_failed)?;

        if !status.is_success() {
            warn!(city, %status, "OpenWeather request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    ProviderError::new(503, "Weather service authentication failed. Check API key.")
                }
                StatusCode::NOT_FOUND => {
                    ProviderError::new(404, format!("Weather data not found for location: {city}"))
                }
                _ => ProviderError::new(
                    status.as_u16(),
                    format!("Error fetching weather data: {}", truncate_body(&body)),
                ),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(city, error = %e, "unexpected OpenWeather payload");
            ProviderError::new(500, "Error parsing weather data from provider.")
        })?;

        Ok(parsed.into_result(city))
    }
}

/// Error text with its causes. The request URL carries the API key, so it is
/// stripped before anything is formatted.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut text = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
