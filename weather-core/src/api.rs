use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::QueryError,
    model::{ErrorBody, WeatherQuery, WeatherResult, is_dot_segment},
};

/// Default address of the weather service.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Access to the weather service endpoints.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, QueryError>;
}

/// [`WeatherApi`] over HTTP. No timeout is set; the transport's own limits apply.
#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: Url,
    http: Client,
}

impl HttpWeatherApi {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, http: Client::new() }
    }

    /// Parse `base_url` and build a client for it.
    pub fn from_str_url(base_url: &str) -> anyhow::Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid weather service URL '{base_url}': {e}"))?;
        if url.cannot_be_a_base() {
            anyhow::bail!("Weather service URL '{base_url}' cannot be used as a base URL");
        }
        Ok(Self::new(url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for `query`, keeping any path prefix of the base URL.
    pub fn url_for(&self, query: &WeatherQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(query.segments());
        }
        url
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, QueryError> {
        if let WeatherQuery::Location(name) = query {
            if name.trim().is_empty() {
                return Err(QueryError::EmptyLocation);
            }
            if is_dot_segment(name) {
                return Err(QueryError::InvalidLocation(name.clone()));
            }
        }

        let url = self.url_for(query);
        debug!(%url, "requesting weather");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message());
            return Err(QueryError::Server { status: status.as_u16(), detail });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_query_path() {
        let api = HttpWeatherApi::from_str_url("http://localhost:8000").unwrap();
        let url = api.url_for(&WeatherQuery::Location("São Paulo".into()));
        assert_eq!(url.as_str(), "http://localhost:8000/weather/S%C3%A3o%20Paulo");
    }

    #[test]
    fn url_keeps_base_prefix() {
        let api = HttpWeatherApi::from_str_url("https://example.com/api/").unwrap();
        let url = api.url_for(&WeatherQuery::GlobalAverage);
        assert_eq!(url.as_str(), "https://example.com/api/weather/global/average");
    }

    #[tokio::test]
    async fn dot_locations_are_rejected_before_sending() {
        // Port 9 (discard) would fail to connect if a request were made.
        let api = HttpWeatherApi::from_str_url("http://127.0.0.1:9").unwrap();

        for name in [".", ".."] {
            let err = api.fetch(&WeatherQuery::Location(name.into())).await.unwrap_err();
            assert!(matches!(err, QueryError::InvalidLocation(_)), "{name:?} gave {err:?}");
        }
        let err = api.fetch(&WeatherQuery::Location(String::new())).await.unwrap_err();
        assert!(matches!(err, QueryError::EmptyLocation));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpWeatherApi::from_str_url("not a url").unwrap_err();
        assert!(err.to_string().contains("Invalid weather service URL"));

        let err = HttpWeatherApi::from_str_url("mailto:me@example.com").unwrap_err();
        assert!(err.to_string().contains("cannot be used as a base URL"));
    }
}
