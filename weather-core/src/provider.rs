use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::ProviderError, model::WeatherResult};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Upstream source of current weather for a named place.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherResult, ProviderError>;
}
