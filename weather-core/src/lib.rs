//! Core library for the `weather` client and service.
//!
//! This crate defines:
//! - The weather payload model and its display rendering
//! - The query client driving the three user actions
//! - HTTP access to the weather service and to the upstream provider
//! - Client configuration handling
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod api;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use api::{HttpWeatherApi, WeatherApi};
pub use client::{Action, Key, Outcome, WeatherClient};
pub use config::Config;
pub use display::{Board, Content, Region, Surface};
pub use error::{ProviderError, QueryError};
pub use model::{ErrorBody, FieldValue, WeatherQuery, WeatherResult};
pub use provider::{OpenWeatherProvider, WeatherProvider};
