//! The weather query client: three user actions, each turned into one
//! request and rendered into its own region of a [`Surface`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    api::WeatherApi,
    display::{Content, Region, Surface},
    error::QueryError,
    model::{WeatherQuery, WeatherResult},
    render::render,
};

/// Fixed product copy prepended to every failed fetch.
pub const RATE_LIMIT_HINT: &str = "Eda Mone 5 times athilum kooduthal 5 mins il pattula ketto";

/// The actions a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    QueryLocation,
    QueryRandom,
    QueryGlobalAverage,
}

/// A key pressed while the location field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

impl Action {
    /// Enter in the location field behaves like the location button.
    pub fn from_key(key: Key) -> Option<Action> {
        match key {
            Key::Enter => Some(Action::QueryLocation),
            _ => None,
        }
    }
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(Region),
    ErrorShown(Region, String),
}

pub struct WeatherClient {
    api: Arc<dyn WeatherApi>,
    surface: Arc<dyn Surface>,
}

impl WeatherClient {
    pub fn new(api: Arc<dyn WeatherApi>, surface: Arc<dyn Surface>) -> Self {
        Self { api, surface }
    }

    /// Run `action` exactly as its button would. `input` is the current
    /// content of the location field and is ignored by the other actions.
    pub async fn perform(&self, action: Action, input: &str) -> Outcome {
        match action {
            Action::QueryLocation => self.query_location(input).await,
            Action::QueryRandom => self.query_random().await,
            Action::QueryGlobalAverage => self.query_global_average().await,
        }
    }

    /// Handle a key press in the location field.
    pub async fn on_key(&self, key: Key, input: &str) -> Option<Outcome> {
        let action = Action::from_key(key)?;
        Some(self.perform(action, input).await)
    }

    pub async fn query_location(&self, input: &str) -> Outcome {
        let query = match WeatherQuery::location(input) {
            Ok(query) => query,
            Err(err) => return self.show_error(err.to_string()),
        };

        self.surface.clear(Region::Random);
        self.surface.clear(Region::GlobalAverage);

        match self.api.fetch(&query).await {
            Ok(result) => self.show_weather(Region::Primary, &result),
            Err(err) => {
                warn!(?query, error = %err, "failed to fetch weather");
                self.show_error(failure_message("Failed to fetch weather", &err))
            }
        }
    }

    pub async fn query_random(&self) -> Outcome {
        self.surface.clear(Region::Primary);
        self.surface.clear(Region::GlobalAverage);
        self.fetch_into(
            WeatherQuery::RandomLocation,
            Region::Random,
            "Failed to fetch random weather",
        )
        .await
    }

    pub async fn query_global_average(&self) -> Outcome {
        self.surface.clear(Region::Primary);
        self.surface.clear(Region::Random);
        self.fetch_into(
            WeatherQuery::GlobalAverage,
            Region::GlobalAverage,
            "Failed to fetch global average",
        )
        .await
    }

    async fn fetch_into(&self, query: WeatherQuery, region: Region, context: &str) -> Outcome {
        match self.api.fetch(&query).await {
            Ok(result) => self.show_weather(region, &result),
            Err(err) => {
                warn!(?query, error = %err, "{context}");
                let message = failure_message(context, &err);
                self.surface.show(region, Content::InlineError(message.clone()));
                Outcome::ErrorShown(region, message)
            }
        }
    }

    fn show_weather(&self, region: Region, result: &WeatherResult) -> Outcome {
        info!(?region, "rendering weather");
        self.surface.show(region, Content::Weather(render(result)));
        self.surface.clear(Region::Error);
        Outcome::Rendered(region)
    }

    fn show_error(&self, message: String) -> Outcome {
        self.surface.clear(Region::Primary);
        self.surface.show(Region::Error, Content::Message(message.clone()));
        Outcome::ErrorShown(Region::Error, message)
    }
}

fn failure_message(context: &str, err: &QueryError) -> String {
    format!("{RATE_LIMIT_HINT}\n{context}: {err}")
}
