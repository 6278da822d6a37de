use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A single field of a weather payload. The service sends text for most
/// fields but plain numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Empty text and `false` carry nothing worth showing. Whitespace and
    /// numbers, zero included, are shown as sent.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Other(v) => matches!(v, serde_json::Value::Bool(false)),
            FieldValue::Number(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Success payload of every weather endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldValue>,
}

/// Failure payload of the weather service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human readable detail message, if the server supplied a usable one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// One of the three requests the client knows how to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherQuery {
    Location(String),
    RandomLocation,
    GlobalAverage,
}

/// `.` and `..` are dropped or resolved by URL handling, so they can never
/// name a location.
pub(crate) fn is_dot_segment(name: &str) -> bool {
    matches!(name, "." | "..")
}

impl WeatherQuery {
    /// Location query from raw field input, trimmed and validated.
    pub fn location(input: &str) -> Result<Self, QueryError> {
        let location = input.trim();
        if location.is_empty() {
            return Err(QueryError::EmptyLocation);
        }
        if is_dot_segment(location) {
            return Err(QueryError::InvalidLocation(location.to_owned()));
        }
        Ok(WeatherQuery::Location(location.to_owned()))
    }

    /// Path segments below the service root, unencoded.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            WeatherQuery::Location(name) => vec!["weather", name.as_str()],
            WeatherQuery::RandomLocation => vec!["weather", "random", "location"],
            WeatherQuery::GlobalAverage => vec!["weather", "global", "average"],
        }
    }

    /// Percent-encoded request path, e.g. `/weather/New%20York`.
    pub fn path(&self) -> String {
        let Ok(mut url) = reqwest::Url::parse("http://localhost/") else {
            return format!("/{}", self.segments().join("/"));
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(self.segments());
        }
        url.path().to_owned()
    }
}
