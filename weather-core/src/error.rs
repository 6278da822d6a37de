use thiserror::Error;

/// Why a weather query did not produce a result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Please enter a city name.")]
    EmptyLocation,

    #[error("'{0}' is not a valid city name.")]
    InvalidLocation(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    #[error("Invalid weather data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QueryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::Server { status, .. } => Some(*status),
            QueryError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP error! status: {status}"),
    }
}

/// HTTP-shaped failure raised by an upstream weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ProviderError {
    pub status: u16,
    pub detail: String,
}

impl ProviderError {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }
}
