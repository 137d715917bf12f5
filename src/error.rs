use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to read preferences: {0}")]
    Preferences(String),

    #[error("invalid search query: {0}")]
    InvalidQuery(#[from] validator::ValidationErrors),

    #[error("Incorrect API Key")]
    Unauthorized,

    /// Anybox answered with an unexpected status; `message` is the raw body.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("request to Anybox failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        SearchError::Preferences(err.to_string())
    }
}
