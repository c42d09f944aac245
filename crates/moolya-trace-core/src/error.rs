//! Configuration and shipping errors

use http::StatusCode;
use thiserror::Error;

/// Errors raised while validating tracer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No backend URL was provided
    #[error("backend log URL is not configured")]
    MissingBackendUrl,

    /// The backend URL did not parse
    #[error("invalid backend log URL '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The backend URL parsed but is not http(s)
    #[error("backend log URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    /// The API key cannot be sent as a header value
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// An environment variable held an unusable value
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Reasons a single shipping attempt did not succeed
#[derive(Debug, Error)]
pub enum ShipError {
    #[error("failed to serialize log entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to send log entry to backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend log entry returned status code: {}", .0.as_u16())]
    Status(StatusCode),
}
