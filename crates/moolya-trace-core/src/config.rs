//! Tracer configuration
//!
//! Built once at startup and handed to the tracer; nothing here is global.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Default cap on how much of each body is copied into a log record (1MB)
pub const DEFAULT_MAX_BODY_CAPTURE: usize = 1024 * 1024;

pub const ENV_BACKEND_URL: &str = "MOOLYA_TRACE_BACKEND_URL";
pub const ENV_API_KEY: &str = "MOOLYA_TRACE_API_KEY";
pub const ENV_MAX_BODY_CAPTURE: &str = "MOOLYA_TRACE_MAX_BODY_CAPTURE";
pub const ENV_TRUST_FORWARDED: &str = "MOOLYA_TRACE_TRUST_FORWARDED";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TracerConfig {
    /// Collection endpoint receiving one POST per request
    pub backend_url: String,
    /// Sent as `X-Moolya-API-Key` when present
    #[serde(default)]
    pub api_key: Option<String>,
    /// Bytes of each request/response body copied into the record; 0 disables capture
    #[serde(default = "default_max_body_capture")]
    pub max_body_capture: usize,
    /// Use `X-Forwarded-For` / `X-Real-IP` when resolving the client IP
    #[serde(default = "default_trust_forwarded")]
    pub trust_forwarded_headers: bool,
}

fn default_max_body_capture() -> usize {
    DEFAULT_MAX_BODY_CAPTURE
}

fn default_trust_forwarded() -> bool {
    true
}

impl TracerConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            api_key: None,
            max_body_capture: DEFAULT_MAX_BODY_CAPTURE,
            trust_forwarded_headers: true,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_body_capture(mut self, max: usize) -> Self {
        self.max_body_capture = max;
        self
    }

    pub fn with_trust_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }

    /// Load configuration from `MOOLYA_TRACE_*` environment variables.
    ///
    /// Only the backend URL is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(ENV_BACKEND_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBackendUrl)?;

        let mut config = Self::new(backend_url.trim());

        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            config.api_key = Some(key);
        }

        if let Some(raw) = lookup(ENV_MAX_BODY_CAPTURE) {
            config.max_body_capture =
                raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_MAX_BODY_CAPTURE,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(ENV_TRUST_FORWARDED) {
            config.trust_forwarded_headers = parse_bool(&raw).ok_or(ConfigError::InvalidEnv {
                var: ENV_TRUST_FORWARDED,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Parse and check the backend URL
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }

        let url = Url::parse(&self.backend_url).map_err(|source| ConfigError::InvalidBackendUrl {
            url: self.backend_url.clone(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
