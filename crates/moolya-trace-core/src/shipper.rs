//! Backend log shipper
//!
//! Sends each record to the collection backend with a single JSON POST.
//! Delivery is best-effort: failures are logged and dropped, never retried,
//! and never reported back to the request that produced the record.

use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::TracerConfig;
use crate::entry::{CustomLogEntry, LogEntry};
use crate::error::{ConfigError, ShipError};
use crate::level::SeverityLevel;
use crate::trace_id::TraceId;
use crate::API_KEY_HEADER;

/// Ships log records to the configured backend.
///
/// Cheap to clone: the HTTP client pool and endpoint are shared.
#[derive(Clone)]
pub struct Shipper {
    inner: Arc<ShipperInner>,
}

struct ShipperInner {
    http_client: reqwest::Client,
    endpoint: Url,
    api_key: Option<HeaderValue>,
}

impl Shipper {
    /// Create a shipper with a default HTTP client
    pub fn new(config: &TracerConfig) -> Result<Self, ConfigError> {
        let http_client = reqwest::Client::builder().build()?;
        Self::with_client(config, http_client)
    }

    /// Create with a custom HTTP client (useful for testing)
    pub fn with_client(
        config: &TracerConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let endpoint = config.backend_url()?;
        let api_key = config
            .api_key
            .as_deref()
            .map(|key| {
                let mut value = HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidApiKey)?;
                value.set_sensitive(true);
                Ok::<_, ConfigError>(value)
            })
            .transpose()?;

        Ok(Self {
            inner: Arc::new(ShipperInner {
                http_client,
                endpoint,
                api_key,
            }),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Ship a request record with the given severity.
    ///
    /// Never fails: problems are logged as warnings and the record is dropped.
    pub async fn ship(&self, level: SeverityLevel, entry: LogEntry) {
        let trace_id = entry.trace_id.clone();
        if let Err(e) = self.try_ship(level, entry).await {
            warn!(trace_id = %trace_id, "[Shipper] {}", e);
        }
    }

    /// Ship a request record, reporting the outcome.
    ///
    /// Returns the backend's status code on a 2xx response.
    pub async fn try_ship(
        &self,
        level: SeverityLevel,
        entry: LogEntry,
    ) -> Result<StatusCode, ShipError> {
        let entry = entry.with_level(level);
        self.post(&entry.trace_id, &entry).await
    }

    /// Ship an application log line correlated with a request.
    ///
    /// Same delivery policy as [`Shipper::ship`].
    pub async fn log_with_level(
        &self,
        trace_id: &TraceId,
        level: SeverityLevel,
        message: &str,
        details: &str,
    ) {
        let entry = CustomLogEntry::new(trace_id.clone(), level, message, details);
        if let Err(e) = self.post(trace_id, &entry).await {
            warn!(trace_id = %trace_id, "[Shipper] {}", e);
        }
    }

    async fn post<T: Serialize>(
        &self,
        trace_id: &TraceId,
        record: &T,
    ) -> Result<StatusCode, ShipError> {
        let payload = serde_json::to_vec(record)?;
        debug!(
            trace_id = %trace_id,
            bytes = payload.len(),
            "[Shipper] POST {}",
            self.inner.endpoint
        );

        let mut request = self
            .inner
            .http_client
            .post(self.inner.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(key) = &self.inner.api_key {
            request = request.header(API_KEY_HEADER, key.clone());
        }

        let response = request.send().await.map_err(ShipError::Transport)?;
        let status = response.status();
        // Release the connection before reporting the outcome
        drop(response);

        if status.is_success() {
            Ok(status)
        } else {
            Err(ShipError::Status(status))
        }
    }
}

impl std::fmt::Debug for Shipper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shipper")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("api_key", &self.inner.api_key.is_some())
            .finish()
    }
}
