use moolya_trace_core::{ConfigError, Shipper, TracerConfig};
use std::sync::Arc;

/// Middleware state: immutable configuration plus the shipper built from it.
///
/// Built once at startup and cloned into every request.
#[derive(Clone, Debug)]
pub struct Tracer {
    config: Arc<TracerConfig>,
    shipper: Shipper,
}

impl Tracer {
    pub fn new(config: TracerConfig) -> Result<Self, ConfigError> {
        let shipper = Shipper::new(&config)?;
        Ok(Self::with_shipper(config, shipper))
    }

    /// Use an already-built shipper (e.g. one with a custom HTTP client)
    pub fn with_shipper(config: TracerConfig, shipper: Shipper) -> Self {
        Self {
            config: Arc::new(config),
            shipper,
        }
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn shipper(&self) -> &Shipper {
        &self.shipper
    }
}
