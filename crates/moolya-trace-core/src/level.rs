//! Severity levels attached to shipped records

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to every shipped record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    Info,
    Debug,
    Error,
}

impl SeverityLevel {
    /// Status-aware severity: 4xx and 5xx are errors, everything else is info
    pub fn from_status(status: StatusCode) -> Self {
        if status.as_u16() >= 400 {
            SeverityLevel::Error
        } else {
            SeverityLevel::Info
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Info => "info",
            SeverityLevel::Debug => "debug",
            SeverityLevel::Error => "error",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
