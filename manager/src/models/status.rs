//! Webapp status models

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ManagerError;

/// Lifecycle state of a webapp as reported by the manager listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebappStatus {
    /// Started and serving requests
    Running,

    /// Deployed but stopped
    Stopped,

    /// No webapp is deployed at the requested path
    NotFound,
}

impl WebappStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebappStatus::Running => "running",
            WebappStatus::Stopped => "stopped",
            WebappStatus::NotFound => "not_found",
        }
    }
}

impl FromStr for WebappStatus {
    type Err = ManagerError;

    /// Parse a listing token. `NotFound` is client-side only and never parsed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WebappStatus::Running),
            "stopped" => Ok(WebappStatus::Stopped),
            _ => Err(ManagerError::UnrecognizedStatus(s.to_string())),
        }
    }
}

impl fmt::Display for WebappStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the webapp at one context path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebappStatusRecord {
    pub path: String,
    pub status: WebappStatus,
}

/// One record of the full application listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebappListing {
    /// Context path
    pub path: String,

    /// Lifecycle state
    pub status: WebappStatus,

    /// Number of active sessions
    pub sessions: u32,

    /// Document base or context name
    pub docbase: String,
}
