//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    pub version: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// `User-Agent` sent by the command-line client, e.g. `catmgr/0.1.0`
pub fn default_user_agent() -> String {
    let info = version_info();
    format!("{}/{}", info.name, info.version)
}
