//! Settings file management

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ManagerError;
use crate::filesys::file::File;
use crate::http::endpoint::{EndpointConfig, DEFAULT_CHARSET, DEFAULT_USERNAME};
use crate::logs::LogLevel;

/// Client settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Manager endpoint configuration
    #[serde(default)]
    pub manager: ManagerSettings,
}

impl Settings {
    /// Load settings from a JSON file
    pub async fn load(file: &File) -> Result<Self, ManagerError> {
        file.read_json().await
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file does not exist
    pub async fn load_or_default(file: &File) -> Result<Self, ManagerError> {
        if file.exists().await {
            Self::load(file).await
        } else {
            Ok(Self::default())
        }
    }
}

/// Manager endpoint settings
#[derive(Clone, Deserialize)]
pub struct ManagerSettings {
    /// URL of the manager text interface
    #[serde(default = "default_manager_url")]
    pub url: String,

    /// Username; `null` disables authentication
    #[serde(default = "default_username")]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Charset used to encode query-string values
    #[serde(default = "default_charset")]
    pub charset: String,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Connect and read timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_manager_url() -> String {
    "http://localhost:8080/manager/text".to_string()
}

fn default_username() -> Option<String> {
    Some(DEFAULT_USERNAME.to_string())
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            url: default_manager_url(),
            username: default_username(),
            password: None,
            charset: default_charset(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for ManagerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("charset", &self.charset)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ManagerSettings {
    /// Build and validate the endpoint configuration
    pub fn endpoint(&self) -> Result<EndpointConfig, ManagerError> {
        let mut endpoint = EndpointConfig::new(&self.url)?.with_charset(&self.charset)?;

        endpoint = match &self.username {
            Some(username) => {
                endpoint.with_credentials(username.clone(), self.password.clone().unwrap_or_default())
            }
            None => endpoint.without_credentials(),
        };

        if let Some(user_agent) = &self.user_agent {
            endpoint = endpoint.with_user_agent(user_agent.clone());
        }

        if let Some(secs) = self.timeout_secs {
            endpoint = endpoint.with_timeout(Duration::from_secs(secs));
        }

        Ok(endpoint)
    }
}

/// Default settings location, `~/.catmgr/settings.json`
pub fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".catmgr")
        .join("settings.json")
}
