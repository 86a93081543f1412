//! Manager endpoint configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::errors::ManagerError;

/// Username used when none is configured explicitly
pub const DEFAULT_USERNAME: &str = "admin";

/// Charset used for query strings when none is configured explicitly
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// Character encodings supported for query-string parameter values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryCharset {
    #[default]
    Iso8859_1,
    Utf8,
    UsAscii,
}

impl QueryCharset {
    /// Canonical charset name
    pub fn name(&self) -> &'static str {
        match self {
            QueryCharset::Iso8859_1 => "ISO-8859-1",
            QueryCharset::Utf8 => "UTF-8",
            QueryCharset::UsAscii => "US-ASCII",
        }
    }

    /// Transcode a string into this charset.
    ///
    /// Characters outside the charset are replaced with `?`.
    pub fn encode(&self, value: &str) -> Vec<u8> {
        match self {
            QueryCharset::Utf8 => value.as_bytes().to_vec(),
            QueryCharset::Iso8859_1 => value
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            QueryCharset::UsAscii => value
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl FromStr for QueryCharset {
    type Err = ManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" => Ok(QueryCharset::Iso8859_1),
            "utf-8" | "utf8" => Ok(QueryCharset::Utf8),
            "us-ascii" | "ascii" => Ok(QueryCharset::UsAscii),
            _ => Err(ManagerError::ConfigError(format!(
                "Unsupported query charset: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for QueryCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connection details for one manager instance
#[derive(Debug)]
pub struct EndpointConfig {
    base_url: String,
    username: Option<String>,
    password: Option<SecretString>,
    charset: QueryCharset,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl EndpointConfig {
    /// Create a configuration for the given manager URL, using the default
    /// `admin` user with an empty password and ISO-8859-1 query encoding
    pub fn new(url: &str) -> Result<Self, ManagerError> {
        let parsed = Url::parse(url)
            .map_err(|e| ManagerError::ConfigError(format!("Invalid manager URL {}: {}", url, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ManagerError::ConfigError(format!(
                "Manager URL must be an http(s) URL: {}",
                url
            )));
        }

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            username: Some(DEFAULT_USERNAME.to_string()),
            password: None,
            charset: QueryCharset::default(),
            user_agent: None,
            timeout: None,
        })
    }

    /// Use the given username and password
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Send requests without an `Authorization` header
    pub fn without_credentials(mut self) -> Self {
        self.username = None;
        self.password = None;
        self
    }

    /// Use the named charset for query-string values
    pub fn with_charset(mut self, charset: &str) -> Result<Self, ManagerError> {
        self.charset = charset.parse()?;
        Ok(self)
    }

    /// Identify the client with the given `User-Agent`
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Bound connection and read time
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Manager base URL, without trailing slash
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.expose_secret())
    }

    pub fn charset(&self) -> QueryCharset {
        self.charset
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of a manager command path such as `/list`
    pub(crate) fn command_url(&self, command_path: &str) -> Result<Url, ManagerError> {
        let url = format!("{}{}", self.base_url, command_path);
        Url::parse(&url).map_err(|e| ManagerError::ConfigError(format!("Invalid command URL {}: {}", url, e)))
    }
}
