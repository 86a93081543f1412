//! Error types for the manager client

use thiserror::Error;

/// Message reported when the manager rejects the supplied credentials (HTTP 401)
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "The username and password you provided are not correct (error 401)";

/// Message reported when the user may not use the text interface (HTTP 403)
pub const FORBIDDEN_MESSAGE: &str =
    "The username you provided is not allowed to use the text-based manager (error 403)";

/// Main error type for the manager client
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,

    /// The manager answered without the success prefix; holds the full body
    #[error("{0}")]
    Protocol(String),

    #[error("Unrecognized webapp status: {0:?}")]
    UnrecognizedStatus(String),

    #[error("Malformed listing record: {0:?}")]
    MalformedListing(String),
}

/// Closed classification of manager failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transport,
    Authentication,
    Authorization,
    Protocol,
}

impl ManagerError {
    /// Classify this error
    pub fn kind(&self) -> FailureKind {
        match self {
            ManagerError::ConfigError(_) | ManagerError::JsonError(_) => FailureKind::Configuration,
            ManagerError::IoError(_) | ManagerError::HttpError(_) => FailureKind::Transport,
            ManagerError::InvalidCredentials => FailureKind::Authentication,
            ManagerError::Forbidden => FailureKind::Authorization,
            ManagerError::Protocol(_)
            | ManagerError::UnrecognizedStatus(_)
            | ManagerError::MalformedListing(_) => FailureKind::Protocol,
        }
    }
}
