//! Error types and error handling for pinecheck.
//!
//! Every failure the probe can hit falls into one of three terminal
//! kinds (configuration, connection, query). Ambient failures from
//! reading config files map onto the configuration kind for exit codes.

use thiserror::Error;

/// Result type alias for pinecheck operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Main error type for pinecheck
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("Query failure: {0}")]
    QueryFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ProbeError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a configuration problem (missing or unreadable)
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ProbeError::ConfigurationMissing(_)
                | ProbeError::ConfigError(_)
                | ProbeError::TomlError(_)
        )
    }

    /// Check if the service could not be reached or rejected the key
    pub fn is_connection(&self) -> bool {
        matches!(self, ProbeError::ConnectionFailure(_))
    }

    /// Check if the service was reached but the request failed
    pub fn is_query(&self) -> bool {
        matches!(self, ProbeError::QueryFailure(_))
    }

    /// Process exit code for this error
    ///
    /// 2 = configuration, 3 = connection, 4 = query, 1 = anything else.
    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            2
        } else if self.is_connection() {
            3
        } else if self.is_query() {
            4
        } else {
            1
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProbeError::QueryFailure(format!("invalid response body: {err}"))
        } else {
            // connect, timeout, request and builder errors all mean the
            // request never produced a usable response
            ProbeError::ConnectionFailure(err.to_string())
        }
    }
}
