//! Error types for the Roanuz Football API client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RfaError>;

#[derive(Error, Debug)]
pub enum RfaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{field} not provided and {env_var} environment variable not set")]
    MissingCredential {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("auth failed, please verify your access_key, secret_key and app_id")]
    AuthFailed,

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("no value stored under key {key}")]
    MissingValue { key: String },
}

impl RfaError {
    /// Shorthand for a [`RfaError::Storage`] with a formatted message.
    pub fn storage(message: impl Into<String>) -> Self {
        RfaError::Storage {
            message: message.into(),
        }
    }
}
