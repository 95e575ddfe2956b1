//! Custom error types for spendlink
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for spendlink operations
#[derive(Error, Debug)]
pub enum SpendlinkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The server rejected a request and said why
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response
    #[error("Network error: {0}")]
    Transport(String),

    /// No session is available for an authenticated request
    #[error("Not logged in. Run 'spendlink login' first.")]
    Unauthenticated,

    /// The store task is no longer running
    #[error("Store error: {0}")]
    Store(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendlinkError {
    /// Create a "not found" error for bank accounts
    pub fn bank_account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bank account",
            identifier: identifier.into(),
        }
    }

    /// Create an API error from a status code and server message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status reported by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpendlinkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendlinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for SpendlinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias for spendlink operations
pub type SpendlinkResult<T> = Result<T, SpendlinkError>;
