//! Custom error types for SpendWatch
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::UserId;

/// The main error type for SpendWatch operations
#[derive(Error, Debug)]
pub enum SpendError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Query range with `from` later than `to`
    #[error("Invalid range: 'from' ({from}) is later than 'to' ({to})")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// Referenced user does not exist
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    /// The transaction store could not serve a read or write
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SpendError {
    /// Create a "duplicate" error for transactions
    pub fn duplicate_transaction(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Store failures are the only errors worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Check if this is an unknown-user error
    pub fn is_unknown_user(&self) -> bool {
        matches!(self, Self::UnknownUser(_))
    }

    /// Check if this is an invalid-range error
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SpendWatch operations
pub type SpendResult<T> = Result<T, SpendError>;
