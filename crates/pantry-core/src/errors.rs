// ABOUTME: Unified error handling for ingestion and matching with standard error codes
// ABOUTME: Defines ErrorCode, AppError, AppResult and storage error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in Pantry returns [`AppResult`]. Errors carry an
//! [`ErrorCode`] that callers (typically an HTTP layer) use to pick a status
//! code, and an optional source error that is logged but never shown to users.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::constants::errors::SERVICE_UNAVAILABLE_MESSAGE;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request payload failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// Concurrent writer created the same unique resource first
    #[serde(rename = "RESOURCE_CONFLICT")]
    ResourceConflict = 4001,
    /// The storage layer is temporarily unavailable
    #[serde(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable = 4003,
    /// A configured deadline elapsed
    #[serde(rename = "OPERATION_TIMED_OUT")]
    OperationTimedOut = 4004,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Database statement or connection failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Database is locked or busy; the operation may be retried
    #[serde(rename = "DATABASE_BUSY")]
    DatabaseBusy = 9002,
    /// JSON encoding or decoding failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP status code a transport layer should use for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::ResourceConflict => 409,
            Self::ServiceUnavailable | Self::DatabaseBusy => 503,
            Self::OperationTimedOut => 504,
            Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError
            | Self::ConfigInvalid => 500,
        }
    }

    /// User-facing description of this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceConflict => "The resource was created concurrently; retry the request",
            Self::ServiceUnavailable | Self::DatabaseBusy => SERVICE_UNAVAILABLE_MESSAGE,
            Self::OperationTimedOut => "The operation did not complete in time",
            Self::ConfigInvalid => "The service configuration is invalid",
            Self::InternalError | Self::DatabaseError | Self::SerializationError => {
                "An internal error occurred"
            }
        }
    }

    /// Whether an operation failing with this code may succeed if retried
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::DatabaseBusy)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Application error with a stable code and an optional underlying cause
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    /// Stable error classification
    pub code: ErrorCode,
    /// Human readable message
    pub message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Result alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Prefix the message with where the error happened
    #[must_use]
    pub fn in_context(mut self, context: &str) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether the failed operation may be retried as-is
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unique resource created concurrently by another writer
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceConflict, message)
    }

    /// Generic storage unavailability without internal detail
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(ErrorCode::ServiceUnavailable, SERVICE_UNAVAILABLE_MESSAGE)
    }

    /// Deadline elapsed
    pub fn timeout(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        Self::new(
            ErrorCode::OperationTimedOut,
            format!("{operation} timed out"),
        )
    }

    /// Database failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Database locked or busy
    pub fn database_busy(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseBusy, message)
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Hide storage and internal failures behind a generic unavailable error
    ///
    /// The original error is logged with `component` as context. Codes that
    /// are meaningful to callers (invalid input, conflicts, timeouts) pass
    /// through unchanged.
    #[must_use]
    pub fn cover(self, component: &str) -> Self {
        match self.code {
            ErrorCode::InvalidInput
            | ErrorCode::ResourceConflict
            | ErrorCode::OperationTimedOut
            | ErrorCode::ServiceUnavailable => self,
            ErrorCode::ConfigInvalid
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::DatabaseBusy
            | ErrorCode::SerializationError => {
                error!(component, code = ?self.code, error = %self, source = ?self.source, "Operation failed");
                Self::unavailable().with_boxed_source(self.source)
            }
        }
    }

    fn with_boxed_source(mut self, source: Option<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = source;
        self
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
        .with_source(error)
    }
}

#[cfg(feature = "database-errors")]
mod database {
    use sqlx::Error as SqlxError;

    use super::AppError;

    /// SQLite primary result codes (and extended variants) for lock contention
    const SQLITE_BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517"];

    impl From<SqlxError> for AppError {
        fn from(error: SqlxError) -> Self {
            match &error {
                SqlxError::Database(db) if db.is_unique_violation() => {
                    let message = format!("Unique constraint violated: {}", db.message());
                    Self::conflict(message).with_source(error)
                }
                SqlxError::Database(db) if db.is_foreign_key_violation() => {
                    let message = format!("Referenced record does not exist: {}", db.message());
                    Self::invalid_input(message).with_source(error)
                }
                SqlxError::Database(db)
                    if db
                        .code()
                        .is_some_and(|code| SQLITE_BUSY_CODES.contains(&code.as_ref()))
                        || db.message().contains("database is locked") =>
                {
                    let message = format!("Database busy: {}", db.message());
                    Self::database_busy(message).with_source(error)
                }
                SqlxError::PoolTimedOut => {
                    Self::database_busy("Timed out acquiring a database connection")
                        .with_source(error)
                }
                _ => Self::database(format!("Database operation failed: {error}"))
                    .with_source(error),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceConflict.http_status(), 409);
        assert_eq!(ErrorCode::ServiceUnavailable.http_status(), 503);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_only_busy_is_retryable() {
        assert!(AppError::database_busy("locked").is_retryable());
        assert!(!AppError::database("broken").is_retryable());
        assert!(!AppError::conflict("dup").is_retryable());
    }

    #[test]
    fn test_cover_hides_database_detail() {
        let covered = AppError::database("no such table: recipes").cover("search");
        assert_eq!(covered.code, ErrorCode::ServiceUnavailable);
        assert_eq!(covered.message, SERVICE_UNAVAILABLE_MESSAGE);
        assert!(!covered.to_string().contains("recipes"));
    }

    #[test]
    fn test_cover_passes_caller_errors_through() {
        let covered = AppError::invalid_input("recipe name is blank").cover("ingest");
        assert_eq!(covered.code, ErrorCode::InvalidInput);
        assert_eq!(covered.message, "recipe name is blank");

        let covered = AppError::conflict("dup").cover("ingest");
        assert_eq!(covered.code, ErrorCode::ResourceConflict);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ResourceConflict).unwrap();
        assert_eq!(json, "\"RESOURCE_CONFLICT\"");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code, ErrorCode::SerializationError);
    }
}
