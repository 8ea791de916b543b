// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL and connection pool settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::environment::env_parse_or;
use crate::constants::database::{
    DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DATABASE_URL,
    DEFAULT_MAX_CONNECTIONS,
};
use crate::errors::{AppError, AppResult};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or names an engine other than `SQLite`
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path_str = rest.strip_prefix("//").unwrap_or(rest);
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config(format!(
                "Unsupported database URL '{s}': only sqlite: URLs are supported"
            )))
        } else {
            // Bare path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(DEFAULT_DATABASE_URL.trim_start_matches("sqlite:")),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Maximum pooled connections (forced to 1 for in-memory databases)
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Milliseconds `SQLite` waits on a lock before reporting busy
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            ..Self::default()
        }
    }

    /// Configuration for a database file
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            url: DatabaseUrl::SQLite { path: path.into() },
            ..Self::default()
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unsupported or a numeric setting
    /// does not parse
    pub fn from_env() -> AppResult<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(raw) => DatabaseUrl::parse_url(&raw)?,
            Err(_) => DatabaseUrl::default(),
        };
        let max_connections: u32 =
            env_parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(AppError::config(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs: env_parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            busy_timeout_ms: env_parse_or("DATABASE_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?,
        })
    }

    /// Pool acquire timeout
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// `SQLite` busy timeout
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
