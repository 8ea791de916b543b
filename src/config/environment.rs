// ABOUTME: Environment configuration management for ingestion and search settings
// ABOUTME: Loads ServerConfig from environment variables with typed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::database::DatabaseConfig;
use crate::constants::{ingestion, matching};
use crate::errors::{AppError, AppResult};

/// Ingestion pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Retries after transient lock contention
    pub max_retries: u32,
    /// Whole-batch deadline in seconds
    pub timeout_secs: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_retries: ingestion::DEFAULT_MAX_RETRIES,
            timeout_secs: ingestion::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl IngestionConfig {
    /// Load from `INGEST_MAX_RETRIES` and `INGEST_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not parse
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            max_retries: env_parse_or("INGEST_MAX_RETRIES", ingestion::DEFAULT_MAX_RETRIES)?,
            timeout_secs: env_parse_or("INGEST_TIMEOUT_SECS", ingestion::DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Batch deadline
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Matching engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Let declared ingredient alternatives satisfy closest-match terms
    pub expand_alternatives: bool,
    /// Search deadline in seconds
    pub timeout_secs: u64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            expand_alternatives: false,
            timeout_secs: matching::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MatchingConfig {
    /// Load from `SEARCH_EXPAND_ALTERNATIVES` and `SEARCH_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not parse
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            expand_alternatives: env_parse_or("SEARCH_EXPAND_ALTERNATIVES", false)?,
            timeout_secs: env_parse_or("SEARCH_TIMEOUT_SECS", matching::DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Search deadline; zero disables it
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Storage settings
    pub database: DatabaseConfig,
    /// Ingestion settings
    pub ingestion: IngestionConfig,
    /// Search settings
    pub matching: MatchingConfig,
}

impl ServerConfig {
    /// Load the whole configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but invalid
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            database: DatabaseConfig::from_env()?,
            ingestion: IngestionConfig::from_env()?,
            matching: MatchingConfig::from_env()?,
        };
        info!(
            database = %config.database.url,
            max_connections = config.database.max_connections,
            ingest_max_retries = config.ingestion.max_retries,
            expand_alternatives = config.matching.expand_alternatives,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Parse `key` from the environment, falling back to `default` when unset
///
/// # Errors
///
/// Returns a config error if the variable is set but does not parse
pub fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        _ => Ok(default),
    }
}
