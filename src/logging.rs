// ABOUTME: Logging configuration and structured logging setup for ingestion and search
// ABOUTME: Configures log levels, output format, and structured events for pipeline activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging built on `tracing-subscriber`

use std::env;
use std::io;

use tracing::{info, Level};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::errors::{AppError, AppResult};
use crate::models::MatchKind;

const DEFAULT_SERVICE_NAME: &str = "pantry";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for CLI output
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: DEFAULT_SERVICE_NAME.into(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.into()),
            environment,
        }
    }

    /// Build the filter: the configured level plus fixed noise reduction for `sqlx`
    fn env_filter(&self) -> EnvFilter {
        let directive = |raw: &str, fallback: Level| -> Directive {
            raw.parse().unwrap_or_else(|_| fallback.into())
        };
        EnvFilter::new(&self.level)
            .add_directive(directive("sqlx=warn", Level::WARN))
            .add_directive(directive("sqlx::query=warn", Level::WARN))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> AppResult<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let result = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init(),
        };
        result.map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

        info!(
            service.name = %self.service_name,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Pantry starting up"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> AppResult<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific structured events
pub struct AppLogger;

impl AppLogger {
    /// Log a committed ingestion batch
    pub fn log_ingest_batch(
        submitted: usize,
        inserted: usize,
        skipped: usize,
        ingredients_created: usize,
        duration_ms: u64,
    ) {
        info!(
            ingest.submitted = submitted,
            ingest.inserted = inserted,
            ingest.skipped = skipped,
            ingest.ingredients_created = ingredients_created,
            ingest.duration_ms = duration_ms,
            "Recipe batch ingested"
        );
    }

    /// Log a completed search
    pub fn log_search(
        terms: usize,
        matched_by: MatchKind,
        total_items: i64,
        returned: usize,
        duration_ms: u64,
    ) {
        info!(
            search.terms = terms,
            search.matched_by = %matched_by,
            search.total_items = total_items,
            search.returned = returned,
            search.duration_ms = duration_ms,
            "Recipe search completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.service_name, "pantry");
        assert!(!config.include_location);
    }

    #[test]
    fn test_env_filter_accepts_level() {
        let config = LoggingConfig {
            level: "debug".into(),
            ..LoggingConfig::default()
        };
        let filter = config.env_filter();
        assert!(filter.to_string().contains("debug"));
    }
}
