// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, migrated databases and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `pantry`

use std::env;
use std::path::Path;
use std::sync::Once;

use pantry::config::database::DatabaseConfig;
use pantry::config::environment::{IngestionConfig, MatchingConfig};
use pantry::database::Database;
use pantry::ingestion::IngestionPipeline;
use pantry::matching::MatchingEngine;
use pantry::models::{RawIngredient, RawRecipe};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Migrated in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    let database = Database::new(&DatabaseConfig::in_memory())
        .await
        .expect("open in-memory database");
    database.migrate().await.expect("migrate schema");
    database
}

/// Migrated file database at `path`, usable from several connections
pub async fn create_file_database(path: &Path) -> Database {
    init_test_logging();
    let database = Database::new(&DatabaseConfig::for_path(path))
        .await
        .expect("open file database");
    database.migrate().await.expect("migrate schema");
    database
}

pub fn pipeline(database: &Database) -> IngestionPipeline {
    IngestionPipeline::new(database.pool().clone(), IngestionConfig::default())
}

pub fn engine(database: &Database) -> MatchingEngine {
    MatchingEngine::new(database.pool().clone(), MatchingConfig::default())
}

/// Recipe with bare ingredient names and a quantity of "1"
pub fn recipe(name: &str, ingredients: &[&str]) -> RawRecipe {
    RawRecipe::new(
        name,
        ingredients
            .iter()
            .map(|ingredient| RawIngredient::new(*ingredient, "1"))
            .collect(),
    )
}

/// Count rows in `table`
pub async fn count_rows(database: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(database.pool())
        .await
        .expect("count rows")
}
