// ABOUTME: Database management for the shared recipe and ingredient schema
// ABOUTME: Opens the SQLite pool, runs idempotent migrations, and exposes storage helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! One `SQLite` schema is shared by the ingestion pipeline (the only writer of
//! recipes, ingredients and links) and the matching engine (read-only).

/// Multi-row parameterized inserts and chunked `IN (...)` lookups
pub mod bulk;
/// Viewer likes
pub mod likes;
/// Row to model conversion
pub mod mappers;
/// RAII transaction guard and retry with backoff
pub mod transactions;

pub use likes::LikesRepository;
pub use transactions::{retry_transaction, SqliteTransactionGuard, TransactionGuard};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::database::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database described by `config`
    ///
    /// File databases are created if missing and use WAL journaling. In-memory
    /// databases are pinned to a single connection that is never recycled,
    /// because every `SQLite` memory connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let base = match &config.url {
            DatabaseUrl::Memory => SqliteConnectOptions::new().in_memory(true),
            DatabaseUrl::SQLite { path } => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
        };
        let options = base
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout());

        let pool_options = if config.url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to open database {}: {e}", config.url))
            })?;

        info!(database = %config.url, "Database pool opened");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create all tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_recipes().await?;
        self.migrate_ingredients().await?;
        self.migrate_likes().await?;
        debug!("Database schema up to date");
        Ok(())
    }

    async fn run_schema(&self, statement: &str, what: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create {what}: {e}")))?;
        Ok(())
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.run_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE COLLATE NOCASE,
                description TEXT,
                cooking_time TEXT,
                instructions TEXT NOT NULL DEFAULT '[]',
                img_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "recipes table",
        )
        .await
    }

    async fn migrate_ingredients(&self) -> AppResult<()> {
        self.run_schema(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE COLLATE NOCASE,
                created_at TEXT NOT NULL
            )
            ",
            "ingredients table",
        )
        .await?;

        self.run_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                quantity TEXT NOT NULL DEFAULT '',
                UNIQUE(recipe_id, ingredient_id)
            )
            ",
            "recipe_ingredients table",
        )
        .await?;

        self.run_schema(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
            "recipe_ingredients index",
        )
        .await?;

        self.run_schema(
            r"
            CREATE TABLE IF NOT EXISTS ingredient_alternatives (
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                alternative_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                UNIQUE(ingredient_id, alternative_id)
            )
            ",
            "ingredient_alternatives table",
        )
        .await
    }

    async fn migrate_likes(&self) -> AppResult<()> {
        self.run_schema(
            r"
            CREATE TABLE IF NOT EXISTS likes (
                user_id TEXT NOT NULL,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            ",
            "likes table",
        )
        .await
    }
}
