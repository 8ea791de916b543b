// ABOUTME: Main library entry point for the Pantry recipe service
// ABOUTME: Provides recipe ingestion and ingredient-based search over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pantry
//!
//! Stores scraped recipes and finds the ones a user can cook from the
//! ingredients at hand.
//!
//! ## Architecture
//!
//! - **Ingestion**: validated, deduplicated, all-or-nothing batch writes
//! - **Matching**: exact and closest ingredient matching with pagination
//! - **Database**: `SQLite` schema, bulk insert helpers and transactions
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pantry::config::environment::ServerConfig;
//! use pantry::database::Database;
//! use pantry::errors::AppResult;
//! use pantry::matching::MatchingEngine;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     database.migrate().await?;
//!
//!     let engine = MatchingEngine::new(database.pool().clone(), config.matching);
//!     let page = engine.search_ingredients(&["rice", "beans"], 1, 10, None).await?;
//!     println!("{} recipes matched", page.pagination.total_items);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage, schema and transaction helpers
pub mod database;

/// Unified error handling
pub mod errors;

/// Recipe ingestion pipeline
pub mod ingestion;

/// Structured logging
pub mod logging;

/// Ingredient matching engine
pub mod matching;

/// Recipe, ingredient and search result models
pub mod models;

/// Page request normalization and metadata
pub mod pagination;
