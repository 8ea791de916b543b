// ABOUTME: Pantry CLI - command-line tool for recipe ingestion and ingredient search
// ABOUTME: Handles schema migration, batch ingestion, searches and like toggling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create the schema
//! pantry-cli migrate
//!
//! # Ingest one or more JSON files of scraped recipes
//! pantry-cli ingest scraped/allrecipes.json scraped/bbc.json
//!
//! # Search by ingredients, second page of five
//! pantry-cli search --ingredient rice --ingredient beans --page 2 --page-size 5
//!
//! # Like a recipe as a viewer, then undo it
//! pantry-cli like 3f0c... --viewer alice
//! pantry-cli like 3f0c... --viewer alice --unlike
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use pantry::{
    config::{
        database::{DatabaseConfig, DatabaseUrl},
        environment::ServerConfig,
    },
    database::Database,
    errors::AppResult,
    logging::{LogFormat, LoggingConfig},
};
use std::path::PathBuf;
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "pantry-cli",
    about = "Pantry recipe store CLI",
    long_about = "Command-line tool for ingesting scraped recipes and searching them by ingredient."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create tables and indexes if missing
    Migrate,

    /// Ingest recipes from JSON files (each an array of raw recipes)
    Ingest {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Search recipes by ingredient
    Search {
        /// Ingredient name (repeatable); none lists every recipe
        #[arg(long = "ingredient", short = 'i')]
        ingredients: Vec<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: i64,

        /// Recipes per page
        #[arg(long, default_value = "10")]
        page_size: i64,

        /// Viewer whose likes are reported
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Like or unlike recipes for a viewer
    Like {
        /// Recipe ids
        #[arg(required = true)]
        recipe_ids: Vec<String>,

        /// Viewer identity
        #[arg(long)]
        viewer: String,

        /// Remove the like instead of adding it
        #[arg(long)]
        unlike: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.into(),
        format: LogFormat::Compact,
        ..LoggingConfig::from_env()
    }
    .init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database = DatabaseConfig {
            url: DatabaseUrl::parse_url(url)?,
            ..config.database
        };
    }

    info!("Connecting to database: {}", config.database.url);
    let database = Database::new(&config.database).await?;
    database.migrate().await?;

    match cli.command {
        Command::Migrate => {
            println!("Schema is up to date at {}", config.database.url);
        }
        Command::Ingest { files } => {
            commands::ingest::run(&database, config.ingestion, files).await?;
        }
        Command::Search {
            ingredients,
            page,
            page_size,
            viewer,
        } => {
            commands::search::run(
                &database,
                config.matching,
                ingredients,
                page,
                page_size,
                viewer,
            )
            .await?;
        }
        Command::Like {
            recipe_ids,
            viewer,
            unlike,
        } => {
            commands::likes::run(&database, &viewer, &recipe_ids, !unlike).await?;
        }
    }

    Ok(())
}
