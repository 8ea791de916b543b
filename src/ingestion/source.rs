// ABOUTME: Recipe source abstraction for scrapers and import files feeding ingestion
// ABOUTME: Collects raw records from every source, skipping sources that fail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::fs;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::RawRecipe;

/// Producer of raw recipe records (a site crawler, an import file, ...)
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetch every record this source currently offers
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read
    async fn fetch(&self) -> AppResult<Vec<RawRecipe>>;
}

/// Reads a JSON array of raw recipes from a file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for JsonFileSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("json-file")
    }

    async fn fetch(&self) -> AppResult<Vec<RawRecipe>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::invalid_input(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::invalid_input(format!(
                "{} is not a JSON array of recipes: {e}",
                self.path.display()
            ))
        })
    }
}

/// Fetch from all sources concurrently and concatenate their records in source order
pub async fn collect_from_sources(sources: &[Box<dyn RecipeSource>]) -> Vec<RawRecipe> {
    let results = join_all(sources.iter().map(|source| source.fetch())).await;
    let mut batch = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(mut records) => {
                info!(source = source.name(), count = records.len(), "Fetched recipes");
                batch.append(&mut records);
            }
            Err(e) => warn!(source = source.name(), error = %e, "Recipe source failed, skipping"),
        }
    }
    batch
}
