// ABOUTME: Ingest command for pantry-cli
// ABOUTME: Reads JSON recipe files as sources and writes them as one batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use pantry::{
    config::environment::IngestionConfig,
    database::Database,
    errors::AppResult,
    ingestion::{IngestionPipeline, JsonFileSource, RecipeSource},
};
use tracing::info;

use crate::helpers::display::display_ingest_report;

/// Ingest every file as one batch
pub async fn run(
    database: &Database,
    config: IngestionConfig,
    files: Vec<PathBuf>,
) -> AppResult<()> {
    info!("Ingesting {} source file(s)", files.len());
    let sources: Vec<Box<dyn RecipeSource>> = files
        .into_iter()
        .map(|path| Box::new(JsonFileSource::new(path)) as Box<dyn RecipeSource>)
        .collect();

    let pipeline = IngestionPipeline::new(database.pool().clone(), config);
    let report = pipeline.ingest_from_sources(&sources).await?;
    display_ingest_report(&report);
    Ok(())
}
