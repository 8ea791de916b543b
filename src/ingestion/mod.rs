// ABOUTME: Recipe ingestion pipeline turning raw scraped records into linked rows
// ABOUTME: Exposes the batch pipeline and the recipe source abstraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Ingestion
//!
//! A batch of [`RawRecipe`](crate::models::RawRecipe) records is written in
//! one transaction:
//!
//! 1. validate and drop in-batch duplicate names
//! 2. split names into new and already stored
//! 3. insert new recipes
//! 4. upsert every ingredient (and declared alternative) they reference
//! 5. link recipes to ingredients and record alternatives
//!
//! Any failure rolls the whole batch back.

/// Transactional batch pipeline
pub mod pipeline;
/// Recipe producers
pub mod source;

pub use pipeline::IngestionPipeline;
pub use source::{collect_from_sources, JsonFileSource, RecipeSource};
