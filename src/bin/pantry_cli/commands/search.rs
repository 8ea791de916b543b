// ABOUTME: Search command for pantry-cli
// ABOUTME: Runs an ingredient search and prints the page as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pantry::{
    config::environment::MatchingConfig,
    database::Database,
    errors::AppResult,
    matching::{MatchingEngine, SearchQuery},
};

use crate::helpers::display::display_search_page;

/// Search and print one page
pub async fn run(
    database: &Database,
    config: MatchingConfig,
    ingredients: Vec<String>,
    page: i64,
    page_size: i64,
    viewer: Option<String>,
) -> AppResult<()> {
    let query = SearchQuery::new(ingredients, Some(page), Some(page_size));
    let query = match viewer {
        Some(viewer) => query.with_viewer(viewer),
        None => query,
    };

    let engine = MatchingEngine::new(database.pool().clone(), config);
    let result = engine.search(&query).await?;
    display_search_page(&result)
}
