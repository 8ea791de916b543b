// ABOUTME: Integration tests for recipe sources feeding the ingestion pipeline
// ABOUTME: Validates JSON file parsing, failed-source skipping and combined batch ingestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use pantry::errors::{AppError, AppResult, ErrorCode};
use pantry::ingestion::{collect_from_sources, JsonFileSource, RecipeSource};
use pantry::models::RawRecipe;
use tempfile::TempDir;

use common::{count_rows, create_test_database, pipeline};

const SCRAPED_JSON: &str = r#"[
    {
        "name": "Veggie Curry",
        "description": "Weeknight curry",
        "cooking_time": "40 min",
        "instructions": ["Fry onions", "Add everything else"],
        "img_url": "https://img.example/curry.jpg",
        "ingredients": [
            {"name": "Chickpeas", "quantity": "1 can"},
            {"name": "onion", "quantity": "1", "alternative": ["shallot"]}
        ]
    },
    {
        "name": "Plain Rice",
        "ingredients": [{"name": "rice"}]
    }
]"#;

struct FailingSource;

#[async_trait]
impl RecipeSource for FailingSource {
    fn name(&self) -> &str {
        "offline-site"
    }

    async fn fetch(&self) -> AppResult<Vec<RawRecipe>> {
        Err(AppError::unavailable())
    }
}

fn write_file(dir: &Path, name: &str, content: &str) -> JsonFileSource {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    JsonFileSource::new(path)
}

#[tokio::test]
async fn test_json_file_source_parses_scraped_records() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "scraped.json", SCRAPED_JSON);

    let recipes = source.fetch().await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].instructions.len(), 2);
    assert_eq!(recipes[0].ingredients[1].alternatives, vec!["shallot"]);
    assert_eq!(recipes[1].ingredients[0].quantity, "");
    assert!(recipes[1].description.is_none());
}

#[tokio::test]
async fn test_json_file_source_errors() {
    let dir = TempDir::new().unwrap();

    let missing = JsonFileSource::new(dir.path().join("missing.json"));
    assert_eq!(missing.fetch().await.unwrap_err().code, ErrorCode::InvalidInput);

    let malformed = write_file(dir.path(), "bad.json", "{\"name\": 1}");
    assert_eq!(
        malformed.fetch().await.unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[tokio::test]
async fn test_failed_source_is_skipped() {
    let dir = TempDir::new().unwrap();
    let sources: Vec<Box<dyn RecipeSource>> = vec![
        Box::new(FailingSource),
        Box::new(write_file(dir.path(), "scraped.json", SCRAPED_JSON)),
    ];

    let batch = collect_from_sources(&sources).await;

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].name, "Veggie Curry");
}

#[tokio::test]
async fn test_ingest_from_sources_writes_one_batch() {
    let database = create_test_database().await;
    let dir = TempDir::new().unwrap();
    let sources: Vec<Box<dyn RecipeSource>> = vec![
        Box::new(write_file(dir.path(), "a.json", SCRAPED_JSON)),
        Box::new(write_file(
            dir.path(),
            "b.json",
            r#"[{"name": "plain rice", "ingredients": [{"name": "rice", "quantity": "2 cups"}]}]"#,
        )),
        Box::new(FailingSource),
    ];

    let report = pipeline(&database).ingest_from_sources(&sources).await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.get("Plain Rice"), Some(&true));
    assert_eq!(count_rows(&database, "recipes").await, 2);
    assert_eq!(count_rows(&database, "ingredient_alternatives").await, 1);
}
