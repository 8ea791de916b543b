// ABOUTME: Criterion benchmarks for ingredient search over an in-memory SQLite store
// ABOUTME: Measures exact, closest and list-all paths plus deep pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the matching engine.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pantry::config::database::DatabaseConfig;
use pantry::config::environment::{IngestionConfig, MatchingConfig};
use pantry::database::Database;
use pantry::ingestion::IngestionPipeline;
use pantry::matching::MatchingEngine;
use pantry::models::{RawIngredient, RawRecipe};
use tokio::runtime::Runtime;

const NO_TERMS: &[&str] = &[];
const CLOSEST_TERMS: &[&str] = &["rice", "garlic", "lemon", "saffron"];
const SALT: &[&str] = &["salt"];

const PANTRY: &[&str] = &[
    "rice", "beans", "onion", "garlic", "tomato", "egg", "flour", "milk", "butter", "salt",
    "pepper", "chicken", "carrot", "potato", "cheese", "lemon",
];

/// Deterministic catalogue of recipes with three to six pantry ingredients
fn catalogue(size: usize) -> Vec<RawRecipe> {
    (0..size)
        .map(|i| {
            let count = 3 + i % 4;
            let ingredients = (0..count)
                .map(|k| RawIngredient::new(PANTRY[(i * 7 + k * 3) % PANTRY.len()], "1"))
                .collect();
            RawRecipe::new(format!("Recipe {i:05}"), ingredients)
        })
        .collect()
}

async fn seeded_engine(size: usize) -> MatchingEngine {
    let database = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
    database.migrate().await.unwrap();
    IngestionPipeline::new(database.pool().clone(), IngestionConfig::default())
        .ingest(&catalogue(size))
        .await
        .unwrap();
    MatchingEngine::new(database.pool().clone(), MatchingConfig::default())
}

fn bench_search_paths(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("matching_paths");

    for size in [500_usize, 5_000] {
        let engine = rt.block_on(seeded_engine(size));

        group.bench_with_input(BenchmarkId::new("list_all", size), &size, |b, _| {
            b.iter(|| rt.block_on(engine.search_ingredients(black_box(NO_TERMS), 1, 10, None)));
        });
        group.bench_with_input(BenchmarkId::new("closest", size), &size, |b, _| {
            b.iter(|| rt.block_on(engine.search_ingredients(black_box(CLOSEST_TERMS), 1, 10, None)));
        });
        group.bench_with_input(BenchmarkId::new("exact", size), &size, |b, _| {
            let first = &catalogue(1)[0];
            let names: Vec<&str> = first.ingredients.iter().map(|i| i.name.as_str()).collect();
            b.iter(|| rt.block_on(engine.search_ingredients(black_box(names.as_slice()), 1, 10, None)));
        });
    }

    group.finish();
}

fn bench_deep_pages(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("matching_pagination");
    let engine = rt.block_on(seeded_engine(5_000));

    for page in [1_i64, 50, 250] {
        group.bench_with_input(BenchmarkId::new("closest_page", page), &page, |b, &page| {
            b.iter(|| rt.block_on(engine.search_ingredients(black_box(SALT), page, 20, None)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search_paths, bench_deep_pages);
criterion_main!(benches);
