// ABOUTME: Criterion benchmarks for batch recipe ingestion into SQLite
// ABOUTME: Measures fresh inserts at several batch sizes and fully duplicate re-ingestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the ingestion pipeline.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::atomic::{AtomicUsize, Ordering};

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use pantry::config::database::DatabaseConfig;
use pantry::config::environment::IngestionConfig;
use pantry::database::Database;
use pantry::ingestion::IngestionPipeline;
use pantry::models::{RawIngredient, RawRecipe};
use tokio::runtime::Runtime;

/// Counter keeping recipe names unique across iterations
static BATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn fresh_batch(size: usize) -> Vec<RawRecipe> {
    let batch = BATCH_COUNTER.fetch_add(1, Ordering::SeqCst);
    (0..size)
        .map(|i| {
            RawRecipe::new(
                format!("Batch {batch} Recipe {i}"),
                vec![
                    RawIngredient::new("salt", "a pinch"),
                    RawIngredient::new(format!("ingredient {}", i % 50), "100g"),
                    RawIngredient::new(format!("garnish {}", i % 7), "to taste"),
                ],
            )
        })
        .collect()
}

async fn create_pipeline() -> IngestionPipeline {
    let database = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
    database.migrate().await.unwrap();
    IngestionPipeline::new(database.pool().clone(), IngestionConfig::default())
}

fn bench_fresh_batches(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("ingestion_fresh");
    let pipeline = rt.block_on(create_pipeline());

    for size in [10_usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || fresh_batch(size),
                |batch| rt.block_on(pipeline.ingest(black_box(&batch))),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_duplicate_batch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("ingestion_duplicates");
    let pipeline = rt.block_on(create_pipeline());
    let batch = fresh_batch(500);
    rt.block_on(pipeline.ingest(&batch)).unwrap();

    group.throughput(Throughput::Elements(500));
    group.bench_function("all_existing_500", |b| {
        b.iter(|| rt.block_on(pipeline.ingest(black_box(&batch))));
    });

    group.finish();
}

criterion_group!(benches, bench_fresh_batches, bench_duplicate_batch);
criterion_main!(benches);
