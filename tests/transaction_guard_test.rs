// ABOUTME: Integration tests for the TransactionGuard RAII wrapper over the recipe schema
// ABOUTME: Validates auto-rollback, commit semantics and retry classification of sqlx errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use pantry::database::{retry_transaction, Database, SqliteTransactionGuard};
use pantry::errors::{AppError, ErrorCode};
use uuid::Uuid;

use common::{count_rows, create_test_database};

const INSERT_INGREDIENT: &str = "INSERT INTO ingredients (id, name, created_at) VALUES (?, ?, ?)";

async fn insert_ingredient(
    conn: &mut sqlx::SqliteConnection,
    name: &str,
) -> Result<(), AppError> {
    sqlx::query(INSERT_INGREDIENT)
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .execute(conn)
        .await?;
    Ok(())
}

async fn ingredient_count(database: &Database) -> i64 {
    count_rows(database, "ingredients").await
}

#[tokio::test]
async fn test_transaction_guard_commit_persists_changes() {
    let database = create_test_database().await;

    let tx = database.pool().begin().await.expect("begin");
    let mut guard = SqliteTransactionGuard::new(tx);
    insert_ingredient(guard.executor().expect("executor"), "rice")
        .await
        .expect("insert");
    guard.commit().await.expect("Commit should succeed");

    assert_eq!(ingredient_count(&database).await, 1);
}

#[tokio::test]
async fn test_transaction_guard_drop_without_commit_rolls_back() {
    let database = create_test_database().await;

    {
        let tx = database.pool().begin().await.expect("begin");
        let mut guard = SqliteTransactionGuard::new(tx);
        insert_ingredient(guard.executor().expect("executor"), "beans")
            .await
            .expect("insert");
        assert!(!guard.is_committed());
    }

    assert_eq!(ingredient_count(&database).await, 0);
}

#[tokio::test]
async fn test_transaction_guard_explicit_rollback() {
    let database = create_test_database().await;

    let tx = database.pool().begin().await.expect("begin");
    let mut guard = SqliteTransactionGuard::new(tx);
    insert_ingredient(guard.executor().expect("executor"), "garlic")
        .await
        .expect("insert");
    guard.rollback().await.expect("Rollback should succeed");

    assert_eq!(ingredient_count(&database).await, 0);
}

#[tokio::test]
async fn test_transaction_guard_error_midway_rolls_back_everything() {
    let database = create_test_database().await;
    insert_ingredient(&mut database.pool().acquire().await.unwrap(), "existing")
        .await
        .unwrap();

    let result: Result<(), AppError> = async {
        let tx = database.pool().begin().await?;
        let mut guard = SqliteTransactionGuard::new(tx);
        insert_ingredient(guard.executor()?, "onion").await?;
        // Names are unique regardless of case
        insert_ingredient(guard.executor()?, "EXISTING").await?;
        guard.commit().await
    }
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceConflict);
    assert_eq!(ingredient_count(&database).await, 1);
}

#[tokio::test]
async fn test_retry_transaction_conflict_fails_immediately() {
    let database = create_test_database().await;
    insert_ingredient(&mut database.pool().acquire().await.unwrap(), "salt")
        .await
        .unwrap();

    let attempts = AtomicU32::new(0);
    let result = retry_transaction(
        || {
            attempts.fetch_add(1, Ordering::SeqCst);
            let pool = database.pool().clone();
            async move {
                let mut conn = pool.acquire().await?;
                insert_ingredient(&mut conn, "salt").await
            }
        },
        5,
    )
    .await;

    assert_eq!(result.unwrap_err().code, ErrorCode::ResourceConflict);
    assert_eq!(
        attempts.load(Ordering::SeqCst),
        1,
        "Constraint violations should not be retried"
    );
}

#[tokio::test]
async fn test_transaction_guard_with_retry_pattern() {
    let database = create_test_database().await;

    let inserted = retry_transaction(
        || {
            let pool = database.pool().clone();
            async move {
                let tx = pool.begin().await?;
                let mut guard = SqliteTransactionGuard::new(tx);
                insert_ingredient(guard.executor()?, "flour").await?;
                insert_ingredient(guard.executor()?, "sugar").await?;
                guard.commit().await?;
                Ok(2_i32)
            }
        },
        3,
    )
    .await
    .unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(ingredient_count(&database).await, 2);
}
