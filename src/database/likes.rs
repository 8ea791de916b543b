// ABOUTME: Viewer like storage for recipes
// ABOUTME: Likes and unlikes recipe sets transactionally and resolves liked flags for search pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::bulk::BulkInsert;
use super::mappers::parse_uuid;
use super::transactions::TransactionGuard;
use crate::constants::database::SQLITE_MAX_BIND_PARAMS;
use crate::errors::{AppError, AppResult};

const LIKE_INSERT: BulkInsert = BulkInsert::new("likes", &["user_id", "recipe_id", "created_at"])
    .on_conflict_do_nothing("user_id, recipe_id");

/// Likes repository
pub struct LikesRepository {
    pool: SqlitePool,
}

impl LikesRepository {
    /// Create a new repository
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Like or unlike every recipe in `recipe_ids` for `viewer_id`
    ///
    /// Liking an already liked recipe and unliking a recipe that was never
    /// liked are both no-ops. Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `viewer_id` is blank or a recipe does not exist
    /// - a database error if the write fails
    pub async fn set_like_status(
        &self,
        viewer_id: &str,
        recipe_ids: &[Uuid],
        liked: bool,
    ) -> AppResult<u64> {
        if viewer_id.trim().is_empty() {
            return Err(AppError::invalid_input("viewer id must not be blank"));
        }
        if recipe_ids.is_empty() {
            return Ok(0);
        }

        let mut guard = TransactionGuard::new(self.pool.begin().await?);
        let changed = if liked {
            let now = Utc::now().to_rfc3339();
            LIKE_INSERT
                .execute(guard.executor()?, recipe_ids, |row, id| {
                    row.push_bind(viewer_id.to_owned())
                        .push_bind(id.to_string())
                        .push_bind(now.clone());
                })
                .await?
        } else {
            let mut removed = 0;
            for chunk in recipe_ids.chunks(SQLITE_MAX_BIND_PARAMS - 1) {
                let mut query: QueryBuilder<'_, Sqlite> =
                    QueryBuilder::new("DELETE FROM likes WHERE user_id = ");
                query.push_bind(viewer_id);
                query.push(" AND recipe_id IN (");
                let mut separated = query.separated(", ");
                for id in chunk {
                    separated.push_bind(id.to_string());
                }
                separated.push_unseparated(")");
                removed += query
                    .build()
                    .execute(guard.executor()?)
                    .await?
                    .rows_affected();
            }
            removed
        };
        guard.commit().await?;

        debug!(viewer_id, liked, changed, "Like status updated");
        Ok(changed)
    }
}

/// Recipe ids among `recipe_ids` that `viewer_id` has liked
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn liked_recipe_ids(
    conn: &mut SqliteConnection,
    viewer_id: &str,
    recipe_ids: &[Uuid],
) -> AppResult<HashSet<Uuid>> {
    let mut liked = HashSet::new();
    for chunk in recipe_ids.chunks(SQLITE_MAX_BIND_PARAMS - 1) {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT recipe_id FROM likes WHERE user_id = ");
        query.push_bind(viewer_id);
        query.push(" AND recipe_id IN (");
        let mut separated = query.separated(", ");
        for id in chunk {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");
        for row in query.build().fetch_all(&mut *conn).await? {
            liked.insert(parse_uuid(&row, "recipe_id")?);
        }
    }
    Ok(liked)
}
