// ABOUTME: Multi-row parameterized INSERT builder and chunked IN-list lookups for SQLite
// ABOUTME: Splits large batches to stay under the bind-parameter limit; values are always bound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::constants::database::SQLITE_MAX_BIND_PARAMS;
use crate::errors::{AppError, AppResult};

/// Builder for one multi-row `INSERT` per chunk of rows
///
/// Table and column names are static; row values only ever go through
/// `push_bind`.
#[derive(Debug, Clone, Copy)]
pub struct BulkInsert {
    table: &'static str,
    columns: &'static [&'static str],
    conflict_target: Option<&'static str>,
}

impl BulkInsert {
    /// Plain insert; any constraint violation fails the statement
    #[must_use]
    pub const fn new(table: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            table,
            columns,
            conflict_target: None,
        }
    }

    /// Skip rows that collide on `target` (e.g. `"recipe_id, ingredient_id"`)
    #[must_use]
    pub const fn on_conflict_do_nothing(mut self, target: &'static str) -> Self {
        self.conflict_target = Some(target);
        self
    }

    /// Rows per statement
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        (SQLITE_MAX_BIND_PARAMS / self.columns.len().max(1)).max(1)
    }

    fn builder<'args>(&self) -> QueryBuilder<'args, Sqlite> {
        QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            self.table,
            self.columns.join(", ")
        ))
    }

    /// Insert every row, binding each with `bind_row`
    ///
    /// `bind_row` must push exactly one bind per column, in column order.
    /// Returns the number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; earlier chunks are only
    /// undone if the caller's transaction rolls back
    pub async fn execute<'args, R, F>(
        &self,
        conn: &mut SqliteConnection,
        rows: &[R],
        mut bind_row: F,
    ) -> AppResult<u64>
    where
        F: FnMut(&mut Separated<'_, 'args, Sqlite, &'static str>, &R),
    {
        let mut inserted = 0;
        for chunk in rows.chunks(self.chunk_size()) {
            let mut query = self.builder();
            query.push_values(chunk, |mut separated, row| bind_row(&mut separated, row));
            if let Some(target) = self.conflict_target {
                query.push(format!(" ON CONFLICT ({target}) DO NOTHING"));
            }
            let result = query
                .build()
                .execute(&mut *conn)
                .await
                .map_err(|e| AppError::from(e).in_context(self.table))?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}

/// Run `select_sql WHERE <column> IN (...)` over `values` in bind-limit sized chunks
///
/// `select_sql` must end right before the `IN` list, e.g.
/// `"SELECT id, name FROM ingredients WHERE name"`.
///
/// # Errors
///
/// Returns an error if any chunk query fails
pub async fn fetch_in(
    conn: &mut SqliteConnection,
    select_sql: &str,
    values: &[String],
) -> AppResult<Vec<SqliteRow>> {
    let mut rows = Vec::new();
    for chunk in values.chunks(SQLITE_MAX_BIND_PARAMS) {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(select_sql);
        query.push(" IN (");
        let mut separated = query.separated(", ");
        for value in chunk {
            separated.push_bind(value.as_str());
        }
        separated.push_unseparated(")");
        let mut fetched = query.build().fetch_all(&mut *conn).await?;
        rows.append(&mut fetched);
    }
    Ok(rows)
}
