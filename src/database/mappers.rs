// ABOUTME: Row mapping helpers converting SQLite rows into recipe domain models
// ABOUTME: Parses TEXT-encoded UUIDs, RFC 3339 timestamps and JSON instruction lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, Recipe};

/// Columns expected by [`row_to_recipe`], qualified with the `r` alias
pub const RECIPE_COLUMNS: &str =
    "r.id, r.name, r.description, r.cooking_time, r.instructions, r.img_url, r.created_at, r.updated_at";

/// Parse a TEXT column holding a UUID
///
/// # Errors
///
/// Returns an error if the column is missing or not a valid UUID
pub fn parse_uuid(row: &SqliteRow, column: &str) -> AppResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {column}: {e}")))
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in column {column}: {e}")))
}

/// Convert a row selected with [`RECIPE_COLUMNS`] into a `Recipe`
///
/// # Errors
///
/// Returns an error if any column is missing or malformed
pub fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let instructions: String = row.try_get("instructions")?;
    Ok(Recipe {
        id: parse_uuid(row, "id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        cooking_time: row.try_get("cooking_time")?,
        instructions: serde_json::from_str(&instructions)?,
        img_url: row.try_get("img_url")?,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

/// Convert an `id, name` row from `ingredients` into an `Ingredient`
///
/// # Errors
///
/// Returns an error if either column is missing or the id is malformed
pub fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    Ok(Ingredient {
        id: parse_uuid(row, "id")?,
        name: row.try_get("name")?,
    })
}
