// ABOUTME: Transactional batch upsert of recipes, ingredients, links and alternatives
// ABOUTME: Deduplicates by case-insensitive name and reports inserted vs existing per recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeSet, HashMap, HashSet};
use std::iter;
use std::time::Instant;

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use super::source::{collect_from_sources, RecipeSource};
use crate::config::environment::IngestionConfig;
use crate::database::bulk::{fetch_in, BulkInsert};
use crate::database::mappers::row_to_ingredient;
use crate::database::{retry_transaction, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{ingredient_key, recipe_key, IngestReport, RawRecipe};

const RECIPE_INSERT: BulkInsert = BulkInsert::new(
    "recipes",
    &[
        "id",
        "name",
        "description",
        "cooking_time",
        "instructions",
        "img_url",
        "created_at",
        "updated_at",
    ],
);

const INGREDIENT_INSERT: BulkInsert =
    BulkInsert::new("ingredients", &["id", "name", "created_at"]).on_conflict_do_nothing("name");

const LINK_INSERT: BulkInsert = BulkInsert::new(
    "recipe_ingredients",
    &["recipe_id", "ingredient_id", "quantity"],
)
.on_conflict_do_nothing("recipe_id, ingredient_id");

const ALTERNATIVE_INSERT: BulkInsert = BulkInsert::new(
    "ingredient_alternatives",
    &["ingredient_id", "alternative_id"],
)
.on_conflict_do_nothing("ingredient_id, alternative_id");

/// Recipe row ready for binding
struct RecipeRow<'a> {
    id: Uuid,
    raw: &'a RawRecipe,
    instructions: String,
}

/// Counts from one committed batch
struct BatchOutcome {
    report: IngestReport,
    inserted: usize,
    ingredients_created: u64,
}

/// Batch ingestion pipeline; the only writer of recipes and ingredients
#[derive(Clone)]
pub struct IngestionPipeline {
    pool: SqlitePool,
    config: IngestionConfig,
}

impl IngestionPipeline {
    /// Create a pipeline over `pool`
    #[must_use]
    pub const fn new(pool: SqlitePool, config: IngestionConfig) -> Self {
        Self { pool, config }
    }

    /// Durably upsert a batch of raw recipes
    ///
    /// Returns, for each distinct submitted name (first spelling wins),
    /// `true` if the recipe was inserted and `false` if a recipe with that
    /// name already existed. The batch is all-or-nothing.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if a recipe or ingredient name is blank (nothing is written)
    /// - `ResourceConflict` if a concurrent batch inserted one of the new names first
    /// - `OperationTimedOut` if the configured deadline elapses
    /// - `ServiceUnavailable` for any storage failure
    pub async fn ingest(&self, batch: &[RawRecipe]) -> AppResult<IngestReport> {
        self.ingest_batch(batch)
            .await
            .map_err(|e| e.cover("ingestion"))
    }

    /// Fetch from every source and ingest the combined records as one batch
    ///
    /// A source that fails is logged and skipped; the remaining records are
    /// still ingested.
    ///
    /// # Errors
    ///
    /// Same as [`Self::ingest`]
    pub async fn ingest_from_sources(
        &self,
        sources: &[Box<dyn RecipeSource>],
    ) -> AppResult<IngestReport> {
        let batch = collect_from_sources(sources).await;
        self.ingest(&batch).await
    }

    async fn ingest_batch(&self, batch: &[RawRecipe]) -> AppResult<IngestReport> {
        let started = Instant::now();
        for recipe in batch {
            recipe.validate()?;
        }

        let unique = dedupe_by_name(batch);
        if unique.is_empty() {
            return Ok(IngestReport::new());
        }

        let outcome = timeout(
            self.config.timeout(),
            retry_transaction(|| self.ingest_once(&unique), self.config.max_retries),
        )
        .await
        .map_err(|_| AppError::timeout("recipe ingestion"))??;

        AppLogger::log_ingest_batch(
            batch.len(),
            outcome.inserted,
            outcome.report.len() - outcome.inserted,
            outcome.ingredients_created as usize,
            started.elapsed().as_millis() as u64,
        );
        Ok(outcome.report)
    }

    async fn ingest_once(&self, recipes: &[&RawRecipe]) -> AppResult<BatchOutcome> {
        let mut guard = TransactionGuard::new(self.pool.begin().await?);

        let existing = existing_recipe_keys(guard.executor()?, recipes).await?;
        let mut report = IngestReport::new();
        let mut new_rows = Vec::new();
        for &raw in recipes {
            let is_new = !existing.contains(&recipe_key(&raw.name));
            report.insert(raw.name.trim().to_owned(), is_new);
            if is_new {
                new_rows.push(RecipeRow {
                    id: Uuid::new_v4(),
                    raw,
                    instructions: serde_json::to_string(&raw.instructions)?,
                });
            }
        }

        if new_rows.is_empty() {
            guard.commit().await?;
            return Ok(BatchOutcome {
                report,
                inserted: 0,
                ingredients_created: 0,
            });
        }

        insert_recipes(guard.executor()?, &new_rows).await?;
        let (ingredient_ids, ingredients_created) =
            upsert_ingredients(guard.executor()?, &new_rows).await?;
        insert_links(guard.executor()?, &new_rows, &ingredient_ids).await?;
        insert_alternatives(guard.executor()?, &new_rows, &ingredient_ids).await?;

        guard.commit().await?;
        Ok(BatchOutcome {
            report,
            inserted: new_rows.len(),
            ingredients_created,
        })
    }
}

/// First occurrence of each case-insensitive name, in submission order
fn dedupe_by_name(batch: &[RawRecipe]) -> Vec<&RawRecipe> {
    let mut seen = HashSet::new();
    batch
        .iter()
        .filter(|recipe| seen.insert(recipe_key(&recipe.name)))
        .collect()
}

async fn existing_recipe_keys(
    conn: &mut SqliteConnection,
    recipes: &[&RawRecipe],
) -> AppResult<HashSet<String>> {
    let names: Vec<String> = recipes.iter().map(|r| r.name.trim().to_owned()).collect();
    let rows = fetch_in(conn, "SELECT name FROM recipes WHERE name", &names).await?;
    rows.iter()
        .map(|row| {
            row.try_get::<String, _>("name")
                .map(|name| recipe_key(&name))
                .map_err(AppError::from)
        })
        .collect()
}

async fn insert_recipes(conn: &mut SqliteConnection, rows: &[RecipeRow<'_>]) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    RECIPE_INSERT
        .execute(conn, rows, |values, row| {
            values
                .push_bind(row.id.to_string())
                .push_bind(row.raw.name.trim().to_owned())
                .push_bind(row.raw.description.clone())
                .push_bind(row.raw.cooking_time.clone())
                .push_bind(row.instructions.clone())
                .push_bind(row.raw.img_url.clone())
                .push_bind(now.clone())
                .push_bind(now.clone());
        })
        .await?;
    debug!(count = rows.len(), "Inserted recipes");
    Ok(())
}

/// Ensure every ingredient referenced by `rows` exists and return a canonical name to id map
async fn upsert_ingredients(
    conn: &mut SqliteConnection,
    rows: &[RecipeRow<'_>],
) -> AppResult<(HashMap<String, Uuid>, u64)> {
    let names: Vec<String> = rows
        .iter()
        .flat_map(|row| &row.raw.ingredients)
        .flat_map(|ingredient| {
            iter::once(&ingredient.name).chain(ingredient.alternatives.iter())
        })
        .map(|name| ingredient_key(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if names.is_empty() {
        return Ok((HashMap::new(), 0));
    }

    let mut ids = ingredient_ids(conn, &names).await?;
    let missing: Vec<(Uuid, &String)> = names
        .iter()
        .filter(|name| !ids.contains_key(*name))
        .map(|name| (Uuid::new_v4(), name))
        .collect();
    if missing.is_empty() {
        return Ok((ids, 0));
    }

    let now = Utc::now().to_rfc3339();
    let created = INGREDIENT_INSERT
        .execute(conn, &missing, |values, (id, name)| {
            values
                .push_bind(id.to_string())
                .push_bind((*name).clone())
                .push_bind(now.clone());
        })
        .await?;

    let missing_names: Vec<String> = missing.iter().map(|(_, name)| (*name).clone()).collect();
    ids.extend(ingredient_ids(conn, &missing_names).await?);
    debug!(created, referenced = names.len(), "Upserted ingredients");
    Ok((ids, created))
}

async fn ingredient_ids(
    conn: &mut SqliteConnection,
    names: &[String],
) -> AppResult<HashMap<String, Uuid>> {
    let rows = fetch_in(conn, "SELECT id, name FROM ingredients WHERE name", names).await?;
    rows.iter()
        .map(|row| -> AppResult<(String, Uuid)> {
            let ingredient = row_to_ingredient(row)?;
            Ok((ingredient_key(&ingredient.name), ingredient.id))
        })
        .collect()
}

fn lookup(ids: &HashMap<String, Uuid>, name: &str) -> AppResult<Uuid> {
    let key = ingredient_key(name);
    ids.get(&key)
        .copied()
        .ok_or_else(|| AppError::internal(format!("ingredient '{key}' missing after upsert")))
}

async fn insert_links(
    conn: &mut SqliteConnection,
    rows: &[RecipeRow<'_>],
    ids: &HashMap<String, Uuid>,
) -> AppResult<()> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for row in rows {
        for ingredient in &row.raw.ingredients {
            let ingredient_id = lookup(ids, &ingredient.name)?;
            if seen.insert((row.id, ingredient_id)) {
                links.push((row.id, ingredient_id, ingredient.quantity.trim()));
            }
        }
    }

    let inserted = LINK_INSERT
        .execute(conn, &links, |values, (recipe_id, ingredient_id, quantity)| {
            values
                .push_bind(recipe_id.to_string())
                .push_bind(ingredient_id.to_string())
                .push_bind((*quantity).to_owned());
        })
        .await?;
    debug!(inserted, "Linked recipe ingredients");
    Ok(())
}

async fn insert_alternatives(
    conn: &mut SqliteConnection,
    rows: &[RecipeRow<'_>],
    ids: &HashMap<String, Uuid>,
) -> AppResult<()> {
    let mut pairs = BTreeSet::new();
    for ingredient in rows.iter().flat_map(|row| &row.raw.ingredients) {
        let ingredient_id = lookup(ids, &ingredient.name)?;
        for alternative in &ingredient.alternatives {
            let alternative_id = lookup(ids, alternative)?;
            if alternative_id != ingredient_id {
                pairs.insert((ingredient_id, alternative_id));
            }
        }
    }
    if pairs.is_empty() {
        return Ok(());
    }

    let pairs: Vec<(Uuid, Uuid)> = pairs.into_iter().collect();
    ALTERNATIVE_INSERT
        .execute(conn, &pairs, |values, (ingredient_id, alternative_id)| {
            values
                .push_bind(ingredient_id.to_string())
                .push_bind(alternative_id.to_string());
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawIngredient;

    #[test]
    fn test_dedupe_keeps_first_spelling() {
        let batch = vec![
            RawRecipe::new("Tomato Soup", vec![RawIngredient::new("tomato", "3")]),
            RawRecipe::new(" tomato soup ", vec![]),
            RawRecipe::new("Salad", vec![]),
        ];
        let unique = dedupe_by_name(&batch);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Tomato Soup");
        assert_eq!(unique[0].ingredients.len(), 1);
        assert_eq!(unique[1].name, "Salad");
    }

    #[test]
    fn test_lookup_uses_canonical_name() {
        let id = Uuid::new_v4();
        let ids = HashMap::from([("rice".to_owned(), id)]);
        assert_eq!(lookup(&ids, " RICE ").ok(), Some(id));
        assert!(lookup(&ids, "beans").is_err());
    }
}
