// ABOUTME: Attaches full ingredient lists and viewer likes to a page of selected recipes
// ABOUTME: Issues one batched ingredient query per page plus one likes query when a viewer is set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};

use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::strategy::RankedRecipe;
use crate::database::bulk::fetch_in;
use crate::database::likes::liked_recipe_ids;
use crate::database::mappers::parse_uuid;
use crate::errors::AppResult;
use crate::models::{IngredientQuantity, RecipeWithIngredients};

const PAGE_INGREDIENTS_SQL: &str = "SELECT ri.recipe_id AS recipe_id, i.name AS name, ri.quantity AS quantity \
     FROM recipe_ingredients ri JOIN ingredients i ON i.id = ri.ingredient_id \
     WHERE ri.recipe_id";

/// Hydrate `ranked` in place order; no recipe is returned with a partial ingredient list
///
/// # Errors
///
/// Returns an error if either batched query fails
pub async fn hydrate(
    conn: &mut SqliteConnection,
    ranked: Vec<RankedRecipe>,
    viewer_id: Option<&str>,
) -> AppResult<Vec<RecipeWithIngredients>> {
    if ranked.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = ranked.iter().map(|r| r.recipe.id).collect();
    let mut ingredients = page_ingredients(conn, &ids).await?;
    let liked = match viewer_id {
        Some(viewer) => liked_recipe_ids(conn, viewer, &ids).await?,
        None => HashSet::new(),
    };

    Ok(ranked
        .into_iter()
        .map(|ranked| {
            let id = ranked.recipe.id;
            RecipeWithIngredients {
                ingredients: ingredients.remove(&id).unwrap_or_default(),
                liked: liked.contains(&id),
                matched_ingredients: ranked.overlap,
                recipe: ranked.recipe,
            }
        })
        .collect())
}

async fn page_ingredients(
    conn: &mut SqliteConnection,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<IngredientQuantity>>> {
    let keys: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    let rows = fetch_in(conn, PAGE_INGREDIENTS_SQL, &keys).await?;

    let mut by_recipe: HashMap<Uuid, Vec<IngredientQuantity>> = HashMap::new();
    for row in &rows {
        by_recipe
            .entry(parse_uuid(row, "recipe_id")?)
            .or_default()
            .push(IngredientQuantity {
                name: row.try_get("name")?,
                quantity: row.try_get("quantity")?,
            });
    }
    for list in by_recipe.values_mut() {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(by_recipe)
}
