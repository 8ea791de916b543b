// ABOUTME: Like command for pantry-cli
// ABOUTME: Sets or clears a viewer's like on a list of recipe ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pantry::{
    database::{Database, LikesRepository},
    errors::{AppError, AppResult},
};
use uuid::Uuid;

/// Apply the like status and report how many rows changed
pub async fn run(
    database: &Database,
    viewer: &str,
    recipe_ids: &[String],
    liked: bool,
) -> AppResult<()> {
    let ids = recipe_ids
        .iter()
        .map(|raw| {
            Uuid::parse_str(raw.trim())
                .map_err(|e| AppError::invalid_input(format!("Invalid recipe id '{raw}': {e}")))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let changed = LikesRepository::new(database.pool().clone())
        .set_like_status(viewer, &ids, liked)
        .await?;
    let verb = if liked { "Liked" } else { "Unliked" };
    println!("{verb} {changed} recipe(s) for {viewer}");
    Ok(())
}
