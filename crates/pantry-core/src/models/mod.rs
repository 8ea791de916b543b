// ABOUTME: Core data models for recipe ingestion and ingredient matching
// ABOUTME: Re-exports raw ingestion records, persisted recipes and search result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `RawRecipe`: an unvalidated record produced by a scraper or import file
//! - `Recipe`, `Ingredient`: persisted rows
//! - `RecipeWithIngredients`, `SearchPage`: hydrated search results

mod recipe;
mod search;

pub use recipe::{
    ingredient_key, recipe_key, IngestReport, Ingredient, IngredientQuantity, RawIngredient,
    RawRecipe, Recipe,
};
pub use search::{MatchKind, RecipeWithIngredients, SearchPage};
