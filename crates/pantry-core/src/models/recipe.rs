// ABOUTME: Recipe and ingredient models plus the name canonicalization rules
// ABOUTME: Raw records are validated and deduplicated by case-insensitive names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Per-name ingestion outcome: `true` when inserted, `false` when it already existed
pub type IngestReport = BTreeMap<String, bool>;

/// Canonical ingredient name: trimmed and lowercased
#[must_use]
pub fn ingredient_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Recipe deduplication key
///
/// ASCII-only folding to agree with `SQLite`'s `NOCASE` collation on the
/// `recipes.name` unique index.
#[must_use]
pub fn recipe_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// An ingredient reference inside a raw recipe record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIngredient {
    /// Ingredient name in any casing
    pub name: String,
    /// Free-text quantity ("2 cups", "a pinch")
    #[serde(default)]
    pub quantity: String,
    /// Substitutes for this ingredient
    #[serde(default, alias = "alternative")]
    pub alternatives: Vec<String>,
}

impl RawIngredient {
    /// Ingredient without alternatives
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            alternatives: Vec::new(),
        }
    }

    /// Add declared substitutes
    #[must_use]
    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives = alternatives.into_iter().map(Into::into).collect();
        self
    }
}

/// A recipe record as produced by a scraper or import file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecipe {
    /// Recipe name; the deduplication key
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional free-text cooking time
    #[serde(default)]
    pub cooking_time: Option<String>,
    /// Ordered instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Optional image reference
    #[serde(default)]
    pub img_url: Option<String>,
    /// Ingredient references
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
}

impl RawRecipe {
    /// Minimal recipe with a name and ingredients
    pub fn new(name: impl Into<String>, ingredients: Vec<RawIngredient>) -> Self {
        Self {
            name: name.into(),
            description: None,
            cooking_time: None,
            instructions: Vec::new(),
            img_url: None,
            ingredients,
        }
    }

    /// Reject records that cannot be stored
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the recipe name, an ingredient name or an
    /// alternative name is blank.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("recipe name must not be blank"));
        }
        for ingredient in &self.ingredients {
            if ingredient.name.trim().is_empty() {
                return Err(AppError::invalid_input(format!(
                    "recipe '{}' has an ingredient with a blank name",
                    self.name.trim()
                )));
            }
            if ingredient.alternatives.iter().any(|a| a.trim().is_empty()) {
                return Err(AppError::invalid_input(format!(
                    "ingredient '{}' in recipe '{}' has a blank alternative",
                    ingredient.name.trim(),
                    self.name.trim()
                )));
            }
        }
        Ok(())
    }
}

/// A persisted recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque identifier
    pub id: Uuid,
    /// Display name, unique case-insensitively
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional free-text cooking time
    pub cooking_time: Option<String>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Optional image reference
    pub img_url: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// A persisted ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Opaque identifier
    pub id: Uuid,
    /// Canonical (lowercased) name
    pub name: String,
}

/// An ingredient as listed on a hydrated recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    /// Canonical ingredient name
    pub name: String,
    /// Free-text quantity
    pub quantity: String,
}
