// ABOUTME: Search result models returned by the matching engine
// ABOUTME: Hydrated recipes, the match path taken, and pagination metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::recipe::{IngredientQuantity, Recipe};
use crate::pagination::Pagination;

/// Which search path produced a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// No ingredient filter; every recipe by name
    All,
    /// Recipe ingredient set equals the query set
    Exact,
    /// Ranked by number of shared ingredients
    Closest,
}

impl MatchKind {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Exact => "exact",
            Self::Closest => "closest",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe with its complete ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeWithIngredients {
    /// Recipe row
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Every ingredient of the recipe, ordered by name
    pub ingredients: Vec<IngredientQuantity>,
    /// Whether the viewer liked this recipe; false without a viewer
    pub liked: bool,
    /// Distinct query ingredients present, for closest-match results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_ingredients: Option<i64>,
}

/// A ranked page of hydrated recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Recipes on this page, in rank order
    pub recipes: Vec<RecipeWithIngredients>,
    /// Metadata for the path actually used
    pub pagination: Pagination,
    /// Path that produced the page
    pub matched_by: MatchKind,
}
