// ABOUTME: Search query input for the matching engine
// ABOUTME: Canonicalizes ingredient terms and normalizes pagination parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::ingredient_key;
use crate::pagination::PageRequest;

/// Ingredient search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Ingredient names in any casing; blank entries are ignored
    pub ingredients: Vec<String>,
    /// Normalized page request
    pub page: PageRequest,
    /// Opaque viewer identity used only for the `liked` flag
    pub viewer_id: Option<String>,
}

impl SearchQuery {
    /// Build a query; invalid page values fall back to page 1 of 10
    #[must_use]
    pub fn new<I, S>(ingredients: I, page: Option<i64>, page_size: Option<i64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            page: PageRequest::new(page, page_size),
            viewer_id: None,
        }
    }

    /// Attach the viewer whose likes should be reported
    #[must_use]
    pub fn with_viewer(mut self, viewer_id: impl Into<String>) -> Self {
        self.viewer_id = Some(viewer_id.into());
        self
    }

    /// Distinct canonical ingredient names, sorted; empty means list everything
    #[must_use]
    pub fn terms(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|name| ingredient_key(name))
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
