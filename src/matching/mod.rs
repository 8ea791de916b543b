// ABOUTME: Ingredient matching and ranking engine over stored recipes
// ABOUTME: Exposes the engine, search query input and pluggable selection strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Matching
//!
//! Search runs one path per request:
//!
//! - empty query: every recipe, by name
//! - exact: recipes whose ingredient set equals the query set, by name
//! - closest: recipes sharing at least one query ingredient, by overlap
//!   descending then name
//!
//! Exact wins whenever it selects anything. The page is then hydrated
//! with each recipe's full ingredient list and, for a known viewer, the
//! `liked` flag.

/// Search engine
pub mod engine;
/// Page hydration
pub mod hydrate;
/// Search input
pub mod query;
/// Selection strategies
pub mod strategy;

pub use engine::MatchingEngine;
pub use query::SearchQuery;
pub use strategy::{ClosestMatch, ExactMatch, ListAll, MatchStrategy, RankedRecipe};
