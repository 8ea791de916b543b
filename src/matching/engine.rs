// ABOUTME: Matching engine running the list-all, exact and closest strategies in fixed order
// ABOUTME: Returns a hydrated, paginated SearchPage with metadata for the path actually used
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use sqlx::{SqliteConnection, SqlitePool};
use tokio::time::timeout;
use tracing::debug;

use super::hydrate::hydrate;
use super::query::SearchQuery;
use super::strategy::{ClosestMatch, ExactMatch, ListAll, MatchStrategy, RankedRecipe};
use crate::config::environment::MatchingConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{MatchKind, SearchPage};
use crate::pagination::{PageRequest, Pagination};

/// Read-only recipe search over the shared schema
pub struct MatchingEngine {
    pool: SqlitePool,
    config: MatchingConfig,
    list_all: ListAll,
    fallbacks: Vec<Box<dyn MatchStrategy>>,
}

impl MatchingEngine {
    /// Engine with exact match first and closest match as the fallback
    #[must_use]
    pub fn new(pool: SqlitePool, config: MatchingConfig) -> Self {
        let fallbacks: Vec<Box<dyn MatchStrategy>> = vec![
            Box::new(ExactMatch),
            Box::new(ClosestMatch::new(config.expand_alternatives)),
        ];
        Self {
            pool,
            config,
            list_all: ListAll,
            fallbacks,
        }
    }

    /// Convenience wrapper over [`Self::search`]
    ///
    /// Non-positive `page` / `page_size` fall back to 1 and 10.
    ///
    /// # Errors
    ///
    /// See [`Self::search`]
    pub async fn search_ingredients(
        &self,
        ingredient_names: &[&str],
        page: i64,
        page_size: i64,
        viewer_id: Option<&str>,
    ) -> AppResult<SearchPage> {
        let query = SearchQuery::new(
            ingredient_names.iter().copied(),
            Some(page),
            Some(page_size),
        );
        let query = match viewer_id {
            Some(viewer) => query.with_viewer(viewer),
            None => query,
        };
        self.search(&query).await
    }

    /// Ranked, paginated, hydrated recipes for `query`
    ///
    /// - no terms: every recipe by name
    /// - otherwise exact ingredient-set matches by name, if there are any
    /// - otherwise recipes sharing at least one ingredient, by overlap then name
    ///
    /// Zero matches is an empty page with `total_items = 0`.
    ///
    /// # Errors
    ///
    /// - `OperationTimedOut` if the configured deadline elapses
    /// - `ServiceUnavailable` for any storage failure
    pub async fn search(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        let result = match self.config.timeout() {
            Some(limit) => timeout(limit, self.run(query))
                .await
                .map_err(|_| AppError::timeout("recipe search"))
                .and_then(|inner| inner),
            None => self.run(query).await,
        };
        result.map_err(|e| e.cover("matching"))
    }

    async fn run(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        let started = Instant::now();
        let terms = query.terms();
        let mut conn = self.pool.acquire().await?;

        let (matched_by, total_items, ranked) = if terms.is_empty() {
            Self::select_with(&self.list_all, &mut conn, &terms, query.page)
                .await?
        } else {
            self.select_fallback(&mut conn, &terms, query.page).await?
        };

        let recipes = hydrate(&mut conn, ranked, query.viewer_id.as_deref()).await?;
        let pagination = Pagination::new(query.page, total_items);

        AppLogger::log_search(
            terms.len(),
            matched_by,
            total_items,
            recipes.len(),
            started.elapsed().as_millis() as u64,
        );
        Ok(SearchPage {
            recipes,
            pagination,
            matched_by,
        })
    }

    /// First fallback strategy with at least one candidate wins
    async fn select_fallback(
        &self,
        conn: &mut SqliteConnection,
        terms: &[String],
        page: PageRequest,
    ) -> AppResult<(MatchKind, i64, Vec<RankedRecipe>)> {
        for strategy in &self.fallbacks {
            let selected = Self::select_with(strategy.as_ref(), conn, terms, page).await?;
            if selected.1 > 0 {
                return Ok(selected);
            }
            debug!(strategy = %strategy.kind(), "No candidates, falling through");
        }
        Ok((MatchKind::Closest, 0, Vec::new()))
    }

    async fn select_with(
        strategy: &dyn MatchStrategy,
        conn: &mut SqliteConnection,
        terms: &[String],
        page: PageRequest,
    ) -> AppResult<(MatchKind, i64, Vec<RankedRecipe>)> {
        let total = strategy.count(conn, terms).await?;
        let ranked = if total > page.offset() {
            strategy.page(conn, terms, page).await?
        } else {
            Vec::new()
        };
        Ok((strategy.kind(), total, ranked))
    }
}
