// ABOUTME: Recipe selection strategies: list-all, exact ingredient-set match, closest overlap
// ABOUTME: Each strategy counts its candidates and fetches one ranked page with bound SQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::database::mappers::{row_to_recipe, RECIPE_COLUMNS};
use crate::errors::AppResult;
use crate::models::{MatchKind, Recipe};
use crate::pagination::PageRequest;

/// A recipe selected by a strategy, before hydration
#[derive(Debug, Clone)]
pub struct RankedRecipe {
    /// Recipe row
    pub recipe: Recipe,
    /// Distinct query terms present in the recipe (closest-match only)
    pub overlap: Option<i64>,
}

/// One way of selecting and ordering recipes for a set of canonical terms
#[async_trait]
pub trait MatchStrategy: Send + Sync {
    /// Path reported to callers
    fn kind(&self) -> MatchKind;

    /// Number of recipes this strategy selects
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    async fn count(&self, conn: &mut SqliteConnection, terms: &[String]) -> AppResult<i64>;

    /// One page of selected recipes in rank order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    async fn page(
        &self,
        conn: &mut SqliteConnection,
        terms: &[String],
        page: PageRequest,
    ) -> AppResult<Vec<RankedRecipe>>;
}

fn push_page(query: &mut QueryBuilder<'_, Sqlite>, page: PageRequest) {
    query.push(" LIMIT ");
    query.push_bind(page.limit());
    query.push(" OFFSET ");
    query.push_bind(page.offset());
}

/// Every recipe ordered by name; used when the query has no terms
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAll;

#[async_trait]
impl MatchStrategy for ListAll {
    fn kind(&self) -> MatchKind {
        MatchKind::All
    }

    async fn count(&self, conn: &mut SqliteConnection, _terms: &[String]) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recipes")
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.try_get("total")?)
    }

    async fn page(
        &self,
        conn: &mut SqliteConnection,
        _terms: &[String],
        page: PageRequest,
    ) -> AppResult<Vec<RankedRecipe>> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r ORDER BY r.name"));
        push_page(&mut query, page);
        query
            .build()
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(|row| -> AppResult<RankedRecipe> {
                Ok(RankedRecipe {
                    recipe: row_to_recipe(row)?,
                    overlap: None,
                })
            })
            .collect()
    }
}

/// Recipes whose ingredient set equals the query set (same size, full containment)
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl ExactMatch {
    /// `GROUP BY ... HAVING` selecting recipe ids whose ingredients are exactly `terms`
    fn push_exact_ids<'args>(query: &mut QueryBuilder<'args, Sqlite>, terms: &'args [String]) {
        query.push(
            " FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             GROUP BY ri.recipe_id \
             HAVING COUNT(*) = ",
        );
        query.push_bind(terms.len() as i64);
        query.push(" AND SUM(CASE WHEN i.name IN (");
        let mut separated = query.separated(", ");
        for term in terms {
            separated.push_bind(term.as_str());
        }
        separated.push_unseparated(") THEN 1 ELSE 0 END) = ");
        query.push_bind(terms.len() as i64);
    }
}

#[async_trait]
impl MatchStrategy for ExactMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Exact
    }

    async fn count(&self, conn: &mut SqliteConnection, terms: &[String]) -> AppResult<i64> {
        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM (SELECT ri.recipe_id");
        Self::push_exact_ids(&mut query, terms);
        query.push(")");
        let row = query.build().fetch_one(&mut *conn).await?;
        Ok(row.try_get("total")?)
    }

    async fn page(
        &self,
        conn: &mut SqliteConnection,
        terms: &[String],
        page: PageRequest,
    ) -> AppResult<Vec<RankedRecipe>> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id IN (SELECT ri.recipe_id"
        ));
        Self::push_exact_ids(&mut query, terms);
        query.push(") ORDER BY r.name");
        push_page(&mut query, page);
        query
            .build()
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(|row| -> AppResult<RankedRecipe> {
                Ok(RankedRecipe {
                    recipe: row_to_recipe(row)?,
                    overlap: None,
                })
            })
            .collect()
    }
}

/// Recipes sharing at least one ingredient with the query, ranked by overlap then name
///
/// With `expand_alternatives`, a recipe ingredient declared as an
/// alternative of a query ingredient covers that query ingredient. Each
/// query term still counts at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestMatch {
    expand_alternatives: bool,
}

impl ClosestMatch {
    /// Closest-match strategy
    #[must_use]
    pub const fn new(expand_alternatives: bool) -> Self {
        Self {
            expand_alternatives,
        }
    }

    /// `WITH ... matches(recipe_id, overlap)` common table expressions
    fn push_matches_cte<'args>(
        &self,
        query: &mut QueryBuilder<'args, Sqlite>,
        terms: &'args [String],
    ) {
        query.push("WITH direct(term) AS (VALUES ");
        for (index, term) in terms.iter().enumerate() {
            if index > 0 {
                query.push(", ");
            }
            query.push("(");
            query.push_bind(term.as_str());
            query.push(")");
        }
        query.push("), query_terms(term, name) AS (SELECT term, term FROM direct");
        if self.expand_alternatives {
            query.push(
                " UNION SELECT d.term, alt.name FROM direct d \
                 JOIN ingredients base ON base.name = d.term \
                 JOIN ingredient_alternatives ia ON ia.ingredient_id = base.id \
                 JOIN ingredients alt ON alt.id = ia.alternative_id",
            );
        }
        query.push(
            "), matches AS (\
             SELECT ri.recipe_id AS recipe_id, COUNT(DISTINCT qt.term) AS overlap \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             JOIN query_terms qt ON qt.name = i.name \
             GROUP BY ri.recipe_id) ",
        );
    }
}

#[async_trait]
impl MatchStrategy for ClosestMatch {
    fn kind(&self) -> MatchKind {
        MatchKind::Closest
    }

    async fn count(&self, conn: &mut SqliteConnection, terms: &[String]) -> AppResult<i64> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
        self.push_matches_cte(&mut query, terms);
        query.push("SELECT COUNT(*) AS total FROM matches WHERE overlap >= 1");
        let row = query.build().fetch_one(&mut *conn).await?;
        Ok(row.try_get("total")?)
    }

    async fn page(
        &self,
        conn: &mut SqliteConnection,
        terms: &[String],
        page: PageRequest,
    ) -> AppResult<Vec<RankedRecipe>> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new("");
        self.push_matches_cte(&mut query, terms);
        query.push(format!(
            "SELECT {RECIPE_COLUMNS}, m.overlap AS overlap FROM matches m \
             JOIN recipes r ON r.id = m.recipe_id \
             WHERE m.overlap >= 1 \
             ORDER BY m.overlap DESC, r.name ASC"
        ));
        push_page(&mut query, page);
        query
            .build()
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(|row| -> AppResult<RankedRecipe> {
                Ok(RankedRecipe {
                    recipe: row_to_recipe(row)?,
                    overlap: Some(row.try_get("overlap")?),
                })
            })
            .collect()
    }
}
