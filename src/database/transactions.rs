// ABOUTME: Transaction management with RAII guards and retry patterns for SQLite writes
// ABOUTME: Provides automatic rollback on drop and exponential backoff on lock contention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with RAII guards and retry patterns
//!
//! - `TransactionGuard`: rolls back unless `commit()` is reached, including
//!   when the owning future is dropped mid-flight
//! - `retry_transaction`: exponential backoff for `SQLITE_BUSY` / locked errors
//!
//! ```text
//! retry_transaction(|| async {
//!     let mut guard = TransactionGuard::new(pool.begin().await?);
//!     sqlx::query("INSERT INTO recipes ...").execute(guard.executor()?).await?;
//!     guard.commit().await
//! }, 3).await
//! ```

use std::future::Future;
use std::time::Duration;

use sqlx::{Database, Sqlite, Transaction};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::constants::ingestion::RETRY_BASE_DELAY_MS;
use crate::errors::{AppError, AppResult};

/// Retry a transaction operation if it fails with a retryable error
///
/// Only errors whose code is retryable (database busy or locked) are retried;
/// constraint violations and every other failure propagate immediately.
/// `max_retries` counts retries after the first attempt.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-retryable error
///
/// # Exponential Backoff
/// - Retry 1: 20ms
/// - Retry 2: 40ms
/// - Retry 3: 80ms
pub async fn retry_transaction<F, Fut, T>(mut f: F, max_retries: u32) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempts: u32 = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_retryable() => {
                debug!(attempts, error = %e, "Transaction failed with non-retryable error");
                return Err(e);
            }
            Err(e) => {
                attempts += 1;
                if attempts > max_retries {
                    error!(
                        attempts,
                        max_retries,
                        error = %e,
                        "Transaction failed after max retries"
                    );
                    return Err(e);
                }
                let backoff_ms = RETRY_BASE_DELAY_MS.saturating_mul(1 << attempts.min(16));
                warn!(
                    attempt = attempts,
                    max_retries,
                    backoff_ms,
                    error = %e,
                    "Transaction failed with retryable error, retrying after backoff"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
            }
        }
    }
}

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// If the guard is dropped before `commit()` (an early `?` return, a timeout,
/// or the caller dropping the future) the wrapped `sqlx` transaction rolls
/// back.
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Create a new transaction guard from an existing `sqlx` transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction was already consumed or the commit
    /// fails (a busy commit is reported as retryable)
    pub async fn commit(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.commit().await.map_err(AppError::from)?;
                self.committed = true;
                debug!("TransactionGuard committed successfully");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            )),
        }
    }

    /// Explicitly rollback the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback operation fails
    pub async fn rollback(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.rollback()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
                debug!("TransactionGuard rolled back explicitly");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            )),
        }
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Get a mutable reference to the underlying connection for executing queries
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction has already been committed or rolled back
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!(
                "TransactionGuard dropped without commit - transaction will be rolled back automatically"
            );
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, Sqlite>;
