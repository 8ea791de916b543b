// ABOUTME: Application constants organized by domain
// ABOUTME: Pagination defaults, SQLite limits, retry tuning and user-facing error text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by the concern that consumes them.

/// Pagination defaults applied when callers send missing or invalid values
pub mod pagination {
    /// First page number
    pub const DEFAULT_PAGE: i64 = 1;
    /// Items per page when none is requested
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
}

/// Storage engine limits
pub mod database {
    /// Maximum bound parameters per SQLite statement (`SQLITE_MAX_VARIABLE_NUMBER` on older builds)
    pub const SQLITE_MAX_BIND_PARAMS: usize = 999;
    /// Default connection pool size
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    /// Seconds to wait for a pooled connection
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    /// Milliseconds `SQLite` waits on a locked database before returning `SQLITE_BUSY`
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/pantry.db";
}

/// Ingestion transaction tuning
pub mod ingestion {
    /// Retries for transient lock contention
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Base backoff in milliseconds, doubled per attempt
    pub const RETRY_BASE_DELAY_MS: u64 = 10;
    /// Whole-batch deadline in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Search tuning
pub mod matching {
    /// Search deadline in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}

/// User-facing error text
pub mod errors {
    /// Returned in place of storage failure details
    pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
        "service temporarily unavailable. Please try again later";
}
