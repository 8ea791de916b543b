// ABOUTME: Configuration module for environment-driven service settings
// ABOUTME: Groups database, ingestion and matching configuration loaded from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration. There is no config file; every setting
//! has a default and may be overridden by an environment variable.

/// Database URL parsing and connection pool settings
pub mod database;

/// Top-level `ServerConfig` and per-component settings
pub mod environment;
