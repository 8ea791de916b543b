// ABOUTME: Re-exports application constants from pantry-core
// ABOUTME: Pagination defaults, SQLite limits and retry tuning grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pantry_core::constants::*;
