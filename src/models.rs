// ABOUTME: Re-exports recipe and search models from pantry-core
// ABOUTME: Raw ingestion records, persisted rows and hydrated search results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pantry_core::models::*;
