// ABOUTME: Re-exports the unified error types from pantry-core
// ABOUTME: AppError, ErrorCode and AppResult are shared by storage, ingestion and matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pantry_core::errors::*;
