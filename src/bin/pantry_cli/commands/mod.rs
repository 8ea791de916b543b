// ABOUTME: Re-exports command modules for pantry-cli
// ABOUTME: Provides access to ingest, search and like commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod ingest;
pub mod likes;
pub mod search;
