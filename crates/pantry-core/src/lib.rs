// ABOUTME: Core types and constants for the Pantry recipe ingestion and matching service
// ABOUTME: Foundation crate with error handling, pagination, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pantry Core
//!
//! Foundation crate providing shared types for the Pantry service. It does no
//! I/O; storage, ingestion and matching live in the root crate.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and storage error classification
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Offset pagination requests and metadata
//! - **models**: Raw and persisted recipe types and search results

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Offset pagination shared by every search path
pub mod pagination;

/// Recipe, ingredient and search result models
pub mod models;
