// ABOUTME: Helper modules for pantry-cli
// ABOUTME: Provides output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
