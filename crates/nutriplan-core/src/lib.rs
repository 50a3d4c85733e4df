// ABOUTME: Core types and constants for the nutriplan planning engine
// ABOUTME: Foundation crate with error handling, domain records, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutriplan Core
//!
//! Foundation crate providing shared types and constants for the nutriplan
//! planning engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ConfigError`
//! - **constants**: Physiological and nutritional constants organized by domain
//! - **models**: Plain data records exchanged with the catalog and persistence collaborators

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, recipes, workouts, plans, shopping, progress)
pub mod models;
