// ABOUTME: Main library entry point for the nutriplan nutrition and training planner
// ABOUTME: Exposes configuration tables, the planning core and host-side logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Nutriplan
//!
//! A deterministic nutrition and exercise planning core. Given a user
//! profile, a recipe/food catalog and a workout-template library it
//! produces daily and weekly meal plans, progressive workout sessions,
//! consolidated store-aware shopping lists and weekly progress adjustments.
//!
//! ## Architecture
//!
//! - **Core** (`nutriplan-core`): errors, constants and plain data records
//! - **Config**: immutable tables handed to each generator at construction
//! - **Planning**: metrics calculator, meal planner, workout planner,
//!   shopping list generator and progress tracker
//! - **Logging**: optional tracing subscriber setup for host applications
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriplan::config::PlanningConfig;
//! use nutriplan::planning::compute_metrics;
//! use nutriplan::models::UserProfile;
//! use nutriplan::errors::AppResult;
//!
//! fn targets(profile: &UserProfile) -> AppResult<f64> {
//!     let config = PlanningConfig::default();
//!     let metrics = compute_metrics(profile, &config.metrics)?;
//!     Ok(metrics.calories.target)
//! }
//! ```

/// Configuration tables for every planning component
pub mod config;

/// Host-side structured logging setup
pub mod logging;

/// Deterministic planning core
pub mod planning;

pub use nutriplan_core::{constants, errors, models};
