// ABOUTME: Planning core module root: metrics, meals, workouts, shopping and progress
// ABOUTME: Every generator is deterministic for identical inputs and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planning Core
//!
//! Dependencies flow one way:
//!
//! ```text
//! metrics_calculator -> meal_planner -> shopping_list
//!                    \-> progress_tracker (calorie floors)
//! workout_planner ----> progress_tracker (exertion, records)
//! ```
//!
//! Generators hold their configuration table, read the catalog through
//! [`CatalogProvider`](nutriplan_core::models::CatalogProvider) and never
//! touch a clock, the environment or any global state. Dates and timestamps
//! are always parameters.

/// BMI, basal rate, expenditure, calorie target and macro split
pub mod metrics_calculator;

/// Daily and weekly meal plans from the recipe catalog
pub mod meal_planner;

/// Template selection and progressive overload
pub mod workout_planner;

/// Ingredient consolidation, store pricing and batch cooking
pub mod shopping_list;

/// Weekly progress analysis and plan adjustments
pub mod progress_tracker;

pub use meal_planner::{MealPlanner, ScoredRecipe, SlotTarget};
pub use metrics_calculator::{
    activity_factor, basal_rate, bmi, calorie_target, compute_metrics, goal_adjustment, macros,
    total_expenditure, CalorieRange, MacroSplit, Metrics,
};
pub use progress_tracker::{ProgressInputs, ProgressTracker};
pub use shopping_list::{ConsolidatedIngredient, PriceQuote, ShoppingListGenerator};
pub use workout_planner::{FeedbackKind, FeedbackNote, FitnessAssessment, WorkoutPlanner};
