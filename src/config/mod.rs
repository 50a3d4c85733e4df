// ABOUTME: Configuration module aggregating the immutable planning tables
// ABOUTME: Handles defaults, JSON overrides and validation before any planner is built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the planning core
//!
//! Every planner receives its table at construction and never consults a
//! global. The tables are:
//!
//! - **Metrics**: activity factors, goal tiers, safety floors and macro split
//! - **Meal plan**: day templates, scoring weights, portions and validation
//! - **Workout**: fitness thresholds, progression, MET values and selection
//! - **Shopping**: store pricing, priority food sets and batch-cooking rules
//! - **Progress**: trend bands, rule thresholds and adjustment sizes

use nutriplan_core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Meal planner tables
pub mod meal_plan;
/// Metrics calculator tables
pub mod metrics;
/// Progress tracker tables
pub mod progress;
/// Shopping list tables
pub mod shopping;
/// Workout planner tables
pub mod workout;

pub use meal_plan::{
    BudgetTimeLimitsConfig, DayTemplate, DayTemplatesConfig, MealPlanConfig, MealScoringConfig,
    PlanValidationConfig, SelectionConfig, SlotShare, SubstitutionConfig, FRACTION_SUM_TOLERANCE,
};
pub use metrics::{
    ActivityFactorsConfig, CalorieBandConfig, GoalAdjustmentConfig, MacroConfig, MetricsConfig,
    SafetyFloorsConfig,
};
pub use progress::{
    AdherenceConfig, AdjustmentConfig, ProgressConfig, RuleThresholdsConfig, TrendBandsConfig,
};
pub use shopping::{PrimaryProtein, ProteinKind, ShoppingConfig, StoreConfig};
pub use workout::{
    FitnessThresholdsConfig, MetBands, MetTableConfig, ProgressionConfig, SessionFeedbackConfig,
    TemplateSelectionConfig, TierThreshold, WorkoutConfig,
};

/// Every table the planning core needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Metrics calculator
    pub metrics: MetricsConfig,
    /// Meal planner
    pub meal_plan: MealPlanConfig,
    /// Workout planner
    pub workout: WorkoutConfig,
    /// Shopping list generator
    pub shopping: ShoppingConfig,
    /// Progress tracker
    pub progress: ProgressConfig,
}

impl PlanningConfig {
    /// Parse a JSON document of overrides; missing sections keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any validation error
    /// raised by the resulting tables
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!("Planning configuration loaded from JSON overrides");
        Ok(config)
    }

    /// Validate every table
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.metrics.validate()?;
        self.meal_plan.validate()?;
        self.workout.validate()?;
        self.shopping.validate()?;
        self.progress.validate()
    }
}
