// ABOUTME: Progress tracking records: measurements, water logs, rules and suggestions
// ABOUTME: ProgressRule is the closed rule set evaluated by the progress tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::profile::check_range;
use crate::constants::profile_limits;
use crate::errors::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Body measurement snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Day of the measurement
    pub date: NaiveDate,
    /// Body weight in kg
    pub weight_kg: f64,
    /// Body fat percentage when measured
    #[serde(default)]
    pub body_fat_pct: Option<f64>,
}

impl Measurement {
    /// Reject weights and body fat readings no person could have
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange`, tagged with the measurement date
    pub fn validate(&self) -> AppResult<()> {
        check_range(
            "weight_kg",
            self.weight_kg,
            profile_limits::MIN_WEIGHT_KG,
            profile_limits::MAX_WEIGHT_KG,
        )
        .and_then(|()| match self.body_fat_pct {
            Some(pct) => check_range("body_fat_pct", pct, 0.0, 100.0),
            None => Ok(()),
        })
        .map_err(|e| e.with_resource_id(self.date.to_string()))
    }
}

/// Water intake for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterLog {
    /// Day
    pub date: NaiveDate,
    /// Liters drunk
    pub liters: f64,
}

/// Closed set of progress rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProgressRule {
    /// Weight dropping faster than 1% per week
    RapidLoss,
    /// Weight loss stalled over two weeks
    StalledLoss,
    /// Protein target missed on too many days
    ProteinShortfall,
    /// Sessions consistently felt very hard
    SustainedHighExertion,
    /// Personal records improved
    PerformanceImprovement,
    /// Meal plan mostly not followed
    LowAdherence,
    /// Meal plan followed closely
    HighAdherence,
}

impl ProgressRule {
    /// Every rule in evaluation order
    pub const ALL: [Self; 7] = [
        Self::RapidLoss,
        Self::StalledLoss,
        Self::ProteinShortfall,
        Self::SustainedHighExertion,
        Self::PerformanceImprovement,
        Self::LowAdherence,
        Self::HighAdherence,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::RapidLoss => "rapid_loss",
            Self::StalledLoss => "stalled_loss",
            Self::ProteinShortfall => "protein_shortfall",
            Self::SustainedHighExertion => "sustained_high_exertion",
            Self::PerformanceImprovement => "performance_improvement",
            Self::LowAdherence => "low_adherence",
            Self::HighAdherence => "high_adherence",
        }
    }
}

/// Numeric change a suggestion proposes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Adjustment {
    /// Relative calorie change (e.g. 0.05 for +5%)
    Calories(f64),
    /// Training volume multiplier (e.g. 0.9)
    Volume(f64),
}

/// Output of one triggered rule; never mutated after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSuggestion {
    /// Rule that produced it
    pub rule: ProgressRule,
    /// Human-readable message
    pub message: String,
    /// Proposed numeric change, `None` for alerts and encouragement
    pub adjustment: Option<Adjustment>,
    /// Whether the user needs to act
    pub requires_action: bool,
    /// Whether the change is applied without asking
    pub auto_applied: bool,
    /// When the analysis ran
    pub created_at: DateTime<Utc>,
}

/// Weekly weight trend classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    /// Below -1% per week
    FastLoss,
    /// -1% to -0.25%
    NormalLoss,
    /// Slight loss sustained over two weeks
    SlowLoss,
    /// Stable
    Maintenance,
    /// +0.25% or more
    Gain,
}

/// Adherence components, each 0-100
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AdherenceBreakdown {
    /// Completed meals over planned meals
    pub meal: f64,
    /// Completed sessions over planned sessions
    pub workout: f64,
    /// Water-compliant days over logged days
    pub water: f64,
    /// Weighted blend
    pub overall: f64,
}

/// Result of a weekly analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    /// Last day of the analysis window
    pub as_of: NaiveDate,
    /// Weight change over one week, percent
    pub weekly_change_pct: f64,
    /// Weight change over two weeks, percent, when history allows
    pub two_week_change_pct: Option<f64>,
    /// Trend classification
    pub trend: WeightTrend,
    /// Days meeting the protein rule
    pub protein_compliant_days: usize,
    /// Days with a meal plan in the window
    pub total_days: usize,
    /// Adherence components
    pub adherence: AdherenceBreakdown,
    /// Triggered rules in evaluation order
    pub suggestions: Vec<ProgressSuggestion>,
}

impl ProgressReport {
    /// Whether a rule fired
    #[must_use]
    pub fn has_rule(&self, rule: ProgressRule) -> bool {
        self.suggestions.iter().any(|s| s.rule == rule)
    }
}

/// Result of applying suggestions to the current targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdjustmentOutcome {
    /// Calorie target before the cycle
    pub previous_calorie_target: f64,
    /// Calorie target after the cycle, floor-clamped
    pub new_calorie_target: f64,
    /// Relative calorie change applied (0 when none)
    pub calorie_change: f64,
    /// Volume multiplier applied, when any
    pub volume_multiplier: Option<f64>,
    /// Rules whose adjustment was applied
    pub applied_rules: Vec<ProgressRule>,
}
