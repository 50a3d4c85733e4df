// ABOUTME: Progress tracker configuration: trend bands, rule thresholds and adjustment sizes
// ABOUTME: Percent values are expressed as percent (e.g. -1.0 means -1%)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress Tracking Configuration

use nutriplan_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Progress Tracking Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Weight trend bands
    pub trend: TrendBandsConfig,
    /// Rule thresholds
    pub rules: RuleThresholdsConfig,
    /// Adjustment magnitudes
    pub adjustments: AdjustmentConfig,
    /// Adherence blend
    pub adherence: AdherenceConfig,
}

/// Weekly weight-change bands in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendBandsConfig {
    /// Below this is fast loss
    pub fast_loss_below_pct: f64,
    /// Below this (and not fast) is normal loss
    pub normal_loss_below_pct: f64,
    /// At or above this is gain
    pub gain_from_pct: f64,
    /// Two-week change at or above this counts as a stall
    pub stall_two_week_min_pct: f64,
}

impl Default for TrendBandsConfig {
    fn default() -> Self {
        Self {
            fast_loss_below_pct: -1.0,
            normal_loss_below_pct: -0.25,
            gain_from_pct: 0.25,
            stall_two_week_min_pct: -0.5,
        }
    }
}

/// Rule trigger thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleThresholdsConfig {
    /// Meal adherence a day needs to count toward protein compliance
    pub protein_day_min_adherence: u8,
    /// Share of the protein target a day needs
    pub protein_day_min_ratio: f64,
    /// Non-compliant days tolerated before the protein alert
    pub protein_grace_days: usize,
    /// Average perceived exertion that counts as sustained high
    pub high_exertion_rpe: f64,
    /// Completed sessions needed before judging exertion
    pub high_exertion_min_sessions: usize,
    /// Improved record metrics needed for a volume increase
    pub improvement_min_metrics: usize,
    /// Weekly meal adherence below this triggers the low-adherence alert
    pub low_adherence_below: f64,
    /// Weekly meal adherence at or above this earns reinforcement
    pub high_adherence_from: f64,
}

impl Default for RuleThresholdsConfig {
    fn default() -> Self {
        Self {
            protein_day_min_adherence: 70,
            protein_day_min_ratio: 0.9,
            protein_grace_days: 3,
            high_exertion_rpe: 8.0,
            high_exertion_min_sessions: 3,
            improvement_min_metrics: 2,
            low_adherence_below: 70.0,
            high_adherence_from: 90.0,
        }
    }
}

/// Adjustment magnitudes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Calorie increase after rapid loss
    pub rapid_loss_calorie_increase: f64,
    /// Calorie decrease after a stall
    pub stalled_calorie_decrease: f64,
    /// Volume multiplier after sustained high exertion
    pub high_exertion_volume: f64,
    /// Volume multiplier after performance improvement
    pub improvement_volume: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            rapid_loss_calorie_increase: 0.05,
            stalled_calorie_decrease: 0.05,
            high_exertion_volume: 0.9,
            improvement_volume: 1.075,
        }
    }
}

/// Overall adherence weights and the water compliance rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceConfig {
    /// Weight of meal adherence
    pub meal_weight: f64,
    /// Weight of workout adherence
    pub workout_weight: f64,
    /// Weight of water compliance
    pub water_weight: f64,
    /// Share of the water target a day needs
    pub water_day_min_ratio: f64,
}

impl Default for AdherenceConfig {
    fn default() -> Self {
        Self {
            meal_weight: 0.5,
            workout_weight: 0.3,
            water_weight: 0.2,
            water_day_min_ratio: 0.8,
        }
    }
}

impl ProgressConfig {
    /// Validate the tables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when trend bands are out of order or the
    /// adherence weights do not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.trend;
        if !(t.fast_loss_below_pct < t.normal_loss_below_pct
            && t.normal_loss_below_pct < 0.0
            && 0.0 < t.gain_from_pct)
        {
            return Err(ConfigError::InvalidRange(
                "trend bands must satisfy fast < normal < 0 < gain".to_owned(),
            ));
        }
        let a = &self.adherence;
        let sum = a.meal_weight + a.workout_weight + a.water_weight;
        if (sum - 1.0).abs() > 0.001 {
            return Err(ConfigError::InvalidWeights(format!(
                "adherence weights must sum to 1.0, got {sum:.3}"
            )));
        }
        let adj = &self.adjustments;
        if adj.high_exertion_volume >= 1.0 || adj.improvement_volume <= 1.0 {
            return Err(ConfigError::InvalidRange(
                "volume multipliers must reduce after exertion and increase after improvement"
                    .to_owned(),
            ));
        }
        Ok(())
    }
}
