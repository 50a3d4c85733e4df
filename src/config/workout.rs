// ABOUTME: Workout planner configuration: fitness thresholds, progression, MET values, selection
// ABOUTME: Thresholds award 0-2 points per criterion for a 0-8 fitness score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout Plan Configuration
//!
//! MET values follow the Compendium of Physical Activities:
//! Ainsworth, B.E., et al. (2011). *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.

use nutriplan_core::errors::ConfigError;
use nutriplan_core::models::{BlockKind, FitnessLevel, IntensityBand, Sex};
use serde::{Deserialize, Serialize};

/// Workout Plan Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutConfig {
    /// Fitness evaluation thresholds
    pub fitness: FitnessThresholdsConfig,
    /// Progression multipliers and personal-record fractions
    pub progression: ProgressionConfig,
    /// Metabolic equivalents per block type and band
    pub met: MetTableConfig,
    /// Template selection weights
    pub selection: TemplateSelectionConfig,
    /// Post-session feedback thresholds
    pub feedback: SessionFeedbackConfig,
}

/// Value earning one point and value earning two points
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThreshold {
    /// One point at or above this value
    pub partial: f64,
    /// Two points at or above this value
    pub full: f64,
}

impl TierThreshold {
    /// Points (0, 1 or 2) for a value
    #[must_use]
    pub fn points(&self, value: f64) -> u8 {
        if value >= self.full {
            2
        } else if value >= self.partial {
            1
        } else {
            0
        }
    }
}

/// Fitness evaluation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessThresholdsConfig {
    /// Push-ups, male
    pub pushups_male: TierThreshold,
    /// Push-ups, female
    pub pushups_female: TierThreshold,
    /// Plank hold in seconds
    pub plank_s: TierThreshold,
    /// Running speed in km/h
    pub run_speed_kmh: TierThreshold,
    /// Running duration in minutes
    pub run_duration_min: TierThreshold,
    /// Minimum score for intermediate
    pub intermediate_score: u8,
    /// Minimum score for advanced
    pub advanced_score: u8,
}

impl FitnessThresholdsConfig {
    /// Push-up thresholds for a sex
    #[must_use]
    pub const fn pushups(&self, sex: Sex) -> TierThreshold {
        match sex {
            Sex::Male => self.pushups_male,
            Sex::Female => self.pushups_female,
        }
    }
}

impl Default for FitnessThresholdsConfig {
    fn default() -> Self {
        Self {
            pushups_male: TierThreshold {
                partial: 15.0,
                full: 30.0,
            },
            pushups_female: TierThreshold {
                partial: 8.0,
                full: 20.0,
            },
            plank_s: TierThreshold {
                partial: 45.0,
                full: 90.0,
            },
            run_speed_kmh: TierThreshold {
                partial: 8.0,
                full: 10.0,
            },
            run_duration_min: TierThreshold {
                partial: 15.0,
                full: 30.0,
            },
            intermediate_score: 3,
            advanced_score: 6,
        }
    }
}

/// Progression multipliers and personal-record fractions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Beginner level multiplier
    pub beginner_multiplier: f64,
    /// Intermediate level multiplier
    pub intermediate_multiplier: f64,
    /// Advanced level multiplier
    pub advanced_multiplier: f64,
    /// Per-session increment
    pub session_step: f64,
    /// Days between assumed sessions
    pub days_per_session: i64,
    /// Push-up reps as a fraction of max push-ups
    pub pushup_fraction: f64,
    /// Sit-up reps as a fraction of max sit-ups
    pub situp_fraction: f64,
    /// Plank hold as a fraction of max plank
    pub plank_fraction: f64,
    /// Load as a fraction of the recorded max load
    pub load_fraction: f64,
    /// Minimum reps per set
    pub min_reps: u32,
    /// Minimum plank hold in seconds
    pub min_plank_s: u32,
    /// Minimum running speed in km/h
    pub min_run_speed_kmh: f64,
    /// Minimum interval rest in seconds
    pub min_interval_rest_s: u32,
}

impl ProgressionConfig {
    /// Multiplier for a level
    #[must_use]
    pub const fn level_multiplier(&self, level: FitnessLevel) -> f64 {
        match level {
            FitnessLevel::Beginner => self.beginner_multiplier,
            FitnessLevel::Intermediate => self.intermediate_multiplier,
            FitnessLevel::Advanced => self.advanced_multiplier,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            beginner_multiplier: 0.8,
            intermediate_multiplier: 1.0,
            advanced_multiplier: 1.2,
            session_step: 0.05,
            days_per_session: 2,
            pushup_fraction: 0.7,
            situp_fraction: 0.7,
            plank_fraction: 0.8,
            load_fraction: 0.7,
            min_reps: 5,
            min_plank_s: 15,
            min_run_speed_kmh: 5.0,
            min_interval_rest_s: 10,
        }
    }
}

/// MET values (low, medium, high) for one block type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetBands {
    /// Low band
    pub low: f64,
    /// Medium band
    pub medium: f64,
    /// High band
    pub high: f64,
}

impl MetBands {
    /// MET for a band
    #[must_use]
    pub const fn get(&self, band: IntensityBand) -> f64 {
        match band {
            IntensityBand::Low => self.low,
            IntensityBand::Medium => self.medium,
            IntensityBand::High => self.high,
        }
    }
}

/// Metabolic equivalents per block type and banding thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetTableConfig {
    /// Running
    pub run: MetBands,
    /// Intervals
    pub interval: MetBands,
    /// Strength
    pub strength: MetBands,
    /// Mobility and walking
    pub basic: MetBands,
    /// Multiplier at or above which a block is medium
    pub medium_from: f64,
    /// Multiplier at or above which a block is high
    pub high_from: f64,
}

impl MetTableConfig {
    /// Band for an effective multiplier
    #[must_use]
    pub fn band(&self, multiplier: f64) -> IntensityBand {
        if multiplier >= self.high_from {
            IntensityBand::High
        } else if multiplier >= self.medium_from {
            IntensityBand::Medium
        } else {
            IntensityBand::Low
        }
    }

    /// MET for a block type and band
    #[must_use]
    pub const fn met(&self, kind: BlockKind, band: IntensityBand) -> f64 {
        match kind {
            BlockKind::Run => self.run.get(band),
            BlockKind::Interval => self.interval.get(band),
            BlockKind::Strength => self.strength.get(band),
            BlockKind::Basic => self.basic.get(band),
        }
    }
}

impl Default for MetTableConfig {
    fn default() -> Self {
        Self {
            run: MetBands {
                low: 7.0,
                medium: 9.8,
                high: 11.5,
            },
            interval: MetBands {
                low: 6.0,
                medium: 8.0,
                high: 10.0,
            },
            strength: MetBands {
                low: 3.5,
                medium: 5.0,
                high: 6.0,
            },
            basic: MetBands {
                low: 2.0,
                medium: 2.5,
                high: 3.0,
            },
            medium_from: 0.9,
            high_from: 1.15,
        }
    }
}

/// Template selection weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSelectionConfig {
    /// Starting score
    pub base_score: f64,
    /// Points lost per minute away from the preferred duration
    pub duration_weight: f64,
    /// Points gained when the category matches the preference
    pub category_bonus: f64,
    /// Points lost by high-impact templates when the user avoids impact
    pub high_impact_penalty: f64,
}

impl Default for TemplateSelectionConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            duration_weight: 2.0,
            category_bonus: 20.0,
            high_impact_penalty: 30.0,
        }
    }
}

/// Post-session feedback thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFeedbackConfig {
    /// Perceived exertion at or below which the load should go up
    pub easy_max_rpe: u8,
    /// Perceived exertion at or above which volume should go down
    pub hard_min_rpe: u8,
    /// Relative weekly volume reduction after a hard session
    pub volume_reduction: f64,
}

impl Default for SessionFeedbackConfig {
    fn default() -> Self {
        Self {
            easy_max_rpe: 7,
            hard_min_rpe: 8,
            volume_reduction: 0.10,
        }
    }
}

impl WorkoutConfig {
    /// Validate the tables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for inverted thresholds or non-positive multipliers
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.fitness;
        let tiers = [
            f.pushups_male,
            f.pushups_female,
            f.plank_s,
            f.run_speed_kmh,
            f.run_duration_min,
        ];
        if tiers.iter().any(|t| t.partial > t.full) {
            return Err(ConfigError::InvalidRange(
                "fitness thresholds must satisfy partial <= full".to_owned(),
            ));
        }
        if f.intermediate_score > f.advanced_score || f.advanced_score > 8 {
            return Err(ConfigError::InvalidRange(
                "fitness level scores must satisfy intermediate <= advanced <= 8".to_owned(),
            ));
        }
        let p = &self.progression;
        let levels = [
            p.beginner_multiplier,
            p.intermediate_multiplier,
            p.advanced_multiplier,
        ];
        if levels.iter().any(|m| !(m.is_finite() && *m > 0.0)) || p.days_per_session <= 0 {
            return Err(ConfigError::InvalidRange(
                "progression multipliers and session spacing must be positive".to_owned(),
            ));
        }
        if !(p.session_step.is_finite() && p.session_step >= 0.0) {
            return Err(ConfigError::InvalidRange(
                "session_step must be zero or positive".to_owned(),
            ));
        }
        if self.met.medium_from > self.met.high_from {
            return Err(ConfigError::InvalidRange(
                "MET banding requires medium_from <= high_from".to_owned(),
            ));
        }
        if self.feedback.easy_max_rpe >= self.feedback.hard_min_rpe {
            return Err(ConfigError::InvalidRange(
                "easy_max_rpe must be below hard_min_rpe".to_owned(),
            ));
        }
        Ok(())
    }
}
