// ABOUTME: Metrics calculator configuration: activity factors, goal tiers, floors and macros
// ABOUTME: Default values reproduce the documented energy and macro rules exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metrics Calculator Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010) Exercise Physiology
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204

use nutriplan_core::errors::ConfigError;
use nutriplan_core::models::{ActivityLevel, ProteinPreference, Sex};
use serde::{Deserialize, Serialize};

/// Metrics Calculator Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Activity factor multipliers for total expenditure
    pub activity_factors: ActivityFactorsConfig,
    /// Deficit/surplus tiers by goal distance
    pub goal_adjustment: GoalAdjustmentConfig,
    /// Sex-specific calorie floors
    pub safety_floors: SafetyFloorsConfig,
    /// Width of the calorie range around the target
    pub calorie_band: CalorieBandConfig,
    /// Protein and fat per kg of goal weight
    pub macros: MacroConfig,
}

/// Activity factor multipliers for total expenditure
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

/// Deficit/surplus tiers selected by the distance to the goal weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Goal distance (kg) separating small from large changes
    pub large_change_kg: f64,
    /// Relative change when losing more than `large_change_kg`
    pub large_loss: f64,
    /// Relative change when losing up to `large_change_kg`
    pub small_loss: f64,
    /// Relative change when gaining more than `large_change_kg`
    pub large_gain: f64,
    /// Relative change when gaining up to `large_change_kg`
    pub small_gain: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            large_change_kg: 5.0,
            large_loss: -0.225,
            small_loss: -0.15,
            large_gain: 0.125,
            small_gain: 0.075,
        }
    }
}

/// Minimum daily calories regardless of goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyFloorsConfig {
    /// Male floor (kcal)
    pub male_kcal: f64,
    /// Female floor (kcal)
    pub female_kcal: f64,
}

impl SafetyFloorsConfig {
    /// Floor for a sex
    #[must_use]
    pub const fn floor(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male_kcal,
            Sex::Female => self.female_kcal,
        }
    }
}

impl Default for SafetyFloorsConfig {
    fn default() -> Self {
        Self {
            male_kcal: 1500.0,
            female_kcal: 1200.0,
        }
    }
}

/// Multipliers producing the min/max of the calorie range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieBandConfig {
    /// Lower bound multiplier
    pub lower: f64,
    /// Upper bound multiplier
    pub upper: f64,
}

impl Default for CalorieBandConfig {
    fn default() -> Self {
        Self {
            lower: 0.95,
            upper: 1.05,
        }
    }
}

/// Macro split per kg of goal weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroConfig {
    /// Low end of the protein band (g/kg)
    pub protein_min_g_per_kg: f64,
    /// High end of the protein band (g/kg)
    pub protein_max_g_per_kg: f64,
    /// Fat (g/kg)
    pub fat_g_per_kg: f64,
}

impl MacroConfig {
    /// Protein factor for a preference: low end, midpoint or high end
    #[must_use]
    pub fn protein_g_per_kg(&self, preference: ProteinPreference) -> f64 {
        match preference {
            ProteinPreference::Low => self.protein_min_g_per_kg,
            ProteinPreference::Medium => {
                (self.protein_min_g_per_kg + self.protein_max_g_per_kg) / 2.0
            }
            ProteinPreference::High => self.protein_max_g_per_kg,
        }
    }
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            protein_min_g_per_kg: 1.6,
            protein_max_g_per_kg: 2.2,
            fat_g_per_kg: 0.6,
        }
    }
}

impl MetricsConfig {
    /// Validate the tables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when a factor or tier is out of order
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.activity_factors;
        let factors = [
            f.sedentary,
            f.lightly_active,
            f.moderately_active,
            f.very_active,
            f.extra_active,
        ];
        if factors.windows(2).any(|w| w[0] >= w[1]) || factors[0] < 1.0 {
            return Err(ConfigError::InvalidRange(
                "activity factors must start at >= 1.0 and strictly increase".to_owned(),
            ));
        }
        let g = &self.goal_adjustment;
        if !(g.large_loss <= g.small_loss
            && g.small_loss <= 0.0
            && 0.0 <= g.small_gain
            && g.small_gain <= g.large_gain)
        {
            return Err(ConfigError::InvalidRange(
                "goal tiers must satisfy large_loss <= small_loss <= 0 <= small_gain <= large_gain"
                    .to_owned(),
            ));
        }
        if self.safety_floors.male_kcal <= 0.0 || self.safety_floors.female_kcal <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "safety floors must be positive".to_owned(),
            ));
        }
        if self.calorie_band.lower > 1.0 || self.calorie_band.upper < 1.0 {
            return Err(ConfigError::InvalidRange(
                "calorie band must straddle 1.0".to_owned(),
            ));
        }
        if self.macros.protein_min_g_per_kg > self.macros.protein_max_g_per_kg {
            return Err(ConfigError::InvalidRange(
                "protein band minimum exceeds maximum".to_owned(),
            ));
        }
        Ok(())
    }
}
