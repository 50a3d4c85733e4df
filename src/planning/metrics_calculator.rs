// ABOUTME: Metrics calculator: BMI, basal rate, total expenditure, calorie target and macros
// ABOUTME: Pure functions over a profile and the metrics table, recomputed on every call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metrics Calculator
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Phillips, S.M., & Van Loon, L.J. (2011). Dietary protein for athletes.
//!   *Journal of Sports Sciences*, 29(sup1), S29-S38.
//!   <https://doi.org/10.1080/02640414.2011.619204>

use crate::config::{ActivityFactorsConfig, MacroConfig, MetricsConfig};
use nutriplan_core::constants::energy::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use nutriplan_core::constants::mifflin_st_jeor;
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{ActivityLevel, DailyTargets, ProteinPreference, Sex, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Daily calorie range around the target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalorieRange {
    /// Lower bound, never below the safety floor
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Target, never below the safety floor
    pub target: f64,
}

/// Daily macro grams
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MacroSplit {
    /// Protein (g)
    pub protein_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
}

impl MacroSplit {
    /// Energy implied by the split
    #[must_use]
    pub fn calories(&self) -> f64 {
        self.fat_g.mul_add(
            KCAL_PER_G_FAT,
            self.protein_g
                .mul_add(KCAL_PER_G_PROTEIN, self.carbs_g * KCAL_PER_G_CARBS),
        )
    }
}

/// Derived metrics for a profile; never persisted by the planner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    /// Body mass index, one decimal
    pub bmi: f64,
    /// Basal metabolic rate (kcal/day), whole kcal
    pub basal_rate: f64,
    /// Activity factor applied
    pub activity_factor: f64,
    /// Total daily energy expenditure (kcal/day)
    pub total_expenditure: f64,
    /// Calorie range
    pub calories: CalorieRange,
    /// Macro grams
    pub macros: MacroSplit,
}

impl Metrics {
    /// Targets handed to the meal planner
    #[must_use]
    pub const fn daily_targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.calories.target,
            protein_g: self.macros.protein_g,
            fat_g: self.macros.fat_g,
            carbs_g: self.macros.carbs_g,
        }
    }
}

fn require_positive(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

/// Body mass index: weight / height(m)^2, rounded to one decimal
///
/// # Errors
///
/// Returns `InvalidInput` when weight or height is not positive
pub fn bmi(weight_kg: f64, height_cm: f64) -> AppResult<f64> {
    require_positive("weight_kg", weight_kg)?;
    require_positive("height_cm", height_cm)?;
    let height_m = height_cm / 100.0;
    Ok((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

/// Basal metabolic rate using Mifflin-St Jeor (1990), rounded to whole kcal
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_constant`
/// - Men: +5
/// - Women: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns `InvalidInput` when weight or height is not positive
pub fn basal_rate(sex: Sex, weight_kg: f64, height_cm: f64, age: u32) -> AppResult<f64> {
    require_positive("weight_kg", weight_kg)?;
    require_positive("height_cm", height_cm)?;

    let sex_constant = match sex {
        Sex::Male => mifflin_st_jeor::MALE_CONSTANT,
        Sex::Female => mifflin_st_jeor::FEMALE_CONSTANT,
    };
    let raw = mifflin_st_jeor::AGE_COEF.mul_add(
        f64::from(age),
        mifflin_st_jeor::WEIGHT_COEF.mul_add(weight_kg, mifflin_st_jeor::HEIGHT_COEF * height_cm),
    ) + sex_constant;

    Ok(raw.round())
}

/// Activity factor for a level
#[must_use]
pub const fn activity_factor(level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    config.factor(level)
}

/// Total daily energy expenditure: basal rate x activity factor
///
/// # Errors
///
/// Returns `InvalidInput` when the basal rate is not positive
pub fn total_expenditure(
    basal_rate: f64,
    level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    require_positive("basal_rate", basal_rate)?;
    Ok(basal_rate * config.factor(level))
}

/// Relative deficit or surplus selected by the distance to the goal weight
#[must_use]
pub fn goal_adjustment(goal_weight_kg: f64, current_weight_kg: f64, config: &MetricsConfig) -> f64 {
    let tiers = &config.goal_adjustment;
    let diff = goal_weight_kg - current_weight_kg;
    if diff < -tiers.large_change_kg {
        tiers.large_loss
    } else if diff < 0.0 {
        tiers.small_loss
    } else if diff > tiers.large_change_kg {
        tiers.large_gain
    } else if diff > 0.0 {
        tiers.small_gain
    } else {
        0.0
    }
}

/// Calorie target and range, clamped to the sex-specific safety floor
///
/// # Errors
///
/// Returns `InvalidInput` when the expenditure or a weight is not positive
pub fn calorie_target(
    expenditure: f64,
    goal_weight_kg: f64,
    current_weight_kg: f64,
    sex: Sex,
    config: &MetricsConfig,
) -> AppResult<CalorieRange> {
    require_positive("expenditure", expenditure)?;
    require_positive("goal_weight_kg", goal_weight_kg)?;
    require_positive("current_weight_kg", current_weight_kg)?;

    let adjustment = goal_adjustment(goal_weight_kg, current_weight_kg, config);
    let floor = config.safety_floors.floor(sex);
    let unclamped = expenditure * (1.0 + adjustment);
    let target = unclamped.max(floor);
    if target > unclamped {
        debug!(
            unclamped_kcal = unclamped,
            floor_kcal = floor,
            "Calorie target raised to safety floor"
        );
    }

    Ok(CalorieRange {
        min: (target * config.calorie_band.lower).max(floor),
        max: target * config.calorie_band.upper,
        target,
    })
}

/// Macro split: protein from the g/kg band, fat fixed per kg, carbs fill the rest
///
/// # Errors
///
/// Returns `InvalidInput` when the calorie target or goal weight is not positive
pub fn macros(
    calorie_target: f64,
    goal_weight_kg: f64,
    preference: ProteinPreference,
    config: &MacroConfig,
) -> AppResult<MacroSplit> {
    require_positive("calorie_target", calorie_target)?;
    require_positive("goal_weight_kg", goal_weight_kg)?;

    let protein_g = goal_weight_kg * config.protein_g_per_kg(preference);
    let fat_g = goal_weight_kg * config.fat_g_per_kg;
    let remaining = fat_g.mul_add(
        -KCAL_PER_G_FAT,
        protein_g.mul_add(-KCAL_PER_G_PROTEIN, calorie_target),
    );
    let carbs_g = (remaining / KCAL_PER_G_CARBS).max(0.0);

    Ok(MacroSplit {
        protein_g,
        fat_g,
        carbs_g,
    })
}

/// Every metric for a profile, using its own activity level and preferences
///
/// # Errors
///
/// Returns the profile's validation error, if any
pub fn compute_metrics(profile: &UserProfile, config: &MetricsConfig) -> AppResult<Metrics> {
    profile.validate()?;

    let bmi = bmi(profile.weight_kg, profile.height_cm)?;
    let basal_rate = basal_rate(
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        profile.age,
    )?;
    let activity_factor = activity_factor(profile.activity_level, &config.activity_factors);
    let total_expenditure =
        total_expenditure(basal_rate, profile.activity_level, &config.activity_factors)?;
    let calories = calorie_target(
        total_expenditure,
        profile.goal_weight_kg,
        profile.weight_kg,
        profile.sex,
        config,
    )?;
    let macros = macros(
        calories.target,
        profile.goal_weight_kg,
        profile.dietary.protein_preference,
        &config.macros,
    )?;

    debug!(
        user_id = %profile.id,
        bmi,
        basal_rate,
        activity = profile.activity_level.label(),
        target_kcal = calories.target,
        "Computed metrics"
    );

    Ok(Metrics {
        bmi,
        basal_rate,
        activity_factor,
        total_expenditure,
        calories,
        macros,
    })
}
