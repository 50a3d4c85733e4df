// ABOUTME: User profile model with biometrics, preferences, equipment and health flags
// ABOUTME: Read-only input to every planner; validation rejects implausible values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{lipids, profile_limits};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological sex used by energy equations and safety floors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (higher basal rate, 1500 kcal floor)
    Male,
    /// Female (lower basal rate, 1200 kcal floor)
    Female,
}

/// Activity level for total expenditure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (little/no exercise)
    Sedentary,
    /// Lightly active (1-3 days/week)
    #[default]
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (hard training 2x/day)
    ExtraActive,
}

impl ActivityLevel {
    /// Qualitative label shown to users
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly active",
            Self::ModeratelyActive => "moderately active",
            Self::VeryActive => "very active",
            Self::ExtraActive => "extra active",
        }
    }
}

/// Budget tier driving store access, discounts and recipe time limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    /// Tight budget: discount store unlocked, cheap recipes favored
    Low,
    /// Regular budget
    #[default]
    Medium,
    /// Comfortable budget
    High,
}

/// Protein intake preference mapped onto the 1.6-2.2 g/kg band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProteinPreference {
    /// Low end of the band
    Low,
    /// Midpoint of the band
    #[default]
    Medium,
    /// High end of the band
    High,
}

/// Preferred style of training
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutCategory {
    /// Running and conditioning
    Cardio,
    /// Resistance work
    Strength,
    /// A bit of both
    #[default]
    Mixed,
}

/// Equipment capability a workout template may require
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Treadmill
    Treadmill,
    /// Any pair of dumbbells
    Dumbbells,
    /// Jump rope
    JumpRope,
    /// Exercise mat
    Mat,
    /// Resistance bands
    ResistanceBands,
}

/// Equipment the user owns
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EquipmentInventory {
    /// Has a treadmill
    pub treadmill: bool,
    /// Heaviest dumbbell available in kg; `None` when the user has no dumbbells
    pub dumbbell_max_kg: Option<f64>,
    /// Has a jump rope
    pub jump_rope: bool,
    /// Has an exercise mat
    pub mat: bool,
    /// Has resistance bands
    pub resistance_bands: bool,
}

impl EquipmentInventory {
    /// Whether the inventory provides a capability
    #[must_use]
    pub fn has(&self, equipment: Equipment) -> bool {
        match equipment {
            Equipment::Treadmill => self.treadmill,
            Equipment::Dumbbells => self.dumbbell_max_kg.is_some_and(|kg| kg >= 0.0),
            Equipment::JumpRope => self.jump_rope,
            Equipment::Mat => self.mat,
            Equipment::ResistanceBands => self.resistance_bands,
        }
    }
}

/// Dietary preferences used as hard filters and scoring signals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DietaryPreferences {
    /// Only recipes tagged as cooked without oil
    pub no_oil: bool,
    /// Only recipes tagged as free of added sugar
    pub no_sugar: bool,
    /// Favor cholesterol-friendly recipes
    pub cholesterol_friendly: bool,
    /// Favor batch-cookable recipes
    pub batch_cooking: bool,
    /// Skip breakfast (intermittent fasting)
    pub intermittent_fasting: bool,
    /// Protein intake preference
    pub protein_preference: ProteinPreference,
    /// Ingredients that must never appear (matched against food id or name)
    pub excluded_ingredients: Vec<String>,
    /// Ingredients the user enjoys
    pub liked_ingredients: Vec<String>,
}

/// Training preferences for template selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkoutPreferences {
    /// Preferred session length in minutes
    pub preferred_duration_min: u32,
    /// Preferred style of training
    pub preferred_category: WorkoutCategory,
    /// Avoid running and jumping based sessions
    pub avoid_high_impact: bool,
}

impl Default for WorkoutPreferences {
    fn default() -> Self {
        Self {
            preferred_duration_min: 30,
            preferred_category: WorkoutCategory::Mixed,
            avoid_high_impact: false,
        }
    }
}

/// Health markers and food sensitivities
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthFlags {
    /// LDL cholesterol (mg/dL)
    pub ldl_mg_dl: Option<f64>,
    /// HDL cholesterol (mg/dL)
    pub hdl_mg_dl: Option<f64>,
    /// Triglycerides (mg/dL)
    pub triglycerides_mg_dl: Option<f64>,
    /// Food allergies
    pub allergies: Vec<String>,
    /// Food intolerances
    pub intolerances: Vec<String>,
}

impl HealthFlags {
    /// Whether the lipid panel calls for cholesterol-friendly meals
    #[must_use]
    pub fn has_lipid_risk(&self) -> bool {
        self.ldl_mg_dl.is_some_and(|v| v > lipids::LDL_HIGH_MG_DL)
            || self.hdl_mg_dl.is_some_and(|v| v < lipids::HDL_LOW_MG_DL)
            || self
                .triglycerides_mg_dl
                .is_some_and(|v| v > lipids::TRIGLYCERIDES_HIGH_MG_DL)
    }
}

/// User profile consumed read-only by every planner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// User identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Biological sex
    pub sex: Sex,
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current body weight in kilograms
    pub weight_kg: f64,
    /// Goal body weight in kilograms
    pub goal_weight_kg: f64,
    /// Date by which the goal should be reached
    pub target_date: Option<NaiveDate>,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Budget tier
    pub budget_tier: BudgetTier,
    /// Daily water target in liters
    pub water_target_liters: f64,
    /// Dietary preferences
    pub dietary: DietaryPreferences,
    /// Owned equipment
    pub equipment: EquipmentInventory,
    /// Training preferences
    pub workout: WorkoutPreferences,
    /// Health markers
    pub health: HealthFlags,
    /// Account creation timestamp, anchors the session counter
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Reject implausible biometrics and malformed preference data
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for biometrics outside plausible human ranges,
    /// `MissingRequiredField` for a blank name and `InvalidInput` for blank or
    /// duplicated ingredient entries.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if !(profile_limits::MIN_AGE..=profile_limits::MAX_AGE).contains(&self.age) {
            return Err(AppError::value_out_of_range(
                "age",
                f64::from(self.age),
                f64::from(profile_limits::MIN_AGE),
                f64::from(profile_limits::MAX_AGE),
            ));
        }
        check_range(
            "height_cm",
            self.height_cm,
            profile_limits::MIN_HEIGHT_CM,
            profile_limits::MAX_HEIGHT_CM,
        )?;
        check_range(
            "weight_kg",
            self.weight_kg,
            profile_limits::MIN_WEIGHT_KG,
            profile_limits::MAX_WEIGHT_KG,
        )?;
        check_range(
            "goal_weight_kg",
            self.goal_weight_kg,
            profile_limits::MIN_WEIGHT_KG,
            profile_limits::MAX_WEIGHT_KG,
        )?;
        check_range(
            "water_target_liters",
            self.water_target_liters,
            0.0,
            profile_limits::MAX_WATER_LITERS,
        )?;
        if let Some(kg) = self.equipment.dumbbell_max_kg {
            check_range("dumbbell_max_kg", kg, 0.0, 100.0)?;
        }
        check_ingredient_list("excluded_ingredients", &self.dietary.excluded_ingredients)?;
        check_ingredient_list("liked_ingredients", &self.dietary.liked_ingredients)?;
        check_ingredient_list("allergies", &self.health.allergies)?;
        check_ingredient_list("intolerances", &self.health.intolerances)?;
        Ok(())
    }

    /// Excluded ingredients merged with allergies and intolerances, lowercased
    #[must_use]
    pub fn excluded_ingredients(&self) -> Vec<String> {
        let mut excluded: Vec<String> = self
            .dietary
            .excluded_ingredients
            .iter()
            .chain(&self.health.allergies)
            .chain(&self.health.intolerances)
            .map(|s| s.trim().to_lowercase())
            .collect();
        excluded.sort();
        excluded.dedup();
        excluded
    }

    /// Whether cholesterol-friendly recipes should be favored
    #[must_use]
    pub fn wants_cholesterol_friendly(&self) -> bool {
        self.dietary.cholesterol_friendly || self.health.has_lipid_risk()
    }

    /// Whether the user is trying to lose weight
    #[must_use]
    pub fn is_losing_weight(&self) -> bool {
        self.goal_weight_kg < self.weight_kg
    }
}

pub(super) fn check_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::value_out_of_range(field, value, min, max))
    }
}

fn check_ingredient_list(field: &str, items: &[String]) -> AppResult<()> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let normalized = item.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AppError::invalid_input(format!(
                "{field} contains a blank entry"
            )));
        }
        if seen.contains(&normalized) {
            return Err(AppError::invalid_input(format!(
                "{field} lists '{normalized}' more than once"
            )));
        }
        seen.push(normalized);
    }
    Ok(())
}
