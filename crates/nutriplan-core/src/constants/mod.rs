// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for energy, profile limits, and scheduling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Fixed physiological and nutritional constants. Tunable thresholds live in the
//! planner's configuration tables instead; the values here never change.

/// Energy density of macronutrients (Atwater factors)
pub mod energy {
    /// Kilocalories per gram of protein
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Kilocalories per gram of carbohydrate
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// Kilocalories per gram of fat
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Mifflin-St Jeor (1990) coefficients
pub mod mifflin_st_jeor {
    /// Weight coefficient (kcal per kg)
    pub const WEIGHT_COEF: f64 = 10.0;
    /// Height coefficient (kcal per cm)
    pub const HEIGHT_COEF: f64 = 6.25;
    /// Age coefficient (kcal per year)
    pub const AGE_COEF: f64 = -5.0;
    /// Male constant
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// Plausible human ranges accepted by profile validation
pub mod profile_limits {
    /// Minimum supported age in years
    pub const MIN_AGE: u32 = 14;
    /// Maximum supported age in years
    pub const MAX_AGE: u32 = 100;
    /// Minimum height in centimeters
    pub const MIN_HEIGHT_CM: f64 = 120.0;
    /// Maximum height in centimeters
    pub const MAX_HEIGHT_CM: f64 = 230.0;
    /// Minimum body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 35.0;
    /// Maximum body weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 300.0;
    /// Maximum daily water target in liters
    pub const MAX_WATER_LITERS: f64 = 8.0;
}

/// Lipid panel thresholds (mg/dL) that activate cholesterol-friendly planning
pub mod lipids {
    /// LDL above this is elevated
    pub const LDL_HIGH_MG_DL: f64 = 130.0;
    /// HDL below this is low
    pub const HDL_LOW_MG_DL: f64 = 40.0;
    /// Triglycerides above this are elevated
    pub const TRIGLYCERIDES_HIGH_MG_DL: f64 = 150.0;
}

/// Calendar-related constants
pub mod time {
    /// Days in the rolling analysis window
    pub const WEEK_DAYS: i64 = 7;
    /// Grams in a kilogram
    pub const GRAMS_PER_KG: f64 = 1000.0;
    /// Average egg weight in grams, used for dozen counts
    pub const EGG_WEIGHT_G: f64 = 50.0;
}
