// ABOUTME: Food reference data with per-100g nutrition, price and seasonality
// ABOUTME: Defines FoodItem and the NutritionFacts record shared with recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::energy::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use serde::{Deserialize, Serialize};

/// Energy and macronutrient amounts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionFacts {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
}

impl NutritionFacts {
    /// Energy implied by the macronutrients (4/9/4 kcal per gram)
    #[must_use]
    pub fn calories_from_macros(&self) -> f64 {
        self.fat_g.mul_add(
            KCAL_PER_G_FAT,
            self.protein_g
                .mul_add(KCAL_PER_G_PROTEIN, self.carbs_g * KCAL_PER_G_CARBS),
        )
    }

    /// Multiply every amount by a portion factor, rounding to whole units
    #[must_use]
    pub fn scaled_rounded(&self, factor: f64) -> Self {
        Self {
            calories: (self.calories * factor).round(),
            protein_g: (self.protein_g * factor).round(),
            fat_g: (self.fat_g * factor).round(),
            carbs_g: (self.carbs_g * factor).round(),
        }
    }

    /// Component-wise sum
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            fat_g: self.fat_g + other.fat_g,
            carbs_g: self.carbs_g + other.carbs_g,
        }
    }
}

/// Immutable food reference record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Stable identifier (e.g. `chicken_breast`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Nutrition per 100 g
    pub nutrition_per_100g: NutritionFacts,
    /// Price per kilogram in local currency
    pub cost_per_kg: f64,
    /// Months (1-12) in which a seasonal discount applies
    #[serde(default)]
    pub seasonal_months: Vec<u32>,
}

impl FoodItem {
    /// Whether the seasonal discount applies in the given month
    #[must_use]
    pub fn is_in_season(&self, month: u32) -> bool {
        self.seasonal_months.contains(&month)
    }

    /// Whether the id or name mentions a term (case-insensitive)
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term) || self.name.to_lowercase().contains(&term)
    }
}
