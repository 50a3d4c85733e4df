// ABOUTME: Recipe catalog records with tagged vocabulary and per-portion nutrition
// ABOUTME: Defines Recipe, RecipeIngredient, MealCategory, RecipeTag and data-quality checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::food::NutritionFacts;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default tolerance between stated calories and calories implied by macros
pub const NUTRITION_TOLERANCE: f64 = 0.15;

/// Recipe category; a recipe only fills slots of its own category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Small meal between main meals (also used after training)
    Snack,
    /// Evening meal
    Dinner,
}

/// Fixed tag vocabulary attached to recipes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecipeTag {
    /// Cooked without oil
    #[serde(rename = "sin_aceite", alias = "no_oil")]
    NoOil,
    /// No added sugar
    #[serde(rename = "sin_azucar", alias = "no_sugar")]
    NoSugar,
    /// High protein per portion
    #[serde(rename = "alta_proteina", alias = "high_protein")]
    HighProtein,
    /// Cheap ingredients
    #[serde(rename = "economica", alias = "budget")]
    Budget,
    /// Keeps well when cooked in bulk
    #[serde(rename = "batch_cooking", alias = "batch_cookable")]
    BatchCookable,
    /// Low saturated fat and cholesterol
    #[serde(rename = "colesterol_friendly", alias = "cholesterol_friendly")]
    CholesterolFriendly,
    /// No meat or fish
    #[serde(rename = "vegetariana", alias = "vegetarian")]
    Vegetarian,
    /// Ready in 15 minutes or less
    #[serde(rename = "rapida", alias = "quick")]
    Quick,
}

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    /// Reference to a `FoodItem` id
    pub food_id: String,
    /// Grams per portion
    pub grams: f64,
    /// Optional preparation note ("diced", "to taste")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Immutable recipe record supplied by the catalog provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Meal category
    pub category: MealCategory,
    /// Ordered ingredient list (amounts per portion)
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Nutrition per portion
    pub nutrition: NutritionFacts,
    /// Tags from the fixed vocabulary
    #[serde(default)]
    pub tags: Vec<RecipeTag>,
    /// Estimated cost per portion in local currency
    pub estimated_cost: f64,
    /// Preparation time in minutes
    pub prep_time_min: u32,
    /// Cooking time in minutes
    pub cook_time_min: u32,
}

impl Recipe {
    /// Whether the recipe carries a tag
    #[must_use]
    pub fn has_tag(&self, tag: RecipeTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Preparation plus cooking time
    #[must_use]
    pub const fn total_time_min(&self) -> u32 {
        self.prep_time_min.saturating_add(self.cook_time_min)
    }

    /// Grams of a food used per portion, zero when absent
    #[must_use]
    pub fn grams_of(&self, food_id: &str) -> f64 {
        self.ingredients
            .iter()
            .filter(|i| i.food_id == food_id)
            .map(|i| i.grams)
            .sum()
    }

    /// Relative gap between stated calories and calories implied by macros
    #[must_use]
    pub fn nutrition_discrepancy(&self) -> f64 {
        let stated = self.nutrition.calories;
        if stated <= 0.0 {
            return f64::INFINITY;
        }
        (self.nutrition.calories_from_macros() - stated).abs() / stated
    }

    /// Check that macro grams reconcile with stated calories
    ///
    /// # Errors
    ///
    /// Returns `InconsistentNutrition` when the discrepancy exceeds `tolerance`
    /// or the stated calories are not positive.
    pub fn check_nutrition_consistency(&self, tolerance: f64) -> AppResult<()> {
        let discrepancy = self.nutrition_discrepancy();
        if discrepancy > tolerance {
            return Err(AppError::inconsistent_nutrition(format!(
                "Recipe '{}' states {:.0} kcal but its macros add up to {:.0} kcal",
                self.id,
                self.nutrition.calories,
                self.nutrition.calories_from_macros()
            ))
            .with_resource_id(self.id.clone()));
        }
        Ok(())
    }
}
