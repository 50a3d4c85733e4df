// ABOUTME: Meal plan-day records produced by the meal planner
// ABOUTME: Defines MealSlot, Meal, DailyTargets, DayTemplateKind and plan validation results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::food::NutritionFacts;
use super::recipe::MealCategory;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Slot of a day template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast slot
    Breakfast,
    /// Lunch slot
    Lunch,
    /// Afternoon snack slot
    Snack,
    /// Recovery snack after training
    PostWorkout,
    /// Dinner slot
    Dinner,
}

impl MealSlot {
    /// Recipe category that may fill this slot
    #[must_use]
    pub const fn category(&self) -> MealCategory {
        match self {
            Self::Breakfast => MealCategory::Breakfast,
            Self::Lunch => MealCategory::Lunch,
            Self::Snack | Self::PostWorkout => MealCategory::Snack,
            Self::Dinner => MealCategory::Dinner,
        }
    }
}

/// Which day template produced a plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayTemplateKind {
    /// Four meals plus post-workout allowance
    Normal,
    /// No breakfast
    Fasting,
    /// Three meals only
    Simple,
}

/// Daily calorie and macro targets a plan was built against
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyTargets {
    /// Calorie target (kcal)
    pub calories: f64,
    /// Protein target (g)
    pub protein_g: f64,
    /// Fat target (g)
    pub fat_g: f64,
    /// Carbohydrate target (g)
    pub carbs_g: f64,
}

/// One scheduled meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Slot filled
    pub slot: MealSlot,
    /// Recipe reference
    pub recipe_id: String,
    /// Recipe name for display
    pub recipe_name: String,
    /// Portion multiplier (quarter steps in [0.5, 2.0])
    pub portions: f64,
    /// Scheduled time of day
    pub scheduled_time: NaiveTime,
    /// Calorie target of the slot
    pub slot_target_calories: f64,
    /// Scaled nutrition, rounded to whole units
    pub nutrition: NutritionFacts,
    /// Set by the user-facing layer
    pub completed: bool,
}

/// Reason a generated day failed validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum PlanIssue {
    /// Total calories off target by more than the tolerance
    CalorieDeviation {
        /// Signed relative deviation
        deviation: f64,
    },
    /// Protein below the required share of its target
    ProteinShortfall {
        /// Achieved share of the protein target
        ratio: f64,
    },
    /// Too few meals produced
    TooFewMeals {
        /// Meals produced
        count: usize,
    },
}

/// Outcome of validating a generated day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanValidation {
    /// Whether the day passed every check
    pub is_valid: bool,
    /// Every failed check
    pub issues: Vec<PlanIssue>,
}

/// A generated day of meals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlanDay {
    /// Plan date
    pub date: NaiveDate,
    /// Template used
    pub template: DayTemplateKind,
    /// Whether the day includes training
    pub training_day: bool,
    /// Targets used for generation
    pub targets: DailyTargets,
    /// Meals in schedule order
    pub meals: Vec<Meal>,
    /// Aggregated nutrition
    pub totals: NutritionFacts,
    /// Validation outcome
    pub validation: PlanValidation,
}

impl MealPlanDay {
    /// Meal adherence: completed over total meals, 0-100
    #[must_use]
    pub fn adherence_score(&self) -> u8 {
        if self.meals.is_empty() {
            return 0;
        }
        let completed = self.meals.iter().filter(|m| m.completed).count();
        let ratio = completed as f64 / self.meals.len() as f64;
        (ratio * 100.0).round() as u8
    }

    /// Protein eaten according to completion flags
    #[must_use]
    pub fn completed_protein_g(&self) -> f64 {
        self.meals
            .iter()
            .filter(|m| m.completed)
            .map(|m| m.nutrition.protein_g)
            .sum()
    }
}
