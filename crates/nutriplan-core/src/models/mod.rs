// ABOUTME: Core data models exchanged between the planners and their collaborators
// ABOUTME: Re-exports profile, food, recipe, workout, plan, shopping and progress records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain records matching what the catalog and persistence collaborators hand
//! to the planners and store afterwards. Reference data (recipes, foods,
//! templates) is immutable; plan records are created fresh by each generation
//! call and only their completion flags are later touched by the user-facing
//! layer.

mod catalog;
mod food;
mod meal_plan;
mod profile;
mod progress;
mod recipe;
mod shopping;
mod workout;

pub use catalog::{CatalogProvider, StaticCatalog};
pub use food::{FoodItem, NutritionFacts};
pub use meal_plan::{
    DailyTargets, DayTemplateKind, Meal, MealPlanDay, MealSlot, PlanIssue, PlanValidation,
};
pub use profile::{
    ActivityLevel, BudgetTier, DietaryPreferences, Equipment, EquipmentInventory, HealthFlags,
    ProteinPreference, Sex, UserProfile, WorkoutCategory, WorkoutPreferences,
};
pub use progress::{
    AdherenceBreakdown, Adjustment, AdjustmentOutcome, Measurement, ProgressReport, ProgressRule,
    ProgressSuggestion, WaterLog, WeightTrend,
};
pub use recipe::{MealCategory, Recipe, RecipeIngredient, RecipeTag, NUTRITION_TOLERANCE};
pub use shopping::{
    BatchCookingSuggestion, ItemPriority, ShoppingItem, ShoppingList, StoreGroup, StoreMode,
    StoreSubtotal,
};
pub use workout::{
    BlockKind, BlockParams, BlockPhase, ExerciseBlock, FitnessLevel, IntensityBand,
    PersonalRecords, ProgressedBlock, RecordMetric, StrengthExercise, WorkoutPlanDay,
    WorkoutTemplate, SECONDS_PER_REP,
};
