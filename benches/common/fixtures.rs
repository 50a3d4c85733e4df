// ABOUTME: Benchmark fixtures generating synthetic but consistent planning catalogs
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures.
//!
//! Every generated recipe states exactly the calories its macros imply, so the
//! catalog always passes data-quality validation.

use chrono::{TimeZone, Utc};
use nutriplan::models::{
    ActivityLevel, BlockParams, BlockPhase, BudgetTier, DietaryPreferences, EquipmentInventory,
    ExerciseBlock, FitnessLevel, FoodItem, HealthFlags, MealCategory, NutritionFacts,
    PersonalRecords, Recipe, RecipeIngredient, RecipeTag, Sex, StaticCatalog, StrengthExercise,
    UserProfile, WorkoutCategory, WorkoutPreferences, WorkoutTemplate, NUTRITION_TOLERANCE,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Predefined catalog sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum CatalogSize {
    /// 10 recipes per category
    Small,
    /// 100 recipes per category
    Large,
}

impl CatalogSize {
    #[must_use]
    pub const fn recipes_per_category(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Large => 100,
        }
    }
}

const FOOD_IDS: [&str; 8] = [
    "chicken_breast",
    "eggs",
    "salmon",
    "lentils",
    "rice",
    "oats",
    "broccoli",
    "tomato",
];

fn foods() -> Vec<FoodItem> {
    FOOD_IDS
        .iter()
        .enumerate()
        .map(|(index, id)| FoodItem {
            id: (*id).to_owned(),
            name: id.replace('_', " "),
            nutrition_per_100g: NutritionFacts::default(),
            cost_per_kg: 2000.0 + 1500.0 * index as f64,
            seasonal_months: if index % 3 == 0 { vec![3, 4, 5] } else { Vec::new() },
        })
        .collect()
}

fn generate_recipe(category: MealCategory, index: usize) -> Recipe {
    let protein = 10.0 + (index * 7 % 50) as f64;
    let fat = 4.0 + (index * 3 % 25) as f64;
    let carbs = 15.0 + (index * 11 % 90) as f64;
    let calories = 4.0f64.mul_add(protein + carbs, 9.0 * fat);

    let tags: Vec<RecipeTag> = [
        RecipeTag::NoOil,
        RecipeTag::Budget,
        RecipeTag::HighProtein,
        RecipeTag::BatchCookable,
        RecipeTag::CholesterolFriendly,
    ]
    .into_iter()
    .enumerate()
    .filter(|(bit, _)| (index >> bit) & 1 == 1)
    .map(|(_, tag)| tag)
    .collect();

    Recipe {
        id: format!("{category:?}_{index}").to_lowercase(),
        name: format!("{category:?} recipe {index}"),
        category,
        ingredients: (0..3)
            .map(|offset| RecipeIngredient {
                food_id: FOOD_IDS[(index + offset * 3) % FOOD_IDS.len()].to_owned(),
                grams: 50.0 + (index * 13 % 150) as f64,
                note: None,
            })
            .collect(),
        steps: Vec::new(),
        nutrition: NutritionFacts {
            calories,
            protein_g: protein,
            fat_g: fat,
            carbs_g: carbs,
        },
        tags,
        estimated_cost: 500.0 + (index * 97 % 3000) as f64,
        prep_time_min: 5 + (index % 4) as u32 * 5,
        cook_time_min: (index % 5) as u32 * 5,
    }
}

fn bodyweight_template() -> WorkoutTemplate {
    let strength = |name: &str, exercise, reps, hold_s| ExerciseBlock {
        name: name.to_owned(),
        phase: BlockPhase::Main,
        params: BlockParams::Strength {
            exercise,
            sets: 3,
            reps,
            hold_s,
            load_kg: None,
            rest_s: 60,
        },
    };
    WorkoutTemplate {
        id: "bodyweight".to_owned(),
        name: "Bodyweight".to_owned(),
        category: WorkoutCategory::Mixed,
        required_equipment: Vec::new(),
        fitness_levels: vec![FitnessLevel::Beginner, FitnessLevel::Intermediate],
        blocks: vec![
            strength("Push-ups", StrengthExercise::PushUp, Some(10), None),
            strength("Sit-ups", StrengthExercise::SitUp, Some(15), None),
            strength("Plank", StrengthExercise::Plank, None, Some(30)),
        ],
    }
}

/// Consistent catalog of the requested size
#[must_use]
pub fn generate_catalog(size: CatalogSize) -> StaticCatalog {
    let recipes = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Snack,
        MealCategory::Dinner,
    ]
    .into_iter()
    .flat_map(|category| {
        (0..size.recipes_per_category()).map(move |index| generate_recipe(category, index))
    })
    .collect();

    StaticCatalog::new(
        recipes,
        foods(),
        vec![bodyweight_template()],
        NUTRITION_TOLERANCE,
    )
    .unwrap_or_default()
}

#[must_use]
pub fn bench_profile() -> UserProfile {
    UserProfile {
        id: Uuid::nil(),
        name: "Bench".to_owned(),
        sex: Sex::Female,
        age: 32,
        height_cm: 168.0,
        weight_kg: 72.0,
        goal_weight_kg: 65.0,
        target_date: None,
        activity_level: ActivityLevel::ModeratelyActive,
        budget_tier: BudgetTier::Medium,
        water_target_liters: 2.0,
        dietary: DietaryPreferences::default(),
        equipment: EquipmentInventory::default(),
        workout: WorkoutPreferences::default(),
        health: HealthFlags::default(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default(),
    }
}

#[must_use]
pub fn bench_records() -> PersonalRecords {
    PersonalRecords {
        max_pushups: 18,
        max_situps: 25,
        plank_hold_s: 60,
        run_speed_kmh: 8.5,
        run_duration_min: 20.0,
        max_loads_kg: BTreeMap::new(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default(),
    }
}
