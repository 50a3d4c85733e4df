// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Provides a small consistent catalog, sample profiles and quiet logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::unwrap_used
)]
//! Shared test utilities for `nutriplan`
//!
//! Every recipe's stated calories reconcile with its macros, so the catalog
//! passes data-quality validation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use nutriplan::models::{
    ActivityLevel, BlockParams, BlockPhase, BudgetTier, DailyTargets, DayTemplateKind,
    DietaryPreferences, Equipment, EquipmentInventory, ExerciseBlock, FitnessLevel, FoodItem,
    HealthFlags, Meal, MealCategory, MealPlanDay, MealSlot, NutritionFacts, PersonalRecords,
    PlanValidation, Recipe, RecipeIngredient, RecipeTag, Sex, StaticCatalog, StrengthExercise,
    UserProfile, WorkoutCategory, WorkoutPreferences, WorkoutTemplate, NUTRITION_TOLERANCE,
};
use std::collections::BTreeMap;
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

fn food(id: &str, name: &str, per_100g: (f64, f64, f64, f64), cost_per_kg: f64) -> FoodItem {
    FoodItem {
        id: id.to_owned(),
        name: name.to_owned(),
        nutrition_per_100g: NutritionFacts {
            calories: per_100g.0,
            protein_g: per_100g.1,
            fat_g: per_100g.2,
            carbs_g: per_100g.3,
        },
        cost_per_kg,
        seasonal_months: Vec::new(),
    }
}

pub fn foods() -> Vec<FoodItem> {
    let mut broccoli = food("broccoli", "Broccoli", (34.0, 2.8, 0.4, 7.0), 3000.0);
    broccoli.seasonal_months = vec![3, 4, 5];
    vec![
        food("chicken_breast", "Chicken breast", (165.0, 31.0, 3.6, 0.0), 6000.0),
        food("eggs", "Eggs", (155.0, 13.0, 11.0, 1.1), 4000.0),
        food("oats", "Rolled oats", (389.0, 16.9, 6.9, 66.0), 2500.0),
        food("rice", "Brown rice", (112.0, 2.6, 0.9, 23.0), 2200.0),
        broccoli,
        food("olive_oil", "Olive oil", (884.0, 0.0, 100.0, 0.0), 12000.0),
        food("salmon", "Salmon", (208.0, 20.0, 13.0, 0.0), 18000.0),
        food("lentils", "Lentils", (116.0, 9.0, 0.4, 20.0), 2800.0),
        food("greek_yogurt", "Greek yogurt", (97.0, 9.0, 5.0, 3.6), 5000.0),
        food("banana", "Banana", (89.0, 1.1, 0.3, 23.0), 1800.0),
        food("tomato", "Tomato", (18.0, 0.9, 0.2, 3.9), 2000.0),
    ]
}

pub struct RecipeDef<'a> {
    pub id: &'a str,
    pub category: MealCategory,
    pub ingredients: &'a [(&'a str, f64)],
    /// calories, protein, fat, carbs
    pub nutrition: (f64, f64, f64, f64),
    pub tags: &'a [RecipeTag],
    pub cost: f64,
    pub prep_min: u32,
    pub cook_min: u32,
}

pub fn recipe(def: &RecipeDef<'_>) -> Recipe {
    Recipe {
        id: def.id.to_owned(),
        name: def.id.replace('_', " "),
        category: def.category,
        ingredients: def
            .ingredients
            .iter()
            .map(|(food_id, grams)| RecipeIngredient {
                food_id: (*food_id).to_owned(),
                grams: *grams,
                note: None,
            })
            .collect(),
        steps: vec!["Prepare".to_owned(), "Serve".to_owned()],
        nutrition: NutritionFacts {
            calories: def.nutrition.0,
            protein_g: def.nutrition.1,
            fat_g: def.nutrition.2,
            carbs_g: def.nutrition.3,
        },
        tags: def.tags.to_vec(),
        estimated_cost: def.cost,
        prep_time_min: def.prep_min,
        cook_time_min: def.cook_min,
    }
}

pub fn recipes() -> Vec<Recipe> {
    use MealCategory::{Breakfast, Dinner, Lunch, Snack};
    use RecipeTag::{
        BatchCookable, Budget, CholesterolFriendly, HighProtein, NoOil, NoSugar, Quick, Vegetarian,
    };

    let specs = [
        RecipeDef {
            id: "oat_porridge",
            category: Breakfast,
            ingredients: &[("oats", 80.0), ("banana", 100.0)],
            nutrition: (420.0, 15.0, 8.0, 72.0),
            tags: &[NoOil, Budget, Quick],
            cost: 500.0,
            prep_min: 5,
            cook_min: 5,
        },
        RecipeDef {
            id: "egg_scramble",
            category: Breakfast,
            ingredients: &[("eggs", 150.0), ("tomato", 80.0), ("olive_oil", 10.0)],
            nutrition: (380.0, 22.0, 30.0, 6.0),
            tags: &[HighProtein, Quick],
            cost: 900.0,
            prep_min: 5,
            cook_min: 10,
        },
        RecipeDef {
            id: "yogurt_bowl",
            category: Breakfast,
            ingredients: &[("greek_yogurt", 200.0), ("oats", 40.0), ("banana", 60.0)],
            nutrition: (400.0, 26.0, 8.0, 56.0),
            tags: &[NoOil, NoSugar, HighProtein, Quick],
            cost: 1200.0,
            prep_min: 5,
            cook_min: 0,
        },
        RecipeDef {
            id: "chicken_rice_bowl",
            category: Lunch,
            ingredients: &[("chicken_breast", 200.0), ("rice", 150.0), ("broccoli", 100.0)],
            nutrition: (650.0, 55.0, 10.0, 85.0),
            tags: &[NoOil, HighProtein, BatchCookable, Budget],
            cost: 2000.0,
            prep_min: 10,
            cook_min: 20,
        },
        RecipeDef {
            id: "salmon_salad",
            category: Lunch,
            ingredients: &[("salmon", 150.0), ("tomato", 150.0), ("olive_oil", 10.0)],
            nutrition: (560.0, 35.0, 40.0, 15.0),
            tags: &[HighProtein, CholesterolFriendly],
            cost: 3500.0,
            prep_min: 15,
            cook_min: 10,
        },
        RecipeDef {
            id: "lentil_stew",
            category: Lunch,
            ingredients: &[("lentils", 120.0), ("tomato", 150.0), ("broccoli", 80.0)],
            nutrition: (600.0, 32.0, 6.0, 104.0),
            tags: &[NoOil, NoSugar, Budget, BatchCookable, Vegetarian, CholesterolFriendly],
            cost: 900.0,
            prep_min: 10,
            cook_min: 35,
        },
        RecipeDef {
            id: "yogurt_banana",
            category: Snack,
            ingredients: &[("greek_yogurt", 150.0), ("banana", 100.0)],
            nutrition: (240.0, 16.0, 4.0, 36.0),
            tags: &[NoOil, NoSugar, Quick],
            cost: 800.0,
            prep_min: 5,
            cook_min: 0,
        },
        RecipeDef {
            id: "boiled_eggs",
            category: Snack,
            ingredients: &[("eggs", 100.0)],
            nutrition: (155.0, 13.0, 11.0, 1.0),
            tags: &[NoOil, NoSugar, HighProtein, Quick, Budget],
            cost: 400.0,
            prep_min: 2,
            cook_min: 10,
        },
        RecipeDef {
            id: "chicken_broccoli_bake",
            category: Dinner,
            ingredients: &[("chicken_breast", 220.0), ("broccoli", 200.0)],
            nutrition: (480.0, 58.0, 10.0, 30.0),
            tags: &[NoOil, NoSugar, HighProtein, BatchCookable, CholesterolFriendly],
            cost: 2300.0,
            prep_min: 10,
            cook_min: 20,
        },
        RecipeDef {
            id: "grilled_chicken",
            category: Dinner,
            ingredients: &[("chicken_breast", 200.0)],
            nutrition: (330.0, 62.0, 7.0, 0.0),
            tags: &[NoOil, NoSugar, HighProtein, Quick],
            cost: 1200.0,
            prep_min: 5,
            cook_min: 15,
        },
        RecipeDef {
            id: "salmon_rice",
            category: Dinner,
            ingredients: &[("salmon", 150.0), ("rice", 120.0), ("olive_oil", 5.0)],
            nutrition: (620.0, 38.0, 22.0, 68.0),
            tags: &[HighProtein, CholesterolFriendly],
            cost: 4200.0,
            prep_min: 10,
            cook_min: 20,
        },
        RecipeDef {
            id: "egg_fried_rice",
            category: Dinner,
            ingredients: &[("eggs", 100.0), ("rice", 150.0), ("olive_oil", 15.0)],
            nutrition: (520.0, 18.0, 25.0, 58.0),
            tags: &[Budget, Quick],
            cost: 700.0,
            prep_min: 5,
            cook_min: 10,
        },
    ];
    specs.iter().map(recipe).collect()
}

fn block(name: &str, phase: BlockPhase, params: BlockParams) -> ExerciseBlock {
    ExerciseBlock {
        name: name.to_owned(),
        phase,
        params,
    }
}

fn basic(name: &str, phase: BlockPhase, minutes: f64) -> ExerciseBlock {
    block(
        name,
        phase,
        BlockParams::Basic {
            description: name.to_owned(),
            duration_min: minutes,
        },
    )
}

pub fn templates() -> Vec<WorkoutTemplate> {
    vec![
        WorkoutTemplate {
            id: "bodyweight_basics".to_owned(),
            name: "Bodyweight basics".to_owned(),
            category: WorkoutCategory::Mixed,
            required_equipment: Vec::new(),
            fitness_levels: vec![FitnessLevel::Beginner, FitnessLevel::Intermediate],
            blocks: vec![
                basic("March in place", BlockPhase::Warmup, 5.0),
                block(
                    "Push-ups",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::PushUp,
                        sets: 3,
                        reps: Some(10),
                        hold_s: None,
                        load_kg: None,
                        rest_s: 60,
                    },
                ),
                block(
                    "Squats",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::Squat,
                        sets: 3,
                        reps: Some(12),
                        hold_s: None,
                        load_kg: None,
                        rest_s: 60,
                    },
                ),
                block(
                    "Plank",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::Plank,
                        sets: 3,
                        reps: None,
                        hold_s: Some(30),
                        load_kg: None,
                        rest_s: 45,
                    },
                ),
                basic("Stretching", BlockPhase::Cooldown, 5.0),
            ],
        },
        WorkoutTemplate {
            id: "treadmill_intervals".to_owned(),
            name: "Treadmill intervals".to_owned(),
            category: WorkoutCategory::Cardio,
            required_equipment: vec![Equipment::Treadmill],
            fitness_levels: vec![FitnessLevel::Intermediate, FitnessLevel::Advanced],
            blocks: vec![
                basic("Brisk walk", BlockPhase::Warmup, 5.0),
                block(
                    "Steady run",
                    BlockPhase::Main,
                    BlockParams::Run {
                        speed_kmh: 9.0,
                        duration_min: 20.0,
                        incline_pct: 1.0,
                    },
                ),
                block(
                    "Sprints",
                    BlockPhase::Main,
                    BlockParams::Interval {
                        exercise: "sprint".to_owned(),
                        work_s: 30,
                        rest_s: 30,
                        rounds: 8,
                    },
                ),
                basic("Walk", BlockPhase::Cooldown, 5.0),
            ],
        },
        WorkoutTemplate {
            id: "dumbbell_strength".to_owned(),
            name: "Dumbbell strength".to_owned(),
            category: WorkoutCategory::Strength,
            required_equipment: vec![Equipment::Dumbbells],
            fitness_levels: vec![FitnessLevel::Intermediate, FitnessLevel::Advanced],
            blocks: vec![
                basic("Arm circles", BlockPhase::Warmup, 5.0),
                block(
                    "Dumbbell row",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::DumbbellRow,
                        sets: 4,
                        reps: Some(10),
                        hold_s: None,
                        load_kg: Some(10.0),
                        rest_s: 90,
                    },
                ),
                block(
                    "Dumbbell press",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::DumbbellPress,
                        sets: 4,
                        reps: Some(10),
                        hold_s: None,
                        load_kg: Some(12.0),
                        rest_s: 90,
                    },
                ),
                block(
                    "Sit-ups",
                    BlockPhase::Main,
                    BlockParams::Strength {
                        exercise: StrengthExercise::SitUp,
                        sets: 3,
                        reps: Some(15),
                        hold_s: None,
                        load_kg: None,
                        rest_s: 45,
                    },
                ),
                basic("Stretching", BlockPhase::Cooldown, 5.0),
            ],
        },
        WorkoutTemplate {
            id: "jump_rope_hiit".to_owned(),
            name: "Jump rope HIIT".to_owned(),
            category: WorkoutCategory::Cardio,
            required_equipment: vec![Equipment::JumpRope],
            fitness_levels: vec![
                FitnessLevel::Beginner,
                FitnessLevel::Intermediate,
                FitnessLevel::Advanced,
            ],
            blocks: vec![
                basic("Skip slowly", BlockPhase::Warmup, 3.0),
                block(
                    "Jump rope",
                    BlockPhase::Main,
                    BlockParams::Interval {
                        exercise: "jump rope".to_owned(),
                        work_s: 40,
                        rest_s: 20,
                        rounds: 10,
                    },
                ),
                basic("Stretching", BlockPhase::Cooldown, 3.0),
            ],
        },
    ]
}

pub fn catalog() -> StaticCatalog {
    StaticCatalog::new(recipes(), foods(), templates(), NUTRITION_TOLERANCE).unwrap()
}

// ============================================================================
// Profiles and records
// ============================================================================

/// Female, 28 years, 165 cm, 70 kg aiming for 62 kg; basal rate 1430 kcal
pub fn female_profile() -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        name: "Ana".to_owned(),
        sex: Sex::Female,
        age: 28,
        height_cm: 165.0,
        weight_kg: 70.0,
        goal_weight_kg: 62.0,
        target_date: None,
        activity_level: ActivityLevel::LightlyActive,
        budget_tier: BudgetTier::Medium,
        water_target_liters: 2.0,
        dietary: DietaryPreferences::default(),
        equipment: EquipmentInventory::default(),
        workout: WorkoutPreferences::default(),
        health: HealthFlags::default(),
        created_at: timestamp(2025, 1, 1),
    }
}

/// Male, 35 years, 180 cm, 85 kg aiming for 78 kg on a low budget
pub fn male_profile() -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        name: "Bruno".to_owned(),
        sex: Sex::Male,
        age: 35,
        height_cm: 180.0,
        weight_kg: 85.0,
        goal_weight_kg: 78.0,
        target_date: None,
        activity_level: ActivityLevel::ModeratelyActive,
        budget_tier: BudgetTier::Low,
        water_target_liters: 2.5,
        dietary: DietaryPreferences::default(),
        equipment: EquipmentInventory {
            treadmill: true,
            dumbbell_max_kg: Some(20.0),
            jump_rope: true,
            mat: true,
            resistance_bands: false,
        },
        workout: WorkoutPreferences::default(),
        health: HealthFlags::default(),
        created_at: timestamp(2025, 1, 1),
    }
}

pub fn beginner_records() -> PersonalRecords {
    PersonalRecords {
        max_pushups: 10,
        max_situps: 15,
        plank_hold_s: 40,
        run_speed_kmh: 7.0,
        run_duration_min: 10.0,
        max_loads_kg: BTreeMap::new(),
        updated_at: timestamp(2025, 1, 1),
    }
}

pub fn intermediate_records() -> PersonalRecords {
    PersonalRecords {
        max_pushups: 20,
        max_situps: 30,
        plank_hold_s: 60,
        run_speed_kmh: 9.0,
        run_duration_min: 20.0,
        max_loads_kg: BTreeMap::from([
            ("dumbbell_row".to_owned(), 20.0),
            ("dumbbell_press".to_owned(), 30.0),
        ]),
        updated_at: timestamp(2025, 1, 1),
    }
}

// ============================================================================
// Hand-built plan days
// ============================================================================

/// A meal referencing a catalog recipe, nutrition scaled by portions
pub fn meal(recipe_id: &str, portions: f64, completed: bool) -> Meal {
    let catalog_recipes = recipes();
    let recipe = catalog_recipes.iter().find(|r| r.id == recipe_id).unwrap();
    Meal {
        slot: match recipe.category {
            MealCategory::Breakfast => MealSlot::Breakfast,
            MealCategory::Lunch => MealSlot::Lunch,
            MealCategory::Snack => MealSlot::Snack,
            MealCategory::Dinner => MealSlot::Dinner,
        },
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        portions,
        scheduled_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        slot_target_calories: recipe.nutrition.calories * portions,
        nutrition: recipe.nutrition.scaled_rounded(portions),
        completed,
    }
}

pub fn plan_day(date: NaiveDate, protein_target_g: f64, meals: Vec<Meal>) -> MealPlanDay {
    let totals = meals
        .iter()
        .fold(NutritionFacts::default(), |acc, m| acc.plus(&m.nutrition));
    MealPlanDay {
        date,
        template: DayTemplateKind::Normal,
        training_day: false,
        targets: DailyTargets {
            calories: 1800.0,
            protein_g: protein_target_g,
            fat_g: 50.0,
            carbs_g: 200.0,
        },
        meals,
        totals,
        validation: PlanValidation::default(),
    }
}
