// ABOUTME: Catalog provider seam supplying immutable recipes, foods and workout templates
// ABOUTME: StaticCatalog validates data quality once at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::food::FoodItem;
use super::recipe::Recipe;
use super::workout::WorkoutTemplate;
use crate::errors::{AppError, AppResult, ErrorCode};
use std::collections::{BTreeMap, HashSet};

/// Read-only source of reference data; the planners never write back
pub trait CatalogProvider {
    /// All recipes
    fn recipes(&self) -> &[Recipe];

    /// All foods
    fn foods(&self) -> &[FoodItem];

    /// All workout templates
    fn workout_templates(&self) -> &[WorkoutTemplate];

    /// Look up a food by id
    fn food(&self, id: &str) -> Option<&FoodItem> {
        self.foods().iter().find(|f| f.id == id)
    }

    /// Look up a recipe by id
    fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes().iter().find(|r| r.id == id)
    }
}

/// In-memory catalog loaded once by the host
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    recipes: Vec<Recipe>,
    foods: Vec<FoodItem>,
    food_index: BTreeMap<String, usize>,
    templates: Vec<WorkoutTemplate>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting records that contradict themselves
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for duplicate ids or ingredients referencing unknown foods
    /// - `InconsistentNutrition` when recipes' macros do not reconcile with their
    ///   calories within `tolerance`; every offending recipe id is listed in the
    ///   error details
    pub fn new(
        recipes: Vec<Recipe>,
        foods: Vec<FoodItem>,
        templates: Vec<WorkoutTemplate>,
        tolerance: f64,
    ) -> AppResult<Self> {
        let mut food_index = BTreeMap::new();
        for (idx, food) in foods.iter().enumerate() {
            if food_index.insert(food.id.clone(), idx).is_some() {
                return Err(duplicate("food", &food.id));
            }
        }

        let mut recipe_ids = HashSet::new();
        let mut inconsistent = Vec::new();
        for recipe in &recipes {
            if !recipe_ids.insert(recipe.id.as_str()) {
                return Err(duplicate("recipe", &recipe.id));
            }
            if let Some(missing) = recipe
                .ingredients
                .iter()
                .find(|i| !food_index.contains_key(&i.food_id))
            {
                return Err(AppError::invalid_input(format!(
                    "Recipe '{}' references unknown food '{}'",
                    recipe.id, missing.food_id
                ))
                .with_resource_id(recipe.id.clone()));
            }
            if recipe.check_nutrition_consistency(tolerance).is_err() {
                inconsistent.push(recipe.id.clone());
            }
        }
        if !inconsistent.is_empty() {
            return Err(AppError::new(
                ErrorCode::InconsistentNutrition,
                format!(
                    "{} recipe(s) have macros that do not match their calories",
                    inconsistent.len()
                ),
            )
            .with_details(serde_json::json!({ "recipe_ids": inconsistent })));
        }

        let mut template_ids = HashSet::new();
        for template in &templates {
            if !template_ids.insert(template.id.as_str()) {
                return Err(duplicate("workout template", &template.id));
            }
        }

        Ok(Self {
            recipes,
            foods,
            food_index,
            templates,
        })
    }
}

fn duplicate(kind: &str, id: &str) -> AppError {
    AppError::invalid_input(format!("Duplicate {kind} id '{id}'")).with_resource_id(id)
}

impl CatalogProvider for StaticCatalog {
    fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    fn workout_templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    fn food(&self, id: &str) -> Option<&FoodItem> {
        self.food_index.get(id).and_then(|&idx| self.foods.get(idx))
    }
}
