// ABOUTME: Shopping list generator: ingredient consolidation, discount pricing, store assignment
// ABOUTME: Groups items by cheapest store, adds handling notes and batch-cooking suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Shopping List Generator
//!
//! Grams are summed per food across every meal of the supplied plan days,
//! each meal scaled by its portion count. Every consolidated food is priced at
//! every store open to the user's budget tier and assigned to the cheapest.
//! Discounts are applied multiplicatively and independently:
//!
//! ```text
//! final = base x (1 - budget) x (1 - seasonal) x (1 - bulk)
//! ```
//!
//! where a factor is 1 when its condition does not hold.

use crate::config::{ProteinKind, ShoppingConfig, StoreConfig};
use chrono::{Datelike, NaiveDate};
use nutriplan_core::constants::time::{EGG_WEIGHT_G, GRAMS_PER_KG};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{
    BatchCookingSuggestion, BudgetTier, CatalogProvider, FoodItem, ItemPriority, MealPlanDay,
    RecipeTag, ShoppingItem, ShoppingList, StoreGroup, StoreMode, StoreSubtotal,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Grams of one food summed over a set of plan days
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedIngredient {
    /// Food reference
    pub food_id: String,
    /// Total grams
    pub total_grams: f64,
    /// Recipes that contributed, in first-seen order
    pub contributing_recipes: Vec<String>,
    /// Purchase priority
    pub priority: ItemPriority,
}

/// Price of an ingredient at one store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Price before discounts
    pub original: f64,
    /// Price after discounts
    pub discounted: f64,
    /// Whether the seasonal discount applied
    pub seasonal: bool,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn quantity_note(grams: f64) -> String {
    if grams >= GRAMS_PER_KG {
        format!("{:.2} kg", grams / GRAMS_PER_KG)
    } else {
        format!("{grams:.0} g")
    }
}

fn handling_note(kind: ProteinKind, grams: f64) -> String {
    match kind {
        ProteinKind::Poultry => "Prefer skinless breast".to_owned(),
        ProteinKind::RedMeat => "Choose lean cuts and trim visible fat".to_owned(),
        ProteinKind::Fish => "Buy close to cooking day or frozen".to_owned(),
        ProteinKind::Eggs => {
            let eggs = (grams / EGG_WEIGHT_G).ceil();
            let dozens = (eggs / 12.0).ceil();
            format!("About {eggs:.0} eggs ({dozens:.0} dozen)")
        }
        ProteinKind::Plant => "Check the label for added salt".to_owned(),
    }
}

/// Shopping list generator bound to its store table
#[derive(Debug, Clone, Default)]
pub struct ShoppingListGenerator {
    config: ShoppingConfig,
}

impl ShoppingListGenerator {
    /// Create a generator
    #[must_use]
    pub const fn new(config: ShoppingConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ShoppingConfig {
        &self.config
    }

    /// Priority of a food given its consolidated quantity
    #[must_use]
    pub fn priority(&self, food_id: &str, total_grams: f64) -> ItemPriority {
        if self.config.protein_kind(food_id).is_some() {
            ItemPriority::High
        } else if self.config.is_staple_vegetable(food_id)
            && total_grams >= self.config.staple_threshold_g
        {
            ItemPriority::Medium
        } else {
            ItemPriority::Low
        }
    }

    /// Sum grams per food across every meal, scaled by portions
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when a meal references a recipe missing from
    /// the catalog
    pub fn consolidate(
        &self,
        days: &[MealPlanDay],
        catalog: &dyn CatalogProvider,
    ) -> AppResult<Vec<ConsolidatedIngredient>> {
        let mut items: Vec<ConsolidatedIngredient> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for meal in days.iter().flat_map(|d| d.meals.iter()) {
            let recipe = catalog.recipe(&meal.recipe_id).ok_or_else(|| {
                AppError::not_found(format!("Recipe '{}'", meal.recipe_id))
                    .with_resource_id(meal.recipe_id.clone())
            })?;
            for ingredient in &recipe.ingredients {
                let grams = ingredient.grams * meal.portions;
                let slot = *index.entry(ingredient.food_id.clone()).or_insert_with(|| {
                    items.push(ConsolidatedIngredient {
                        food_id: ingredient.food_id.clone(),
                        total_grams: 0.0,
                        contributing_recipes: Vec::new(),
                        priority: ItemPriority::Low,
                    });
                    items.len() - 1
                });
                if let Some(item) = items.get_mut(slot) {
                    item.total_grams += grams;
                    if !item.contributing_recipes.contains(&recipe.id) {
                        item.contributing_recipes.push(recipe.id.clone());
                    }
                }
            }
        }

        for item in &mut items {
            item.priority = self.priority(&item.food_id, item.total_grams);
        }
        Ok(items)
    }

    /// Stores open to a budget tier, in table order
    #[must_use]
    pub fn available_stores(&self, tier: BudgetTier) -> Vec<&StoreConfig> {
        self.config
            .stores
            .iter()
            .filter(|s| s.available_to(tier))
            .collect()
    }

    /// Price a quantity of food at a store
    #[must_use]
    pub fn price_at(
        &self,
        store: &StoreConfig,
        food: &FoodItem,
        grams: f64,
        tier: BudgetTier,
        month: u32,
    ) -> PriceQuote {
        let original = food.cost_per_kg / GRAMS_PER_KG * grams;
        let mut price = original;
        if tier == BudgetTier::Low {
            price *= 1.0 - store.budget_discount;
        }
        let seasonal = food.is_in_season(month) && store.seasonal_discount > 0.0;
        if seasonal {
            price *= 1.0 - store.seasonal_discount;
        }
        if grams >= store.bulk_threshold_g {
            price *= 1.0 - store.bulk_discount;
        }
        PriceQuote {
            original: round_cents(original),
            discounted: round_cents(price),
            seasonal,
        }
    }

    /// Build the full list for a set of plan days
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when no plan day is supplied
    /// - `ResourceNotFound` for recipes or foods missing from the catalog
    /// - `ConfigInvalid` when no store is open to the user's tier
    pub fn generate(
        &self,
        days: &[MealPlanDay],
        tier: BudgetTier,
        catalog: &dyn CatalogProvider,
        week_start: NaiveDate,
    ) -> AppResult<ShoppingList> {
        if days.is_empty() {
            return Err(AppError::invalid_input(
                "A shopping list needs at least one plan day",
            ));
        }
        let stores = self.available_stores(tier);
        if stores.is_empty() {
            return Err(AppError::config(format!(
                "No store is available to the {tier:?} budget tier"
            )));
        }
        let month = week_start.month();

        let mut assigned: Vec<ShoppingItem> = Vec::new();
        for ingredient in self.consolidate(days, catalog)? {
            let food = catalog.food(&ingredient.food_id).ok_or_else(|| {
                AppError::not_found(format!("Food '{}'", ingredient.food_id))
                    .with_resource_id(ingredient.food_id.clone())
            })?;
            assigned.push(self.assign(&ingredient, food, &stores, tier, month)?);
        }

        let mut groups = Vec::new();
        let mut store_subtotals = Vec::new();
        for store in &stores {
            let mut items: Vec<ShoppingItem> = assigned
                .iter()
                .filter(|i| i.store_id == store.id)
                .cloned()
                .collect();
            if items.is_empty() {
                continue;
            }
            items.sort_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then_with(|| a.food_name.cmp(&b.food_name))
            });
            store_subtotals.push(StoreSubtotal {
                store_id: store.id.clone(),
                store_name: store.name.clone(),
                item_count: items.len(),
                items_cost: round_cents(items.iter().map(|i| i.final_price).sum()),
                delivery_cost: store.delivery_cost.unwrap_or(0.0),
            });
            groups.push(StoreGroup {
                store_id: store.id.clone(),
                items,
            });
        }

        let total_cost = store_subtotals
            .iter()
            .map(|s| s.items_cost + s.delivery_cost)
            .sum();
        let total_savings = round_cents(assigned.iter().map(|i| i.savings).sum());

        let mode = match groups.as_slice() {
            [only] => StoreMode::Single(only.store_id.clone()),
            _ if tier == BudgetTier::Low => StoreMode::DiscountStore,
            _ => StoreMode::Mixed,
        };

        let batch_suggestions = self.batch_suggestions(&assigned, catalog);

        info!(
            week_start = %week_start,
            items = assigned.len(),
            stores = groups.len(),
            total_cost,
            total_savings,
            "Generated shopping list"
        );

        Ok(ShoppingList {
            week_start,
            groups,
            store_subtotals,
            total_cost,
            total_savings,
            mode,
            batch_suggestions,
        })
    }

    fn assign(
        &self,
        ingredient: &ConsolidatedIngredient,
        food: &FoodItem,
        stores: &[&StoreConfig],
        tier: BudgetTier,
        month: u32,
    ) -> AppResult<ShoppingItem> {
        let mut best: Option<(&StoreConfig, PriceQuote)> = None;
        for store in stores {
            let quote = self.price_at(store, food, ingredient.total_grams, tier, month);
            if best.as_ref().is_none_or(|(_, top)| quote.discounted < top.discounted) {
                best = Some((store, quote));
            }
        }
        let (store, quote) =
            best.ok_or_else(|| AppError::internal("Store list unexpectedly empty"))?;
        debug!(
            food_id = %food.id,
            store_id = %store.id,
            price = quote.discounted,
            "Assigned ingredient to cheapest store"
        );

        let mut notes = vec![quantity_note(ingredient.total_grams)];
        if let Some(kind) = self.config.protein_kind(&food.id) {
            notes.push(handling_note(kind, ingredient.total_grams));
        }
        if quote.seasonal {
            notes.push("In season: seasonal discount applied".to_owned());
        }

        Ok(ShoppingItem {
            food_id: food.id.clone(),
            food_name: food.name.clone(),
            total_grams: ingredient.total_grams,
            contributing_recipes: ingredient.contributing_recipes.clone(),
            priority: ingredient.priority,
            store_id: store.id.clone(),
            original_price: quote.original,
            final_price: quote.discounted,
            savings: round_cents(quote.original - quote.discounted),
            seasonal_discount: quote.seasonal,
            notes,
            purchased: false,
        })
    }

    fn batch_suggestions(
        &self,
        items: &[ShoppingItem],
        catalog: &dyn CatalogProvider,
    ) -> Vec<BatchCookingSuggestion> {
        items
            .iter()
            .filter(|i| i.total_grams >= self.config.batch_threshold_g)
            .filter_map(|item| {
                let kind = self.config.protein_kind(&item.food_id)?;
                let mut recipes: Vec<(&str, f64)> = catalog
                    .recipes()
                    .iter()
                    .filter(|r| r.has_tag(RecipeTag::BatchCookable))
                    .map(|r| (r.id.as_str(), r.grams_of(&item.food_id)))
                    .filter(|(_, grams)| *grams > 0.0)
                    .collect();
                recipes.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                recipes.truncate(self.config.batch_recipe_limit);

                Some(BatchCookingSuggestion {
                    food_id: item.food_id.clone(),
                    total_grams: item.total_grams,
                    recipe_ids: recipes.into_iter().map(|(id, _)| id.to_owned()).collect(),
                    instructions: kind.batch_instructions(),
                    storage_days: kind.storage_days(),
                })
            })
            .collect()
    }
}
