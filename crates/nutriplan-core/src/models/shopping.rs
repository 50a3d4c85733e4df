// ABOUTME: Shopping list records derived from a week of meal plans
// ABOUTME: Defines ShoppingItem, ItemPriority, StoreMode, store subtotals and batch suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Purchase priority; ordering puts `High` first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ItemPriority {
    /// Primary protein sources
    High,
    /// Staple vegetables bought in quantity
    Medium,
    /// Everything else
    Low,
}

/// Consolidated ingredient with its store assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingItem {
    /// Food reference
    pub food_id: String,
    /// Food display name
    pub food_name: String,
    /// Total grams across the plan days
    pub total_grams: f64,
    /// Recipes that contributed, in first-seen order
    pub contributing_recipes: Vec<String>,
    /// Purchase priority
    pub priority: ItemPriority,
    /// Cheapest store
    pub store_id: String,
    /// Price before discounts
    pub original_price: f64,
    /// Price after discounts at the assigned store
    pub final_price: f64,
    /// `original_price - final_price`
    pub savings: f64,
    /// Whether the seasonal discount applied
    pub seasonal_discount: bool,
    /// Quantity and handling notes
    pub notes: Vec<String>,
    /// Set by the user-facing layer
    pub purchased: bool,
}

/// Cost summary for one store that received items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSubtotal {
    /// Store id
    pub store_id: String,
    /// Store display name
    pub store_name: String,
    /// Number of items assigned
    pub item_count: usize,
    /// Sum of final prices
    pub items_cost: f64,
    /// Flat delivery cost, zero when the store has none
    pub delivery_cost: f64,
}

/// Dominant store mode of a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "store_id", rename_all = "snake_case")]
pub enum StoreMode {
    /// Every item comes from one store
    Single(String),
    /// Several stores, anchored on the discount store
    DiscountStore,
    /// Several stores
    Mixed,
}

/// Items of one store, sorted by priority
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreGroup {
    /// Store id
    pub store_id: String,
    /// Items sorted high, medium, low
    pub items: Vec<ShoppingItem>,
}

/// Bulk preparation proposal for a protein bought in quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchCookingSuggestion {
    /// Protein food id
    pub food_id: String,
    /// Grams on the list
    pub total_grams: f64,
    /// Up to three batch-cookable recipes using the protein
    pub recipe_ids: Vec<String>,
    /// Preparation instructions
    pub instructions: Vec<String>,
    /// Days the cooked food keeps refrigerated
    pub storage_days: u32,
}

/// A week's consolidated shopping list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingList {
    /// First day covered
    pub week_start: NaiveDate,
    /// Items grouped by store
    pub groups: Vec<StoreGroup>,
    /// Per-store cost breakdown
    pub store_subtotals: Vec<StoreSubtotal>,
    /// Items plus delivery
    pub total_cost: f64,
    /// Sum of item savings
    pub total_savings: f64,
    /// Dominant store mode
    pub mode: StoreMode,
    /// Batch-cooking proposals
    pub batch_suggestions: Vec<BatchCookingSuggestion>,
}

impl ShoppingList {
    /// Iterate over every item regardless of store
    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Find the item for a food
    #[must_use]
    pub fn item(&self, food_id: &str) -> Option<&ShoppingItem> {
        self.items().find(|i| i.food_id == food_id)
    }
}
