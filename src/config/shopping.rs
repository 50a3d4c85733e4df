// ABOUTME: Shopping list configuration: store table, priority food sets and batch-cooking rules
// ABOUTME: Each store defines its own budget, seasonal and bulk discounts plus delivery cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Shopping List Configuration

use nutriplan_core::errors::ConfigError;
use nutriplan_core::models::BudgetTier;
use serde::{Deserialize, Serialize};

/// Shopping List Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingConfig {
    /// Available stores
    pub stores: Vec<StoreConfig>,
    /// Primary protein foods (high priority, batch-cooking candidates)
    pub primary_proteins: Vec<PrimaryProtein>,
    /// Staple vegetables (medium priority in quantity)
    pub staple_vegetables: Vec<String>,
    /// Grams at which a staple vegetable becomes medium priority
    pub staple_threshold_g: f64,
    /// Grams at which a primary protein gets a batch-cooking suggestion
    pub batch_threshold_g: f64,
    /// Max recipes proposed per batch suggestion
    pub batch_recipe_limit: usize,
}

/// Store pricing rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Only offered to low-budget users
    pub discount_store: bool,
    /// Discount for low-budget users (0-1)
    pub budget_discount: f64,
    /// Discount on in-season foods (0-1)
    pub seasonal_discount: f64,
    /// Grams from which the bulk discount applies
    pub bulk_threshold_g: f64,
    /// Bulk discount (0-1)
    pub bulk_discount: f64,
    /// Flat delivery cost, `None` when the store does not deliver
    pub delivery_cost: Option<f64>,
}

impl StoreConfig {
    /// Whether a user of the tier may shop here
    #[must_use]
    pub fn available_to(&self, tier: BudgetTier) -> bool {
        !self.discount_store || tier == BudgetTier::Low
    }
}

/// Protein family deciding handling notes and batch instructions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProteinKind {
    /// Chicken, turkey
    Poultry,
    /// Beef, pork
    RedMeat,
    /// Fish and seafood
    Fish,
    /// Eggs
    Eggs,
    /// Tofu, legumes
    Plant,
}

impl ProteinKind {
    /// Fixed batch preparation steps
    #[must_use]
    pub fn batch_instructions(&self) -> Vec<String> {
        let steps: &[&str] = match self {
            Self::Poultry => &[
                "Trim and portion into 150 g pieces",
                "Bake at 200 C for 20-25 minutes or grill until 74 C inside",
                "Cool quickly and store in airtight containers",
            ],
            Self::RedMeat => &[
                "Trim visible fat and portion into 150 g pieces",
                "Brown in a hot pan, then braise or roast until done",
                "Cool quickly and store with its juices",
            ],
            Self::Fish => &[
                "Portion fillets and season lightly",
                "Bake at 180 C for 12-15 minutes",
                "Store separately from sides to keep texture",
            ],
            Self::Eggs => &[
                "Boil for 10 minutes and cool in cold water",
                "Keep unpeeled in the refrigerator",
            ],
            Self::Plant => &[
                "Press tofu or rinse cooked legumes",
                "Season and bake or simmer in one large batch",
                "Portion into containers with a little cooking liquid",
            ],
        };
        steps.iter().map(|s| (*s).to_owned()).collect()
    }

    /// Refrigerated shelf life of the cooked batch
    #[must_use]
    pub const fn storage_days(&self) -> u32 {
        match self {
            Self::Poultry | Self::Fish => 3,
            Self::RedMeat => 4,
            Self::Eggs => 7,
            Self::Plant => 5,
        }
    }
}

/// A primary protein and its family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryProtein {
    /// Food id
    pub food_id: String,
    /// Family
    pub kind: ProteinKind,
}

fn protein(food_id: &str, kind: ProteinKind) -> PrimaryProtein {
    PrimaryProtein {
        food_id: food_id.to_owned(),
        kind,
    }
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            stores: vec![
                StoreConfig {
                    id: "supermarket".to_owned(),
                    name: "Supermarket".to_owned(),
                    discount_store: false,
                    budget_discount: 0.05,
                    seasonal_discount: 0.10,
                    bulk_threshold_g: 2000.0,
                    bulk_discount: 0.05,
                    delivery_cost: Some(2990.0),
                },
                StoreConfig {
                    id: "farmers_market".to_owned(),
                    name: "Farmers market".to_owned(),
                    discount_store: false,
                    budget_discount: 0.0,
                    seasonal_discount: 0.20,
                    bulk_threshold_g: 1000.0,
                    bulk_discount: 0.10,
                    delivery_cost: None,
                },
                StoreConfig {
                    id: "discount_warehouse".to_owned(),
                    name: "Discount warehouse".to_owned(),
                    discount_store: true,
                    budget_discount: 0.25,
                    seasonal_discount: 0.05,
                    bulk_threshold_g: 500.0,
                    bulk_discount: 0.15,
                    delivery_cost: None,
                },
            ],
            primary_proteins: vec![
                protein("chicken_breast", ProteinKind::Poultry),
                protein("turkey_breast", ProteinKind::Poultry),
                protein("lean_beef", ProteinKind::RedMeat),
                protein("pork_loin", ProteinKind::RedMeat),
                protein("salmon", ProteinKind::Fish),
                protein("hake", ProteinKind::Fish),
                protein("tuna", ProteinKind::Fish),
                protein("eggs", ProteinKind::Eggs),
                protein("tofu", ProteinKind::Plant),
                protein("lentils", ProteinKind::Plant),
            ],
            staple_vegetables: [
                "broccoli",
                "spinach",
                "carrot",
                "tomato",
                "onion",
                "zucchini",
                "lettuce",
                "bell_pepper",
                "pumpkin",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            staple_threshold_g: 500.0,
            batch_threshold_g: 1000.0,
            batch_recipe_limit: 3,
        }
    }
}

impl ShoppingConfig {
    /// Family of a primary protein, `None` for other foods
    #[must_use]
    pub fn protein_kind(&self, food_id: &str) -> Option<ProteinKind> {
        self.primary_proteins
            .iter()
            .find(|p| p.food_id == food_id)
            .map(|p| p.kind)
    }

    /// Whether a food is a staple vegetable
    #[must_use]
    pub fn is_staple_vegetable(&self, food_id: &str) -> bool {
        self.staple_vegetables.iter().any(|v| v == food_id)
    }

    /// Validate the tables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when no store exists, ids repeat or discounts
    /// fall outside [0, 1)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stores.is_empty() {
            return Err(ConfigError::MissingField("stores".to_owned()));
        }
        if !self.stores.iter().any(|s| !s.discount_store) {
            return Err(ConfigError::InvalidRange(
                "at least one store must be open to every budget tier".to_owned(),
            ));
        }
        for (idx, store) in self.stores.iter().enumerate() {
            if self.stores[..idx].iter().any(|s| s.id == store.id) {
                return Err(ConfigError::InvalidRange(format!(
                    "store id '{}' appears twice",
                    store.id
                )));
            }
            let discounts = [
                store.budget_discount,
                store.seasonal_discount,
                store.bulk_discount,
            ];
            if discounts.iter().any(|d| !(0.0..1.0).contains(d)) {
                return Err(ConfigError::InvalidRange(format!(
                    "store '{}' discounts must be in [0, 1)",
                    store.id
                )));
            }
            if store.delivery_cost.is_some_and(|c| c < 0.0) || store.bulk_threshold_g < 0.0 {
                return Err(ConfigError::InvalidRange(format!(
                    "store '{}' delivery cost and bulk threshold cannot be negative",
                    store.id
                )));
            }
        }
        Ok(())
    }
}
