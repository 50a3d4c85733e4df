// ABOUTME: Integration tests for the shopping list generator
// ABOUTME: Covers consolidation, per-store discounts, store assignment, notes and batch suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use nutriplan::config::ShoppingConfig;
use nutriplan::errors::ErrorCode;
use nutriplan::models::{BudgetTier, CatalogProvider, ItemPriority, MealPlanDay, StoreMode};
use nutriplan::planning::ShoppingListGenerator;

/// Three days of two 200 g chicken portions: 1200 g chicken in total
fn chicken_days() -> Vec<MealPlanDay> {
    (3..6)
        .map(|day| {
            common::plan_day(
                common::date(2025, 3, day),
                120.0,
                vec![common::meal("grilled_chicken", 2.0, false)],
            )
        })
        .collect()
}

fn mixed_day() -> Vec<MealPlanDay> {
    vec![common::plan_day(
        common::date(2025, 3, 3),
        120.0,
        vec![
            common::meal("oat_porridge", 1.0, false),
            common::meal("chicken_rice_bowl", 1.0, false),
        ],
    )]
}

fn assert_totals_reconcile(list: &nutriplan::models::ShoppingList) {
    let subtotal: f64 = list
        .store_subtotals
        .iter()
        .map(|s| s.items_cost + s.delivery_cost)
        .sum();
    assert!((list.total_cost - subtotal).abs() < 1e-6);

    let savings: f64 = list.items().map(|i| i.original_price - i.final_price).sum();
    assert!((list.total_savings - savings).abs() < 0.01);
}

#[test]
fn test_low_budget_chicken_goes_to_discount_warehouse() {
    common::init_test_logging();
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();

    let list = generator
        .generate(&chicken_days(), BudgetTier::Low, &catalog, common::date(2025, 3, 3))
        .unwrap();

    let chicken = list.item("chicken_breast").unwrap();
    assert_eq!(chicken.total_grams, 1200.0);
    assert_eq!(chicken.store_id, "discount_warehouse");
    // 7200 base, 25% budget discount, 15% bulk discount
    assert_eq!(chicken.original_price, 7200.0);
    assert_eq!(chicken.final_price, 4590.0);
    assert_eq!(chicken.savings, 2610.0);
    assert_eq!(chicken.priority, ItemPriority::High);
    assert_eq!(chicken.contributing_recipes, ["grilled_chicken"]);
    assert_eq!(chicken.notes, ["1.20 kg", "Prefer skinless breast"]);

    assert_eq!(list.mode, StoreMode::Single("discount_warehouse".to_owned()));
    assert_eq!(list.total_cost, 4590.0);
    assert_eq!(list.total_savings, 2610.0);
    assert_totals_reconcile(&list);
}

#[test]
fn test_price_at_each_store() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();
    let chicken = catalog.food("chicken_breast").unwrap();
    let stores = generator.available_stores(BudgetTier::Low);
    assert_eq!(stores.len(), 3);

    let prices: Vec<f64> = stores
        .iter()
        .map(|s| generator.price_at(s, chicken, 1200.0, BudgetTier::Low, 3).discounted)
        .collect();
    assert_eq!(prices, [6840.0, 6480.0, 4590.0]);
}

#[test]
fn test_discount_store_hidden_from_other_tiers() {
    let generator = ShoppingListGenerator::default();
    for tier in [BudgetTier::Medium, BudgetTier::High] {
        let ids: Vec<&str> = generator
            .available_stores(tier)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["supermarket", "farmers_market"]);
    }
}

#[test]
fn test_medium_budget_list_splits_across_stores() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();

    let list = generator
        .generate(&mixed_day(), BudgetTier::Medium, &catalog, common::date(2025, 3, 3))
        .unwrap();

    let broccoli = list.item("broccoli").unwrap();
    assert_eq!(broccoli.store_id, "farmers_market");
    assert!(broccoli.seasonal_discount);
    assert_eq!(broccoli.final_price, 240.0);
    assert!(broccoli
        .notes
        .iter()
        .any(|n| n == "In season: seasonal discount applied"));

    // Equal prices keep the first store in table order
    assert_eq!(list.item("chicken_breast").unwrap().store_id, "supermarket");
    assert_eq!(list.mode, StoreMode::Mixed);

    let supermarket = &list.groups[0];
    assert_eq!(supermarket.store_id, "supermarket");
    let names: Vec<&str> = supermarket.items.iter().map(|i| i.food_name.as_str()).collect();
    assert_eq!(names, ["Chicken breast", "Banana", "Brown rice", "Rolled oats"]);

    assert_eq!(list.store_subtotals[0].items_cost, 1910.0);
    assert_eq!(list.store_subtotals[0].delivery_cost, 2990.0);
    assert!((list.total_cost - 5140.0).abs() < 1e-6);
    assert_eq!(list.total_savings, 60.0);
    assert_totals_reconcile(&list);
}

#[test]
fn test_seasonal_discount_depends_on_month() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();

    let list = generator
        .generate(&mixed_day(), BudgetTier::Medium, &catalog, common::date(2025, 9, 1))
        .unwrap();
    let broccoli = list.item("broccoli").unwrap();
    assert!(!broccoli.seasonal_discount);
    assert_eq!(broccoli.final_price, broccoli.original_price);
}

#[test]
fn test_low_budget_split_reports_discount_store_mode() {
    let catalog = common::catalog();
    let mut config = ShoppingConfig::default();
    for store in &mut config.stores {
        if store.discount_store {
            store.budget_discount = 0.0;
        }
    }
    let generator = ShoppingListGenerator::new(config);

    let mut days = chicken_days();
    days[0].meals.push(common::meal("chicken_broccoli_bake", 0.5, false));
    let list = generator
        .generate(&days, BudgetTier::Low, &catalog, common::date(2025, 3, 3))
        .unwrap();

    assert_eq!(list.item("broccoli").unwrap().store_id, "farmers_market");
    assert_eq!(list.item("chicken_breast").unwrap().store_id, "discount_warehouse");
    assert_eq!(list.mode, StoreMode::DiscountStore);
    assert_totals_reconcile(&list);
}

#[test]
fn test_consolidation_sums_portions_across_recipes() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();
    let days = vec![common::plan_day(
        common::date(2025, 3, 3),
        120.0,
        vec![
            common::meal("chicken_rice_bowl", 1.0, false),
            common::meal("grilled_chicken", 1.5, false),
        ],
    )];

    let items = generator.consolidate(&days, &catalog).unwrap();
    let chicken = items.iter().find(|i| i.food_id == "chicken_breast").unwrap();
    assert_eq!(chicken.total_grams, 500.0);
    assert_eq!(
        chicken.contributing_recipes,
        ["chicken_rice_bowl", "grilled_chicken"]
    );
    assert_eq!(items.len(), 3);
}

#[test]
fn test_priority_classes() {
    let generator = ShoppingListGenerator::default();
    assert_eq!(generator.priority("chicken_breast", 100.0), ItemPriority::High);
    assert_eq!(generator.priority("lentils", 120.0), ItemPriority::High);
    assert_eq!(generator.priority("tomato", 600.0), ItemPriority::Medium);
    assert_eq!(generator.priority("tomato", 400.0), ItemPriority::Low);
    assert_eq!(generator.priority("banana", 2000.0), ItemPriority::Low);
}

#[test]
fn test_egg_note_and_batch_suggestions() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();
    let mut days = chicken_days();
    for day in &mut days {
        day.meals.push(common::meal("boiled_eggs", 2.0, false));
    }
    days[0].meals.push(common::meal("boiled_eggs", 1.0, false));

    let list = generator
        .generate(&days, BudgetTier::Medium, &catalog, common::date(2025, 3, 3))
        .unwrap();

    let eggs = list.item("eggs").unwrap();
    assert_eq!(eggs.total_grams, 700.0);
    assert!(eggs.notes.iter().any(|n| n == "About 14 eggs (2 dozen)"));

    // Eggs stay under the batch threshold; chicken reaches it
    assert_eq!(list.batch_suggestions.len(), 1);
    let batch = &list.batch_suggestions[0];
    assert_eq!(batch.food_id, "chicken_breast");
    assert_eq!(batch.recipe_ids, ["chicken_broccoli_bake", "chicken_rice_bowl"]);
    assert_eq!(batch.storage_days, 3);
    assert_eq!(batch.instructions.len(), 3);
}

#[test]
fn test_empty_plan_is_rejected() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();
    let err = generator
        .generate(&[], BudgetTier::Medium, &catalog, common::date(2025, 3, 3))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_unknown_recipe_is_not_found() {
    let catalog = common::catalog();
    let generator = ShoppingListGenerator::default();
    let mut ghost = common::meal("grilled_chicken", 1.0, false);
    ghost.recipe_id = "ghost".to_owned();
    let days = vec![common::plan_day(common::date(2025, 3, 3), 120.0, vec![ghost])];

    let err = generator
        .generate(&days, BudgetTier::Medium, &catalog, common::date(2025, 3, 3))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.context.resource_id.as_deref(), Some("ghost"));
}

#[test]
fn test_no_store_for_tier_is_config_error() {
    let catalog = common::catalog();
    let mut config = ShoppingConfig::default();
    config.stores.retain(|s| s.discount_store);
    let generator = ShoppingListGenerator::new(config);

    let err = generator
        .generate(&chicken_days(), BudgetTier::High, &catalog, common::date(2025, 3, 3))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
