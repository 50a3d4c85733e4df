// ABOUTME: Integration tests for the metrics calculator
// ABOUTME: Covers Mifflin-St Jeor, expenditure, goal tiers, safety floors and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use nutriplan::config::MetricsConfig;
use nutriplan::errors::ErrorCode;
use nutriplan::models::{ActivityLevel, ProteinPreference, Sex};
use nutriplan::planning::{
    activity_factor, basal_rate, bmi, calorie_target, compute_metrics, goal_adjustment, macros,
    total_expenditure,
};

#[test]
fn test_basal_rate_female_reference_value() {
    // 10*70 + 6.25*165 - 5*28 - 161 = 1430.25
    assert_eq!(basal_rate(Sex::Female, 70.0, 165.0, 28).unwrap(), 1430.0);
}

#[test]
fn test_basal_rate_matches_closed_form() {
    for (sex, constant) in [(Sex::Male, 5.0), (Sex::Female, -161.0)] {
        for weight in [45.0, 62.5, 80.0, 120.0] {
            for height in [150.0, 172.0, 195.0] {
                for age in [18_u32, 40, 75] {
                    let expected =
                        (10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + constant).round();
                    assert_eq!(basal_rate(sex, weight, height, age).unwrap(), expected);
                }
            }
        }
    }
}

#[test]
fn test_basal_rate_rejects_non_positive_inputs() {
    let err = basal_rate(Sex::Male, 0.0, 180.0, 30).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(basal_rate(Sex::Male, 80.0, -1.0, 30).is_err());
    assert!(basal_rate(Sex::Male, f64::NAN, 180.0, 30).is_err());
}

#[test]
fn test_bmi_rounded_to_one_decimal() {
    // 70 / 1.65^2 = 25.71
    assert_eq!(bmi(70.0, 165.0).unwrap(), 25.7);
    assert!(bmi(70.0, 0.0).is_err());
}

#[test]
fn test_activity_factors_and_expenditure() {
    let config = MetricsConfig::default();
    let factors = &config.activity_factors;
    assert_eq!(activity_factor(ActivityLevel::Sedentary, factors), 1.2);
    assert_eq!(activity_factor(ActivityLevel::ExtraActive, factors), 1.9);

    let tdee = total_expenditure(1430.0, ActivityLevel::LightlyActive, factors).unwrap();
    assert!((tdee - 1966.25).abs() < 1e-9);
    assert!(total_expenditure(0.0, ActivityLevel::Sedentary, factors).is_err());
}

#[test]
fn test_goal_adjustment_tiers() {
    let config = MetricsConfig::default();
    assert_eq!(goal_adjustment(62.0, 70.0, &config), -0.225);
    assert_eq!(goal_adjustment(67.0, 70.0, &config), -0.15);
    assert_eq!(goal_adjustment(65.0, 70.0, &config), -0.15);
    assert_eq!(goal_adjustment(70.0, 70.0, &config), 0.0);
    assert_eq!(goal_adjustment(73.0, 70.0, &config), 0.075);
    assert_eq!(goal_adjustment(80.0, 70.0, &config), 0.125);
}

#[test]
fn test_calorie_target_applies_deficit_and_band() {
    let config = MetricsConfig::default();
    let range = calorie_target(1966.25, 62.0, 70.0, Sex::Female, &config).unwrap();
    let expected = 1966.25 * (1.0 - 0.225);
    assert!((range.target - expected).abs() < 1e-9);
    assert!((range.min - expected * 0.95).abs() < 1e-9);
    assert!((range.max - expected * 1.05).abs() < 1e-9);
}

#[test]
fn test_calorie_target_never_below_floor() {
    let config = MetricsConfig::default();
    for (sex, floor) in [(Sex::Female, 1200.0), (Sex::Male, 1500.0)] {
        for expenditure in [900.0, 1300.0, 1600.0, 2500.0] {
            for goal in [40.0, 60.0, 70.0, 90.0] {
                let range = calorie_target(expenditure, goal, 70.0, sex, &config).unwrap();
                assert!(range.target >= floor, "{sex:?} {expenditure} {goal}");
                assert!(range.min >= floor);
                assert!(range.max >= range.target);
            }
        }
    }
}

#[test]
fn test_macros_add_up_to_target() {
    let config = MetricsConfig::default();
    for target in [1200.0, 1523.8, 1800.0, 2450.0, 3100.0] {
        for goal in [55.0, 62.0, 78.0, 95.0] {
            for preference in [
                ProteinPreference::Low,
                ProteinPreference::Medium,
                ProteinPreference::High,
            ] {
                let split = macros(target, goal, preference, &config.macros).unwrap();
                if split.carbs_g > 0.0 {
                    assert!(
                        (split.calories() - target).abs() < 1e-6,
                        "target {target} goal {goal} {preference:?}: {split:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_macros_protein_follows_preference() {
    let config = MetricsConfig::default();
    let low = macros(1800.0, 60.0, ProteinPreference::Low, &config.macros).unwrap();
    let medium = macros(1800.0, 60.0, ProteinPreference::Medium, &config.macros).unwrap();
    let high = macros(1800.0, 60.0, ProteinPreference::High, &config.macros).unwrap();
    assert!((low.protein_g - 96.0).abs() < 1e-9);
    assert!((medium.protein_g - 114.0).abs() < 1e-9);
    assert!((high.protein_g - 132.0).abs() < 1e-9);
    assert!((low.fat_g - 36.0).abs() < 1e-9);
}

#[test]
fn test_macros_keep_fractional_grams() {
    let config = MetricsConfig::default();
    let split = macros(2000.0, 72.5, ProteinPreference::Medium, &config.macros).unwrap();
    // 72.5 * 1.9 and 72.5 * 0.6, carbs fill (2000 - 551 - 391.5) / 4
    assert!((split.protein_g - 137.75).abs() < 1e-9);
    assert!((split.fat_g - 43.5).abs() < 1e-9);
    assert!((split.carbs_g - 264.375).abs() < 1e-9);
    assert!((split.calories() - 2000.0).abs() < 1e-9);
}

#[test]
fn test_macros_carbs_never_negative() {
    let config = MetricsConfig::default();
    let split = macros(600.0, 120.0, ProteinPreference::High, &config.macros).unwrap();
    assert_eq!(split.carbs_g, 0.0);
}

#[test]
fn test_compute_metrics_for_profile() {
    let profile = common::female_profile();
    let metrics = compute_metrics(&profile, &MetricsConfig::default()).unwrap();

    assert_eq!(metrics.basal_rate, 1430.0);
    assert_eq!(metrics.bmi, 25.7);
    assert_eq!(metrics.activity_factor, 1.375);
    assert!((metrics.total_expenditure - 1966.25).abs() < 1e-9);
    assert!((metrics.macros.protein_g - 117.8).abs() < 1e-9);
    assert!((metrics.macros.fat_g - 37.2).abs() < 1e-9);

    let targets = metrics.daily_targets();
    assert_eq!(targets.calories, metrics.calories.target);
    assert_eq!(targets.carbs_g, metrics.macros.carbs_g);
}

#[test]
fn test_compute_metrics_floors_small_sedentary_user() {
    let mut profile = common::female_profile();
    profile.age = 70;
    profile.height_cm = 150.0;
    profile.weight_kg = 45.0;
    profile.goal_weight_kg = 40.0;
    profile.activity_level = ActivityLevel::Sedentary;

    let metrics = compute_metrics(&profile, &MetricsConfig::default()).unwrap();
    assert_eq!(metrics.calories.target, 1200.0);
    assert_eq!(metrics.calories.min, 1200.0);
}

#[test]
fn test_compute_metrics_rejects_implausible_profile() {
    let mut profile = common::female_profile();
    profile.age = 7;
    let err = compute_metrics(&profile, &MetricsConfig::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(!err.is_recoverable());
}
