// ABOUTME: Meal planner configuration: day templates, scoring weights, portions and validation
// ABOUTME: Each day template distributes daily calories across its slots and must sum to 1.0
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Plan Configuration

use chrono::NaiveTime;
use nutriplan_core::errors::ConfigError;
use nutriplan_core::models::{BudgetTier, DayTemplateKind, MealSlot};
use serde::{Deserialize, Serialize};

/// Tolerance on the sum of a template's fractions
pub const FRACTION_SUM_TOLERANCE: f64 = 0.01;

/// Meal Plan Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlanConfig {
    /// Calorie distributions per day template
    pub templates: DayTemplatesConfig,
    /// Candidate scoring weights
    pub scoring: MealScoringConfig,
    /// Candidate window and portion bounds
    pub selection: SelectionConfig,
    /// Day validation thresholds
    pub validation: PlanValidationConfig,
    /// Max prep+cook time per budget tier
    pub time_limits: BudgetTimeLimitsConfig,
    /// Substitution search parameters
    pub substitution: SubstitutionConfig,
}

/// Share of daily calories assigned to one slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotShare {
    /// Slot
    pub slot: MealSlot,
    /// Fraction of daily calories
    pub fraction: f64,
    /// Default time of day
    pub time: NaiveTime,
}

/// A fixed calorie distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTemplate {
    /// Template identity
    pub kind: DayTemplateKind,
    /// Slots in schedule order
    pub slots: Vec<SlotShare>,
}

impl DayTemplate {
    /// Sum of slot fractions
    #[must_use]
    pub fn fraction_sum(&self) -> f64 {
        self.slots.iter().map(|s| s.fraction).sum()
    }

    /// Slots active for the day; on rest days the post-workout share is
    /// redistributed proportionally over the remaining slots
    #[must_use]
    pub fn active_slots(&self, training_day: bool) -> Vec<SlotShare> {
        if training_day {
            return self.slots.clone();
        }
        let kept: Vec<&SlotShare> = self
            .slots
            .iter()
            .filter(|s| s.slot != MealSlot::PostWorkout)
            .collect();
        let kept_sum: f64 = kept.iter().map(|s| s.fraction).sum();
        let total = self.fraction_sum();
        if kept_sum <= 0.0 {
            return Vec::new();
        }
        kept.into_iter()
            .map(|s| SlotShare {
                slot: s.slot,
                fraction: s.fraction * total / kept_sum,
                time: s.time,
            })
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = format!("{:?}", self.kind).to_lowercase();
        if self.slots.is_empty() {
            return Err(ConfigError::MissingField(format!("{name} template slots")));
        }
        if self
            .slots
            .iter()
            .any(|s| !(s.fraction > 0.0 && s.fraction <= 1.0))
        {
            return Err(ConfigError::InvalidRange(format!(
                "{name} template fractions must be in (0, 1]"
            )));
        }
        let mut slots: Vec<MealSlot> = self.slots.iter().map(|s| s.slot).collect();
        slots.sort();
        slots.dedup();
        if slots.len() != self.slots.len() {
            return Err(ConfigError::InvalidWeights(format!(
                "{name} template lists a slot twice"
            )));
        }
        let sum = self.fraction_sum();
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "{name} template fractions must sum to 1.0, got {sum:.3}"
            )));
        }
        Ok(())
    }
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn share(slot: MealSlot, fraction: f64, time: NaiveTime) -> SlotShare {
    SlotShare {
        slot,
        fraction,
        time,
    }
}

/// The three fixed day templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTemplatesConfig {
    /// Four meals plus a post-workout allowance
    pub normal: DayTemplate,
    /// Breakfast skipped
    pub fasting: DayTemplate,
    /// Three meals
    pub simple: DayTemplate,
}

impl DayTemplatesConfig {
    /// Template for a kind
    #[must_use]
    pub const fn get(&self, kind: DayTemplateKind) -> &DayTemplate {
        match kind {
            DayTemplateKind::Normal => &self.normal,
            DayTemplateKind::Fasting => &self.fasting,
            DayTemplateKind::Simple => &self.simple,
        }
    }

    /// Validate every template
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a template is empty, repeats a slot or
    /// does not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.normal.validate()?;
        self.fasting.validate()?;
        self.simple.validate()
    }
}

impl Default for DayTemplatesConfig {
    fn default() -> Self {
        Self {
            normal: DayTemplate {
                kind: DayTemplateKind::Normal,
                slots: vec![
                    share(MealSlot::Breakfast, 0.18, at(8, 0)),
                    share(MealSlot::Lunch, 0.35, at(13, 30)),
                    share(MealSlot::Snack, 0.15, at(17, 0)),
                    share(MealSlot::PostWorkout, 0.05, at(19, 0)),
                    share(MealSlot::Dinner, 0.27, at(21, 0)),
                ],
            },
            fasting: DayTemplate {
                kind: DayTemplateKind::Fasting,
                slots: vec![
                    share(MealSlot::Lunch, 0.40, at(12, 30)),
                    share(MealSlot::Snack, 0.20, at(16, 30)),
                    share(MealSlot::PostWorkout, 0.05, at(19, 0)),
                    share(MealSlot::Dinner, 0.35, at(20, 30)),
                ],
            },
            simple: DayTemplate {
                kind: DayTemplateKind::Simple,
                slots: vec![
                    share(MealSlot::Breakfast, 0.25, at(8, 30)),
                    share(MealSlot::Lunch, 0.40, at(13, 30)),
                    share(MealSlot::Dinner, 0.35, at(20, 30)),
                ],
            },
        }
    }
}

/// Candidate scoring weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealScoringConfig {
    /// Starting score
    pub base_score: f64,
    /// Points lost per unit of relative calorie deviation
    pub deviation_weight: f64,
    /// Points gained when a wanted tag is present
    pub tag_match_bonus: f64,
    /// Points lost when a wanted tag is absent
    pub tag_miss_penalty: f64,
    /// Points per liked ingredient in the recipe
    pub liked_ingredient_bonus: f64,
    /// Cap on the liked-ingredient bonus
    pub liked_ingredient_cap: f64,
    /// Portion cost above which low-budget users are penalized
    pub budget_cost_limit: f64,
    /// Points lost per 100% overshoot of the cost limit
    pub cost_penalty_weight: f64,
    /// Cap on the cost penalty
    pub cost_penalty_cap: f64,
    /// Points lost by recipes served the previous day (week generation)
    pub repeat_penalty: f64,
}

impl Default for MealScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            deviation_weight: 50.0,
            tag_match_bonus: 10.0,
            tag_miss_penalty: 5.0,
            liked_ingredient_bonus: 2.0,
            liked_ingredient_cap: 6.0,
            budget_cost_limit: 2500.0,
            cost_penalty_weight: 20.0,
            cost_penalty_cap: 20.0,
            repeat_penalty: 15.0,
        }
    }
}

/// Candidate window and portion bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Relative calorie window preferred during selection
    pub candidate_window: f64,
    /// Smallest portion multiplier
    pub min_portions: f64,
    /// Largest portion multiplier
    pub max_portions: f64,
    /// Rounding step for portions
    pub portion_step: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            candidate_window: 0.15,
            min_portions: 0.5,
            max_portions: 2.0,
            portion_step: 0.25,
        }
    }
}

/// Thresholds a generated day must meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanValidationConfig {
    /// Max relative deviation of total calories
    pub max_calorie_deviation: f64,
    /// Min share of the protein target
    pub min_protein_ratio: f64,
    /// Min meals per day
    pub min_meals: usize,
}

impl Default for PlanValidationConfig {
    fn default() -> Self {
        Self {
            max_calorie_deviation: 0.30,
            min_protein_ratio: 0.80,
            min_meals: 2,
        }
    }
}

/// Max prep+cook minutes per budget tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTimeLimitsConfig {
    /// Low budget
    pub low_min: u32,
    /// Medium budget
    pub medium_min: u32,
    /// High budget
    pub high_min: u32,
}

impl BudgetTimeLimitsConfig {
    /// Limit for a tier
    #[must_use]
    pub const fn limit(&self, tier: BudgetTier) -> u32 {
        match tier {
            BudgetTier::Low => self.low_min,
            BudgetTier::Medium => self.medium_min,
            BudgetTier::High => self.high_min,
        }
    }
}

impl Default for BudgetTimeLimitsConfig {
    fn default() -> Self {
        Self {
            low_min: 30,
            medium_min: 45,
            high_min: 90,
        }
    }
}

/// Substitution search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    /// Relative calorie window around the original recipe
    pub calorie_window: f64,
    /// Max alternatives returned
    pub max_suggestions: usize,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            calorie_window: 0.25,
            max_suggestions: 3,
        }
    }
}

impl MealPlanConfig {
    /// Validate the tables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid templates, inverted portion bounds
    /// or non-positive windows
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.templates.validate()?;
        let s = &self.selection;
        if !(0.0 < s.min_portions && s.min_portions <= s.max_portions && s.portion_step > 0.0) {
            return Err(ConfigError::InvalidRange(
                "portion bounds must satisfy 0 < min <= max and step > 0".to_owned(),
            ));
        }
        if s.candidate_window <= 0.0 || self.substitution.calorie_window <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "calorie windows must be positive".to_owned(),
            ));
        }
        if self.validation.min_protein_ratio > 1.0 {
            return Err(ConfigError::InvalidRange(
                "min_protein_ratio cannot exceed 1.0".to_owned(),
            ));
        }
        Ok(())
    }
}
