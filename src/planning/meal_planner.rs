// ABOUTME: Meal plan generator: day template, per-slot targets, filtering, scoring and portions
// ABOUTME: Produces validated MealPlanDay records and substitution suggestions from a catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Plan Generator
//!
//! A day is built in fixed steps: pick a day template from the profile's
//! preference flags, split the daily calorie target across the template's
//! slots, then for every slot filter the catalog, score the survivors, pick
//! the best and scale its portions. Totals are aggregated and validated last.
//!
//! A slot with no surviving candidate is skipped with a warning. A day that
//! ends up with no meal at all fails with a recoverable `NoCandidates` error.

use crate::config::{MealPlanConfig, SlotShare};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{
    BudgetTier, CatalogProvider, DailyTargets, DayTemplateKind, Meal, MealPlanDay, MealSlot,
    NutritionFacts, PlanIssue, PlanValidation, ProteinPreference, Recipe, RecipeTag, UserProfile,
};
use serde_json::json;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Calorie target of one slot of a day
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTarget {
    /// Slot
    pub slot: MealSlot,
    /// Calories assigned to the slot
    pub calories: f64,
    /// Scheduled time
    pub time: NaiveTime,
}

/// A scored candidate recipe
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecipe<'c> {
    /// Candidate
    pub recipe: &'c Recipe,
    /// Score (clamped at zero)
    pub score: f64,
    /// Absolute calorie gap between one portion and the slot target
    pub calorie_gap: f64,
}

/// Preferences resolved once per generation call
struct Preferences<'p> {
    profile: &'p UserProfile,
    excluded: Vec<String>,
    liked: Vec<String>,
    wanted_tags: Vec<RecipeTag>,
    time_limit_min: u32,
}

impl<'p> Preferences<'p> {
    fn resolve(profile: &'p UserProfile, config: &MealPlanConfig) -> Self {
        let mut wanted_tags = Vec::new();
        if profile.budget_tier == BudgetTier::Low {
            wanted_tags.push(RecipeTag::Budget);
        }
        if profile.dietary.protein_preference == ProteinPreference::High {
            wanted_tags.push(RecipeTag::HighProtein);
        }
        if profile.wants_cholesterol_friendly() {
            wanted_tags.push(RecipeTag::CholesterolFriendly);
        }
        if profile.dietary.batch_cooking {
            wanted_tags.push(RecipeTag::BatchCookable);
        }
        Self {
            profile,
            excluded: profile.excluded_ingredients(),
            liked: profile
                .dietary
                .liked_ingredients
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            wanted_tags,
            time_limit_min: config.time_limits.limit(profile.budget_tier),
        }
    }
}

/// Whether a recipe ingredient mentions a term, through the catalog food when known
fn ingredient_matches(food_id: &str, term: &str, catalog: &dyn CatalogProvider) -> bool {
    catalog.food(food_id).map_or_else(
        || food_id.to_lowercase().contains(term),
        |food| food.matches_term(term),
    )
}

fn relative_gap(calories: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return f64::INFINITY;
    }
    (calories - target).abs() / target
}

/// Meal plan generator bound to its configuration table
#[derive(Debug, Clone, Default)]
pub struct MealPlanner {
    config: MealPlanConfig,
}

impl MealPlanner {
    /// Create a planner
    #[must_use]
    pub const fn new(config: MealPlanConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &MealPlanConfig {
        &self.config
    }

    /// Day template chosen from preference flags
    #[must_use]
    pub fn select_template(&self, profile: &UserProfile) -> DayTemplateKind {
        if profile.dietary.intermittent_fasting {
            DayTemplateKind::Fasting
        } else if profile.budget_tier == BudgetTier::Low && !profile.dietary.batch_cooking {
            DayTemplateKind::Simple
        } else {
            DayTemplateKind::Normal
        }
    }

    /// Per-slot calorie targets for a template
    #[must_use]
    pub fn slot_targets(
        &self,
        kind: DayTemplateKind,
        training_day: bool,
        daily_calories: f64,
    ) -> Vec<SlotTarget> {
        self.config
            .templates
            .get(kind)
            .active_slots(training_day)
            .iter()
            .map(|share: &SlotShare| SlotTarget {
                slot: share.slot,
                calories: daily_calories * share.fraction,
                time: share.time,
            })
            .collect()
    }

    /// Hard filters shared by slot selection and substitutions
    fn passes_filters(
        &self,
        recipe: &Recipe,
        prefs: &Preferences<'_>,
        catalog: &dyn CatalogProvider,
    ) -> bool {
        let dietary = &prefs.profile.dietary;
        if dietary.no_oil && !recipe.has_tag(RecipeTag::NoOil) {
            return false;
        }
        if dietary.no_sugar && !recipe.has_tag(RecipeTag::NoSugar) {
            return false;
        }
        if recipe.total_time_min() > prefs.time_limit_min {
            return false;
        }
        !recipe.ingredients.iter().any(|ingredient| {
            prefs
                .excluded
                .iter()
                .any(|term| ingredient_matches(&ingredient.food_id, term, catalog))
        })
    }

    /// Recipes of the slot's category that survive every hard filter
    ///
    /// # Errors
    ///
    /// Returns the profile's validation error, if any
    pub fn filter_candidates<'c>(
        &self,
        slot: MealSlot,
        profile: &UserProfile,
        catalog: &'c dyn CatalogProvider,
    ) -> AppResult<Vec<&'c Recipe>> {
        profile.validate()?;
        let prefs = Preferences::resolve(profile, &self.config);
        Ok(self.candidates_for(slot, &prefs, catalog))
    }

    fn candidates_for<'c>(
        &self,
        slot: MealSlot,
        prefs: &Preferences<'_>,
        catalog: &'c dyn CatalogProvider,
    ) -> Vec<&'c Recipe> {
        let category = slot.category();
        catalog
            .recipes()
            .iter()
            .filter(|r| r.category == category)
            .filter(|r| self.passes_filters(r, prefs, catalog))
            .collect()
    }

    fn score<'c>(
        &self,
        recipe: &'c Recipe,
        target_calories: f64,
        prefs: &Preferences<'_>,
        catalog: &dyn CatalogProvider,
        recently_served: &HashSet<String>,
    ) -> ScoredRecipe<'c> {
        let weights = &self.config.scoring;
        let calories = recipe.nutrition.calories;
        let mut score = weights.base_score
            - relative_gap(calories, target_calories) * weights.deviation_weight;

        for tag in &prefs.wanted_tags {
            if recipe.has_tag(*tag) {
                score += weights.tag_match_bonus;
            } else {
                score -= weights.tag_miss_penalty;
            }
        }

        let liked = prefs
            .liked
            .iter()
            .filter(|term| {
                recipe
                    .ingredients
                    .iter()
                    .any(|i| ingredient_matches(&i.food_id, term, catalog))
            })
            .count();
        score += (liked as f64 * weights.liked_ingredient_bonus).min(weights.liked_ingredient_cap);

        if prefs.profile.budget_tier == BudgetTier::Low
            && recipe.estimated_cost > weights.budget_cost_limit
            && weights.budget_cost_limit > 0.0
        {
            let overshoot = recipe.estimated_cost / weights.budget_cost_limit - 1.0;
            score -= (overshoot * weights.cost_penalty_weight).min(weights.cost_penalty_cap);
        }

        if recently_served.contains(&recipe.id) {
            score -= weights.repeat_penalty;
        }

        ScoredRecipe {
            recipe,
            score: score.max(0.0),
            calorie_gap: (calories - target_calories).abs(),
        }
    }

    /// Score every filtered candidate for a slot target, best first
    ///
    /// # Errors
    ///
    /// Returns the profile's validation error, if any
    pub fn rank_candidates<'c>(
        &self,
        slot: &SlotTarget,
        profile: &UserProfile,
        catalog: &'c dyn CatalogProvider,
    ) -> AppResult<Vec<ScoredRecipe<'c>>> {
        profile.validate()?;
        let prefs = Preferences::resolve(profile, &self.config);
        let mut ranked: Vec<ScoredRecipe<'c>> = self
            .candidates_for(slot.slot, &prefs, catalog)
            .into_iter()
            .map(|r| self.score(r, slot.calories, &prefs, catalog, &HashSet::new()))
            .collect();
        ranked.sort_by(compare_candidates);
        Ok(ranked)
    }

    fn select<'c>(
        &self,
        slot: &SlotTarget,
        prefs: &Preferences<'_>,
        catalog: &'c dyn CatalogProvider,
        recently_served: &HashSet<String>,
    ) -> Option<ScoredRecipe<'c>> {
        let candidates = self.candidates_for(slot.slot, prefs, catalog);
        if candidates.is_empty() {
            return None;
        }
        let window = self.config.selection.candidate_window;
        let (in_window, outside): (Vec<&Recipe>, Vec<&Recipe>) = candidates
            .into_iter()
            .partition(|r| relative_gap(r.nutrition.calories, slot.calories) <= window);
        let pool = if in_window.is_empty() {
            outside
        } else {
            in_window
        };

        pool.into_iter()
            .map(|r| self.score(r, slot.calories, prefs, catalog, recently_served))
            .min_by(compare_candidates)
    }

    /// Portion multiplier bringing a recipe close to a slot target
    ///
    /// Clamped to the configured bounds and rounded to the nearest step.
    #[must_use]
    pub fn scale_portions(&self, recipe_calories: f64, target_calories: f64) -> f64 {
        let bounds = &self.config.selection;
        if recipe_calories <= 0.0 {
            return bounds.min_portions;
        }
        let raw =
            (target_calories / recipe_calories).clamp(bounds.min_portions, bounds.max_portions);
        let stepped = (raw / bounds.portion_step).round() * bounds.portion_step;
        stepped.clamp(bounds.min_portions, bounds.max_portions)
    }

    /// Check a day against the validation thresholds
    #[must_use]
    pub fn validate_day(&self, day: &MealPlanDay) -> PlanValidation {
        let thresholds = &self.config.validation;
        let targets = &day.targets;
        let totals = &day.totals;
        let mut issues = Vec::new();

        if targets.calories > 0.0 {
            let deviation = (totals.calories - targets.calories) / targets.calories;
            if deviation.abs() > thresholds.max_calorie_deviation {
                issues.push(PlanIssue::CalorieDeviation { deviation });
            }
        }
        if targets.protein_g > 0.0 {
            let ratio = totals.protein_g / targets.protein_g;
            if ratio < thresholds.min_protein_ratio {
                issues.push(PlanIssue::ProteinShortfall { ratio });
            }
        }
        if day.meals.len() < thresholds.min_meals {
            issues.push(PlanIssue::TooFewMeals {
                count: day.meals.len(),
            });
        }

        PlanValidation {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Generate one day of meals
    ///
    /// # Errors
    ///
    /// - Validation errors for an implausible profile or non-positive targets
    /// - `NoCandidates` (recoverable) when no slot could be filled
    pub fn generate_day(
        &self,
        profile: &UserProfile,
        targets: &DailyTargets,
        catalog: &dyn CatalogProvider,
        date: NaiveDate,
        training_day: bool,
    ) -> AppResult<MealPlanDay> {
        profile.validate()?;
        self.build_day(profile, targets, catalog, date, training_day, &HashSet::new())
    }

    fn build_day(
        &self,
        profile: &UserProfile,
        targets: &DailyTargets,
        catalog: &dyn CatalogProvider,
        date: NaiveDate,
        training_day: bool,
        recently_served: &HashSet<String>,
    ) -> AppResult<MealPlanDay> {
        if !(targets.calories.is_finite() && targets.calories > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Daily calorie target must be positive, got {}",
                targets.calories
            )));
        }

        let prefs = Preferences::resolve(profile, &self.config);
        let template = self.select_template(profile);
        let mut meals = Vec::new();

        for slot in self.slot_targets(template, training_day, targets.calories) {
            let Some(best) = self.select(&slot, &prefs, catalog, recently_served) else {
                warn!(
                    date = %date,
                    slot = ?slot.slot,
                    "No recipe passes the filters for this slot, skipping it"
                );
                continue;
            };
            let portions = self.scale_portions(best.recipe.nutrition.calories, slot.calories);
            debug!(
                date = %date,
                slot = ?slot.slot,
                recipe_id = %best.recipe.id,
                score = best.score,
                portions,
                "Selected recipe for slot"
            );
            meals.push(Meal {
                slot: slot.slot,
                recipe_id: best.recipe.id.clone(),
                recipe_name: best.recipe.name.clone(),
                portions,
                scheduled_time: slot.time,
                slot_target_calories: slot.calories,
                nutrition: best.recipe.nutrition.scaled_rounded(portions),
                completed: false,
            });
        }

        if meals.is_empty() {
            return Err(AppError::no_candidates(format!(
                "No meal could be planned for {date}"
            ))
            .with_details(json!({ "date": date.to_string(), "template": template })));
        }

        let totals = meals
            .iter()
            .fold(NutritionFacts::default(), |acc, m| acc.plus(&m.nutrition));
        let mut day = MealPlanDay {
            date,
            template,
            training_day,
            targets: *targets,
            meals,
            totals,
            validation: PlanValidation::default(),
        };
        day.validation = self.validate_day(&day);
        if !day.validation.is_valid {
            warn!(date = %date, issues = ?day.validation.issues, "Generated day failed validation");
        }

        info!(
            date = %date,
            template = ?template,
            meals = day.meals.len(),
            total_kcal = day.totals.calories,
            "Generated meal plan day"
        );
        Ok(day)
    }

    /// Generate seven consecutive days starting at `week_start`
    ///
    /// Recipes served the previous day are penalized to keep the week varied.
    ///
    /// # Errors
    ///
    /// Fails as a whole when any day fails (see [`Self::generate_day`])
    pub fn generate_week(
        &self,
        profile: &UserProfile,
        targets: &DailyTargets,
        catalog: &dyn CatalogProvider,
        week_start: NaiveDate,
        training_days: &[Weekday],
    ) -> AppResult<Vec<MealPlanDay>> {
        profile.validate()?;
        let mut days: Vec<MealPlanDay> = Vec::with_capacity(7);
        let mut previous: HashSet<String> = HashSet::new();

        for offset in 0..7 {
            let date = week_start + Duration::days(offset);
            let training_day = training_days.contains(&date.weekday());
            let day = self.build_day(profile, targets, catalog, date, training_day, &previous)?;
            previous = day.meals.iter().map(|m| m.recipe_id.clone()).collect();
            days.push(day);
        }
        Ok(days)
    }

    /// Alternatives for a recipe: same category, passes the filters, calories
    /// within the substitution window, closest first
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` when the recipe is not in the catalog
    /// - The profile's validation error, if any
    pub fn suggest_substitutions<'c>(
        &self,
        recipe_id: &str,
        profile: &UserProfile,
        catalog: &'c dyn CatalogProvider,
    ) -> AppResult<Vec<&'c Recipe>> {
        profile.validate()?;
        let original = catalog
            .recipe(recipe_id)
            .ok_or_else(|| AppError::not_found(format!("Recipe '{recipe_id}'")))?;
        let prefs = Preferences::resolve(profile, &self.config);
        let window = self.config.substitution.calorie_window;
        let reference = original.nutrition.calories;

        let mut alternatives: Vec<&Recipe> = catalog
            .recipes()
            .iter()
            .filter(|r| r.id != original.id && r.category == original.category)
            .filter(|r| relative_gap(r.nutrition.calories, reference) <= window)
            .filter(|r| self.passes_filters(r, &prefs, catalog))
            .collect();
        alternatives.sort_by(|a, b| {
            (a.nutrition.calories - reference)
                .abs()
                .total_cmp(&(b.nutrition.calories - reference).abs())
                .then_with(|| a.id.cmp(&b.id))
        });
        alternatives.truncate(self.config.substitution.max_suggestions);

        debug!(
            recipe_id,
            alternatives = alternatives.len(),
            "Computed substitutions"
        );
        Ok(alternatives)
    }
}

/// Best first: higher score, then smaller calorie gap, then recipe id
fn compare_candidates(a: &ScoredRecipe<'_>, b: &ScoredRecipe<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.calorie_gap.total_cmp(&b.calorie_gap))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_portions_rounds_to_quarters() {
        let planner = MealPlanner::default();
        assert!((planner.scale_portions(400.0, 500.0) - 1.25).abs() < f64::EPSILON);
        assert!((planner.scale_portions(400.0, 430.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_portions_clamps_bounds() {
        let planner = MealPlanner::default();
        assert!((planner.scale_portions(100.0, 1000.0) - 2.0).abs() < f64::EPSILON);
        assert!((planner.scale_portions(1000.0, 100.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relative_gap_handles_zero_target() {
        assert!(relative_gap(100.0, 0.0).is_infinite());
        assert!((relative_gap(115.0, 100.0) - 0.15).abs() < 1e-9);
    }
}
