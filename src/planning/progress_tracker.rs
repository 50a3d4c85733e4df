// ABOUTME: Progress tracking engine: weekly weight trend, adherence and the closed rule set
// ABOUTME: Each rule has a typed evaluator; adjustments re-clamp calories to the safety floor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress Tracking Engine
//!
//! The analysis window is the seven days ending at `as_of` (inclusive).
//! Weight change compares the latest measurement with the latest one taken at
//! least a week earlier (falling back to the earliest measurement), and with
//! the latest one taken at least two weeks earlier when history allows.
//!
//! Rapid and stalled loss can never fire together: both are derived from the
//! single trend classification, which is either `FastLoss` or `SlowLoss`.

use crate::config::{ProgressConfig, SafetyFloorsConfig};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use nutriplan_core::constants::time::WEEK_DAYS;
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{
    AdherenceBreakdown, Adjustment, AdjustmentOutcome, MealPlanDay, Measurement, PersonalRecords,
    ProgressReport, ProgressRule, ProgressSuggestion, RecordMetric, Sex, UserProfile, WaterLog,
    WeightTrend, WorkoutPlanDay,
};
use tracing::{debug, info};

/// History handed to a weekly analysis
#[derive(Debug, Clone, Copy)]
pub struct ProgressInputs<'a> {
    /// Profile (goal direction, water target)
    pub profile: &'a UserProfile,
    /// Body measurements, any order
    pub measurements: &'a [Measurement],
    /// Meal plan days with completion flags
    pub meal_days: &'a [MealPlanDay],
    /// Workout sessions with completion flags and exertion
    pub workouts: &'a [WorkoutPlanDay],
    /// Daily water intake
    pub water_logs: &'a [WaterLog],
    /// Latest personal records
    pub current_records: Option<&'a PersonalRecords>,
    /// Personal records at the start of the window
    pub previous_records: Option<&'a PersonalRecords>,
}

/// Facts every rule evaluator reads
#[derive(Debug, Clone)]
struct RuleContext {
    trend: WeightTrend,
    weekly_change_pct: f64,
    losing_weight: bool,
    protein_compliant_days: usize,
    total_days: usize,
    has_meal_plan: bool,
    meal_adherence: f64,
    rated_sessions: usize,
    average_exertion: Option<f64>,
    improvements: Vec<RecordMetric>,
}

/// Outcome of one evaluator before it is stamped into a suggestion
struct Triggered {
    message: String,
    adjustment: Option<Adjustment>,
    requires_action: bool,
    auto_applied: bool,
}

fn percent_change(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}

fn in_window(date: NaiveDate, as_of: NaiveDate) -> bool {
    date <= as_of && date > as_of - Duration::days(WEEK_DAYS)
}

fn ratio_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Progress tracking engine bound to its rule table and the calorie floors
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    config: ProgressConfig,
    floors: SafetyFloorsConfig,
}

impl ProgressTracker {
    /// Create a tracker
    #[must_use]
    pub const fn new(config: ProgressConfig, floors: SafetyFloorsConfig) -> Self {
        Self { config, floors }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Classify a weekly change, using the two-week change to detect a stall
    #[must_use]
    pub fn classify_trend(
        &self,
        weekly_change_pct: f64,
        two_week_change_pct: Option<f64>,
    ) -> WeightTrend {
        let bands = &self.config.trend;
        if weekly_change_pct < bands.fast_loss_below_pct {
            WeightTrend::FastLoss
        } else if weekly_change_pct < bands.normal_loss_below_pct {
            WeightTrend::NormalLoss
        } else if weekly_change_pct >= bands.gain_from_pct {
            WeightTrend::Gain
        } else if weekly_change_pct < 0.0
            && two_week_change_pct.is_some_and(|c| c >= bands.stall_two_week_min_pct)
        {
            WeightTrend::SlowLoss
        } else {
            WeightTrend::Maintenance
        }
    }

    /// Whether a day counts toward protein compliance
    #[must_use]
    pub fn is_protein_compliant(&self, day: &MealPlanDay) -> bool {
        let rules = &self.config.rules;
        day.adherence_score() >= rules.protein_day_min_adherence
            && day.completed_protein_g() >= day.targets.protein_g * rules.protein_day_min_ratio
    }

    /// Meal, workout and water adherence plus their weighted blend
    #[must_use]
    pub fn adherence(
        &self,
        meal_days: &[&MealPlanDay],
        workouts: &[&WorkoutPlanDay],
        water_logs: &[&WaterLog],
        water_target_liters: f64,
    ) -> AdherenceBreakdown {
        let weights = &self.config.adherence;
        let planned_meals: usize = meal_days.iter().map(|d| d.meals.len()).sum();
        let completed_meals = meal_days
            .iter()
            .flat_map(|d| d.meals.iter())
            .filter(|m| m.completed)
            .count();
        let completed_sessions = workouts.iter().filter(|w| w.completed).count();
        let water_days = water_logs
            .iter()
            .filter(|w| w.liters >= water_target_liters * weights.water_day_min_ratio)
            .count();

        let meal = ratio_pct(completed_meals, planned_meals);
        let workout = ratio_pct(completed_sessions, workouts.len());
        let water = ratio_pct(water_days, water_logs.len());
        let overall = weights.water_weight.mul_add(
            water,
            weights
                .meal_weight
                .mul_add(meal, weights.workout_weight * workout),
        );

        AdherenceBreakdown {
            meal,
            workout,
            water,
            overall,
        }
    }

    /// Analyze the week ending at `as_of`
    ///
    /// # Errors
    ///
    /// - Validation errors for an implausible profile
    /// - `ValueOutOfRange` for a measurement on or before `as_of` with an
    ///   implausible weight or body fat reading
    /// - `InsufficientData` (recoverable) with fewer than two measurements on
    ///   or before `as_of`
    pub fn analyze_weekly_progress(
        &self,
        inputs: &ProgressInputs<'_>,
        as_of: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<ProgressReport> {
        inputs.profile.validate()?;

        let mut history: Vec<&Measurement> = inputs
            .measurements
            .iter()
            .filter(|m| m.date <= as_of)
            .collect();
        for measurement in &history {
            measurement.validate()?;
        }
        history.sort_by_key(|m| m.date);
        let &[first, .., latest] = history.as_slice() else {
            return Err(AppError::insufficient_data(
                "At least two measurements are needed to analyze progress",
            ));
        };

        let latest_before = |days: i64| {
            let cutoff = as_of - Duration::days(days);
            history.iter().rev().find(|m| m.date <= cutoff).copied()
        };
        let week_baseline = latest_before(WEEK_DAYS).unwrap_or(first);
        let weekly_change_pct = percent_change(week_baseline.weight_kg, latest.weight_kg);
        let two_week_change_pct =
            latest_before(2 * WEEK_DAYS).map(|m| percent_change(m.weight_kg, latest.weight_kg));
        let trend = self.classify_trend(weekly_change_pct, two_week_change_pct);

        let meal_days: Vec<&MealPlanDay> = inputs
            .meal_days
            .iter()
            .filter(|d| in_window(d.date, as_of))
            .collect();
        let workouts: Vec<&WorkoutPlanDay> = inputs
            .workouts
            .iter()
            .filter(|w| in_window(w.date, as_of))
            .collect();
        let water_logs: Vec<&WaterLog> = inputs
            .water_logs
            .iter()
            .filter(|w| in_window(w.date, as_of))
            .collect();

        let adherence = self.adherence(
            &meal_days,
            &workouts,
            &water_logs,
            inputs.profile.water_target_liters,
        );
        let protein_compliant_days = meal_days
            .iter()
            .filter(|d| self.is_protein_compliant(d))
            .count();

        let exertion: Vec<f64> = workouts
            .iter()
            .filter(|w| w.completed)
            .filter_map(|w| w.perceived_exertion.map(f64::from))
            .collect();
        let average_exertion = if exertion.is_empty() {
            None
        } else {
            Some(exertion.iter().sum::<f64>() / exertion.len() as f64)
        };

        let improvements = match (inputs.current_records, inputs.previous_records) {
            (Some(current), Some(previous)) => current.improvements_over(previous),
            _ => Vec::new(),
        };

        let context = RuleContext {
            trend,
            weekly_change_pct,
            losing_weight: inputs.profile.is_losing_weight(),
            protein_compliant_days,
            total_days: meal_days.len(),
            has_meal_plan: meal_days.iter().any(|d| !d.meals.is_empty()),
            meal_adherence: adherence.meal,
            rated_sessions: exertion.len(),
            average_exertion,
            improvements,
        };

        let suggestions: Vec<ProgressSuggestion> = ProgressRule::ALL
            .iter()
            .filter_map(|rule| {
                self.evaluate(*rule, &context).map(|t| ProgressSuggestion {
                    rule: *rule,
                    message: t.message,
                    adjustment: t.adjustment,
                    requires_action: t.requires_action,
                    auto_applied: t.auto_applied,
                    created_at: now,
                })
            })
            .collect();

        info!(
            user_id = %inputs.profile.id,
            as_of = %as_of,
            weekly_change_pct,
            trend = ?trend,
            suggestions = suggestions.len(),
            "Analyzed weekly progress"
        );

        Ok(ProgressReport {
            as_of,
            weekly_change_pct,
            two_week_change_pct,
            trend,
            protein_compliant_days,
            total_days: meal_days.len(),
            adherence,
            suggestions,
        })
    }

    fn evaluate(&self, rule: ProgressRule, ctx: &RuleContext) -> Option<Triggered> {
        let triggered = match rule {
            ProgressRule::RapidLoss => self.rapid_loss(ctx),
            ProgressRule::StalledLoss => self.stalled_loss(ctx),
            ProgressRule::ProteinShortfall => self.protein_shortfall(ctx),
            ProgressRule::SustainedHighExertion => self.sustained_high_exertion(ctx),
            ProgressRule::PerformanceImprovement => self.performance_improvement(ctx),
            ProgressRule::LowAdherence => self.low_adherence(ctx),
            ProgressRule::HighAdherence => self.high_adherence(ctx),
        };
        if triggered.is_some() {
            debug!(rule = rule.id(), "Progress rule triggered");
        }
        triggered
    }

    fn rapid_loss(&self, ctx: &RuleContext) -> Option<Triggered> {
        if ctx.trend != WeightTrend::FastLoss {
            return None;
        }
        let increase = self.config.adjustments.rapid_loss_calorie_increase;
        Some(Triggered {
            message: format!(
                "Weight dropped {:.1}% this week, faster than is sustainable. Increase calories by {:.0}%",
                ctx.weekly_change_pct.abs(),
                increase * 100.0
            ),
            adjustment: Some(Adjustment::Calories(increase)),
            requires_action: true,
            auto_applied: false,
        })
    }

    fn stalled_loss(&self, ctx: &RuleContext) -> Option<Triggered> {
        if ctx.trend != WeightTrend::SlowLoss || !ctx.losing_weight {
            return None;
        }
        let decrease = self.config.adjustments.stalled_calorie_decrease;
        Some(Triggered {
            message: format!(
                "Weight loss has stalled for two weeks. Reduce calories by {:.0}%",
                decrease * 100.0
            ),
            adjustment: Some(Adjustment::Calories(-decrease)),
            requires_action: true,
            auto_applied: false,
        })
    }

    fn protein_shortfall(&self, ctx: &RuleContext) -> Option<Triggered> {
        let grace = self.config.rules.protein_grace_days;
        if ctx.total_days <= grace || ctx.protein_compliant_days >= ctx.total_days - grace {
            return None;
        }
        Some(Triggered {
            message: format!(
                "Protein target met on only {} of {} days. Add a protein source to each meal",
                ctx.protein_compliant_days, ctx.total_days
            ),
            adjustment: None,
            requires_action: true,
            auto_applied: false,
        })
    }

    fn sustained_high_exertion(&self, ctx: &RuleContext) -> Option<Triggered> {
        let rules = &self.config.rules;
        let average = ctx.average_exertion?;
        if ctx.rated_sessions < rules.high_exertion_min_sessions || average < rules.high_exertion_rpe
        {
            return None;
        }
        let volume = self.config.adjustments.high_exertion_volume;
        Some(Triggered {
            message: format!(
                "Average exertion {average:.1}/10 over {} sessions. Reduce training volume by {:.0}%",
                ctx.rated_sessions,
                (1.0 - volume) * 100.0
            ),
            adjustment: Some(Adjustment::Volume(volume)),
            requires_action: true,
            auto_applied: false,
        })
    }

    fn performance_improvement(&self, ctx: &RuleContext) -> Option<Triggered> {
        if ctx.improvements.len() < self.config.rules.improvement_min_metrics {
            return None;
        }
        let volume = self.config.adjustments.improvement_volume;
        Some(Triggered {
            message: format!(
                "{} personal records improved. Training volume increased by {:.1}%",
                ctx.improvements.len(),
                (volume - 1.0) * 100.0
            ),
            adjustment: Some(Adjustment::Volume(volume)),
            requires_action: false,
            auto_applied: true,
        })
    }

    fn low_adherence(&self, ctx: &RuleContext) -> Option<Triggered> {
        if !ctx.has_meal_plan || ctx.meal_adherence >= self.config.rules.low_adherence_below {
            return None;
        }
        Some(Triggered {
            message: format!(
                "Only {:.0}% of planned meals were completed. Consider simpler recipes or fewer meals",
                ctx.meal_adherence
            ),
            adjustment: None,
            requires_action: true,
            auto_applied: false,
        })
    }

    fn high_adherence(&self, ctx: &RuleContext) -> Option<Triggered> {
        if !ctx.has_meal_plan || ctx.meal_adherence < self.config.rules.high_adherence_from {
            return None;
        }
        Some(Triggered {
            message: format!(
                "{:.0}% of planned meals completed this week. Keep it up!",
                ctx.meal_adherence
            ),
            adjustment: None,
            requires_action: false,
            auto_applied: false,
        })
    }

    /// Apply at most one calorie rule and one volume multiplier from a report
    ///
    /// Rapid loss wins over stalled loss; reduced volume wins over increased
    /// volume. The new target is re-clamped to the safety floor.
    #[must_use]
    pub fn apply_adjustments(
        &self,
        report: &ProgressReport,
        current_calorie_target: f64,
        sex: Sex,
    ) -> AdjustmentOutcome {
        let find = |rule: ProgressRule| report.suggestions.iter().find(|s| s.rule == rule);
        let mut applied_rules = Vec::new();

        let calorie_change = [ProgressRule::RapidLoss, ProgressRule::StalledLoss]
            .into_iter()
            .find_map(|rule| match find(rule)?.adjustment {
                Some(Adjustment::Calories(change)) => {
                    applied_rules.push(rule);
                    Some(change)
                }
                _ => None,
            })
            .unwrap_or(0.0);

        let volume_multiplier = [
            ProgressRule::SustainedHighExertion,
            ProgressRule::PerformanceImprovement,
        ]
        .into_iter()
        .find_map(|rule| match find(rule)?.adjustment {
            Some(Adjustment::Volume(multiplier)) => {
                applied_rules.push(rule);
                Some(multiplier)
            }
            _ => None,
        });

        let floor = self.floors.floor(sex);
        let new_calorie_target = (current_calorie_target * (1.0 + calorie_change)).max(floor);

        info!(
            previous = current_calorie_target,
            new = new_calorie_target,
            volume = ?volume_multiplier,
            "Applied progress adjustments"
        );

        AdjustmentOutcome {
            previous_calorie_target: current_calorie_target,
            new_calorie_target,
            calorie_change,
            volume_multiplier,
            applied_rules,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_window_excludes_eighth_day() {
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert!(in_window(as_of, as_of));
        assert!(in_window(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(), as_of));
        assert!(!in_window(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(), as_of));
        assert!(!in_window(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(), as_of));
    }

    #[test]
    fn test_trend_bands() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.classify_trend(-1.5, None), WeightTrend::FastLoss);
        assert_eq!(tracker.classify_trend(-0.5, None), WeightTrend::NormalLoss);
        assert_eq!(tracker.classify_trend(-0.1, Some(-0.3)), WeightTrend::SlowLoss);
        assert_eq!(tracker.classify_trend(-0.1, Some(-0.8)), WeightTrend::Maintenance);
        assert_eq!(tracker.classify_trend(-0.1, None), WeightTrend::Maintenance);
        assert_eq!(tracker.classify_trend(0.3, None), WeightTrend::Gain);
    }
}
