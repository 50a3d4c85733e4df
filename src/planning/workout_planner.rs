// ABOUTME: Workout plan generator: fitness evaluation, template selection, progression, calories
// ABOUTME: Produces progressed WorkoutPlanDay copies and post-session feedback notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout Plan Generator
//!
//! Energy cost per block uses the metabolic-equivalent method:
//! kcal = MET x body weight (kg) x duration (h).
//!
//! # Scientific References
//!
//! - Ainsworth, B.E., et al. (2011). 2011 Compendium of Physical Activities.
//!   *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.
//!   <https://doi.org/10.1249/MSS.0b013e31821ece12>

use crate::config::WorkoutConfig;
use chrono::{DateTime, NaiveDate, Utc};
use nutriplan_core::errors::{AppError, AppResult};
use nutriplan_core::models::{
    BlockKind, BlockParams, BlockPhase, CatalogProvider, EquipmentInventory, ExerciseBlock,
    FitnessLevel, PersonalRecords, ProgressedBlock, RecordMetric, Sex, StrengthExercise,
    UserProfile, WorkoutPlanDay, WorkoutTemplate,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

/// Result of the 0-8 fitness evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FitnessAssessment {
    /// Points earned across the four criteria
    pub score: u8,
    /// Level derived from the score
    pub level: FitnessLevel,
}

/// Category of a post-session note
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// The session felt manageable; push a little more next time
    IncreaseLoad,
    /// The session felt very hard; cut weekly volume
    ReduceVolume,
    /// Recovery advice after a hard session
    Recovery,
    /// A personal record improved
    PersonalRecord,
}

/// One post-session note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackNote {
    /// Category
    pub kind: FeedbackKind,
    /// Human-readable text
    pub message: String,
}

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn scale_count(value: u32, factor: f64, minimum: u32) -> u32 {
    let scaled = (f64::from(value) * factor).round().max(0.0);
    let scaled = if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    };
    scaled.max(minimum)
}

/// Workout plan generator bound to its configuration table
#[derive(Debug, Clone, Default)]
pub struct WorkoutPlanner {
    config: WorkoutConfig,
}

impl WorkoutPlanner {
    /// Create a planner
    #[must_use]
    pub const fn new(config: WorkoutConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    /// Score push-ups (sex-adjusted), plank, run speed and run duration 0-2 each
    #[must_use]
    pub fn evaluate_fitness_level(&self, sex: Sex, records: &PersonalRecords) -> FitnessAssessment {
        let thresholds = &self.config.fitness;
        let score = thresholds.pushups(sex).points(f64::from(records.max_pushups))
            + thresholds.plank_s.points(f64::from(records.plank_hold_s))
            + thresholds.run_speed_kmh.points(records.run_speed_kmh)
            + thresholds.run_duration_min.points(records.run_duration_min);

        let level = if score >= thresholds.advanced_score {
            FitnessLevel::Advanced
        } else if score >= thresholds.intermediate_score {
            FitnessLevel::Intermediate
        } else {
            FitnessLevel::Beginner
        };
        FitnessAssessment { score, level }
    }

    /// Templates whose every required capability the user owns, in catalog order
    #[must_use]
    pub fn eligible_templates<'c>(
        &self,
        equipment: &EquipmentInventory,
        catalog: &'c dyn CatalogProvider,
    ) -> Vec<&'c WorkoutTemplate> {
        catalog
            .workout_templates()
            .iter()
            .filter(|t| t.required_equipment.iter().all(|e| equipment.has(*e)))
            .collect()
    }

    /// Selection score: closeness to the preferred duration, category bonus,
    /// high-impact penalty
    #[must_use]
    pub fn score_template(&self, template: &WorkoutTemplate, profile: &UserProfile) -> f64 {
        let weights = &self.config.selection;
        let prefs = &profile.workout;
        let duration_gap = (template.duration_min() - f64::from(prefs.preferred_duration_min)).abs();
        let mut score = duration_gap.mul_add(-weights.duration_weight, weights.base_score);
        if template.category == prefs.preferred_category {
            score += weights.category_bonus;
        }
        if prefs.avoid_high_impact && template.is_high_impact() {
            score -= weights.high_impact_penalty;
        }
        score
    }

    /// Pick the best eligible template for a level
    ///
    /// Falls back to every eligible template when none is written for the
    /// level. Ties keep catalog order.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidates` (recoverable) when the user's equipment satisfies
    /// no template
    pub fn select_template<'c>(
        &self,
        profile: &UserProfile,
        level: FitnessLevel,
        catalog: &'c dyn CatalogProvider,
    ) -> AppResult<&'c WorkoutTemplate> {
        let eligible = self.eligible_templates(&profile.equipment, catalog);
        if eligible.is_empty() {
            return Err(AppError::no_candidates(
                "No workout template matches the available equipment",
            )
            .with_details(json!({ "templates_in_catalog": catalog.workout_templates().len() })));
        }

        let for_level: Vec<&WorkoutTemplate> = eligible
            .iter()
            .copied()
            .filter(|t| t.supports_level(level))
            .collect();
        let pool = if for_level.is_empty() {
            warn!(
                level = ?level,
                eligible = eligible.len(),
                "No eligible template targets this level, using all eligible templates"
            );
            eligible
        } else {
            for_level
        };

        let mut best: Option<(&WorkoutTemplate, f64)> = None;
        for template in pool {
            let score = self.score_template(template, profile);
            debug!(template_id = %template.id, score, "Scored workout template");
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((template, score));
            }
        }
        best.map(|(template, _)| template)
            .ok_or_else(|| AppError::internal("Template pool unexpectedly empty"))
    }

    /// Session counter since account creation, one session every few days
    #[must_use]
    pub fn session_number(&self, created_at: DateTime<Utc>, date: NaiveDate) -> u32 {
        let elapsed = (date - created_at.date_naive()).num_days().max(0);
        let spacing = self.config.progression.days_per_session.max(1);
        u32::try_from(elapsed / spacing).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    /// Level multiplier compounded with `1 + step x (session - 1)`
    #[must_use]
    pub fn intensity_multiplier(&self, level: FitnessLevel, session_number: u32) -> f64 {
        let progression = &self.config.progression;
        let sessions_done = f64::from(session_number.saturating_sub(1));
        let session_multiplier = progression.session_step.mul_add(sessions_done, 1.0);
        progression.level_multiplier(level) * session_multiplier
    }

    fn progress_params(
        &self,
        params: &BlockParams,
        multiplier: f64,
        records: &PersonalRecords,
        equipment: &EquipmentInventory,
    ) -> BlockParams {
        let p = &self.config.progression;
        match params {
            BlockParams::Run {
                speed_kmh,
                duration_min,
                incline_pct,
            } => BlockParams::Run {
                speed_kmh: round_to((speed_kmh * multiplier).max(p.min_run_speed_kmh), 0.1),
                duration_min: *duration_min,
                incline_pct: *incline_pct,
            },
            BlockParams::Interval {
                exercise,
                work_s,
                rest_s,
                rounds,
            } => BlockParams::Interval {
                exercise: exercise.clone(),
                work_s: scale_count(*work_s, multiplier, 1),
                rest_s: scale_count(*rest_s, 1.0 / multiplier, p.min_interval_rest_s),
                rounds: *rounds,
            },
            BlockParams::Strength {
                exercise,
                sets,
                reps,
                hold_s,
                load_kg,
                rest_s,
            } => BlockParams::Strength {
                exercise: *exercise,
                sets: *sets,
                reps: reps.map(|r| self.progress_reps(*exercise, r, multiplier, records)),
                hold_s: hold_s.map(|h| self.progress_hold(*exercise, h, multiplier, records)),
                load_kg: load_kg
                    .map(|kg| self.progress_load(*exercise, kg, multiplier, records, equipment)),
                rest_s: *rest_s,
            },
            BlockParams::Basic { .. } => params.clone(),
        }
    }

    fn progress_reps(
        &self,
        exercise: StrengthExercise,
        template_reps: u32,
        multiplier: f64,
        records: &PersonalRecords,
    ) -> u32 {
        let p = &self.config.progression;
        let from_record = match exercise {
            StrengthExercise::PushUp => Some((records.max_pushups, p.pushup_fraction)),
            StrengthExercise::SitUp => Some((records.max_situps, p.situp_fraction)),
            _ => None,
        };
        match from_record {
            Some((max, fraction)) if max > 0 => scale_count(max, fraction * multiplier, p.min_reps),
            _ => scale_count(template_reps, multiplier, p.min_reps),
        }
    }

    fn progress_hold(
        &self,
        exercise: StrengthExercise,
        template_hold_s: u32,
        multiplier: f64,
        records: &PersonalRecords,
    ) -> u32 {
        let p = &self.config.progression;
        if exercise == StrengthExercise::Plank && records.plank_hold_s > 0 {
            scale_count(records.plank_hold_s, p.plank_fraction * multiplier, p.min_plank_s)
        } else {
            scale_count(template_hold_s, multiplier, p.min_plank_s)
        }
    }

    fn progress_load(
        &self,
        exercise: StrengthExercise,
        template_kg: f64,
        multiplier: f64,
        records: &PersonalRecords,
        equipment: &EquipmentInventory,
    ) -> f64 {
        let p = &self.config.progression;
        let load = records
            .max_loads_kg
            .get(exercise.key())
            .filter(|max| **max > 0.0)
            .map_or(template_kg * multiplier, |max| {
                max * p.load_fraction * multiplier
            });
        let capped = equipment
            .dumbbell_max_kg
            .map_or(load, |available| load.min(available));
        round_to(capped.max(0.0), 0.5)
    }

    /// Apply the multiplier to a template block and estimate its energy cost
    #[must_use]
    pub fn progress_block(
        &self,
        block: &ExerciseBlock,
        multiplier: f64,
        records: &PersonalRecords,
        equipment: &EquipmentInventory,
        weight_kg: f64,
    ) -> ProgressedBlock {
        let progressed = ExerciseBlock {
            name: block.name.clone(),
            phase: block.phase,
            params: self.progress_params(&block.params, multiplier, records, equipment),
        };
        let intensity = self.config.met.band(multiplier);
        let duration_min = progressed.duration_min();
        let met = self.config.met.met(progressed.kind(), intensity);
        let estimated_calories = (met * weight_kg * duration_min / 60.0).round();

        ProgressedBlock {
            block: progressed,
            intensity,
            duration_min,
            estimated_calories,
        }
    }

    /// Generate one session for a date
    ///
    /// # Errors
    ///
    /// - Validation errors for an implausible profile
    /// - `NoCandidates` (recoverable) when no template is eligible
    pub fn generate_session(
        &self,
        profile: &UserProfile,
        records: &PersonalRecords,
        catalog: &dyn CatalogProvider,
        date: NaiveDate,
    ) -> AppResult<WorkoutPlanDay> {
        profile.validate()?;
        let assessment = self.evaluate_fitness_level(profile.sex, records);
        let template = self.select_template(profile, assessment.level, catalog)?;
        let session_number = self.session_number(profile.created_at, date);
        let multiplier = self.intensity_multiplier(assessment.level, session_number);

        let blocks: Vec<ProgressedBlock> = template
            .blocks
            .iter()
            .map(|b| {
                self.progress_block(b, multiplier, records, &profile.equipment, profile.weight_kg)
            })
            .collect();
        let total_duration_min = blocks.iter().map(|b| b.duration_min).sum();
        let estimated_calories = blocks.iter().map(|b| b.estimated_calories).sum();

        let notes = vec![
            format!(
                "Session {session_number} of {} ({:?} level, fitness score {}/8)",
                template.name, assessment.level, assessment.score
            ),
            format!("Intensity x{multiplier:.2}"),
        ];

        info!(
            date = %date,
            template_id = %template.id,
            session_number,
            multiplier,
            estimated_calories,
            "Generated workout session"
        );

        Ok(WorkoutPlanDay {
            date,
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            fitness_level: assessment.level,
            session_number,
            intensity_multiplier: multiplier,
            blocks,
            total_duration_min,
            estimated_calories,
            completed: false,
            perceived_exertion: None,
            notes,
        })
    }

    /// Generate one session per date
    ///
    /// # Errors
    ///
    /// Fails as a whole when any session fails (see [`Self::generate_session`])
    pub fn generate_week(
        &self,
        profile: &UserProfile,
        records: &PersonalRecords,
        catalog: &dyn CatalogProvider,
        dates: &[NaiveDate],
    ) -> AppResult<Vec<WorkoutPlanDay>> {
        dates
            .iter()
            .map(|date| self.generate_session(profile, records, catalog, *date))
            .collect()
    }

    /// Post-session notes from perceived exertion and record changes
    #[must_use]
    pub fn session_feedback(
        &self,
        session: &WorkoutPlanDay,
        current: &PersonalRecords,
        previous: Option<&PersonalRecords>,
    ) -> Vec<FeedbackNote> {
        let thresholds = &self.config.feedback;
        let mut notes = Vec::new();

        if let Some(rpe) = session.perceived_exertion {
            if rpe <= thresholds.easy_max_rpe {
                let mut kinds: Vec<BlockKind> = Vec::new();
                for block in &session.blocks {
                    let kind = block.block.kind();
                    if block.block.phase == BlockPhase::Main && !kinds.contains(&kind) {
                        kinds.push(kind);
                    }
                }
                notes.extend(kinds.into_iter().filter_map(increase_message).map(|message| {
                    FeedbackNote {
                        kind: FeedbackKind::IncreaseLoad,
                        message,
                    }
                }));
            } else if rpe >= thresholds.hard_min_rpe {
                notes.push(FeedbackNote {
                    kind: FeedbackKind::ReduceVolume,
                    message: format!(
                        "Exertion {rpe}/10 is high: reduce weekly training volume by {:.0}%",
                        thresholds.volume_reduction * 100.0
                    ),
                });
                notes.push(FeedbackNote {
                    kind: FeedbackKind::Recovery,
                    message: "Prioritize sleep, hydration and an easy day before the next session"
                        .to_owned(),
                });
            }
        }

        if let Some(previous) = previous {
            let improved = current.improvements_over(previous);
            if !improved.is_empty() {
                let names: Vec<&str> = improved.iter().map(record_label).collect();
                notes.push(FeedbackNote {
                    kind: FeedbackKind::PersonalRecord,
                    message: format!("New personal best in {}. Great work!", names.join(", ")),
                });
            }
        }

        notes
    }
}

fn increase_message(kind: BlockKind) -> Option<String> {
    let text = match kind {
        BlockKind::Strength => "Strength felt manageable: add 1-2 reps per set or a little load",
        BlockKind::Run => "Cardio felt manageable: add 5 minutes or 0.5 km/h next time",
        BlockKind::Interval => "Intervals felt manageable: add a round or 5 seconds of work",
        BlockKind::Basic => return None,
    };
    Some(text.to_owned())
}

const fn record_label(metric: &RecordMetric) -> &'static str {
    match metric {
        RecordMetric::PushUps => "push-ups",
        RecordMetric::SitUps => "sit-ups",
        RecordMetric::Plank => "plank",
        RecordMetric::RunSpeed => "running speed",
        RecordMetric::RunDuration => "running duration",
    }
}
