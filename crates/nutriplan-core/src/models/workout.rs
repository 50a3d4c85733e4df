// ABOUTME: Workout template, exercise block, personal record and workout plan-day models
// ABOUTME: Templates are immutable reference data; plan days are fresh progressed copies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::profile::{Equipment, WorkoutCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seconds assumed per strength repetition when estimating duration
pub const SECONDS_PER_REP: f64 = 3.0;

/// Evaluated fitness level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// Score 0-2
    Beginner,
    /// Score 3-5
    Intermediate,
    /// Score 6-8
    Advanced,
}

/// Position of a block inside a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockPhase {
    /// Preparation
    Warmup,
    /// Main work
    Main,
    /// Wind-down
    Cooldown,
}

/// Discriminant of [`BlockParams`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Continuous run
    Run,
    /// Work/rest intervals
    Interval,
    /// Resistance exercise
    Strength,
    /// Mobility, walking, stretching
    Basic,
}

/// Strength exercises the planner knows how to personalize
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrengthExercise {
    /// Push-ups, scaled from max push-ups
    PushUp,
    /// Sit-ups, scaled from max sit-ups
    SitUp,
    /// Plank hold, scaled from max plank seconds
    Plank,
    /// Bodyweight or goblet squat
    Squat,
    /// Alternating lunges
    Lunge,
    /// Dumbbell row
    DumbbellRow,
    /// Dumbbell press
    DumbbellPress,
    /// Resistance band pull-apart
    BandPull,
}

impl StrengthExercise {
    /// Key used in `PersonalRecords::max_loads_kg`
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PushUp => "push_up",
            Self::SitUp => "sit_up",
            Self::Plank => "plank",
            Self::Squat => "squat",
            Self::Lunge => "lunge",
            Self::DumbbellRow => "dumbbell_row",
            Self::DumbbellPress => "dumbbell_press",
            Self::BandPull => "band_pull",
        }
    }
}

/// Type-specific block parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockParams {
    /// Continuous run at a fixed speed
    Run {
        /// Speed in km/h
        speed_kmh: f64,
        /// Duration in minutes
        duration_min: f64,
        /// Treadmill incline in percent
        #[serde(default)]
        incline_pct: f64,
    },
    /// Repeated work/rest rounds
    Interval {
        /// Exercise performed during work periods
        exercise: String,
        /// Work period in seconds
        work_s: u32,
        /// Rest period in seconds
        rest_s: u32,
        /// Number of rounds
        rounds: u32,
    },
    /// Sets of a strength exercise (reps or timed hold)
    Strength {
        /// Exercise
        exercise: StrengthExercise,
        /// Number of sets
        sets: u32,
        /// Repetitions per set
        #[serde(default)]
        reps: Option<u32>,
        /// Hold time per set in seconds
        #[serde(default)]
        hold_s: Option<u32>,
        /// External load in kg
        #[serde(default)]
        load_kg: Option<f64>,
        /// Rest between sets in seconds
        rest_s: u32,
    },
    /// Fixed-duration low-intensity work
    Basic {
        /// What to do
        description: String,
        /// Duration in minutes
        duration_min: f64,
    },
}

/// One block of a workout template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseBlock {
    /// Display name
    pub name: String,
    /// Phase of the session
    pub phase: BlockPhase,
    /// Type-specific parameters
    pub params: BlockParams,
}

impl ExerciseBlock {
    /// Block type
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self.params {
            BlockParams::Run { .. } => BlockKind::Run,
            BlockParams::Interval { .. } => BlockKind::Interval,
            BlockParams::Strength { .. } => BlockKind::Strength,
            BlockParams::Basic { .. } => BlockKind::Basic,
        }
    }

    /// Estimated duration in minutes
    #[must_use]
    pub fn duration_min(&self) -> f64 {
        match &self.params {
            BlockParams::Run { duration_min, .. } | BlockParams::Basic { duration_min, .. } => {
                *duration_min
            }
            BlockParams::Interval {
                work_s,
                rest_s,
                rounds,
                ..
            } => f64::from(*rounds) * (f64::from(*work_s) + f64::from(*rest_s)) / 60.0,
            BlockParams::Strength {
                sets,
                reps,
                hold_s,
                rest_s,
                ..
            } => {
                let work_per_set = hold_s.map_or_else(
                    || f64::from(reps.unwrap_or(0)) * SECONDS_PER_REP,
                    f64::from,
                );
                let rests = f64::from(sets.saturating_sub(1)) * f64::from(*rest_s);
                f64::from(*sets).mul_add(work_per_set, rests) / 60.0
            }
        }
    }
}

/// Immutable workout template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplate {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Training style
    pub category: WorkoutCategory,
    /// Every capability listed here must be owned by the user
    #[serde(default)]
    pub required_equipment: Vec<Equipment>,
    /// Levels this template is written for
    pub fitness_levels: Vec<FitnessLevel>,
    /// Ordered blocks (warmup, main, cooldown)
    pub blocks: Vec<ExerciseBlock>,
}

impl WorkoutTemplate {
    /// Nominal duration in minutes before progression
    #[must_use]
    pub fn duration_min(&self) -> f64 {
        self.blocks.iter().map(ExerciseBlock::duration_min).sum()
    }

    /// Whether the main work is running or interval based
    #[must_use]
    pub fn is_high_impact(&self) -> bool {
        self.blocks.iter().any(|b| {
            b.phase == BlockPhase::Main && matches!(b.kind(), BlockKind::Run | BlockKind::Interval)
        })
    }

    /// Whether the template is written for a level
    #[must_use]
    pub fn supports_level(&self, level: FitnessLevel) -> bool {
        self.fitness_levels.contains(&level)
    }
}

/// Effective intensity band of a progressed block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBand {
    /// Below the medium threshold
    Low,
    /// Around the nominal intensity
    Medium,
    /// Above the high threshold
    High,
}

/// A template block with personalized intensity applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressedBlock {
    /// Block with scaled parameters
    pub block: ExerciseBlock,
    /// Effective intensity band
    pub intensity: IntensityBand,
    /// Duration in minutes after scaling
    pub duration_min: f64,
    /// Estimated energy cost in kcal
    pub estimated_calories: f64,
}

/// A generated training session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlanDay {
    /// Scheduled date
    pub date: NaiveDate,
    /// Source template id
    pub template_id: String,
    /// Source template name
    pub template_name: String,
    /// Level used for progression
    pub fitness_level: FitnessLevel,
    /// Session counter since account creation (1-based)
    pub session_number: u32,
    /// Level multiplier compounded with the session multiplier
    pub intensity_multiplier: f64,
    /// Progressed blocks
    pub blocks: Vec<ProgressedBlock>,
    /// Total duration in minutes
    pub total_duration_min: f64,
    /// Total estimated energy cost in kcal
    pub estimated_calories: f64,
    /// Set by the user-facing layer
    pub completed: bool,
    /// Perceived exertion (1-10), set by the user-facing layer
    pub perceived_exertion: Option<u8>,
    /// Human-readable notes for export collaborators
    pub notes: Vec<String>,
}

/// Personal-record metric compared between snapshots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordMetric {
    /// Max push-ups
    PushUps,
    /// Max sit-ups
    SitUps,
    /// Plank hold seconds
    Plank,
    /// Running speed
    RunSpeed,
    /// Running duration
    RunDuration,
}

/// Best-performance snapshot maintained by the user-facing layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecords {
    /// Max consecutive push-ups
    pub max_pushups: u32,
    /// Max consecutive sit-ups
    pub max_situps: u32,
    /// Longest plank hold in seconds
    pub plank_hold_s: u32,
    /// Sustainable running speed in km/h
    pub run_speed_kmh: f64,
    /// Longest continuous run in minutes
    pub run_duration_min: f64,
    /// Max load per exercise key in kg
    #[serde(default)]
    pub max_loads_kg: BTreeMap<String, f64>,
    /// Last update
    pub updated_at: DateTime<Utc>,
}

impl PersonalRecords {
    /// Metrics that improved compared with an older snapshot
    #[must_use]
    pub fn improvements_over(&self, previous: &Self) -> Vec<RecordMetric> {
        let mut improved = Vec::new();
        if self.max_pushups > previous.max_pushups {
            improved.push(RecordMetric::PushUps);
        }
        if self.max_situps > previous.max_situps {
            improved.push(RecordMetric::SitUps);
        }
        if self.plank_hold_s > previous.plank_hold_s {
            improved.push(RecordMetric::Plank);
        }
        if self.run_speed_kmh > previous.run_speed_kmh {
            improved.push(RecordMetric::RunSpeed);
        }
        if self.run_duration_min > previous.run_duration_min {
            improved.push(RecordMetric::RunDuration);
        }
        improved
    }
}
