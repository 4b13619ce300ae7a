//! Core types and plan generation shared between server and TUI.

pub mod catalog;
pub mod plan;
pub mod rng;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{Catalog, available_templates, implied_equipment};
pub use plan::{
    DaySlot, Split, build_default_schedule, build_focus_schedule, build_muscle_schedule,
    calculate_split, distribute_days, generate_plan, select_cardio_exercise,
    select_strength_exercises, start_of_week,
};
pub use rng::SeededRng;

/// Returned when a persisted raw string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `as_str`, `FromStr` and `Display` for a fieldless enum using the
/// same snake_case names serde uses.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ============================================================================
// Player preferences
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStyle {
    Weights,
    Cardio,
    #[default]
    Balanced,
    NotSure,
    None,
}

string_enum!(WorkoutStyle, "workout style", {
    Weights => "weights",
    Cardio => "cardio",
    Balanced => "balanced",
    NotSure => "not_sure",
    None => "none",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    BuildMuscle,
    ImproveCardio,
    TrainForEvent,
    LoseWeight,
    StayActive,
    ReduceStress,
}

string_enum!(FitnessGoal, "fitness goal", {
    BuildMuscle => "build_muscle",
    ImproveCardio => "improve_cardio",
    TrainForEvent => "train_for_event",
    LoseWeight => "lose_weight",
    StayActive => "stay_active",
    ReduceStress => "reduce_stress",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Dumbbells,
    Barbell,
    Kettlebell,
    ResistanceBands,
    PullUpBar,
    Bench,
    CableMachine,
    CardioMachines,
}

string_enum!(Equipment, "equipment", {
    Dumbbells => "dumbbells",
    Barbell => "barbell",
    Kettlebell => "kettlebell",
    ResistanceBands => "resistance_bands",
    PullUpBar => "pull_up_bar",
    Bench => "bench",
    CableMachine => "cable_machine",
    CardioMachines => "cardio_machines",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    FullBody,
    UpperBody,
    LowerBody,
    Chest,
    Back,
    Arms,
    Shoulders,
    Legs,
    Core,
}

string_enum!(FocusArea, "focus area", {
    FullBody => "full_body",
    UpperBody => "upper_body",
    LowerBody => "lower_body",
    Chest => "chest",
    Back => "back",
    Arms => "arms",
    Shoulders => "shoulders",
    Legs => "legs",
    Core => "core",
});

impl FocusArea {
    /// Muscle groups trained when this area is selected.
    pub fn muscle_groups(self) -> &'static [MuscleGroup] {
        use MuscleGroup::*;
        match self {
            Self::FullBody => &MuscleGroup::ALL,
            Self::UpperBody => &MuscleGroup::UPPER,
            Self::LowerBody => &MuscleGroup::LOWER,
            Self::Chest => &[Chest],
            Self::Back => &[Back],
            Self::Arms => &[Biceps, Triceps],
            Self::Shoulders => &[Shoulders],
            Self::Legs => &[Legs],
            Self::Core => &[Core],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

string_enum!(FitnessLevel, "fitness level", {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

impl FitnessLevel {
    /// Number of strength exercises planned per strength day.
    pub fn target_exercise_count(self) -> usize {
        match self {
            Self::Beginner => 3,
            Self::Intermediate => 4,
            Self::Advanced => 5,
        }
    }
}

/// Snapshot of the preferences the generator reads. The host owns the
/// profile and persists `plan_regeneration_count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerProfile {
    pub weekly_workout_goal: i32,
    pub workout_style: WorkoutStyle,
    pub fitness_goals: BTreeSet<FitnessGoal>,
    pub equipment_access: BTreeSet<Equipment>,
    pub focus_areas: BTreeSet<FocusArea>,
    pub fitness_level: FitnessLevel,
    pub plan_regeneration_count: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            weekly_workout_goal: 3,
            workout_style: WorkoutStyle::default(),
            fitness_goals: BTreeSet::new(),
            equipment_access: BTreeSet::new(),
            focus_areas: BTreeSet::new(),
            fitness_level: FitnessLevel::default(),
            plan_regeneration_count: 0,
        }
    }
}

impl PlayerProfile {
    /// Weekly goal clamped to a valid number of days.
    pub fn clamped_weekly_goal(&self) -> u8 {
        self.weekly_workout_goal.clamp(1, 7) as u8
    }

    pub fn has_goal(&self, goal: FitnessGoal) -> bool {
        self.fitness_goals.contains(&goal)
    }

    /// Forces a different plan for the current week on the next read.
    pub fn regenerate(&mut self) {
        self.plan_regeneration_count = self.plan_regeneration_count.wrapping_add(1);
    }
}

// ============================================================================
// Exercises
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Legs,
    Core,
}

string_enum!(MuscleGroup, "muscle group", {
    Chest => "chest",
    Back => "back",
    Shoulders => "shoulders",
    Biceps => "biceps",
    Triceps => "triceps",
    Legs => "legs",
    Core => "core",
});

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Legs,
        Self::Core,
    ];
    pub const UPPER: [MuscleGroup; 5] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
    ];
    pub const LOWER: [MuscleGroup; 2] = [Self::Legs, Self::Core];
    pub const PUSH: [MuscleGroup; 3] = [Self::Chest, Self::Shoulders, Self::Triceps];
    pub const PULL: [MuscleGroup; 2] = [Self::Back, Self::Biceps];
    pub const LEGS: [MuscleGroup; 2] = [Self::Legs, Self::Core];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Strength,
    Cardio,
}

string_enum!(WorkoutType, "workout type", {
    Strength => "strength",
    Cardio => "cardio",
});

/// A reusable exercise definition from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub workout_type: WorkoutType,
    pub muscle_group: Option<MuscleGroup>,
    pub icon: String,
    pub base_xp: i32,
    #[serde(default)]
    pub is_custom: bool,
    /// Empty when the exercise needs no equipment.
    #[serde(default)]
    pub required_equipment: BTreeSet<Equipment>,
}

impl ExerciseTemplate {
    pub fn strength(name: &str, muscle_group: MuscleGroup, icon: &str, base_xp: i32) -> Self {
        Self {
            name: name.to_string(),
            workout_type: WorkoutType::Strength,
            muscle_group: Some(muscle_group),
            icon: icon.to_string(),
            base_xp,
            is_custom: false,
            required_equipment: implied_equipment(name),
        }
    }

    pub fn cardio(name: &str, icon: &str, base_xp: i32) -> Self {
        Self {
            name: name.to_string(),
            workout_type: WorkoutType::Cardio,
            muscle_group: None,
            icon: icon.to_string(),
            base_xp,
            is_custom: false,
            required_equipment: implied_equipment(name),
        }
    }

    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }
}

// ============================================================================
// Weekly plan
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedExercise {
    pub template_name: String,
    pub workout_type: WorkoutType,
    pub muscle_group: Option<MuscleGroup>,
    pub icon: String,
    pub base_xp: i32,
}

impl From<&ExerciseTemplate> for PlannedExercise {
    fn from(template: &ExerciseTemplate) -> Self {
        Self {
            template_name: template.name.clone(),
            workout_type: template.workout_type,
            muscle_group: template.muscle_group,
            icon: template.icon.clone(),
            base_xp: template.base_xp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedDay {
    /// 1 = Sunday through 7 = Saturday.
    pub day_of_week: u8,
    pub label: String,
    pub exercises: Vec<PlannedExercise>,
    pub is_rest_day: bool,
    pub theme: String,
}

impl PlannedDay {
    pub fn weekday(&self) -> Weekday {
        weekday_from_index(self.day_of_week.saturating_sub(1) as usize)
    }

    pub fn total_xp(&self) -> i32 {
        self.exercises.iter().map(|e| e.base_xp).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub week_start: NaiveDate,
    /// Sunday through Saturday.
    pub days: Vec<PlannedDay>,
    pub workout_day_count: u8,
}

impl WeeklyPlan {
    pub fn day(&self, weekday: Weekday) -> Option<&PlannedDay> {
        self.days
            .get(weekday.num_days_from_sunday() as usize)
            .filter(|d| d.weekday() == weekday)
    }

    pub fn total_xp(&self) -> i32 {
        self.days.iter().map(PlannedDay::total_xp).sum()
    }
}

// ============================================================================
// API payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub profile: PlayerProfile,
    /// Any date within the wanted week; the server uses the current week
    /// when absent.
    pub week_start: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlanRequest {
    pub profile: PlayerProfile,
    pub date: Option<NaiveDate>,
}

/// Maps a Sunday-based index (0..7) to a weekday.
pub fn weekday_from_index(index: usize) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Three-letter uppercase label for a weekday.
pub fn day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SUN",
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
    }
}
