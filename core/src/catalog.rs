//! Exercise template catalog and equipment filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Equipment, ExerciseTemplate, MuscleGroup, PlannedExercise};

/// Equipment an exercise needs, derived from its name. Names that match no
/// rule are treated as bodyweight.
pub fn implied_equipment(name: &str) -> BTreeSet<Equipment> {
    use Equipment::*;

    let lower = name.to_lowercase();
    let needs: &[Equipment] = if lower.contains("bench press") || lower.contains("incline press")
    {
        &[Barbell, Bench]
    } else if lower.contains("barbell") || lower.contains("deadlift") || lower.contains("back squat")
    {
        &[Barbell]
    } else if lower.contains("dumbbell") {
        &[Dumbbells]
    } else if lower.contains("kettlebell") {
        &[Kettlebell]
    } else if lower.contains("band") {
        &[ResistanceBands]
    } else if lower.contains("pull-up") || lower.contains("chin-up") {
        &[PullUpBar]
    } else if lower.contains("cable") || lower.contains("lat pulldown") {
        &[CableMachine]
    } else if lower.contains("stair climber") || lower.contains("cycling") {
        &[CardioMachines]
    } else {
        &[]
    };
    needs.iter().copied().collect()
}

/// Templates eligible for plan generation: never custom, and either
/// equipment-free or sharing at least one item with the player's equipment.
/// An empty equipment selection means the player left it unanswered and
/// places no restriction.
pub fn available_templates(
    templates: &[ExerciseTemplate],
    equipment: &BTreeSet<Equipment>,
) -> Vec<ExerciseTemplate> {
    templates
        .iter()
        .filter(|t| !t.is_custom)
        .filter(|t| {
            equipment.is_empty()
                || t.required_equipment.is_empty()
                || !t.required_equipment.is_disjoint(equipment)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    templates: Vec<ExerciseTemplate>,
}

impl Catalog {
    pub fn new(templates: Vec<ExerciseTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[ExerciseTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&ExerciseTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Resolves a planned exercise back to the template it came from.
    pub fn resolve(&self, planned: &PlannedExercise) -> Option<&ExerciseTemplate> {
        self.find(&planned.template_name)
    }

    /// Built-in starter catalog.
    pub fn builtin() -> Self {
        use MuscleGroup::*;

        let s = ExerciseTemplate::strength;
        let c = ExerciseTemplate::cardio;
        Self::new(vec![
            // Chest
            s("Push-Up", Chest, "figure.strengthtraining.functional", 10),
            s("Bench Press", Chest, "dumbbell.fill", 15),
            s("Dumbbell Fly", Chest, "dumbbell.fill", 12),
            s("Incline Press", Chest, "dumbbell.fill", 15),
            s("Band Chest Press", Chest, "figure.strengthtraining.functional", 10),
            // Back
            s("Pull-Up", Back, "figure.climbing", 15),
            s("Barbell Row", Back, "dumbbell.fill", 15),
            s("Dumbbell Row", Back, "dumbbell.fill", 12),
            s("Superman", Back, "figure.core.training", 8),
            s("Lat Pulldown", Back, "figure.strengthtraining.traditional", 12),
            // Shoulders
            s("Pike Push-Up", Shoulders, "figure.strengthtraining.functional", 10),
            s("Dumbbell Shoulder Press", Shoulders, "dumbbell.fill", 12),
            s("Lateral Raise", Shoulders, "dumbbell.fill", 10),
            s("Band Pull-Apart", Shoulders, "figure.strengthtraining.functional", 8),
            // Biceps
            s("Dumbbell Curl", Biceps, "dumbbell.fill", 10),
            s("Chin-Up", Biceps, "figure.climbing", 14),
            s("Band Curl", Biceps, "figure.strengthtraining.functional", 8),
            // Triceps
            s("Bench Dip", Triceps, "figure.strengthtraining.functional", 10),
            s("Diamond Push-Up", Triceps, "figure.strengthtraining.functional", 12),
            s("Cable Pushdown", Triceps, "figure.strengthtraining.traditional", 10),
            // Legs
            s("Bodyweight Squat", Legs, "figure.strengthtraining.functional", 10),
            s("Lunge", Legs, "figure.walk", 10),
            s("Back Squat", Legs, "dumbbell.fill", 18),
            s("Deadlift", Legs, "dumbbell.fill", 20),
            s("Kettlebell Swing", Legs, "figure.strengthtraining.functional", 14),
            s("Glute Bridge", Legs, "figure.strengthtraining.functional", 8),
            // Core
            s("Plank", Core, "figure.core.training", 8),
            s("Crunch", Core, "figure.core.training", 6),
            s("Mountain Climber", Core, "figure.core.training", 10),
            s("Russian Twist", Core, "figure.core.training", 8),
            // Cardio
            c("Run", "figure.run", 20),
            c("Walk", "figure.walk", 10),
            c("Stair Climber", "figure.stair.stepper", 18),
            c("Cycling", "figure.outdoor.cycle", 18),
            c("Jump Rope", "figure.jumprope", 15),
        ])
    }
}

impl From<Vec<ExerciseTemplate>> for Catalog {
    fn from(templates: Vec<ExerciseTemplate>) -> Self {
        Self::new(templates)
    }
}
