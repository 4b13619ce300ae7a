//! Weekly plan generation.
//!
//! The pipeline is: clamp goal, seed RNG, split strength/cardio, place the
//! workout days, schedule muscle groups, then pick exercises per day. Every
//! step is a pure function over its inputs so each can be tested alone.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::{
    ExerciseTemplate, FitnessGoal, FitnessLevel, FocusArea, MuscleGroup, PlannedDay,
    PlannedExercise, PlayerProfile, WeeklyPlan, WorkoutStyle, WorkoutType, available_templates,
    day_label, rng::SeededRng, weekday_from_index,
};

const CARDIO_PLAN_NAMES: [&str; 3] = ["Run", "Walk", "Stair Climber"];
const REST_THEME: &str = "REST";
const CARDIO_THEME: &str = "CARDIO";
const FULL_BODY_THEME: &str = "FULL BODY";

/// Sunday-based indices (0 = Sunday) in the order workout days are handed out.
const MONDAY_FIRST: [usize; 7] = [1, 2, 3, 4, 5, 6, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub strength_days: u8,
    pub cardio_days: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    Rest,
    Strength,
    Cardio,
}

/// Returns the Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Builds the plan for the week starting at `week_start`. The same profile,
/// templates and week always produce the same plan.
pub fn generate_plan(
    profile: &PlayerProfile,
    templates: &[ExerciseTemplate],
    week_start: NaiveDate,
) -> WeeklyPlan {
    let goal = profile.clamped_weekly_goal();
    let mut rng = SeededRng::for_week(week_start, profile.plan_regeneration_count);

    let split = calculate_split(goal, profile.workout_style, &profile.fitness_goals);
    let slots = distribute_days(goal, split, &mut rng);
    let schedule = build_muscle_schedule(
        split.strength_days as usize,
        &profile.focus_areas,
        profile.fitness_level,
        profile.has_goal(FitnessGoal::BuildMuscle),
        &mut rng,
    );

    let available = available_templates(templates, &profile.equipment_access);
    let (strength, cardio): (Vec<ExerciseTemplate>, Vec<ExerciseTemplate>) = available
        .into_iter()
        .partition(|t| t.workout_type == WorkoutType::Strength);

    let mut strength_index = 0;
    let mut cardio_index = 0;
    let days = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let weekday = weekday_from_index(index);
            match slot {
                DaySlot::Rest => PlannedDay {
                    is_rest_day: true,
                    ..planned_day(weekday, Vec::new(), REST_THEME.to_string())
                },
                DaySlot::Strength => {
                    let groups = schedule
                        .get(strength_index)
                        .cloned()
                        .unwrap_or_else(|| MuscleGroup::ALL.to_vec());
                    strength_index += 1;
                    let exercises = select_strength_exercises(
                        &groups,
                        &strength,
                        profile.fitness_level,
                        &mut rng,
                    );
                    planned_day(weekday, exercises, strength_theme(&groups))
                }
                DaySlot::Cardio => {
                    let exercises = select_cardio_exercise(cardio_index, &cardio, &mut rng)
                        .into_iter()
                        .collect();
                    cardio_index += 1;
                    planned_day(weekday, exercises, CARDIO_THEME.to_string())
                }
            }
        })
        .collect();

    WeeklyPlan {
        week_start,
        days,
        workout_day_count: goal,
    }
}

fn planned_day(weekday: Weekday, exercises: Vec<PlannedExercise>, theme: String) -> PlannedDay {
    PlannedDay {
        day_of_week: weekday.number_from_sunday() as u8,
        label: day_label(weekday).to_string(),
        is_rest_day: false,
        exercises,
        theme,
    }
}

fn strength_theme(groups: &[MuscleGroup]) -> String {
    let distinct: BTreeSet<MuscleGroup> = groups.iter().copied().collect();
    if distinct.len() == MuscleGroup::ALL.len() {
        return FULL_BODY_THEME.to_string();
    }
    groups
        .iter()
        .map(|g| g.as_str().to_uppercase())
        .collect::<Vec<_>>()
        .join(" + ")
}

// ============================================================================
// Split
// ============================================================================

/// Decides how many of the `goal` workout days are strength and how many
/// are cardio.
pub fn calculate_split(goal: u8, style: WorkoutStyle, goals: &BTreeSet<FitnessGoal>) -> Split {
    let goal = i32::from(goal);
    let ratio = match style {
        WorkoutStyle::Weights => 0.8,
        WorkoutStyle::Cardio => 0.2,
        WorkoutStyle::Balanced | WorkoutStyle::NotSure | WorkoutStyle::None => 0.5,
    };

    let mut strength = (f64::from(goal) * ratio).round() as i32;

    if goals.contains(&FitnessGoal::BuildMuscle) && strength < goal {
        strength += 1;
    }
    if (goals.contains(&FitnessGoal::ImproveCardio) || goals.contains(&FitnessGoal::TrainForEvent))
        && strength > 0
    {
        strength -= 1;
    }
    if goals.contains(&FitnessGoal::LoseWeight) && strength - 1 > 1 {
        strength -= 1;
    }

    let strength = strength.clamp(0, goal);
    Split {
        strength_days: strength as u8,
        cardio_days: (goal - strength) as u8,
    }
}

// ============================================================================
// Day placement
// ============================================================================

/// Spreads the workout days across the week (Sunday-indexed slots) and
/// interleaves strength and cardio so the same type repeats as little as
/// possible.
pub fn distribute_days(goal: u8, split: Split, _rng: &mut SeededRng) -> [DaySlot; 7] {
    let goal = usize::from(goal.clamp(1, 7));
    let chosen: Vec<usize> = if goal >= 7 {
        MONDAY_FIRST.to_vec()
    } else {
        (0..goal).map(|i| MONDAY_FIRST[i * 7 / goal]).collect()
    };

    let types = interleave(
        usize::from(split.strength_days),
        usize::from(split.cardio_days),
    );

    let mut slots = [DaySlot::Rest; 7];
    for (day, slot) in chosen.into_iter().zip(types) {
        slots[day] = slot;
    }
    slots
}

/// Alternates the two workout types, starting with the more common one
/// (strength on ties), then drains whichever queue is left.
fn interleave(strength: usize, cardio: usize) -> Vec<DaySlot> {
    let mut remaining_strength = strength;
    let mut remaining_cardio = cardio;
    let mut next_strength = strength >= cardio;
    let mut out = Vec::with_capacity(strength + cardio);

    while remaining_strength + remaining_cardio > 0 {
        let take_strength = if next_strength {
            remaining_strength > 0
        } else {
            remaining_cardio == 0
        };
        if take_strength {
            remaining_strength -= 1;
            out.push(DaySlot::Strength);
        } else {
            remaining_cardio -= 1;
            out.push(DaySlot::Cardio);
        }
        next_strength = !next_strength;
    }
    out
}

// ============================================================================
// Muscle-group schedule
// ============================================================================

/// One muscle-group list per strength day. Focus areas drive the schedule
/// only for players building muscle; everyone else gets the split for
/// their level.
pub fn build_muscle_schedule(
    strength_days: usize,
    focus_areas: &BTreeSet<FocusArea>,
    level: FitnessLevel,
    build_muscle: bool,
    _rng: &mut SeededRng,
) -> Vec<Vec<MuscleGroup>> {
    if build_muscle && !focus_areas.is_empty() {
        build_focus_schedule(strength_days, focus_areas)
    } else {
        build_default_schedule(strength_days, level)
    }
}

pub fn build_focus_schedule(
    strength_days: usize,
    focus_areas: &BTreeSet<FocusArea>,
) -> Vec<Vec<MuscleGroup>> {
    if strength_days == 0 {
        return Vec::new();
    }

    let groups: Vec<MuscleGroup> = if focus_areas.contains(&FocusArea::FullBody) {
        MuscleGroup::ALL.to_vec()
    } else {
        let mut seen = HashSet::new();
        focus_areas
            .iter()
            .flat_map(|area| area.muscle_groups().iter().copied())
            .filter(|group| seen.insert(*group))
            .collect()
    };

    let mut schedule = vec![Vec::new(); strength_days];
    for (i, group) in groups.into_iter().enumerate() {
        schedule[i % strength_days].push(group);
    }
    for day in schedule.iter_mut().filter(|d| d.is_empty()) {
        day.push(MuscleGroup::Core);
    }
    schedule
}

pub fn build_default_schedule(strength_days: usize, level: FitnessLevel) -> Vec<Vec<MuscleGroup>> {
    (0..strength_days)
        .map(|day| match level {
            FitnessLevel::Beginner => MuscleGroup::ALL.to_vec(),
            FitnessLevel::Intermediate => {
                if day % 2 == 0 {
                    MuscleGroup::UPPER.to_vec()
                } else {
                    MuscleGroup::LOWER.to_vec()
                }
            }
            FitnessLevel::Advanced => match day % 3 {
                0 => MuscleGroup::PUSH.to_vec(),
                1 => MuscleGroup::PULL.to_vec(),
                _ => MuscleGroup::LEGS.to_vec(),
            },
        })
        .collect()
}

// ============================================================================
// Exercise selection
// ============================================================================

/// Picks up to the level's target count of strength exercises for the
/// given groups, spreading picks across groups before filling from the
/// rest of the catalog. Names never repeat within the day.
pub fn select_strength_exercises(
    groups: &[MuscleGroup],
    templates: &[ExerciseTemplate],
    level: FitnessLevel,
    rng: &mut SeededRng,
) -> Vec<PlannedExercise> {
    let target = level.target_exercise_count();
    let per_group = (target / groups.len().max(1)).max(1);

    let mut used: HashSet<&str> = HashSet::new();
    let mut picked: Vec<&ExerciseTemplate> = Vec::with_capacity(target);

    for group in groups {
        if picked.len() >= target {
            break;
        }
        let mut candidates: Vec<&ExerciseTemplate> = templates
            .iter()
            .filter(|t| t.workout_type == WorkoutType::Strength)
            .filter(|t| t.muscle_group == Some(*group))
            .collect();
        rng.shuffle(&mut candidates);

        let mut taken = 0;
        for template in candidates {
            if taken >= per_group || picked.len() >= target {
                break;
            }
            if used.insert(template.name.as_str()) {
                picked.push(template);
                taken += 1;
            }
        }
    }

    if picked.len() < target {
        let mut rest: Vec<&ExerciseTemplate> = templates
            .iter()
            .filter(|t| t.workout_type == WorkoutType::Strength)
            .filter(|t| !used.contains(t.name.as_str()))
            .collect();
        rng.shuffle(&mut rest);

        for template in rest {
            if picked.len() >= target {
                break;
            }
            if used.insert(template.name.as_str()) {
                picked.push(template);
            }
        }
    }

    picked.into_iter().map(PlannedExercise::from).collect()
}

/// Picks the cardio activity for the `index`-th cardio day of the week.
pub fn select_cardio_exercise(
    index: usize,
    templates: &[ExerciseTemplate],
    rng: &mut SeededRng,
) -> Option<PlannedExercise> {
    let mut options: Vec<&ExerciseTemplate> = templates
        .iter()
        .filter(|t| t.workout_type == WorkoutType::Cardio)
        .filter(|t| CARDIO_PLAN_NAMES.contains(&t.name.as_str()))
        .collect();
    if options.is_empty() {
        return None;
    }
    rng.shuffle(&mut options);
    options
        .get(index % options.len())
        .map(|t| PlannedExercise::from(*t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Equipment};

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    fn goals(items: &[FitnessGoal]) -> BTreeSet<FitnessGoal> {
        items.iter().copied().collect()
    }

    fn profile(goal: i32) -> PlayerProfile {
        PlayerProfile {
            weekly_workout_goal: goal,
            ..Default::default()
        }
    }

    fn assert_no_duplicates(plan: &WeeklyPlan) {
        for day in &plan.days {
            let names: HashSet<&str> = day
                .exercises
                .iter()
                .map(|e| e.template_name.as_str())
                .collect();
            assert_eq!(names.len(), day.exercises.len(), "duplicate on {}", day.label);
        }
    }

    #[test]
    fn start_of_week_is_previous_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(start_of_week(wednesday), week());
        assert_eq!(start_of_week(week()), week());
    }

    #[test]
    fn split_for_weights_style() {
        assert_eq!(
            calculate_split(3, WorkoutStyle::Weights, &BTreeSet::new()),
            Split {
                strength_days: 2,
                cardio_days: 1
            }
        );
    }

    #[test]
    fn split_for_cardio_style_clamps_to_zero_strength() {
        assert_eq!(
            calculate_split(
                4,
                WorkoutStyle::Cardio,
                &goals(&[FitnessGoal::ImproveCardio])
            ),
            Split {
                strength_days: 0,
                cardio_days: 4
            }
        );
    }

    #[test]
    fn split_goal_adjustments() {
        // balanced 4 -> 2/2, build muscle -> 3/1
        assert_eq!(
            calculate_split(4, WorkoutStyle::Balanced, &goals(&[FitnessGoal::BuildMuscle])),
            Split {
                strength_days: 3,
                cardio_days: 1
            }
        );
        // weights 5 -> 4/1, lose weight -> 3/2
        assert_eq!(
            calculate_split(5, WorkoutStyle::Weights, &goals(&[FitnessGoal::LoseWeight])),
            Split {
                strength_days: 3,
                cardio_days: 2
            }
        );
        // balanced 3 -> 2/1, lose weight would leave 1 so no shift
        assert_eq!(
            calculate_split(3, WorkoutStyle::Balanced, &goals(&[FitnessGoal::LoseWeight])),
            Split {
                strength_days: 2,
                cardio_days: 1
            }
        );
        // weights 7 -> 6/1; +build 7/0; -event 6/1; -lose 5/2
        assert_eq!(
            calculate_split(
                7,
                WorkoutStyle::Weights,
                &goals(&[
                    FitnessGoal::BuildMuscle,
                    FitnessGoal::TrainForEvent,
                    FitnessGoal::LoseWeight
                ])
            ),
            Split {
                strength_days: 5,
                cardio_days: 2
            }
        );
    }

    #[test]
    fn split_always_sums_to_goal() {
        let styles = [
            WorkoutStyle::Weights,
            WorkoutStyle::Cardio,
            WorkoutStyle::Balanced,
            WorkoutStyle::NotSure,
            WorkoutStyle::None,
        ];
        let all_goals = goals(&[
            FitnessGoal::BuildMuscle,
            FitnessGoal::ImproveCardio,
            FitnessGoal::LoseWeight,
        ]);
        for goal in 1..=7 {
            for style in styles {
                for set in [BTreeSet::new(), all_goals.clone()] {
                    let split = calculate_split(goal, style, &set);
                    assert_eq!(split.strength_days + split.cardio_days, goal);
                }
            }
        }
    }

    #[test]
    fn spreads_three_days_monday_wednesday_friday() {
        let mut rng = SeededRng::new(1);
        let slots = distribute_days(
            3,
            Split {
                strength_days: 2,
                cardio_days: 1,
            },
            &mut rng,
        );
        assert_eq!(
            slots,
            [
                DaySlot::Rest,
                DaySlot::Strength,
                DaySlot::Rest,
                DaySlot::Cardio,
                DaySlot::Rest,
                DaySlot::Strength,
                DaySlot::Rest,
            ]
        );
    }

    #[test]
    fn interleave_prefers_larger_queue_and_strength_on_ties() {
        use DaySlot::*;
        assert_eq!(interleave(2, 2), vec![Strength, Cardio, Strength, Cardio]);
        assert_eq!(interleave(1, 3), vec![Cardio, Strength, Cardio, Cardio]);
        assert_eq!(interleave(0, 2), vec![Cardio, Cardio]);
    }

    #[test]
    fn full_week_uses_every_slot() {
        let mut rng = SeededRng::new(1);
        let slots = distribute_days(
            7,
            Split {
                strength_days: 4,
                cardio_days: 3,
            },
            &mut rng,
        );
        assert!(slots.iter().all(|s| *s != DaySlot::Rest));
        // Monday gets the first strength day, Sunday the last in order.
        assert_eq!(slots[1], DaySlot::Strength);
        assert_eq!(slots[0], DaySlot::Strength);
    }

    #[test]
    fn beginner_default_schedule_targets_everything() {
        let schedule = build_default_schedule(3, FitnessLevel::Beginner);
        assert_eq!(schedule.len(), 3);
        assert!(schedule.iter().all(|day| day == &MuscleGroup::ALL.to_vec()));
    }

    #[test]
    fn intermediate_schedule_alternates_upper_lower() {
        let schedule = build_default_schedule(3, FitnessLevel::Intermediate);
        assert_eq!(schedule[0], MuscleGroup::UPPER.to_vec());
        assert_eq!(schedule[1], MuscleGroup::LOWER.to_vec());
        assert_eq!(schedule[2], MuscleGroup::UPPER.to_vec());
    }

    #[test]
    fn advanced_schedule_cycles_push_pull_legs() {
        let schedule = build_default_schedule(6, FitnessLevel::Advanced);
        let cycle = [
            MuscleGroup::PUSH.to_vec(),
            MuscleGroup::PULL.to_vec(),
            MuscleGroup::LEGS.to_vec(),
        ];
        for (i, day) in schedule.iter().enumerate() {
            assert_eq!(day, &cycle[i % 3]);
        }
    }

    #[test]
    fn focus_schedule_round_robins_groups() {
        let areas: BTreeSet<FocusArea> = [FocusArea::Chest, FocusArea::Arms].into_iter().collect();
        let schedule = build_focus_schedule(2, &areas);
        assert_eq!(
            schedule,
            vec![
                vec![MuscleGroup::Chest, MuscleGroup::Triceps],
                vec![MuscleGroup::Biceps],
            ]
        );
    }

    #[test]
    fn focus_schedule_fills_empty_days_with_core() {
        let areas: BTreeSet<FocusArea> = [FocusArea::Chest].into_iter().collect();
        let schedule = build_focus_schedule(3, &areas);
        assert_eq!(
            schedule,
            vec![
                vec![MuscleGroup::Chest],
                vec![MuscleGroup::Core],
                vec![MuscleGroup::Core],
            ]
        );
    }

    #[test]
    fn focus_schedule_full_body_uses_all_groups() {
        let areas: BTreeSet<FocusArea> = [FocusArea::FullBody, FocusArea::Chest]
            .into_iter()
            .collect();
        let schedule = build_focus_schedule(1, &areas);
        assert_eq!(schedule, vec![MuscleGroup::ALL.to_vec()]);
        assert!(build_focus_schedule(0, &areas).is_empty());
    }

    #[test]
    fn focus_schedule_dedups_overlapping_areas() {
        let areas: BTreeSet<FocusArea> = [FocusArea::UpperBody, FocusArea::Chest]
            .into_iter()
            .collect();
        let schedule = build_focus_schedule(1, &areas);
        assert_eq!(schedule, vec![MuscleGroup::UPPER.to_vec()]);
    }

    #[test]
    fn focus_areas_ignored_without_build_muscle() {
        let mut rng = SeededRng::new(5);
        let areas: BTreeSet<FocusArea> = [FocusArea::Chest].into_iter().collect();
        let schedule =
            build_muscle_schedule(2, &areas, FitnessLevel::Intermediate, false, &mut rng);
        assert_eq!(schedule, build_default_schedule(2, FitnessLevel::Intermediate));

        let focused = build_muscle_schedule(2, &areas, FitnessLevel::Intermediate, true, &mut rng);
        assert_eq!(focused, build_focus_schedule(2, &areas));
    }

    #[test]
    fn strength_selection_hits_level_target() {
        let catalog = Catalog::builtin();
        let mut rng = SeededRng::new(11);
        for (level, target) in [
            (FitnessLevel::Beginner, 3),
            (FitnessLevel::Intermediate, 4),
            (FitnessLevel::Advanced, 5),
        ] {
            let picked = select_strength_exercises(
                &MuscleGroup::PUSH,
                catalog.templates(),
                level,
                &mut rng,
            );
            assert_eq!(picked.len(), target);
            assert!(picked.iter().all(|p| p.workout_type == WorkoutType::Strength));
        }
    }

    #[test]
    fn strength_selection_covers_each_group_first() {
        let catalog = Catalog::builtin();
        let mut rng = SeededRng::new(3);
        let picked = select_strength_exercises(
            &MuscleGroup::PULL,
            catalog.templates(),
            FitnessLevel::Intermediate,
            &mut rng,
        );
        let backs = picked
            .iter()
            .filter(|p| p.muscle_group == Some(MuscleGroup::Back))
            .count();
        let biceps = picked
            .iter()
            .filter(|p| p.muscle_group == Some(MuscleGroup::Biceps))
            .count();
        assert_eq!((backs, biceps), (2, 2));
    }

    #[test]
    fn strength_selection_falls_short_only_when_catalog_exhausted() {
        let templates = vec![
            ExerciseTemplate::strength("Plank", MuscleGroup::Core, "", 8),
            ExerciseTemplate::strength("Plank", MuscleGroup::Core, "", 8),
            ExerciseTemplate::strength("Crunch", MuscleGroup::Core, "", 6),
            ExerciseTemplate::cardio("Run", "", 20),
        ];
        let mut rng = SeededRng::new(8);
        let picked = select_strength_exercises(
            &[MuscleGroup::Chest],
            &templates,
            FitnessLevel::Advanced,
            &mut rng,
        );
        let mut names: Vec<&str> = picked.iter().map(|p| p.template_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Crunch", "Plank"]);

        assert!(
            select_strength_exercises(&[MuscleGroup::Legs], &[], FitnessLevel::Beginner, &mut rng)
                .is_empty()
        );
    }

    #[test]
    fn cardio_selection_only_uses_plan_activities() {
        let catalog = Catalog::builtin();
        let mut rng = SeededRng::new(21);
        for index in 0..6 {
            let pick = select_cardio_exercise(index, catalog.templates(), &mut rng).unwrap();
            assert!(CARDIO_PLAN_NAMES.contains(&pick.template_name.as_str()));
        }

        let only_cycling = vec![ExerciseTemplate::cardio("Cycling", "", 18)];
        assert!(select_cardio_exercise(0, &only_cycling, &mut rng).is_none());
    }

    #[test]
    fn plan_has_seven_days_and_goal_workouts() {
        let catalog = Catalog::builtin();
        for goal in 1..=7 {
            let plan = generate_plan(&profile(goal), catalog.templates(), week());
            assert_eq!(plan.days.len(), 7);
            assert_eq!(plan.workout_day_count, goal as u8);
            assert_eq!(
                plan.days.iter().filter(|d| !d.is_rest_day).count(),
                goal as usize
            );
            for (i, day) in plan.days.iter().enumerate() {
                assert_eq!(day.day_of_week as usize, i + 1);
                if day.is_rest_day {
                    assert!(day.exercises.is_empty());
                    assert_eq!(day.theme, "REST");
                } else {
                    assert!(!day.exercises.is_empty());
                }
            }
            assert_no_duplicates(&plan);
        }
    }

    #[test]
    fn out_of_range_goal_is_clamped() {
        let catalog = Catalog::builtin();
        let plan = generate_plan(&profile(0), catalog.templates(), week());
        assert_eq!(plan.workout_day_count, 1);
        let plan = generate_plan(&profile(10), catalog.templates(), week());
        assert_eq!(plan.workout_day_count, 7);
        assert!(plan.days.iter().all(|d| !d.is_rest_day));
    }

    #[test]
    fn plan_is_deterministic() {
        let catalog = Catalog::builtin();
        let mut player = profile(5);
        player.fitness_level = FitnessLevel::Advanced;
        player.plan_regeneration_count = 4;
        let first = generate_plan(&player, catalog.templates(), week());
        let second = generate_plan(&player, catalog.templates(), week());
        assert_eq!(first, second);
    }

    #[test]
    fn regeneration_changes_the_plan() {
        let catalog = Catalog::builtin();
        let mut player = profile(4);
        player.fitness_level = FitnessLevel::Intermediate;
        let base = generate_plan(&player, catalog.templates(), week());

        let changed = (1..=5).any(|count| {
            player.plan_regeneration_count = count;
            generate_plan(&player, catalog.templates(), week()) != base
        });
        assert!(changed);
    }

    #[test]
    fn equipment_requirements_are_respected() {
        let catalog = Catalog::builtin();
        let mut player = profile(7);
        player.fitness_level = FitnessLevel::Advanced;
        player.equipment_access = [Equipment::Dumbbells].into_iter().collect();

        for count in 0..10 {
            player.plan_regeneration_count = count;
            let plan = generate_plan(&player, catalog.templates(), week());
            for exercise in plan.days.iter().flat_map(|d| &d.exercises) {
                let template = catalog.resolve(exercise).unwrap();
                assert!(
                    template.required_equipment.is_empty()
                        || template.required_equipment.contains(&Equipment::Dumbbells),
                    "{} needs {:?}",
                    template.name,
                    template.required_equipment
                );
            }
        }
    }

    #[test]
    fn beginner_strength_days_are_full_body() {
        let catalog = Catalog::builtin();
        let mut player = profile(3);
        player.workout_style = WorkoutStyle::Weights;
        let plan = generate_plan(&player, catalog.templates(), week());
        let strength: Vec<&PlannedDay> = plan
            .days
            .iter()
            .filter(|d| !d.is_rest_day && d.theme != "CARDIO")
            .collect();
        assert_eq!(strength.len(), 2);
        assert!(strength.iter().all(|d| d.theme == "FULL BODY"));
        assert!(strength.iter().all(|d| d.exercises.len() == 3));
    }

    #[test]
    fn themes_name_the_targeted_groups() {
        let catalog = Catalog::builtin();
        let mut player = profile(6);
        player.fitness_level = FitnessLevel::Advanced;
        let plan = generate_plan(&player, catalog.templates(), week());
        let themes: Vec<&str> = plan
            .days
            .iter()
            .filter(|d| !d.is_rest_day && d.theme != "CARDIO")
            .map(|d| d.theme.as_str())
            .collect();
        assert_eq!(
            themes,
            vec!["CHEST + SHOULDERS + TRICEPS", "BACK + BICEPS", "LEGS + CORE"]
        );
    }

    #[test]
    fn empty_catalog_keeps_workout_days() {
        let plan = generate_plan(&profile(4), &[], week());
        assert_eq!(plan.days.iter().filter(|d| !d.is_rest_day).count(), 4);
        assert!(plan.days.iter().all(|d| d.exercises.is_empty()));
    }

    #[test]
    fn plan_lookup_and_xp_total() {
        let catalog = Catalog::builtin();
        let plan = generate_plan(&profile(3), catalog.templates(), week());
        let monday = plan.day(Weekday::Mon).unwrap();
        assert_eq!(monday.label, "MON");
        assert!(!monday.is_rest_day);
        assert_eq!(
            plan.total_xp(),
            plan.days.iter().map(PlannedDay::total_xp).sum::<i32>()
        );
        assert!(plan.total_xp() > 0);
    }

    #[test]
    fn plan_serializes_to_json() {
        let catalog = Catalog::builtin();
        let plan = generate_plan(&profile(2), catalog.templates(), week());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["week_start"], "2024-06-02");
        assert_eq!(json["days"].as_array().unwrap().len(), 7);
        assert_eq!(json["days"][0]["label"], "SUN");
    }
}
