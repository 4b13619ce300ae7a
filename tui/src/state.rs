//! Application state.

use chrono::{Datelike, Duration, Local, NaiveDate};
use fitquest_core::{PlanRequest, PlannedDay, PlayerProfile, WeeklyPlan, start_of_week};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{ApiClient, Request, Response};
use crate::command::Command;

pub struct App {
    pub running: bool,
    pub week_start: NaiveDate,
    pub today: NaiveDate,
    pub profile: PlayerProfile,
    pub plan: Option<WeeklyPlan>,
    /// Sunday-based index into the plan's days.
    pub selected_day: usize,
    pub selected_exercise: usize,
    pub status: String,
    pub loading: bool,
    api: ApiClient,
    profile_path: PathBuf,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let profile_path = config_dir().join("profile.json");
        let profile = load_profile(&profile_path)?;
        let api = ApiClient::new()?;
        let today = Local::now().date_naive();

        Ok(Self {
            running: true,
            week_start: start_of_week(today),
            today,
            profile,
            plan: None,
            selected_day: today.weekday().num_days_from_sunday() as usize,
            selected_exercise: 0,
            status: String::new(),
            loading: false,
            api,
            profile_path,
        })
    }

    pub fn load_plan(&mut self) {
        self.loading = true;
        self.status = format!("Loading week of {}", self.week_start.format("%b %-d"));
        self.api.send(Request::LoadPlan(PlanRequest {
            profile: self.profile.clone(),
            week_start: Some(self.week_start),
        }));
    }

    pub fn poll_io(&mut self) {
        while let Ok(resp) = self.api.rx.try_recv() {
            self.handle_response(resp);
        }
    }

    fn handle_response(&mut self, resp: Response) {
        match resp {
            Response::Plan(result) => {
                self.loading = false;
                match result {
                    // A response for a week we already left is stale.
                    Ok(plan) if plan.week_start != self.week_start => {}
                    Ok(plan) => {
                        self.status = format!(
                            "{} workout days • {} XP available",
                            plan.workout_day_count,
                            plan.total_xp()
                        );
                        self.plan = Some(plan);
                        self.clamp_exercise();
                    }
                    Err(e) => self.status = format!("Load error: {e}"),
                }
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::NextDay => self.move_day(1),
            Command::PrevDay => self.move_day(-1),
            Command::Today => self.jump_to_today(),
            Command::NextWeek => self.move_week(1),
            Command::PrevWeek => self.move_week(-1),
            Command::NextExercise => self.move_exercise(1),
            Command::PrevExercise => self.move_exercise(-1),
            Command::Regenerate => self.regenerate(),
            Command::Reload => self.load_plan(),
        }
    }

    pub fn selected(&self) -> Option<&PlannedDay> {
        self.plan.as_ref()?.days.get(self.selected_day)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.week_start + Duration::days(self.selected_day as i64)
    }

    fn move_day(&mut self, delta: i64) {
        self.selected_day = wrap_index(self.selected_day, delta, 7);
        self.selected_exercise = 0;
    }

    fn move_week(&mut self, delta: i64) {
        self.week_start += Duration::weeks(delta);
        self.plan = None;
        self.load_plan();
    }

    fn jump_to_today(&mut self) {
        self.selected_day = self.today.weekday().num_days_from_sunday() as usize;
        self.selected_exercise = 0;
        let week = start_of_week(self.today);
        if week != self.week_start {
            self.week_start = week;
            self.plan = None;
            self.load_plan();
        }
    }

    fn move_exercise(&mut self, delta: i64) {
        let count = self.selected().map_or(0, |d| d.exercises.len());
        if count > 0 {
            self.selected_exercise = wrap_index(self.selected_exercise, delta, count);
        }
    }

    fn clamp_exercise(&mut self) {
        let count = self.selected().map_or(0, |d| d.exercises.len());
        if self.selected_exercise >= count {
            self.selected_exercise = 0;
        }
    }

    fn regenerate(&mut self) {
        self.profile.regenerate();
        if let Err(e) = save_profile(&self.profile_path, &self.profile) {
            self.status = format!("Could not save profile: {e}");
            return;
        }
        self.load_plan();
    }
}

fn wrap_index(current: usize, delta: i64, len: usize) -> usize {
    let len = len as i64;
    (current as i64 + delta).rem_euclid(len) as usize
}

/// Reads the profile, or the default profile when the file does not exist.
pub fn load_profile(path: &Path) -> color_eyre::Result<PlayerProfile> {
    if !path.exists() {
        return Ok(PlayerProfile::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_profile(path: &Path, profile: &PlayerProfile) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(profile)?)?;
    Ok(())
}

pub fn config_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .map(|p| p.join("fitquest"))
        .unwrap_or_else(|| PathBuf::from("."))
}
