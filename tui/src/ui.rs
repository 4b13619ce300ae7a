//! UI rendering.

use crate::state::App;
use fitquest_core::{PlannedDay, WorkoutType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
};

const HINTS: &str = "←/→: day • ↑/↓: exercise • [/]: week • t: today • g: new plan • r: reload • q: quit";

pub fn render(app: &App, frame: &mut Frame) {
    let [week_bar, main, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .areas(frame.area());

    let [days_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(main);

    render_week_bar(frame, week_bar, app);
    render_days(frame, days_area, app);
    render_day_detail(frame, detail_area, app);
    render_status(frame, status, &app.status, app.loading);
}

fn day_color(day: &PlannedDay) -> Color {
    if day.is_rest_day {
        Color::DarkGray
    } else if day.theme == "CARDIO" {
        Color::Cyan
    } else {
        Color::Green
    }
}

fn render_week_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("Week of {}", app.week_start.format("%b %-d, %Y"));
    let Some(plan) = &app.plan else {
        frame.render_widget(
            Paragraph::new("No plan loaded")
                .block(Block::bordered().title(title))
                .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let today_index = (app.today >= app.week_start)
        .then(|| (app.today - app.week_start).num_days())
        .filter(|d| *d < 7)
        .map(|d| d as usize);

    let mut spans: Vec<Span> = Vec::with_capacity(plan.days.len() * 2);
    for (idx, day) in plan.days.iter().enumerate() {
        let mut style = Style::default().fg(day_color(day));
        if idx == app.selected_day {
            style = style.reversed();
        }
        if Some(idx) == today_index {
            style = style.bold().underlined();
        }
        spans.push(Span::styled(format!(" {} ", day.label), style));
        if idx + 1 < plan.days.len() {
            spans.push(Span::raw(" "));
        }
    }

    let content = Paragraph::new(Line::from(spans))
        .block(Block::bordered().title(title))
        .alignment(Alignment::Center);

    frame.render_widget(content, area);
}

fn render_days(frame: &mut Frame, area: Rect, app: &App) {
    let Some(plan) = &app.plan else {
        frame.render_widget(
            Paragraph::new("Waiting for plan…").block(Block::bordered().title("Plan")),
            area,
        );
        return;
    };

    let rows = plan.days.iter().enumerate().map(|(idx, day)| {
        let style = if idx == app.selected_day {
            Style::default().bold().yellow()
        } else {
            Style::default().fg(day_color(day))
        };
        let xp = if day.is_rest_day {
            String::new()
        } else {
            format!("{} XP", day.total_xp())
        };
        Row::new(vec![
            Cell::from(day.label.clone()),
            Cell::from(day.theme.clone()),
            Cell::from(xp),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(7),
        ],
    )
    .header(Row::new(vec!["Day", "Focus", "XP"]).bold())
    .block(Block::bordered().title(format!(
        "Plan • {} workouts • {} XP",
        plan.workout_day_count,
        plan.total_xp()
    )));

    frame.render_widget(table, area);
}

fn render_day_detail(frame: &mut Frame, area: Rect, app: &App) {
    let title = app.selected_date().format("%A %b %-d").to_string();
    let Some(day) = app.selected() else {
        frame.render_widget(Paragraph::new("").block(Block::bordered().title(title)), area);
        return;
    };

    if day.is_rest_day {
        frame.render_widget(
            Paragraph::new("Rest day. Recover and come back stronger.")
                .block(Block::bordered().title(title))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    if day.exercises.is_empty() {
        frame.render_widget(
            Paragraph::new("No matching exercises in the catalog")
                .block(Block::bordered().title(title)),
            area,
        );
        return;
    }

    let rows = day.exercises.iter().enumerate().map(|(idx, exercise)| {
        let style = if idx == app.selected_exercise {
            Style::default().bold().cyan()
        } else {
            Style::default()
        };
        let target = match (exercise.workout_type, exercise.muscle_group) {
            (WorkoutType::Cardio, _) => "cardio".to_string(),
            (WorkoutType::Strength, Some(group)) => group.to_string(),
            (WorkoutType::Strength, None) => "strength".to_string(),
        };
        Row::new(vec![
            Cell::from(format!("{}.", idx + 1)),
            Cell::from(exercise.template_name.clone()),
            Cell::from(target),
            Cell::from(format!("+{}", exercise.base_xp)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .block(Block::bordered().title(format!("{title} • {}", day.theme)));

    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, status: &str, loading: bool) {
    let status_line = if loading {
        Line::from(status.to_string()).italic()
    } else {
        Line::from(status.to_string())
    };
    let lines = vec![status_line, Line::from(HINTS).dim()];

    let status = Paragraph::new(lines)
        .block(Block::bordered().title("Status"))
        .alignment(Alignment::Left);

    frame.render_widget(status, area);
}
