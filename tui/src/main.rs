//! Weekly workout plan viewer.

mod api;
mod command;
mod keybind;
mod state;
mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use keybind::KeyBindings;
use state::App;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let keys = KeyBindings::load(&state::config_dir().join("keys.conf"));
    let mut app = App::new()?;
    app.load_plan();

    let mut terminal = ratatui::init();
    let result = run(&mut app, &keys, &mut terminal);
    ratatui::restore();

    result
}

fn run(
    app: &mut App,
    keys: &KeyBindings,
    terminal: &mut ratatui::DefaultTerminal,
) -> color_eyre::Result<()> {
    while app.running {
        app.poll_io();

        terminal.draw(|f| ui::render(app, f))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = keys.get(key) {
                app.apply(command);
            }
        }
    }

    Ok(())
}
