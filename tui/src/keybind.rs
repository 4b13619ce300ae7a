//! Keybinding configuration and parsing.

use crate::command::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Maps key events to commands.
pub struct KeyBindings {
    bindings: HashMap<KeySpec, Command>,
}

/// A normalized key specification for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeySpec {
    code: KeyCode,
    ctrl: bool,
    alt: bool,
    shift: bool,
}

impl From<KeyEvent> for KeySpec {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        }
    }
}

impl KeyBindings {
    /// Create default keybindings.
    pub fn defaults() -> Self {
        let mut bindings = HashMap::new();

        // Quit
        bindings.insert(key(KeyCode::Esc), Command::Quit);
        bindings.insert(key(KeyCode::Char('q')), Command::Quit);
        bindings.insert(ctrl(KeyCode::Char('c')), Command::Quit);

        // Days
        bindings.insert(key(KeyCode::Right), Command::NextDay);
        bindings.insert(key(KeyCode::Char('l')), Command::NextDay);
        bindings.insert(key(KeyCode::Left), Command::PrevDay);
        bindings.insert(key(KeyCode::Char('h')), Command::PrevDay);
        bindings.insert(key(KeyCode::Char('t')), Command::Today);

        // Weeks
        bindings.insert(key(KeyCode::Char(']')), Command::NextWeek);
        bindings.insert(key(KeyCode::Char('[')), Command::PrevWeek);

        // Exercises within the selected day
        bindings.insert(key(KeyCode::Down), Command::NextExercise);
        bindings.insert(key(KeyCode::Char('j')), Command::NextExercise);
        bindings.insert(key(KeyCode::Up), Command::PrevExercise);
        bindings.insert(key(KeyCode::Char('k')), Command::PrevExercise);

        // Plan
        bindings.insert(key(KeyCode::Char('g')), Command::Regenerate);
        bindings.insert(key(KeyCode::Char('r')), Command::Reload);

        Self { bindings }
    }

    /// Load keybindings from a config file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::defaults(),
        }
    }

    /// Apply `key = command` lines on top of the defaults.
    pub fn parse(content: &str) -> Self {
        let mut bindings = Self::defaults();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            if let Some((key_str, cmd_str)) = line.split_once('=') {
                let cmd_str = cmd_str.trim().trim_matches(':').trim_end_matches("<Enter>");

                if let (Some(spec), Ok(cmd)) = (parse_key_spec(key_str), cmd_str.parse()) {
                    bindings.bindings.insert(spec, cmd);
                }
            }
        }

        bindings
    }

    /// Look up a command for a key event.
    pub fn get(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeySpec::from(event)).copied()
    }
}

fn key(code: KeyCode) -> KeySpec {
    KeySpec {
        code,
        ctrl: false,
        alt: false,
        shift: false,
    }
}

fn ctrl(code: KeyCode) -> KeySpec {
    KeySpec {
        code,
        ctrl: true,
        alt: false,
        shift: false,
    }
}

/// Parse a key specification string like "<C-x>", "<Esc>", "<tab>", "n".
fn parse_key_spec(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if s.starts_with('<') && s.ends_with('>') && s.len() > 2 {
        parse_bracketed_key(&s[1..s.len() - 1])
    } else if s.chars().count() == 1 {
        let ch = s.chars().next()?;
        Some(key(KeyCode::Char(ch)))
    } else {
        None
    }
}

fn parse_bracketed_key(s: &str) -> Option<KeySpec> {
    let mut ctrl = false;
    let mut alt = false;
    let mut shift = false;

    let parts: Vec<&str> = s.split('-').collect();
    let key_part = parts.last()?;

    for &part in &parts[..parts.len().saturating_sub(1)] {
        match part {
            "C" => ctrl = true,
            "A" => alt = true,
            "S" => shift = true,
            _ => {}
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => {
            shift = true;
            KeyCode::BackTab
        }
        "enter" | "return" => KeyCode::Enter,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
        _ => return None,
    };

    Some(KeySpec {
        code,
        ctrl,
        alt,
        shift,
    })
}
