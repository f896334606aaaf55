use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::Input;
use crate::scenes::Program;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default)]
    pub tick_interval_ms: TickIntervals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_reset")]
    pub reset: String,
    #[serde(default = "default_pause")]
    pub pause: String,
    #[serde(default = "default_restart")]
    pub restart: String,
    #[serde(default = "default_rotate_left")]
    pub rotate_left: String,
    #[serde(default = "default_rotate_right")]
    pub rotate_right: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_start() -> String { "s".into() }
fn default_reset() -> String { "r".into() }
fn default_pause() -> String { "p".into() }
fn default_restart() -> String { "f".into() }
fn default_rotate_left() -> String { "a".into() }
fn default_rotate_right() -> String { "d".into() }
fn default_quit() -> String { "Esc".into() }

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            start: default_start(),
            reset: default_reset(),
            pause: default_pause(),
            restart: default_restart(),
            rotate_left: default_rotate_left(),
            rotate_right: default_rotate_right(),
            quit: default_quit(),
        }
    }
}

/// Timer period per program, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickIntervals {
    #[serde(default = "default_network_ms")]
    pub network: u64,
    #[serde(default = "default_fight_ms")]
    pub fight: u64,
    #[serde(default = "default_stories_ms")]
    pub stories: u64,
}

fn default_network_ms() -> u64 { 50 }
fn default_fight_ms() -> u64 { 50 }
fn default_stories_ms() -> u64 { 33 }

impl Default for TickIntervals {
    fn default() -> Self {
        TickIntervals {
            network: default_network_ms(),
            fight: default_fight_ms(),
            stories: default_stories_ms(),
        }
    }
}

impl TickIntervals {
    pub fn millis(&self, program: Program) -> u64 {
        match program {
            Program::Network => self.network,
            Program::Fight => self.fight,
            Program::Stories => self.stories,
        }
    }

    pub fn for_program(&self, program: Program) -> Duration {
        Duration::from_millis(self.millis(program))
    }
}

impl Config {
    /// Load the user's config, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid config {} ({e:#}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config")
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("storyboard");
        path.push("config.json");
        path
    }
}

impl KeyBindings {
    /// Decode a key press into an input. Digit keys select scenes, `0`
    /// being the tenth.
    pub fn input_for(&self, event: &KeyEvent) -> Option<Input> {
        let plain = !event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if plain {
            if let KeyCode::Char(c @ '0'..='9') = event.code {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                return Some(Input::Select(if n == 0 { 10 } else { n }));
            }
        }

        [
            (&self.quit, Input::Quit),
            (&self.start, Input::Start),
            (&self.reset, Input::Reset),
            (&self.pause, Input::TogglePause),
            (&self.restart, Input::Restart),
            (&self.rotate_left, Input::RotateLeft),
            (&self.rotate_right, Input::RotateRight),
        ]
        .into_iter()
        .find(|(binding, _)| matches_binding(binding, event))
        .map(|(_, input)| input)
    }

    /// Decode a binding name as written in config or a key script, e.g.
    /// `"s"`, `"Esc"`, `"0"`.
    pub fn input_for_name(&self, name: &str) -> Option<Input> {
        let code = parse_key(name)?;
        self.input_for(&KeyEvent::new(code, KeyModifiers::NONE))
    }
}

fn parse_key(binding: &str) -> Option<KeyCode> {
    let code = match binding {
        "Esc" => KeyCode::Esc,
        "Enter" => KeyCode::Enter,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        }
    };
    Some(code)
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
///
/// Single-letter bindings match either case, so Caps Lock does not get in
/// the way.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return matches!((rest.chars().next(), event.code), (Some(c), KeyCode::Char(e)) if c == e);
    }

    // Reject plain bindings when Ctrl or Alt is held.
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }

    match (parse_key(binding), event.code) {
        (Some(KeyCode::Char(b)), KeyCode::Char(e)) => b.eq_ignore_ascii_case(&e),
        (Some(code), actual) => code == actual,
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.input_for(&key(KeyCode::Char('s'))), Some(Input::Start));
        assert_eq!(keys.input_for(&key(KeyCode::Char('S'))), Some(Input::Start));
        assert_eq!(keys.input_for(&key(KeyCode::Char('r'))), Some(Input::Reset));
        assert_eq!(keys.input_for(&key(KeyCode::Char('f'))), Some(Input::Restart));
        assert_eq!(keys.input_for(&key(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(keys.input_for(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn digits_select_scenes_with_zero_as_ten() {
        let keys = KeyBindings::default();
        assert_eq!(keys.input_for(&key(KeyCode::Char('3'))), Some(Input::Select(3)));
        assert_eq!(keys.input_for(&key(KeyCode::Char('0'))), Some(Input::Select(10)));
    }

    #[test]
    fn modifiers_block_plain_bindings() {
        let keys = KeyBindings::default();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(keys.input_for(&ctrl_s), None);
        assert!(matches_binding("Ctrl-s", &ctrl_s));
    }

    #[test]
    fn names_decode_like_key_presses() {
        let keys = KeyBindings::default();
        assert_eq!(keys.input_for_name("Esc"), Some(Input::Quit));
        assert_eq!(keys.input_for_name("7"), Some(Input::Select(7)));
        assert_eq!(keys.input_for_name("F5"), None);
        assert_eq!(keys.input_for_name("nonsense"), None);
    }

    #[test]
    fn partial_config_keeps_defaults() -> anyhow::Result<()> {
        let config = Config::from_json(r#"{"key_bindings": {"start": "Space"}, "tick_interval_ms": {"stories": 40}}"#)?;
        assert_eq!(config.key_bindings.start, "Space");
        assert_eq!(config.key_bindings.reset, "r");
        assert_eq!(config.tick_interval_ms.millis(Program::Stories), 40);
        assert_eq!(config.tick_interval_ms.millis(Program::Network), 50);
        assert_eq!(
            config.key_bindings.input_for(&key(KeyCode::Char(' '))),
            Some(Input::Start)
        );
        Ok(())
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(Config::from_json("{not json").is_err());
    }
}
