use std::collections::HashMap;

use crossterm::event::KeyCode;
use tracing::warn;

use crate::config::ControlsSettings;

use super::UiAction;

/// Parse a configured key: a single character, or a name such as `space`.
pub fn parse_key(raw: &str) -> Option<KeyCode> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match raw.trim().to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "tab" => KeyCode::Tab,
        other => {
            let n = other.strip_prefix('f')?.parse::<u8>().ok()?;
            if (1..=12).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

/// The fixed keyboard shortcut table: skip forward/back, play/pause, next,
/// previous and mute.
#[derive(Debug, Clone)]
pub struct ShortcutTable {
    map: HashMap<KeyCode, UiAction>,
    help: Vec<(String, String)>,
}

impl ShortcutTable {
    pub fn from_settings(controls: &ControlsSettings) -> Self {
        let skip = controls.skip_seconds.min(i64::MAX as u64) as i64;
        let keys = &controls.keys;
        let entries = [
            (&keys.play_pause, UiAction::PlayPause, "play/pause".to_string()),
            (&keys.next_song, UiAction::Next, "next".to_string()),
            (&keys.previous_song, UiAction::Previous, "previous".to_string()),
            (&keys.go_forward, UiAction::Scrub(skip), format!("+{skip}s")),
            (&keys.go_back, UiAction::Scrub(-skip), format!("-{skip}s")),
            (&keys.mute, UiAction::ToggleMute, "mute".to_string()),
        ];

        let mut map = HashMap::new();
        let mut help = Vec::new();
        for (raw, action, label) in entries {
            match parse_key(raw) {
                Some(code) => {
                    map.insert(code, action);
                    help.push((raw.clone(), label));
                }
                None => warn!(key = %raw, "ignoring unknown shortcut key"),
            }
        }
        Self { map, help }
    }

    /// Action bound to `code`, if any.
    pub fn action_for(&self, code: KeyCode) -> Option<UiAction> {
        self.map.get(&code).copied()
    }

    /// `(key, label)` pairs in display order.
    pub fn help(&self) -> &[(String, String)] {
        &self.help
    }
}
