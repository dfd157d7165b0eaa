use std::{env, path::PathBuf};

use crossterm::event::KeyCode;

use crate::binder::parse_key;

use super::schema::Settings;

/// Keys handled by the app layer before the shortcut table is consulted.
const RESERVED_KEYS: [KeyCode; 8] = [
    KeyCode::Char('j'),
    KeyCode::Char('k'),
    KeyCode::Char('g'),
    KeyCode::Char('G'),
    KeyCode::Char('s'),
    KeyCode::Char('f'),
    KeyCode::Char('K'),
    KeyCode::Char('q'),
];

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `ENCORE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.skip_seconds == 0 {
            return Err("controls.skip_seconds must be >= 1".to_string());
        }
        if self.audio.position_interval_ms == 0 {
            return Err("audio.position_interval_ms must be >= 1".to_string());
        }

        let keys = &self.controls.keys;
        let named = [
            ("go_forward", &keys.go_forward),
            ("go_back", &keys.go_back),
            ("play_pause", &keys.play_pause),
            ("next_song", &keys.next_song),
            ("previous_song", &keys.previous_song),
            ("mute", &keys.mute),
        ];
        let mut seen = Vec::with_capacity(named.len());
        for (name, raw) in named {
            let Some(code) = parse_key(raw) else {
                return Err(format!("controls.keys.{name}: unknown key {raw:?}"));
            };
            let app_key = matches!(
                code,
                KeyCode::Up | KeyCode::Down | KeyCode::Char('0'..='9')
            );
            if app_key || RESERVED_KEYS.contains(&code) {
                return Err(format!("controls.keys.{name}: {raw:?} is reserved"));
            }
            if seen.contains(&code) {
                return Err(format!("controls.keys.{name}: {raw:?} is bound twice"));
            }
            seen.push(code);
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("encore").join("config.toml"))
}

/// Default location of the liked-songs file.
pub fn default_liked_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("encore").join("liked.toml"))
}

/// Default location of the log file.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("encore").join("encore.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
