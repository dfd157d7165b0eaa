use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often a playing track reports its position (milliseconds).
    pub position_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            position_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box when no playlist is open.
    pub header_text: String,

    /// Which track fields make up a song row, and in what order.
    ///
    /// Example: ["name", "artist", "genre"]
    pub track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `track_fields`.
    pub track_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ encore ~ ".to_string(),
            track_fields: vec![
                TrackDisplayField::Name,
                TrackDisplayField::Artist,
                TrackDisplayField::Genre,
            ],
            track_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds skipped by the forward/back shortcuts.
    pub skip_seconds: u64,
    pub keys: KeyBindings,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            skip_seconds: 5,
            keys: KeyBindings::default(),
        }
    }
}

/// Keyboard shortcut table. Each entry is a single character or a key name
/// such as `space`, `left` or `right`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub go_forward: String,
    pub go_back: String,
    pub play_pause: String,
    pub next_song: String,
    pub previous_song: String,
    pub mute: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            go_forward: "L".to_string(),
            go_back: "H".to_string(),
            play_pause: "space".to_string(),
            next_song: "l".to_string(),
            previous_song: "h".to_string(),
            mute: "m".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether the player starts muted.
    pub muted: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    #[serde(alias = "title")]
    Name,
    Artist,
    Genre,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// File names looked up (case-insensitive) as a playlist thumbnail.
    pub thumbnail_names: Vec<String>,
    /// Where liked songs are remembered. Defaults to the XDG data dir.
    pub liked_path: Option<PathBuf>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            max_depth: None,
            thumbnail_names: vec![
                "cover.jpg".into(),
                "cover.png".into(),
                "folder.jpg".into(),
                "folder.png".into(),
            ],
            liked_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `ENCORE_LOG`.
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/encore/encore.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
