//! Application model types: `App` and `Screen`.
//!
//! The `App` struct mirrors what the session reports and holds the list
//! selection used by the UI and runtime.

use std::path::PathBuf;
use std::rc::Rc;

use crate::library::{Playlist, Track};
use crate::session::{SessionEvent, SessionState};

/// Which list is on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Playlists,
    Songs,
}

/// What the playlist list shows for one playlist.
#[derive(Clone, Debug)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<PathBuf>,
}

impl From<&Playlist> for PlaylistSummary {
    fn from(p: &Playlist) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            thumbnail: p.thumbnail.clone(),
        }
    }
}

/// The main application model.
pub struct App {
    pub screen: Screen,
    pub playlists: Vec<PlaylistSummary>,
    pub playlist_selected: usize,

    /// Playlist whose songs are listed on the songs screen.
    pub open_playlist: Option<usize>,
    pub songs: Vec<Rc<Track>>,
    pub selected: usize,

    /// Playlist loaded into the playback session.
    pub session_playlist: Option<usize>,
    pub now_playing: Option<usize>,
    pub playback: SessionState,
    pub shuffle: bool,
    pub muted: bool,

    pub metadata_window: bool,
    pub message: Option<String>,
    pub current_dir: Option<String>,
}

impl App {
    pub fn new(playlists: &[Playlist]) -> Self {
        Self {
            screen: Screen::Playlists,
            playlists: playlists.iter().map(PlaylistSummary::from).collect(),
            playlist_selected: 0,

            open_playlist: None,
            songs: Vec::new(),
            selected: 0,

            session_playlist: None,
            now_playing: None,
            playback: SessionState::Idle,
            shuffle: false,
            muted: false,

            metadata_window: false,
            message: None,
            current_dir: None,
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Show `songs` of playlist `index` on the songs screen.
    pub fn open_playlist(&mut self, index: usize, songs: Vec<Rc<Track>>) {
        self.open_playlist = Some(index);
        self.songs = songs;
        self.screen = Screen::Songs;
        self.selected = match (self.session_playlist, self.now_playing) {
            (Some(p), Some(i)) if p == index && i < self.songs.len() => i,
            _ => 0,
        };
    }

    /// Return to the playlist list, keeping playback untouched.
    pub fn back_to_playlists(&mut self) {
        self.screen = Screen::Playlists;
        self.metadata_window = false;
    }

    pub fn selected_playlist(&self) -> Option<&PlaylistSummary> {
        self.playlists.get(self.playlist_selected)
    }

    pub fn selected_song(&self) -> Option<&Rc<Track>> {
        self.songs.get(self.selected)
    }

    pub fn now_playing_track(&self) -> Option<&Rc<Track>> {
        if self.session_playlist != self.open_playlist {
            return None;
        }
        self.now_playing.and_then(|i| self.songs.get(i))
    }

    /// Whether the songs screen shows the playlist that is playing.
    pub fn viewing_session(&self) -> bool {
        self.screen == Screen::Songs
            && self.open_playlist.is_some()
            && self.open_playlist == self.session_playlist
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Playlists => self.playlists.len(),
            Screen::Songs => self.songs.len(),
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Playlists => &mut self.playlist_selected,
            Screen::Songs => &mut self.selected,
        }
    }

    /// Move selection down; wraps around to the first element.
    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let cur = self.cursor_mut();
        *cur = (*cur + 1) % len;
    }

    /// Move selection up; wraps around to the last element.
    pub fn prev(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let cur = self.cursor_mut();
        *cur = if *cur == 0 { len - 1 } else { *cur - 1 };
    }

    pub fn select_first(&mut self) {
        *self.cursor_mut() = 0;
    }

    pub fn select_last(&mut self) {
        let len = self.list_len();
        *self.cursor_mut() = len.saturating_sub(1);
    }

    /// Mirror a session notification.
    pub fn apply(&mut self, event: &SessionEvent) {
        match *event {
            SessionEvent::Loaded { .. } => {
                self.session_playlist = self.open_playlist;
                self.now_playing = None;
                self.playback = SessionState::Loaded;
            }
            SessionEvent::TrackChanged { index, .. } => {
                self.now_playing = Some(index);
                if self.viewing_session() {
                    self.selected = index;
                }
            }
            SessionEvent::PlaybackChanged { playing } => {
                if playing {
                    self.playback = SessionState::Playing;
                } else if self.playback != SessionState::Loaded {
                    self.playback = SessionState::Paused;
                }
            }
            SessionEvent::ShuffleChanged(on) => self.shuffle = on,
            SessionEvent::MuteChanged(on) => self.muted = on,
            SessionEvent::LikedChanged { .. } => {}
        }
    }
}
