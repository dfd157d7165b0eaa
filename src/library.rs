//! Song and playlist data source.
//!
//! A [`Library`] is built from a directory scan and a [`LikedStore`]. The
//! playback session only sees it through the [`DataSource`] trait.

mod display;
mod model;
mod scan;
mod store;

use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use tracing::info;

use crate::config::LibrarySettings;

pub use display::display_from_fields;
pub use model::{Playlist, Track, TrackId};
pub use scan::scan;
pub use store::LikedStore;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no track with id {0}")]
    UnknownTrack(TrackId),

    #[error("liked store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("liked store is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not encode liked store: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Read access to playlists plus the one write the player performs.
pub trait DataSource {
    fn all_playlists(&self) -> &[Playlist];

    fn playlist_by_id(&self, id: &str) -> Option<&Playlist> {
        self.all_playlists().iter().find(|p| p.id == id)
    }

    /// Songs of playlist `id`, in playlist order.
    fn songs_for_playlist(&self, id: &str) -> Option<Vec<Rc<Track>>> {
        self.playlist_by_id(id).map(|p| p.tracks.clone())
    }

    fn update_track_liked(&mut self, id: TrackId, liked: bool) -> Result<(), LibraryError>;
}

pub struct Library {
    playlists: Vec<Playlist>,
    store: LikedStore,
}

impl Library {
    /// Build a library from already scanned playlists, applying stored likes.
    pub fn new(playlists: Vec<Playlist>, store: LikedStore) -> Self {
        for track in playlists.iter().flat_map(|p| p.tracks.iter()) {
            track.liked.set(store.contains(&track.src));
        }
        Self { playlists, store }
    }

    /// Scan `dir` and open the liked store at `liked_path` (in memory when `None`).
    pub fn load(
        dir: &Path,
        settings: &LibrarySettings,
        liked_path: Option<&Path>,
    ) -> Result<Self, LibraryError> {
        let store = match liked_path {
            Some(p) => LikedStore::open(p)?,
            None => LikedStore::in_memory(),
        };
        let playlists = scan(dir, settings);
        info!(
            dir = %dir.display(),
            playlists = playlists.len(),
            liked = ?store.path(),
            "library loaded"
        );
        Ok(Self::new(playlists, store))
    }

    fn find_track(&self, id: TrackId) -> Option<&Rc<Track>> {
        self.playlists
            .iter()
            .flat_map(|p| p.tracks.iter())
            .find(|t| t.id == id)
    }
}

impl DataSource for Library {
    fn all_playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    fn update_track_liked(&mut self, id: TrackId, liked: bool) -> Result<(), LibraryError> {
        let track = self.find_track(id).ok_or(LibraryError::UnknownTrack(id))?;
        let src = track.src.clone();
        track.liked.set(liked);
        self.store.set(&src, liked)
    }
}
