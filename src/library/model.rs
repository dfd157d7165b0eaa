use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// Identity of a track within one scanned library.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single playable song.
///
/// Tracks are shared as `Rc<Track>` between the playlist that owns them and
/// any loaded playback sequence; `liked` is the only field that changes after
/// a scan, and only through [`super::DataSource::update_track_liked`].
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    /// Playable source reference (a file path).
    pub src: String,
    pub duration: Option<Duration>,
    pub(super) liked: Cell<bool>,
}

impl Track {
    pub fn new(id: TrackId, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            artist: None,
            genre: None,
            src: src.into(),
            duration: None,
            liked: Cell::new(false),
        }
    }

    pub fn liked(&self) -> bool {
        self.liked.get()
    }
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<PathBuf>,
    pub tracks: Vec<Rc<Track>>,
}
