use crate::library::TrackId;

/// State-change notifications for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new sequence replaced the previous one.
    Loaded { len: usize },
    TrackChanged { index: usize, id: TrackId },
    PlaybackChanged { playing: bool },
    ShuffleChanged(bool),
    MuteChanged(bool),
    LikedChanged { id: TrackId, liked: bool },
}

/// Coarse lifecycle of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No sequence loaded.
    #[default]
    Idle,
    /// Sequence loaded and first track buffered, nothing played yet.
    Loaded,
    Playing,
    Paused,
}
