use thiserror::Error;

use crate::audio::MediaError;
use crate::library::LibraryError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot start a session with no tracks")]
    EmptySequence,

    #[error("track index {index} out of range for {len} tracks")]
    InvalidIndex { index: usize, len: usize },

    /// Seeking before the track's duration is known. Callers usually ignore it.
    #[error("seek unavailable until the track duration is known")]
    SeekUnavailable,

    #[error("no session loaded")]
    InvalidState,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
