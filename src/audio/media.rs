//! The media primitive the playback engine drives.
//!
//! A primitive holds at most one source at a time. Position and duration are
//! live attributes of the primitive; the duration may stay unknown for a while
//! after a load, until the primitive has read enough of the source.

use std::time::Duration;

use thiserror::Error;

/// Notifications raised by a media primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Fired repeatedly while playing, and once when metadata becomes known.
    PositionChanged,
    /// The current source played to its end.
    Ended,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("failed to open {src}: {source}")]
    Open {
        src: String,
        source: std::io::Error,
    },

    #[error("failed to decode {src}: {source}")]
    Decode {
        src: String,
        source: rodio::decoder::DecoderError,
    },

    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
}

pub trait MediaPrimitive {
    /// Source currently assigned, if any.
    fn src(&self) -> Option<&str>;

    /// Assign a new source, leaving the primitive paused at position zero.
    fn load(&mut self, src: &str) -> Result<(), MediaError>;

    fn play(&mut self);

    fn pause(&mut self);

    /// Ground truth: whether the primitive is currently paused.
    fn paused(&self) -> bool;

    fn current_time(&self) -> Duration;

    fn seek(&mut self, pos: Duration) -> Result<(), MediaError>;

    /// `None` until the primitive knows the length of its source.
    fn duration(&self) -> Option<Duration>;

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    /// Next pending notification, if any. Called from the event loop.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}
