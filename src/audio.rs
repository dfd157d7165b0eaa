//! Playback engine and the media primitives it can drive.

mod engine;
mod media;
mod sink;

#[cfg(test)]
pub(crate) mod fake;

pub use engine::PlaybackEngine;
pub use media::{MediaError, MediaEvent, MediaPrimitive};
pub use sink::RodioMedia;
