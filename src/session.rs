//! Playback session: the loaded track sequence, navigation rules and the
//! controller that ties them to the playback engine.

mod controller;
mod error;
mod events;
mod navigation;
mod sequence;

pub use controller::SessionController;
pub use error::{Result, SessionError};
pub use events::{SessionEvent, SessionState};
pub use navigation::{Direction, step, wrap_index};
pub use sequence::TrackSequence;

#[cfg(test)]
mod tests;
