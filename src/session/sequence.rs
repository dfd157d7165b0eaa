use std::rc::Rc;

use crate::library::Track;

use super::error::{Result, SessionError};

/// The ordered tracks of one playback session plus the cursor into them.
///
/// Never empty; the cursor is always a valid index.
#[derive(Debug, Clone)]
pub struct TrackSequence {
    tracks: Vec<Rc<Track>>,
    cursor: usize,
}

impl TrackSequence {
    /// Take `tracks` wholesale with the cursor at 0.
    pub fn load(tracks: Vec<Rc<Track>>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(SessionError::EmptySequence);
        }
        Ok(Self { tracks, cursor: 0 })
    }

    pub fn get(&self, index: usize) -> Result<&Rc<Track>> {
        self.tracks.get(index).ok_or(SessionError::InvalidIndex {
            index,
            len: self.tracks.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Rc<Track> {
        &self.tracks[self.cursor]
    }

    pub(super) fn set_cursor(&mut self, index: usize) -> Result<()> {
        self.get(index)?;
        self.cursor = index;
        Ok(())
    }
}
