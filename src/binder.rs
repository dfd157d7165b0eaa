//! Maps UI actions, keyboard shortcuts and media notifications onto the
//! session controller.

mod shortcuts;
mod timeline;

use crossterm::event::KeyCode;
use rand::Rng;
use tracing::debug;

use crate::audio::{MediaEvent, MediaPrimitive};
use crate::library::DataSource;
use crate::session::{self, SessionController, SessionError};

pub use shortcuts::{ShortcutTable, parse_key};
pub use timeline::{TimelineView, format_mmss};

/// Discrete UI controls, each bound to exactly one controller operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiAction {
    PlayPause,
    ToggleMute,
    ToggleShuffle,
    Previous,
    Next,
    /// Timeline drag, 0..=100.
    SeekPercent(f64),
    /// Relative skip in seconds.
    Scrub(i64),
    PlayIndex(usize),
    ToggleLiked,
}

pub struct EventBinder {
    shortcuts: ShortcutTable,
    timeline: TimelineView,
}

impl EventBinder {
    pub fn new(shortcuts: ShortcutTable) -> Self {
        Self {
            shortcuts,
            timeline: TimelineView::default(),
        }
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn timeline(&self) -> &TimelineView {
        &self.timeline
    }

    /// Run `action` against the session.
    ///
    /// A seek that cannot happen yet is dropped quietly; every other failure
    /// is returned.
    pub fn dispatch<M: MediaPrimitive, R: Rng>(
        &mut self,
        action: UiAction,
        session: &mut SessionController<M, R>,
        source: &mut dyn DataSource,
    ) -> session::Result<()> {
        let result = match action {
            UiAction::PlayPause => session.play_pause_toggle().map(|_| ()),
            UiAction::ToggleMute => {
                session.toggle_mute();
                Ok(())
            }
            UiAction::ToggleShuffle => {
                session.toggle_shuffle();
                Ok(())
            }
            UiAction::Previous => session.previous().map(|_| ()),
            UiAction::Next => session.next().map(|_| ()),
            UiAction::SeekPercent(pct) => session.seek(pct),
            UiAction::Scrub(delta) => session.scrub(delta),
            UiAction::PlayIndex(index) => session.play_index(index),
            UiAction::ToggleLiked => session.toggle_liked(source).map(|_| ()),
        };
        self.refresh_timeline(session);

        match result {
            Err(SessionError::SeekUnavailable) => {
                debug!(?action, "seek ignored, duration not known yet");
                Ok(())
            }
            other => other,
        }
    }

    /// Look `code` up in the shortcut table. Returns `Ok(false)` for keys
    /// that are not bound.
    pub fn handle_key<M: MediaPrimitive, R: Rng>(
        &mut self,
        code: KeyCode,
        session: &mut SessionController<M, R>,
        source: &mut dyn DataSource,
    ) -> session::Result<bool> {
        let Some(action) = self.shortcuts.action_for(code) else {
            return Ok(false);
        };
        self.dispatch(action, session, source)?;
        Ok(true)
    }

    pub fn handle_media_event<M: MediaPrimitive, R: Rng>(
        &mut self,
        event: MediaEvent,
        session: &mut SessionController<M, R>,
    ) -> session::Result<()> {
        let result = match event {
            MediaEvent::PositionChanged => Ok(()),
            MediaEvent::Ended => {
                debug!("track ended, advancing");
                session.next().map(|_| ())
            }
        };
        self.refresh_timeline(session);
        result
    }

    /// Drain every pending media notification.
    pub fn pump_media<M: MediaPrimitive, R: Rng>(
        &mut self,
        session: &mut SessionController<M, R>,
    ) -> session::Result<()> {
        while let Some(event) = session.poll_media_event() {
            self.handle_media_event(event, session)?;
        }
        Ok(())
    }

    fn refresh_timeline<M: MediaPrimitive, R: Rng>(&mut self, session: &SessionController<M, R>) {
        self.timeline.update(session.position(), session.duration());
    }
}

#[cfg(test)]
mod tests;
