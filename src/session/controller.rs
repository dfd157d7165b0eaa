use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::audio::{MediaEvent, MediaPrimitive, PlaybackEngine};
use crate::library::{DataSource, Track};

use super::error::{Result, SessionError};
use super::events::{SessionEvent, SessionState};
use super::navigation::{self, Direction};
use super::sequence::TrackSequence;

/// Owns the loaded sequence, the cursor and the mode flags, and is the only
/// thing that drives the playback engine.
///
/// Every method runs to completion before returning, so calls made from
/// event callbacks apply strictly in call order.
pub struct SessionController<M, R = ThreadRng> {
    engine: PlaybackEngine<M>,
    sequence: Option<TrackSequence>,
    shuffle: bool,
    /// Set once the engine has been told to play in the current session.
    started: bool,
    rng: R,
    events: Sender<SessionEvent>,
}

impl<M: MediaPrimitive> SessionController<M, ThreadRng> {
    pub fn new(engine: PlaybackEngine<M>, events: Sender<SessionEvent>) -> Self {
        Self::with_rng(engine, rand::thread_rng(), events)
    }
}

impl<M: MediaPrimitive, R: Rng> SessionController<M, R> {
    pub fn with_rng(engine: PlaybackEngine<M>, rng: R, events: Sender<SessionEvent>) -> Self {
        Self {
            engine,
            sequence: None,
            shuffle: false,
            started: false,
            rng,
            events,
        }
    }

    fn emit(&self, event: SessionEvent) {
        // The UI may already be gone during shutdown.
        let _ = self.events.send(event);
    }

    fn loaded(&self) -> Result<&TrackSequence> {
        self.sequence.as_ref().ok_or(SessionError::InvalidState)
    }

    /// Replace the session with `tracks` and buffer the first one without
    /// playing it. An empty list leaves the current session untouched.
    pub fn load_session(&mut self, tracks: Vec<Rc<Track>>) -> Result<()> {
        let sequence = TrackSequence::load(tracks)?;
        let len = sequence.len();
        let first = Rc::clone(sequence.current());

        self.sequence = Some(sequence);
        self.started = false;
        info!(len, "session loaded");
        self.emit(SessionEvent::Loaded { len });
        self.emit(SessionEvent::TrackChanged {
            index: 0,
            id: first.id,
        });

        self.engine.load_track(&first.src)?;
        self.emit(SessionEvent::PlaybackChanged { playing: false });
        Ok(())
    }

    /// Jump to `index` and start playing it immediately.
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        let sequence = self.sequence.as_mut().ok_or(SessionError::InvalidState)?;
        sequence.set_cursor(index)?;
        let track = Rc::clone(sequence.current());

        self.started = true;
        debug!(index, id = %track.id, name = %track.name, "play index");
        self.emit(SessionEvent::TrackChanged {
            index,
            id: track.id,
        });

        self.engine.load_track(&track.src)?;
        self.engine.play();
        self.emit(SessionEvent::PlaybackChanged { playing: true });
        Ok(())
    }

    /// Invert play/pause from the primitive's actual state. Returns `true`
    /// when now playing.
    pub fn play_pause_toggle(&mut self) -> Result<bool> {
        self.loaded()?;
        let playing = self.engine.toggle_play_pause();
        self.started = true;
        self.emit(SessionEvent::PlaybackChanged { playing });
        Ok(playing)
    }

    /// Move to the next track and play it. Returns the new cursor.
    pub fn next(&mut self) -> Result<usize> {
        self.navigate(Direction::Next)
    }

    /// Move to the previous track and play it. Returns the new cursor.
    pub fn previous(&mut self) -> Result<usize> {
        self.navigate(Direction::Previous)
    }

    fn navigate(&mut self, direction: Direction) -> Result<usize> {
        let sequence = self.loaded()?;
        let (current, len) = (sequence.cursor(), sequence.len());
        let index = navigation::step(current, len, self.shuffle, direction, &mut self.rng)
            .ok_or(SessionError::InvalidState)?;
        self.play_index(index)?;
        Ok(index)
    }

    /// Seek to `pct` percent of the current track.
    ///
    /// Fails with `SeekUnavailable`, leaving the position alone, while the
    /// duration is still unknown.
    pub fn seek(&mut self, pct: f64) -> Result<()> {
        self.loaded()?;
        if self.engine.seek_to_percent(pct) {
            Ok(())
        } else {
            Err(SessionError::SeekUnavailable)
        }
    }

    pub fn scrub(&mut self, delta_secs: i64) -> Result<()> {
        self.loaded()?;
        self.engine.scrub(delta_secs);
        Ok(())
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.engine.set_muted(muted);
        self.emit(SessionEvent::MuteChanged(muted));
    }

    /// Returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.engine.mute_toggle();
        self.emit(SessionEvent::MuteChanged(muted));
        muted
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
        self.emit(SessionEvent::ShuffleChanged(shuffle));
    }

    /// Returns the new shuffle flag.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle);
        self.shuffle
    }

    /// Flip the liked flag of the current track through `source`.
    /// Returns the new flag.
    pub fn toggle_liked(&mut self, source: &mut dyn DataSource) -> Result<bool> {
        let track = Rc::clone(self.loaded()?.current());
        let liked = !track.liked();
        source.update_track_liked(track.id, liked)?;
        self.emit(SessionEvent::LikedChanged {
            id: track.id,
            liked,
        });
        Ok(liked)
    }

    pub fn state(&self) -> SessionState {
        match self.sequence {
            None => SessionState::Idle,
            Some(_) if !self.started => SessionState::Loaded,
            Some(_) if self.engine.is_paused() => SessionState::Paused,
            Some(_) => SessionState::Playing,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.sequence.as_ref().map(TrackSequence::cursor)
    }

    pub fn current_track(&self) -> Option<&Rc<Track>> {
        self.sequence.as_ref().map(TrackSequence::current)
    }

    pub fn len(&self) -> usize {
        self.sequence.as_ref().map_or(0, TrackSequence::len)
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn muted(&self) -> bool {
        self.engine.is_muted()
    }

    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    /// `None` while the current track's metadata has not arrived.
    pub fn duration(&self) -> Option<Duration> {
        self.engine.duration()
    }

    pub fn poll_media_event(&mut self) -> Option<MediaEvent> {
        self.engine.poll_event()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &PlaybackEngine<M> {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut PlaybackEngine<M> {
        &mut self.engine
    }
}
