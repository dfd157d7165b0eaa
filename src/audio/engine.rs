use std::time::Duration;

use tracing::{debug, warn};

use super::media::{MediaError, MediaEvent, MediaPrimitive};

/// Imperative wrapper around exactly one media primitive.
///
/// The primitive is never recreated: switching tracks reassigns its source.
/// Volume is binary, `0.0` when muted and `1.0` otherwise.
pub struct PlaybackEngine<M> {
    media: M,
}

impl<M: MediaPrimitive> PlaybackEngine<M> {
    pub fn new(media: M) -> Self {
        Self { media }
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Stop whatever is playing and assign `src`, positioned at zero.
    pub fn load_track(&mut self, src: &str) -> Result<(), MediaError> {
        debug!(previous = ?self.media.src(), src, "load track");
        self.pause();
        self.media.load(src)
    }

    pub fn play(&mut self) {
        self.media.play();
    }

    pub fn pause(&mut self) {
        self.media.pause();
    }

    /// Invert the primitive's own paused state. Returns `true` when now playing.
    pub fn toggle_play_pause(&mut self) -> bool {
        if self.media.paused() {
            self.media.play();
            true
        } else {
            self.media.pause();
            false
        }
    }

    pub fn is_paused(&self) -> bool {
        self.media.paused()
    }

    pub fn position(&self) -> Duration {
        self.media.current_time()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.media.duration()
    }

    /// Jump to `pct` percent (clamped to 0..=100) of the track.
    ///
    /// Returns `false` without touching the primitive when the duration is
    /// not known yet or `pct` is not a number.
    pub fn seek_to_percent(&mut self, pct: f64) -> bool {
        let Some(duration) = self.media.duration() else {
            return false;
        };
        if pct.is_nan() {
            return false;
        }
        let target = duration.mul_f64(pct.clamp(0.0, 100.0) / 100.0);
        self.seek_to(target);
        true
    }

    /// Move by `delta_secs`, clamped to `[0, duration]` (or `>= 0` while the
    /// duration is unknown).
    pub fn scrub(&mut self, delta_secs: i64) {
        let current = self.media.current_time().as_secs_f64();
        let mut target = (current + delta_secs as f64).max(0.0);
        if let Some(duration) = self.media.duration() {
            target = target.min(duration.as_secs_f64());
        }
        self.seek_to(Duration::from_secs_f64(target));
    }

    fn seek_to(&mut self, target: Duration) {
        debug!(target_ms = target.as_millis() as u64, "seek");
        if let Err(e) = self.media.seek(target) {
            warn!(error = %e, "media seek failed");
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.media.set_volume(if muted { 0.0 } else { 1.0 });
    }

    /// Flip between silent and full volume. Returns `true` when now muted.
    pub fn mute_toggle(&mut self) -> bool {
        let next = if self.media.volume() > 0.0 { 0.0 } else { 1.0 };
        self.media.set_volume(next);
        next == 0.0
    }

    pub fn is_muted(&self) -> bool {
        self.media.volume() <= 0.0
    }

    pub fn poll_event(&mut self) -> Option<MediaEvent> {
        self.media.poll_event()
    }
}
