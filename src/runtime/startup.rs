use rand::Rng;

use crate::audio::MediaPrimitive;
use crate::config;
use crate::session::SessionController;

/// Seed the controller's mode flags from `[playback]`.
pub fn apply_playback_defaults<M: MediaPrimitive, R: Rng>(
    session: &mut SessionController<M, R>,
    settings: &config::Settings,
) {
    if settings.playback.shuffle {
        session.set_shuffle(true);
    }
    if settings.playback.muted {
        session.set_muted(true);
    }
}
