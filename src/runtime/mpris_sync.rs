use rand::Rng;

use crate::audio::MediaPrimitive;
use crate::mpris::MprisHandle;
use crate::session::{SessionController, SessionState};

/// What was last published, so unchanged state is not re-sent every tick.
#[derive(Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    cursor: Option<usize>,
    playback: SessionState,
    shuffle: bool,
    loads: u64,
}

impl MprisSnapshot {
    fn capture<M: MediaPrimitive, R: Rng>(session: &SessionController<M, R>, loads: u64) -> Self {
        Self {
            cursor: session.cursor(),
            playback: session.state(),
            shuffle: session.shuffle(),
            loads,
        }
    }
}

/// Publish the session to MPRIS if anything changed since `last`.
///
/// `loads` counts session reloads; a new session with the same cursor
/// still needs fresh metadata.
pub fn update_mpris<M: MediaPrimitive, R: Rng>(
    mpris: &MprisHandle,
    session: &SessionController<M, R>,
    loads: u64,
    last: &mut MprisSnapshot,
) {
    let now = MprisSnapshot::capture(session, loads);
    if now == *last {
        return;
    }
    mpris.set_track_metadata(session.cursor(), session.current_track().map(|t| t.as_ref()));
    mpris.set_playback(now.playback);
    mpris.set_shuffle(now.shuffle);
    *last = now;
}
