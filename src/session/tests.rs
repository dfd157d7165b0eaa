use std::collections::HashSet;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::audio::{MediaPrimitive, PlaybackEngine};
use crate::audio::fake::FakeMedia;
use crate::library::{DataSource, LikedStore, Library, Playlist, Track, TrackId};

type TestController = SessionController<FakeMedia, StdRng>;

fn tracks(n: usize) -> Vec<Rc<Track>> {
    (0..n)
        .map(|i| {
            Rc::new(Track::new(
                TrackId(i as u32),
                format!("t{i}"),
                format!("/music/t{i}.mp3"),
            ))
        })
        .collect()
}

fn controller() -> (TestController, Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = PlaybackEngine::new(FakeMedia::default());
    (
        SessionController::with_rng(engine, StdRng::seed_from_u64(7), tx),
        rx,
    )
}

fn loaded(n: usize) -> (TestController, Receiver<SessionEvent>) {
    let (mut c, rx) = controller();
    c.load_session(tracks(n)).unwrap();
    (c, rx)
}

fn drain(rx: &Receiver<SessionEvent>) -> Vec<SessionEvent> {
    rx.try_iter().collect()
}

#[test]
fn loading_no_tracks_fails() {
    let (mut c, _rx) = controller();
    assert!(matches!(
        c.load_session(Vec::new()),
        Err(SessionError::EmptySequence)
    ));
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.cursor(), None);
}

#[test]
fn load_session_buffers_first_track_without_playing() {
    let (c, rx) = loaded(3);

    assert_eq!(c.cursor(), Some(0));
    assert_eq!(c.len(), 3);
    assert_eq!(c.state(), SessionState::Loaded);
    assert_eq!(c.engine().media().loads, vec!["/music/t0.mp3".to_string()]);
    assert!(c.engine().is_paused());

    assert_eq!(
        drain(&rx),
        vec![
            SessionEvent::Loaded { len: 3 },
            SessionEvent::TrackChanged {
                index: 0,
                id: TrackId(0)
            },
            SessionEvent::PlaybackChanged { playing: false },
        ]
    );
}

#[test]
fn empty_reload_keeps_current_session() {
    let (mut c, _rx) = loaded(3);
    c.play_index(2).unwrap();

    assert!(c.load_session(Vec::new()).is_err());
    assert_eq!(c.cursor(), Some(2));
    assert_eq!(c.len(), 3);
}

#[test]
fn reload_resets_cursor() {
    let (mut c, _rx) = loaded(3);
    c.play_index(2).unwrap();

    c.load_session(tracks(5)).unwrap();
    assert_eq!(c.cursor(), Some(0));
    assert_eq!(c.len(), 5);
    assert_eq!(c.state(), SessionState::Loaded);
}

#[test]
fn play_index_jumps_and_plays() {
    let (mut c, rx) = loaded(3);
    drain(&rx);

    c.play_index(1).unwrap();
    assert_eq!(c.cursor(), Some(1));
    assert_eq!(c.state(), SessionState::Playing);
    assert_eq!(c.engine().media().src(), Some("/music/t1.mp3"));
    assert_eq!(c.current_track().unwrap().id, TrackId(1));
    assert_eq!(
        drain(&rx),
        vec![
            SessionEvent::TrackChanged {
                index: 1,
                id: TrackId(1)
            },
            SessionEvent::PlaybackChanged { playing: true },
        ]
    );
}

#[test]
fn play_index_out_of_range_is_rejected() {
    let (mut c, _rx) = loaded(3);
    let err = c.play_index(3).unwrap_err();
    assert!(matches!(err, SessionError::InvalidIndex { index: 3, len: 3 }));
    assert_eq!(c.cursor(), Some(0));
    assert_eq!(c.engine().media().loads.len(), 1);
}

#[test]
fn idle_session_fails_fast() {
    let (mut c, _rx) = controller();
    let mut lib = Library::new(Vec::new(), LikedStore::in_memory());

    assert!(matches!(c.play_index(0), Err(SessionError::InvalidState)));
    assert!(matches!(c.next(), Err(SessionError::InvalidState)));
    assert!(matches!(c.previous(), Err(SessionError::InvalidState)));
    assert!(matches!(
        c.play_pause_toggle(),
        Err(SessionError::InvalidState)
    ));
    assert!(matches!(c.seek(10.0), Err(SessionError::InvalidState)));
    assert!(matches!(c.scrub(5), Err(SessionError::InvalidState)));
    assert!(matches!(
        c.toggle_liked(&mut lib),
        Err(SessionError::InvalidState)
    ));

    // Mode flags do not need a session.
    assert!(c.toggle_shuffle());
    assert!(c.toggle_mute());
}

#[test]
fn sequential_navigation_wraps_both_ways() {
    let (mut c, _rx) = loaded(3);

    assert_eq!(c.previous().unwrap(), 2);
    assert_eq!(c.next().unwrap(), 0);
    assert_eq!(c.next().unwrap(), 1);
    assert_eq!(c.next().unwrap(), 2);
    assert_eq!(c.next().unwrap(), 0);
    assert_eq!(c.state(), SessionState::Playing);
}

#[test]
fn single_track_wraps_onto_itself() {
    let (mut c, _rx) = loaded(1);
    assert_eq!(c.next().unwrap(), 0);
    assert_eq!(c.previous().unwrap(), 0);
}

#[test]
fn navigation_always_plays_the_new_track() {
    let (mut c, _rx) = loaded(3);
    c.play_index(0).unwrap();
    c.play_pause_toggle().unwrap();
    assert_eq!(c.state(), SessionState::Paused);

    c.next().unwrap();
    assert_eq!(c.state(), SessionState::Playing);
    assert_eq!(c.engine().media().src(), Some("/music/t1.mp3"));
}

#[test]
fn play_pause_toggle_follows_primitive_state() {
    let (mut c, _rx) = loaded(2);

    assert!(c.play_pause_toggle().unwrap());
    assert_eq!(c.state(), SessionState::Playing);
    assert_eq!(c.cursor(), Some(0));

    c.engine_mut().media_mut().paused = true;
    assert_eq!(c.state(), SessionState::Paused);
    assert!(c.play_pause_toggle().unwrap());
}

#[test]
fn shuffle_draws_cover_every_index() {
    let (mut c, _rx) = loaded(5);
    assert!(c.toggle_shuffle());

    let mut seen = HashSet::new();
    for i in 0..200 {
        let idx = if i % 2 == 0 {
            c.next().unwrap()
        } else {
            c.previous().unwrap()
        };
        assert!(idx < 5);
        assert_eq!(c.cursor(), Some(idx));
        seen.insert(idx);
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn toggle_shuffle_reports_new_value() {
    let (mut c, rx) = loaded(2);
    drain(&rx);

    assert!(c.toggle_shuffle());
    assert!(c.shuffle());
    assert!(!c.toggle_shuffle());
    assert_eq!(
        drain(&rx),
        vec![
            SessionEvent::ShuffleChanged(true),
            SessionEvent::ShuffleChanged(false),
        ]
    );
}

#[test]
fn double_mute_toggle_restores_state_at_full_volume() {
    let (mut c, _rx) = loaded(2);
    c.engine_mut().media_mut().volume = 0.3;
    let before = c.muted();

    c.toggle_mute();
    c.toggle_mute();
    assert_eq!(c.muted(), before);
    assert_eq!(c.engine().media().volume, 1.0);

    c.set_muted(true);
    assert!(c.muted());
}

#[test]
fn seek_before_duration_is_known_is_unavailable() {
    let (mut c, _rx) = loaded(2);
    c.engine_mut().media_mut().duration = None;
    assert!(matches!(c.seek(50.0), Err(SessionError::SeekUnavailable)));

    c.engine_mut().media_mut().duration = Some(Duration::from_secs(60));
    c.seek(50.0).unwrap();
    assert_eq!(c.position(), Duration::from_secs(30));
}

#[test]
fn scrub_is_clamped() {
    let (mut c, _rx) = loaded(2);
    c.scrub(-5).unwrap();
    assert_eq!(c.position(), Duration::ZERO);
    c.scrub(500).unwrap();
    assert_eq!(Some(c.position()), c.duration());
}

#[test]
fn toggle_liked_goes_through_data_source() {
    let songs = tracks(2);
    let playlist = Playlist {
        id: "p".into(),
        name: "P".into(),
        description: String::new(),
        thumbnail: None,
        tracks: songs,
    };
    let mut lib = Library::new(vec![playlist], LikedStore::in_memory());
    let (mut c, rx) = controller();
    c.load_session(lib.songs_for_playlist("p").unwrap()).unwrap();
    c.play_index(1).unwrap();
    drain(&rx);

    assert!(c.toggle_liked(&mut lib).unwrap());
    assert!(c.current_track().unwrap().liked());
    assert!(lib.all_playlists()[0].tracks[1].liked());
    assert_eq!(
        drain(&rx),
        vec![SessionEvent::LikedChanged {
            id: TrackId(1),
            liked: true
        }]
    );

    assert!(!c.toggle_liked(&mut lib).unwrap());
}

#[test]
fn failed_track_load_surfaces_media_error() {
    let (tx, _rx) = mpsc::channel();
    let mut media = FakeMedia::default();
    media.broken_src = Some("/music/t1.mp3".into());
    let mut c = SessionController::with_rng(
        PlaybackEngine::new(media),
        StdRng::seed_from_u64(1),
        tx,
    );
    c.load_session(tracks(3)).unwrap();

    assert!(matches!(c.next(), Err(SessionError::Media(_))));
    // The cursor moved; the next step skips past the broken track.
    assert_eq!(c.cursor(), Some(1));
    assert_eq!(c.next().unwrap(), 2);
}

#[test]
fn wrap_index_is_euclidean() {
    assert_eq!(wrap_index(-1, 4), Some(3));
    assert_eq!(wrap_index(-5, 4), Some(3));
    assert_eq!(wrap_index(4, 4), Some(0));
    assert_eq!(wrap_index(2, 4), Some(2));
    assert_eq!(wrap_index(0, 0), None);
}

#[test]
fn sequence_get_validates_index() {
    let seq = TrackSequence::load(tracks(2)).unwrap();
    assert_eq!(seq.get(1).unwrap().id, TrackId(1));
    assert!(matches!(
        seq.get(2),
        Err(SessionError::InvalidIndex { index: 2, len: 2 })
    ));
    assert_eq!(seq.len(), 2);
}

fn len_and_index() -> impl Strategy<Value = (usize, usize)> {
    (1usize..40).prop_flat_map(|n| (Just(n), 0..n))
}

proptest! {
    #[test]
    fn next_then_previous_returns_to_start((n, start) in len_and_index()) {
        let (mut c, _rx) = loaded(n);
        c.play_index(start).unwrap();

        c.next().unwrap();
        c.previous().unwrap();
        prop_assert_eq!(c.cursor(), Some(start));

        c.previous().unwrap();
        c.next().unwrap();
        prop_assert_eq!(c.cursor(), Some(start));
    }

    #[test]
    fn shuffle_step_stays_in_range((n, start) in len_and_index(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for direction in [Direction::Next, Direction::Previous] {
            let idx = step(start, n, true, direction, &mut rng).unwrap();
            prop_assert!(idx < n);
        }
    }
}
