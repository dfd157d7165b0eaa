use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::audio::PlaybackEngine;
use crate::audio::fake::FakeMedia;
use crate::config::ControlsSettings;
use crate::library::{LikedStore, Library, Playlist, Track, TrackId};
use crate::session::SessionState;

type TestController = SessionController<FakeMedia, StdRng>;

fn library(n: usize) -> Library {
    let tracks = (0..n)
        .map(|i| {
            Rc::new(Track::new(
                TrackId(i as u32),
                format!("t{i}"),
                format!("/music/t{i}.mp3"),
            ))
        })
        .collect();
    let playlist = Playlist {
        id: "p".into(),
        name: "P".into(),
        description: String::new(),
        thumbnail: None,
        tracks,
    };
    Library::new(vec![playlist], LikedStore::in_memory())
}

fn setup(n: usize) -> (EventBinder, TestController, Library) {
    let lib = library(n);
    let (tx, _rx) = mpsc::channel();
    let mut session = SessionController::with_rng(
        PlaybackEngine::new(FakeMedia::default()),
        StdRng::seed_from_u64(3),
        tx,
    );
    session
        .load_session(lib.songs_for_playlist("p").unwrap())
        .unwrap();
    let binder = EventBinder::new(ShortcutTable::from_settings(&ControlsSettings::default()));
    (binder, session, lib)
}

#[test]
fn format_mmss_pads_minutes_and_seconds() {
    assert_eq!(format_mmss(Duration::from_secs(50)), "00:50");
    assert_eq!(format_mmss(Duration::from_secs(150)), "02:30");
    assert_eq!(format_mmss(Duration::from_millis(59_999)), "00:59");
}

#[test]
fn timeline_keeps_duration_text_while_unknown() {
    let mut view = TimelineView::default();
    view.update(Duration::from_secs(30), Some(Duration::from_secs(120)));
    assert_eq!(view.elapsed, "00:30");
    assert_eq!(view.duration, "02:00");
    assert_eq!(view.percent, 25.0);

    view.update(Duration::from_secs(5), None);
    assert_eq!(view.elapsed, "00:05");
    assert_eq!(view.duration, "02:00");
    assert_eq!(view.percent, 0.0);
}

#[test]
fn parse_key_accepts_chars_and_names() {
    assert_eq!(parse_key("l"), Some(KeyCode::Char('l')));
    assert_eq!(parse_key("L"), Some(KeyCode::Char('L')));
    assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
    assert_eq!(parse_key("Right"), Some(KeyCode::Right));
    assert_eq!(parse_key("f5"), Some(KeyCode::F(5)));
    assert_eq!(parse_key("f13"), None);
    assert_eq!(parse_key("nope"), None);
}

#[test]
fn default_shortcut_table_has_six_entries() {
    let table = ShortcutTable::from_settings(&ControlsSettings::default());
    assert_eq!(table.help().len(), 6);
    assert_eq!(table.action_for(KeyCode::Char(' ')), Some(UiAction::PlayPause));
    assert_eq!(table.action_for(KeyCode::Char('l')), Some(UiAction::Next));
    assert_eq!(table.action_for(KeyCode::Char('h')), Some(UiAction::Previous));
    assert_eq!(table.action_for(KeyCode::Char('L')), Some(UiAction::Scrub(5)));
    assert_eq!(table.action_for(KeyCode::Char('H')), Some(UiAction::Scrub(-5)));
    assert_eq!(table.action_for(KeyCode::Char('m')), Some(UiAction::ToggleMute));
    assert_eq!(table.action_for(KeyCode::Char('x')), None);
}

#[test]
fn skip_keys_use_configured_seconds() {
    let controls = ControlsSettings {
        skip_seconds: 12,
        ..ControlsSettings::default()
    };
    let table = ShortcutTable::from_settings(&controls);
    assert_eq!(table.action_for(KeyCode::Char('L')), Some(UiAction::Scrub(12)));
    assert_eq!(table.action_for(KeyCode::Char('H')), Some(UiAction::Scrub(-12)));
}

#[test]
fn unknown_keys_are_ignored() {
    let (mut binder, mut session, mut lib) = setup(3);
    assert!(!binder
        .handle_key(KeyCode::Char('z'), &mut session, &mut lib)
        .unwrap());
    assert_eq!(session.state(), SessionState::Loaded);
}

#[test]
fn shortcuts_drive_the_session() {
    let (mut binder, mut session, mut lib) = setup(3);

    assert!(binder
        .handle_key(KeyCode::Char(' '), &mut session, &mut lib)
        .unwrap());
    assert_eq!(session.state(), SessionState::Playing);

    binder
        .handle_key(KeyCode::Char('L'), &mut session, &mut lib)
        .unwrap();
    assert_eq!(session.position(), Duration::from_secs(5));
    assert_eq!(binder.timeline().elapsed, "00:05");

    binder
        .handle_key(KeyCode::Char('h'), &mut session, &mut lib)
        .unwrap();
    assert_eq!(session.cursor(), Some(2));

    binder
        .handle_key(KeyCode::Char('m'), &mut session, &mut lib)
        .unwrap();
    assert!(session.muted());
}

#[test]
fn ui_actions_map_one_to_one() {
    let (mut binder, mut session, mut lib) = setup(3);

    binder
        .dispatch(UiAction::PlayIndex(1), &mut session, &mut lib)
        .unwrap();
    assert_eq!(session.cursor(), Some(1));

    binder
        .dispatch(UiAction::ToggleShuffle, &mut session, &mut lib)
        .unwrap();
    assert!(session.shuffle());

    binder
        .dispatch(UiAction::SeekPercent(50.0), &mut session, &mut lib)
        .unwrap();
    assert_eq!(session.position(), Duration::from_secs(100));
    assert_eq!(binder.timeline().percent, 50.0);

    binder
        .dispatch(UiAction::ToggleLiked, &mut session, &mut lib)
        .unwrap();
    assert!(session.current_track().unwrap().liked());
}

#[test]
fn seek_without_duration_is_silently_ignored() {
    let (mut binder, mut session, mut lib) = setup(2);
    session.engine_mut().media_mut().duration = None;

    binder
        .dispatch(UiAction::SeekPercent(40.0), &mut session, &mut lib)
        .unwrap();
    assert_eq!(session.position(), Duration::ZERO);
}

#[test]
fn end_of_track_advances_to_next() {
    let (mut binder, mut session, mut lib) = setup(3);
    binder
        .dispatch(UiAction::PlayIndex(1), &mut session, &mut lib)
        .unwrap();

    session
        .engine_mut()
        .media_mut()
        .events
        .push_back(MediaEvent::Ended);
    binder.pump_media(&mut session).unwrap();

    assert_eq!(session.cursor(), Some(2));
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.engine().media().src(), Some("/music/t2.mp3"));
}

#[test]
fn position_changes_refresh_timeline() {
    let (mut binder, mut session, _lib) = setup(1);
    {
        let media = session.engine_mut().media_mut();
        media.position = Duration::from_secs(150);
        media.events.push_back(MediaEvent::PositionChanged);
    }
    binder.pump_media(&mut session).unwrap();

    assert_eq!(binder.timeline().elapsed, "02:30");
    assert_eq!(binder.timeline().duration, "03:20");
    assert_eq!(binder.timeline().percent, 75.0);
}
