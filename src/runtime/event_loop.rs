use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, warn};

use crate::app::{App, Screen};
use crate::audio::MediaPrimitive;
use crate::binder::{EventBinder, UiAction};
use crate::config;
use crate::library::{DataSource, Library};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::session::{SessionController, SessionError, SessionEvent, SessionState};
use crate::ui;

/// Everything the event loop drives.
pub struct Player<M, R = ThreadRng> {
    pub app: App,
    pub library: Library,
    pub session: SessionController<M, R>,
    pub binder: EventBinder,
    events: mpsc::Receiver<SessionEvent>,
    /// Number of sessions loaded so far.
    loads: u64,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

impl<M: MediaPrimitive, R: Rng> Player<M, R> {
    pub fn new(
        app: App,
        library: Library,
        session: SessionController<M, R>,
        binder: EventBinder,
        events: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        let mut player = Self {
            app,
            library,
            session,
            binder,
            events,
            loads: 0,
            pending_gg: false,
        };
        player.drain_session_events();
        player
    }

    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Mirror queued session notifications into the view model.
    pub fn drain_session_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if matches!(event, SessionEvent::Loaded { .. }) {
                self.loads += 1;
            }
            self.app.apply(&event);
        }
        self.app.playback = self.session.state();
    }

    fn report(&mut self, err: SessionError) {
        warn!(error = %err, "action failed");
        self.app.set_message(err.to_string());
    }

    /// Feed media notifications (position ticks, end of track) to the binder.
    pub fn pump_media(&mut self) {
        if let Err(e) = self.binder.pump_media(&mut self.session) {
            self.report(e);
        }
        self.drain_session_events();
    }

    pub fn act(&mut self, action: UiAction) {
        self.app.clear_message();
        if let Err(e) = self
            .binder
            .dispatch(action, &mut self.session, &mut self.library)
        {
            self.report(e);
        }
        self.drain_session_events();
    }

    /// Show the selected playlist. The first playlist opened also becomes the
    /// session; later ones are only loaded once a song is played from them.
    fn open_selected_playlist(&mut self) {
        let index = self.app.playlist_selected;
        let Some(id) = self.app.selected_playlist().map(|p| p.id.clone()) else {
            return;
        };
        let Some(songs) = self.library.songs_for_playlist(&id) else {
            return;
        };
        debug!(playlist = %id, songs = songs.len(), "open playlist");
        self.app.open_playlist(index, songs);

        if self.session.state() == SessionState::Idle {
            self.load_open_playlist();
        }
    }

    fn load_open_playlist(&mut self) -> bool {
        self.app.clear_message();
        let result = self.session.load_session(self.app.songs.clone());
        self.drain_session_events();
        match result {
            Ok(()) => true,
            // The sequence is in place even when its first track cannot be buffered.
            Err(e @ SessionError::Media(_)) => {
                self.report(e);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn play_selected(&mut self) {
        if self.app.songs.is_empty() {
            return;
        }
        // Loading moves the selection to the first track.
        let index = self.app.selected;
        if !self.app.viewing_session() && !self.load_open_playlist() {
            return;
        }
        self.act(UiAction::PlayIndex(index));
    }

    /// Handle one key press. Returns `true` when shutdown is requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let gg = std::mem::take(&mut self.pending_gg);
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('j') | KeyCode::Down => self.app.next(),
            KeyCode::Char('k') | KeyCode::Up => self.app.prev(),
            KeyCode::Char('g') => {
                if gg {
                    self.app.select_first();
                } else {
                    self.pending_gg = true;
                }
            }
            KeyCode::Char('G') => self.app.select_last(),
            KeyCode::Enter => match self.app.screen {
                Screen::Playlists => self.open_selected_playlist(),
                Screen::Songs => self.play_selected(),
            },
            KeyCode::Esc | KeyCode::Backspace => self.app.back_to_playlists(),
            KeyCode::Char('s') => self.act(UiAction::ToggleShuffle),
            KeyCode::Char('f') => self.act(UiAction::ToggleLiked),
            KeyCode::Char('K') => self.app.toggle_metadata_window(),
            KeyCode::Char(c @ '0'..='9') => {
                let tenths = f64::from(c as u8 - b'0');
                self.act(UiAction::SeekPercent(tenths * 10.0));
            }
            code => {
                self.app.clear_message();
                if let Err(e) = self
                    .binder
                    .handle_key(code, &mut self.session, &mut self.library)
                {
                    self.report(e);
                }
                self.drain_session_events();
            }
        }
        false
    }

    /// Click or drag on the timeline seeks. `screen` is the last drawn area.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect) {
        if !matches!(
            mouse.kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        ) {
            return;
        }
        if let Some(pct) = ui::timeline_percent(screen, mouse.column, mouse.row) {
            self.act(UiAction::SeekPercent(pct));
        }
    }

    /// Map a media-key command onto the session. Returns `true` on `Quit`.
    pub fn handle_control_cmd(&mut self, cmd: ControlCmd) -> bool {
        let state = self.session.state();
        match cmd {
            ControlCmd::Quit => return true,
            ControlCmd::Play if matches!(state, SessionState::Loaded | SessionState::Paused) => {
                self.act(UiAction::PlayPause)
            }
            ControlCmd::Pause | ControlCmd::Stop if state == SessionState::Playing => {
                self.act(UiAction::PlayPause)
            }
            ControlCmd::PlayPause if state != SessionState::Idle => self.act(UiAction::PlayPause),
            ControlCmd::Next if state != SessionState::Idle => self.act(UiAction::Next),
            ControlCmd::Prev if state != SessionState::Idle => self.act(UiAction::Previous),
            other => debug!(?other, ?state, "media key ignored"),
        }
        false
    }
}

/// Main terminal event loop: handles input, UI drawing, media notifications
/// and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<M: MediaPrimitive, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<M, R>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut published = MprisSnapshot::default();
    let mut screen = Rect::default();

    loop {
        player.pump_media();

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        update_mpris(mpris, &player.session, player.loads(), &mut published);

        terminal.draw(|f| {
            screen = f.area();
            ui::draw(
                f,
                &player.app,
                player.binder.timeline(),
                player.binder.shortcuts(),
                &settings.ui,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if player.handle_control_cmd(cmd) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if player.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => player.handle_mouse(mouse, screen),
                _ => {}
            }
        }
    }

    Ok(())
}
