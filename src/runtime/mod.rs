use std::env;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::{PlaybackEngine, RodioMedia};
use crate::binder::{EventBinder, ShortcutTable};
use crate::config;
use crate::library::{DataSource, Library};
use crate::mpris::ControlCmd;
use crate::session::{SessionController, SessionEvent};

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub use event_loop::Player;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.logging);

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });
    info!(dir = %dir, "starting encore");

    let liked_path = settings
        .library
        .liked_path
        .clone()
        .or_else(config::default_liked_path);
    let library = Library::load(Path::new(&dir), &settings.library, liked_path.as_deref())?;
    let mut app = App::new(library.all_playlists());
    app.set_current_dir(dir.clone());

    let media = RodioMedia::open_default(Duration::from_millis(settings.audio.position_interval_ms))?;
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>();
    let mut session = SessionController::new(PlaybackEngine::new(media), event_tx);
    startup::apply_playback_defaults(&mut session, &settings);

    let binder = EventBinder::new(ShortcutTable::from_settings(&settings.controls));
    let mut player = Player::new(app, library, session, binder, event_rx);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &mpris, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
