//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::rc::Rc;
use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Screen};
use crate::binder::{ShortcutTable, TimelineView};
use crate::config::UiSettings;
use crate::library::{Track, display_from_fields};
use crate::session::SessionState;

/// Index of the timeline gauge in [`layout`].
const TIMELINE: usize = 2;

/// Keys handled by the app layer, in footer order.
const APP_KEYS: [(&str, &str); 8] = [
    ("j/k", "up/down"),
    ("enter", "open/play"),
    ("esc", "back"),
    ("s", "shuffle"),
    ("f", "like"),
    ("0-9", "seek 0-90%"),
    ("K", "metadata"),
    ("q", "quit"),
];

/// Render the controls help text: app keys first, then the shortcut table.
fn controls_text(shortcuts: &ShortcutTable) -> String {
    APP_KEYS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .chain(shortcuts.help().iter().map(|(k, v)| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn heart(track: &Track) -> &'static str {
    if track.liked() { "♥" } else { "♡" }
}

fn status_text(app: &App, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.now_playing_track() {
        Some(track) => parts.push(format!(
            "Song: {}",
            display_from_fields(track, &ui.track_fields, &ui.track_separator)
        )),
        None if app.session_playlist.is_some() => parts.push("Song: (other playlist)".to_string()),
        None => {}
    }

    let state = match app.playback {
        SessionState::Idle => "Idle",
        SessionState::Loaded => "Ready",
        SessionState::Playing => "Playing",
        SessionState::Paused => "Paused",
    };
    parts.push(state.to_string());
    parts.push(format!("Shuffle: {}", if app.shuffle { "ON" } else { "OFF" }));
    parts.push(format!("Mute: {}", if app.muted { "ON" } else { "OFF" }));

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }
    if let Some(msg) = &app.message {
        parts.push(format!("! {msg}"));
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds.
fn format_duration_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }
    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Window of `height` rows around `selected`, as `(start, end, selected_in_window)`.
fn visible_window(total: usize, selected: usize, height: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn playlist_items(app: &App, start: usize, end: usize) -> Vec<ListItem<'_>> {
    app.playlists[start..end]
        .iter()
        .enumerate()
        .map(|(offset, p)| {
            let i = start + offset;
            let marker = if app.session_playlist == Some(i) { "▶ " } else { "  " };
            ListItem::new(format!("{marker}{} · {}", p.name, p.description))
        })
        .collect()
}

fn song_items<'a>(app: &'a App, ui: &UiSettings, start: usize, end: usize) -> Vec<ListItem<'a>> {
    let playing = app.now_playing_track().and(app.now_playing);
    app.songs[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let i = start + offset;
            let marker = if playing == Some(i) { "▶" } else { " " };
            let text = display_from_fields(track, &ui.track_fields, &ui.track_separator);
            ListItem::new(format!("{marker} {} {text}", heart(track)))
        })
        .collect()
}

/// Split the screen into header, status, timeline, list and footer.
pub fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area)
}

/// Map a click at (`column`, `row`) to a 0..=100 position on the timeline
/// gauge of a screen of size `area`. `None` when the click misses the bar.
pub fn timeline_percent(area: Rect, column: u16, row: u16) -> Option<f64> {
    let gauge = layout(area)[TIMELINE];
    // Bar inside the border.
    let bar = Rect {
        x: gauge.x.saturating_add(1),
        y: gauge.y.saturating_add(1),
        width: gauge.width.saturating_sub(2),
        height: gauge.height.saturating_sub(2),
    };
    if bar.width == 0 || row < gauge.y || row >= gauge.y + gauge.height {
        return None;
    }
    if column < bar.x || column >= bar.x + bar.width {
        return None;
    }
    if bar.width == 1 {
        return Some(0.0);
    }
    let offset = f64::from(column - bar.x);
    Some(100.0 * offset / f64::from(bar.width - 1))
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    timeline: &TimelineView,
    shortcuts: &ShortcutTable,
    ui: &UiSettings,
) {
    let chunks = layout(frame.area());

    // Header
    let title = match (app.screen, app.open_playlist.and_then(|i| app.playlists.get(i))) {
        (Screen::Songs, Some(p)) => format!(" {} ", p.name),
        _ => ui.header_text.clone(),
    };
    let header = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" encore ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app, ui))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Timeline
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" timeline "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio((timeline.percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", timeline.elapsed, timeline.duration));
    frame.render_widget(gauge, chunks[TIMELINE]);

    // Main list: only build items for the visible window.
    {
        let list_area = chunks[3];
        let height = list_area.height.saturating_sub(2) as usize;
        let (total, selected, title) = match app.screen {
            Screen::Playlists => (app.playlists.len(), app.playlist_selected, " playlists "),
            Screen::Songs => (app.songs.len(), app.selected, " songs "),
        };
        let (start, end, in_window) = visible_window(total, selected, height);
        let items = match app.screen {
            Screen::Playlists => playlist_items(app, start, end),
            Screen::Songs => song_items(app, ui, start, end),
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(in_window));
        }
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    // Metadata popup over the list
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let meta = match (app.screen, app.selected_playlist(), app.selected_song()) {
            (Screen::Playlists, Some(p), _) => format!(
                "Playlist: {}\nAbout: {}\nCover: {}",
                p.name,
                p.description,
                p.thumbnail
                    .as_ref()
                    .map_or_else(|| "-".to_string(), |t| t.display().to_string())
            ),
            (Screen::Songs, _, Some(track)) => format!(
                "Name: {}\nArtist: {}\nGenre: {}\nDuration: {}\nLiked: {}\nPath: {}",
                track.name,
                track.artist.as_deref().unwrap_or("-"),
                track.genre.as_deref().unwrap_or("-"),
                format_duration_ceil(track.duration),
                if track.liked() { "yes" } else { "no" },
                track.src
            ),
            _ => "Nothing selected".to_string(),
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text(shortcuts))
        .dim()
        .block(Block::default().borders(Borders::ALL).title(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
