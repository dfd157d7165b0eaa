use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Playlist, Track, TrackId};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Tag fields read from a file, before the track gets its identity.
struct Scanned {
    name: String,
    artist: Option<String>,
    genre: Option<String>,
    src: String,
    duration: Option<Duration>,
}

/// lofty reports zero when a file carries no length.
fn known_length(d: Duration) -> Option<Duration> {
    Some(d).filter(|d| !d.is_zero())
}

fn read_file(path: &Path) -> Scanned {
    let mut name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut genre: Option<String> = None;
    let mut duration: Option<Duration> = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = known_length(tagged.properties().duration());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        name = v.trim().to_string();
                    }
                }
                artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                genre = tag
                    .genre()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    Scanned {
        name,
        artist,
        genre,
        src: path.to_string_lossy().into_owned(),
        duration,
    }
}

fn find_thumbnail(dir: &Path, settings: &LibrarySettings) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();

    settings.thumbnail_names.iter().find_map(|wanted| {
        files
            .iter()
            .find(|p| {
                p.file_name()
                    .and_then(|s| s.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(wanted))
            })
            .cloned()
    })
}

fn describe(tracks: &[Rc<Track>]) -> String {
    let count = match tracks.len() {
        1 => "1 song".to_string(),
        n => format!("{n} songs"),
    };

    let mut artists: Vec<&str> = Vec::new();
    for a in tracks.iter().filter_map(|t| t.artist.as_deref()) {
        if !artists.contains(&a) {
            artists.push(a);
        }
    }

    match artists.len() {
        0 => count,
        1..=3 => format!("{count} · {}", artists.join(", ")),
        _ => format!("{count} · {} and others", artists[..3].join(", ")),
    }
}

/// Scan `dir` and group audio files into one playlist per containing directory.
///
/// Playlists come back sorted by name, their tracks sorted by name
/// (case-insensitive); track ids are assigned in that order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Playlist> {
    let mut by_dir: BTreeMap<PathBuf, Vec<Scanned>> = BTreeMap::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            let parent = path.parent().unwrap_or(dir).to_path_buf();
            by_dir.entry(parent).or_default().push(read_file(path));
        }
    }

    let mut staged: Vec<(String, PathBuf, Vec<Scanned>)> = by_dir
        .into_iter()
        .map(|(path, mut files)| {
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            (playlist_name(&path, dir), path, files)
        })
        .collect();
    staged.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    let mut next_id: u32 = 0;
    let playlists: Vec<Playlist> = staged
        .into_iter()
        .map(|(name, path, files)| {
            let tracks: Vec<Rc<Track>> = files
                .into_iter()
                .map(|s| {
                    let mut track = Track::new(TrackId(next_id), s.name, s.src);
                    next_id += 1;
                    track.artist = s.artist;
                    track.genre = s.genre;
                    track.duration = s.duration;
                    Rc::new(track)
                })
                .collect();

            Playlist {
                id: playlist_id(&path, dir),
                description: describe(&tracks),
                thumbnail: find_thumbnail(&path, settings),
                name,
                tracks,
            }
        })
        .collect();

    debug!(
        playlists = playlists.len(),
        tracks = next_id,
        root = %dir.display(),
        "library scanned"
    );
    playlists
}

fn playlist_id(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

fn playlist_name(path: &Path, root: &Path) -> String {
    let base = if path == root {
        root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
    } else {
        path.to_path_buf()
    };
    base.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "Library".to_string())
}
