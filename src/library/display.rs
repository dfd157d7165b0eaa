use std::path::Path;

use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (name, artist, genre, filename, path) in the
/// configured order and falls back to `name` when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Name => {
                if !track.name.trim().is_empty() {
                    parts.push(track.name.trim().to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = non_blank(track.artist.as_deref()) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Genre => {
                if let Some(g) = non_blank(track.genre.as_deref()) {
                    parts.push(g.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = Path::new(&track.src).file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.src.clone());
            }
        }
    }

    if parts.is_empty() {
        track.name.clone()
    } else {
        parts.join(sep)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
