//! Persistence of liked songs.
//!
//! Likes are keyed by the track's `src` so they survive rescans that hand
//! out different ids.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LibraryError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LikedFile {
    #[serde(default)]
    liked: BTreeSet<String>,
}

/// Set of liked sources, optionally backed by a TOML file.
#[derive(Debug, Default)]
pub struct LikedStore {
    path: Option<PathBuf>,
    liked: BTreeSet<String>,
}

impl LikedStore {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`; a missing file means nothing is liked yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let liked = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str::<LikedFile>(&text)?.liked,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = liked.len(), "liked store opened");
        Ok(Self {
            path: Some(path),
            liked,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, src: &str) -> bool {
        self.liked.contains(src)
    }

    /// Record `liked` for `src` and write the file through.
    pub fn set(&mut self, src: &str, liked: bool) -> Result<(), LibraryError> {
        let changed = if liked {
            self.liked.insert(src.to_string())
        } else {
            self.liked.remove(src)
        };
        if changed {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), LibraryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = LikedFile {
            liked: self.liked.clone(),
        };
        fs::write(path, toml::to_string(&file)?)?;
        Ok(())
    }
}
