use std::path::{Path, PathBuf};

/// One playable file: its path plus the name shown before tags are read.
///
/// Immutable once created; the playlist entry holding it owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub name: String,
}

impl Track {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("UNKNOWN")
            .to_string();
        Self { path, name }
    }

    /// File name including extension, e.g. `song.mp3`.
    pub fn base_filename(&self) -> &str {
        base_filename(&self.path)
    }
}

pub(crate) fn base_filename(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}
