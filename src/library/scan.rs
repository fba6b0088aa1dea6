use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlayerError;
use crate::playlist::{Playlist, TrackIndex};

use super::model::Track;

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

/// Collect audio files under `dir`, sorted by path (case-insensitive).
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_audio_file(path, settings))
        .map(Track::from_path)
        .collect();

    tracks.sort_by_cached_key(|t| t.path.to_string_lossy().to_lowercase());
    tracks
}

/// Number tracks from 1 in the order given.
fn numbered(tracks: impl IntoIterator<Item = Track>) -> Playlist {
    let mut playlist = Playlist::new();
    for (i, track) in tracks.into_iter().enumerate() {
        playlist.add_or_replace(i as TrackIndex + 1, track);
    }
    playlist
}

/// Playlist of every audio file found under `dir`.
pub fn playlist_from_dir(dir: &Path, settings: &LibrarySettings) -> Result<Playlist, PlayerError> {
    let playlist = numbered(scan(dir, settings));
    if playlist.is_empty() {
        return Err(PlayerError::NoTracks(dir.to_path_buf()));
    }
    Ok(playlist)
}

/// Playlist of explicitly named files, in command-line order. Missing
/// files keep their number; playback skips them when they fail to open.
pub fn playlist_from_files(files: &[PathBuf]) -> Result<Playlist, PlayerError> {
    for (i, missing) in files.iter().enumerate().filter(|(_, f)| !f.is_file()) {
        warn!(index = i + 1, path = %missing.display(), "song file not found");
    }
    let playlist = numbered(files.iter().cloned().map(Track::from_path));
    if playlist.is_empty() {
        return Err(PlayerError::NoTracks(PathBuf::new()));
    }
    Ok(playlist)
}
