//! Turning settings and arguments into the pieces a `Session` runs on.

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::{self, SecondaryRowSetting};
use crate::display::{PanelLayout, ScrollPacing};
use crate::error::PlayerError;
use crate::input::{ButtonId, ButtonPanel, EventSource, Keyboard, SysfsGpio};
use crate::library::{playlist_from_dir, playlist_from_files};
use crate::playlist::Playlist;
use crate::transport::SecondaryRow;

use super::args::PlaylistSource;
use super::session::SessionOptions;

pub fn build_playlist(
    source: &PlaylistSource,
    library: &config::LibrarySettings,
) -> Result<Playlist, PlayerError> {
    let playlist = match source {
        PlaylistSource::Files(files) => playlist_from_files(files)?,
        PlaylistSource::Dir(dir) => playlist_from_dir(dir, library)?,
    };
    info!(
        tracks = playlist.len(),
        first = ?playlist.first_index(),
        last = ?playlist.last_index(),
        source = %source.label(),
        "playlist ready"
    );
    Ok(playlist)
}

pub fn panel_layout(display: &config::DisplaySettings) -> PanelLayout {
    PanelLayout {
        columns: display.columns,
        glyph: display.title_glyph,
        padding: display.scroll_padding,
        pacing: ScrollPacing {
            interval: Duration::from_millis(display.scroll_interval_ms),
            hold: Duration::from_millis(display.scroll_pause_ms),
        },
    }
}

pub fn secondary_row(setting: SecondaryRowSetting) -> SecondaryRow {
    match setting {
        SecondaryRowSetting::Artist => SecondaryRow::Artist,
        SecondaryRowSetting::Album => SecondaryRow::Album,
    }
}

pub fn session_options(settings: &config::Settings, source: &PlaylistSource) -> SessionOptions {
    SessionOptions {
        poll_interval: Duration::from_millis(settings.controls.poll_interval_ms),
        secondary: secondary_row(settings.display.secondary_row),
        farewell_text: settings.display.farewell_text.clone(),
        farewell_hold: Duration::from_millis(settings.display.farewell_ms),
        source_label: source.label(),
    }
}

/// The input sources enabled in `controls`. The keyboard needs the
/// terminal in raw mode before it is polled.
pub fn event_sources(
    controls: &config::ControlsSettings,
    now: Instant,
) -> Result<Vec<Box<dyn EventSource>>, PlayerError> {
    let mut sources: Vec<Box<dyn EventSource>> = Vec::new();
    if controls.keyboard {
        sources.push(Box::new(Keyboard));
    }
    if controls.buttons {
        let pins: Vec<u32> = ButtonId::ALL
            .iter()
            .map(|id| id.pin(&controls.pins))
            .collect();
        let gpio = SysfsGpio::open(&controls.gpio_root, &pins)?;
        info!(root = %controls.gpio_root.display(), ?pins, "buttons enabled");
        sources.push(Box::new(ButtonPanel::new(
            gpio,
            &controls.pins,
            Duration::from_millis(controls.debounce_ms),
            now,
        )));
    }
    Ok(sources)
}
