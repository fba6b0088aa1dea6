use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lcdplay/config.toml` or `~/.config/lcdplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LCDPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub display: DisplaySettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Frames decoded and written per buffer. This is the granularity at
    /// which pause/next/quit are noticed.
    pub buffer_frames: usize,
    /// How many buffers may sit in the output queue before a write blocks.
    pub queued_buffers: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            buffer_frames: 2048,
            queued_buffers: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Read keys from the terminal (and draw the status screen).
    pub keyboard: bool,
    /// Poll the physical buttons.
    pub buttons: bool,
    /// How often the control loop samples its inputs (milliseconds).
    /// Must be shorter than `debounce_ms`.
    pub poll_interval_ms: u64,
    /// How long a button reading must hold steady to count (milliseconds).
    pub debounce_ms: u64,
    /// Root of the sysfs GPIO tree.
    pub gpio_root: PathBuf,
    pub pins: ButtonPins,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            keyboard: true,
            buttons: false,
            poll_interval_ms: 10,
            debounce_ms: 50,
            gpio_root: PathBuf::from("/sys/class/gpio"),
            pins: ButtonPins::default(),
        }
    }
}

/// GPIO line numbers (BCM) for each button. Buttons are wired active-low.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonPins {
    pub play: u32,
    pub prev: u32,
    pub next: u32,
    pub info: u32,
    pub quit: u32,
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self {
            play: 17,
            prev: 18,
            next: 27,
            info: 25,
            quit: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Character cells per row.
    pub columns: usize,
    /// Delay between scroll steps (milliseconds).
    pub scroll_interval_ms: u64,
    /// Hold on the left-aligned frame once per cycle (milliseconds).
    pub scroll_pause_ms: u64,
    /// Blank cells before and after scrolling text. Defaults to the row width.
    pub scroll_padding: Option<usize>,
    /// Glyph drawn in the first cell of the title row; the title uses the rest.
    pub title_glyph: Option<char>,
    /// What the second row shows when a track starts.
    pub secondary_row: SecondaryRowSetting,
    pub farewell_text: String,
    /// How long the farewell stays up before the display is cleared (milliseconds).
    pub farewell_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            columns: 16,
            scroll_interval_ms: 200,
            scroll_pause_ms: 1500,
            scroll_padding: None,
            title_glyph: Some('♪'),
            secondary_row: SecondaryRowSetting::Artist,
            farewell_text: "Good Bye!".to_string(),
            farewell_ms: 1000,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecondaryRowSetting {
    Artist,
    Album,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Where log files go. Defaults to `$XDG_STATE_HOME/lcdplay`.
    pub directory: Option<PathBuf>,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "lcdplay=info,warn".to_string(),
        }
    }
}
