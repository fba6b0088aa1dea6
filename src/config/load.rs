use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `LCDPLAY__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LCDPLAY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.audio.buffer_frames == 0 {
            return Err("audio.buffer_frames must be >= 1".to_string());
        }
        if self.audio.queued_buffers == 0 {
            return Err("audio.queued_buffers must be >= 1".to_string());
        }
        if self.display.columns < 2 {
            return Err("display.columns must be >= 2".to_string());
        }
        if self.display.scroll_interval_ms == 0 {
            return Err("display.scroll_interval_ms must be >= 1".to_string());
        }
        if self.controls.debounce_ms == 0 {
            return Err("controls.debounce_ms must be >= 1".to_string());
        }
        if self.controls.poll_interval_ms >= self.controls.debounce_ms {
            return Err(format!(
                "controls.poll_interval_ms ({}) must be shorter than controls.debounce_ms ({})",
                self.controls.poll_interval_ms, self.controls.debounce_ms
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `LCDPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LCDPLAY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/lcdplay/config.toml`
/// or `~/.config/lcdplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("lcdplay").join("config.toml"))
}

/// Default log directory: `$XDG_STATE_HOME/lcdplay` or `~/.local/state/lcdplay`.
pub fn default_log_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("lcdplay"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
