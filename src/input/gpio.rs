//! Raw button input through the Linux sysfs GPIO interface.
//!
//! Reads `<root>/gpio<N>/value`. Pull-ups are not configurable through
//! sysfs; the board (or device tree) must provide them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PlayerError;

use super::buttons::RawInput;
use super::debounce::Level;

#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// Make sure every pin is exported as an input.
    pub fn open(root: impl Into<PathBuf>, pins: &[u32]) -> Result<Self, PlayerError> {
        let root = root.into();
        for &pin in pins {
            export_input(&root, pin).map_err(|source| PlayerError::Gpio { pin, source })?;
        }
        Ok(Self { root })
    }

    fn value_path(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}")).join("value")
    }
}

fn export_input(root: &Path, pin: u32) -> io::Result<()> {
    let line = root.join(format!("gpio{pin}"));
    if !line.exists() {
        fs::write(root.join("export"), pin.to_string())?;
        info!(pin, "exported GPIO line");
    }
    let direction = line.join("direction");
    if direction.exists() {
        fs::write(direction, "in")?;
    }
    Ok(())
}

impl RawInput for SysfsGpio {
    fn read(&mut self, pin: u32) -> io::Result<Level> {
        let value = fs::read_to_string(self.value_path(pin))?;
        Ok(match value.trim() {
            "0" => Level::Low,
            _ => Level::High,
        })
    }
}
