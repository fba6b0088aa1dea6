//! Per-button debouncing.
//!
//! Each call advances the state machine by exactly one sample. A new stable
//! level is committed only after the raw reading has held still for longer
//! than the settle threshold; any change in the raw reading restarts that
//! timer.

use std::time::{Duration, Instant};

/// Logic level of a digital input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Buttons are wired active-low: a pressed button reads 0.
    pub fn is_pressed(self) -> bool {
        self == Self::Low
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    raw: Level,
    stable: Level,
    last_change: Instant,
    settle: Duration,
}

impl Debouncer {
    /// Starts released (high) on both the raw and the stable side.
    pub fn new(settle: Duration, now: Instant) -> Self {
        Self {
            raw: Level::High,
            stable: Level::High,
            last_change: now,
            settle,
        }
    }

    /// Feed one raw sample taken at `now`.
    ///
    /// Returns the new stable level when this sample commits a change.
    pub fn update(&mut self, raw: Level, now: Instant) -> Option<Level> {
        if raw != self.raw {
            self.last_change = now;
        }
        self.raw = raw;

        if now.saturating_duration_since(self.last_change) > self.settle && raw != self.stable {
            self.stable = raw;
            return Some(raw);
        }
        None
    }

    pub fn stable(&self) -> Level {
        self.stable
    }
}
