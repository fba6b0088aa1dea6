use std::time::Instant;

use crate::error::PlayerError;

/// What a user asked for, from a button or a key.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlCmd {
    PlayPause,
    Next,
    Prev,
    /// Swap the second display row between artist and album.
    Info,
    Quit,
}

/// Something the control loop polls for user input each tick.
pub trait EventSource {
    /// Sample the input once. Must not block.
    fn poll(&mut self, now: Instant) -> Result<Vec<ControlCmd>, PlayerError>;
}
