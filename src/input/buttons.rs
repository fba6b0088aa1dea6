//! Physical transport buttons.
//!
//! One debounced `Button` per logical button, kept in an array indexed by
//! `ButtonId` and sampled in order on every poll.

use std::io;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::ButtonPins;
use crate::error::PlayerError;

use super::debounce::{Debouncer, Level};
use super::event::{ControlCmd, EventSource};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonId {
    Play,
    Prev,
    Next,
    Info,
    Quit,
}

impl ButtonId {
    pub const ALL: [ButtonId; 5] = [
        ButtonId::Play,
        ButtonId::Prev,
        ButtonId::Next,
        ButtonId::Info,
        ButtonId::Quit,
    ];

    pub fn command(self) -> ControlCmd {
        match self {
            ButtonId::Play => ControlCmd::PlayPause,
            ButtonId::Prev => ControlCmd::Prev,
            ButtonId::Next => ControlCmd::Next,
            ButtonId::Info => ControlCmd::Info,
            ButtonId::Quit => ControlCmd::Quit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ButtonId::Play => "Play",
            ButtonId::Prev => "Prev",
            ButtonId::Next => "Next",
            ButtonId::Info => "Info",
            ButtonId::Quit => "Quit",
        }
    }

    pub fn pin(self, pins: &ButtonPins) -> u32 {
        match self {
            ButtonId::Play => pins.play,
            ButtonId::Prev => pins.prev,
            ButtonId::Next => pins.next,
            ButtonId::Info => pins.info,
            ButtonId::Quit => pins.quit,
        }
    }
}

/// Source of raw digital readings, one pin at a time.
pub trait RawInput {
    fn read(&mut self, pin: u32) -> io::Result<Level>;
}

#[derive(Debug)]
struct Button {
    id: ButtonId,
    pin: u32,
    debouncer: Debouncer,
    read_failed: bool,
}

pub struct ButtonPanel<R> {
    input: R,
    buttons: [Button; 5],
}

impl<R: RawInput> ButtonPanel<R> {
    pub fn new(input: R, pins: &ButtonPins, settle: Duration, now: Instant) -> Self {
        let buttons = ButtonId::ALL.map(|id| Button {
            id,
            pin: id.pin(pins),
            debouncer: Debouncer::new(settle, now),
            read_failed: false,
        });
        Self { input, buttons }
    }

    /// Current debounced level of one button.
    #[cfg(test)]
    pub fn stable(&self, id: ButtonId) -> Level {
        self.buttons[id as usize].debouncer.stable()
    }
}

impl<R: RawInput> EventSource for ButtonPanel<R> {
    fn poll(&mut self, now: Instant) -> Result<Vec<ControlCmd>, PlayerError> {
        let mut pressed = Vec::new();
        for button in &mut self.buttons {
            let raw = match self.input.read(button.pin) {
                Ok(level) => {
                    button.read_failed = false;
                    level
                }
                Err(err) => {
                    if !button.read_failed {
                        warn!(button = button.id.label(), pin = button.pin, error = %err, "button read failed");
                        button.read_failed = true;
                    }
                    continue;
                }
            };
            // Only the transition into the pressed level counts; holding does not repeat.
            if button.debouncer.update(raw, now).is_some_and(Level::is_pressed) {
                pressed.push(button.id.command());
            }
        }
        Ok(pressed)
    }
}
