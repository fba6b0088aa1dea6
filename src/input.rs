//! User input: debounced physical buttons and the terminal keyboard.
//!
//! Both are polled by the control loop through `EventSource` and yield
//! `ControlCmd`s; neither blocks.

mod buttons;
mod debounce;
mod event;
mod gpio;
mod keyboard;

pub use buttons::{ButtonId, ButtonPanel, RawInput};
pub use debounce::{Debouncer, Level};
pub use event::{ControlCmd, EventSource};
pub use gpio::SysfsGpio;
pub use keyboard::Keyboard;

#[cfg(test)]
mod tests;
