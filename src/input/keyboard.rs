use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PlayerError;

use super::event::{ControlCmd, EventSource};

/// Terminal keys, read without blocking. Needs raw mode to be enabled.
#[derive(Debug, Default)]
pub struct Keyboard;

pub(crate) fn map_key(key: KeyEvent) -> Option<ControlCmd> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows SIGINT, so treat Ctrl-C as quit.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ControlCmd::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') => Some(ControlCmd::PlayPause),
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => Some(ControlCmd::Next),
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => Some(ControlCmd::Prev),
        KeyCode::Char('i') => Some(ControlCmd::Info),
        KeyCode::Char('q') | KeyCode::Esc => Some(ControlCmd::Quit),
        _ => None,
    }
}

impl EventSource for Keyboard {
    fn poll(&mut self, _now: Instant) -> Result<Vec<ControlCmd>, PlayerError> {
        let mut cmds = Vec::new();
        while event::poll(Duration::ZERO).map_err(PlayerError::Terminal)? {
            if let Event::Key(key) = event::read().map_err(PlayerError::Terminal)? {
                cmds.extend(map_key(key));
            }
        }
        Ok(cmds)
    }
}
