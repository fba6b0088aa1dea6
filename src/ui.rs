//! Status screen for the terminal.
//!
//! Rendering is split from the terminal itself: `draw` paints one frame
//! from a `StatusView`, and a `Screen` decides where (or whether) frames go.

use std::io::{self, Stdout};
use std::sync::LazyLock;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::error::PlayerError;
use crate::transport::{TrackMetadata, TransportCmd};

static CONTROLS: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    vec![
        ("space", "play/pause"),
        ("n/l/→", "next song"),
        ("p/h/←", "previous song"),
        ("i", "artist/album"),
        ("q", "quit"),
    ]
});

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(key, action)| format!("[{key}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Everything one frame shows.
#[derive(Debug, Clone)]
pub struct StatusView<'a> {
    /// 1-based position of the current track in the playlist.
    pub song_number: usize,
    pub total: usize,
    pub metadata: &'a TrackMetadata,
    pub command: TransportCmd,
    /// Rows of the character display, as currently shown.
    pub lcd: &'a [String],
    /// Where the playlist came from, for the header.
    pub source: &'a str,
}

fn state_text(command: TransportCmd) -> &'static str {
    match command {
        TransportCmd::Play => "Playing",
        TransportCmd::Pause => "Paused",
        TransportCmd::Next => "Skipping forward",
        TransportCmd::Previous => "Skipping back",
        TransportCmd::Quit => "Stopping",
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

pub fn draw(frame: &mut Frame, view: &StatusView) {
    let lcd_height = view.lcd.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(lcd_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(view.source)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lcdplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let meta = view.metadata;
    let info = vec![
        Line::from(format!("Song Number: {} / {}", view.song_number, view.total)),
        Line::from(format!("Title: {}", meta.title)),
        Line::from(format!("Artist: {}", meta.artist)),
        Line::from(format!("Album: {}", meta.album)),
        Line::from(format!("Genre: {}", meta.genre)),
        Line::from(state_text(view.command)).bold(),
    ];
    let info_par = Paragraph::new(info)
        .block(padded_block(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(info_par, chunks[1]);

    let lcd_lines: Vec<Line> = view.lcd.iter().map(|row| Line::from(row.as_str())).collect();
    let lcd_width = view
        .lcd
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0) as u16
        + 2;
    let lcd_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(lcd_width), Constraint::Min(0)])
        .split(chunks[2])[0];
    let lcd = Paragraph::new(lcd_lines)
        .style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(" lcd "));
    frame.render_widget(lcd, lcd_area);

    let footer = Paragraph::new(controls_text())
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

/// Where status frames go.
pub trait Screen {
    fn render(&mut self, view: &StatusView) -> Result<(), PlayerError>;
}

/// Full-screen terminal UI in raw mode on the alternate screen.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalScreen {
    pub fn enter() -> Result<Self, PlayerError> {
        enable_raw_mode().map_err(PlayerError::Terminal)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(PlayerError::Terminal)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(PlayerError::Terminal)?;
        Ok(Self { terminal })
    }

    /// Give the terminal back in the state we found it.
    pub fn leave(mut self) -> Result<(), PlayerError> {
        disable_raw_mode().map_err(PlayerError::Terminal)?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(PlayerError::Terminal)?;
        self.terminal.show_cursor().map_err(PlayerError::Terminal)?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn render(&mut self, view: &StatusView) -> Result<(), PlayerError> {
        self.terminal
            .draw(|f| draw(f, view))
            .map_err(PlayerError::Terminal)?;
        Ok(())
    }
}

/// No terminal: buttons only.
#[derive(Debug, Default)]
pub struct Headless;

impl Screen for Headless {
    fn render(&mut self, _view: &StatusView) -> Result<(), PlayerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    use crate::library::RawTags;
    use crate::transport::SecondaryRow;

    fn rendered(view: &StatusView, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, view)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_song_info_and_lcd_mirror() {
        let tags = RawTags {
            title: Some("Blue in Green".into()),
            artist: Some("Miles Davis".into()),
            album: None,
            genre: Some("Jazz".into()),
        };
        let meta = TrackMetadata::from_tags(
            Path::new("/music/03.flac"),
            tags,
            SecondaryRow::Artist,
        );
        let lcd = vec!["♪Blue in Green  ".to_string(), "Miles Davis     ".to_string()];
        let view = StatusView {
            song_number: 3,
            total: 9,
            metadata: &meta,
            command: TransportCmd::Pause,
            lcd: &lcd,
            source: "/music",
        };

        let screen = rendered(&view, 80, 24);
        assert!(screen.contains("Song Number: 3 / 9"));
        assert!(screen.contains("Title: Blue in Green"));
        assert!(screen.contains("Artist: Miles Davis"));
        assert!(screen.contains("Album: UNKNOWN"));
        assert!(screen.contains("Genre: Jazz"));
        assert!(screen.contains("Paused"));
        assert!(screen.contains("Miles Davis     "));
        assert!(screen.contains("[q] quit"));
    }

    #[test]
    fn headless_screen_accepts_frames() {
        let meta = TrackMetadata::default();
        let view = StatusView {
            song_number: 1,
            total: 1,
            metadata: &meta,
            command: TransportCmd::Play,
            lcd: &[],
            source: "",
        };
        assert!(Headless.render(&view).is_ok());
    }
}
