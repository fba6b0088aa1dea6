//! Two-row track display: title on top, artist or album below.
//!
//! Text that fits its row is written once. Longer text gets a
//! `ScrollingText` that `tick` advances; each row scrolls on its own.

use std::time::Instant;

use tracing::debug;

use super::lcd::CharDisplay;
use super::scroll::{ScrollPacing, ScrollingText};

pub const TITLE_ROW: usize = 0;
pub const SECONDARY_ROW: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub columns: usize,
    pub glyph: Option<char>,
    /// Blank cells around scrolling text; `None` means the row width.
    pub padding: Option<usize>,
    pub pacing: ScrollPacing,
}

#[derive(Debug)]
enum Row {
    Blank,
    Static,
    Scrolling(ScrollingText),
}

pub struct LcdPanel<D> {
    display: D,
    layout: PanelLayout,
    rows: [Row; 2],
}

impl<D: CharDisplay> LcdPanel<D> {
    pub fn new(mut display: D, layout: PanelLayout) -> Self {
        display.clear();
        Self {
            display,
            layout,
            rows: [Row::Blank, Row::Blank],
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    #[cfg(test)]
    pub fn is_scrolling(&self, row: usize) -> bool {
        matches!(self.rows.get(row), Some(Row::Scrolling(_)))
    }

    /// Lay out a new track on both rows.
    pub fn show_track(&mut self, title: &str, secondary: &str) {
        self.display.clear();
        if let Some(glyph) = self.layout.glyph {
            self.display.position(0, TITLE_ROW);
            self.display.write(glyph.encode_utf8(&mut [0; 4]));
        }
        self.set_row(TITLE_ROW, title);
        self.set_row(SECONDARY_ROW, secondary);
    }

    /// Replace the second row only; the title keeps scrolling where it was.
    pub fn show_secondary(&mut self, text: &str) {
        let (col, width) = self.span(SECONDARY_ROW);
        self.display.position(col, SECONDARY_ROW);
        self.display.write(&" ".repeat(width));
        self.set_row(SECONDARY_ROW, text);
    }

    /// Advance any scrolling rows. Returns whether anything was redrawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut redrawn = false;
        for row in [TITLE_ROW, SECONDARY_ROW] {
            let (col, _) = self.span(row);
            if let Row::Scrolling(scroller) = &mut self.rows[row] {
                if let Some(frame) = scroller.poll(now) {
                    self.display.position(col, row);
                    self.display.write(&frame);
                    redrawn = true;
                }
            }
        }
        redrawn
    }

    pub fn farewell(&mut self, text: &str) {
        self.clear();
        self.display.position(0, TITLE_ROW);
        self.display.write(&fit(text, self.layout.columns));
    }

    pub fn clear(&mut self) {
        self.rows = [Row::Blank, Row::Blank];
        self.display.clear();
    }

    fn set_row(&mut self, row: usize, text: &str) {
        let (col, width) = self.span(row);
        if ScrollingText::needs_scroll(text, width) {
            // Nothing is drawn yet; the first tick emits the first frame.
            if let Row::Scrolling(scroller) = &mut self.rows[row] {
                if scroller.shows(text, width) {
                    scroller.restart();
                    return;
                }
            }
            let padding = self.layout.padding.unwrap_or(width);
            let scroller = ScrollingText::new(text, width, padding, self.layout.pacing);
            debug!(row, frames = scroller.cycle_len(), "scrolling row");
            self.rows[row] = Row::Scrolling(scroller);
        } else {
            self.display.position(col, row);
            self.display.write(&fit(text, width));
            self.rows[row] = Row::Static;
        }
    }

    /// First column and width available to the text on `row`.
    fn span(&self, row: usize) -> (usize, usize) {
        let columns = self.layout.columns;
        match (row, self.layout.glyph) {
            (TITLE_ROW, Some(_)) => (1, columns.saturating_sub(1)),
            _ => (0, columns),
        }
    }
}

/// Exactly `width` chars: truncated or padded with spaces.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}
