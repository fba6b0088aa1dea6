//! Marquee text for a fixed-width display row.
//!
//! The text is framed by `padding` blank cells on both sides, so with a
//! padding equal to the row width it scrolls in from blank and back out to
//! blank. Frames are produced lazily and forever; `poll` adds the pacing.

use std::time::{Duration, Instant};

/// How fast the marquee moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScrollPacing {
    /// Minimum time between two steps.
    pub interval: Duration,
    /// How long the left-aligned frame stays up once per cycle.
    pub hold: Duration,
}

impl Default for ScrollPacing {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            hold: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollingText {
    text: String,
    chars: Vec<char>,
    width: usize,
    cursor: usize,
    max_cursor: usize,
    /// The frame with the text flush against the left edge.
    initial: String,
    pacing: ScrollPacing,
    next_due: Option<Instant>,
}

impl ScrollingText {
    pub fn new(text: &str, width: usize, padding: usize, pacing: ScrollPacing) -> Self {
        let mut chars = Vec::with_capacity(text.len() + 2 * padding);
        chars.extend(std::iter::repeat_n(' ', padding));
        chars.extend(text.chars());
        chars.extend(std::iter::repeat_n(' ', padding));

        let max_cursor = chars.len().saturating_sub(width);
        let mut scroller = Self {
            text: text.to_string(),
            chars,
            width,
            cursor: 0,
            max_cursor,
            initial: String::new(),
            pacing,
            next_due: None,
        };
        scroller.initial = scroller.frame_at(padding.min(max_cursor));
        scroller
    }

    /// Whether `text` is too long for a row of `width` cells.
    pub fn needs_scroll(text: &str, width: usize) -> bool {
        text.chars().count() > width
    }

    /// Whether this marquee already scrolls `text` across `width` cells.
    pub fn shows(&self, text: &str, width: usize) -> bool {
        self.width == width && self.text == text
    }

    /// Number of frames in one full cycle.
    pub fn cycle_len(&self) -> usize {
        self.max_cursor + 1
    }

    #[cfg(test)]
    pub fn initial_frame(&self) -> &str {
        &self.initial
    }

    /// Back to the first frame; the next `poll` emits immediately.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.next_due = None;
    }

    /// Emit the next frame if the pacing allows it at `now`.
    ///
    /// Calls that arrive early are no-ops. After the left-aligned frame the
    /// next step waits for the hold instead of the normal interval.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.next_due.is_some_and(|due| now < due) {
            return None;
        }
        let frame = self.next()?;
        let wait = if frame == self.initial {
            self.pacing.hold.max(self.pacing.interval)
        } else {
            self.pacing.interval
        };
        self.next_due = Some(now + wait);
        Some(frame)
    }

    fn frame_at(&self, cursor: usize) -> String {
        (cursor..cursor + self.width)
            .map(|i| self.chars.get(i).copied().unwrap_or(' '))
            .collect()
    }
}

/// Unpaced frames, one step per call. Never ends.
impl Iterator for ScrollingText {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let frame = self.frame_at(self.cursor);
        self.cursor += 1;
        if self.cursor > self.max_cursor {
            self.cursor = 0;
        }
        Some(frame)
    }
}
