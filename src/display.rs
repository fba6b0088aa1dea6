//! Character display output.

mod lcd;
mod panel;
mod scroll;

pub use lcd::{CharDisplay, LcdBuffer};
pub use panel::{LcdPanel, PanelLayout, SECONDARY_ROW, TITLE_ROW};
pub use scroll::{ScrollPacing, ScrollingText};
