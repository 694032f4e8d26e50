//! Snapshot generation
//!
//! A [`TerminalState`] is a fully independent deep copy of the screen. The
//! glyphs in both buffers carry their bold-resolved effective foreground, so
//! consumers never need to apply the brightening rule themselves.

use serde::{Deserialize, Serialize};

use super::cell::Glyph;
use super::modes::Modes;
use super::screen::Screen;

/// A complete, point-in-time copy of the terminal state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerminalState {
    /// Screen dimensions
    pub cols: usize,
    pub rows: usize,
    /// Cursor state
    pub cursor_x: usize,
    pub cursor_y: usize,
    pub cursor_visible: bool,
    /// Whether the alternate buffer is active
    pub alt_screen: bool,
    /// Scroll region, inclusive
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// Mode flags
    pub wrap: bool,
    pub insert: bool,
    pub reverse_video: bool,
    pub origin: bool,
    /// Sorted tab stop columns
    pub tab_stops: Vec<usize>,
    /// Position held in the save slot
    pub saved_cursor_x: usize,
    pub saved_cursor_y: usize,
    /// Window title
    pub title: String,
    /// Primary grid content (row-major), regardless of which grid is active
    pub primary_buffer: Vec<Vec<Glyph>>,
    /// Alternate grid content (row-major)
    pub alternate_buffer: Vec<Vec<Glyph>>,
}

impl TerminalState {
    /// Create a snapshot from the current screen state
    pub fn from_screen(screen: &Screen) -> Self {
        let modes = screen.modes();
        let cursor = screen.cursor();
        let saved = screen.saved_cursor();
        TerminalState {
            cols: screen.cols(),
            rows: screen.rows(),
            cursor_x: cursor.col,
            cursor_y: cursor.row,
            cursor_visible: modes.cursor_visible(),
            alt_screen: modes.contains(Modes::ALT_SCREEN),
            scroll_top: screen.scroll_top(),
            scroll_bottom: screen.scroll_bottom(),
            wrap: modes.contains(Modes::WRAP),
            insert: modes.contains(Modes::INSERT),
            reverse_video: modes.contains(Modes::REVERSE_VIDEO),
            origin: cursor.origin_mode,
            tab_stops: screen.tab_stops().to_vec(),
            saved_cursor_x: saved.col,
            saved_cursor_y: saved.row,
            title: screen.title().to_string(),
            primary_buffer: screen.primary().to_vecs(Glyph::resolved),
            alternate_buffer: screen.alternate().to_vecs(Glyph::resolved),
        }
    }

    /// The buffer the cursor is drawing on
    pub fn active_buffer(&self) -> &[Vec<Glyph>] {
        if self.alt_screen {
            &self.alternate_buffer
        } else {
            &self.primary_buffer
        }
    }

    /// Glyph at a position of the active buffer
    pub fn glyph(&self, col: usize, row: usize) -> Option<&Glyph> {
        self.active_buffer().get(row).and_then(|r| r.get(col))
    }

    /// Text of one row of the active buffer, trailing blanks trimmed
    pub fn line(&self, row: usize) -> String {
        self.active_buffer()
            .get(row)
            .map(|r| buffer_line(r))
            .unwrap_or_default()
    }

    /// Text of the active buffer with trailing empty lines removed
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self.active_buffer().iter().map(|r| buffer_line(r)).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn buffer_line(row: &[Glyph]) -> String {
    let s: String = row.iter().map(|g| g.ch).collect();
    s.trim_end_matches(' ').to_string()
}
