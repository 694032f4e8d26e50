//! Cursor state management
//!
//! The cursor tracks position, the pen used for newly written glyphs, and the
//! origin-mode bit. It supports a single save/restore slot (DECSC/DECRC and
//! CSI s/u); a later save overwrites the earlier one.

use serde::{Deserialize, Serialize};

use super::cell::{Color, Glyph, Style};

/// Cursor state including position and current drawing attributes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// Current text attributes (applied to new characters)
    pub style: Style,
    /// Current foreground color
    pub fg: Color,
    /// Current background color
    pub bg: Color,
    /// Origin mode (DECOM) - cursor addressing relative to scroll region
    pub origin_mode: bool,
}

/// Saved cursor state for DECSC/DECRC
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub style: Style,
    pub fg: Color,
    pub bg: Color,
    pub origin_mode: bool,
}

impl Cursor {
    /// Create a new cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyph this cursor would write for `ch`
    pub fn glyph(&self, ch: char) -> Glyph {
        Glyph {
            ch,
            fg: self.fg,
            bg: self.bg,
            style: self.style,
        }
    }

    /// A blank carrying the current background
    pub fn blank(&self) -> Glyph {
        Glyph::blank(self.bg)
    }

    /// Move cursor to absolute position, clamping to bounds
    pub fn move_to(&mut self, col: usize, row: usize, cols: usize, rows: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.row = row.min(rows.saturating_sub(1));
    }

    /// Move cursor up by n rows, stopping at the top margin in origin mode
    pub fn move_up(&mut self, n: usize, top_margin: usize) {
        let min_row = if self.origin_mode { top_margin } else { 0 };
        self.row = self.row.saturating_sub(n).max(min_row);
    }

    /// Move cursor down by n rows, stopping at the bottom margin in origin mode
    pub fn move_down(&mut self, n: usize, bottom_margin: usize, rows: usize) {
        let max_row = if self.origin_mode {
            bottom_margin
        } else {
            rows.saturating_sub(1)
        };
        self.row = self.row.saturating_add(n).min(max_row);
    }

    /// Move cursor left by n columns, stopping at column 0
    pub fn move_left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n);
    }

    /// Move cursor right by n columns, stopping at right margin
    pub fn move_right(&mut self, n: usize, cols: usize) {
        self.col = self.col.saturating_add(n).min(cols.saturating_sub(1));
    }

    /// Move cursor to column (0-indexed)
    pub fn set_col(&mut self, col: usize, cols: usize) {
        self.col = col.min(cols.saturating_sub(1));
    }

    /// Move cursor to row (0-indexed), respecting origin mode
    pub fn set_row(&mut self, row: usize, rows: usize, scroll_top: usize, scroll_bottom: usize) {
        if self.origin_mode {
            // In origin mode, row is relative to scroll region
            self.row = scroll_top.saturating_add(row).min(scroll_bottom);
        } else {
            self.row = row.min(rows.saturating_sub(1));
        }
    }

    /// Save cursor state
    pub fn save(&self) -> SavedCursor {
        SavedCursor {
            col: self.col,
            row: self.row,
            style: self.style,
            fg: self.fg,
            bg: self.bg,
            origin_mode: self.origin_mode,
        }
    }

    /// Restore cursor state
    pub fn restore(&mut self, saved: &SavedCursor, cols: usize, rows: usize) {
        self.col = saved.col.min(cols.saturating_sub(1));
        self.row = saved.row.min(rows.saturating_sub(1));
        self.style = saved.style;
        self.fg = saved.fg;
        self.bg = saved.bg;
        self.origin_mode = saved.origin_mode;
    }

    /// Reset cursor to default state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reset only the text attributes (SGR 0)
    pub fn reset_attributes(&mut self) {
        self.style = Style::empty();
        self.fg = Color::Default;
        self.bg = Color::Default;
    }
}

impl SavedCursor {
    /// Clamp the saved position into a resized screen
    pub fn clamp(&mut self, cols: usize, rows: usize) {
        self.col = self.col.min(cols.saturating_sub(1));
        self.row = self.row.min(rows.saturating_sub(1));
    }
}
