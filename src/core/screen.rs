//! Screen model implementation
//!
//! The screen owns both grids (primary and alternate), the cursor and its
//! single save slot, the scroll region, tab stops, mode flags, charsets and
//! the title. Every control-sequence side effect is a method here; all of
//! them clamp their arguments and are no-ops on a 0×0 screen.

use super::cell::{Color, Glyph, Style};
use super::charset::{Charset, CharsetState};
use super::cursor::{Cursor, SavedCursor};
use super::grid::Grid;
use super::modes::{Modes, TabStops};

/// The main screen structure
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    cols: usize,
    rows: usize,
    primary: Grid,
    alternate: Grid,
    cursor: Cursor,
    saved_cursor: SavedCursor,
    /// Scroll region top (0-indexed, inclusive)
    scroll_top: usize,
    /// Scroll region bottom (0-indexed, inclusive)
    scroll_bottom: usize,
    tabs: TabStops,
    modes: Modes,
    charsets: CharsetState,
    title: String,
    /// Last printed character, for REP
    last_char: Option<char>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Screen {
    /// Create a new screen with the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        let blank = Glyph::default();
        Self {
            cols,
            rows,
            primary: Grid::new(cols, rows, blank),
            alternate: Grid::new(cols, rows, blank),
            cursor: Cursor::new(),
            saved_cursor: SavedCursor::default(),
            scroll_top: 0,
            scroll_bottom: rows.saturating_sub(1),
            tabs: TabStops::new(cols),
            modes: Modes::default(),
            charsets: CharsetState::new(),
            title: String::new(),
            last_char: None,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// The grid currently being drawn on
    pub fn grid(&self) -> &Grid {
        if self.modes.contains(Modes::ALT_SCREEN) {
            &self.alternate
        } else {
            &self.primary
        }
    }

    fn grid_mut(&mut self) -> &mut Grid {
        if self.modes.contains(Modes::ALT_SCREEN) {
            &mut self.alternate
        } else {
            &mut self.primary
        }
    }

    pub fn primary(&self) -> &Grid {
        &self.primary
    }

    pub fn alternate(&self) -> &Grid {
        &self.alternate
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn saved_cursor(&self) -> &SavedCursor {
        &self.saved_cursor
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn tab_stops(&self) -> &TabStops {
        &self.tabs
    }

    pub fn charsets(&self) -> &CharsetState {
        &self.charsets
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_bottom(&self) -> usize {
        self.scroll_bottom
    }

    /// Get a glyph on the active grid
    pub fn cell(&self, col: usize, row: usize) -> Option<&Glyph> {
        self.grid().cell(col, row)
    }

    /// Blank left behind by erase and scroll
    fn blank(&self) -> Glyph {
        self.cursor.blank()
    }

    // --- Character placement ---

    /// Print a character at the current cursor position
    pub fn print(&mut self, c: char) {
        if self.is_empty() {
            return;
        }
        let c = self.charsets.translate(c);
        self.last_char = Some(c);

        let glyph = self.cursor.glyph(c);
        let blank = self.blank();
        let (col, row) = (self.cursor.col, self.cursor.row);
        let insert = self.modes.contains(Modes::INSERT);

        if let Some(line) = self.grid_mut().row_mut(row) {
            if insert {
                line.insert_blanks(col, 1, blank);
            }
            if let Some(cell) = line.cells.get_mut(col) {
                *cell = glyph;
            }
        }

        if col + 1 < self.cols {
            self.cursor.col = col + 1;
        } else if self.modes.contains(Modes::WRAP) {
            self.cursor.col = 0;
            self.advance_line();
        } else {
            self.cursor.col = self.cols - 1;
        }
    }

    /// Repeat the last printed character (REP)
    pub fn repeat_last(&mut self, n: usize) {
        let Some(c) = self.last_char else {
            return;
        };
        // the character is stored translated; print it verbatim
        let charsets = std::mem::take(&mut self.charsets);
        for _ in 0..n.min(self.cols.saturating_mul(self.rows)) {
            self.print(c);
        }
        self.charsets = charsets;
    }

    /// Move down one row, scrolling when on the bottom margin
    fn advance_line(&mut self) {
        let row = self.cursor.row;
        if row == self.scroll_bottom {
            self.scroll_up(1);
        } else if row + 1 < self.rows {
            self.cursor.row = row + 1;
        }
    }

    // --- C0 controls ---

    /// LF, VT and FF
    pub fn linefeed(&mut self) {
        if self.is_empty() {
            return;
        }
        self.advance_line();
        if self.modes.contains(Modes::LINEFEED_NEWLINE) {
            self.cursor.col = 0;
        }
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
    }

    pub fn backspace(&mut self) {
        self.cursor.move_left(1);
    }

    /// HT / CHT: advance to the n-th next tab stop
    pub fn tab_forward(&mut self, n: usize) {
        for _ in 0..n.min(self.cols) {
            self.cursor.col = self.tabs.next(self.cursor.col);
        }
    }

    /// CBT: move back to the n-th previous tab stop
    pub fn tab_backward(&mut self, n: usize) {
        for _ in 0..n.min(self.cols) {
            self.cursor.col = self.tabs.prev(self.cursor.col);
        }
    }

    pub fn shift_in(&mut self) {
        self.charsets.shift_in();
    }

    pub fn shift_out(&mut self) {
        self.charsets.shift_out();
    }

    pub fn designate_charset(&mut self, slot: u8, charset: Charset) {
        self.charsets.designate(slot, charset);
    }

    // --- Line motion and scrolling ---

    /// IND
    pub fn index(&mut self) {
        if !self.is_empty() {
            self.advance_line();
        }
    }

    /// RI: move up, scrolling down when on the top margin
    pub fn reverse_index(&mut self) {
        if self.is_empty() {
            return;
        }
        let row = self.cursor.row;
        if row == self.scroll_top {
            self.scroll_down(1);
        } else if row > 0 {
            self.cursor.row = row - 1;
        }
    }

    /// NEL
    pub fn next_line(&mut self) {
        self.index();
        self.cursor.col = 0;
    }

    /// Scroll the region up by n lines (SU)
    pub fn scroll_up(&mut self, n: usize) {
        let (top, bottom, blank) = (self.scroll_top, self.scroll_bottom, self.blank());
        self.grid_mut().scroll_up(top, bottom, n, blank);
    }

    /// Scroll the region down by n lines (SD)
    pub fn scroll_down(&mut self, n: usize) {
        let (top, bottom, blank) = (self.scroll_top, self.scroll_bottom, self.blank());
        self.grid_mut().scroll_down(top, bottom, n, blank);
    }

    /// Set the scroll region (0-indexed, inclusive) and home the cursor
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        if self.is_empty() {
            return;
        }
        let last = self.rows - 1;
        let (top, bottom) = (top.min(last), bottom.min(last));
        let (top, bottom) = if top > bottom { (bottom, top) } else { (top, bottom) };
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.move_cursor_to(0, 0);
    }

    pub fn reset_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = self.rows.saturating_sub(1);
    }

    /// IL: insert blank lines at the cursor row, within the region
    pub fn insert_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        let (bottom, blank) = (self.scroll_bottom, self.blank());
        self.grid_mut().scroll_down(row, bottom, n, blank);
    }

    /// DL: delete lines at the cursor row, within the region
    pub fn delete_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        let (bottom, blank) = (self.scroll_bottom, self.blank());
        self.grid_mut().scroll_up(row, bottom, n, blank);
    }

    // --- Tab stops ---

    /// HTS
    pub fn set_tab_stop(&mut self) {
        self.tabs.set(self.cursor.col);
    }

    /// TBC 0
    pub fn clear_tab_stop(&mut self) {
        self.tabs.clear(self.cursor.col);
    }

    /// TBC 3
    pub fn clear_all_tab_stops(&mut self) {
        self.tabs.clear_all();
    }

    // --- Erase ---

    /// ED
    pub fn erase_in_display(&mut self, mode: u16) {
        let (col, row, blank) = (self.cursor.col, self.cursor.row, self.blank());
        let grid = self.grid_mut();
        match mode {
            0 => {
                if let Some(line) = grid.row_mut(row) {
                    line.fill_range(col, usize::MAX, blank);
                }
                grid.fill_rows(row + 1, usize::MAX, blank);
            }
            1 => {
                if row > 0 {
                    grid.fill_rows(0, row - 1, blank);
                }
                if let Some(line) = grid.row_mut(row) {
                    line.fill_range(0, col + 1, blank);
                }
            }
            2 | 3 => grid.fill(blank),
            _ => tracing::debug!("Unknown ED mode: {}", mode),
        }
    }

    /// EL
    pub fn erase_in_line(&mut self, mode: u16) {
        let (col, row, blank) = (self.cursor.col, self.cursor.row, self.blank());
        let Some(line) = self.grid_mut().row_mut(row) else {
            return;
        };
        match mode {
            0 => line.fill_range(col, usize::MAX, blank),
            1 => line.fill_range(0, col + 1, blank),
            2 => line.fill(blank),
            _ => tracing::debug!("Unknown EL mode: {}", mode),
        }
    }

    /// ECH
    pub fn erase_chars(&mut self, n: usize) {
        let (col, row, blank) = (self.cursor.col, self.cursor.row, self.blank());
        if let Some(line) = self.grid_mut().row_mut(row) {
            line.fill_range(col, col.saturating_add(n), blank);
        }
    }

    /// ICH
    pub fn insert_chars(&mut self, n: usize) {
        let (col, row, blank) = (self.cursor.col, self.cursor.row, self.blank());
        if let Some(line) = self.grid_mut().row_mut(row) {
            line.insert_blanks(col, n, blank);
        }
    }

    /// DCH
    pub fn delete_chars(&mut self, n: usize) {
        let (col, row, blank) = (self.cursor.col, self.cursor.row, self.blank());
        if let Some(line) = self.grid_mut().row_mut(row) {
            line.delete_cells(col, n, blank);
        }
    }

    /// DECALN: fill the screen with 'E' and home the cursor
    pub fn alignment_test(&mut self) {
        self.grid_mut().fill(Glyph::new('E'));
        self.reset_scroll_region();
        self.cursor.origin_mode = false;
        self.cursor.move_to(0, 0, self.cols, self.rows);
    }

    // --- Cursor motion ---

    /// CUP/HVP with 0-indexed arguments; region-relative in origin mode
    pub fn move_cursor_to(&mut self, row: usize, col: usize) {
        self.cursor.set_col(col, self.cols);
        self.cursor
            .set_row(row, self.rows, self.scroll_top, self.scroll_bottom);
    }

    /// CUU
    pub fn move_cursor_up(&mut self, n: usize) {
        self.cursor.move_up(n, self.scroll_top);
    }

    /// CUD
    pub fn move_cursor_down(&mut self, n: usize) {
        self.cursor.move_down(n, self.scroll_bottom, self.rows);
    }

    /// CUF
    pub fn move_cursor_forward(&mut self, n: usize) {
        self.cursor.move_right(n, self.cols);
    }

    /// CUB
    pub fn move_cursor_backward(&mut self, n: usize) {
        self.cursor.move_left(n);
    }

    /// CHA/HPA (0-indexed)
    pub fn move_cursor_to_col(&mut self, col: usize) {
        self.cursor.set_col(col, self.cols);
    }

    /// VPA (0-indexed)
    pub fn move_cursor_to_row(&mut self, row: usize) {
        self.cursor
            .set_row(row, self.rows, self.scroll_top, self.scroll_bottom);
    }

    /// Save cursor state (DECSC)
    pub fn save_cursor(&mut self) {
        self.saved_cursor = self.cursor.save();
    }

    /// Restore cursor state (DECRC)
    pub fn restore_cursor(&mut self) {
        let saved = self.saved_cursor.clone();
        self.cursor.restore(&saved, self.cols, self.rows);
    }

    // --- Attributes ---

    pub fn set_foreground(&mut self, color: Color) {
        self.cursor.fg = color;
    }

    pub fn set_background(&mut self, color: Color) {
        self.cursor.bg = color;
    }

    pub fn set_style(&mut self, style: Style, on: bool) {
        self.cursor.style.set(style, on);
    }

    /// SGR 0
    pub fn reset_attributes(&mut self) {
        self.cursor.reset_attributes();
    }

    // --- Modes ---

    /// Toggle a mode flag. Alternate screen goes through [`Screen::swap_screen`].
    pub fn set_mode(&mut self, mode: Modes, on: bool) {
        let mode = mode - Modes::ALT_SCREEN;
        self.modes.set(mode, on);
    }

    /// DECOM; moves the cursor to the (new) home position
    pub fn set_origin_mode(&mut self, on: bool) {
        self.cursor.origin_mode = on;
        self.move_cursor_to(0, 0);
    }

    pub fn is_alt_screen(&self) -> bool {
        self.modes.contains(Modes::ALT_SCREEN)
    }

    /// Toggle the active grid. The other grid keeps its content and the
    /// cursor is untouched.
    pub fn swap_screen(&mut self) {
        self.modes.toggle(Modes::ALT_SCREEN);
    }

    /// Switch to the alternate grid, optionally clearing it first
    pub fn enter_alternate_screen(&mut self, clear: bool) {
        if self.is_alt_screen() {
            return;
        }
        if clear {
            let blank = self.blank();
            self.alternate.fill(blank);
        }
        self.swap_screen();
    }

    pub fn exit_alternate_screen(&mut self) {
        if self.is_alt_screen() {
            self.swap_screen();
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // --- Lifecycle ---

    /// Reallocate both grids keeping the overlapping top-left rectangle
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let blank = self.blank();
        self.primary = self.primary.resized(cols, rows, blank);
        self.alternate = self.alternate.resized(cols, rows, blank);
        self.cols = cols;
        self.rows = rows;
        self.reset_scroll_region();
        self.tabs.resize(cols);
        self.cursor.move_to(self.cursor.col, self.cursor.row, cols, rows);
        self.saved_cursor.clamp(cols, rows);
    }

    /// Full reset (RIS): clear both grids in place and reinitialize cursor,
    /// modes, tabs, region and charsets. The title is kept.
    pub fn reset(&mut self) {
        let blank = Glyph::default();
        self.primary.fill(blank);
        self.alternate.fill(blank);
        self.cursor.reset();
        self.saved_cursor = SavedCursor::default();
        self.modes = Modes::default();
        self.tabs.reset();
        self.charsets.reset();
        self.reset_scroll_region();
        self.last_char = None;
    }

    /// Soft reset (DECSTR): pen, origin, wrap, insert, region and charsets
    pub fn soft_reset(&mut self) {
        self.cursor.reset_attributes();
        self.cursor.origin_mode = false;
        self.modes.insert(Modes::WRAP);
        self.modes.remove(Modes::INSERT | Modes::HIDE_CURSOR);
        self.charsets.reset();
        self.reset_scroll_region();
        self.saved_cursor = SavedCursor::default();
    }

    /// Text of the active grid, one line per row with trailing blanks trimmed
    pub fn text(&self) -> String {
        self.grid()
            .iter()
            .map(|row| row.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
