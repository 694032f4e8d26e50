//! Terminal Grid
//!
//! A 2D grid of glyphs representing one screen. The grid is always exactly
//! `cols × rows`; every operation clamps its coordinates instead of growing
//! or shrinking storage.

use serde::{Deserialize, Serialize};

use super::cell::Glyph;

/// A row of glyphs in the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// The cells in this row
    pub cells: Vec<Glyph>,
}

impl Row {
    pub fn new(cols: usize, fill: Glyph) -> Self {
        Self {
            cells: vec![fill; cols],
        }
    }

    pub fn fill(&mut self, fill: Glyph) {
        self.cells.fill(fill);
    }

    /// Blank cells from start to end (exclusive), clamped to the row
    pub fn fill_range(&mut self, start: usize, end: usize, fill: Glyph) {
        let end = end.min(self.cells.len());
        if start < end {
            self.cells[start..end].fill(fill);
        }
    }

    /// Shift cells at and right of `col` right by `n`; the rightmost cells fall off
    pub fn insert_blanks(&mut self, col: usize, n: usize, fill: Glyph) {
        let len = self.cells.len();
        if col >= len || n == 0 {
            return;
        }
        let n = n.min(len - col);
        self.cells[col..].rotate_right(n);
        self.cells[col..col + n].fill(fill);
    }

    /// Remove `n` cells at `col`, pulling the rest left and blanking the tail
    pub fn delete_cells(&mut self, col: usize, n: usize, fill: Glyph) {
        let len = self.cells.len();
        if col >= len || n == 0 {
            return;
        }
        let n = n.min(len - col);
        self.cells[col..].rotate_left(n);
        self.cells[len - n..].fill(fill);
    }

    /// Text of the row with trailing blanks removed
    pub fn text(&self) -> String {
        let s: String = self.cells.iter().map(|g| g.ch).collect();
        s.trim_end_matches(' ').to_string()
    }
}

/// The terminal grid - a 2D array of glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// The rows in the grid
    rows: Vec<Row>,
    /// Number of columns
    cols: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0, Glyph::default())
    }
}

impl Grid {
    pub fn new(cols: usize, rows: usize, fill: Glyph) -> Self {
        Self {
            rows: (0..rows).map(|_| Row::new(cols, fill)).collect(),
            cols,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Get a reference to a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<&Glyph> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Glyph> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Store a glyph; out-of-bounds writes are dropped
    pub fn set(&mut self, col: usize, row: usize, glyph: Glyph) {
        if let Some(cell) = self.cell_mut(col, row) {
            *cell = glyph;
        }
    }

    /// Get a reference to a row
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Get a mutable reference to a row
    pub fn row_mut(&mut self, row: usize) -> Option<&mut Row> {
        self.rows.get_mut(row)
    }

    /// Iterate over rows top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// A freshly allocated grid of the new size holding the overlapping
    /// top-left rectangle of this one; everything else is `fill`.
    pub fn resized(&self, cols: usize, rows: usize, fill: Glyph) -> Grid {
        let mut grid = Grid::new(cols, rows, fill);
        let keep_cols = cols.min(self.cols);
        for (dst, src) in grid.rows.iter_mut().zip(self.rows.iter()) {
            dst.cells[..keep_cols].copy_from_slice(&src.cells[..keep_cols]);
        }
        grid
    }

    /// Fill the entire grid
    pub fn fill(&mut self, fill: Glyph) {
        for row in &mut self.rows {
            row.fill(fill);
        }
    }

    /// Fill whole rows `top..=bottom`, clamped to the grid
    pub fn fill_rows(&mut self, top: usize, bottom: usize, fill: Glyph) {
        let end = bottom.saturating_add(1).min(self.rows.len());
        if top < end {
            for row in &mut self.rows[top..end] {
                row.fill(fill);
            }
        }
    }

    /// Clamp a `[top, bottom]` region to the grid, or `None` when it is empty
    fn region(&self, top: usize, bottom: usize) -> Option<(usize, usize)> {
        let bottom = bottom.min(self.rows.len().checked_sub(1)?);
        (top <= bottom).then_some((top, bottom))
    }

    /// Scroll rows `top..=bottom` up by `n`; the bottom `n` rows become `fill`
    pub fn scroll_up(&mut self, top: usize, bottom: usize, n: usize, fill: Glyph) {
        let Some((top, bottom)) = self.region(top, bottom) else {
            return;
        };
        let n = n.min(bottom - top + 1);
        if n == 0 {
            return;
        }
        self.rows[top..=bottom].rotate_left(n);
        for row in &mut self.rows[bottom + 1 - n..=bottom] {
            row.fill(fill);
        }
    }

    /// Scroll rows `top..=bottom` down by `n`; the top `n` rows become `fill`
    pub fn scroll_down(&mut self, top: usize, bottom: usize, n: usize, fill: Glyph) {
        let Some((top, bottom)) = self.region(top, bottom) else {
            return;
        };
        let n = n.min(bottom - top + 1);
        if n == 0 {
            return;
        }
        self.rows[top..=bottom].rotate_right(n);
        for row in &mut self.rows[top..top + n] {
            row.fill(fill);
        }
    }

    /// Deep copy of the glyphs, optionally transformed per cell
    pub fn to_vecs(&self, f: impl Fn(&Glyph) -> Glyph) -> Vec<Vec<Glyph>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(&f).collect())
            .collect()
    }
}
