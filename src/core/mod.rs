//! Terminal Core Module
//!
//! Platform-independent terminal state. This module contains:
//! - Glyph representation with colors and style bits
//! - Grid storage, region scrolling and resize
//! - Cursor state, mode flags and tab stops
//! - Screen model (primary and alternate grids)
//! - Snapshot generation
//!
//! The core is deterministic: given the same sequence of operations, it
//! always produces the same state.

mod cell;
mod charset;
mod cursor;
mod grid;
mod modes;
mod screen;
mod snapshot;

pub use cell::{Color, Glyph, Style};
pub use charset::{Charset, CharsetState};
pub use cursor::{Cursor, SavedCursor};
pub use grid::{Grid, Row};
pub use modes::{Modes, TabStops, TAB_WIDTH};
pub use screen::Screen;
pub use snapshot::TerminalState;
