//! vtstate: a headless VT100/xterm screen-state engine
//!
//! Feed raw program output in, read a consistent copy of the screen out.
//!
//! - `decoder`: UTF-8 rune decoding that tolerates split writes
//! - `parser`: VT500-style escape sequence state machine
//! - `dispatch`: sequence-to-handler operation table
//! - `core`: grids, cursor, modes, tab stops and snapshots
//! - `terminal`: the locked engine tying it all together
//!
//! ```
//! use vtstate::Terminal;
//!
//! let term = Terminal::new(80, 24);
//! term.write(b"\x1b[1;31mhello\x1b[0m");
//! let state = term.snapshot();
//! assert_eq!(state.line(0), "hello");
//! assert_eq!(state.cursor_x, 5);
//! ```

pub mod config;
pub mod core;
pub mod decoder;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod terminal;

pub use crate::config::{Config, ConfigError};
pub use crate::core::{Color, Glyph, Style, TerminalState};
pub use crate::diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use crate::dispatch::{OperationTable, SequenceKey};
pub use crate::error::{Error, Result};
pub use crate::terminal::Terminal;
