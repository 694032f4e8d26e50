//! Terminal Executor
//!
//! Ties together the rune decoder, parser, operation table and screen model
//! behind a single lock. This is the public entry point: hosts feed program
//! output through [`Terminal::write`] and read state back with
//! [`Terminal::snapshot`].

use std::collections::BTreeSet;
use std::io::{self, BufRead};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::core::{Screen, TerminalState};
use crate::decoder::Runes;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::dispatch::{OperationTable, SequenceKey};
use crate::error::{Error, Result};
use crate::parser::{Action, CsiAction, EscAction, OscAction, Params, Parser};

const INVALID_UTF8: &str = "invalid UTF-8 sequence encountered";

/// State guarded by the engine lock
struct Engine {
    parser: Parser,
    screen: Screen,
    table: OperationTable,
}

impl Engine {
    /// Decode and process every complete code point in `bytes`, returning
    /// the number of bytes consumed. Rows under the cursor before and after
    /// each code point are added to `changed` when given.
    fn ingest(
        &mut self,
        bytes: &[u8],
        diagnostics: &dyn Diagnostics,
        mut changed: Option<&mut BTreeSet<usize>>,
    ) -> usize {
        let mut runes = Runes::new(bytes);
        for rune in runes.by_ref() {
            let Some(c) = rune else {
                diagnostics.warn(INVALID_UTF8);
                continue;
            };
            let before = self.screen.cursor().row;
            self.feed(c);
            if let Some(rows) = changed.as_deref_mut() {
                let height = self.screen.rows();
                rows.extend(
                    [before, self.screen.cursor().row]
                        .into_iter()
                        .filter(|&row| row < height),
                );
            }
        }
        runes.consumed()
    }

    fn feed(&mut self, c: char) {
        if let Some(action) = self.parser.advance(c) {
            self.apply_action(action);
        }
    }

    /// Apply a single parsed action to the screen
    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Print(c) => self.screen.print(c),
            Action::Execute(byte) => self.execute_c0(byte),
            Action::CsiDispatch(csi) => self.execute_csi(&csi),
            Action::EscDispatch(esc) => self.execute_esc(&esc),
            Action::OscDispatch(osc) => self.execute_osc(&osc),
        }
    }

    /// Execute a C0 control character
    fn execute_c0(&mut self, byte: u8) {
        match byte {
            0x07 => tracing::debug!("Bell"),
            0x08 => self.screen.backspace(),
            0x09 => self.screen.tab_forward(1),
            // LF, VT, FF
            0x0A..=0x0C => self.screen.linefeed(),
            0x0D => self.screen.carriage_return(),
            0x0E => {
                tracing::debug!("Shift Out (G1)");
                self.screen.shift_out();
            }
            0x0F => {
                tracing::debug!("Shift In (G0)");
                self.screen.shift_in();
            }
            _ => tracing::trace!("Ignored C0 control: {:#04x}", byte),
        }
    }

    fn execute_csi(&mut self, csi: &CsiAction) {
        let handler = SequenceKey::from_csi(csi).and_then(|key| self.table.lookup(&key));
        match handler {
            Some(handler) => {
                tracing::trace!("CSI {:?}", csi);
                handler(&mut self.screen, &csi.params);
            }
            None => tracing::debug!(
                "Unhandled CSI: marker={:?} params={:?} intermediates={:?} final={}",
                csi.marker.map(char::from),
                csi.params.as_slice(),
                csi.intermediates,
                csi.final_byte as char
            ),
        }
    }

    fn execute_esc(&mut self, esc: &EscAction) {
        let handler = SequenceKey::from_esc(esc).and_then(|key| self.table.lookup(&key));
        match handler {
            Some(handler) => {
                tracing::trace!("ESC {:?}", esc);
                handler(&mut self.screen, &Params::new());
            }
            None => tracing::debug!(
                "Unhandled ESC: intermediates={:?} final={}",
                esc.intermediates,
                esc.final_byte as char
            ),
        }
    }

    fn execute_osc(&mut self, osc: &OscAction) {
        match osc.command.and_then(|cmd| self.table.lookup_osc(cmd)) {
            Some(handler) => handler(&mut self.screen, &osc.data),
            None => tracing::debug!("Unhandled OSC {:?}: {}", osc.command, osc.data),
        }
    }
}

/// A thread-safe terminal emulation engine
///
/// Every method takes the engine lock for its full duration, so concurrent
/// writers, resizes and snapshots are serialized and each snapshot is a
/// point-in-time copy.
pub struct Terminal {
    engine: Mutex<Engine>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let engine = self.engine.lock();
        f.debug_struct("Terminal")
            .field("cols", &engine.screen.cols())
            .field("rows", &engine.screen.rows())
            .finish_non_exhaustive()
    }
}

impl Terminal {
    /// Create a new terminal with the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_parser(cols, rows, Parser::new())
    }

    /// Create a terminal sized and limited by `config`
    pub fn from_config(config: &Config) -> Self {
        let parser = Parser::with_limits(config.max_params, config.max_osc_len);
        Self::with_parser(config.cols, config.rows, parser)
    }

    fn with_parser(cols: usize, rows: usize, parser: Parser) -> Self {
        Self {
            engine: Mutex::new(Engine {
                parser,
                screen: Screen::new(cols, rows),
                table: OperationTable::standard(),
            }),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the diagnostics sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Replace the operation table
    pub fn with_table(mut self, table: OperationTable) -> Self {
        self.engine.get_mut().table = table;
        self
    }

    /// Process program output, returning the number of bytes consumed
    ///
    /// An incomplete trailing code point is left unconsumed; resubmit it
    /// with the next write. Invalid bytes are reported to the diagnostics
    /// sink and skipped.
    pub fn write(&self, bytes: &[u8]) -> usize {
        self.engine.lock().ingest(bytes, &*self.diagnostics, None)
    }

    /// Like [`Terminal::write`], also returning the sorted rows touched by
    /// the cursor while processing
    pub fn write_tracking_changes(&self, bytes: &[u8]) -> (usize, Vec<usize>) {
        let mut changed = BTreeSet::new();
        let consumed = self
            .engine
            .lock()
            .ingest(bytes, &*self.diagnostics, Some(&mut changed));
        (consumed, changed.into_iter().collect())
    }

    /// Process whatever `reader` has buffered
    ///
    /// Returns `Ok(())` once the buffered data is exhausted on a code-point
    /// boundary, reading more to complete a split code point.
    /// `Err(Error::StreamClosed)` means end-of-stream; I/O failures are
    /// returned as `Error::Io`. Effects already applied are kept either way.
    pub fn parse<R: BufRead>(&self, reader: &mut R) -> Result<()> {
        let mut carry: Vec<u8> = Vec::new();
        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            };
            if chunk.is_empty() {
                return Err(Error::StreamClosed);
            }
            carry.extend_from_slice(chunk);
            let len = chunk.len();
            reader.consume(len);

            // the lock is not held while reading
            let consumed = self.engine.lock().ingest(&carry, &*self.diagnostics, None);
            carry.drain(..consumed);
            if carry.is_empty() {
                return Ok(());
            }
        }
    }

    /// Resize both screens, keeping the overlapping content
    pub fn resize(&self, cols: usize, rows: usize) {
        tracing::debug!("Resize to {}x{}", cols, rows);
        self.engine.lock().screen.resize(cols, rows);
    }

    /// Full reset of screen state and any partial sequence
    pub fn reset(&self) {
        let mut engine = self.engine.lock();
        engine.parser.reset();
        engine.screen.reset();
    }

    /// Point-in-time copy of the whole state
    pub fn snapshot(&self) -> TerminalState {
        TerminalState::from_screen(&self.engine.lock().screen)
    }

    /// Run `f` with exclusive access to the screen
    pub fn with_screen<T>(&self, f: impl FnOnce(&mut Screen) -> T) -> T {
        f(&mut self.engine.lock().screen)
    }

    pub fn size(&self) -> (usize, usize) {
        let engine = self.engine.lock();
        (engine.screen.cols(), engine.screen.rows())
    }

    pub fn title(&self) -> String {
        self.engine.lock().screen.title().to_string()
    }

    /// Text of the active screen
    pub fn text(&self) -> String {
        self.engine.lock().screen.text()
    }
}
