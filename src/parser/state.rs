//! Parser State Machine
//!
//! Implements a VT500-series style parser over Unicode code points. The
//! parser keeps all partial-sequence state between calls, so a sequence may
//! be split across any number of writes.
//!
//! # State Machine
//!
//! The parser follows the state machine model described in:
//! - "A parser for DEC's ANSI-compatible video terminals" by Paul Williams
//! - https://vt100.net/emu/dec_ansi_parser
//!
//! States:
//! - Ground: Normal text processing
//! - Escape: After ESC, waiting for next byte
//! - EscapeIntermediate: ESC followed by intermediate bytes
//! - CsiEntry: After CSI (ESC [), collecting parameters
//! - CsiParam: Collecting CSI parameters
//! - CsiIntermediate: CSI with intermediate bytes
//! - CsiIgnore: Malformed CSI, discarded up to its final byte
//! - OscString: Collecting OSC payload
//! - StringIgnore: DCS/SOS/PM/APC payload, discarded until ST

use super::actions::{Action, CsiAction, EscAction, OscAction};
use super::params::{ParamsBuilder, MAX_PARAMS};

/// Default OSC payload limit in characters
pub const MAX_OSC_LEN: usize = 4096;

/// At most this many intermediate bytes are kept; more marks the sequence ignored
const MAX_INTERMEDIATES: usize = 2;

const BEL: char = '\x07';
const CAN: char = '\x18';
const SUB: char = '\x1a';
const ESC: char = '\x1b';
const DEL: char = '\x7f';
const ST: char = '\u{9c}';

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    OscString,
    /// ESC seen inside an OSC string; `\` completes ST
    OscEscape,
    StringIgnore,
    /// ESC seen inside an ignored string
    StringEscape,
}

/// The terminal parser
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    /// Intermediate bytes collected during parsing
    intermediates: Vec<u8>,
    /// Too many intermediates were seen
    intermediates_overflow: bool,
    /// Parameters for CSI sequences
    params: ParamsBuilder,
    /// Private marker of the current CSI sequence
    marker: Option<u8>,
    /// OSC string payload
    osc_string: String,
    osc_len: usize,
    max_osc_len: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser in the ground state
    pub fn new() -> Self {
        Self::with_limits(MAX_PARAMS, MAX_OSC_LEN)
    }

    /// Create a parser with custom buffer limits
    pub fn with_limits(max_params: usize, max_osc_len: usize) -> Self {
        Self {
            state: State::Ground,
            intermediates: Vec::with_capacity(MAX_INTERMEDIATES),
            intermediates_overflow: false,
            params: ParamsBuilder::new(max_params),
            marker: None,
            osc_string: String::new(),
            osc_len: 0,
            max_osc_len,
        }
    }

    /// Reset the parser to initial state
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.clear_sequence();
        self.osc_string.clear();
        self.osc_len = 0;
    }

    /// Whether the parser is between sequences
    pub fn is_ground(&self) -> bool {
        self.state == State::Ground
    }

    /// Clear parameter state
    fn clear_sequence(&mut self) {
        self.intermediates.clear();
        self.intermediates_overflow = false;
        self.params.clear();
        self.marker = None;
    }

    /// Process a string, returning actions
    pub fn parse(&mut self, data: &str) -> Vec<Action> {
        data.chars().filter_map(|c| self.advance(c)).collect()
    }

    /// Process a single code point
    pub fn advance(&mut self, c: char) -> Option<Action> {
        // CAN and SUB abort any sequence
        if c == CAN || c == SUB {
            self.state = State::Ground;
            return None;
        }

        match self.state {
            State::OscString => return self.process_osc_string(c),
            State::OscEscape => return self.process_osc_escape(c),
            State::StringIgnore => return self.process_string_ignore(c),
            State::StringEscape => return self.process_string_escape(c),
            _ => {}
        }

        if c == ESC {
            self.enter_escape();
            return None;
        }
        if c < ' ' {
            // C0 controls execute even in the middle of a sequence
            return Some(Action::Execute(c as u8));
        }
        if c == DEL {
            return None;
        }
        if ('\u{80}'..='\u{9f}').contains(&c) {
            return self.process_c1(c);
        }

        match self.state {
            State::Ground => Some(Action::Print(c)),
            State::Escape => self.process_escape(c),
            State::EscapeIntermediate => self.process_escape_intermediate(c),
            State::CsiEntry => self.process_csi_entry(c),
            State::CsiParam => self.process_csi_param(c),
            State::CsiIntermediate => self.process_csi_intermediate(c),
            State::CsiIgnore => {
                if is_final(c) {
                    self.state = State::Ground;
                }
                None
            }
            State::OscString | State::OscEscape | State::StringIgnore | State::StringEscape => None,
        }
    }

    fn enter_escape(&mut self) {
        self.state = State::Escape;
        self.clear_sequence();
    }

    fn enter_csi(&mut self) {
        self.state = State::CsiEntry;
        self.clear_sequence();
    }

    fn enter_osc(&mut self) {
        self.state = State::OscString;
        self.osc_string.clear();
        self.osc_len = 0;
    }

    /// Process C1 control characters (U+0080-U+009F)
    fn process_c1(&mut self, c: char) -> Option<Action> {
        match c {
            '\u{84}' => self.esc_shorthand(b'D'),
            '\u{85}' => self.esc_shorthand(b'E'),
            '\u{88}' => self.esc_shorthand(b'H'),
            '\u{8d}' => self.esc_shorthand(b'M'),
            '\u{90}' | '\u{98}' | '\u{9e}' | '\u{9f}' => {
                self.state = State::StringIgnore;
                None
            }
            '\u{9b}' => {
                self.enter_csi();
                None
            }
            '\u{9d}' => {
                self.enter_osc();
                None
            }
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    /// Single C1 code equivalent to `ESC final`
    fn esc_shorthand(&mut self, final_byte: u8) -> Option<Action> {
        self.state = State::Ground;
        Some(Action::EscDispatch(EscAction {
            intermediates: Vec::new(),
            final_byte,
        }))
    }

    fn collect_intermediate(&mut self, c: char) {
        if self.intermediates.len() < MAX_INTERMEDIATES {
            self.intermediates.push(c as u8);
        } else {
            self.intermediates_overflow = true;
        }
    }

    /// Process characters in escape state
    fn process_escape(&mut self, c: char) -> Option<Action> {
        match c {
            '[' => {
                self.enter_csi();
                None
            }
            ']' => {
                self.enter_osc();
                None
            }
            // DCS, SOS, PM, APC
            'P' | 'X' | '^' | '_' => {
                self.state = State::StringIgnore;
                None
            }
            ' '..='/' => {
                self.collect_intermediate(c);
                self.state = State::EscapeIntermediate;
                None
            }
            '0'..='~' => self.dispatch_esc(c),
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    /// Process characters in escape intermediate state
    fn process_escape_intermediate(&mut self, c: char) -> Option<Action> {
        match c {
            ' '..='/' => {
                self.collect_intermediate(c);
                None
            }
            '0'..='~' => self.dispatch_esc(c),
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    /// Dispatch ESC sequence
    fn dispatch_esc(&mut self, c: char) -> Option<Action> {
        self.state = State::Ground;
        if self.intermediates_overflow {
            return None;
        }
        Some(Action::EscDispatch(EscAction {
            intermediates: std::mem::take(&mut self.intermediates),
            final_byte: c as u8,
        }))
    }

    /// Process characters in CSI entry state
    fn process_csi_entry(&mut self, c: char) -> Option<Action> {
        match c {
            '<'..='?' => {
                self.marker = Some(c as u8);
                self.state = State::CsiParam;
                None
            }
            _ => self.process_csi_param(c),
        }
    }

    /// Process characters in CSI param state
    fn process_csi_param(&mut self, c: char) -> Option<Action> {
        match c {
            '0'..='9' => {
                self.params.push_digit(c as u8 - b'0');
                self.state = State::CsiParam;
                None
            }
            ';' => {
                self.params.separator();
                self.state = State::CsiParam;
                None
            }
            ':' => {
                self.params.sub_separator();
                self.state = State::CsiParam;
                None
            }
            ' '..='/' => {
                self.collect_intermediate(c);
                self.state = State::CsiIntermediate;
                None
            }
            c if is_final(c) => self.dispatch_csi(c),
            _ => {
                // private marker in the wrong position or a stray character
                self.state = State::CsiIgnore;
                None
            }
        }
    }

    /// Process characters in CSI intermediate state
    fn process_csi_intermediate(&mut self, c: char) -> Option<Action> {
        match c {
            ' '..='/' => {
                self.collect_intermediate(c);
                None
            }
            c if is_final(c) => self.dispatch_csi(c),
            _ => {
                self.state = State::CsiIgnore;
                None
            }
        }
    }

    /// Dispatch CSI sequence
    fn dispatch_csi(&mut self, c: char) -> Option<Action> {
        self.state = State::Ground;
        let params = self.params.finish();
        if self.intermediates_overflow {
            return None;
        }
        Some(Action::CsiDispatch(CsiAction {
            params,
            marker: self.marker.take(),
            intermediates: std::mem::take(&mut self.intermediates),
            final_byte: c as u8,
        }))
    }

    /// Process characters in OSC string state
    fn process_osc_string(&mut self, c: char) -> Option<Action> {
        match c {
            BEL | ST => self.terminate_osc(),
            ESC => {
                self.state = State::OscEscape;
                None
            }
            c if c < ' ' => None,
            _ => {
                // payload past the limit is dropped
                if self.osc_len < self.max_osc_len {
                    self.osc_string.push(c);
                    self.osc_len += 1;
                }
                None
            }
        }
    }

    /// ESC inside OSC: `\` completes ST, anything else abandons the OSC and
    /// starts a new escape sequence
    fn process_osc_escape(&mut self, c: char) -> Option<Action> {
        if c == '\\' {
            return self.terminate_osc();
        }
        self.osc_string.clear();
        self.osc_len = 0;
        self.enter_escape();
        self.advance(c)
    }

    /// Terminate OSC sequence and dispatch
    fn terminate_osc(&mut self) -> Option<Action> {
        self.state = State::Ground;
        let payload = std::mem::take(&mut self.osc_string);
        self.osc_len = 0;
        Some(Action::OscDispatch(OscAction::parse(&payload)))
    }

    fn process_string_ignore(&mut self, c: char) -> Option<Action> {
        match c {
            ESC => self.state = State::StringEscape,
            ST => self.state = State::Ground,
            _ => {}
        }
        None
    }

    fn process_string_escape(&mut self, c: char) -> Option<Action> {
        if c == '\\' {
            self.state = State::Ground;
            return None;
        }
        self.enter_escape();
        self.advance(c)
    }
}

fn is_final(c: char) -> bool {
    ('@'..='~').contains(&c)
}
