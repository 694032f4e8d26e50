//! Character set handling
//!
//! Supports G0/G1 designation, SO/SI shifting and DEC Special Graphics
//! (line drawing).

use serde::{Deserialize, Serialize};

/// Character set designations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Charset {
    /// ASCII (US)
    #[default]
    Ascii,
    /// DEC Special Graphics (line drawing characters)
    DecSpecialGraphics,
    /// UK: only `#` differs
    Uk,
}

impl Charset {
    /// Translate a character through this charset
    pub fn translate(self, c: char) -> char {
        match self {
            Charset::Ascii => c,
            Charset::DecSpecialGraphics => translate_dec_special_graphics(c),
            Charset::Uk if c == '#' => '£',
            Charset::Uk => c,
        }
    }
}

/// G0/G1 slots plus the shift state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharsetState {
    pub g0: Charset,
    pub g1: Charset,
    /// SO selected G1 into GL
    pub shifted: bool,
}

impl CharsetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Designate a charset into slot 0 or 1
    pub fn designate(&mut self, slot: u8, charset: Charset) {
        match slot {
            0 => self.g0 = charset,
            1 => self.g1 = charset,
            _ => {}
        }
    }

    /// Shift In (SI) - select G0
    pub fn shift_in(&mut self) {
        self.shifted = false;
    }

    /// Shift Out (SO) - select G1
    pub fn shift_out(&mut self) {
        self.shifted = true;
    }

    pub fn current(&self) -> Charset {
        if self.shifted {
            self.g1
        } else {
            self.g0
        }
    }

    pub fn translate(&self, c: char) -> char {
        self.current().translate(c)
    }
}

/// Maps ASCII 0x60-0x7E to line drawing and other special characters
fn translate_dec_special_graphics(c: char) -> char {
    match c {
        '`' => '◆',
        'a' => '▒',
        'b' => '␉',
        'c' => '␌',
        'd' => '␍',
        'e' => '␊',
        'f' => '°',
        'g' => '±',
        'h' => '␤',
        'i' => '␋',
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺',
        'p' => '⎻',
        'q' => '─',
        'r' => '⎼',
        's' => '⎽',
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        _ => c,
    }
}
