//! Terminal actions produced by the parser
//!
//! These actions represent the semantic meaning of parsed escape sequences.

use serde::{Deserialize, Serialize};

use super::params::Params;

/// Actions produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Print a character to the screen at the current cursor position
    Print(char),

    /// Execute a C0 control character (0x00-0x1F except ESC)
    /// Common controls:
    /// - 0x07 BEL: Bell
    /// - 0x08 BS: Backspace
    /// - 0x09 HT: Horizontal Tab
    /// - 0x0A LF: Line Feed
    /// - 0x0B VT: Vertical Tab (treated as LF)
    /// - 0x0C FF: Form Feed (treated as LF)
    /// - 0x0D CR: Carriage Return
    /// - 0x0E SO: Shift Out
    /// - 0x0F SI: Shift In
    Execute(u8),

    /// CSI (Control Sequence Introducer) dispatch
    CsiDispatch(CsiAction),

    /// ESC dispatch (non-CSI escape sequences)
    EscDispatch(EscAction),

    /// OSC (Operating System Command) dispatch
    OscDispatch(OscAction),
}

/// A complete `CSI [marker] params [intermediates] final` sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiAction {
    pub params: Params,
    /// Private marker (`?`, `>`, `<`, `=`)
    pub marker: Option<u8>,
    /// Intermediate bytes (0x20-0x2F), at most two
    pub intermediates: Vec<u8>,
    /// Final byte (0x40-0x7E) determines the command
    pub final_byte: u8,
}

/// A complete `ESC [intermediates] final` sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscAction {
    pub intermediates: Vec<u8>,
    pub final_byte: u8,
}

/// `OSC Ps ; Pt` terminated by BEL or ST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscAction {
    /// Numeric command, `None` when the leading field is not a number
    pub command: Option<u16>,
    /// Everything after the first `;`
    pub data: String,
}

impl OscAction {
    /// Split a raw payload into command number and data
    pub fn parse(payload: &str) -> Self {
        let (command, data) = payload.split_once(';').unwrap_or((payload, ""));
        OscAction {
            command: command.parse().ok(),
            data: data.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc_parse() {
        let osc = OscAction::parse("2;my title;with semicolon");
        assert_eq!(osc.command, Some(2));
        assert_eq!(osc.data, "my title;with semicolon");

        let osc = OscAction::parse("abc");
        assert_eq!(osc.command, None);
        assert_eq!(osc.data, "");

        assert_eq!(OscAction::parse("0").command, Some(0));
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::CsiDispatch(CsiAction {
            params: Params::from_slice(&[1, 2, 3]),
            marker: Some(b'?'),
            intermediates: vec![],
            final_byte: b'h',
        });

        let json = serde_json::to_string(&action).unwrap();
        let restored: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, restored);
    }
}
