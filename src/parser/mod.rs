//! Terminal escape sequence parser
//!
//! A stateful parser that converts code points into terminal actions.
//! Based on the VT500-series parser model from <https://vt100.net/emu/dec_ansi_parser>

mod actions;
mod params;
mod sgr;
mod state;

pub use actions::{Action, CsiAction, EscAction, OscAction};
pub use params::{Params, MAX_PARAMS};
pub use sgr::{parse_sgr, SgrAttribute};
pub use state::{Parser, MAX_OSC_LEN};
