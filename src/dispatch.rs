//! Operation table
//!
//! Completed ESC and CSI sequences are looked up by [`SequenceKey`] and the
//! matching handler is invoked against the [`Screen`]. OSC commands have a
//! separate table keyed by command number. The standard table covers the
//! VT100/xterm repertoire; hosts may register more handlers.

use std::collections::HashMap;

use crate::core::{Charset, Color, Modes, Screen, Style};
use crate::parser::{parse_sgr, CsiAction, EscAction, Params, SgrAttribute};

/// Handler for an ESC or CSI sequence
pub type Handler = fn(&mut Screen, &Params);

/// Handler for an OSC command; receives the data after the first `;`
pub type OscHandler = fn(&mut Screen, &str);

/// Lookup key assembled from a completed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKey {
    Esc {
        intermediate: Option<u8>,
        final_byte: u8,
    },
    Csi {
        marker: Option<u8>,
        intermediate: Option<u8>,
        final_byte: u8,
    },
}

impl SequenceKey {
    /// `ESC final`
    pub const fn esc(final_byte: u8) -> Self {
        SequenceKey::Esc {
            intermediate: None,
            final_byte,
        }
    }

    /// `ESC intermediate final`
    pub const fn esc_with(intermediate: u8, final_byte: u8) -> Self {
        SequenceKey::Esc {
            intermediate: Some(intermediate),
            final_byte,
        }
    }

    /// `CSI params final`
    pub const fn csi(final_byte: u8) -> Self {
        SequenceKey::Csi {
            marker: None,
            intermediate: None,
            final_byte,
        }
    }

    /// `CSI marker params final`
    pub const fn csi_private(marker: u8, final_byte: u8) -> Self {
        SequenceKey::Csi {
            marker: Some(marker),
            intermediate: None,
            final_byte,
        }
    }

    /// `CSI params intermediate final`
    pub const fn csi_with(intermediate: u8, final_byte: u8) -> Self {
        SequenceKey::Csi {
            marker: None,
            intermediate: Some(intermediate),
            final_byte,
        }
    }

    /// Key for a parsed ESC sequence; `None` with more than one intermediate
    pub fn from_esc(esc: &EscAction) -> Option<Self> {
        Some(SequenceKey::Esc {
            intermediate: single_intermediate(&esc.intermediates)?,
            final_byte: esc.final_byte,
        })
    }

    /// Key for a parsed CSI sequence; `None` with more than one intermediate
    pub fn from_csi(csi: &CsiAction) -> Option<Self> {
        Some(SequenceKey::Csi {
            marker: csi.marker,
            intermediate: single_intermediate(&csi.intermediates)?,
            final_byte: csi.final_byte,
        })
    }
}

fn single_intermediate(intermediates: &[u8]) -> Option<Option<u8>> {
    match intermediates {
        [] => Some(None),
        [b] => Some(Some(*b)),
        _ => None,
    }
}

/// Sequence-to-handler lookup, built once per engine
#[derive(Debug, Clone)]
pub struct OperationTable {
    sequences: HashMap<SequenceKey, Handler>,
    osc: HashMap<u16, OscHandler>,
}

impl Default for OperationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperationTable {
    /// A table with no handlers
    pub fn empty() -> Self {
        Self {
            sequences: HashMap::new(),
            osc: HashMap::new(),
        }
    }

    /// Register a handler, returning the one it replaces
    pub fn register(&mut self, key: SequenceKey, handler: Handler) -> Option<Handler> {
        self.sequences.insert(key, handler)
    }

    /// Register an OSC handler, returning the one it replaces
    pub fn register_osc(&mut self, command: u16, handler: OscHandler) -> Option<OscHandler> {
        self.osc.insert(command, handler)
    }

    pub fn lookup(&self, key: &SequenceKey) -> Option<Handler> {
        self.sequences.get(key).copied()
    }

    pub fn lookup_osc(&self, command: u16) -> Option<OscHandler> {
        self.osc.get(&command).copied()
    }

    pub fn len(&self) -> usize {
        self.sequences.len() + self.osc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The VT100/xterm handler set
    pub fn standard() -> Self {
        let mut table = Self::empty();

        // ESC
        table.register(SequenceKey::esc(b'7'), |s, _| s.save_cursor());
        table.register(SequenceKey::esc(b'8'), |s, _| s.restore_cursor());
        table.register(SequenceKey::esc(b'D'), |s, _| s.index());
        table.register(SequenceKey::esc(b'E'), |s, _| s.next_line());
        table.register(SequenceKey::esc(b'M'), |s, _| s.reverse_index());
        table.register(SequenceKey::esc(b'H'), |s, _| s.set_tab_stop());
        table.register(SequenceKey::esc(b'c'), |s, _| s.reset());
        table.register(SequenceKey::esc(b'='), |_, _| {
            tracing::debug!("Application keypad (ignored)")
        });
        table.register(SequenceKey::esc(b'>'), |_, _| {
            tracing::debug!("Normal keypad (ignored)")
        });
        table.register(SequenceKey::esc_with(b'#', b'8'), |s, _| s.alignment_test());
        table.register(SequenceKey::esc_with(b'(', b'B'), |s, _| {
            s.designate_charset(0, Charset::Ascii)
        });
        table.register(SequenceKey::esc_with(b'(', b'0'), |s, _| {
            s.designate_charset(0, Charset::DecSpecialGraphics)
        });
        table.register(SequenceKey::esc_with(b'(', b'A'), |s, _| {
            s.designate_charset(0, Charset::Uk)
        });
        table.register(SequenceKey::esc_with(b')', b'B'), |s, _| {
            s.designate_charset(1, Charset::Ascii)
        });
        table.register(SequenceKey::esc_with(b')', b'0'), |s, _| {
            s.designate_charset(1, Charset::DecSpecialGraphics)
        });
        table.register(SequenceKey::esc_with(b')', b'A'), |s, _| {
            s.designate_charset(1, Charset::Uk)
        });

        // CSI: cursor motion
        table.register(SequenceKey::csi(b'A'), |s, p| s.move_cursor_up(p.count(0)));
        table.register(SequenceKey::csi(b'B'), |s, p| s.move_cursor_down(p.count(0)));
        table.register(SequenceKey::csi(b'e'), |s, p| s.move_cursor_down(p.count(0)));
        table.register(SequenceKey::csi(b'C'), |s, p| s.move_cursor_forward(p.count(0)));
        table.register(SequenceKey::csi(b'a'), |s, p| s.move_cursor_forward(p.count(0)));
        table.register(SequenceKey::csi(b'D'), |s, p| s.move_cursor_backward(p.count(0)));
        table.register(SequenceKey::csi(b'E'), |s, p| {
            s.move_cursor_down(p.count(0));
            s.carriage_return();
        });
        table.register(SequenceKey::csi(b'F'), |s, p| {
            s.move_cursor_up(p.count(0));
            s.carriage_return();
        });
        table.register(SequenceKey::csi(b'G'), |s, p| s.move_cursor_to_col(p.position(0)));
        table.register(SequenceKey::csi(b'`'), |s, p| s.move_cursor_to_col(p.position(0)));
        table.register(SequenceKey::csi(b'd'), |s, p| s.move_cursor_to_row(p.position(0)));
        table.register(SequenceKey::csi(b'H'), cursor_position);
        table.register(SequenceKey::csi(b'f'), cursor_position);
        table.register(SequenceKey::csi(b'I'), |s, p| s.tab_forward(p.count(0)));
        table.register(SequenceKey::csi(b'Z'), |s, p| s.tab_backward(p.count(0)));
        table.register(SequenceKey::csi(b's'), |s, _| s.save_cursor());
        table.register(SequenceKey::csi(b'u'), |s, _| s.restore_cursor());

        // CSI: editing
        table.register(SequenceKey::csi(b'J'), |s, p| s.erase_in_display(p.raw(0)));
        table.register(SequenceKey::csi(b'K'), |s, p| s.erase_in_line(p.raw(0)));
        table.register(SequenceKey::csi(b'X'), |s, p| s.erase_chars(p.count(0)));
        table.register(SequenceKey::csi(b'@'), |s, p| s.insert_chars(p.count(0)));
        table.register(SequenceKey::csi(b'P'), |s, p| s.delete_chars(p.count(0)));
        table.register(SequenceKey::csi(b'L'), |s, p| s.insert_lines(p.count(0)));
        table.register(SequenceKey::csi(b'M'), |s, p| s.delete_lines(p.count(0)));
        table.register(SequenceKey::csi(b'S'), |s, p| s.scroll_up(p.count(0)));
        table.register(SequenceKey::csi(b'T'), |s, p| s.scroll_down(p.count(0)));
        table.register(SequenceKey::csi(b'b'), |s, p| s.repeat_last(p.count(0)));
        table.register(SequenceKey::csi(b'g'), tab_clear);
        table.register(SequenceKey::csi(b'r'), set_scroll_region);

        // CSI: modes and attributes
        table.register(SequenceKey::csi(b'm'), select_graphic_rendition);
        table.register(SequenceKey::csi(b'h'), |s, p| set_ansi_modes(s, p, true));
        table.register(SequenceKey::csi(b'l'), |s, p| set_ansi_modes(s, p, false));
        table.register(SequenceKey::csi_private(b'?', b'h'), |s, p| {
            set_dec_modes(s, p, true)
        });
        table.register(SequenceKey::csi_private(b'?', b'l'), |s, p| {
            set_dec_modes(s, p, false)
        });
        table.register(SequenceKey::csi_with(b'!', b'p'), |s, _| s.soft_reset());

        // CSI: reports have no reply channel
        table.register(SequenceKey::csi(b'n'), |_, p| {
            tracing::debug!("DSR {} requested (no reply channel)", p.raw(0))
        });
        table.register(SequenceKey::csi(b'c'), |_, _| {
            tracing::debug!("Device attributes requested (no reply channel)")
        });

        // OSC
        table.register_osc(0, |s, title| s.set_title(title));
        table.register_osc(2, |s, title| s.set_title(title));
        table.register_osc(1, |_, name| tracing::debug!("Icon name ignored: {}", name));

        table
    }
}

/// CUP/HVP
fn cursor_position(screen: &mut Screen, params: &Params) {
    screen.move_cursor_to(params.position(0), params.position(1));
}

/// TBC
fn tab_clear(screen: &mut Screen, params: &Params) {
    match params.raw(0) {
        0 => screen.clear_tab_stop(),
        3 => screen.clear_all_tab_stops(),
        mode => tracing::debug!("Unknown TBC mode: {}", mode),
    }
}

/// DECSTBM
fn set_scroll_region(screen: &mut Screen, params: &Params) {
    let top = params.position(0);
    let bottom = params
        .get(1)
        .map(usize::from)
        .unwrap_or(screen.rows())
        .saturating_sub(1);
    screen.set_scroll_region(top, bottom);
}

/// SGR
fn select_graphic_rendition(screen: &mut Screen, params: &Params) {
    for attr in parse_sgr(params) {
        match attr {
            SgrAttribute::Reset => screen.reset_attributes(),
            SgrAttribute::Bold => screen.set_style(Style::BOLD, true),
            SgrAttribute::Faint => screen.set_style(Style::FAINT, true),
            SgrAttribute::Italic => screen.set_style(Style::ITALIC, true),
            SgrAttribute::Underline => screen.set_style(Style::UNDERLINE, true),
            SgrAttribute::Blink => screen.set_style(Style::BLINK, true),
            SgrAttribute::Inverse => screen.set_style(Style::REVERSE, true),
            SgrAttribute::Hidden => screen.set_style(Style::HIDDEN, true),
            SgrAttribute::Strikethrough => screen.set_style(Style::STRIKETHROUGH, true),
            SgrAttribute::NormalIntensity => screen.set_style(Style::BOLD | Style::FAINT, false),
            SgrAttribute::NotItalic => screen.set_style(Style::ITALIC, false),
            SgrAttribute::NotUnderlined => screen.set_style(Style::UNDERLINE, false),
            SgrAttribute::NotBlinking => screen.set_style(Style::BLINK, false),
            SgrAttribute::NotInverse => screen.set_style(Style::REVERSE, false),
            SgrAttribute::NotHidden => screen.set_style(Style::HIDDEN, false),
            SgrAttribute::NotStrikethrough => screen.set_style(Style::STRIKETHROUGH, false),
            SgrAttribute::ForegroundIndexed(i) => screen.set_foreground(Color::Indexed(i)),
            SgrAttribute::BackgroundIndexed(i) => screen.set_background(Color::Indexed(i)),
            SgrAttribute::ForegroundRgb(r, g, b) => screen.set_foreground(Color::Rgb(r, g, b)),
            SgrAttribute::BackgroundRgb(r, g, b) => screen.set_background(Color::Rgb(r, g, b)),
            SgrAttribute::DefaultForeground => screen.set_foreground(Color::Default),
            SgrAttribute::DefaultBackground => screen.set_background(Color::Default),
        }
    }
}

/// SM/RM
fn set_ansi_modes(screen: &mut Screen, params: &Params, enable: bool) {
    for mode in params.iter() {
        match mode {
            4 => screen.set_mode(Modes::INSERT, enable),
            20 => screen.set_mode(Modes::LINEFEED_NEWLINE, enable),
            _ => tracing::debug!("Unknown ANSI mode: {} = {}", mode, enable),
        }
    }
}

/// DECSET/DECRST
fn set_dec_modes(screen: &mut Screen, params: &Params, enable: bool) {
    for mode in params.iter() {
        set_dec_mode(screen, mode, enable);
    }
}

fn set_dec_mode(screen: &mut Screen, mode: u16, enable: bool) {
    match mode {
        5 => screen.set_mode(Modes::REVERSE_VIDEO, enable),
        6 => screen.set_origin_mode(enable),
        7 => screen.set_mode(Modes::WRAP, enable),
        25 => screen.set_mode(Modes::HIDE_CURSOR, !enable),
        47 => {
            if enable {
                screen.enter_alternate_screen(false);
            } else {
                screen.exit_alternate_screen();
            }
        }
        1047 => {
            if enable {
                screen.enter_alternate_screen(true);
            } else {
                screen.exit_alternate_screen();
            }
        }
        1048 => {
            if enable {
                screen.save_cursor();
            } else {
                screen.restore_cursor();
            }
        }
        1049 => {
            if enable {
                screen.save_cursor();
                screen.enter_alternate_screen(true);
            } else {
                screen.exit_alternate_screen();
                screen.restore_cursor();
            }
        }
        _ => tracing::debug!("Unknown DEC mode: {} = {}", mode, enable),
    }
}
