//! Terminal Glyph
//!
//! Represents a single cell in the terminal grid: one code point plus the
//! colors and style bits it was drawn with.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Text style attributes (SGR).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Style: u16 {
        const BOLD          = 1 << 0;
        const FAINT         = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

/// Color representation supporting indexed and RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// 256-color palette index; 0-7 standard, 8-15 intense
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Standard ANSI colors (0-7)
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    /// Bright ANSI colors (8-15)
    pub const BRIGHT_BLACK: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const BRIGHT_WHITE: Color = Color::Indexed(15);

    /// The color a consumer should display for a foreground drawn with `style`.
    ///
    /// Bold standard colors are shown as their intense counterpart. Storage
    /// always keeps the raw index, so this is applied at read time only.
    pub fn effective_fg(self, style: Style) -> Color {
        match self {
            Color::Indexed(i @ 0..=7) if style.contains(Style::BOLD) => Color::Indexed(i + 8),
            other => other,
        }
    }
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    /// The code point in this cell
    pub ch: char,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text style attributes
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Self::blank(Color::Default)
    }
}

impl Glyph {
    /// Create a glyph with default colors and no style
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            ..Default::default()
        }
    }

    /// A space carrying only the given background, as left behind by erase,
    /// scroll and resize.
    pub fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg,
            style: Style::empty(),
        }
    }

    /// Check if this cell holds a blank space
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }

    /// Foreground after bold brightening
    pub fn effective_fg(&self) -> Color {
        self.fg.effective_fg(self.style)
    }

    /// Copy of this glyph with the foreground replaced by its effective color
    pub fn resolved(&self) -> Glyph {
        Glyph {
            fg: self.effective_fg(),
            ..*self
        }
    }
}
