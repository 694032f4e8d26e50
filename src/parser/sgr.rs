//! SGR (Select Graphic Rendition) parameter decoding

use super::params::Params;

/// One decoded SGR attribute change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrAttribute {
    Reset,
    Bold,
    Faint,
    Italic,
    Underline,
    Blink,
    Inverse,
    Hidden,
    Strikethrough,
    NormalIntensity,
    NotItalic,
    NotUnderlined,
    NotBlinking,
    NotInverse,
    NotHidden,
    NotStrikethrough,
    /// 30-37, 90-97 and `38;5;n`
    ForegroundIndexed(u8),
    /// 40-47, 100-107 and `48;5;n`
    BackgroundIndexed(u8),
    ForegroundRgb(u8, u8, u8),
    BackgroundRgb(u8, u8, u8),
    DefaultForeground,
    DefaultBackground,
}

fn component(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Parse an extended color starting at `params[i]` (the value after 38/48).
/// Returns the color and the number of parameters used.
fn parse_extended(params: &[u16]) -> Option<(ExtendedColor, usize)> {
    match params.first()? {
        5 => {
            let index = *params.get(1)?;
            Some((ExtendedColor::Indexed(component(index)), 2))
        }
        2 => {
            let rgb = params.get(1..4)?;
            Some((
                ExtendedColor::Rgb(component(rgb[0]), component(rgb[1]), component(rgb[2])),
                4,
            ))
        }
        _ => None,
    }
}

/// Parse the colon form of an extended color: `5:n`, `2:r:g:b` or
/// `2:cs:r:g:b` with an optional color space id.
fn parse_extended_group(sub: &[u16]) -> Option<ExtendedColor> {
    match sub {
        [5, index, ..] => Some(ExtendedColor::Indexed(component(*index))),
        [2, r, g, b] | [2, _, r, g, b, ..] => Some(ExtendedColor::Rgb(
            component(*r),
            component(*g),
            component(*b),
        )),
        _ => None,
    }
}

fn extended_attribute(value: u16, color: ExtendedColor) -> SgrAttribute {
    match (value, color) {
        (38, ExtendedColor::Indexed(n)) => SgrAttribute::ForegroundIndexed(n),
        (38, ExtendedColor::Rgb(r, g, b)) => SgrAttribute::ForegroundRgb(r, g, b),
        (_, ExtendedColor::Indexed(n)) => SgrAttribute::BackgroundIndexed(n),
        (_, ExtendedColor::Rgb(r, g, b)) => SgrAttribute::BackgroundRgb(r, g, b),
    }
}

/// A parameter carrying colon subparameters is one attribute on its own.
fn parse_group(value: u16, sub: &[u16]) -> Option<SgrAttribute> {
    match value {
        38 | 48 => {
            let color = parse_extended_group(sub);
            if color.is_none() {
                tracing::debug!("Malformed extended color in SGR: {}:{:?}", value, sub);
            }
            color.map(|color| extended_attribute(value, color))
        }
        // 4:0 turns underline off, every other style is drawn as a plain underline
        4 => match sub.first() {
            Some(0) => Some(SgrAttribute::NotUnderlined),
            _ => Some(SgrAttribute::Underline),
        },
        _ => {
            tracing::debug!("Ignoring SGR subparameters: {}:{:?}", value, sub);
            None
        }
    }
}

enum ExtendedColor {
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// Decode SGR parameters into attribute changes; an empty list means reset
pub fn parse_sgr(params: &Params) -> Vec<SgrAttribute> {
    let values = params.as_slice();
    if values.is_empty() {
        return vec![SgrAttribute::Reset];
    }

    let mut attrs = Vec::with_capacity(values.len());
    let mut i = 0;
    while i < values.len() {
        let value = values[i];
        let sub = params.subparams(i);
        i += 1;
        if !sub.is_empty() {
            attrs.extend(parse_group(value, sub));
            continue;
        }
        let attr = match value {
            0 => SgrAttribute::Reset,
            1 => SgrAttribute::Bold,
            2 => SgrAttribute::Faint,
            3 => SgrAttribute::Italic,
            4 | 21 => SgrAttribute::Underline,
            5 | 6 => SgrAttribute::Blink,
            7 => SgrAttribute::Inverse,
            8 => SgrAttribute::Hidden,
            9 => SgrAttribute::Strikethrough,
            22 => SgrAttribute::NormalIntensity,
            23 => SgrAttribute::NotItalic,
            24 => SgrAttribute::NotUnderlined,
            25 => SgrAttribute::NotBlinking,
            27 => SgrAttribute::NotInverse,
            28 => SgrAttribute::NotHidden,
            29 => SgrAttribute::NotStrikethrough,
            30..=37 => SgrAttribute::ForegroundIndexed((value - 30) as u8),
            39 => SgrAttribute::DefaultForeground,
            40..=47 => SgrAttribute::BackgroundIndexed((value - 40) as u8),
            49 => SgrAttribute::DefaultBackground,
            90..=97 => SgrAttribute::ForegroundIndexed((value - 90 + 8) as u8),
            100..=107 => SgrAttribute::BackgroundIndexed((value - 100 + 8) as u8),
            38 | 48 => {
                let Some((color, used)) = parse_extended(&values[i..]) else {
                    tracing::debug!("Malformed extended color in SGR: {:?}", values);
                    // the rest of the list cannot be interpreted reliably
                    break;
                };
                i += used;
                extended_attribute(value, color)
            }
            _ => {
                tracing::debug!("Unknown SGR attribute: {}", value);
                continue;
            }
        };
        attrs.push(attr);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sgr(values: &[u16]) -> Vec<SgrAttribute> {
        parse_sgr(&Params::from_slice(values))
    }

    #[test]
    fn test_empty_is_reset() {
        assert_eq!(sgr(&[]), vec![SgrAttribute::Reset]);
    }

    #[test]
    fn test_basic_attributes() {
        assert_eq!(
            sgr(&[1, 4, 31, 42]),
            vec![
                SgrAttribute::Bold,
                SgrAttribute::Underline,
                SgrAttribute::ForegroundIndexed(1),
                SgrAttribute::BackgroundIndexed(2),
            ]
        );
    }

    #[test]
    fn test_bright_colors() {
        assert_eq!(
            sgr(&[91, 107]),
            vec![
                SgrAttribute::ForegroundIndexed(9),
                SgrAttribute::BackgroundIndexed(15),
            ]
        );
    }

    #[test]
    fn test_extended_colors() {
        assert_eq!(
            sgr(&[38, 5, 196, 48, 2, 10, 20, 30, 1]),
            vec![
                SgrAttribute::ForegroundIndexed(196),
                SgrAttribute::BackgroundRgb(10, 20, 30),
                SgrAttribute::Bold,
            ]
        );
    }

    #[test]
    fn test_extended_color_clamps_components() {
        assert_eq!(sgr(&[38, 5, 999]), vec![SgrAttribute::ForegroundIndexed(255)]);
    }

    #[test]
    fn test_truncated_extended_color() {
        assert_eq!(sgr(&[1, 38, 2, 10]), vec![SgrAttribute::Bold]);
        assert_eq!(sgr(&[38]), vec![]);
    }

    #[test]
    fn test_underline_style_subparam() {
        let params = Params::from_groups(&[(4, &[3])]);
        assert_eq!(parse_sgr(&params), vec![SgrAttribute::Underline]);

        let params = Params::from_groups(&[(4, &[0]), (3, &[])]);
        assert_eq!(
            parse_sgr(&params),
            vec![SgrAttribute::NotUnderlined, SgrAttribute::Italic]
        );
    }

    #[test]
    fn test_colon_extended_colors() {
        // with and without the color space slot
        let params = Params::from_groups(&[(1, &[]), (38, &[2, 0, 255, 0, 0])]);
        assert_eq!(
            parse_sgr(&params),
            vec![SgrAttribute::Bold, SgrAttribute::ForegroundRgb(255, 0, 0)]
        );

        let params = Params::from_groups(&[(48, &[2, 1, 2, 3]), (1, &[])]);
        assert_eq!(
            parse_sgr(&params),
            vec![SgrAttribute::BackgroundRgb(1, 2, 3), SgrAttribute::Bold]
        );

        let params = Params::from_groups(&[(38, &[5, 100])]);
        assert_eq!(parse_sgr(&params), vec![SgrAttribute::ForegroundIndexed(100)]);
    }

    #[test]
    fn test_colon_group_does_not_consume_neighbors() {
        let params = Params::from_groups(&[(38, &[2, 9]), (1, &[]), (1, &[7])]);
        assert_eq!(parse_sgr(&params), vec![SgrAttribute::Bold]);
    }

    #[test]
    fn test_unknown_skipped() {
        assert_eq!(sgr(&[50, 1]), vec![SgrAttribute::Bold]);
    }
}
