//! Rune decoding for byte-stream ingestion
//!
//! Classifies the head of a byte slice as a complete code point, the start
//! of a code point whose remaining bytes have not arrived yet, or a byte that
//! can never begin valid UTF-8. No state is kept between calls: an
//! incomplete tail is left unconsumed for the caller to resubmit.

/// Longest UTF-8 encoding of a code point
const MAX_UTF8_LEN: usize = 4;

/// What the head of a byte slice holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A code point and the number of bytes it occupied
    Char(char, usize),
    /// A valid prefix of a code point; more bytes are needed
    Incomplete,
    /// Not valid UTF-8; skip one byte
    Invalid,
}

/// Decode the code point at the start of `bytes`
///
/// An empty slice is reported as `Incomplete`.
pub fn decode(bytes: &[u8]) -> Decoded {
    let head = &bytes[..bytes.len().min(MAX_UTF8_LEN)];
    let valid = match std::str::from_utf8(head) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 => {
            // the prefix is valid, so this cannot fail
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(e) if e.error_len().is_none() => return Decoded::Incomplete,
        Err(_) => return Decoded::Invalid,
    };
    match valid.chars().next() {
        Some(c) => Decoded::Char(c, c.len_utf8()),
        None => Decoded::Incomplete,
    }
}

/// Iterator over the decodable prefix of a byte slice
///
/// Stops at the end of input or at an incomplete trailing code point;
/// [`Runes::consumed`] then reports how many bytes were fully processed.
#[derive(Debug, Clone)]
pub struct Runes<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Runes<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed (an incomplete tail once iteration ends)
    pub fn remainder(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl Iterator for Runes<'_> {
    /// `Some(c)` for a code point, `None` for a skipped invalid byte
    type Item = Option<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        match decode(&self.bytes[self.pos..]) {
            Decoded::Char(c, len) => {
                self.pos += len;
                Some(Some(c))
            }
            Decoded::Invalid => {
                self.pos += 1;
                Some(None)
            }
            Decoded::Incomplete => None,
        }
    }
}
