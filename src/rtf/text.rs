//! Text accumulation and decoding.
//!
//! RTF mixes literal text, `\'hh` byte escapes in the active font's codepage
//! and `\uN` UTF-16 escapes in one stream. Escaped bytes are buffered and only
//! decoded when a boundary is reached, so double-byte characters split over
//! two escapes decode as one character.

use encoding_rs::Encoding;
use smallvec::SmallVec;

/// Buffer for decoded characters and not-yet-decoded bytes.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    chars: String,
    bytes: SmallVec<[u8; 16]>,
    pending_high: Option<u16>,
}

impl TextAccumulator {
    /// Create an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one escaped byte.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.flush_surrogate();
        self.bytes.push(byte);
    }

    /// Append literal text.
    pub fn push_str(&mut self, text: &str, encoding: &'static Encoding) {
        self.decode_pending(encoding);
        self.chars.push_str(text);
    }

    /// Append one fixed character.
    pub fn push_char(&mut self, ch: char, encoding: &'static Encoding) {
        self.decode_pending(encoding);
        self.chars.push(ch);
    }

    /// Append one UTF-16 code unit from a `\uN` escape.
    ///
    /// Surrogate halves are paired across consecutive escapes; an unpaired
    /// half becomes U+FFFD.
    pub fn push_utf16(&mut self, unit: u16, encoding: &'static Encoding) {
        self.decode_bytes(encoding);
        match unit {
            0xD800..=0xDBFF => {
                self.flush_surrogate();
                self.pending_high = Some(unit);
            },
            0xDC00..=0xDFFF => match self.pending_high.take() {
                Some(high) => {
                    let scalar =
                        0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    self.chars
                        .push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                },
                None => self.chars.push(char::REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush_surrogate();
                self.chars
                    .push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            },
        }
    }

    /// Decode buffered bytes with `encoding`.
    pub fn decode_pending(&mut self, encoding: &'static Encoding) {
        self.decode_bytes(encoding);
        self.flush_surrogate();
    }

    /// Whether nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.bytes.is_empty() && self.pending_high.is_none()
    }

    /// Decode everything and take the accumulated text.
    pub fn take(&mut self, encoding: &'static Encoding) -> String {
        self.decode_pending(encoding);
        std::mem::take(&mut self.chars)
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        self.chars.clear();
        self.bytes.clear();
        self.pending_high = None;
    }

    fn decode_bytes(&mut self, encoding: &'static Encoding) {
        if self.bytes.is_empty() {
            return;
        }
        let (decoded, had_errors) = encoding.decode_without_bom_handling(&self.bytes);
        if had_errors {
            log::trace!(
                target: "rtf.encoding",
                "malformed {} byte sequence {:02x?}",
                encoding.name(),
                self.bytes.as_slice()
            );
        }
        self.chars.push_str(&decoded);
        self.bytes.clear();
    }

    fn flush_surrogate(&mut self) {
        if self.pending_high.take().is_some() {
            self.chars.push(char::REPLACEMENT_CHARACTER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};

    #[test]
    fn test_double_byte_split_across_escapes() {
        let mut split = TextAccumulator::new();
        split.push_byte(0x82);
        split.push_byte(0xA0);

        let contiguous = SHIFT_JIS.decode_without_bom_handling(&[0x82, 0xA0]).0;
        assert_eq!(split.take(SHIFT_JIS), contiguous);
        assert_eq!(contiguous, "\u{3042}");
    }

    #[test]
    fn test_bytes_decode_before_literal_text() {
        let mut acc = TextAccumulator::new();
        acc.push_str("caf", WINDOWS_1252);
        acc.push_byte(0xE9);
        acc.push_str(" au lait", WINDOWS_1252);
        assert_eq!(acc.take(WINDOWS_1252), "café au lait");
        assert!(acc.is_empty());
    }

    #[test]
    fn test_surrogate_pairs() {
        let mut acc = TextAccumulator::new();
        acc.push_utf16(0xD83D, WINDOWS_1252);
        acc.push_utf16(0xDE00, WINDOWS_1252);
        assert_eq!(acc.take(WINDOWS_1252), "\u{1F600}");

        acc.push_utf16(0xD83D, WINDOWS_1252);
        acc.push_str("x", WINDOWS_1252);
        acc.push_utf16(0xDE00, WINDOWS_1252);
        assert_eq!(acc.take(WINDOWS_1252), "\u{FFFD}x\u{FFFD}");
    }

    #[test]
    fn test_utf16_scalar() {
        let mut acc = TextAccumulator::new();
        acc.push_utf16(8364, WINDOWS_1252);
        acc.push_char('\t', WINDOWS_1252);
        assert_eq!(acc.take(WINDOWS_1252), "\u{20AC}\t");
    }
}
