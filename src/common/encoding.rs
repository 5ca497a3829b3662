//! Character encoding utilities for RTF text.
//!
//! RTF declares encodings in two places: the document codepage (`\ansicpg`)
//! and per-font character sets (`\fcharset`). Both are mapped onto
//! `encoding_rs` encodings here so escaped bytes can be decoded to UTF-8.

use encoding_rs::Encoding;

/// Map a Windows codepage identifier to an `encoding_rs` encoding.
///
/// Returns `None` for codepages the runtime cannot decode; callers fall back
/// to their default encoding in that case.
///
/// # Examples
/// ```
/// use rtf_dom::common::encoding::codepage_to_encoding;
///
/// let encoding = codepage_to_encoding(936).unwrap();
/// assert_eq!(encoding.name(), "GBK");
/// ```
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        // DOS codepages (IBM866 is the closest encoding_rs offers)
        437 | 850 | 866 => Some(encoding_rs::IBM866),

        874 => Some(encoding_rs::WINDOWS_874),
        1250 => Some(encoding_rs::WINDOWS_1250),
        1251 => Some(encoding_rs::WINDOWS_1251),
        1252 => Some(encoding_rs::WINDOWS_1252),
        1253 => Some(encoding_rs::WINDOWS_1253),
        1254 => Some(encoding_rs::WINDOWS_1254),
        1255 => Some(encoding_rs::WINDOWS_1255),
        1256 => Some(encoding_rs::WINDOWS_1256),
        1257 => Some(encoding_rs::WINDOWS_1257),
        1258 => Some(encoding_rs::WINDOWS_1258),

        // East Asian double-byte codepages
        932 | 10001 => Some(encoding_rs::SHIFT_JIS),
        936 | 20936 => Some(encoding_rs::GBK),
        949 | 1361 => Some(encoding_rs::EUC_KR),
        950 => Some(encoding_rs::BIG5),
        20932 => Some(encoding_rs::EUC_JP),
        54936 => Some(encoding_rs::GB18030),

        28591 => Some(encoding_rs::WINDOWS_1252),
        28592 => Some(encoding_rs::ISO_8859_2),
        28593 => Some(encoding_rs::ISO_8859_3),
        28594 => Some(encoding_rs::ISO_8859_4),
        28595 => Some(encoding_rs::ISO_8859_5),
        28596 => Some(encoding_rs::ISO_8859_6),
        28597 => Some(encoding_rs::ISO_8859_7),
        28598 => Some(encoding_rs::ISO_8859_8),
        28603 => Some(encoding_rs::ISO_8859_13),
        28605 => Some(encoding_rs::ISO_8859_15),

        20866 => Some(encoding_rs::KOI8_R),
        21866 => Some(encoding_rs::KOI8_U),

        10000 => Some(encoding_rs::MACINTOSH),
        10007 => Some(encoding_rs::X_MAC_CYRILLIC),

        1200 => Some(encoding_rs::UTF_16LE),
        1201 => Some(encoding_rs::UTF_16BE),
        65001 => Some(encoding_rs::UTF_8),

        _ => None,
    }
}

/// What a font's `\fcharset` value means for text decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetCodepage {
    /// The charset maps to a concrete Windows codepage.
    Codepage(u32),
    /// Charset 1: use the document default encoding.
    DocumentDefault,
}

/// Map an RTF `\fcharset` value to the codepage used for its text.
///
/// Unknown charsets resolve to [`CharsetCodepage::DocumentDefault`].
pub fn charset_to_codepage(charset: u8) -> CharsetCodepage {
    let codepage = match charset {
        0 => 1252,
        1 => return CharsetCodepage::DocumentDefault,
        // Symbol fonts carry glyph indices, decoding them as 1252 keeps the bytes visible
        2 => 1252,
        77 => 10000,
        78 => 10001,
        128 => 932,
        129 => 949,
        130 => 1361,
        134 => 936,
        136 => 950,
        161 => 1253,
        162 => 1254,
        163 => 1258,
        177 => 1255,
        178 => 1256,
        186 => 1257,
        204 => 1251,
        222 => 874,
        238 => 1250,
        254 => 437,
        255 => 850,
        _ => return CharsetCodepage::DocumentDefault,
    };
    CharsetCodepage::Codepage(codepage)
}

/// Resolve a charset straight to an encoding, or `None` for "document default".
#[inline]
pub fn charset_to_encoding(charset: u8) -> Option<&'static Encoding> {
    match charset_to_codepage(charset) {
        CharsetCodepage::Codepage(cp) => codepage_to_encoding(cp),
        CharsetCodepage::DocumentDefault => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_codepages() {
        assert_eq!(codepage_to_encoding(1252), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(codepage_to_encoding(932), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(codepage_to_encoding(4242), None);
    }

    #[test]
    fn test_charset_mapping() {
        assert_eq!(charset_to_codepage(0), CharsetCodepage::Codepage(1252));
        assert_eq!(charset_to_codepage(1), CharsetCodepage::DocumentDefault);
        assert_eq!(charset_to_codepage(134), CharsetCodepage::Codepage(936));
        assert_eq!(charset_to_encoding(204), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(charset_to_encoding(1), None);
        assert_eq!(charset_to_encoding(99), None);
    }
}
