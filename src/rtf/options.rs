//! Parser configuration and progress reporting.

use crate::common::encoding::codepage_to_encoding;
use encoding_rs::{Encoding, WINDOWS_1252};

/// Options controlling a parse.
///
/// # Examples
///
/// ```rust
/// use rtf_dom::rtf::ParserOptions;
///
/// let options = ParserOptions::new()
///     .with_codepage(1251)
///     .with_max_depth(64);
/// assert_eq!(options.default_encoding.name(), "windows-1251");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Encoding used for byte escapes when the document declares no codepage
    pub default_encoding: &'static Encoding,
    /// Deepest group nesting accepted before the parse fails
    pub max_depth: usize,
    /// Number of tokens between two progress callbacks
    pub progress_interval: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_encoding: WINDOWS_1252,
            max_depth: 256,
            progress_interval: 100,
        }
    }
}

impl ParserOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback encoding.
    #[inline]
    pub fn with_default_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    /// Set the fallback encoding from a Windows codepage number.
    ///
    /// Unknown codepages leave the current encoding unchanged.
    pub fn with_codepage(mut self, codepage: u32) -> Self {
        match codepage_to_encoding(codepage) {
            Some(encoding) => self.default_encoding = encoding,
            None => log::debug!(
                target: "rtf.encoding",
                "unknown codepage {codepage}, keeping {}",
                self.default_encoding.name()
            ),
        }
        self
    }

    /// Set the nesting limit.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set how often progress is reported, in tokens. Zero is treated as one.
    #[inline]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

/// Progress report handed to the progress callback.
///
/// Setting `cancel` stops the parse with [`RtfError::Cancelled`](super::RtfError::Cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseProgress {
    /// Byte offset reached in the input
    pub position: usize,
    /// Total input length in bytes
    pub length: usize,
    /// Set to request cancellation
    pub cancel: bool,
}

impl ParseProgress {
    /// Fraction of the input consumed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.length == 0 {
            1.0
        } else {
            self.position as f64 / self.length as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepage_option() {
        let options = ParserOptions::new().with_codepage(932);
        assert_eq!(options.default_encoding, encoding_rs::SHIFT_JIS);

        let unchanged = ParserOptions::new().with_codepage(12345);
        assert_eq!(unchanged.default_encoding, WINDOWS_1252);
    }

    #[test]
    fn test_progress_fraction() {
        let progress = ParseProgress { position: 25, length: 100, cancel: false };
        assert!((progress.fraction() - 0.25).abs() < f64::EPSILON);
        let empty = ParseProgress { position: 0, length: 0, cancel: false };
        assert!((empty.fraction() - 1.0).abs() < f64::EPSILON);
    }
}
