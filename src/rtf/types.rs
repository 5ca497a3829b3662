//! RTF document type definitions.

use super::border::{Borders, TabStop};
use crate::common::encoding::{charset_to_encoding, codepage_to_encoding};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Font reference (index into font table).
pub type FontRef = u16;

/// Color reference (index into color table).
pub type ColorRef = u16;

/// Font name used when a run references no usable font.
pub const DEFAULT_FONT_NAME: &str = "Times New Roman";

/// Default font size in half-points (12pt).
pub const DEFAULT_FONT_SIZE: u16 = 24;

/// RTF color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
}

impl Color {
    /// Create a new color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Black color.
    #[inline]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// White color.
    #[inline]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// CSS-style hex notation, e.g. `#ff0000`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Color table containing document colors.
///
/// Entries are addressed by position. An entry of `None` is the "automatic"
/// color, which RTF writers usually emit as the leading empty entry.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: Vec<Option<Color>>,
}

impl ColorTable {
    /// Create a new color table.
    #[inline]
    pub fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Add a color to the table and return its index.
    #[inline]
    pub fn add(&mut self, color: Color) -> ColorRef {
        self.push(Some(color))
    }

    /// Add an automatic entry and return its index.
    #[inline]
    pub fn add_auto(&mut self) -> ColorRef {
        self.push(None)
    }

    fn push(&mut self, entry: Option<Color>) -> ColorRef {
        let index = self.colors.len() as ColorRef;
        self.colors.push(entry);
        index
    }

    /// Get a color by reference; `None` for automatic or missing entries.
    #[inline]
    pub fn get(&self, color_ref: ColorRef) -> Option<Color> {
        self.colors.get(color_ref as usize).copied().flatten()
    }

    /// Resolve a formatting color reference.
    ///
    /// Index 0 without a table entry means automatic (`None`); any other
    /// index beyond the table resolves to black.
    pub fn resolve(&self, color_ref: ColorRef) -> Option<Color> {
        match self.colors.get(color_ref as usize) {
            Some(entry) => *entry,
            None if color_ref == 0 => None,
            None => {
                log::debug!(
                    target: "rtf.parser",
                    "color index {color_ref} outside a table of {} entries, using black",
                    self.colors.len()
                );
                Some(Color::black())
            },
        }
    }

    /// Number of entries, including automatic ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get all entries in the table.
    #[inline]
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }
}

/// Font family categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Nil (unknown or default)
    #[default]
    Nil,
    /// Roman (serif) fonts
    Roman,
    /// Swiss (sans-serif) fonts
    Swiss,
    /// Modern (monospace) fonts
    Modern,
    /// Script fonts
    Script,
    /// Decorative fonts
    Decor,
    /// Technical, symbol, and mathematical fonts
    Tech,
    /// Bidirectional fonts
    Bidi,
}

/// Font definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Index used by `\fN` references
    pub index: FontRef,
    /// Font name (without the trailing semicolon)
    pub name: String,
    /// Font family category
    pub family: FontFamily,
    /// Raw `\fcharset` byte
    pub charset: u8,
    /// Explicit `\cpg` codepage, if any
    pub codepage: Option<u32>,
    /// Pitch (`\fprq`)
    pub pitch: u8,
}

impl Font {
    /// Create a new font with the default charset.
    #[inline]
    pub fn new(index: FontRef, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            family: FontFamily::Nil,
            charset: 0,
            codepage: None,
            pitch: 0,
        }
    }

    /// Whether the entry is a placeholder without a usable name.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Text encoding used for bytes written in this font.
    ///
    /// `None` means "use the document default".
    pub fn encoding(&self) -> Option<&'static Encoding> {
        if let Some(codepage) = self.codepage {
            match codepage_to_encoding(codepage) {
                Some(encoding) => return Some(encoding),
                None => log::debug!(
                    target: "rtf.encoding",
                    "font {} declares unsupported codepage {codepage}",
                    self.index
                ),
            }
        }
        charset_to_encoding(self.charset)
    }
}

/// Font table containing document fonts, ordered by index.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: Vec<Font>,
}

impl FontTable {
    /// Create a new font table.
    #[inline]
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Add a font, replacing any existing entry with the same index.
    pub fn insert(&mut self, font: Font) {
        match self.fonts.binary_search_by_key(&font.index, |f| f.index) {
            Ok(position) => self.fonts[position] = font,
            Err(position) => self.fonts.insert(position, font),
        }
    }

    /// Get a font by reference.
    #[inline]
    pub fn get(&self, font_ref: FontRef) -> Option<&Font> {
        self.fonts
            .binary_search_by_key(&font_ref, |f| f.index)
            .ok()
            .map(|position| &self.fonts[position])
    }

    /// Get all fonts in the table.
    #[inline]
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// Number of fonts.
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left-aligned
    #[default]
    Left,
    /// Right-aligned
    Right,
    /// Centered
    Center,
    /// Justified
    Justify,
    /// Distributed
    Distribute,
}

/// Spacing information for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    /// Space before paragraph (in twips, 1/20th of a point)
    pub before: i32,
    /// Space after paragraph (in twips)
    pub after: i32,
    /// Line spacing (in twips)
    pub line: i32,
    /// Line spacing multiplier
    pub line_multiple: bool,
}

/// Indentation information for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indentation {
    /// Left indent (in twips)
    pub left: i32,
    /// Right indent (in twips)
    pub right: i32,
    /// First line indent (in twips)
    pub first_line: i32,
}

/// Reference from a paragraph to a list override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRef {
    /// `\lsN` override id
    pub override_id: i32,
    /// `\ilvlN` level
    pub level: u8,
}

/// Paragraph properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphFormat {
    /// Text alignment
    pub alignment: Alignment,
    /// Spacing
    pub spacing: Spacing,
    /// Indentation
    pub indentation: Indentation,
    /// Borders
    pub borders: Borders,
    /// Shading color reference (`\cbpat`)
    pub shading: Option<ColorRef>,
    /// Tab stops
    pub tabs: Vec<TabStop>,
    /// List membership
    pub list: Option<ListRef>,
    /// Paragraph belongs to a table (`\intbl`)
    pub in_table: bool,
    /// Table nesting depth (`\itap`), 1 for a top-level table
    pub table_depth: u8,
    /// Outline level (`\outlinelevel`)
    pub outline_level: Option<u8>,
    /// Keep paragraph on one page
    pub keep_together: bool,
    /// Keep with next paragraph
    pub keep_next: bool,
    /// Page break before
    pub page_break_before: bool,
    /// Widow/orphan control
    pub widow_control: bool,
    /// Right-to-left paragraph
    pub right_to_left: bool,
}

impl ParagraphFormat {
    /// Effective table depth: 0 outside tables.
    #[inline]
    pub fn effective_table_depth(&self) -> u8 {
        if self.in_table {
            self.table_depth.max(1)
        } else {
            0
        }
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
    /// Dotted underline
    Dotted,
    /// Dashed underline
    Dashed,
    /// Dash-dot underline
    DashDot,
    /// Dash-dot-dot underline
    DashDotDot,
    /// Word-only underline
    Words,
    /// Thick underline
    Thick,
    /// Wave underline
    Wave,
}

impl UnderlineStyle {
    /// Map an underline control word to its style.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "ul" => Self::Single,
            "uldb" => Self::Double,
            "uld" => Self::Dotted,
            "uldash" | "ulldash" => Self::Dashed,
            "uldashd" => Self::DashDot,
            "uldashdd" => Self::DashDotDot,
            "ulw" => Self::Words,
            "ulth" | "ulthd" | "ulthdash" => Self::Thick,
            "ulwave" | "ululdbwave" => Self::Wave,
            "ulnone" => Self::None,
            _ => return None,
        })
    }
}

/// Resolved character formatting of an emitted run.
///
/// Table references are already resolved: the font is a name and colors are
/// RGB values, so a run stays meaningful without the side tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatting {
    /// Font name
    pub font_name: Arc<str>,
    /// Font size in half-points
    pub font_size: u16,
    /// Foreground color, `None` for automatic
    pub foreground: Option<Color>,
    /// Background/highlight color
    pub background: Option<Color>,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline style
    pub underline: UnderlineStyle,
    /// Strikethrough
    pub strike: bool,
    /// Double strikethrough
    pub double_strike: bool,
    /// Superscript
    pub superscript: bool,
    /// Subscript
    pub subscript: bool,
    /// Small caps
    pub small_caps: bool,
    /// All caps
    pub all_caps: bool,
    /// Hidden text
    pub hidden: bool,
    /// Character spacing (in twips)
    pub char_spacing: i32,
    /// Language id (`\lang`)
    pub language: Option<u16>,
    /// Hyperlink target when the run is part of a hyperlink result
    pub hyperlink: Option<Arc<str>>,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            font_name: Arc::from(DEFAULT_FONT_NAME),
            font_size: DEFAULT_FONT_SIZE,
            foreground: None,
            background: None,
            bold: false,
            italic: false,
            underline: UnderlineStyle::default(),
            strike: false,
            double_strike: false,
            superscript: false,
            subscript: false,
            small_caps: false,
            all_caps: false,
            hidden: false,
            char_spacing: 0,
            language: None,
            hyperlink: None,
        }
    }
}

impl Formatting {
    /// Font size in points.
    #[inline]
    pub fn font_size_points(&self) -> f32 {
        f32::from(self.font_size) / 2.0
    }
}

/// A text run with formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Text content
    pub text: String,
    /// Character formatting
    pub formatting: Formatting,
}

impl Run {
    /// Create a new run.
    #[inline]
    pub fn new(text: impl Into<String>, formatting: Formatting) -> Self {
        Self {
            text: text.into(),
            formatting,
        }
    }

    /// Get the text content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if this run is bold.
    #[inline]
    pub fn bold(&self) -> bool {
        self.formatting.bold
    }

    /// Check if this run is italic.
    #[inline]
    pub fn italic(&self) -> bool {
        self.formatting.italic
    }

    /// Check if this run has strikethrough.
    #[inline]
    pub fn strikethrough(&self) -> bool {
        self.formatting.strike || self.formatting.double_strike
    }

    /// Check if this run has underline.
    #[inline]
    pub fn underline(&self) -> bool {
        !matches!(self.formatting.underline, UnderlineStyle::None)
    }

    /// Hyperlink target of the run, if any.
    #[inline]
    pub fn hyperlink(&self) -> Option<&str> {
        self.formatting.hyperlink.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_table_resolution() {
        let mut table = ColorTable::new();
        table.add_auto();
        table.add(Color::new(255, 0, 0));
        table.add(Color::new(0, 0, 255));

        assert_eq!(table.resolve(0), None);
        assert_eq!(table.resolve(1), Some(Color::new(255, 0, 0)));
        assert_eq!(table.resolve(999), Some(Color::black()));
        assert_eq!(ColorTable::new().resolve(0), None);
    }

    #[test]
    fn test_font_table_sparse_indices() {
        let mut table = FontTable::new();
        table.insert(Font::new(31507, "Calibri"));
        table.insert(Font::new(0, "Arial"));
        table.insert(Font::new(0, "Arial Black"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).map(|f| f.name.as_str()), Some("Arial Black"));
        assert_eq!(table.get(31507).map(|f| f.name.as_str()), Some("Calibri"));
        assert!(table.get(1).is_none());
    }

    #[test]
    fn test_font_encoding() {
        let mut font = Font::new(0, "MS Mincho");
        font.charset = 128;
        assert_eq!(font.encoding(), Some(encoding_rs::SHIFT_JIS));

        font.charset = 1;
        assert_eq!(font.encoding(), None);

        font.codepage = Some(1251);
        assert_eq!(font.encoding(), Some(encoding_rs::WINDOWS_1251));
    }

    #[test]
    fn test_table_depth() {
        let mut format = ParagraphFormat::default();
        assert_eq!(format.effective_table_depth(), 0);
        format.table_depth = 2;
        assert_eq!(format.effective_table_depth(), 0);
        format.in_table = true;
        assert_eq!(format.effective_table_depth(), 2);
        format.table_depth = 0;
        assert_eq!(format.effective_table_depth(), 1);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::new(255, 0, 16).to_hex(), "#ff0010");
    }
}
