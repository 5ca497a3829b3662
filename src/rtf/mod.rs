//! RTF (Rich Text Format) reader.
//!
//! Parsing is a single streaming pass over the input:
//! - **Lexer**: splits the input into control words, control symbols, text
//!   and group delimiters
//! - **Reader**: tracks brace nesting and the group-scoped state (the
//!   `\uc` fallback count) on top of the lexer
//! - **Parser**: routes tokens to destinations, decodes text and builds the
//!   document tree while keeping the side tables (fonts, colors, lists)
//! - **Passes**: merge adjacent runs and reconstruct tables once the tree is
//!   complete
//!
//! Malformed input is recovered rather than rejected; see [`RtfError`] for
//! the few conditions that do fail.
//!
//! # Example
//!
//! ```rust
//! use rtf_dom::rtf::{NodeKind, RtfDocument};
//!
//! let rtf = r#"{\rtf1\ansi{\fonttbl\f0\fswiss Arial;}{\colortbl;\red255\green0\blue0;}\f0\cf1 Hello\par}"#;
//! let doc = RtfDocument::parse(rtf)?;
//! let run = doc.runs()[0];
//! assert_eq!(run.text(), "Hello");
//! assert_eq!(&*run.formatting.font_name, "Arial");
//! assert!(matches!(doc.root().children().next().map(|n| n.kind()), Some(NodeKind::Paragraph(_))));
//! # Ok::<(), rtf_dom::rtf::RtfError>(())
//! ```

mod attrs;
mod bookmark;
mod border;
#[cfg(feature = "compressed")]
mod compressed;
mod document;
mod error;
mod field;
mod info;
mod keyword;
mod lexer;
mod list;
mod object;
mod options;
mod parser;
mod passes;
mod picture;
mod reader;
mod shape;
mod table;
mod text;
mod tree;
mod types;

pub use attrs::AttrSet;
pub use bookmark::{Bookmark, BookmarkMarker};
pub use border::{Border, BorderSide, BorderStyle, Borders, TabAlignment, TabLeader, TabStop};
#[cfg(feature = "compressed")]
pub use compressed::{decompress, is_compressed_rtf};
pub use document::RtfDocument;
pub use error::{RtfError, RtfResult};
pub use field::{Field, FieldFlags, FieldType};
pub use info::{DocumentInfo, InfoField, InfoTime, PageGeometry, TimeParts};
pub use lexer::{Lexer, Token, TokenKind};
pub use list::{
    List, ListJustification, ListLevel, ListLevelType, ListOverride, ListOverrideTable, ListTable,
};
pub use object::{EmbeddedObject, ObjectKind};
pub use options::{ParseProgress, ParserOptions};
pub use picture::{ImageType, Picture, detect_image_type};
pub use reader::{GroupReader, ParseLayer};
pub use shape::{Shape, ShapeGeometry, ShapeProperty, ShapeType, WrapMode};
pub use table::{
    CellLayout, CellSlot, DEFAULT_CELL_WIDTH, EDGE_TOLERANCE, HorizontalMerge, RowLayout, RowPlan,
    SlotSource, TableLayout, VerticalMerge, group_rows, layout_rows, layout_table,
};
pub use text::TextAccumulator;
pub use tree::{
    Cell, CellPos, Column, ContainerKind, HeaderFooterKind, NodeId, NodeKind, NodeRef, Row,
    TableInfo, Tree,
};
pub use types::{
    Alignment, Color, ColorRef, ColorTable, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, Font,
    FontFamily, FontRef, FontTable, Formatting, Indentation, ListRef, ParagraphFormat, Run,
    Spacing, UnderlineStyle,
};

/// Whether `data` looks like an RTF document (`{\rtf`, after leading
/// whitespace).
///
/// # Examples
///
/// ```rust
/// use rtf_dom::rtf::is_rtf;
///
/// assert!(is_rtf(b"{\\rtf1\\ansi Hello}"));
/// assert!(!is_rtf(b"<html></html>"));
/// ```
pub fn is_rtf(data: &[u8]) -> bool {
    data.trim_ascii_start().starts_with(b"{\\rtf")
}
