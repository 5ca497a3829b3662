//! RTF document representation.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use super::bookmark::Bookmark;
use super::error::RtfResult;
use super::info::{DocumentInfo, PageGeometry};
use super::list::{ListOverrideTable, ListTable};
use super::options::{ParseProgress, ParserOptions};
use super::parser::Parser;
use super::picture::Picture;
use super::tree::{ContainerKind, NodeKind, NodeRef, Tree};
use super::types::{ColorTable, FontTable, Run};

/// A parsed RTF document.
///
/// The body is a [`Tree`] of paragraphs, runs, tables, fields, pictures and
/// other nodes; the side tables (fonts, colors, lists) and document metadata
/// are kept next to it.
#[derive(Debug, Clone)]
pub struct RtfDocument {
    pub(crate) tree: Tree,
    pub(crate) fonts: FontTable,
    pub(crate) colors: ColorTable,
    pub(crate) lists: ListTable,
    pub(crate) list_overrides: ListOverrideTable,
    pub(crate) info: DocumentInfo,
    pub(crate) page: PageGeometry,
    pub(crate) generator: Option<String>,
    pub(crate) codepage: Option<u32>,
    pub(crate) html: Option<String>,
}

impl RtfDocument {
    /// Parse an RTF document from a string.
    ///
    /// Malformed input never fails: the parser recovers and keeps what it
    /// can. The only error is group nesting deeper than
    /// [`ParserOptions::max_depth`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rtf_dom::rtf::RtfDocument;
    ///
    /// let rtf = r#"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello World!\par}"#;
    /// let doc = RtfDocument::parse(rtf)?;
    /// assert_eq!(doc.text(), "Hello World!");
    /// # Ok::<(), rtf_dom::rtf::RtfError>(())
    /// ```
    pub fn parse(input: &str) -> RtfResult<Self> {
        Self::parse_with(input, &ParserOptions::default(), None)
    }

    /// Parse with explicit options and an optional progress callback.
    ///
    /// The callback runs every [`ParserOptions::progress_interval`] tokens;
    /// setting [`ParseProgress::cancel`] stops the parse with
    /// [`RtfError::Cancelled`](super::RtfError::Cancelled).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rtf_dom::rtf::{ParseProgress, ParserOptions, RtfDocument};
    ///
    /// let options = ParserOptions::new().with_progress_interval(1);
    /// let mut calls = 0;
    /// let mut progress = |_: &mut ParseProgress| calls += 1;
    /// RtfDocument::parse_with(r"{\rtf1 Hi}", &options, Some(&mut progress))?;
    /// assert!(calls > 0);
    /// # Ok::<(), rtf_dom::rtf::RtfError>(())
    /// ```
    pub fn parse_with(
        input: &str,
        options: &ParserOptions,
        progress: Option<&mut dyn FnMut(&mut ParseProgress)>,
    ) -> RtfResult<Self> {
        Parser::new(input, options, progress).parse()
    }

    /// Parse an RTF document from bytes.
    ///
    /// Compressed RTF containers (`LZFu`/`MELA`) are unwrapped first. Bytes
    /// that are not valid UTF-8 are decoded with the default encoding.
    pub fn from_bytes(bytes: &[u8]) -> RtfResult<Self> {
        Self::from_bytes_with(bytes, &ParserOptions::default())
    }

    /// Parse bytes with explicit options.
    pub fn from_bytes_with(bytes: &[u8], options: &ParserOptions) -> RtfResult<Self> {
        #[cfg(feature = "compressed")]
        if super::compressed::is_compressed_rtf(bytes) {
            let raw = super::compressed::decompress(bytes)?;
            return Self::decode_and_parse(&raw, options);
        }
        Self::decode_and_parse(bytes, options)
    }

    fn decode_and_parse(bytes: &[u8], options: &ParserOptions) -> RtfResult<Self> {
        let input = match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => {
                log::debug!(
                    target: "rtf.encoding",
                    "input is not UTF-8, decoding as {}",
                    options.default_encoding.name()
                );
                options.default_encoding.decode_without_bom_handling(bytes).0
            },
        };
        Self::parse_with(&input, options, None)
    }

    /// Read and parse an RTF document.
    pub fn from_reader<R: Read>(mut reader: R) -> RtfResult<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Parse an RTF file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rtf_dom::rtf::RtfDocument;
    ///
    /// let doc = RtfDocument::open("document.rtf")?;
    /// println!("{}", doc.text());
    /// # Ok::<(), rtf_dom::rtf::RtfError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> RtfResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The document tree.
    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The document root.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        self.tree.root()
    }

    /// Font table.
    #[inline]
    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    /// Color table.
    #[inline]
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// List definitions.
    #[inline]
    pub fn lists(&self) -> &ListTable {
        &self.lists
    }

    /// List overrides referenced by paragraphs.
    #[inline]
    pub fn list_overrides(&self) -> &ListOverrideTable {
        &self.list_overrides
    }

    /// `\info` metadata.
    #[inline]
    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Page setup.
    #[inline]
    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    /// Producing application (`\generator`).
    #[inline]
    pub fn generator(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    /// Declared ANSI codepage (`\ansicpg`).
    #[inline]
    pub fn codepage(&self) -> Option<u32> {
        self.codepage
    }

    /// Whether the document encapsulates HTML (`\fromhtml`).
    #[inline]
    pub fn is_html(&self) -> bool {
        self.html.is_some()
    }

    /// The HTML recovered from a `\fromhtml` document.
    ///
    /// Such documents carry no tree content; the HTML is the payload.
    #[inline]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Plain text of the body.
    ///
    /// Paragraphs end with `\n`, cells of a row are separated by `\t`.
    /// Headers, footers and field instructions are left out.
    pub fn text(&self) -> String {
        let mut text = String::new();
        write_text(self.tree.root(), &mut text);
        let trimmed = text.trim_end_matches('\n').len();
        text.truncate(trimmed);
        text
    }

    /// All paragraphs in document order, including those in tables and
    /// containers.
    pub fn paragraphs(&self) -> Vec<NodeRef<'_>> {
        self.nodes_where(|kind| matches!(kind, NodeKind::Paragraph(_)))
    }

    /// All text runs in document order.
    pub fn runs(&self) -> Vec<&Run> {
        self.tree
            .iter()
            .filter_map(|node| match node.kind() {
                NodeKind::TextRun(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    /// All tables, outer tables before the tables nested in them.
    pub fn tables(&self) -> Vec<NodeRef<'_>> {
        self.nodes_where(|kind| matches!(kind, NodeKind::Table(_)))
    }

    /// All pictures.
    pub fn images(&self) -> Vec<&Picture> {
        self.tree
            .iter()
            .filter_map(|node| match node.kind() {
                NodeKind::Image(picture) => Some(picture),
                _ => None,
            })
            .collect()
    }

    /// All fields; each node holds the instruction and result containers.
    pub fn fields(&self) -> Vec<NodeRef<'_>> {
        self.nodes_where(|kind| matches!(kind, NodeKind::Field(_)))
    }

    /// All bookmark markers.
    pub fn bookmarks(&self) -> Vec<&Bookmark> {
        self.tree
            .iter()
            .filter_map(|node| match node.kind() {
                NodeKind::Bookmark(bookmark) => Some(bookmark),
                _ => None,
            })
            .collect()
    }

    fn nodes_where(&self, predicate: impl Fn(&NodeKind) -> bool) -> Vec<NodeRef<'_>> {
        self.tree
            .iter()
            .filter(|node| predicate(node.kind()))
            .collect()
    }
}

fn write_text(node: NodeRef<'_>, out: &mut String) {
    match node.kind() {
        NodeKind::TextRun(run) => out.push_str(&run.text),
        NodeKind::LineBreak | NodeKind::PageBreak => out.push('\n'),
        NodeKind::Header(_)
        | NodeKind::Footer(_)
        | NodeKind::Container(ContainerKind::FieldInstruction) => {},
        NodeKind::Paragraph(_) => {
            node.children().for_each(|child| write_text(child, out));
            out.push('\n');
        },
        NodeKind::TableRow(_) => {
            let mut first = true;
            for cell in node.children() {
                if matches!(cell.kind(), NodeKind::TableCell(c) if c.is_covered()) {
                    continue;
                }
                if !first {
                    out.push('\t');
                }
                first = false;
                let mut cell_text = String::new();
                write_text(cell, &mut cell_text);
                out.push_str(cell_text.trim_end_matches('\n'));
            }
            out.push('\n');
        },
        _ => node.children().for_each(|child| write_text(child, out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_document() {
        let doc = RtfDocument::parse(r"{\rtf1\ansi Hello World!\par}").unwrap();
        assert_eq!(doc.text(), "Hello World!");
        assert_eq!(doc.paragraphs().len(), 1);
    }

    #[test]
    fn test_formatted_text() {
        let doc = RtfDocument::parse(r"{\rtf1\ansi{\b Bold}{\i Italic}\par}").unwrap();
        let runs = doc.runs();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].bold() && !runs[0].italic());
        assert!(runs[1].italic() && !runs[1].bold());
    }

    #[test]
    fn test_table_text() {
        let rtf = r"{\rtf1\ansi\trowd\cellx1000\cellx2000\intbl A\cell B\cell\row\pard After\par}";
        let doc = RtfDocument::parse(rtf).unwrap();
        assert_eq!(doc.text(), "A\tB\nAfter");
        assert_eq!(doc.tables().len(), 1);
    }

    #[test]
    fn test_from_bytes_falls_back_to_default_encoding() {
        let doc = RtfDocument::from_bytes(b"{\\rtf1\\ansi caf\xe9\\par}").unwrap();
        assert_eq!(doc.text(), "caf\u{e9}");
    }

    #[test]
    fn test_from_reader() {
        let input: &[u8] = b"{\\rtf1 Hi}";
        let doc = RtfDocument::from_reader(input).unwrap();
        assert_eq!(doc.text(), "Hi");
    }
}
