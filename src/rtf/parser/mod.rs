//! Semantic parser.
//!
//! One pass over the token stream builds the document tree and the side
//! tables (fonts, colors, lists, metadata). Group-scoped state lives in a
//! stack of [`Frame`]s that mirrors the reader's nesting, so nesting depth is
//! bounded by [`ParserOptions::max_depth`] rather than by the call stack.
//!
//! All mutable parse state belongs to one [`Parser`] value; parsing the same
//! input twice never shares anything.

mod control;
mod destination;
mod html;
mod table;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use encoding_rs::Encoding;

use super::bookmark::BookmarkMarker;
use super::document::RtfDocument;
use super::error::{RtfError, RtfResult};
use super::info::{DocumentInfo, InfoField, InfoTime, PageGeometry, TimeParts};
use super::lexer::{Token, TokenKind};
use super::list::{List, ListLevel, ListOverride, ListOverrideTable, ListTable};
use super::options::{ParseProgress, ParserOptions};
use super::passes;
use super::picture::{HexDecoder, Picture};
use super::reader::GroupReader;
use super::text::TextAccumulator;
use super::tree::{NodeId, NodeKind, OpenKind, TreeBuilder};
use super::types::{
    ColorRef, ColorTable, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, Font, FontRef, FontTable,
    Formatting, ParagraphFormat, Run, UnderlineStyle,
};
use crate::common::encoding::codepage_to_encoding;
use table::{BorderTarget, PendingTab, RowDefinitions};

/// Progress callback invoked every [`ParserOptions::progress_interval`] tokens.
pub(crate) type ProgressCallback<'c> = &'c mut dyn FnMut(&mut ParseProgress);

/// Where the text and control words of a group go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Destination {
    /// Document content
    Body,
    /// Content of a `\fldinst` group; parsed into a field when the group ends
    FieldInstruction,
    FontTable,
    /// A `{...}` entry inside the font table
    FontEntry,
    ColorTable,
    ListTable,
    List,
    ListLevel,
    ListOverrideTable,
    ListOverride,
    Info,
    InfoTime(InfoTime),
    /// Plain text collected and committed when the group ends
    Collect(Collect),
    Picture,
    Object,
    ObjectData,
    ShapeProperty,
    HtmlTag,
    Skip,
}

/// Targets for collected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Collect {
    LevelText,
    LevelNumbers,
    ListName,
    InfoText(InfoField),
    Generator,
    ObjectClass,
    ObjectName,
    ShapePropertyName,
    ShapePropertyValue,
    Bookmark(BookmarkMarker),
}

impl Destination {
    fn is_body(self) -> bool {
        matches!(self, Self::Body | Self::FieldInstruction)
    }

    fn is_payload(self) -> bool {
        matches!(self, Self::Picture | Self::ObjectData)
    }
}

/// Character formatting as written, before table references are resolved.
#[derive(Debug, Clone)]
pub(super) struct CharState {
    font: Option<FontRef>,
    associated_font: Option<FontRef>,
    font_size: u16,
    foreground: Option<ColorRef>,
    background: Option<ColorRef>,
    bold: bool,
    italic: bool,
    underline: UnderlineStyle,
    strike: bool,
    double_strike: bool,
    superscript: bool,
    subscript: bool,
    small_caps: bool,
    all_caps: bool,
    hidden: bool,
    char_spacing: i32,
    language: Option<u16>,
    hyperlink: Option<Arc<str>>,
    html_suppressed: bool,
}

impl Default for CharState {
    fn default() -> Self {
        Self {
            font: None,
            associated_font: None,
            font_size: DEFAULT_FONT_SIZE,
            foreground: None,
            background: None,
            bold: false,
            italic: false,
            underline: UnderlineStyle::None,
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
            html_suppressed: false,
        }
    }
}

impl CharState {
    /// `\plain`: reset character formatting, keeping the hyperlink and HTML
    /// suppression that belong to the enclosing structure.
    fn reset(&mut self) {
        *self = Self {
            hyperlink: self.hyperlink.take(),
            html_suppressed: self.html_suppressed,
            ..Self::default()
        };
    }
}

/// State of one open group.
#[derive(Debug, Clone)]
struct Frame {
    destination: Destination,
    /// Whether this group introduced `destination` (as opposed to inheriting it)
    owns_destination: bool,
    chars: CharState,
    /// Ambient paragraph format to restore when a block container group ends
    saved_paragraph: Option<ParagraphFormat>,
    /// Node opened by this group's destination word
    node: Option<NodeId>,
}

impl Frame {
    fn root() -> Self {
        Self {
            destination: Destination::Body,
            owns_destination: false,
            chars: CharState::default(),
            saved_paragraph: None,
            node: None,
        }
    }

    fn child(&self) -> Self {
        let (destination, owns_destination) = match self.destination {
            Destination::FontTable => (Destination::FontEntry, true),
            other => (other, false),
        };
        Self {
            destination,
            owns_destination,
            chars: self.chars.clone(),
            saved_paragraph: None,
            node: None,
        }
    }
}

/// Document-level character set (`\ansi`, `\mac`, `\pc`, `\pca`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentCharset {
    Ansi,
    Mac,
    Pc,
    Pca,
}

/// Color table entry under construction.
#[derive(Debug, Clone, Copy, Default)]
struct PendingColor {
    red: u8,
    green: u8,
    blue: u8,
    defined: bool,
}

/// Shape property under construction.
#[derive(Debug, Default)]
struct PendingProperty {
    name: String,
    value: String,
}

/// Per-parse state.
pub(crate) struct Parser<'a, 'c> {
    reader: GroupReader<'a>,
    options: ParserOptions,
    progress: Option<ProgressCallback<'c>>,
    tokens: usize,

    frames: Vec<Frame>,
    text: TextAccumulator,
    tree: TreeBuilder,
    html: Option<String>,

    fonts: FontTable,
    colors: ColorTable,
    lists: ListTable,
    list_overrides: ListOverrideTable,
    info: DocumentInfo,
    page: PageGeometry,
    generator: Option<String>,

    charset: DocumentCharset,
    codepage: Option<u32>,
    default_font: Option<FontRef>,
    document_encoding: &'static Encoding,
    font_name: Option<Arc<str>>,

    paragraph: ParagraphFormat,
    list_level: u8,
    tab: PendingTab,
    border: BorderTarget,
    rows: RowDefinitions,

    scratch: String,
    payload: Vec<u8>,
    hex: HexDecoder,
    pending_font: Option<Font>,
    pending_color: PendingColor,
    pending_list: Option<List>,
    pending_level: Option<ListLevel>,
    pending_override: Option<ListOverride>,
    pending_picture: Picture,
    pending_property: PendingProperty,
    time: TimeParts,
}

impl<'a, 'c> Parser<'a, 'c> {
    pub(crate) fn new(
        input: &'a str,
        options: &ParserOptions,
        progress: Option<ProgressCallback<'c>>,
    ) -> Self {
        Self {
            reader: GroupReader::new(input),
            options: *options,
            progress,
            tokens: 0,
            frames: vec![Frame::root()],
            text: TextAccumulator::new(),
            tree: TreeBuilder::new(),
            html: None,
            fonts: FontTable::new(),
            colors: ColorTable::new(),
            lists: ListTable::default(),
            list_overrides: ListOverrideTable::default(),
            info: DocumentInfo::default(),
            page: PageGeometry::default(),
            generator: None,
            charset: DocumentCharset::Ansi,
            codepage: None,
            default_font: None,
            document_encoding: options.default_encoding,
            font_name: None,
            paragraph: ParagraphFormat::default(),
            list_level: 0,
            tab: PendingTab::default(),
            border: BorderTarget::None,
            rows: RowDefinitions::default(),
            scratch: String::new(),
            payload: Vec::new(),
            hex: HexDecoder::default(),
            pending_font: None,
            pending_color: PendingColor::default(),
            pending_list: None,
            pending_level: None,
            pending_override: None,
            pending_picture: Picture::default(),
            pending_property: PendingProperty::default(),
            time: TimeParts::default(),
        }
    }

    /// Run the parse to completion.
    pub(crate) fn parse(mut self) -> RtfResult<RtfDocument> {
        self.run()?;
        Ok(self.finish())
    }

    fn run(&mut self) -> RtfResult<()> {
        loop {
            let token = self.reader.next();
            self.report_progress()?;
            match token.kind {
                TokenKind::EndOfInput => return Ok(()),
                TokenKind::GroupStart => self.begin_group()?,
                TokenKind::GroupEnd => {
                    if self.reader.hit_stray_close() {
                        log::debug!(target: "rtf.parser", "stopping at unmatched group end");
                        return Ok(());
                    }
                    self.end_group();
                },
                _ => {
                    if let Some(token) = self.reader.filter_fallback(token) {
                        self.dispatch(token);
                    }
                },
            }
        }
    }

    fn report_progress(&mut self) -> RtfResult<()> {
        self.tokens += 1;
        if self.tokens % self.options.progress_interval.max(1) != 0 {
            return Ok(());
        }
        let Some(callback) = self.progress.as_deref_mut() else {
            return Ok(());
        };
        let mut progress = ParseProgress {
            position: self.reader.position(),
            length: self.reader.len(),
            cancel: false,
        };
        callback(&mut progress);
        if progress.cancel {
            log::debug!(target: "rtf.parser", "cancelled at byte {}", progress.position);
            return Err(RtfError::Cancelled {
                position: progress.position,
            });
        }
        Ok(())
    }

    fn dispatch(&mut self, token: Token<'a>) {
        match token.kind {
            TokenKind::Text => self.push_text(token.key),
            TokenKind::ControlSymbol => self.control_symbol(token),
            TokenKind::Keyword | TokenKind::ExtensionKeyword => self.control_word(token),
            TokenKind::Binary => self.push_binary(token.key),
            TokenKind::GroupStart | TokenKind::GroupEnd | TokenKind::EndOfInput => {},
        }
    }

    /// Nesting level of the innermost open frame.
    #[inline]
    fn level(&self) -> usize {
        self.frames.len() - 1
    }

    #[inline]
    fn frame(&self) -> &Frame {
        // The root frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    fn frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    #[inline]
    fn chars_mut(&mut self) -> &mut CharState {
        &mut self.frame_mut().chars
    }

    fn begin_group(&mut self) -> RtfResult<()> {
        self.flush_text();
        let depth = self.reader.level();
        if depth > self.options.max_depth {
            return Err(RtfError::NestingTooDeep {
                depth,
                limit: self.options.max_depth,
            });
        }
        let child = self.frame().child();
        self.frames.push(child);
        Ok(())
    }

    fn end_group(&mut self) {
        self.flush_text();
        self.close_frame();
    }

    fn close_frame(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let level = self.level();
        if frame.owns_destination {
            self.finish_destination(&frame, level + 1);
        }
        self.tree.group_ended(level);
        if let Some(saved) = frame.saved_paragraph {
            self.paragraph = saved;
        }
    }

    /// Skip the rest of the current group.
    fn skip_group(&mut self) {
        self.text.clear();
        if self.level() == 0 {
            return;
        }
        self.frame_mut().destination = Destination::Skip;
        self.reader.skip_to_group_end();
    }

    fn finish(mut self) -> RtfDocument {
        self.flush_text();
        if self.frames.len() > 1 {
            log::debug!(
                target: "rtf.parser",
                "input ended with {} open groups",
                self.frames.len() - 1
            );
        }
        while self.frames.len() > 1 {
            self.close_frame();
        }

        let mut arena = self.tree.finish();
        passes::coalesce_runs(&mut arena);
        passes::build_tables(&mut arena);
        let tree = arena.into_tree();
        log::debug!(
            target: "rtf.parser",
            "parsed {} tokens into {} nodes",
            self.tokens,
            tree.len()
        );

        RtfDocument {
            tree,
            fonts: self.fonts,
            colors: self.colors,
            lists: self.lists,
            list_overrides: self.list_overrides,
            info: self.info,
            page: self.page,
            generator: self.generator,
            codepage: self.codepage,
            html: self.html,
        }
    }

    // Text

    /// Encoding for bytes written in the current context.
    fn encoding(&self) -> &'static Encoding {
        let frame = self.frame();
        if matches!(
            frame.destination,
            Destination::FontTable | Destination::FontEntry
        ) {
            return self
                .pending_font
                .as_ref()
                .and_then(Font::encoding)
                .unwrap_or(self.document_encoding);
        }
        let font_encoding =
            |font: Option<FontRef>| font.and_then(|f| self.fonts.get(f)).and_then(Font::encoding);
        font_encoding(frame.chars.font.or(self.default_font))
            .or_else(|| font_encoding(frame.chars.associated_font))
            .unwrap_or(self.document_encoding)
    }

    fn update_document_encoding(&mut self) {
        let declared = self.codepage.or(match self.charset {
            DocumentCharset::Ansi => None,
            DocumentCharset::Mac => Some(10000),
            DocumentCharset::Pc => Some(437),
            DocumentCharset::Pca => Some(850),
        });
        self.document_encoding = match declared {
            Some(codepage) => codepage_to_encoding(codepage).unwrap_or_else(|| {
                log::debug!(
                    target: "rtf.encoding",
                    "unsupported codepage {codepage}, using {}",
                    self.options.default_encoding.name()
                );
                self.options.default_encoding
            }),
            None => self.options.default_encoding,
        };
    }

    fn push_text(&mut self, text: &str) {
        let destination = self.frame().destination;
        if destination.is_payload() {
            self.hex.feed(text, &mut self.payload);
            return;
        }
        if destination == Destination::Skip {
            return;
        }
        let encoding = self.encoding();
        self.text.push_str(text, encoding);
    }

    fn push_char(&mut self, ch: char) {
        let encoding = self.encoding();
        self.text.push_char(ch, encoding);
    }

    fn push_byte(&mut self, byte: u8) {
        if self.frame().destination.is_payload() {
            self.payload.push(byte);
        } else {
            self.text.push_byte(byte);
        }
    }

    fn push_binary(&mut self, data: &str) {
        if !self.frame().destination.is_payload() {
            log::trace!(target: "rtf.parser", "dropping {} bytes of binary data", data.len());
            return;
        }
        for ch in data.chars() {
            match u8::try_from(u32::from(ch)) {
                Ok(byte) => self.payload.push(byte),
                Err(_) => {
                    let mut buffer = [0; 4];
                    self.payload
                        .extend_from_slice(ch.encode_utf8(&mut buffer).as_bytes());
                },
            }
        }
    }

    /// Decode pending text and hand it to the current destination.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let encoding = self.encoding();
        let text = self.text.take(encoding);
        if text.is_empty() {
            return;
        }

        match self.frame().destination {
            Destination::Body | Destination::FieldInstruction => self.emit_text(text),
            Destination::HtmlTag => {
                if let Some(html) = self.html.as_mut() {
                    html.push_str(&text);
                }
            },
            Destination::FontTable | Destination::FontEntry => self.font_name_text(&text),
            Destination::ColorTable => self.color_separators(&text),
            Destination::Collect(_) => self.scratch.push_str(&text),
            other => {
                log::trace!(target: "rtf.parser", "dropping text in {other:?}: {text:?}");
            },
        }
    }

    fn emit_text(&mut self, text: String) {
        if let Some(html) = self.html.as_mut() {
            if !self.frames[self.frames.len() - 1].chars.html_suppressed {
                html.push_str(&text);
            }
            return;
        }

        let level = self.level();
        if !self.ensure_inline(level) {
            log::trace!(target: "rtf.parser", "no inline parent for {text:?}");
            return;
        }
        let formatting = self.formatting();
        self.tree.leaf(NodeKind::TextRun(Run::new(text, formatting)), level);
    }

    /// Resolve the current character state against the side tables.
    fn formatting(&mut self) -> Formatting {
        let chars = &self.frames[self.frames.len() - 1].chars;
        let name = chars
            .font
            .and_then(|f| self.fonts.get(f))
            .or_else(|| self.default_font.and_then(|f| self.fonts.get(f)))
            .filter(|font| !font.is_nil())
            .map_or(DEFAULT_FONT_NAME, |font| font.name.as_str());
        let font_name = match &self.font_name {
            Some(cached) if cached.as_ref() == name => Arc::clone(cached),
            _ => {
                let fresh: Arc<str> = Arc::from(name);
                self.font_name = Some(Arc::clone(&fresh));
                fresh
            },
        };

        let chars = &self.frames[self.frames.len() - 1].chars;
        Formatting {
            font_name,
            font_size: chars.font_size,
            foreground: chars.foreground.and_then(|c| self.colors.resolve(c)),
            background: chars.background.and_then(|c| self.colors.resolve(c)),
            bold: chars.bold,
            italic: chars.italic,
            underline: chars.underline,
            strike: chars.strike,
            double_strike: chars.double_strike,
            superscript: chars.superscript,
            subscript: chars.subscript,
            small_caps: chars.small_caps,
            all_caps: chars.all_caps,
            hidden: chars.hidden,
            char_spacing: chars.char_spacing,
            language: chars.language,
            hyperlink: chars.hyperlink.clone(),
        }
    }

    // Structure

    /// Make sure inline content has a parent, opening the paragraph and any
    /// table rows and cells the ambient paragraph format asks for.
    ///
    /// Returns `false` when the current position cannot hold inline content.
    fn ensure_inline(&mut self, level: usize) -> bool {
        loop {
            match self.tree.top_kind() {
                OpenKind::Paragraph | OpenKind::Field | OpenKind::InlineContainer => return true,
                OpenKind::Row => {
                    if self.paragraph.effective_table_depth() < self.table_depth() {
                        self.tree.close(OpenKind::Row);
                    } else {
                        self.open_cell(level);
                    }
                },
                kind if kind.is_block() => {
                    if self.sync_table_depth(level) {
                        continue;
                    }
                    self.tree
                        .open(NodeKind::Paragraph(self.paragraph.clone()), level);
                    return true;
                },
                // Shapes, shape groups, objects and images
                _ => return false,
            }
        }
    }

    /// Position on the open path of the innermost block context.
    fn context_position(&self) -> usize {
        [
            OpenKind::Cell,
            OpenKind::BlockContainer,
            OpenKind::HeaderFooter,
        ]
        .into_iter()
        .filter_map(|kind| self.tree.innermost_position(kind))
        .max()
        .unwrap_or(0)
    }

    /// Seal the open paragraph of the current block context with the ambient
    /// paragraph format.
    fn seal_paragraph(&mut self) {
        let Some(position) = self.tree.innermost_position(OpenKind::Paragraph) else {
            return;
        };
        if position < self.context_position() {
            return;
        }
        let id = self.tree.open_id_at(position);
        if let NodeKind::Paragraph(format) = &mut self.tree.open_node_mut(id).kind {
            *format = self.paragraph.clone();
        }
        self.tree.truncate(position);
    }

    /// `\par`
    fn end_paragraph(&mut self) {
        if self.html.is_some() {
            self.push_str_text("\r\n");
            return;
        }
        self.flush_text();
        let level = self.level();
        match self.tree.top_kind() {
            OpenKind::Field | OpenKind::InlineContainer => {
                self.tree.leaf(NodeKind::LineBreak, level);
            },
            _ => {
                if self.ensure_inline(level) {
                    self.seal_paragraph();
                }
            },
        }
    }

    fn push_str_text(&mut self, text: &str) {
        let encoding = self.encoding();
        self.text.push_str(text, encoding);
    }

    /// `\line` and `\page`
    fn inline_break(&mut self, kind: NodeKind) {
        if self.html.is_some() {
            if matches!(kind, NodeKind::LineBreak) {
                self.push_str_text("\r\n");
            }
            return;
        }
        self.flush_text();
        let level = self.level();
        if self.ensure_inline(level) {
            self.tree.leaf(kind, level);
        }
    }

    /// Open a group-scoped node owned by the current frame.
    fn open_scoped(&mut self, kind: NodeKind) -> NodeId {
        let level = self.level();
        let id = self.tree.open(kind, level);
        self.frame_mut().node = Some(id);
        id
    }

    /// Open a block container, giving it a fresh ambient paragraph format.
    fn open_block(&mut self, kind: NodeKind) {
        let saved = std::mem::take(&mut self.paragraph);
        self.frame_mut().saved_paragraph = Some(saved);
        self.open_scoped(kind);
    }

    /// Apply `update` to the innermost open node of `kind`.
    fn update_open(&mut self, kind: OpenKind, update: impl FnOnce(&mut NodeKind)) {
        match self.tree.innermost(kind) {
            Some(id) => update(&mut self.tree.open_node_mut(id).kind),
            None => log::trace!(target: "rtf.parser", "no open {kind:?} to update"),
        }
    }

    /// Concatenated run text below `id`.
    fn subtree_text(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.tree.node(current);
            if let NodeKind::TextRun(run) = &node.kind {
                text.push_str(&run.text);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        text
    }
}
