//! Document tree.
//!
//! The tree is built in two phases. While parsing, a [`TreeBuilder`] owns an
//! arena of nodes and the *open path*: the chain of nodes, from the document
//! root down, that may still receive children. Leaving the open path seals a
//! node; there is no other way to obtain an insertion point, so a sealed node
//! can never be mutated by the builder. After the fix-up passes the arena is
//! compacted into an immutable [`Tree`], traversed through [`NodeRef`].

use super::attrs::AttrSet;
use super::bookmark::Bookmark;
use super::field::Field;
use super::object::EmbeddedObject;
use super::picture::Picture;
use super::shape::Shape;
use super::types::{ParagraphFormat, Run};

/// Index of a node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which pages a header or footer applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterKind {
    /// `\header` / `\footer`
    All,
    /// `\headerl` / `\footerl`
    Left,
    /// `\headerr` / `\footerr`
    Right,
    /// `\headerf` / `\footerf`
    First,
}

/// Named containers grouping part of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `\fldinst`, the field instruction text
    FieldInstruction,
    /// `\fldrslt`, the displayed field result
    FieldResult,
    /// `\result`, the rendering of an embedded object
    ObjectResult,
    /// `\shptxt`, the text of a text box
    ShapeText,
    /// `\footnote`
    Footnote,
}

impl ContainerKind {
    /// Whether the container holds paragraphs rather than inline content.
    #[inline]
    pub fn is_block(self) -> bool {
        matches!(self, Self::ShapeText | Self::Footnote)
    }
}

/// Row coordinates of a reconstructed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    /// Row index within the table
    pub row: usize,
    /// Column index within the table
    pub column: usize,
}

/// A reconstructed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableInfo {
    /// Nesting depth, 1 for a top-level table
    pub depth: u8,
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
}

/// A table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Row {
    /// Nesting depth, 1 for a top-level table
    pub depth: u8,
    /// Row index within its table
    pub index: usize,
}

/// A table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// First column covered by the cell
    pub column: usize,
    /// Number of columns covered
    pub colspan: usize,
    /// Number of rows covered
    pub rowspan: usize,
    /// Left edge in twips
    pub left: i32,
    /// Right edge in twips
    pub right: i32,
    /// Synthesized to fill a merged or missing position
    pub placeholder: bool,
    /// Origin cell of the merge this cell is covered by
    pub covered_by: Option<CellPos>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            column: 0,
            colspan: 1,
            rowspan: 1,
            left: 0,
            right: 0,
            placeholder: false,
            covered_by: None,
        }
    }
}

impl Cell {
    /// Whether a renderer should skip this cell.
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.covered_by.is_some()
    }
}

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column index
    pub index: usize,
    /// Left edge in twips
    pub left: i32,
    /// Right edge in twips
    pub right: i32,
}

impl Column {
    /// Column width in twips.
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

/// Node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The root
    Document,
    /// A paragraph
    Paragraph(ParagraphFormat),
    /// Formatted text
    TextRun(Run),
    /// `\line`, or a paragraph mark inside inline content
    LineBreak,
    /// `\page`
    PageBreak,
    /// Bookmark start or end marker
    Bookmark(Bookmark),
    /// A picture
    Image(Picture),
    /// An embedded object
    EmbeddedObject(EmbeddedObject),
    /// A field; its instruction and result are child containers
    Field(Field),
    /// A drawing shape
    Shape(Shape),
    /// A group of shapes
    ShapeGroup,
    /// A reconstructed table
    Table(TableInfo),
    /// A table row
    TableRow(Row),
    /// A table cell
    TableCell(Cell),
    /// A table column
    TableColumn(Column),
    /// A header
    Header(HeaderFooterKind),
    /// A footer
    Footer(HeaderFooterKind),
    /// A named container
    Container(ContainerKind),
}

impl NodeKind {
    /// Kind of open-path entry this node occupies, if it can hold children
    /// while being built.
    pub(crate) fn open_kind(&self) -> Option<OpenKind> {
        Some(match self {
            Self::Document => OpenKind::Document,
            Self::Paragraph(_) => OpenKind::Paragraph,
            Self::TableRow(_) => OpenKind::Row,
            Self::TableCell(_) => OpenKind::Cell,
            Self::Field(_) => OpenKind::Field,
            Self::Container(kind) if kind.is_block() => OpenKind::BlockContainer,
            Self::Container(_) => OpenKind::InlineContainer,
            Self::Header(_) | Self::Footer(_) => OpenKind::HeaderFooter,
            Self::Shape(_) => OpenKind::Shape,
            Self::ShapeGroup => OpenKind::ShapeGroup,
            Self::EmbeddedObject(_) => OpenKind::Object,
            Self::Image(_) => OpenKind::Image,
            _ => return None,
        })
    }

    /// Short name used in logs and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Paragraph(_) => "paragraph",
            Self::TextRun(_) => "run",
            Self::LineBreak => "line-break",
            Self::PageBreak => "page-break",
            Self::Bookmark(_) => "bookmark",
            Self::Image(_) => "image",
            Self::EmbeddedObject(_) => "object",
            Self::Field(_) => "field",
            Self::Shape(_) => "shape",
            Self::ShapeGroup => "shape-group",
            Self::Table(_) => "table",
            Self::TableRow(_) => "row",
            Self::TableCell(_) => "cell",
            Self::TableColumn(_) => "column",
            Self::Header(_) => "header",
            Self::Footer(_) => "footer",
            Self::Container(ContainerKind::FieldInstruction) => "field-instruction",
            Self::Container(ContainerKind::FieldResult) => "field-result",
            Self::Container(ContainerKind::ObjectResult) => "object-result",
            Self::Container(ContainerKind::ShapeText) => "shape-text",
            Self::Container(ContainerKind::Footnote) => "footnote",
        }
    }
}

/// Kinds of nodes that can sit on the open path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenKind {
    Document,
    Paragraph,
    Row,
    Cell,
    Field,
    InlineContainer,
    BlockContainer,
    HeaderFooter,
    Shape,
    ShapeGroup,
    Object,
    Image,
}

impl OpenKind {
    const COUNT: usize = 12;

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    /// Flow nodes end at control words, not braces.
    #[inline]
    pub(crate) fn is_flow(self) -> bool {
        matches!(self, Self::Document | Self::Paragraph | Self::Row | Self::Cell)
    }

    /// Containers whose content is paragraphs.
    #[inline]
    pub(crate) fn is_block(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Cell | Self::BlockContainer | Self::HeaderFooter
        )
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) native_level: usize,
    pub(crate) attrs: AttrSet,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, native_level: usize) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            native_level,
            attrs: AttrSet::new(),
        }
    }
}

/// Mutable node storage shared by the builder and the fix-up passes.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    pub(crate) nodes: Vec<Node>,
}

impl Arena {
    fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, 0)],
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Add a detached node.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add a node as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        let id = self.alloc(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Node ids in pre-order, starting at the root.
    pub(crate) fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Drop unreachable nodes and renumber the rest in pre-order.
    pub(crate) fn into_tree(self) -> Tree {
        let order = self.preorder();
        let mut remap = vec![None; self.nodes.len()];
        for (new_index, id) in order.iter().enumerate() {
            remap[id.index()] = Some(NodeId::new(new_index));
        }

        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for id in order {
            let Some(mut node) = slots[id.index()].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|parent| remap[parent.index()]);
            node.children = node
                .children
                .iter()
                .filter_map(|child| remap[child.index()])
                .collect();
            nodes.push(node);
        }
        Tree { nodes }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    id: NodeId,
    kind: OpenKind,
    prev_same_kind: Option<usize>,
}

/// Streaming builder owning the open path.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    arena: Arena,
    open: Vec<OpenEntry>,
    innermost: [Option<usize>; OpenKind::COUNT],
    #[cfg(debug_assertions)]
    is_open: Vec<bool>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        let mut innermost = [None; OpenKind::COUNT];
        innermost[OpenKind::Document.slot()] = Some(0);
        Self {
            arena: Arena::new(),
            open: vec![OpenEntry {
                id: NodeId::ROOT,
                kind: OpenKind::Document,
                prev_same_kind: None,
            }],
            innermost,
            #[cfg(debug_assertions)]
            is_open: vec![true],
        }
    }

    /// The node new content is appended to.
    #[inline]
    pub(crate) fn top(&self) -> NodeId {
        self.open.last().map_or(NodeId::ROOT, |entry| entry.id)
    }

    /// Kind of the node new content is appended to.
    #[inline]
    pub(crate) fn top_kind(&self) -> OpenKind {
        self.open.last().map_or(OpenKind::Document, |entry| entry.kind)
    }

    /// Innermost open node of `kind`.
    #[inline]
    pub(crate) fn innermost(&self, kind: OpenKind) -> Option<NodeId> {
        self.innermost[kind.slot()].map(|position| self.open[position].id)
    }

    /// Depth on the open path of the innermost node of `kind`.
    #[inline]
    pub(crate) fn innermost_position(&self, kind: OpenKind) -> Option<usize> {
        self.innermost[kind.slot()]
    }

    /// Id of the open node at `position` on the open path.
    #[inline]
    pub(crate) fn open_id_at(&self, position: usize) -> NodeId {
        self.open[position].id
    }

    /// Read a node.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    /// Mutate an open node.
    pub(crate) fn open_node_mut(&mut self, id: NodeId) -> &mut Node {
        #[cfg(debug_assertions)]
        debug_assert!(
            self.is_open.get(id.index()).copied().unwrap_or(false),
            "mutation of sealed {} node",
            self.arena.node(id).kind.name()
        );
        self.arena.node_mut(id)
    }

    /// Merge attributes into a node, sealed or not.
    ///
    /// Row definitions arrive after their cells have been sealed; attributes
    /// are not structure, so sealing does not freeze them.
    pub(crate) fn annotate(&mut self, id: NodeId, attrs: &AttrSet) {
        self.arena.node_mut(id).attrs.merge(attrs);
    }

    /// Append a node under the top of the open path and open it.
    pub(crate) fn open(&mut self, kind: NodeKind, level: usize) -> NodeId {
        let Some(open_kind) = kind.open_kind() else {
            return self.leaf(kind, level);
        };
        let id = self.insert(kind, level);
        let position = self.open.len();
        self.open.push(OpenEntry {
            id,
            kind: open_kind,
            prev_same_kind: self.innermost[open_kind.slot()],
        });
        self.innermost[open_kind.slot()] = Some(position);
        #[cfg(debug_assertions)]
        {
            self.is_open.resize(self.arena.nodes.len(), false);
            self.is_open[id.index()] = true;
        }
        id
    }

    /// Append a node under the top of the open path without opening it.
    pub(crate) fn leaf(&mut self, kind: NodeKind, level: usize) -> NodeId {
        self.insert(kind, level)
    }

    fn insert(&mut self, kind: NodeKind, level: usize) -> NodeId {
        let parent = self.top();
        debug_assert!(
            self.arena.node(parent).native_level <= level,
            "{} inserted at level {level} below {} at level {}",
            kind.name(),
            self.arena.node(parent).kind.name(),
            self.arena.node(parent).native_level
        );
        self.arena.append(parent, Node::new(kind, level))
    }

    /// Seal the open node at `position` and everything opened after it.
    pub(crate) fn truncate(&mut self, position: usize) {
        // The root never leaves the open path
        let keep = position.max(1);
        while self.open.len() > keep {
            if let Some(entry) = self.open.pop() {
                self.innermost[entry.kind.slot()] = entry.prev_same_kind;
                #[cfg(debug_assertions)]
                {
                    self.is_open[entry.id.index()] = false;
                }
            }
        }
    }

    /// Seal the innermost node of `kind` and everything opened inside it.
    pub(crate) fn close(&mut self, kind: OpenKind) -> Option<NodeId> {
        let position = self.innermost[kind.slot()]?;
        let id = self.open[position].id;
        self.truncate(position);
        Some(id)
    }

    /// Apply the end of a group that leaves the reader at `level`.
    ///
    /// Group-scoped nodes created deeper than `level` are sealed together with
    /// their descendants; flow nodes are re-anchored to `level`.
    pub(crate) fn group_ended(&mut self, level: usize) {
        let cut = self.open.iter().position(|entry| {
            !entry.kind.is_flow() && self.arena.node(entry.id).native_level > level
        });
        if let Some(position) = cut {
            self.truncate(position);
        }
        for entry in &self.open {
            let node = &mut self.arena.nodes[entry.id.index()];
            if node.native_level > level {
                node.native_level = level;
            }
        }
    }

    /// Seal everything and hand the arena to the fix-up passes.
    pub(crate) fn finish(mut self) -> Arena {
        self.truncate(1);
        self.arena
    }
}

/// Sealed, immutable document tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// The document root.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(|index| NodeRef {
            tree: self,
            id: NodeId::new(index),
        })
    }
}

/// Borrowed handle to a node of a sealed [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    #[inline]
    fn node(&self) -> &'t Node {
        &self.tree.nodes[self.id.index()]
    }

    /// Node id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Node variant.
    #[inline]
    pub fn kind(&self) -> &'t NodeKind {
        &self.node().kind
    }

    /// Parent node; `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Children in document order.
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeRef<'t>> + ExactSizeIterator + use<'t> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Brace level at which the node was created.
    #[inline]
    pub fn native_level(&self) -> usize {
        self.node().native_level
    }

    /// Raw keyword attributes.
    #[inline]
    pub fn attrs(&self) -> &'t AttrSet {
        &self.node().attrs
    }

    /// This node and all its descendants in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'t>> + use<'t> {
        let tree = self.tree;
        let mut stack = vec![self.id];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(tree.nodes[id.index()].children.iter().rev().copied());
            Some(NodeRef { tree, id })
        })
    }

    /// Concatenated run text of the subtree; line breaks become `\n`.
    ///
    /// Field instructions are not part of the visible text and are skipped.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let node = &self.tree.nodes[id.index()];
            match &node.kind {
                NodeKind::TextRun(run) => text.push_str(&run.text),
                NodeKind::LineBreak => text.push('\n'),
                NodeKind::Container(ContainerKind::FieldInstruction) => continue,
                _ => {},
            }
            stack.extend(node.children.iter().rev().copied());
        }
        text
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind().name())
            .field("children", &self.node().children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::types::Formatting;

    fn run(text: &str) -> NodeKind {
        NodeKind::TextRun(Run::new(text, Formatting::default()))
    }

    #[test]
    fn test_open_and_close() {
        let mut builder = TreeBuilder::new();
        let paragraph = builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run("a"), 1);
        assert_eq!(builder.innermost(OpenKind::Paragraph), Some(paragraph));

        assert_eq!(builder.close(OpenKind::Paragraph), Some(paragraph));
        assert_eq!(builder.innermost(OpenKind::Paragraph), None);
        assert_eq!(builder.top(), NodeId::ROOT);
    }

    #[test]
    fn test_innermost_tracks_nesting() {
        let mut builder = TreeBuilder::new();
        let outer = builder.open(NodeKind::TableRow(Row::default()), 1);
        let outer_cell = builder.open(NodeKind::TableCell(Cell::default()), 1);
        let inner = builder.open(NodeKind::TableRow(Row::default()), 1);
        assert_eq!(builder.innermost(OpenKind::Row), Some(inner));

        builder.close(OpenKind::Row);
        assert_eq!(builder.innermost(OpenKind::Row), Some(outer));
        assert_eq!(builder.innermost(OpenKind::Cell), Some(outer_cell));
    }

    #[test]
    fn test_group_end_seals_scoped_nodes_only() {
        let mut builder = TreeBuilder::new();
        let paragraph = builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 2);
        let field = builder.open(NodeKind::Field(Field::default()), 3);
        builder.open(NodeKind::Container(ContainerKind::FieldResult), 4);

        builder.group_ended(3);
        assert_eq!(builder.top(), field);

        builder.group_ended(1);
        assert_eq!(builder.top(), paragraph);
        assert_eq!(builder.node(paragraph).native_level, 1);
    }

    #[test]
    fn test_scoped_node_seals_flow_descendants() {
        let mut builder = TreeBuilder::new();
        let header = builder.open(NodeKind::Header(HeaderFooterKind::All), 2);
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 2);
        builder.group_ended(1);
        assert_eq!(builder.top(), NodeId::ROOT);
        assert_eq!(builder.innermost(OpenKind::Paragraph), None);
        assert_eq!(builder.innermost(OpenKind::HeaderFooter), None);

        let tree = builder.finish().into_tree();
        assert_eq!(tree.get(header).map(|n| n.children().len()), Some(1));
    }

    #[test]
    fn test_traversal_outlives_node_handles() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run("a"), 1);
        builder.close(OpenKind::Paragraph);
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run("b"), 1);
        let tree = builder.finish().into_tree();

        let texts: Vec<String> = tree
            .root()
            .children()
            .flat_map(|paragraph| paragraph.children())
            .map(|run| run.text())
            .collect();
        assert_eq!(texts, ["a", "b"]);

        let runs = tree
            .root()
            .children()
            .flat_map(|paragraph| paragraph.descendants())
            .filter(|node| matches!(node.kind(), NodeKind::TextRun(_)))
            .count();
        assert_eq!(runs, 2);
    }

    #[test]
    fn test_into_tree_drops_detached_nodes() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run("Hello "), 1);
        builder.leaf(NodeKind::LineBreak, 1);
        builder.leaf(run("world"), 1);
        let mut arena = builder.finish();
        arena.alloc(Node::new(run("orphan"), 0));

        let tree = arena.into_tree();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root().text(), "Hello \nworld");

        let paragraph = tree.root().children().next();
        assert!(matches!(paragraph.map(|p| p.kind()), Some(NodeKind::Paragraph(_))));
        let first_run = paragraph.and_then(|p| p.children().next());
        assert_eq!(
            first_run.and_then(|r| r.parent()).map(|p| p.id()),
            paragraph.map(|p| p.id())
        );
        assert_eq!(tree.root().descendants().count(), 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mutation of sealed")]
    fn test_mutating_sealed_node_panics() {
        let mut builder = TreeBuilder::new();
        let paragraph = builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.close(OpenKind::Paragraph);
        builder.open_node_mut(paragraph);
    }
}
