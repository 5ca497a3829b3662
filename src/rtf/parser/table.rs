//! Row and cell boundaries.
//!
//! Rows and cells are opened lazily as paragraph content arrives, closed by
//! `\cell`/`\row` (or their nested forms), and annotated with the row
//! definition (`\trowd ... \cellx`) in effect when the row ends. Column
//! layout and merges are resolved afterwards by the table pass.

use super::super::attrs::{self, AttrSet};
use super::super::border::{BorderSide, BorderStyle, TabAlignment, TabLeader};
use super::super::keyword::TableMark;
use super::super::tree::{Cell, NodeId, NodeKind, OpenKind, Row};
use super::Parser;

/// Which border the `\brdr*` words that follow apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BorderTarget {
    None,
    Paragraph(BorderSide),
    Cell(BorderSide),
    /// Row border attribute key (`trbrdrt`, ...)
    Row(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(super) enum BorderProperty {
    Style(BorderStyle),
    Width(i32),
    Color(i32),
    Space(i32),
}

/// Tab alignment and leader waiting for their `\tx`.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct PendingTab {
    pub(super) alignment: TabAlignment,
    pub(super) leader: TabLeader,
}

#[derive(Debug, Clone, Default)]
struct RowDefinition {
    attrs: AttrSet,
    /// One entry per `\cellx`
    cells: Vec<AttrSet>,
    /// Cell attributes seen since the last `\cellx`
    pending: AttrSet,
}

/// Row definitions by nesting depth (index 0 is depth 1).
#[derive(Debug, Default)]
pub(super) struct RowDefinitions {
    by_depth: Vec<RowDefinition>,
}

impl RowDefinitions {
    fn get_mut(&mut self, depth: u8) -> &mut RowDefinition {
        let index = usize::from(depth.max(1)) - 1;
        if self.by_depth.len() <= index {
            self.by_depth.resize_with(index + 1, RowDefinition::default);
        }
        &mut self.by_depth[index]
    }

    fn get(&self, depth: u8) -> Option<&RowDefinition> {
        self.by_depth.get(usize::from(depth.max(1)) - 1)
    }
}

fn cell_border_keys(side: BorderSide) -> (&'static str, &'static str, &'static str) {
    match side {
        BorderSide::Top | BorderSide::Box => ("clbrdrt", "clbrdrt_w", "clbrdrt_cf"),
        BorderSide::Bottom => ("clbrdrb", "clbrdrb_w", "clbrdrb_cf"),
        BorderSide::Left => ("clbrdrl", "clbrdrl_w", "clbrdrl_cf"),
        BorderSide::Right => ("clbrdrr", "clbrdrr_w", "clbrdrr_cf"),
    }
}

impl Parser<'_, '_> {
    /// Depth whose row definition `\trowd`, `\cellx` and row/cell words edit.
    fn definition_depth(&self) -> u8 {
        self.paragraph.effective_table_depth().max(1)
    }

    /// Nesting depth of the innermost open row in the current context.
    ///
    /// A row outside the innermost block container (footnote, text box,
    /// header) does not count: tables inside the container start over.
    pub(super) fn table_depth(&self) -> u8 {
        let Some(row) = self.tree.innermost_position(OpenKind::Row) else {
            return 0;
        };
        let context = [OpenKind::BlockContainer, OpenKind::HeaderFooter]
            .into_iter()
            .filter_map(|kind| self.tree.innermost_position(kind))
            .max();
        if context.is_some_and(|context| context > row) {
            return 0;
        }
        match &self.tree.node(self.tree.open_id_at(row)).kind {
            NodeKind::TableRow(row) => row.depth,
            _ => 0,
        }
    }

    fn open_row(&mut self, depth: u8, level: usize) {
        log::trace!(target: "rtf.table", "opening row at depth {depth}");
        self.tree.open(NodeKind::TableRow(Row { depth, index: 0 }), level);
    }

    pub(super) fn open_cell(&mut self, level: usize) {
        self.tree.open(NodeKind::TableCell(Cell::default()), level);
    }

    /// Open or close one table level toward the paragraph's depth.
    ///
    /// Returns `false` when the open rows already match.
    pub(super) fn sync_table_depth(&mut self, level: usize) -> bool {
        let target = self.paragraph.effective_table_depth();
        let current = self.table_depth();
        if target > current {
            self.open_row(current + 1, level);
            self.open_cell(level);
            true
        } else if target < current {
            self.tree.close(OpenKind::Row);
            true
        } else {
            false
        }
    }

    pub(super) fn table_mark(&mut self, mark: TableMark, value: i32) {
        match mark {
            TableMark::RowDefaults => {
                let depth = self.definition_depth();
                *self.rows.get_mut(depth) = RowDefinition::default();
                self.border = BorderTarget::None;
            },
            TableMark::CellRight => {
                let depth = self.definition_depth();
                let definition = self.rows.get_mut(depth);
                let mut cell = std::mem::take(&mut definition.pending);
                cell.set("cellx", value);
                definition.cells.push(cell);
                self.border = BorderTarget::None;
            },
            _ if self.html.is_some() => {},
            TableMark::CellEnd => self.end_cell(1),
            TableMark::NestedCellEnd => self.end_cell(self.paragraph.table_depth.max(2)),
            TableMark::RowEnd => self.end_row(1),
            TableMark::NestedRowEnd => self.end_row(self.paragraph.table_depth.max(2)),
        }
    }

    pub(super) fn row_attr(&mut self, key: &str, param: Option<i32>) {
        let Some(key) = attrs::intern(key) else {
            return;
        };
        let depth = self.definition_depth();
        self.rows.get_mut(depth).attrs.set(key, param.unwrap_or(1));
    }

    pub(super) fn cell_attr(&mut self, key: &str, param: Option<i32>) {
        let Some(key) = attrs::intern(key) else {
            return;
        };
        let depth = self.definition_depth();
        self.rows.get_mut(depth).pending.set(key, param.unwrap_or(1));
    }

    pub(super) fn apply_border(&mut self, property: BorderProperty) {
        match self.border {
            BorderTarget::None => {},
            BorderTarget::Paragraph(side) => {
                self.paragraph.borders.update(side, |border| match property {
                    BorderProperty::Style(style) => border.style = style,
                    BorderProperty::Width(width) => border.width = width,
                    BorderProperty::Color(color) => {
                        border.color_ref = u16::try_from(color).unwrap_or(0);
                    },
                    BorderProperty::Space(space) => border.space = space,
                });
            },
            BorderTarget::Cell(side) => {
                let (style_key, width_key, color_key) = cell_border_keys(side);
                let depth = self.definition_depth();
                let pending = &mut self.rows.get_mut(depth).pending;
                match property {
                    BorderProperty::Style(style) => pending.set(style_key, style as i32),
                    BorderProperty::Width(width) => pending.set(width_key, width),
                    BorderProperty::Color(color) => pending.set(color_key, color),
                    BorderProperty::Space(_) => {},
                }
            },
            BorderTarget::Row(key) => {
                if let BorderProperty::Style(style) = property {
                    let depth = self.definition_depth();
                    self.rows.get_mut(depth).attrs.set(key, style as i32);
                }
            },
        }
    }

    /// Make the innermost open node a cell of a row at `depth`.
    fn reach_cell(&mut self, depth: u8, level: usize) -> bool {
        loop {
            let current = self.table_depth();
            if current > depth {
                self.tree.close(OpenKind::Row);
                continue;
            }
            match self.tree.top_kind() {
                OpenKind::Row => self.open_cell(level),
                _ if current == depth => {
                    if let Some(position) = self.tree.innermost_position(OpenKind::Cell) {
                        self.tree.truncate(position + 1);
                    }
                    return true;
                },
                kind if kind.is_block() => {
                    self.open_row(current + 1, level);
                    self.open_cell(level);
                },
                other => {
                    log::trace!(target: "rtf.table", "cell end inside {other:?} ignored");
                    return false;
                },
            }
        }
    }

    fn end_cell(&mut self, depth: u8) {
        let level = self.level();
        self.seal_paragraph();
        if self.reach_cell(depth, level) {
            self.tree.close(OpenKind::Cell);
        }
    }

    fn end_row(&mut self, depth: u8) {
        self.seal_paragraph();
        while self.table_depth() > depth {
            self.tree.close(OpenKind::Row);
        }
        if self.table_depth() != depth {
            log::trace!(target: "rtf.table", "row end at depth {depth} without an open row");
            return;
        }
        let Some(row) = self.tree.innermost(OpenKind::Row) else {
            return;
        };
        if let Some(definition) = self.rows.get(depth) {
            self.tree.annotate(row, &definition.attrs);
            let cells: Vec<NodeId> = self
                .tree
                .node(row)
                .children
                .iter()
                .copied()
                .filter(|&cell| matches!(self.tree.node(cell).kind, NodeKind::TableCell(_)))
                .collect();
            for (cell, attrs) in cells.into_iter().zip(&definition.cells) {
                self.tree.annotate(cell, attrs);
            }
        }
        self.tree.close(OpenKind::Row);
    }
}
