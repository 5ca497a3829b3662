//! Fix-up passes run over the arena once the streaming build is complete.

use super::attrs::AttrSet;
use super::table::{
    CellLayout, HorizontalMerge, RowLayout, SlotSource, TableLayout, VerticalMerge, layout_rows,
};
use super::tree::{Arena, Cell, Node, NodeId, NodeKind, TableInfo};

/// Merge adjacent text runs with identical formatting and drop empty runs.
pub(crate) fn coalesce_runs(arena: &mut Arena) {
    let mut merged = 0usize;
    for parent in arena.preorder() {
        let children = std::mem::take(&mut arena.node_mut(parent).children);
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let NodeKind::TextRun(run) = &arena.node(child).kind else {
                kept.push(child);
                continue;
            };
            if run.text.is_empty() {
                continue;
            }
            let previous = kept.last().copied().filter(|&previous| {
                matches!(
                    &arena.node(previous).kind,
                    NodeKind::TextRun(before) if before.formatting == run.formatting
                )
            });
            match previous {
                Some(previous) => {
                    let text =
                        std::mem::replace(&mut arena.node_mut(child).kind, NodeKind::LineBreak);
                    if let (NodeKind::TextRun(before), NodeKind::TextRun(after)) =
                        (&mut arena.node_mut(previous).kind, text)
                    {
                        before.text.push_str(&after.text);
                    }
                    merged += 1;
                },
                None => kept.push(child),
            }
        }

        arena.node_mut(parent).children = kept;
    }
    if merged > 0 {
        log::trace!(target: "rtf.parser", "merged {merged} adjacent runs");
    }
}

/// Group consecutive rows into tables and resolve columns, spans and merges.
pub(crate) fn build_tables(arena: &mut Arena) {
    for parent in arena.preorder() {
        let has_rows = arena
            .node(parent)
            .children
            .iter()
            .any(|&child| is_row(arena, child));
        if has_rows {
            wrap_rows(arena, parent);
        }
    }
}

#[inline]
fn is_row(arena: &Arena, id: NodeId) -> bool {
    matches!(arena.node(id).kind, NodeKind::TableRow(_))
}

fn wrap_rows(arena: &mut Arena, parent: NodeId) {
    let children = std::mem::take(&mut arena.node_mut(parent).children);
    let mut rebuilt = Vec::with_capacity(children.len());
    let mut index = 0;

    while index < children.len() {
        if !is_row(arena, children[index]) {
            rebuilt.push(children[index]);
            index += 1;
            continue;
        }
        let start = index;
        while index < children.len() && is_row(arena, children[index]) {
            index += 1;
        }
        let rows = &children[start..index];
        let layouts: Vec<RowLayout> = rows.iter().map(|&row| row_layout(arena, row)).collect();
        for (range, layout) in layout_rows(&layouts) {
            rebuilt.push(build_table(arena, parent, &rows[range], layout));
        }
    }

    arena.node_mut(parent).children = rebuilt;
}

fn row_layout(arena: &Arena, row: NodeId) -> RowLayout {
    let node = arena.node(row);
    let cells = node
        .children
        .iter()
        .map(|&cell| {
            let attrs = &arena.node(cell).attrs;
            let horizontal = if attrs.contains("clmgf") {
                HorizontalMerge::First
            } else if attrs.contains("clmrg") {
                HorizontalMerge::Continue
            } else {
                HorizontalMerge::None
            };
            let vertical = if attrs.contains("clvmgf") {
                VerticalMerge::Start
            } else if attrs.contains("clvmrg") {
                VerticalMerge::Continue
            } else {
                VerticalMerge::None
            };
            CellLayout {
                right: attrs.get("cellx"),
                horizontal,
                vertical,
            }
        })
        .collect();

    RowLayout {
        left: node.attrs.get("trleft").unwrap_or(0),
        cells,
        last_row: node.attrs.contains("lastrow"),
    }
}

fn build_table(arena: &mut Arena, parent: NodeId, rows: &[NodeId], layout: TableLayout) -> NodeId {
    let first = arena.node(rows[0]);
    let native_level = first.native_level;
    let depth = match first.kind {
        NodeKind::TableRow(row) => row.depth,
        _ => 1,
    };

    let mut table_node = Node::new(
        NodeKind::Table(TableInfo {
            depth,
            columns: layout.columns.len(),
            rows: rows.len(),
        }),
        native_level,
    );
    table_node.parent = Some(parent);
    let table = arena.alloc(table_node);

    let mut children = Vec::with_capacity(layout.columns.len() + rows.len());
    for column in &layout.columns {
        let mut node = Node::new(NodeKind::TableColumn(*column), native_level);
        node.parent = Some(table);
        children.push(arena.alloc(node));
    }

    let mut previous: Vec<NodeId> = Vec::new();
    for (index, (&row, plan)) in rows.iter().zip(&layout.rows).enumerate() {
        let row_node = arena.node_mut(row);
        row_node.parent = Some(table);
        if let NodeKind::TableRow(info) = &mut row_node.kind {
            info.index = index;
        }
        let row_level = row_node.native_level;
        let sources = std::mem::take(&mut row_node.children);

        let mut cells = Vec::with_capacity(plan.slots.len());
        for slot in &plan.slots {
            let id = match slot.source {
                SlotSource::Cell(source) => match sources.get(source) {
                    Some(&id) => id,
                    None => continue,
                },
                SlotSource::Placeholder { style_from } => {
                    let mut node = Node::new(
                        NodeKind::TableCell(Cell {
                            placeholder: true,
                            ..Cell::default()
                        }),
                        row_level,
                    );
                    if let Some(&from) = style_from.and_then(|from| sources.get(from)) {
                        node.attrs.copy_style_from(&arena.node(from).attrs);
                    }
                    arena.alloc(node)
                },
            };

            if let Some(&from) = slot.inherits_from.and_then(|from| previous.get(from)) {
                let mut inherited = AttrSet::new();
                inherited.copy_style_from(&arena.node(from).attrs);
                inherited.merge(&arena.node(id).attrs);
                arena.node_mut(id).attrs = inherited;
            }

            let node = arena.node_mut(id);
            node.parent = Some(row);
            if let NodeKind::TableCell(cell) = &mut node.kind {
                cell.column = slot.column;
                cell.colspan = slot.colspan;
                cell.rowspan = slot.rowspan;
                cell.left = slot.left;
                cell.right = slot.right;
                cell.covered_by = slot.covered_by;
            }
            cells.push(id);
        }

        arena.node_mut(row).children = cells;
        previous = sources;
        children.push(row);
    }

    arena.node_mut(table).children = children;
    log::trace!(
        target: "rtf.table",
        "table at depth {depth}: {} rows, {} columns",
        rows.len(),
        layout.columns.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::tree::{OpenKind, Row, TreeBuilder};
    use crate::rtf::types::{Formatting, ParagraphFormat, Run};

    fn run(text: &str, bold: bool) -> NodeKind {
        NodeKind::TextRun(Run::new(
            text,
            Formatting {
                bold,
                ..Formatting::default()
            },
        ))
    }

    #[test]
    fn test_coalesce_runs() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run("Hel", false), 1);
        builder.leaf(run("", true), 1);
        builder.leaf(run("lo ", false), 1);
        builder.leaf(run("world", true), 1);
        let mut arena = builder.finish();
        coalesce_runs(&mut arena);

        let tree = arena.into_tree();
        let paragraph = tree.root().children().next();
        let runs: Vec<String> = paragraph
            .into_iter()
            .flat_map(|p| p.children())
            .filter_map(|node| match node.kind() {
                NodeKind::TextRun(run) => Some(run.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(runs, ["Hello ", "world"]);
    }

    fn cell_with(builder: &mut TreeBuilder, right: i32, text: &str) {
        let cell = builder.open(NodeKind::TableCell(Cell::default()), 1);
        let mut attrs = AttrSet::new();
        attrs.set("cellx", right);
        builder.annotate(cell, &attrs);
        builder.open(NodeKind::Paragraph(ParagraphFormat::default()), 1);
        builder.leaf(run(text, false), 1);
        builder.close(OpenKind::Cell);
    }

    #[test]
    fn test_build_tables_splits_on_width_change() {
        let mut builder = TreeBuilder::new();
        builder.open(NodeKind::TableRow(Row { depth: 1, index: 0 }), 1);
        cell_with(&mut builder, 1000, "a");
        cell_with(&mut builder, 3000, "b");
        builder.close(OpenKind::Row);
        builder.open(NodeKind::TableRow(Row { depth: 1, index: 0 }), 1);
        cell_with(&mut builder, 2000, "c");
        cell_with(&mut builder, 3000, "d");
        builder.close(OpenKind::Row);
        builder.open(NodeKind::TableRow(Row { depth: 1, index: 0 }), 1);
        cell_with(&mut builder, 5000, "e");
        builder.close(OpenKind::Row);

        let mut arena = builder.finish();
        build_tables(&mut arena);
        let tree = arena.into_tree();

        let tables: Vec<TableInfo> = tree
            .root()
            .children()
            .filter_map(|node| match node.kind() {
                NodeKind::Table(info) => Some(*info),
                _ => None,
            })
            .collect();
        assert_eq!(tables.len(), 2);
        assert_eq!((tables[0].rows, tables[0].columns), (2, 3));
        assert_eq!((tables[1].rows, tables[1].columns), (1, 1));

        // Every row of the first table has one cell per column
        let first = tree.root().children().next();
        for row in first.into_iter().flat_map(|table| table.children()) {
            if matches!(row.kind(), NodeKind::TableRow(_)) {
                assert_eq!(row.children().len(), 3);
            }
        }
        assert_eq!(tree.root().text(), "abcde");
    }
}
