//! Table reconstruction.
//!
//! RTF has no table container: a table is a run of rows, each row a flat
//! sequence of cells whose only geometry is the right edge (`\cellxN`) of each
//! cell. This module derives tables, columns and cell spans from that data.
//! Everything here is a pure function over [`RowLayout`] values; applying the
//! result to the document tree happens in the fix-up passes.

use super::tree::{CellPos, Column};
use std::ops::Range;

/// Cell edges closer than this many twips are treated as the same boundary.
pub const EDGE_TOLERANCE: i32 = 45;

/// Width given to a cell that has no right edge and nothing above it.
pub const DEFAULT_CELL_WIDTH: i32 = 1440;

/// Old-style horizontal merge flags (`\clmgf`, `\clmrg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalMerge {
    /// Not merged
    #[default]
    None,
    /// First cell of a merged range
    First,
    /// Merged into the preceding cell
    Continue,
}

/// Vertical merge flags (`\clvmgf`, `\clvmrg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalMerge {
    /// Not merged
    #[default]
    None,
    /// First cell of a vertically merged range
    Start,
    /// Merged into the cell above
    Continue,
}

/// Geometry of one source cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellLayout {
    /// Right edge in twips, if the row definition gave one
    pub right: Option<i32>,
    /// Horizontal merge flag
    pub horizontal: HorizontalMerge,
    /// Vertical merge flag
    pub vertical: VerticalMerge,
}

impl CellLayout {
    /// A plain cell ending at `right`.
    #[inline]
    pub fn at(right: i32) -> Self {
        Self {
            right: Some(right),
            ..Default::default()
        }
    }
}

/// Geometry of one source row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowLayout {
    /// Left edge of the row (`\trleft`)
    pub left: i32,
    /// Cells in source order
    pub cells: Vec<CellLayout>,
    /// Row carries `\lastrow`
    pub last_row: bool,
}

impl RowLayout {
    /// Row width from its own explicit edges.
    fn explicit_width(&self) -> Option<i32> {
        self.cells
            .iter()
            .rev()
            .find_map(|cell| cell.right)
            .map(|right| right - self.left)
    }
}

/// Where a reconstructed cell comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// The source cell with this index in its row
    Cell(usize),
    /// A synthesized placeholder, styled like the source cell at `style_from`
    Placeholder {
        /// Source cell index in the same row to copy style from
        style_from: Option<usize>,
    },
}

/// One reconstructed cell position. Slot `j` of a row is column `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    /// Origin of the slot
    pub source: SlotSource,
    /// Column index
    pub column: usize,
    /// Columns covered
    pub colspan: usize,
    /// Rows covered
    pub rowspan: usize,
    /// Left edge in twips
    pub left: i32,
    /// Right edge in twips
    pub right: i32,
    /// Origin of the merge covering this slot
    pub covered_by: Option<CellPos>,
    /// Index of the cell in the previous row whose geometry and style this
    /// cell inherits, when it had no right edge of its own
    pub inherits_from: Option<usize>,
}

/// Reconstructed layout of one row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowPlan {
    /// Exactly one slot per column
    pub slots: Vec<CellSlot>,
}

/// Reconstructed layout of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableLayout {
    /// Column boundaries
    pub columns: Vec<Column>,
    /// One plan per source row
    pub rows: Vec<RowPlan>,
}

/// Split a run of rows into tables.
///
/// A new table starts after a `\lastrow` row and whenever the row width
/// changes by more than [`EDGE_TOLERANCE`].
pub fn group_rows(rows: &[RowLayout]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut reference: Option<i32> = None;

    for (index, row) in rows.iter().enumerate() {
        let width = row.explicit_width();
        if index > start {
            let width_changed = matches!(
                (reference, width),
                (Some(previous), Some(current)) if (current - previous).abs() > EDGE_TOLERANCE
            );
            if rows[index - 1].last_row || width_changed {
                groups.push(start..index);
                start = index;
                reference = None;
            }
        }
        if width.is_some() {
            reference = width;
        }
    }

    if start < rows.len() {
        groups.push(start..rows.len());
    }
    groups
}

/// Group rows into tables and lay out each table.
pub fn layout_rows(rows: &[RowLayout]) -> Vec<(Range<usize>, TableLayout)> {
    group_rows(rows)
        .into_iter()
        .map(|range| {
            let layout = layout_table(&rows[range.clone()]);
            (range, layout)
        })
        .collect()
}

/// Lay out the rows of one table.
pub fn layout_table(rows: &[RowLayout]) -> TableLayout {
    let (rights, inherited) = resolve_edges(rows);
    let boundaries = coalesce(rights.iter().flatten().copied().collect());
    let origin = rows.iter().map(|row| row.left).min().unwrap_or(0);

    let mut columns = Vec::with_capacity(boundaries.len());
    let mut left = origin;
    for (index, &right) in boundaries.iter().enumerate() {
        columns.push(Column { index, left, right });
        left = right;
    }

    let mut plans: Vec<RowPlan> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| place_cells(r, row, &rights[r], &inherited[r], &boundaries, &columns))
        .collect();

    for (r, row) in rows.iter().enumerate() {
        merge_horizontal(r, row, &mut plans[r]);
    }
    merge_vertical(rows, &mut plans);

    log::trace!(
        target: "rtf.table",
        "laid out {} rows over {} columns",
        plans.len(),
        columns.len()
    );

    TableLayout {
        columns,
        rows: plans,
    }
}

/// Fill in missing right edges top-down and make every row's edges strictly
/// increasing by more than the tolerance.
fn resolve_edges(rows: &[RowLayout]) -> (Vec<Vec<i32>>, Vec<Vec<Option<usize>>>) {
    let mut rights: Vec<Vec<i32>> = Vec::with_capacity(rows.len());
    let mut inherited: Vec<Vec<Option<usize>>> = Vec::with_capacity(rows.len());

    for row in rows {
        let above = rights.last();
        let mut row_rights = Vec::with_capacity(row.cells.len());
        let mut row_inherited = Vec::with_capacity(row.cells.len());
        let mut previous = row.left;

        for (index, cell) in row.cells.iter().enumerate() {
            let (mut right, source) = match (cell.right, above.and_then(|a| a.get(index))) {
                (Some(right), _) => (right, None),
                (None, Some(&above_right)) => (above_right, Some(index)),
                (None, None) => (previous + DEFAULT_CELL_WIDTH, None),
            };
            if right <= previous + EDGE_TOLERANCE {
                log::trace!(
                    target: "rtf.table",
                    "cell edge {right} does not advance past {previous}, widening"
                );
                right = previous + EDGE_TOLERANCE + 1;
            }
            row_rights.push(right);
            row_inherited.push(source);
            previous = right;
        }

        rights.push(row_rights);
        inherited.push(row_inherited);
    }

    (rights, inherited)
}

/// Sort edges and merge any edge within tolerance of the last kept one.
fn coalesce(mut edges: Vec<i32>) -> Vec<i32> {
    edges.sort_unstable();
    let mut boundaries: Vec<i32> = Vec::with_capacity(edges.len());
    for edge in edges {
        match boundaries.last() {
            Some(&last) if edge - last <= EDGE_TOLERANCE => {},
            _ => boundaries.push(edge),
        }
    }
    boundaries
}

/// Column whose boundary absorbs `edge`.
#[inline]
fn column_of(edge: i32, boundaries: &[i32]) -> usize {
    boundaries
        .partition_point(|&boundary| boundary < edge - EDGE_TOLERANCE)
        .min(boundaries.len().saturating_sub(1))
}

fn placeholder(column: usize, columns: &[Column], style_from: Option<usize>) -> CellSlot {
    CellSlot {
        source: SlotSource::Placeholder { style_from },
        column,
        colspan: 1,
        rowspan: 1,
        left: columns[column].left,
        right: columns[column].right,
        covered_by: None,
        inherits_from: None,
    }
}

fn place_cells(
    row_index: usize,
    row: &RowLayout,
    rights: &[i32],
    inherited: &[Option<usize>],
    boundaries: &[i32],
    columns: &[Column],
) -> RowPlan {
    let mut slots = Vec::with_capacity(columns.len());
    let mut next = boundaries.partition_point(|&boundary| boundary <= row.left + EDGE_TOLERANCE);

    for (index, &right) in rights.iter().enumerate() {
        let end = column_of(right, boundaries);
        let start = next.min(end);
        while slots.len() < start {
            slots.push(placeholder(slots.len(), columns, None));
        }

        let origin = CellPos {
            row: row_index,
            column: start,
        };
        slots.push(CellSlot {
            source: SlotSource::Cell(index),
            column: start,
            colspan: end - start + 1,
            rowspan: 1,
            left: columns[start].left,
            right: columns[end].right,
            covered_by: None,
            inherits_from: inherited[index],
        });
        for column in start + 1..=end {
            let mut covered = placeholder(column, columns, Some(index));
            covered.covered_by = Some(origin);
            slots.push(covered);
        }
        next = end + 1;
    }

    while slots.len() < columns.len() {
        slots.push(placeholder(slots.len(), columns, None));
    }

    RowPlan { slots }
}

/// Fold `\clmrg` cells into the preceding `\clmgf` cell.
fn merge_horizontal(row_index: usize, row: &RowLayout, plan: &mut RowPlan) {
    let mut origin: Option<usize> = None;

    for column in 0..plan.slots.len() {
        let SlotSource::Cell(index) = plan.slots[column].source else {
            continue;
        };
        match row.cells[index].horizontal {
            HorizontalMerge::First => origin = Some(column),
            HorizontalMerge::Continue => {
                let Some(first) = origin else {
                    continue;
                };
                let target = CellPos {
                    row: row_index,
                    column: first,
                };
                let span = plan.slots[column].colspan;
                let right = plan.slots[column].right;
                plan.slots[column].covered_by = Some(target);
                for slot in &mut plan.slots[column + 1..column + span] {
                    slot.covered_by = Some(target);
                }
                plan.slots[first].colspan += span;
                plan.slots[first].right = right;
            },
            HorizontalMerge::None => origin = None,
        }
    }
}

/// Accumulate rowspans for `\clvmgf` cells over following `\clvmrg` cells.
fn merge_vertical(rows: &[RowLayout], plans: &mut [RowPlan]) {
    for r in 0..plans.len() {
        for column in 0..plans[r].slots.len() {
            let slot = plans[r].slots[column];
            let SlotSource::Cell(index) = slot.source else {
                continue;
            };
            if slot.covered_by.is_some() || rows[r].cells[index].vertical != VerticalMerge::Start {
                continue;
            }

            let origin = CellPos { row: r, column };
            for below in r + 1..plans.len() {
                let Some(&candidate) = plans[below].slots.get(column) else {
                    break;
                };
                let SlotSource::Cell(below_index) = candidate.source else {
                    break;
                };
                if candidate.covered_by.is_some()
                    || rows[below].cells[below_index].vertical != VerticalMerge::Continue
                {
                    break;
                }

                let covered = CellPos { row: below, column };
                for other in &mut plans[below].slots {
                    if other.column == column || other.covered_by == Some(covered) {
                        other.covered_by = Some(origin);
                    }
                }
                plans[r].slots[column].rowspan += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(rights: &[i32]) -> RowLayout {
        RowLayout {
            left: 0,
            cells: rights.iter().map(|&right| CellLayout::at(right)).collect(),
            last_row: false,
        }
    }

    fn colspans(plan: &RowPlan) -> Vec<usize> {
        plan.slots
            .iter()
            .filter(|slot| matches!(slot.source, SlotSource::Cell(_)))
            .map(|slot| slot.colspan)
            .collect()
    }

    #[test]
    fn test_colspan_from_edges() {
        let rows = vec![row(&[1000, 2000, 3000]), row(&[2010, 3000])];
        let layout = layout_table(&rows);

        assert_eq!(layout.columns.len(), 3);
        assert_eq!(layout.columns[1].width(), 1000);
        assert_eq!(colspans(&layout.rows[1]), vec![2, 1]);

        let second = &layout.rows[1].slots;
        assert_eq!(second.len(), 3);
        assert_eq!(
            second[1].source,
            SlotSource::Placeholder {
                style_from: Some(0)
            }
        );
        assert_eq!(second[1].covered_by, Some(CellPos { row: 1, column: 0 }));
        assert_eq!(second[2].source, SlotSource::Cell(1));
    }

    #[test]
    fn test_tolerance_coalesces_edges() {
        let rows = vec![row(&[1000, 2000]), row(&[1030, 1990])];
        let layout = layout_table(&rows);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(colspans(&layout.rows[1]), vec![1, 1]);
    }

    #[test]
    fn test_short_row_is_padded() {
        let rows = vec![row(&[1000, 2000, 3000]), row(&[1000])];
        let layout = layout_table(&rows);
        assert_eq!(layout.rows[1].slots.len(), 3);
        assert_eq!(
            layout.rows[1].slots[2].source,
            SlotSource::Placeholder { style_from: None }
        );
        assert_eq!(layout.rows[1].slots[2].covered_by, None);
    }

    #[test]
    fn test_missing_edges_inherit_from_above() {
        let mut second = row(&[]);
        second.cells = vec![CellLayout::default(), CellLayout::default()];
        let rows = vec![row(&[1500, 3000]), second];
        let layout = layout_table(&rows);

        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.rows[1].slots[1].right, 3000);
        assert_eq!(layout.rows[1].slots[1].inherits_from, Some(1));
        assert_eq!(layout.rows[0].slots[0].inherits_from, None);
    }

    #[test]
    fn test_vertical_merge() {
        let mut rows = vec![row(&[1000, 2000]), row(&[1000, 2000]), row(&[1000, 2000])];
        rows[0].cells[0].vertical = VerticalMerge::Start;
        rows[1].cells[0].vertical = VerticalMerge::Continue;
        rows[2].cells[0].vertical = VerticalMerge::None;
        let layout = layout_table(&rows);

        assert_eq!(layout.rows[0].slots[0].rowspan, 2);
        assert_eq!(
            layout.rows[1].slots[0].covered_by,
            Some(CellPos { row: 0, column: 0 })
        );
        assert_eq!(layout.rows[2].slots[0].covered_by, None);
        assert_eq!(layout.rows[1].slots[1].covered_by, None);
    }

    #[test]
    fn test_vertical_merge_with_colspan() {
        let mut rows = vec![row(&[2000, 3000]), row(&[1000, 2000, 3000])];
        rows[0].cells[0].vertical = VerticalMerge::Start;
        rows[1].cells[0].vertical = VerticalMerge::Continue;
        let layout = layout_table(&rows);

        assert_eq!(layout.rows[0].slots[0].colspan, 2);
        assert_eq!(layout.rows[0].slots[0].rowspan, 2);
        assert_eq!(
            layout.rows[1].slots[0].covered_by,
            Some(CellPos { row: 0, column: 0 })
        );
        assert_eq!(layout.rows[1].slots[1].covered_by, None);
    }

    #[test]
    fn test_old_style_horizontal_merge() {
        let mut rows = vec![row(&[1000, 2000, 3000])];
        rows[0].cells[0].horizontal = HorizontalMerge::First;
        rows[0].cells[1].horizontal = HorizontalMerge::Continue;
        let layout = layout_table(&rows);

        let slots = &layout.rows[0].slots;
        assert_eq!(slots[0].colspan, 2);
        assert_eq!(slots[0].right, 2000);
        assert_eq!(slots[1].covered_by, Some(CellPos { row: 0, column: 0 }));
        assert_eq!(slots[2].covered_by, None);
    }

    #[test]
    fn test_indented_row_gets_leading_placeholder() {
        let mut indented = row(&[2000]);
        indented.left = 1000;
        let rows = vec![row(&[1000, 2000]), indented];
        let layout = layout_table(&rows);

        let slots = &layout.rows[1].slots;
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].source, SlotSource::Placeholder { style_from: None });
        assert_eq!(slots[1].source, SlotSource::Cell(0));
    }

    #[test]
    fn test_grouping() {
        let mut rows = vec![row(&[1000, 2000]), row(&[2000]), row(&[1000, 4000]), row(&[4000])];
        assert_eq!(group_rows(&rows), vec![0..2, 2..4]);

        rows[0].last_row = true;
        assert_eq!(group_rows(&rows), vec![0..1, 1..2, 2..4]);

        let grouped = layout_rows(&rows);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[2].1.columns.len(), 2);
        assert!(group_rows(&[]).is_empty());
    }

    #[test]
    fn test_decreasing_edges_are_widened() {
        let rows = vec![row(&[2000, 1000])];
        let layout = layout_table(&rows);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.rows[0].slots.len(), 2);
    }

    fn merge_flag() -> impl Strategy<Value = (HorizontalMerge, VerticalMerge)> {
        (
            prop_oneof![
                Just(HorizontalMerge::None),
                Just(HorizontalMerge::First),
                Just(HorizontalMerge::Continue)
            ],
            prop_oneof![
                Just(VerticalMerge::None),
                Just(VerticalMerge::Start),
                Just(VerticalMerge::Continue)
            ],
        )
    }

    /// `k` boundaries 1000 twips apart and rows whose edges jitter around a
    /// subset of them; the first row uses every boundary.
    fn table_strategy() -> impl Strategy<Value = (usize, Vec<RowLayout>)> {
        (1usize..8).prop_flat_map(|k| {
            let row = (
                prop::collection::vec(any::<bool>(), k),
                prop::collection::vec(-20i32..=20, k),
                prop::collection::vec(merge_flag(), k),
            );
            (Just(k), prop::collection::vec(row, 1..6))
        })
        .prop_map(|(k, raw_rows)| {
            let rows = raw_rows
                .into_iter()
                .enumerate()
                .map(|(r, (used, jitter, flags))| {
                    let cells = (0..k)
                        .filter(|&j| r == 0 || used[j] || j == k - 1)
                        .map(|j| CellLayout {
                            right: Some(1000 * (j as i32 + 1) + jitter[j]),
                            horizontal: flags[j].0,
                            vertical: flags[j].1,
                        })
                        .collect();
                    RowLayout {
                        left: 0,
                        cells,
                        last_row: false,
                    }
                })
                .collect();
            (k, rows)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_every_row_has_one_slot_per_column((k, rows) in table_strategy()) {
            let layout = layout_table(&rows);
            prop_assert_eq!(layout.columns.len(), k);
            prop_assert_eq!(layout.rows.len(), rows.len());
            for plan in &layout.rows {
                prop_assert_eq!(plan.slots.len(), k);
                for (column, slot) in plan.slots.iter().enumerate() {
                    prop_assert_eq!(slot.column, column);
                }
            }
        }

        #[test]
        fn prop_covered_slots_point_at_uncovered_origins((_k, rows) in table_strategy()) {
            let layout = layout_table(&rows);
            for plan in &layout.rows {
                for slot in &plan.slots {
                    if let Some(origin) = slot.covered_by {
                        let target = layout.rows[origin.row].slots[origin.column];
                        prop_assert!(target.covered_by.is_none());
                        prop_assert!(matches!(target.source, SlotSource::Cell(_)));
                    }
                }
            }
        }
    }
}
