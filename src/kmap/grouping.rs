//! Grouping check.
//!
//! Rules run in a fixed order and the first failing rule decides the
//! verdict: at least one group, every group valid, every group maximal,
//! every 1 covered, no redundant group, and finally an exact match with the
//! exercise's canonical groups.

use crate::kmap::grid::{CellValue, KmapGrid, COLS, ROWS};
use crate::kmap::verdict::{format_indices, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user-drawn cluster of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    /// (row, col) positions on the grid
    pub cells: Vec<(usize, usize)>,
    pub color: String,
}

impl Group {
    pub fn new(id: &str, cells: Vec<(usize, usize)>, color: &str) -> Self {
        Self {
            id: id.to_string(),
            cells,
            color: color.to_string(),
        }
    }

    /// Group covering the given minterm indices
    pub fn from_indices(id: &str, indices: &[usize], color: &str) -> Self {
        let cells = indices
            .iter()
            .filter_map(|&i| KmapGrid::position_of(i))
            .collect();
        Self::new(id, cells, color)
    }

    /// Sorted minterm indices covered by the group
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .cells
            .iter()
            .map(|&(r, c)| KmapGrid::cell_index(r, c))
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// A run of rows or columns on the wrapping axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    len: usize,
}

impl Span {
    fn members(&self, axis: usize) -> impl Iterator<Item = usize> {
        let (start, len) = (self.start, self.len);
        (0..len).map(move |i| (start + i) % axis)
    }

    /// Both spans twice as long that contain this one
    fn doubled(&self, axis: usize) -> Vec<Span> {
        let len = self.len * 2;
        if len > axis {
            return Vec::new();
        }
        vec![
            Span { start: self.start, len },
            Span {
                start: (self.start + axis - self.len) % axis,
                len,
            },
        ]
    }
}

/// Contiguous (with wrap-around) run of power-of-two length
fn span_of(values: &BTreeSet<usize>, axis: usize) -> Option<Span> {
    let len = values.len();
    if !matches!(len, 1 | 2 | 4) || len > axis {
        return None;
    }
    (0..axis)
        .map(|start| Span { start, len })
        .find(|span| span.members(axis).collect::<BTreeSet<_>>() == *values)
}

/// Rectangle covered by a group, if it is one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    rows: Span,
    cols: Span,
}

impl Rect {
    fn of(group: &Group) -> Option<Rect> {
        if group.cells.is_empty() || group.cells.iter().any(|&(r, c)| r >= ROWS || c >= COLS) {
            return None;
        }
        let unique: BTreeSet<(usize, usize)> = group.cells.iter().copied().collect();
        if unique.len() != group.cells.len() {
            return None;
        }
        let rows: BTreeSet<usize> = unique.iter().map(|&(r, _)| r).collect();
        let cols: BTreeSet<usize> = unique.iter().map(|&(_, c)| c).collect();
        if rows.len() * cols.len() != unique.len() {
            return None;
        }
        Some(Rect {
            rows: span_of(&rows, ROWS)?,
            cols: span_of(&cols, COLS)?,
        })
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .members(ROWS)
            .flat_map(move |r| self.cols.members(COLS).map(move |c| (r, c)))
    }

    fn fits(&self, grid: &KmapGrid) -> bool {
        self.cells()
            .all(|(r, c)| grid.get(r, c).map_or(false, |v| v.is_groupable()))
    }

    /// Whether doubling either dimension still only covers 1/X cells
    fn can_grow(&self, grid: &KmapGrid) -> bool {
        let taller = self.rows.doubled(ROWS).into_iter().map(|rows| Rect {
            rows,
            cols: self.cols,
        });
        let wider = self.cols.doubled(COLS).into_iter().map(|cols| Rect {
            rows: self.rows,
            cols,
        });
        taller.chain(wider).any(|rect| rect.fits(grid))
    }
}

fn label(index: usize, group: &Group) -> String {
    if group.id.is_empty() {
        format!("Group {}", index + 1)
    } else {
        format!("Group {} ('{}')", index + 1, group.id)
    }
}

fn covered_ones(groups: &[&Group], ones: &BTreeSet<usize>) -> BTreeSet<usize> {
    groups
        .iter()
        .flat_map(|g| g.indices())
        .filter(|i| ones.contains(i))
        .collect()
}

/// Check a set of groups against the grid and the canonical solution
pub fn validate_grouping(
    grid: &KmapGrid,
    groups: &[Group],
    canonical_groups: &[Vec<usize>],
) -> ValidationResult {
    if groups.is_empty() {
        return ValidationResult::fail(
            "No groups found.",
            "Create at least one group covering the 1s.",
        );
    }

    let mut rects = Vec::with_capacity(groups.len());
    for (i, group) in groups.iter().enumerate() {
        let Some(rect) = Rect::of(group) else {
            return ValidationResult::fail(
                "Invalid group.",
                format!(
                    "{} is not a rectangle with 1, 2 or 4 rows and columns.",
                    label(i, group)
                ),
            );
        };
        if !rect.fits(grid) {
            return ValidationResult::fail(
                "Invalid group.",
                format!("{} contains a cell with value 0.", label(i, group)),
            );
        }
        rects.push(rect);
    }

    for (i, rect) in rects.iter().enumerate() {
        if rect.can_grow(grid) {
            return ValidationResult::fail(
                "A group is not as large as it could be.",
                format!(
                    "{} can be doubled and still cover only 1s and Xs.",
                    label(i, &groups[i])
                ),
            );
        }
    }

    let ones: BTreeSet<usize> = grid.indices_of(CellValue::One).into_iter().collect();
    let all: Vec<&Group> = groups.iter().collect();
    let covered = covered_ones(&all, &ones);
    if covered != ones {
        let uncovered: Vec<usize> = ones.difference(&covered).copied().collect();
        return ValidationResult::fail(
            "Not every 1 is covered.",
            format!("Uncovered minterms: {}.", format_indices(&uncovered)),
        );
    }

    for (i, group) in groups.iter().enumerate() {
        let others: Vec<&Group> = groups
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, g)| g)
            .collect();
        if covered_ones(&others, &ones) == ones {
            return ValidationResult::fail(
                "A group is redundant.",
                format!(
                    "{} only covers 1s that other groups already cover.",
                    label(i, group)
                ),
            );
        }
    }

    if let Some(error) = compare_with_canonical(groups, canonical_groups) {
        return ValidationResult::fail("The groups do not match the expected solution.", error);
    }

    ValidationResult::pass("All groups are correct.")
}

/// Unordered comparison of sorted index lists
fn compare_with_canonical(groups: &[Group], canonical: &[Vec<usize>]) -> Option<String> {
    let mut actual: Vec<Vec<usize>> = groups.iter().map(Group::indices).collect();
    let mut expected: Vec<Vec<usize>> = canonical
        .iter()
        .map(|g| {
            let mut g = g.clone();
            g.sort_unstable();
            g
        })
        .collect();
    actual.sort();
    expected.sort();
    if actual == expected {
        return None;
    }

    let mut problems = Vec::new();
    if actual.len() != expected.len() {
        problems.push(format!(
            "Expected {} groups, found {}.",
            expected.len(),
            actual.len()
        ));
    }
    let mut remaining = actual.clone();
    for group in &expected {
        match remaining.iter().position(|g| g == group) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => problems.push(format!(
                "Missing a group covering minterms {}.",
                format_indices(group)
            )),
        }
    }
    Some(problems.join("\n"))
}
