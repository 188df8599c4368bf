// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::style::StyleDescriptor;
use std::collections::{BTreeMap, BTreeSet};

/// The value held by a buffered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// A spreadsheet formula (without the leading `=`) and the value it
    /// evaluates to, so readers that do not recalculate still see it.
    Formula { expression: String, cached: f64 },
}

impl CellValue {
    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) | Self::Formula { .. } => None,
        }
    }

    /// Returns the numeric value, using the cached result for formulas.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) | Self::Formula { cached: value, .. } => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// A cell waiting to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferCell {
    pub value: Option<CellValue>,
    pub style: StyleDescriptor,
}

/// A horizontal merge on a single row, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeRange {
    pub row: u32,
    pub first_column: u32,
    pub last_column: u32,
}

impl MergeRange {
    #[must_use]
    pub const fn new(row: u32, first_column: u32, last_column: u32) -> Self {
        Self {
            row,
            first_column,
            last_column,
        }
    }

    /// Returns the range in A1 notation, e.g. `A7:C7`.
    #[must_use]
    pub fn a1(&self) -> String {
        format!(
            "{}:{}",
            cell_address(self.first_column, self.row),
            cell_address(self.last_column, self.row)
        )
    }
}

/// Converts a 1-based column index to its letter form (`1` is `A`, `27` is `AA`).
#[must_use]
pub fn column_letter(column: u32) -> String {
    let mut remaining: u32 = column;
    let mut letters: Vec<char> = Vec::new();
    while remaining > 0 {
        let rem: u32 = (remaining - 1) % 26;
        letters.push(char::from_u32(u32::from(b'A') + rem).unwrap_or('A'));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Returns the A1 address of a 1-based column and row.
#[must_use]
pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{row}", column_letter(column))
}

/// Parses an A1 address into a 1-based `(column, row)` pair.
///
/// Absolute markers (`$`) are ignored. Returns `None` for anything else.
#[must_use]
pub fn parse_cell_address(address: &str) -> Option<(u32, u32)> {
    let address: String = address.trim().replace('$', "").to_ascii_uppercase();
    let split: usize = address.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = address.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }

    let mut column: u32 = 0;
    for letter in letters.chars() {
        column = column
            .checked_mul(26)?
            .checked_add(u32::from(letter) - u32::from('A') + 1)?;
    }
    let row: u32 = digits.parse().ok()?;
    (row > 0).then_some((column, row))
}

/// In-memory sheet contents, written to a workbook in one pass.
///
/// Coordinates are 1-based `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBuffer {
    cells: BTreeMap<(u32, u32), BufferCell>,
    merges: BTreeSet<MergeRange>,
    total_rows: BTreeSet<u32>,
}

impl ReportBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a cell, keeping its style.
    pub fn set_value(&mut self, row: u32, column: u32, value: CellValue) {
        self.cells.entry((row, column)).or_default().value = Some(value);
    }

    /// Layers `style` over the current style of a cell.
    pub fn overlay_style(&mut self, row: u32, column: u32, style: &StyleDescriptor) {
        let cell: &mut BufferCell = self.cells.entry((row, column)).or_default();
        cell.style = cell.style.overlay(style);
    }

    /// Puts a whole cell in place, replacing anything already there.
    pub fn put(&mut self, row: u32, column: u32, cell: BufferCell) {
        self.cells.insert((row, column), cell);
    }

    #[must_use]
    pub fn cell(&self, row: u32, column: u32) -> Option<&BufferCell> {
        self.cells.get(&(row, column))
    }

    #[must_use]
    pub fn value(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cell(row, column).and_then(|cell| cell.value.as_ref())
    }

    /// Returns the text of a cell, if it holds text.
    #[must_use]
    pub fn text(&self, row: u32, column: u32) -> Option<&str> {
        self.value(row, column).and_then(CellValue::as_text)
    }

    /// Returns the numeric value of a cell (cached value for formulas).
    #[must_use]
    pub fn number(&self, row: u32, column: u32) -> Option<f64> {
        self.value(row, column).and_then(CellValue::as_number)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &BufferCell)> {
        self.cells.iter().map(|(position, cell)| (*position, cell))
    }

    /// Returns the highest row holding a cell, or `0` for an empty buffer.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(0)
    }

    /// Records a merge. Returns `false` if the same range is already merged.
    pub fn add_merge(&mut self, range: MergeRange) -> bool {
        self.merges.insert(range)
    }

    /// Returns the merged ranges in row order.
    #[must_use]
    pub const fn merges(&self) -> &BTreeSet<MergeRange> {
        &self.merges
    }

    /// Marks `row` as a total row for the finalizer.
    pub fn tag_total_row(&mut self, row: u32) {
        self.total_rows.insert(row);
    }

    /// Rows tagged as total rows, ascending.
    #[must_use]
    pub const fn total_rows(&self) -> &BTreeSet<u32> {
        &self.total_rows
    }

    /// Returns the number of cells held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
