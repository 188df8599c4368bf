// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer::{BufferCell, MergeRange};
use crate::error::CoreError;

/// Rows above the first village row: title, town info, column captions.
pub const BLOCK_HEADER_ROWS: u32 = 3;

/// Rows in the template block: the header rows, one village row and one
/// total row.
pub const BLOCK_TEMPLATE_ROWS: u32 = BLOCK_HEADER_ROWS + 2;

/// Columns covered by a block.
pub const BLOCK_WIDTH: u32 = 8;

/// The fixed-shape block at the top of the area report template.
///
/// Each town gets a copy of this block. The village row is repeated once
/// per village.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate {
    rows: Vec<Vec<BufferCell>>,
    /// Merges inside the header rows; `row` is the 0-based header offset.
    header_merges: Vec<MergeRange>,
}

impl BlockTemplate {
    /// Builds a template from its rows, top to bottom.
    ///
    /// Rows shorter than [`BLOCK_WIDTH`] are padded with blank cells.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TemplateMismatch` if the number of rows is not
    /// [`BLOCK_TEMPLATE_ROWS`] or a row is wider than [`BLOCK_WIDTH`].
    pub fn new(rows: Vec<Vec<BufferCell>>) -> Result<Self, CoreError> {
        if rows.len() != BLOCK_TEMPLATE_ROWS as usize {
            return Err(CoreError::TemplateMismatch(format!(
                "expected {BLOCK_TEMPLATE_ROWS} block rows, found {}",
                rows.len()
            )));
        }

        let mut padded: Vec<Vec<BufferCell>> = Vec::with_capacity(rows.len());
        for (index, mut row) in rows.into_iter().enumerate() {
            if row.len() > BLOCK_WIDTH as usize {
                return Err(CoreError::TemplateMismatch(format!(
                    "block row {} has {} columns, at most {BLOCK_WIDTH} allowed",
                    index + 1,
                    row.len()
                )));
            }
            row.resize(BLOCK_WIDTH as usize, BufferCell::default());
            padded.push(row);
        }

        Ok(Self {
            rows: padded,
            header_merges: Vec::new(),
        })
    }

    /// Adds merges found in the header rows, given as 1-based sheet ranges
    /// inside the template block.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TemplateMismatch` if a merge lies outside the
    /// header rows or is wider than [`BLOCK_WIDTH`].
    pub fn with_header_merges(mut self, merges: &[MergeRange]) -> Result<Self, CoreError> {
        for merge in merges {
            if merge.row == 0
                || merge.row > BLOCK_HEADER_ROWS
                || merge.first_column == 0
                || merge.first_column > merge.last_column
                || merge.last_column > BLOCK_WIDTH
            {
                return Err(CoreError::TemplateMismatch(format!(
                    "merge {} is not inside the block header",
                    merge.a1()
                )));
            }
            self.header_merges.push(MergeRange::new(
                merge.row - 1,
                merge.first_column,
                merge.last_column,
            ));
        }
        Ok(self)
    }

    /// A template with no values and no formatting.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            rows: vec![
                vec![BufferCell::default(); BLOCK_WIDTH as usize];
                BLOCK_TEMPLATE_ROWS as usize
            ],
            header_merges: Vec::new(),
        }
    }

    /// Returns one of the header rows (`0` is the title row).
    #[must_use]
    pub fn header_row(&self, index: u32) -> &[BufferCell] {
        self.row(index.min(BLOCK_HEADER_ROWS - 1))
    }

    /// Returns the template village row.
    #[must_use]
    pub fn member_row(&self) -> &[BufferCell] {
        self.row(BLOCK_HEADER_ROWS)
    }

    /// Returns the template total row.
    #[must_use]
    pub fn total_row(&self) -> &[BufferCell] {
        self.row(BLOCK_HEADER_ROWS + 1)
    }

    /// Header merges, with `row` as the 0-based header offset.
    #[must_use]
    pub fn header_merges(&self) -> &[MergeRange] {
        &self.header_merges
    }

    fn row(&self, index: u32) -> &[BufferCell] {
        self.rows
            .get(index as usize)
            .map_or(&[], Vec::as_slice)
    }
}
