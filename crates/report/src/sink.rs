// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use boundary_recon::{
    BLOCK_HEADER_ROWS, BLOCK_TEMPLATE_ROWS, BLOCK_WIDTH, BlockTemplate, BufferCell, CellValue,
    MergeRange, ReportBuffer, parse_cell_address,
};
use tracing::debug;
use umya_spreadsheet::{Cell, Style, Worksheet};

use crate::error::ReportError;
use crate::style_map::{apply_descriptor, descriptor_from_style};

/// Writes every cell and merge of `buffer` into `sheet`.
///
/// Buffered styles are layered over whatever formatting the sheet already
/// has at that position. Merges that already exist are skipped.
pub fn write_buffer(sheet: &mut Worksheet, buffer: &ReportBuffer) {
    for ((row, column), cell) in buffer.cells() {
        let target: &mut Cell = sheet.get_cell_mut((column, row));

        if !cell.style.is_empty() {
            let mut style: Style = target.get_style().clone();
            apply_descriptor(&mut style, &cell.style);
            target.set_style(style);
        }

        match &cell.value {
            Some(CellValue::Text(text)) => {
                target.set_value_string(text.clone());
            }
            Some(CellValue::Number(number)) => {
                target.set_value_number(*number);
            }
            Some(CellValue::Formula { expression, cached }) => {
                target.set_formula(expression.clone());
                target.set_formula_result_default(cached.to_string());
            }
            None => {}
        }
    }

    let existing: HashSet<String> = sheet
        .get_merge_cells()
        .iter()
        .map(|range| range.get_range())
        .collect();
    let mut added: usize = 0;
    for merge in buffer.merges() {
        let range: String = merge.a1();
        if existing.contains(&range) {
            continue;
        }
        sheet.add_merge_cells(range);
        added += 1;
    }

    debug!(cells = buffer.len(), merges = added, "Wrote buffer to sheet");
}

fn read_cell(cell: &Cell) -> BufferCell {
    let value: Option<CellValue> = if cell.is_formula() {
        Some(CellValue::Formula {
            expression: cell.get_formula().to_string(),
            cached: cell.get_value().parse::<f64>().unwrap_or(0.0),
        })
    } else {
        let text: String = cell.get_value().to_string();
        (!text.is_empty()).then_some(CellValue::Text(text))
    };

    BufferCell {
        value,
        style: descriptor_from_style(cell.get_style()),
    }
}

/// Reads the block template from the top-left corner of `sheet`.
///
/// # Errors
///
/// Returns an error if the rows do not form a valid block.
pub fn read_block_template(sheet: &Worksheet) -> Result<BlockTemplate, ReportError> {
    let rows: Vec<Vec<BufferCell>> = (1..=BLOCK_TEMPLATE_ROWS)
        .map(|row| {
            (1..=BLOCK_WIDTH)
                .map(|column| {
                    sheet
                        .get_cell((column, row))
                        .map(read_cell)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let template: BlockTemplate =
        BlockTemplate::new(rows)?.with_header_merges(&header_merges(sheet))?;
    Ok(template)
}

/// Parses a merge like `A1:H1` into its first row and column span.
fn merge_bounds(range: &str) -> Option<(u32, u32, u32, u32)> {
    let (start, end) = range.split_once(':')?;
    let (first_column, first_row) = parse_cell_address(start)?;
    let (last_column, last_row) = parse_cell_address(end)?;
    Some((first_row, last_row, first_column, last_column))
}

/// Single-row merges of the sheet that lie inside the block header.
fn header_merges(sheet: &Worksheet) -> Vec<MergeRange> {
    sheet
        .get_merge_cells()
        .iter()
        .filter_map(|range| {
            let text: String = range.get_range();
            let (first_row, last_row, first_column, last_column) = merge_bounds(&text)?;
            if first_row != last_row || last_row > BLOCK_HEADER_ROWS || last_column > BLOCK_WIDTH {
                debug!(range = %text, "Ignoring merge outside the block header");
                return None;
            }
            Some(MergeRange::new(first_row, first_column, last_column))
        })
        .collect()
}

/// Removes the template block from the top of `sheet`, merges included.
///
/// Rows below the block move up, so the sheet is left with whatever
/// followed the block.
pub fn remove_block_template(sheet: &mut Worksheet) {
    sheet.get_merge_cells_mut().retain(|range| {
        merge_bounds(&range.get_range())
            .is_none_or(|(first_row, _, _, _)| first_row > BLOCK_TEMPLATE_ROWS)
    });
    sheet.remove_row(&1, &BLOCK_TEMPLATE_ROWS);
    debug!(rows = BLOCK_TEMPLATE_ROWS, "Removed template block");
}
