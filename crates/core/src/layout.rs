// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::area::{AreaDeltaResolver, AreaPair, SpatialQuery};
use crate::buffer::{BufferCell, CellValue, MergeRange, ReportBuffer, cell_address};
use crate::error::CoreError;
use crate::style::{AREA_NUMBER_FORMAT, StyleDescriptor, standard_cell_style};
use crate::template::{BLOCK_HEADER_ROWS, BLOCK_WIDTH, BlockTemplate};
use boundary_recon_domain::{DomainError, TownGroup, VillageCode};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Marker that identifies a total row.
pub const TOTAL_MARKER: &str = "總計";

/// Row the first block starts on.
pub const FIRST_BLOCK_ROW: u32 = 1;

const COLUMN_COUNTY: u32 = 1;
const COLUMN_TOWN: u32 = 2;
const COLUMN_CODE: u32 = 3;
const COLUMN_OLD: u32 = 4;
const COLUMN_NEW: u32 = 5;
const COLUMN_DELTA: u32 = 6;

/// Label written in the first column of a town's total row.
#[must_use]
pub fn total_label(town_name: &str) -> String {
    format!("{town_name} {TOTAL_MARKER}")
}

/// Position of one town's block in the area report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportBlock {
    pub start_row: u32,
    pub header_rows: u32,
    pub entity_row_count: u32,
}

impl ReportBlock {
    /// Row holding the county, town, code and reference area.
    #[must_use]
    pub const fn info_row(&self) -> u32 {
        self.start_row + 1
    }

    #[must_use]
    pub const fn first_entity_row(&self) -> u32 {
        self.start_row + self.header_rows
    }

    #[must_use]
    pub const fn total_row(&self) -> u32 {
        self.start_row + self.header_rows + self.entity_row_count
    }

    /// Start of the following block, leaving one blank row.
    #[must_use]
    pub const fn next_start(&self) -> u32 {
        self.total_row() + 2
    }
}

/// Computes block positions for towns with the given village counts.
///
/// # Errors
///
/// Returns `CoreError::TemplateMismatch` if a count is zero or the report
/// would run past the last addressable row.
pub fn plan_blocks(member_counts: &[usize]) -> Result<Vec<ReportBlock>, CoreError> {
    let mut blocks: Vec<ReportBlock> = Vec::with_capacity(member_counts.len());
    let mut start_row: u32 = FIRST_BLOCK_ROW;

    for &count in member_counts {
        if count == 0 {
            return Err(CoreError::TemplateMismatch(String::from(
                "cannot lay out a block without villages",
            )));
        }
        let entity_row_count: u32 = u32::try_from(count).map_err(|_| {
            CoreError::TemplateMismatch(format!("{count} villages do not fit in one sheet"))
        })?;
        let block: ReportBlock = ReportBlock {
            start_row,
            header_rows: BLOCK_HEADER_ROWS,
            entity_row_count,
        };
        start_row = block
            .total_row()
            .checked_add(2)
            .ok_or_else(|| CoreError::TemplateMismatch(String::from("report exceeds sheet size")))?;
        blocks.push(block);
    }

    Ok(blocks)
}

/// Totals of one town, as written on its total row.
///
/// `delta_total` is `new_total - old_total`, the value the total row's
/// formula evaluates to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TownAreaSummary {
    pub town_code: String,
    pub town_name: String,
    pub county_name: String,
    pub village_count: usize,
    pub old_total: f64,
    pub new_total: f64,
    pub delta_total: f64,
    pub total_row: u32,
}

/// A laid-out area report.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaReport {
    pub buffer: ReportBuffer,
    pub blocks: Vec<ReportBlock>,
    pub summaries: Vec<TownAreaSummary>,
}

/// Writes town groups into template blocks.
pub struct ReportLayoutEngine<'a, Q: SpatialQuery> {
    template: &'a BlockTemplate,
    resolver: &'a AreaDeltaResolver<'a, Q>,
}

impl<'a, Q: SpatialQuery> ReportLayoutEngine<'a, Q> {
    #[must_use]
    pub const fn new(template: &'a BlockTemplate, resolver: &'a AreaDeltaResolver<'a, Q>) -> Self {
        Self { template, resolver }
    }

    /// Lays out one block per non-empty group, in ascending town code order.
    ///
    /// Blocks are sized for their groups up front, so a town with no villages
    /// never reserves space.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference area is not finite or the blocks do
    /// not fit in a sheet.
    pub fn layout(&self, groups: &[TownGroup]) -> Result<AreaReport, CoreError> {
        let mut ordered: Vec<&TownGroup> = Vec::with_capacity(groups.len());
        for group in groups {
            if group.members.is_empty() {
                warn!(town = %group.code, "Skipping town without villages");
                continue;
            }
            if !group.reference_area.is_finite() {
                return Err(DomainError::InvalidReferenceArea {
                    town_code: group.code.value().to_string(),
                    value: group.reference_area.to_string(),
                }
                .into());
            }
            ordered.push(group);
        }
        ordered.sort_by(|a, b| a.code.cmp(&b.code));

        let counts: Vec<usize> = ordered.iter().map(|group| group.member_count()).collect();
        let blocks: Vec<ReportBlock> = plan_blocks(&counts)?;

        let mut buffer: ReportBuffer = ReportBuffer::new();
        for block in &blocks {
            self.stamp_block(&mut buffer, block);
        }
        debug!(blocks = blocks.len(), "Pre-expanded template blocks");

        let mut summaries: Vec<TownAreaSummary> = Vec::with_capacity(blocks.len());
        for (group, block) in ordered.iter().zip(&blocks) {
            summaries.push(self.write_group(&mut buffer, group, block));
        }

        info!(
            towns = summaries.len(),
            villages = counts.iter().sum::<usize>(),
            "Laid out area report"
        );

        Ok(AreaReport {
            buffer,
            blocks,
            summaries,
        })
    }

    fn stamp_block(&self, buffer: &mut ReportBuffer, block: &ReportBlock) {
        for offset in 0..block.header_rows {
            stamp_row(buffer, block.start_row + offset, self.template.header_row(offset));
        }
        for row in block.first_entity_row()..block.total_row() {
            stamp_row(buffer, row, self.template.member_row());
        }
        stamp_row(buffer, block.total_row(), self.template.total_row());
        for merge in self.template.header_merges() {
            buffer.add_merge(MergeRange::new(
                block.start_row + merge.row,
                merge.first_column,
                merge.last_column,
            ));
        }
    }

    fn write_group(
        &self,
        buffer: &mut ReportBuffer,
        group: &TownGroup,
        block: &ReportBlock,
    ) -> TownAreaSummary {
        let info_row: u32 = block.info_row();
        buffer.set_value(info_row, COLUMN_COUNTY, CellValue::Text(group.county_name.clone()));
        buffer.set_value(info_row, COLUMN_TOWN, CellValue::Text(group.name.clone()));
        buffer.set_value(info_row, COLUMN_CODE, CellValue::Text(group.code.value().to_string()));
        buffer.set_value(info_row, COLUMN_OLD, CellValue::Number(group.reference_area));
        buffer.set_value(info_row, COLUMN_NEW, CellValue::Number(group.reference_area));

        let codes: Vec<VillageCode> = group
            .members
            .iter()
            .map(|member| member.code.clone())
            .collect();
        let areas: AreaPair = self.resolver.resolve(&codes);
        debug!(
            town = %group.code,
            id_field = self.resolver.id_field(),
            old_matched = areas.old.len(),
            new_matched = areas.new.len(),
            "Resolved village areas"
        );

        let member_style: StyleDescriptor = standard_cell_style();
        let delta_style: StyleDescriptor = member_style.with_number_format(AREA_NUMBER_FORMAT);

        let mut old_total: f64 = 0.0;
        let mut new_total: f64 = 0.0;
        for (row, member) in (block.first_entity_row()..).zip(&group.members) {
            let old_area: f64 = areas.old.get(&member.code).copied().unwrap_or(0.0);
            let new_area: f64 = areas.new.get(&member.code).copied().unwrap_or(0.0);

            buffer.set_value(row, 1, CellValue::Text(group.name.clone()));
            buffer.set_value(row, 2, CellValue::Text(member.code.value().to_string()));
            buffer.set_value(row, 3, CellValue::Text(member.name.clone()));
            buffer.set_value(row, COLUMN_OLD, CellValue::Number(old_area));
            buffer.set_value(row, COLUMN_NEW, CellValue::Number(new_area));
            buffer.set_value(row, COLUMN_DELTA, delta_formula(row, new_area - old_area));

            for column in 1..=BLOCK_WIDTH {
                let style: &StyleDescriptor = if column == COLUMN_DELTA {
                    &delta_style
                } else {
                    &member_style
                };
                buffer.overlay_style(row, column, style);
            }

            old_total += old_area;
            new_total += new_area;
        }

        let total_row: u32 = block.total_row();
        // Difference of the two sums, matching the `=E-D` formula on the
        // total row. It equals the sum of the row deltas up to rounding.
        let delta_total: f64 = new_total - old_total;
        buffer.set_value(total_row, 1, CellValue::Text(total_label(&group.name)));
        buffer.tag_total_row(total_row);
        buffer.set_value(total_row, COLUMN_OLD, CellValue::Number(old_total));
        buffer.set_value(total_row, COLUMN_NEW, CellValue::Number(new_total));
        buffer.set_value(total_row, COLUMN_DELTA, delta_formula(total_row, delta_total));
        for column in 1..=BLOCK_WIDTH {
            let style: &StyleDescriptor = if (COLUMN_OLD..=COLUMN_DELTA).contains(&column) {
                &delta_style
            } else {
                &member_style
            };
            buffer.overlay_style(total_row, column, style);
        }

        TownAreaSummary {
            town_code: group.code.value().to_string(),
            town_name: group.name.clone(),
            county_name: group.county_name.clone(),
            village_count: group.member_count(),
            old_total,
            new_total,
            delta_total,
            total_row,
        }
    }
}

fn stamp_row(buffer: &mut ReportBuffer, row: u32, cells: &[BufferCell]) {
    for (column, cell) in (1..).zip(cells) {
        if cell.value.is_none() && cell.style.is_empty() {
            continue;
        }
        buffer.put(row, column, cell.clone());
    }
}

/// `new - old` for `row`, as a live formula with its value cached.
fn delta_formula(row: u32, cached: f64) -> CellValue {
    CellValue::Formula {
        expression: format!(
            "{}-{}",
            cell_address(COLUMN_NEW, row),
            cell_address(COLUMN_OLD, row)
        ),
        cached,
    }
}

