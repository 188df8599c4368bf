// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer::{CellValue, ReportBuffer};
use crate::error::CoreError;
use crate::style::{StyleDescriptor, standard_cell_style};
use boundary_recon_domain::{CaseIndex, VillageRecord, format_report_date, validate_village_code};
use time::Date;
use tracing::{info, warn};

/// First row written below the change list header.
pub const CHANGE_LIST_FIRST_ROW: u32 = 3;

/// Columns `A` through `L` get the standard look on every written row.
pub const CHANGE_LIST_STYLED_COLUMNS: u32 = 12;

const COLUMN_CASES: u32 = 9;
const COLUMN_DATE: u32 = 11;

/// Lays out one change list row per matched village.
///
/// Columns `A` to `H` hold county, town and village names with the town and
/// village codes, `I` the case reference text and `K` the snapshot date.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn build_change_list(
    records: &[VillageRecord],
    cases: &CaseIndex,
    date: Date,
) -> Result<ReportBuffer, CoreError> {
    let style: StyleDescriptor = standard_cell_style();
    let date_text: String = format_report_date(date)?;
    let mut buffer: ReportBuffer = ReportBuffer::new();

    for (row, record) in (CHANGE_LIST_FIRST_ROW..).zip(records) {
        if let Err(e) = validate_village_code(&record.code) {
            warn!(row, error = %e, "Writing village with unusual code");
        }

        let fields: [&str; 8] = [
            &record.county_name,
            &record.county_name_en,
            &record.town_name,
            &record.town_name_en,
            record.town_code.value(),
            &record.name,
            &record.name_en,
            record.code.value(),
        ];
        for (column, field) in (1..).zip(fields) {
            buffer.set_value(row, column, CellValue::Text(field.to_string()));
        }
        buffer.set_value(
            row,
            COLUMN_CASES,
            CellValue::Text(cases.reference_text(&record.code)),
        );
        buffer.set_value(row, COLUMN_DATE, CellValue::Text(date_text.clone()));

        for column in 1..=CHANGE_LIST_STYLED_COLUMNS {
            buffer.overlay_style(row, column, &style);
        }
    }

    info!(rows = records.len(), date = %date_text, "Built change list");
    Ok(buffer)
}
