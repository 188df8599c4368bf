// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master reference tables, as CSV exports or `.xlsx` workbooks.
//!
//! Workbooks are read from their first sheet, with the header on row 1.
//! Headers are matched case-insensitively after trimming, so exports from
//! different tools load the same way.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use boundary_recon_domain::{
    DomainError, MasterVillage, TownAreaTable, TownCode, VillageCode,
};

use crate::error::PersistenceError;

/// Columns of the village master table.
const VILLAGE_MASTER_HEADERS: &[&str] = &["countyname", "townname", "towncode", "villcode", "villname"];

/// Columns of the town area table.
const TOWN_AREA_HEADERS: &[&str] = &["towncode", "shape_area"];

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn header_map(
    headers: &StringRecord,
    required: &[&str],
    path: &str,
) -> Result<HashMap<String, usize>, PersistenceError> {
    let mut map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        map.entry(normalize_header(header)).or_insert(idx);
    }

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !map.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(PersistenceError::ReferenceFileUnreadable {
            path: path.to_string(),
            reason: format!("missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(map)
}

fn field<'r>(record: &'r StringRecord, map: &HashMap<String, usize>, name: &str) -> &'r str {
    map.get(name)
        .and_then(|&idx| record.get(idx))
        .map_or("", str::trim)
}

/// Whether `path` names a spreadsheet workbook rather than a CSV export.
fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
}

fn read_table(
    path: &Path,
    required: &[&str],
) -> Result<(Vec<StringRecord>, HashMap<String, usize>), PersistenceError> {
    let (headers, records) = if is_workbook(path) {
        read_workbook_rows(path)?
    } else {
        read_csv_rows(path)?
    };
    let map: HashMap<String, usize> =
        header_map(&headers, required, &path.display().to_string())?;
    Ok((records, map))
}

/// Reads the first sheet of a workbook. Blank rows are skipped.
fn read_workbook_rows(path: &Path) -> Result<(StringRecord, Vec<StringRecord>), PersistenceError> {
    let unreadable = |reason: String| PersistenceError::ReferenceFileUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let book: Spreadsheet =
        umya_spreadsheet::reader::xlsx::read(path).map_err(|e| unreadable(e.to_string()))?;
    let sheet: &Worksheet = book
        .get_sheet(&0)
        .ok_or_else(|| unreadable(String::from("workbook has no sheets")))?;

    let (max_column, max_row) = sheet.get_highest_column_and_row();
    let row_values = |row: u32| -> StringRecord {
        (1..=max_column)
            .map(|column| {
                sheet
                    .get_cell((column, row))
                    .map(|cell| cell.get_value().to_string())
                    .unwrap_or_default()
            })
            .collect()
    };

    let headers: StringRecord = row_values(1);
    let records: Vec<StringRecord> = (2..=max_row)
        .map(row_values)
        .filter(|record| record.iter().any(|value| !value.trim().is_empty()))
        .collect();

    debug!(path = %path.display(), rows = records.len(), "Read workbook table");
    Ok((headers, records))
}

fn read_csv_rows(path: &Path) -> Result<(StringRecord, Vec<StringRecord>), PersistenceError> {
    let display: String = path.display().to_string();
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PersistenceError::ReferenceFileUnreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?;

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| PersistenceError::ReferenceFileUnreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?
        .clone();

    let mut records: Vec<StringRecord> = Vec::new();
    for result in reader.records() {
        let record: StringRecord = result.map_err(|e| PersistenceError::ReferenceRowInvalid {
            path: display.clone(),
            line: e.position().map_or(0, csv::Position::line),
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok((headers, records))
}

/// Loads the village master table (`COUNTYNAME, TOWNNAME, TOWNCODE,
/// VILLCODE, VILLNAME`) from a CSV export or an `.xlsx` workbook.
///
/// Rows without a village code are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks a required column.
pub fn load_village_master(path: &Path) -> Result<Vec<MasterVillage>, PersistenceError> {
    let (records, map) = read_table(path, VILLAGE_MASTER_HEADERS)?;

    let total: usize = records.len();
    let villages: Vec<MasterVillage> = records
        .iter()
        .filter(|record| !field(record, &map, "villcode").is_empty())
        .map(|record| MasterVillage {
            county_name: field(record, &map, "countyname").to_string(),
            town_name: field(record, &map, "townname").to_string(),
            town_code: TownCode::new(field(record, &map, "towncode")),
            code: VillageCode::new(field(record, &map, "villcode")),
            name: field(record, &map, "villname").to_string(),
        })
        .collect();

    if villages.len() < total {
        debug!(skipped = total - villages.len(), "Skipped master rows without village code");
    }
    info!(path = %path.display(), villages = villages.len(), "Loaded village master table");
    Ok(villages)
}

/// Loads the town area table (`TOWNCODE, Shape_Area`) from a CSV export
/// or an `.xlsx` workbook.
///
/// Rows with an empty area are skipped and later default to zero.
///
/// # Errors
///
/// Returns an error if the file cannot be read, lacks a required column, or
/// holds an area that is not a finite number.
pub fn load_town_areas(path: &Path) -> Result<TownAreaTable, PersistenceError> {
    let (records, map) = read_table(path, TOWN_AREA_HEADERS)?;

    let mut table: TownAreaTable = TownAreaTable::new();
    for record in &records {
        let code: &str = field(record, &map, "towncode");
        let raw_area: &str = field(record, &map, "shape_area");
        if code.is_empty() || raw_area.is_empty() {
            continue;
        }

        let area: f64 = raw_area
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| DomainError::InvalidReferenceArea {
                town_code: code.to_string(),
                value: raw_area.to_string(),
            })?;
        table.insert(TownCode::new(code), area);
    }

    info!(path = %path.display(), towns = table.len(), "Loaded town area table");
    Ok(table)
}
