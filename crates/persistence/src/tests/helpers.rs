// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ModificationRow, SourceDatabase, VillageRow};
use std::fs;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub fn create_test_village_row(code: &str, town: &str, add: Option<&str>, del: Option<&str>) -> VillageRow {
    VillageRow {
        county_name: Some(String::from("臺北市")),
        county_name_en: Some(String::from("Taipei City")),
        town_name: Some(format!("Town {town}")),
        town_name_en: Some(format!("Town {town} EN")),
        town_id: Some(town.to_string()),
        village_name: Some(format!("Village {code}")),
        village_name_en: Some(format!("Village {code} EN")),
        village_id: Some(code.to_string()),
        add_date: add.map(str::to_string),
        del_date: del.map(str::to_string),
    }
}

pub fn create_test_modification_row(case_id: &str, admin_id: &str, date: &str) -> ModificationRow {
    ModificationRow {
        case_id: Some(case_id.to_string()),
        admin_id: Some(admin_id.to_string()),
        m_date: Some(date.to_string()),
    }
}

pub fn create_test_database() -> SourceDatabase {
    let mut db: SourceDatabase = SourceDatabase::new_in_memory().unwrap();
    db.insert_villages(&[
        create_test_village_row("6300100002", "63000010", Some("2026-01-14"), None),
        create_test_village_row("6300100001", "63000010", None, Some("2026/1/14")),
        create_test_village_row("6300200001", "63000020", Some("2020-05-01 00:00:00"), None),
    ])
    .unwrap();
    db.insert_modifications(&[
        create_test_modification_row("C1", "6300100001;6300100002", "2026-01-14"),
        create_test_modification_row("C2", "6300200001", "2020-05-01"),
    ])
    .unwrap();
    db
}

/// Writes a single-sheet workbook, one slice per row. Cells that parse as
/// numbers are stored as numbers, the way spreadsheet tools save them.
pub fn write_workbook(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let mut book: Spreadsheet = umya_spreadsheet::new_file();
    let sheet: &mut Worksheet = book.get_sheet_mut(&0).unwrap();
    for (row, values) in (1_u32..).zip(rows) {
        for (column, value) in (1_u32..).zip(values.iter()) {
            let cell = sheet.get_cell_mut((column, row));
            match value.parse::<f64>() {
                Ok(number) if row > 1 => {
                    cell.set_value_number(number);
                }
                _ => {
                    cell.set_value_string(*value);
                }
            }
        }
    }

    let path: PathBuf = dir.join(name);
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
