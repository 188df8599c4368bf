// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;
use std::path::{Path, PathBuf};

use boundary_recon_persistence::{ModificationRow, SourceDatabase, VillageRow};
use boundary_recon_spatial::SourceMode;
use time::{Date, Month};
use umya_spreadsheet::Spreadsheet;

use crate::config::{AreaReportConfig, RunConfig};

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn create_test_village_row(code: &str, town: &str, add: Option<&str>, del: Option<&str>) -> VillageRow {
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

/// A boundary database where two villages of town `63000010` changed on
/// 2026-01-14 and one village of `63000020` changed long before.
pub fn create_test_database(dir: &Path) -> PathBuf {
    let path: PathBuf = dir.join("boundary.sqlite");
    let mut db: SourceDatabase = SourceDatabase::create(&path).unwrap();
    db.insert_villages(&[
        create_test_village_row("6300100002", "63000010", None, Some("2026/1/14")),
        create_test_village_row("6300100001", "63000010", Some("2026-01-14"), None),
        create_test_village_row("6300200001", "63000020", Some("2020-05-01"), None),
    ])
    .unwrap();
    db.insert_modifications(&[ModificationRow {
        case_id: Some(String::from("C1")),
        admin_id: Some(String::from("6300100001;6300100002")),
        m_date: Some(String::from("2026-01-14")),
    }])
    .unwrap();
    path
}

pub fn create_template(dir: &Path, name: &str, change_list_sheet: bool) -> PathBuf {
    let mut book: Spreadsheet = umya_spreadsheet::new_file();
    if change_list_sheet {
        book.new_sheet("村里").unwrap();
    }
    book.get_sheet_mut(&0)
        .unwrap()
        .get_cell_mut("B3")
        .set_value_string("村里代碼");

    let path: PathBuf = dir.join(name);
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

/// Master tables, templates and two shapefile exports for a full run.
pub fn create_test_config(dir: &Path, snapshot: Date) -> RunConfig {
    let village_master: PathBuf = write_file(
        dir,
        "village_master.csv",
        concat!(
            "COUNTYNAME,TOWNNAME,TOWNCODE,VILLCODE,VILLNAME\n",
            "臺北市,中正區,63000010,6300100003,C里\n",
            "臺北市,中正區,63000010,6300100001,A里\n",
            "臺北市,中正區,63000010,6300100002,B里\n",
            "臺北市,大同區,63000020,6300200001,D里\n",
        ),
    );
    let town_area: PathBuf = write_file(
        dir,
        "town_area.csv",
        "TOWNCODE,Shape_Area\n63000010,5000\n",
    );
    write_file(
        dir,
        "layers/shp_2024/village.csv",
        "VILLCODE,Shape_Area\n6300100001,10\n6300100002,5\n6300100003,7\n",
    );
    write_file(
        dir,
        "layers/shp_2025/village.csv",
        "VILLCODE,Shape_Area\n6300100001,12\n6300100003,7\n",
    );

    RunConfig {
        snapshot_date: snapshot,
        modify_date: snapshot,
        mode: SourceMode::Shapefile,
        database: create_test_database(dir),
        output_path: dir.join("change_list.xlsx"),
        change_list_template: create_template(dir, "change_list_template.xlsx", true),
        area_report: Some(AreaReportConfig {
            output_path: dir.join("area_report.xlsx"),
            template: create_template(dir, "area_template.xlsx", false),
            village_master,
            town_area,
            layers_dir: dir.join("layers"),
            summary_json: Some(dir.join("summary.json")),
        }),
    }
}

pub fn change_date() -> Date {
    Date::from_calendar_date(2026, Month::January, 14).unwrap()
}

pub fn cell_text(book: &Spreadsheet, sheet: &str, address: &str) -> String {
    book.get_sheet_by_name(sheet)
        .and_then(|sheet| sheet.get_cell(address))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}
