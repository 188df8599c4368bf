// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};

use boundary_recon::{AreaQuery, AreaRow, SpatialQuery};
use boundary_recon_domain::{TownCode, TownGroup, VillageCode, VillageMember};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Captions of the village row header in the area template.
pub const CAPTIONS: [&str; 6] = ["鄉鎮市區", "村里代碼", "村里名稱", "舊面積", "新面積", "差異"];

/// An area-report template: a title row with a shaded fill, a town info
/// row, captions, a village row and a total row.
pub fn create_area_template(dir: &Path) -> PathBuf {
    let mut book: Spreadsheet = umya_spreadsheet::new_file();
    let sheet: &mut Worksheet = book.get_sheet_mut(&0).unwrap();

    let title = sheet.get_cell_mut("A1");
    title.set_value_string("村里面積差異");
    title.get_style_mut().get_font_mut().set_bold(true);
    title
        .get_style_mut()
        .get_fill_mut()
        .get_pattern_fill_mut()
        .get_foreground_color_mut()
        .set_argb("FFDDEBF7");

    for (column, caption) in (1..).zip(CAPTIONS) {
        sheet.get_cell_mut((column, 3)).set_value_string(caption);
    }
    sheet
        .get_cell_mut("F4")
        .get_style_mut()
        .get_font_mut()
        .set_italic(true);

    let path: PathBuf = dir.join("area_template.xlsx");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

/// An area-report template whose total row is bold, filled and annotated
/// in column G, with the title merged across the block.
pub fn create_decorated_area_template(dir: &Path) -> PathBuf {
    let mut book: Spreadsheet = umya_spreadsheet::new_file();
    let sheet: &mut Worksheet = book.get_sheet_mut(&0).unwrap();

    sheet.get_cell_mut("A1").set_value_string("村里面積差異");
    sheet.add_merge_cells("A1:H1");
    for (column, caption) in (1..).zip(CAPTIONS) {
        sheet.get_cell_mut((column, 3)).set_value_string(caption);
    }
    for address in ["A5", "B5", "C5", "D5", "E5", "F5", "G5"] {
        let style = sheet.get_cell_mut(address).get_style_mut();
        style.get_font_mut().set_bold(true);
        style
            .get_fill_mut()
            .get_pattern_fill_mut()
            .get_foreground_color_mut()
            .set_argb(TOTAL_FILL_ARGB);
    }
    sheet.get_cell_mut("G5").set_value_string(TOTAL_NOTE);
    sheet.add_merge_cells("A5:C5");

    let path: PathBuf = dir.join("decorated_area_template.xlsx");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

pub const TOTAL_FILL_ARGB: &str = "FFFFC000";
pub const TOTAL_NOTE: &str = "小計備註";

/// A change-list template, optionally with the change list on a second
/// sheet named `村里`.
pub fn create_change_list_template(dir: &Path, named_sheet: bool) -> PathBuf {
    let mut book: Spreadsheet = umya_spreadsheet::new_file();
    book.get_sheet_mut(&0)
        .unwrap()
        .get_cell_mut("A1")
        .set_value_string("cover");
    if named_sheet {
        let sheet: &mut Worksheet = book.new_sheet("村里").unwrap();
        sheet.get_cell_mut("A2").set_value_string("縣市名稱");
    }

    let path: PathBuf = dir.join("change_list_template.xlsx");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

pub fn read_workbook(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).unwrap()
}

pub fn cell_text(sheet: &Worksheet, address: &str) -> String {
    sheet
        .get_cell(address)
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

pub fn create_test_group(code: &str, name: &str, members: &[(&str, &str)]) -> TownGroup {
    TownGroup {
        code: TownCode::new(code),
        name: name.to_string(),
        county_name: String::from("臺北市"),
        reference_area: 2500.0,
        members: members
            .iter()
            .map(|(code, name)| VillageMember {
                code: VillageCode::new(code),
                name: (*name).to_string(),
            })
            .collect(),
    }
}

/// Areas keyed by layer name (`old` or `new`).
pub struct FixedAreas {
    pub old: Vec<(&'static str, f64)>,
    pub new: Vec<(&'static str, f64)>,
}

impl SpatialQuery for FixedAreas {
    type Layer = &'static str;
    type Error = String;

    fn query_areas(&self, layer: &&'static str, query: &AreaQuery) -> Result<Vec<AreaRow>, String> {
        let rows: &[(&str, f64)] = if *layer == "old" { &self.old } else { &self.new };
        Ok(rows
            .iter()
            .map(|(code, area)| AreaRow {
                code: VillageCode::new(code),
                area: *area,
            })
            .filter(|row| query.codes.contains(&row.code))
            .collect())
    }
}
