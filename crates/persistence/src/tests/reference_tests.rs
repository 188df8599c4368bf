// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{write_file, write_workbook};
use crate::{PersistenceError, load_town_areas, load_village_master};
use boundary_recon_domain::{MasterVillage, TownAreaTable, TownCode, VillageCode};

#[test]
fn test_load_village_master() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "villages.csv",
        concat!(
            "COUNTYNAME,TOWNNAME,TOWNCODE,VILLCODE,VILLNAME\n",
            "臺北市,松山區, 63000010 ,6300100001,莊敬里\n",
            "臺北市,松山區,63000010,,空白\n",
            "臺北市,信義區,63000020,6300200001,西村里\n",
        ),
    );

    let villages: Vec<MasterVillage> = load_village_master(&path).unwrap();

    assert_eq!(villages.len(), 2);
    assert_eq!(villages[0].town_code, TownCode::new("63000010"));
    assert_eq!(villages[0].code, VillageCode::new("6300100001"));
    assert_eq!(villages[0].name, "莊敬里");
    assert_eq!(villages[1].town_name, "信義區");
}

#[test]
fn test_load_village_master_headers_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "villages.csv",
        "VillName, villcode ,TownCode,TownName,CountyName,Extra\nA,1,10,T,C,x\n",
    );

    let villages: Vec<MasterVillage> = load_village_master(&path).unwrap();
    assert_eq!(villages[0].name, "A");
    assert_eq!(villages[0].county_name, "C");
}

#[test]
fn test_load_village_master_missing_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "villages.csv", "TOWNCODE,VILLCODE\n10,1\n");

    let result: Result<Vec<MasterVillage>, PersistenceError> = load_village_master(&path);
    match result {
        Err(PersistenceError::ReferenceFileUnreadable { reason, .. }) => {
            assert!(reason.contains("countyname"));
            assert!(reason.contains("villname"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_load_village_master_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<Vec<MasterVillage>, PersistenceError> =
        load_village_master(&dir.path().join("absent.csv"));
    assert!(matches!(
        result,
        Err(PersistenceError::ReferenceFileUnreadable { .. })
    ));
}

#[test]
fn test_load_town_areas() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "towns.csv",
        "TOWNCODE,Shape_Area\n63000010,9287654.125\n63000020,\n63000030,11.5\n",
    );

    let table: TownAreaTable = load_town_areas(&path).unwrap();

    assert_eq!(table.len(), 2);
    assert!((table.area_of(&TownCode::new("63000010")).unwrap() - 9_287_654.125).abs() < 1e-9);
    assert_eq!(table.area_of(&TownCode::new("63000020")), None);
}

#[test]
fn test_load_town_areas_rejects_bad_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "towns.csv", "TOWNCODE,SHAPE_AREA\n63000010,big\n");

    let result: Result<TownAreaTable, PersistenceError> = load_town_areas(&path);
    assert!(matches!(
        result,
        Err(PersistenceError::InvalidReferenceData(_))
    ));
}

#[test]
fn test_load_village_master_from_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(
        dir.path(),
        "全台村里代碼表.xlsx",
        &[
            &["CountyName", "TownName", "TOWNCODE", "VILLCODE", "VILLNAME"],
            &["臺北市", "松山區", "63000010", "6300100001", "莊敬里"],
            &["", "", "", "", ""],
            &["臺北市", "信義區", "63000020", "6300200001", "西村里"],
        ],
    );

    let villages: Vec<MasterVillage> = load_village_master(&path).unwrap();

    assert_eq!(villages.len(), 2);
    assert_eq!(villages[0].town_code, TownCode::new("63000010"));
    assert_eq!(villages[0].code, VillageCode::new("6300100001"));
    assert_eq!(villages[1].county_name, "臺北市");
    assert_eq!(villages[1].name, "西村里");
}

#[test]
fn test_load_town_areas_from_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(
        dir.path(),
        "鄉鎮市區面積表.XLSX",
        &[
            &["TOWNCODE", "Shape_Area"],
            &["63000010", "9287654.125"],
            &["63000020", ""],
        ],
    );

    let table: TownAreaTable = load_town_areas(&path).unwrap();

    assert_eq!(table.len(), 1);
    assert!((table.area_of(&TownCode::new("63000010")).unwrap() - 9_287_654.125).abs() < 1e-9);
}

#[test]
fn test_workbook_missing_header_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), "towns.xlsx", &[&["TOWNCODE"], &["63000010"]]);

    let result: Result<TownAreaTable, PersistenceError> = load_town_areas(&path);
    match result {
        Err(PersistenceError::ReferenceFileUnreadable { reason, .. }) => {
            assert!(reason.contains("shape_area"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_workbook_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<Vec<MasterVillage>, PersistenceError> =
        load_village_master(&dir.path().join("absent.xlsx"));
    assert!(matches!(
        result,
        Err(PersistenceError::ReferenceFileUnreadable { .. })
    ));
}
