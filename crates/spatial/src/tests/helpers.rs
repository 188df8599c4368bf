// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boundary_recon::{AREA_SRID, AreaQuery, AreaRow};
use boundary_recon_domain::VillageCode;
use diesel::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

pub fn create_query(id_field: &str, codes: &[&str]) -> AreaQuery {
    AreaQuery {
        id_field: id_field.to_string(),
        codes: codes.iter().map(|code| VillageCode::new(code)).collect(),
        srid: AREA_SRID,
    }
}

pub fn area_of(rows: &[AreaRow], code: &str) -> Option<f64> {
    rows.iter()
        .find(|row| row.code.value() == code)
        .map(|row| row.area)
}

/// Creates a layer database with one feature table per entry, optionally
/// registering each table in a `GeoPackage` geometry catalog with `srid`.
pub fn create_layer_database(path: &Path, tables: &[(&str, &[(&str, f64)])], srid: Option<i64>) {
    let url: String = path.display().to_string();
    let mut conn: SqliteConnection = SqliteConnection::establish(&url).unwrap();

    if srid.is_some() {
        diesel::sql_query(
            "CREATE TABLE gpkg_geometry_columns (table_name TEXT NOT NULL, srs_id INTEGER NOT NULL)",
        )
        .execute(&mut conn)
        .unwrap();
    }

    for (table, features) in tables {
        diesel::sql_query(format!(
            "CREATE TABLE \"{table}\" (VILLAGE_ID TEXT, VILLAGE_NAME TEXT, Shape_Area REAL)"
        ))
        .execute(&mut conn)
        .unwrap();
        for (code, area) in *features {
            diesel::sql_query(format!(
                "INSERT INTO \"{table}\" (VILLAGE_ID, VILLAGE_NAME, Shape_Area) VALUES (?, 'name', ?)"
            ))
            .bind::<diesel::sql_types::Text, _>(*code)
            .bind::<diesel::sql_types::Double, _>(*area)
            .execute(&mut conn)
            .unwrap();
        }
        if let Some(srs_id) = srid {
            diesel::sql_query("INSERT INTO gpkg_geometry_columns (table_name, srs_id) VALUES (?, ?)")
                .bind::<diesel::sql_types::Text, _>(*table)
                .bind::<diesel::sql_types::BigInt, _>(srs_id)
                .execute(&mut conn)
                .unwrap();
        }
    }
}
