// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Feature tables inside `SQLite` and `GeoPackage` files.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use diesel::sqlite::Sqlite;
use std::path::Path;
use tracing::debug;

use boundary_recon::{AreaQuery, AreaRow};
use boundary_recon_domain::VillageCode;

use crate::csv_layer::AREA_COLUMNS;
use crate::error::SpatialError;

#[derive(QueryableByName)]
struct AreaRecord {
    #[diesel(sql_type = Nullable<Text>)]
    code: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    area: Option<f64>,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct SrsRow {
    #[diesel(sql_type = BigInt)]
    srs_id: i64,
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Opens a layer database read-only. A missing file yields `None`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened.
pub fn open_layer_database(path: &Path) -> Result<Option<SqliteConnection>, SpatialError> {
    if !path.is_file() {
        return Ok(None);
    }
    let url: String = format!("file:{}?mode=ro", path.display());
    Ok(Some(SqliteConnection::establish(&url)?))
}

/// Lists the tables whose name starts with `prefix`, sorted by name.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub fn list_tables(conn: &mut SqliteConnection, prefix: &str) -> Result<Vec<String>, SpatialError> {
    let rows: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| row.name)
        .filter(|name| name.starts_with(prefix))
        .collect())
}

fn table_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<String>, SpatialError> {
    let rows: Vec<NameRow> =
        diesel::sql_query(format!("PRAGMA table_info({})", quote_identifier(table))).load(conn)?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// Reference system declared for `table` in the `GeoPackage` catalog, if any.
fn declared_srid(conn: &mut SqliteConnection, table: &str) -> Result<Option<i64>, SpatialError> {
    if list_tables(conn, "gpkg_geometry_columns")?.is_empty() {
        return Ok(None);
    }
    let rows: Vec<SrsRow> = diesel::sql_query(
        "SELECT srs_id FROM gpkg_geometry_columns WHERE table_name = ?",
    )
    .bind::<Text, _>(table)
    .load(conn)?;
    Ok(rows.first().map(|row| row.srs_id))
}

fn find_column<'c>(columns: &'c [String], wanted: &str) -> Option<&'c String> {
    columns
        .iter()
        .find(|column| column.eq_ignore_ascii_case(wanted))
}

/// Reads the areas of the requested codes from a feature table.
///
/// A missing database or table yields no rows.
///
/// # Errors
///
/// Returns an error if the table lacks the id or area column, declares a
/// different reference system, or cannot be queried.
pub fn query_sqlite_layer(
    database: &Path,
    table: &str,
    query: &AreaQuery,
) -> Result<Vec<AreaRow>, SpatialError> {
    let Some(mut conn) = open_layer_database(database)? else {
        debug!(database = %database.display(), "Layer database not found");
        return Ok(Vec::new());
    };
    if !list_tables(&mut conn, table)?.iter().any(|name| name == table) {
        debug!(database = %database.display(), table, "Layer table not found");
        return Ok(Vec::new());
    }

    let layer: String = format!("{}#{table}", database.display());
    if let Some(srid) = declared_srid(&mut conn, table)?
        && srid != i64::from(query.srid)
    {
        return Err(SpatialError::ReferenceMismatch {
            layer,
            found: srid,
            expected: query.srid,
        });
    }

    let columns: Vec<String> = table_columns(&mut conn, table)?;
    let id_column: &String =
        find_column(&columns, &query.id_field).ok_or_else(|| SpatialError::MissingColumn {
            layer: layer.clone(),
            column: query.id_field.clone(),
        })?;
    let area_column: &String = AREA_COLUMNS
        .iter()
        .find_map(|name| find_column(&columns, name))
        .ok_or_else(|| SpatialError::MissingColumn {
            layer: layer.clone(),
            column: String::from("Shape_Area"),
        })?;

    if query.codes.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: String = vec!["?"; query.codes.len()].join(", ");
    let id: String = quote_identifier(id_column);
    let sql: String = format!(
        "SELECT CAST({id} AS TEXT) AS code, CAST({area} AS REAL) AS area \
         FROM {table} WHERE CAST({id} AS TEXT) IN ({placeholders})",
        area = quote_identifier(area_column),
        table = quote_identifier(table),
    );

    let mut statement = diesel::sql_query(sql).into_boxed::<Sqlite>();
    for code in &query.codes {
        statement = statement.bind::<Text, _>(code.value().to_string());
    }
    let records: Vec<AreaRecord> = statement.load(&mut conn)?;

    Ok(records
        .into_iter()
        .filter_map(|record| {
            Some(AreaRow {
                code: VillageCode::new(&record.code?),
                area: record.area?,
            })
        })
        .collect())
}
