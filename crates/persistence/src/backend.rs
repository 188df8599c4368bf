// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite connection handling.
//!
//! The boundary database is an export the tool only ever reads. Creating the
//! tables is limited to building new exports and test fixtures.

use diesel::connection::SimpleConnection;
use diesel::{Connection, SqliteConnection};
use std::path::Path;
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Table definitions matching the boundary database export.
pub const SOURCE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "Village_NLSC" (
    "C_Name" TEXT,
    "C_Name_e" TEXT,
    "T_Name" TEXT,
    "T_Name_e" TEXT,
    "TOWN_ID" TEXT,
    "V_Name" TEXT,
    "V_Name_e" TEXT,
    "VILLAGE_ID" TEXT,
    "Add_Date" TEXT,
    "Del_Date" TEXT
);
CREATE TABLE IF NOT EXISTS "Modify_Data" (
    "CASE_ID" TEXT,
    "Admin_ID" TEXT,
    "M_Date" TEXT
);
"#;

fn path_str(path: &Path) -> Result<&str, PersistenceError> {
    path.to_str().ok_or_else(|| {
        PersistenceError::InitializationError(format!(
            "Database path is not valid UTF-8: {}",
            path.display()
        ))
    })
}

/// Opens an existing database without write access.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be opened.
pub fn open_read_only(path: &Path) -> Result<SqliteConnection, PersistenceError> {
    if !path.is_file() {
        return Err(PersistenceError::DatabaseNotFound(
            path.display().to_string(),
        ));
    }

    let url: String = format!("file:{}?mode=ro", path_str(path)?);
    let conn: SqliteConnection = SqliteConnection::establish(&url)?;
    info!(path = %path.display(), "Opened boundary database read-only");
    Ok(conn)
}

/// Opens (creating if needed) a database and makes sure the tables exist.
///
/// # Errors
///
/// Returns an error if the connection or table creation fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    conn.batch_execute(SOURCE_SCHEMA_SQL)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
    debug!(database_url, "Initialized boundary database tables");
    Ok(conn)
}

/// Same as [`initialize_database`] for a file path.
///
/// # Errors
///
/// Returns an error if the path is not UTF-8 or initialization fails.
pub fn initialize_file(path: &Path) -> Result<SqliteConnection, PersistenceError> {
    initialize_database(path_str(path)?)
}
