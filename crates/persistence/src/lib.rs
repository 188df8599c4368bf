// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Source data for boundary reconciliation.
//!
//! ## Boundary database
//!
//! The village register (`Village_NLSC`) and the modification cases
//! (`Modify_Data`) are read from an `SQLite` export of the administrative
//! boundary database. The file is opened read-only, both tables are read
//! once in row order, and the connection is closed again.
//!
//! ## Master tables
//!
//! The village master and the town area table are CSV exports loaded in
//! full (see [`load_village_master`] and [`load_town_areas`]).
//!
//! ## Testing
//!
//! Tests run against shared in-memory databases, one per
//! [`SourceDatabase::new_in_memory`] call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use boundary_recon_domain::{ModificationCase, VillageRecord};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod reference;

#[cfg(test)]
mod tests;

pub use backend::SOURCE_SCHEMA_SQL;
pub use data_models::{ModificationRow, VillageRow};
pub use error::PersistenceError;
pub use reference::{load_town_areas, load_village_master};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Everything read from the boundary database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSnapshot {
    /// Village rows in table order.
    pub villages: Vec<VillageRecord>,
    /// Modification cases in table order.
    pub cases: Vec<ModificationCase>,
}

/// A connection to a boundary database.
pub struct SourceDatabase {
    conn: SqliteConnection,
}

impl SourceDatabase {
    /// Opens an existing boundary database read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = backend::open_read_only(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Creates a boundary database file with empty tables, or opens an
    /// existing one for writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = backend::initialize_file(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Creates a boundary database held in memory.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_source_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Reads all village rows in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_villages(&mut self) -> Result<Vec<VillageRecord>, PersistenceError> {
        queries::load_villages(&mut self.conn)
    }

    /// Reads all modification cases in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_modifications(&mut self) -> Result<Vec<ModificationCase>, PersistenceError> {
        queries::load_modifications(&mut self.conn)
    }

    /// Reads both tables.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub fn load_snapshot(&mut self) -> Result<SourceSnapshot, PersistenceError> {
        Ok(SourceSnapshot {
            villages: self.load_villages()?,
            cases: self.load_modifications()?,
        })
    }

    /// Appends village rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including on a read-only
    /// connection).
    pub fn insert_villages(&mut self, rows: &[VillageRow]) -> Result<usize, PersistenceError> {
        mutations::insert_villages(&mut self.conn, rows)
    }

    /// Appends modification rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including on a read-only
    /// connection).
    pub fn insert_modifications(
        &mut self,
        rows: &[ModificationRow],
    ) -> Result<usize, PersistenceError> {
        mutations::insert_modifications(&mut self.conn, rows)
    }
}

/// Opens the boundary database at `path` read-only, reads both tables and
/// closes it.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or read.
pub fn load_source_snapshot<P: AsRef<Path>>(path: P) -> Result<SourceSnapshot, PersistenceError> {
    let snapshot: SourceSnapshot = {
        let mut db: SourceDatabase = SourceDatabase::open_read_only(path.as_ref())?;
        db.load_snapshot()?
    };
    info!(
        villages = snapshot.villages.len(),
        cases = snapshot.cases.len(),
        "Read boundary database"
    );
    Ok(snapshot)
}
