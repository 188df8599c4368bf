// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ModificationRow, VillageRow};
use crate::diesel_schema::{modify_data, village_nlsc};
use crate::error::PersistenceError;

/// Appends rows to `Village_NLSC` in one transaction, one statement per row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_villages(
    conn: &mut SqliteConnection,
    rows: &[VillageRow],
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        let mut inserted: usize = 0;
        for row in rows {
            inserted += diesel::insert_into(village_nlsc::table)
                .values(row)
                .execute(conn)?;
        }
        Ok(inserted)
    })
}

/// Appends rows to `Modify_Data`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_modifications(
    conn: &mut SqliteConnection,
    rows: &[ModificationRow],
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        let mut inserted: usize = 0;
        for row in rows {
            inserted += diesel::insert_into(modify_data::table)
                .values(row)
                .execute(conn)?;
        }
        Ok(inserted)
    })
}
