// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use boundary_recon_domain::{ModificationCase, VillageRecord};

use crate::data_models::{ModificationRow, VillageRow};
use crate::diesel_schema::{modify_data, village_nlsc};
use crate::error::PersistenceError;

/// Loads every village row in table order.
///
/// Rows without a village code are dropped.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_villages(conn: &mut SqliteConnection) -> Result<Vec<VillageRecord>, PersistenceError> {
    let rows: Vec<VillageRow> = village_nlsc::table
        .order(village_nlsc::rowid.asc())
        .select(VillageRow::as_select())
        .load(conn)?;

    let total: usize = rows.len();
    let records: Vec<VillageRecord> = rows.into_iter().filter_map(VillageRow::into_record).collect();
    debug!(total, kept = records.len(), "Loaded Village_NLSC rows");
    Ok(records)
}

/// Loads every modification row in table order.
///
/// Rows without a case id are dropped.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_modifications(
    conn: &mut SqliteConnection,
) -> Result<Vec<ModificationCase>, PersistenceError> {
    let rows: Vec<ModificationRow> = modify_data::table
        .order(modify_data::rowid.asc())
        .select(ModificationRow::as_select())
        .load(conn)?;

    let total: usize = rows.len();
    let cases: Vec<ModificationCase> = rows
        .into_iter()
        .filter_map(ModificationRow::into_case)
        .collect();
    debug!(total, kept = cases.len(), "Loaded Modify_Data rows");
    Ok(cases)
}
