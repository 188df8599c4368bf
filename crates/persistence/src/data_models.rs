// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{modify_data, village_nlsc};
use boundary_recon_domain::{
    ModificationCase, TownCode, VillageCode, VillageRecord, parse_record_date,
};
use diesel::prelude::*;

/// Diesel Queryable struct for `Village_NLSC` rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = village_nlsc)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VillageRow {
    pub county_name: Option<String>,
    pub county_name_en: Option<String>,
    pub town_name: Option<String>,
    pub town_name_en: Option<String>,
    pub town_id: Option<String>,
    pub village_name: Option<String>,
    pub village_name_en: Option<String>,
    pub village_id: Option<String>,
    pub add_date: Option<String>,
    pub del_date: Option<String>,
}

/// Diesel Queryable struct for `Modify_Data` rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = modify_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ModificationRow {
    pub case_id: Option<String>,
    pub admin_id: Option<String>,
    pub m_date: Option<String>,
}

fn text(value: Option<&String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl VillageRow {
    /// Converts the row into a domain record.
    ///
    /// Returns `None` when the row has no village code.
    #[must_use]
    pub fn into_record(self) -> Option<VillageRecord> {
        let code: String = text(self.village_id.as_ref());
        if code.is_empty() {
            return None;
        }

        Some(VillageRecord {
            code: VillageCode::new(&code),
            name: text(self.village_name.as_ref()),
            name_en: text(self.village_name_en.as_ref()),
            town_code: TownCode::new(&text(self.town_id.as_ref())),
            town_name: text(self.town_name.as_ref()),
            town_name_en: text(self.town_name_en.as_ref()),
            county_name: text(self.county_name.as_ref()),
            county_name_en: text(self.county_name_en.as_ref()),
            added_on: self.add_date.as_deref().and_then(parse_record_date),
            removed_on: self.del_date.as_deref().and_then(parse_record_date),
        })
    }
}

impl ModificationRow {
    /// Converts the row into a domain case.
    ///
    /// Returns `None` when the row has no case id.
    #[must_use]
    pub fn into_case(self) -> Option<ModificationCase> {
        let case_id: String = text(self.case_id.as_ref());
        if case_id.is_empty() {
            return None;
        }

        Some(ModificationCase::new(
            &case_id,
            self.admin_id.as_deref().unwrap_or_default(),
            self.m_date.as_deref().and_then(parse_record_date),
        ))
    }
}
