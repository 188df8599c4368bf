// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and pure matching rules for administrative boundary
//! reconciliation.
//!
//! Everything in this crate is deterministic and side-effect free: records
//! come in as plain values, and matched snapshots, case indexes and town
//! groups come out. Acquisition and output live in other crates.

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

mod case_index;
mod dates;
mod error;
mod grouping;
mod snapshot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use case_index::{
    AFFECTED_CODES_DELIMITER, CASE_REFERENCE_SEPARATOR, CaseIndex, NO_CASE_PLACEHOLDER,
    build_case_index,
};
pub use dates::{format_report_date, parse_record_date, parse_target_date};
pub use error::DomainError;
pub use grouping::{TownAreaTable, TownGrouping, build_town_groups};
pub use snapshot::{match_snapshot, target_town_codes};
pub use types::{
    MasterVillage, ModificationCase, TownCode, TownGroup, VillageCode, VillageMember,
    VillageRecord,
};
pub use validation::{validate_town_code, validate_village_code};
