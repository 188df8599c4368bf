// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::case_index::AFFECTED_CODES_DELIMITER;
use serde::{Deserialize, Serialize};
use time::Date;

/// Identifier of a village.
///
/// Codes are compared as strings. Leading and trailing whitespace is
/// stripped at construction so that values read from different sources
/// match each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VillageCode {
    value: String,
}

impl VillageCode {
    /// Creates a new `VillageCode` from a raw value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for VillageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Identifier of a town (the parent unit of a village).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TownCode {
    value: String,
}

impl TownCode {
    /// Creates a new `TownCode` from a raw value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for TownCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A row of the village register.
///
/// A village appears in a snapshot when either `added_on` or `removed_on`
/// equals the snapshot date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillageRecord {
    pub code: VillageCode,
    pub name: String,
    pub name_en: String,
    pub town_code: TownCode,
    pub town_name: String,
    pub town_name_en: String,
    pub county_name: String,
    pub county_name_en: String,
    /// Date the village came into effect, if known.
    pub added_on: Option<Date>,
    /// Date the village was retired, if known.
    pub removed_on: Option<Date>,
}

impl VillageRecord {
    /// Returns whether this record changed on the given date.
    #[must_use]
    pub fn changed_on(&self, date: Date) -> bool {
        self.added_on == Some(date) || self.removed_on == Some(date)
    }
}

/// A modification case touching one or more villages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationCase {
    /// Case identifier, as recorded.
    pub case_id: String,
    /// Raw list of affected village codes separated by `;`.
    pub affected_codes: String,
    /// Date the case took effect.
    pub modified_on: Option<Date>,
}

impl ModificationCase {
    /// Creates a new modification case.
    #[must_use]
    pub fn new(case_id: &str, affected_codes: &str, modified_on: Option<Date>) -> Self {
        Self {
            case_id: case_id.trim().to_string(),
            affected_codes: affected_codes.to_string(),
            modified_on,
        }
    }

    /// Splits the raw code list into individual village codes.
    ///
    /// Tokens are trimmed and empty tokens are skipped, so `"A; ;B;"`
    /// yields `A` and `B`.
    #[must_use]
    pub fn affected_codes(&self) -> Vec<VillageCode> {
        self.affected_codes
            .split(AFFECTED_CODES_DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(VillageCode::new)
            .collect()
    }
}

/// A row of the village master table used for area reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterVillage {
    pub county_name: String,
    pub town_name: String,
    pub town_code: TownCode,
    pub code: VillageCode,
    pub name: String,
}

/// A village listed beneath its town in the area report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillageMember {
    pub code: VillageCode,
    pub name: String,
}

/// A town and the villages reported beneath it.
///
/// `members` is never empty and is ordered by village code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownGroup {
    pub code: TownCode,
    pub name: String,
    pub county_name: String,
    /// Official area of the town, `0.0` when the reference table lacks it.
    pub reference_area: f64,
    pub members: Vec<VillageMember>,
}

impl TownGroup {
    /// Returns the number of villages in this group.
    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.members.len()
    }
}
