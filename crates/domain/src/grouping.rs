// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{MasterVillage, TownCode, TownGroup, VillageCode, VillageMember};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Official town areas keyed by town code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TownAreaTable {
    areas: HashMap<TownCode, f64>,
}

impl TownAreaTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the area of a town. The first value recorded for a code wins.
    pub fn insert(&mut self, code: TownCode, area: f64) {
        self.areas.entry(code).or_insert(area);
    }

    /// Returns the recorded area of a town, if any.
    #[must_use]
    pub fn area_of(&self, code: &TownCode) -> Option<f64> {
        self.areas.get(code).copied()
    }

    /// Returns the number of towns in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl FromIterator<(TownCode, f64)> for TownAreaTable {
    fn from_iter<I: IntoIterator<Item = (TownCode, f64)>>(iter: I) -> Self {
        let mut table: Self = Self::new();
        for (code, area) in iter {
            table.insert(code, area);
        }
        table
    }
}

/// Result of grouping target towns against the village master table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TownGrouping {
    /// Non-empty groups in ascending town code order.
    pub groups: Vec<TownGroup>,
    /// Target towns with no village in the master table.
    pub skipped: Vec<TownCode>,
}

impl TownGrouping {
    /// Returns the total number of member villages across all groups.
    #[must_use]
    pub fn member_total(&self) -> usize {
        self.groups.iter().map(TownGroup::member_count).sum()
    }
}

/// Builds one group per target town from the village master table.
///
/// Every master village of a target town becomes a member, not only the
/// villages that changed. Members are ordered by village code and a code
/// listed twice in the master table is kept once. The county and town names
/// come from the first master row of the town in code order. A town missing
/// from `areas` gets a reference area of `0.0`.
///
/// Towns without any master village produce no group and are reported in
/// [`TownGrouping::skipped`].
#[must_use]
pub fn build_town_groups(
    targets: &[TownCode],
    master: &[MasterVillage],
    areas: &TownAreaTable,
) -> TownGrouping {
    let mut by_town: BTreeMap<&TownCode, BTreeMap<&VillageCode, &MasterVillage>> =
        BTreeMap::new();
    for village in master {
        by_town
            .entry(&village.town_code)
            .or_default()
            .entry(&village.code)
            .or_insert(village);
    }

    let ordered_targets: BTreeSet<&TownCode> = targets.iter().collect();
    let mut grouping: TownGrouping = TownGrouping::default();

    for code in ordered_targets {
        let Some(villages) = by_town.get(code) else {
            grouping.skipped.push(code.clone());
            continue;
        };
        let Some(first) = villages.values().next() else {
            grouping.skipped.push(code.clone());
            continue;
        };

        let members: Vec<VillageMember> = villages
            .values()
            .map(|village| VillageMember {
                code: village.code.clone(),
                name: village.name.clone(),
            })
            .collect();

        grouping.groups.push(TownGroup {
            code: code.clone(),
            name: first.town_name.clone(),
            county_name: first.county_name.clone(),
            reference_area: areas.area_of(code).unwrap_or(0.0),
            members,
        });
    }

    grouping
}
