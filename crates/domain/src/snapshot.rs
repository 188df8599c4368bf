// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{TownCode, VillageCode, VillageRecord};
use std::collections::{BTreeSet, HashSet};
use time::Date;

/// Selects the villages that were added or removed on `target`.
///
/// Records are taken in source order. When a village code appears more than
/// once, the first matching record wins. The result is ordered by village
/// code, and records sharing a code keep their source order (the sort is
/// stable, although after de-duplication codes are unique).
#[must_use]
pub fn match_snapshot(records: &[VillageRecord], target: Date) -> Vec<VillageRecord> {
    let mut seen: HashSet<&VillageCode> = HashSet::new();
    let mut matched: Vec<VillageRecord> = records
        .iter()
        .filter(|record| record.changed_on(target))
        .filter(|record| seen.insert(&record.code))
        .cloned()
        .collect();

    matched.sort_by(|a, b| a.code.cmp(&b.code));
    matched
}

/// Returns the distinct town codes touched by a matched snapshot, ascending.
#[must_use]
pub fn target_town_codes(snapshot: &[VillageRecord]) -> Vec<TownCode> {
    snapshot
        .iter()
        .map(|record| record.town_code.clone())
        .collect::<BTreeSet<TownCode>>()
        .into_iter()
        .collect()
}
