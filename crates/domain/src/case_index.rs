// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ModificationCase, VillageCode};
use std::collections::HashMap;
use time::Date;

/// Delimiter between village codes in a case's affected-codes field.
pub const AFFECTED_CODES_DELIMITER: char = ';';

/// Separator used when several case ids are shown in one cell.
pub const CASE_REFERENCE_SEPARATOR: &str = "、";

/// Text shown for a village with no associated case.
pub const NO_CASE_PLACEHOLDER: &str = "-";

/// Immutable mapping from village code to the distinct case ids that touched
/// it, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseIndex {
    entries: HashMap<VillageCode, Vec<String>>,
}

impl CaseIndex {
    /// Returns the case ids recorded for `code`, or an empty slice.
    #[must_use]
    pub fn cases_for(&self, code: &VillageCode) -> &[String] {
        self.entries.get(code).map_or(&[], Vec::as_slice)
    }

    /// Returns the display text for `code`.
    ///
    /// Case ids are joined with [`CASE_REFERENCE_SEPARATOR`]. Villages with
    /// no case get [`NO_CASE_PLACEHOLDER`].
    #[must_use]
    pub fn reference_text(&self, code: &VillageCode) -> String {
        let cases: &[String] = self.cases_for(code);
        if cases.is_empty() {
            String::from(NO_CASE_PLACEHOLDER)
        } else {
            cases.join(CASE_REFERENCE_SEPARATOR)
        }
    }

    /// Returns the number of villages with at least one case.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the index holds no villages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_case(mut self, code: VillageCode, case_id: &str) -> Self {
        let cases: &mut Vec<String> = self.entries.entry(code).or_default();
        if !cases.iter().any(|existing| existing == case_id) {
            cases.push(case_id.to_string());
        }
        self
    }
}

/// Builds the case index for the cases effective on `target`.
///
/// Cases with a different or unparseable date are ignored. Feeding the same
/// case twice leaves the index unchanged.
#[must_use]
pub fn build_case_index(cases: &[ModificationCase], target: Date) -> CaseIndex {
    cases
        .iter()
        .filter(|case| case.modified_on == Some(target))
        .flat_map(|case| {
            case.affected_codes()
                .into_iter()
                .map(move |code| (code, case.case_id.as_str()))
        })
        .fold(CaseIndex::default(), |index, (code, case_id)| {
            index.with_case(code, case_id)
        })
}
