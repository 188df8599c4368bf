// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{TownCode, VillageCode};

/// Validates that a village code is a non-empty run of ASCII digits.
///
/// Leading zeros are significant and preserved.
///
/// # Errors
///
/// Returns `DomainError::InvalidVillageCode` if the code is empty or
/// contains anything other than digits.
pub fn validate_village_code(code: &VillageCode) -> Result<(), DomainError> {
    if code.value().is_empty() {
        return Err(DomainError::InvalidVillageCode(String::from(
            "Village code cannot be empty",
        )));
    }
    if !code.value().chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidVillageCode(format!(
            "Village code must contain only digits, got '{}'",
            code.value()
        )));
    }
    Ok(())
}

/// Validates that a town code is a non-empty run of ASCII digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidTownCode` if the code is empty or contains
/// anything other than digits.
pub fn validate_town_code(code: &TownCode) -> Result<(), DomainError> {
    if code.value().is_empty() {
        return Err(DomainError::InvalidTownCode(String::from(
            "Town code cannot be empty",
        )));
    }
    if !code.value().chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidTownCode(format!(
            "Town code must contain only digits, got '{}'",
            code.value()
        )));
    }
    Ok(())
}
