// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A village code is empty or contains non-digit characters.
    InvalidVillageCode(String),
    /// A town code is empty or contains non-digit characters.
    InvalidTownCode(String),
    /// Failed to parse a date supplied by the operator.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to render a date for a report.
    DateFormatError {
        /// The date being formatted, in ISO form.
        date: String,
        /// The formatting error message.
        error: String,
    },
    /// A reference area is not a finite number.
    InvalidReferenceArea {
        /// The town the area belongs to.
        town_code: String,
        /// The offending value as read.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVillageCode(msg) => write!(f, "Invalid village code: {msg}"),
            Self::InvalidTownCode(msg) => write!(f, "Invalid town code: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError { date, error } => {
                write!(f, "Failed to format date {date}: {error}")
            }
            Self::InvalidReferenceArea { town_code, value } => {
                write!(
                    f,
                    "Invalid reference area '{value}' for town {town_code}: must be a finite number"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
