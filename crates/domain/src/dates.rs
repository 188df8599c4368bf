// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Month};

/// How the change list displays dates.
const REPORT_DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year]/[month]/[day]");

/// Parses a date as stored in the source tables.
///
/// Stored values come in several shapes (`2024-01-01`, `2024/1/1`,
/// `2024-01-01 00:00:00`, `2024-01-01T00:00:00`). Only the calendar part is
/// kept. Anything unparseable yields `None` and never matches a target date.
#[must_use]
pub fn parse_record_date(raw: &str) -> Option<Date> {
    let trimmed: &str = raw.trim();
    let calendar: &str = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();

    let mut parts = calendar.split(['-', '/']);
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let month: Month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Parses an operator-supplied target date.
///
/// Accepts the same shapes as [`parse_record_date`] but reports failures.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the value is not a calendar date.
pub fn parse_target_date(raw: &str) -> Result<Date, DomainError> {
    parse_record_date(raw).ok_or_else(|| DomainError::DateParseError {
        date_string: raw.to_string(),
        error: String::from("expected YYYY-MM-DD or YYYY/MM/DD"),
    })
}

/// Formats a date the way the change list displays it (`YYYY/MM/DD`).
///
/// # Errors
///
/// Returns `DomainError::DateFormatError` if the date cannot be rendered.
pub fn format_report_date(date: Date) -> Result<String, DomainError> {
    date.format(REPORT_DATE_FORMAT)
        .map_err(|e| DomainError::DateFormatError {
            date: date.to_string(),
            error: e.to_string(),
        })
}
