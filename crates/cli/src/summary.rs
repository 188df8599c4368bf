// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;
use std::path::Path;

use boundary_recon::TownAreaSummary;
use color_eyre::eyre::{Context, Result};
use tracing::info;

/// Logs the totals of every town.
pub fn log_summaries(summaries: &[TownAreaSummary]) {
    for summary in summaries {
        info!(
            town = %summary.town_code,
            name = %summary.town_name,
            villages = summary.village_count,
            old = summary.old_total,
            new = summary.new_total,
            delta = summary.delta_total,
            "Town area totals"
        );
    }
}

/// Writes the town totals to `path` as a JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_summary_json(path: &Path, summaries: &[TownAreaSummary]) -> Result<()> {
    let json: String =
        serde_json::to_string_pretty(summaries).wrap_err("failed to serialize town totals")?;
    fs::write(path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), towns = summaries.len(), "Wrote town totals");
    Ok(())
}
