// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::buffer::{MergeRange, ReportBuffer};
use tracing::debug;

/// Columns merged into one label cell on each total row.
pub const TOTAL_LABEL_COLUMNS: u32 = 3;

/// Merges the label cells of every total row.
///
/// Total rows are the ones the layout engine tagged while writing, so the
/// rendered label text is never inspected. Ranges already merged are left
/// alone, so finalizing twice gives the same result as finalizing once.
/// Returns the number of new merges.
pub fn finalize(buffer: &mut ReportBuffer) -> usize {
    let total_rows: Vec<u32> = buffer.total_rows().iter().copied().collect();

    let mut added: usize = 0;
    for row in total_rows {
        if buffer.add_merge(MergeRange::new(row, 1, TOTAL_LABEL_COLUMNS)) {
            added += 1;
        }
    }

    debug!(added, total = buffer.merges().len(), "Finalized total row merges");
    added
}
