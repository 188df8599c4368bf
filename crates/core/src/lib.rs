// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Builds the change list and the area difference report as in-memory
//! sheet buffers.
//!
//! Nothing here touches a file. Spatial lookups go through the
//! [`SpatialQuery`] trait and the finished [`ReportBuffer`] is handed to a
//! writer.

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

mod area;
mod buffer;
mod change_list;
mod error;
mod finalize;
mod layout;
mod style;
mod template;

#[cfg(test)]
mod tests;

pub use area::{AREA_SRID, AreaDeltaResolver, AreaPair, AreaQuery, AreaRow, AreaSample, SpatialQuery};
pub use buffer::{
    BufferCell, CellValue, MergeRange, ReportBuffer, cell_address, column_letter,
    parse_cell_address,
};
pub use change_list::{CHANGE_LIST_FIRST_ROW, CHANGE_LIST_STYLED_COLUMNS, build_change_list};
pub use error::CoreError;
pub use finalize::{TOTAL_LABEL_COLUMNS, finalize};
pub use layout::{
    AreaReport, FIRST_BLOCK_ROW, ReportBlock, ReportLayoutEngine, TOTAL_MARKER, TownAreaSummary,
    plan_blocks, total_label,
};
pub use style::{
    AREA_NUMBER_FORMAT, AlignmentDescriptor, BLACK_ARGB, BorderSideDescriptor, BordersDescriptor,
    FillDescriptor, FontDescriptor, STANDARD_FONT_NAME, STANDARD_FONT_SIZE, StyleDescriptor,
    THIN_BORDER, standard_cell_style,
};
pub use template::{BLOCK_HEADER_ROWS, BLOCK_TEMPLATE_ROWS, BLOCK_WIDTH, BlockTemplate};
