// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads report templates and writes finished reports as `.xlsx` workbooks.

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

mod error;
mod sink;
mod style_map;
mod workbook;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use sink::{read_block_template, remove_block_template, write_buffer};
pub use style_map::{apply_descriptor, descriptor_from_style};
pub use workbook::{
    CHANGE_LIST_SHEET, load_block_template, open_template, save_atomically, write_area_report,
    write_change_list,
};
