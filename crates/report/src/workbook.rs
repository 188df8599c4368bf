// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Template workbooks and output files.

use std::path::{Path, PathBuf};

use boundary_recon::{BlockTemplate, ReportBuffer};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::ReportError;
use crate::sink::{read_block_template, remove_block_template, write_buffer};

/// Sheet holding the change list, when the template names one.
pub const CHANGE_LIST_SHEET: &str = "村里";

/// Reads a template workbook.
///
/// # Errors
///
/// Returns an error if the file is missing or is not a readable workbook.
pub fn open_template(path: &Path) -> Result<Spreadsheet, ReportError> {
    if !path.is_file() {
        return Err(ReportError::TemplateNotFound(path.to_path_buf()));
    }
    let book: Spreadsheet =
        umya_spreadsheet::reader::xlsx::read(path).map_err(|e| ReportError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!(path = %path.display(), sheets = book.get_sheet_collection().len(), "Opened template");
    Ok(book)
}

fn first_sheet_mut<'b>(book: &'b mut Spreadsheet, path: &Path) -> Result<&'b mut Worksheet, ReportError> {
    book.get_sheet_mut(&0)
        .ok_or_else(|| ReportError::NoSheets(path.to_path_buf()))
}

/// The change-list sheet: the one named [`CHANGE_LIST_SHEET`], or the first.
fn change_list_sheet_mut<'b>(
    book: &'b mut Spreadsheet,
    path: &Path,
) -> Result<&'b mut Worksheet, ReportError> {
    if book.get_sheet_by_name(CHANGE_LIST_SHEET).is_some() {
        return book
            .get_sheet_by_name_mut(CHANGE_LIST_SHEET)
            .ok_or_else(|| ReportError::NoSheets(path.to_path_buf()));
    }
    first_sheet_mut(book, path)
}

/// Writes `book` to `path`, replacing any existing file only once the new
/// one is complete.
///
/// # Errors
///
/// Returns an error if the workbook cannot be serialized or moved into place.
pub fn save_atomically(book: &Spreadsheet, path: &Path) -> Result<(), ReportError> {
    let dir: PathBuf = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let staging: NamedTempFile = tempfile::Builder::new()
        .prefix(".boundary-recon-")
        .suffix(".xlsx")
        .tempfile_in(&dir)
        .map_err(io_error)?;
    umya_spreadsheet::writer::xlsx::write(book, staging.path()).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    staging.persist(path).map_err(|e| io_error(e.error))?;

    info!(path = %path.display(), "Wrote workbook");
    Ok(())
}

/// Loads the block template from the first sheet of an area-report template.
///
/// # Errors
///
/// Returns an error if the template cannot be read or its block is invalid.
pub fn load_block_template(template: &Path) -> Result<BlockTemplate, ReportError> {
    let book: Spreadsheet = open_template(template)?;
    let sheet: &Worksheet = book
        .get_sheet(&0)
        .ok_or_else(|| ReportError::NoSheets(template.to_path_buf()))?;
    read_block_template(sheet)
}

/// Fills the change-list template with `buffer` and writes it to `output`.
///
/// # Errors
///
/// Returns an error if the template cannot be read or the output cannot be
/// written.
pub fn write_change_list(
    template: &Path,
    output: &Path,
    buffer: &ReportBuffer,
) -> Result<(), ReportError> {
    let mut book: Spreadsheet = open_template(template)?;
    write_buffer(change_list_sheet_mut(&mut book, template)?, buffer);
    save_atomically(&book, output)
}

/// Replaces the template block on the first sheet of the area-report
/// template with `buffer` and writes the result to `output`.
///
/// The buffer already carries a stamped copy of the block for every town,
/// so the template's own block is dropped first and none of its cells leak
/// into the first town's rows.
///
/// # Errors
///
/// Returns an error if the template cannot be read or the output cannot be
/// written.
pub fn write_area_report(
    template: &Path,
    output: &Path,
    buffer: &ReportBuffer,
) -> Result<(), ReportError> {
    let mut book: Spreadsheet = open_template(template)?;
    let sheet: &mut Worksheet = first_sheet_mut(&mut book, template)?;
    remove_block_template(sheet);
    write_buffer(sheet, buffer);
    save_atomically(&book, output)
}
