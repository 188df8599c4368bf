// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boundary_recon::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template {0} does not exist")]
    TemplateNotFound(PathBuf),
    #[error("cannot read workbook {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("cannot write workbook {path}: {reason}")]
    Write { path: PathBuf, reason: String },
    #[error("cannot replace {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("workbook {0} has no sheets")]
    NoSheets(PathBuf),
    #[error("invalid block template: {0}")]
    Template(#[from] CoreError),
}
