// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a layer that exists.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed attribute export {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("layer {layer} has no column {column}")]
    MissingColumn { layer: String, column: String },
    #[error("layer {layer} has an invalid area '{value}' for {code}")]
    InvalidArea {
        layer: String,
        code: String,
        value: String,
    },
    #[error("layer {layer} is stored in EPSG:{found}, expected EPSG:{expected}")]
    ReferenceMismatch {
        layer: String,
        found: i64,
        expected: u32,
    },
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("cannot open layer database: {0}")]
    Connection(#[from] diesel::ConnectionError),
}
