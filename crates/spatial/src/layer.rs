// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt;
use std::path::PathBuf;

/// Where a village polygon layer lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerRef {
    /// Attribute table export of a polygon layer (one row per feature).
    CsvExport(PathBuf),
    /// A feature table inside an `SQLite` or `GeoPackage` file.
    SqliteTable { database: PathBuf, table: String },
}

impl fmt::Display for LayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CsvExport(path) => write!(f, "{}", path.display()),
            Self::SqliteTable { database, table } => {
                write!(f, "{}#{table}", database.display())
            }
        }
    }
}
