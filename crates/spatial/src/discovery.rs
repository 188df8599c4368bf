// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Locating the old and new village layers under a base directory.
//!
//! Candidates are ordered by name; the first is the old layer and the last
//! is the new one. Discovery never fails: anything it cannot find is
//! reported and left absent, and areas on that side resolve to zero.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::SpatialError;
use crate::layer::LayerRef;
use crate::sqlite_layer::{list_tables, open_layer_database};

/// Prefix of shapefile export directories.
pub const SHAPEFILE_DIR_PREFIX: &str = "shp_";

/// Prefix and suffix of topology geodatabase directories.
pub const TOPOLOGY_GDB_PREFIX: &str = "administrative_boundary";
pub const TOPOLOGY_GDB_SUFFIX: &str = ".gdb";

/// Feature dataset and layer export inside a topology geodatabase.
pub const TOPOLOGY_DATASET: &str = "Check_topo_geo";
pub const TOPOLOGY_LAYER_FILE: &str = "Village.csv";

/// Database holding every village layer version side by side.
pub const MULTI_VERSION_DATABASE: &str = "GDB_M.gpkg";
pub const MULTI_VERSION_TABLE_PREFIX: &str = "Village_NLSC";

/// How the polygon layers are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    /// One `shp_*` directory per version.
    #[default]
    Shapefile,
    /// One topology geodatabase per version.
    GeodatabaseTopology,
    /// All versions as tables of a single database.
    GeodatabaseMulti,
}

impl SourceMode {
    /// Attribute holding the village code in this mode's layers.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Shapefile => "VILLCODE",
            Self::GeodatabaseTopology | Self::GeodatabaseMulti => "VILLAGE_ID",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shapefile => "SHP",
            Self::GeodatabaseTopology => "GDB_T",
            Self::GeodatabaseMulti => "GDB_M",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The old and new layers, either of which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerPair {
    pub old: Option<LayerRef>,
    pub new: Option<LayerRef>,
}

impl LayerPair {
    /// Returns whether both sides were found.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.old.is_some() && self.new.is_some()
    }
}

/// Finds the old and new layers for `mode` under `base`.
#[must_use]
pub fn discover_layers(base: &Path, mode: SourceMode) -> LayerPair {
    let result: Result<LayerPair, SpatialError> = match mode {
        SourceMode::Shapefile => discover_shapefiles(base),
        SourceMode::GeodatabaseTopology => discover_topology(base),
        SourceMode::GeodatabaseMulti => discover_multi_version(base),
    };

    match result {
        Ok(pair) => {
            if pair.is_complete() {
                info!(%mode, old = ?pair.old, new = ?pair.new, "Discovered layers");
            } else {
                warn!(%mode, base = %base.display(), old = ?pair.old, new = ?pair.new, "Layer pair incomplete, missing areas resolve to zero");
            }
            pair
        }
        Err(e) => {
            warn!(%mode, base = %base.display(), error = %e, "Layer discovery failed, all areas resolve to zero");
            LayerPair::default()
        }
    }
}

/// First and last of at least two sorted candidates.
fn oldest_and_newest<T: Clone>(candidates: &[T]) -> Option<(T, T)> {
    if candidates.len() < 2 {
        return None;
    }
    Some((candidates.first()?.clone(), candidates.last()?.clone()))
}

fn subdirectories(base: &Path, matches: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, SpatialError> {
    let io_error = |source: std::io::Error| SpatialError::Io {
        path: base.to_path_buf(),
        source,
    };

    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(base).map_err(io_error)? {
        let path: PathBuf = entry.map_err(io_error)?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if path.is_dir() && matches(name) {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// First attribute export in `dir`, by name.
fn first_export(dir: &Path) -> Result<Option<PathBuf>, SpatialError> {
    let entries = fs::read_dir(dir).map_err(|source| SpatialError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut exports: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    exports.sort();
    Ok(exports.into_iter().next())
}

fn discover_shapefiles(base: &Path) -> Result<LayerPair, SpatialError> {
    let dirs: Vec<PathBuf> = subdirectories(base, |name| name.starts_with(SHAPEFILE_DIR_PREFIX))?;
    debug!(candidates = dirs.len(), "Shapefile directories");
    let Some((old_dir, new_dir)) = oldest_and_newest(&dirs) else {
        return Ok(LayerPair::default());
    };

    Ok(LayerPair {
        old: first_export(&old_dir)?.map(LayerRef::CsvExport),
        new: first_export(&new_dir)?.map(LayerRef::CsvExport),
    })
}

fn topology_layer(gdb: &Path) -> LayerRef {
    LayerRef::CsvExport(gdb.join(TOPOLOGY_DATASET).join(TOPOLOGY_LAYER_FILE))
}

fn discover_topology(base: &Path) -> Result<LayerPair, SpatialError> {
    let dirs: Vec<PathBuf> = subdirectories(base, |name| {
        name.starts_with(TOPOLOGY_GDB_PREFIX) && name.ends_with(TOPOLOGY_GDB_SUFFIX)
    })?;
    debug!(candidates = dirs.len(), "Topology geodatabases");
    let Some((old_gdb, new_gdb)) = oldest_and_newest(&dirs) else {
        return Ok(LayerPair::default());
    };

    Ok(LayerPair {
        old: Some(topology_layer(&old_gdb)),
        new: Some(topology_layer(&new_gdb)),
    })
}

fn discover_multi_version(base: &Path) -> Result<LayerPair, SpatialError> {
    let database: PathBuf = base.join(MULTI_VERSION_DATABASE);
    let Some(mut conn) = open_layer_database(&database)? else {
        debug!(database = %database.display(), "Multi-version database not found");
        return Ok(LayerPair::default());
    };

    let tables: Vec<String> = list_tables(&mut conn, MULTI_VERSION_TABLE_PREFIX)?;
    debug!(candidates = tables.len(), "Village layer tables");
    let Some((old_table, new_table)) = oldest_and_newest(&tables) else {
        return Ok(LayerPair::default());
    };

    Ok(LayerPair {
        old: Some(LayerRef::SqliteTable {
            database: database.clone(),
            table: old_table,
        }),
        new: Some(LayerRef::SqliteTable {
            database,
            table: new_table,
        }),
    })
}
