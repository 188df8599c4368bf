// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Village area sources for the area difference report.
//!
//! Layers are either attribute table exports or feature tables in an
//! `SQLite`/`GeoPackage` file. [`LayerStore`] reads both through the
//! [`boundary_recon::SpatialQuery`] seam.

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

mod csv_layer;
mod discovery;
mod error;
mod layer;
mod sqlite_layer;
mod store;

#[cfg(test)]
mod tests;

pub use csv_layer::{AREA_COLUMNS, query_csv_layer};
pub use discovery::{
    LayerPair, MULTI_VERSION_DATABASE, MULTI_VERSION_TABLE_PREFIX, SHAPEFILE_DIR_PREFIX,
    SourceMode, TOPOLOGY_DATASET, TOPOLOGY_GDB_PREFIX, TOPOLOGY_GDB_SUFFIX, TOPOLOGY_LAYER_FILE,
    discover_layers,
};
pub use error::SpatialError;
pub use layer::LayerRef;
pub use sqlite_layer::{list_tables, open_layer_database, query_sqlite_layer};
pub use store::LayerStore;
