// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boundary_recon::{AreaQuery, AreaRow, SpatialQuery};

use crate::csv_layer::query_csv_layer;
use crate::error::SpatialError;
use crate::layer::LayerRef;
use crate::sqlite_layer::query_sqlite_layer;

/// Reads village areas from whichever kind of layer it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerStore;

impl LayerStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SpatialQuery for LayerStore {
    type Layer = LayerRef;
    type Error = SpatialError;

    fn query_areas(&self, layer: &LayerRef, query: &AreaQuery) -> Result<Vec<AreaRow>, SpatialError> {
        match layer {
            LayerRef::CsvExport(path) => query_csv_layer(path, query),
            LayerRef::SqliteTable { database, table } => query_sqlite_layer(database, table, query),
        }
    }
}
