// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boundary_recon_domain::VillageCode;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Planar reference system all areas are measured in (TWD97 / TM2 zone 121).
pub const AREA_SRID: u32 = 3826;

/// An attribute-filtered area lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaQuery {
    /// Attribute holding the village code in the layer.
    pub id_field: String,
    /// Codes to select.
    pub codes: Vec<VillageCode>,
    /// Reference system the areas must be expressed in.
    pub srid: u32,
}

/// One matched feature.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRow {
    pub code: VillageCode,
    pub area: f64,
}

/// A source of village areas.
///
/// Implementations must return an empty result, not an error, when the layer
/// does not exist.
pub trait SpatialQuery {
    /// Handle identifying one layer.
    type Layer: std::fmt::Debug;
    /// Failure raised while reading a layer that does exist.
    type Error: std::fmt::Display;

    /// Returns the area of every feature in `layer` whose id field is one of
    /// the requested codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer exists but cannot be read.
    fn query_areas(&self, layer: &Self::Layer, query: &AreaQuery)
    -> Result<Vec<AreaRow>, Self::Error>;
}

/// Areas found in one layer, by village code.
pub type AreaSample = HashMap<VillageCode, f64>;

/// Areas found in the old and the new layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaPair {
    pub old: AreaSample,
    pub new: AreaSample,
}

/// Looks up old and new village areas for a set of codes.
#[derive(Debug)]
pub struct AreaDeltaResolver<'a, Q: SpatialQuery> {
    source: &'a Q,
    old_layer: Option<Q::Layer>,
    new_layer: Option<Q::Layer>,
    id_field: String,
}

impl<'a, Q: SpatialQuery> AreaDeltaResolver<'a, Q> {
    /// Creates a resolver. A missing layer resolves to no areas at all.
    #[must_use]
    pub fn new(
        source: &'a Q,
        old_layer: Option<Q::Layer>,
        new_layer: Option<Q::Layer>,
        id_field: &str,
    ) -> Self {
        Self {
            source,
            old_layer,
            new_layer,
            id_field: id_field.to_string(),
        }
    }

    /// Returns the id field used for queries.
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Resolves old and new areas for `codes`.
    ///
    /// Only matched codes appear in the result; values are returned as read.
    /// A read failure on either side is logged and that side comes back
    /// empty.
    #[must_use]
    pub fn resolve(&self, codes: &[VillageCode]) -> AreaPair {
        AreaPair {
            old: self.sample(self.old_layer.as_ref(), codes, "old"),
            new: self.sample(self.new_layer.as_ref(), codes, "new"),
        }
    }

    fn sample(&self, layer: Option<&Q::Layer>, codes: &[VillageCode], side: &str) -> AreaSample {
        let Some(layer) = layer else {
            debug!(side, "No layer configured, all areas resolve to zero");
            return AreaSample::new();
        };
        if codes.is_empty() {
            return AreaSample::new();
        }

        let query: AreaQuery = AreaQuery {
            id_field: self.id_field.clone(),
            codes: codes.to_vec(),
            srid: AREA_SRID,
        };

        match self.source.query_areas(layer, &query) {
            Ok(rows) => {
                debug!(side, ?layer, requested = codes.len(), matched = rows.len(), "Resolved areas");
                rows.into_iter().map(|row| (row.code, row.area)).collect()
            }
            Err(e) => {
                warn!(side, ?layer, error = %e, "Failed to read layer, treating it as empty");
                AreaSample::new()
            }
        }
    }
}
