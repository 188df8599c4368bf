// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AreaQuery, AreaRow, SpatialQuery};
use boundary_recon_domain::{TownCode, TownGroup, VillageCode, VillageMember};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory layers keyed by name. Layers named `broken` fail to read.
#[derive(Debug, Default)]
pub struct FakeSpatial {
    pub layers: HashMap<String, Vec<(String, f64)>>,
    pub queries: RefCell<Vec<AreaQuery>>,
}

impl FakeSpatial {
    pub fn with_layer(mut self, name: &str, rows: &[(&str, f64)]) -> Self {
        self.layers.insert(
            name.to_string(),
            rows.iter()
                .map(|(code, area)| ((*code).to_string(), *area))
                .collect(),
        );
        self
    }
}

impl SpatialQuery for FakeSpatial {
    type Layer = String;
    type Error = String;

    fn query_areas(&self, layer: &String, query: &AreaQuery) -> Result<Vec<AreaRow>, String> {
        self.queries.borrow_mut().push(query.clone());
        if layer == "broken" {
            return Err(String::from("layer is corrupt"));
        }
        let Some(rows) = self.layers.get(layer) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .map(|(code, area)| AreaRow {
                code: VillageCode::new(code),
                area: *area,
            })
            .filter(|row| query.codes.contains(&row.code))
            .collect())
    }
}

pub fn create_test_group(code: &str, name: &str, members: &[(&str, &str)]) -> TownGroup {
    TownGroup {
        code: TownCode::new(code),
        name: name.to_string(),
        county_name: String::from("Test County"),
        reference_area: 1000.0,
        members: members
            .iter()
            .map(|(code, name)| VillageMember {
                code: VillageCode::new(code),
                name: (*name).to_string(),
            })
            .collect(),
    }
}
