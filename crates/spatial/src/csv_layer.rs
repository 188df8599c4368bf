// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attribute table exports of polygon layers.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use boundary_recon::{AreaQuery, AreaRow};
use boundary_recon_domain::VillageCode;

use crate::error::SpatialError;

/// Column names accepted for the feature area, compared case-insensitively.
pub const AREA_COLUMNS: &[&str] = &["shape_area", "shape@area", "area"];

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn column_index(headers: &StringRecord, wanted: &str) -> Option<usize> {
    let wanted: String = normalize_header(wanted);
    headers
        .iter()
        .position(|header| normalize_header(header) == wanted)
}

/// Reads the areas of the requested codes from a CSV export.
///
/// A file that does not exist yields no rows. Features with an empty area
/// are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed, lacks the id or area
/// column, or holds an area that is not a finite number.
pub fn query_csv_layer(path: &Path, query: &AreaQuery) -> Result<Vec<AreaRow>, SpatialError> {
    if !path.is_file() {
        debug!(path = %path.display(), "Attribute export not found");
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| SpatialError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let headers: StringRecord = reader
        .headers()
        .map_err(|source| SpatialError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let layer: String = path.display().to_string();
    let id_index: usize =
        column_index(&headers, &query.id_field).ok_or_else(|| SpatialError::MissingColumn {
            layer: layer.clone(),
            column: query.id_field.clone(),
        })?;
    let area_index: usize = AREA_COLUMNS
        .iter()
        .find_map(|name| column_index(&headers, name))
        .ok_or_else(|| SpatialError::MissingColumn {
            layer: layer.clone(),
            column: String::from("Shape_Area"),
        })?;

    let wanted: HashSet<&VillageCode> = query.codes.iter().collect();
    let mut rows: Vec<AreaRow> = Vec::new();
    for result in reader.records() {
        let record: StringRecord = result.map_err(|source| SpatialError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let code: VillageCode = VillageCode::new(record.get(id_index).unwrap_or_default());
        if !wanted.contains(&code) {
            continue;
        }

        let raw_area: &str = record.get(area_index).map_or("", str::trim);
        if raw_area.is_empty() {
            debug!(layer, code = %code, "Feature without area");
            continue;
        }
        let area: f64 = raw_area
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| SpatialError::InvalidArea {
                layer: layer.clone(),
                code: code.value().to_string(),
                value: raw_area.to_string(),
            })?;
        rows.push(AreaRow { code, area });
    }

    Ok(rows)
}
