// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One reconciliation run, from the boundary database to the written reports.

use boundary_recon::{
    AreaDeltaResolver, AreaReport, BlockTemplate, ReportBuffer, ReportLayoutEngine,
    TownAreaSummary, build_change_list, finalize,
};
use boundary_recon_domain::{
    CaseIndex, MasterVillage, TownAreaTable, TownCode, TownGrouping, VillageRecord,
    build_case_index, build_town_groups, format_report_date, match_snapshot, target_town_codes,
    validate_town_code,
};
use boundary_recon_persistence::{
    SourceSnapshot, load_source_snapshot, load_town_areas, load_village_master,
};
use boundary_recon_report::{load_block_template, write_area_report, write_change_list};
use boundary_recon_spatial::{LayerPair, LayerStore, SourceMode, discover_layers};
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};

use crate::config::{AreaReportConfig, RunConfig};
use crate::summary::{log_summaries, write_summary_json};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    /// Villages added or removed on the snapshot date.
    pub matched: usize,
    pub change_list_written: bool,
    /// Per-town totals; empty when no area report was written.
    pub summaries: Vec<TownAreaSummary>,
}

/// Runs the reconciliation described by `config`.
///
/// # Errors
///
/// Returns an error if the boundary database, a master table or a template
/// cannot be read, or an output cannot be written.
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let snapshot_date: String = format_report_date(config.snapshot_date)?;
    let modify_date: String = format_report_date(config.modify_date)?;
    info!(
        snapshot_date = %snapshot_date,
        modify_date = %modify_date,
        mode = %config.mode,
        "Starting reconciliation"
    );

    let snapshot: SourceSnapshot = load_source_snapshot(&config.database)
        .wrap_err_with(|| format!("failed to read {}", config.database.display()))?;

    let matched: Vec<VillageRecord> = match_snapshot(&snapshot.villages, config.snapshot_date);
    if matched.is_empty() {
        info!("No village changed on the snapshot date, nothing to report");
        return Ok(RunOutcome::default());
    }

    let cases: CaseIndex = build_case_index(&snapshot.cases, config.modify_date);
    info!(villages = cases.len(), "Indexed modification cases");

    let buffer: ReportBuffer = build_change_list(&matched, &cases, config.modify_date)
        .wrap_err("failed to build the change list")?;
    write_change_list(&config.change_list_template, &config.output_path, &buffer)
        .wrap_err("failed to write the change list")?;

    let summaries: Vec<TownAreaSummary> = match &config.area_report {
        Some(area) => build_area_report(area, config.mode, &matched)?,
        None => Vec::new(),
    };

    Ok(RunOutcome {
        matched: matched.len(),
        change_list_written: true,
        summaries,
    })
}

fn build_area_report(
    area: &AreaReportConfig,
    mode: SourceMode,
    matched: &[VillageRecord],
) -> Result<Vec<TownAreaSummary>> {
    let master: Vec<MasterVillage> = load_village_master(&area.village_master)
        .wrap_err("failed to load the village master table")?;
    let town_areas: TownAreaTable =
        load_town_areas(&area.town_area).wrap_err("failed to load the town area table")?;

    let targets: Vec<TownCode> = target_town_codes(matched);
    for town in &targets {
        if let Err(e) = validate_town_code(town) {
            warn!(town = %town, error = %e, "Malformed town code in the boundary database");
        }
    }
    let grouping: TownGrouping = build_town_groups(&targets, &master, &town_areas);
    for town in &grouping.skipped {
        warn!(town = %town, "Town has no villages in the master table, skipped");
    }
    if grouping.groups.is_empty() {
        warn!("No town to report, area report skipped");
        return Ok(Vec::new());
    }
    info!(
        towns = grouping.groups.len(),
        villages = grouping.member_total(),
        "Grouped villages by town"
    );

    let layers: LayerPair = discover_layers(&area.layers_dir, mode);
    let store: LayerStore = LayerStore::new();
    let resolver: AreaDeltaResolver<'_, LayerStore> =
        AreaDeltaResolver::new(&store, layers.old, layers.new, mode.id_field());

    let template: BlockTemplate = load_block_template(&area.template)
        .wrap_err("failed to load the area report template")?;
    let engine: ReportLayoutEngine<'_, LayerStore> = ReportLayoutEngine::new(&template, &resolver);
    let mut report: AreaReport = engine
        .layout(&grouping.groups)
        .wrap_err("failed to lay out the area report")?;
    finalize(&mut report.buffer);

    write_area_report(&area.template, &area.output_path, &report.buffer)
        .wrap_err("failed to write the area report")?;

    log_summaries(&report.summaries);
    if let Some(path) = &area.summary_json {
        write_summary_json(path, &report.summaries)?;
    }

    Ok(report.summaries)
}
