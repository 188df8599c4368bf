// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments and the run configuration built from them.

use std::path::PathBuf;

use boundary_recon_domain::parse_target_date;
use boundary_recon_spatial::SourceMode;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::eyre::{Context, Result, eyre};
use time::Date;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// How the old and new village layers are stored under `--layers-dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// `shp_*` directories holding attribute exports
    Shapefile,
    /// `administrative_boundary*.gdb` topology geodatabases
    GeodatabaseTopology,
    /// `Village_NLSC*` tables in `GDB_M.gpkg`
    GeodatabaseMulti,
}

impl From<ModeArg> for SourceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Shapefile => Self::Shapefile,
            ModeArg::GeodatabaseTopology => Self::GeodatabaseTopology,
            ModeArg::GeodatabaseMulti => Self::GeodatabaseMulti,
        }
    }
}

/// Reconcile administrative boundary changes into a change list and an area
/// difference report.
#[derive(Debug, Parser)]
#[command(name = "boundary-recon", author, version, about, long_about = None)]
pub struct Args {
    /// Date villages were added or removed (YYYY-MM-DD)
    #[arg(long, env = "RECON_SNAPSHOT_DATE")]
    pub snapshot_date: String,

    /// Date of the modification cases; defaults to the snapshot date
    #[arg(long, env = "RECON_MODIFY_DATE")]
    pub modify_date: Option<String>,

    /// Layer storage layout
    #[arg(long, value_enum, env = "RECON_MODE", default_value_t = ModeArg::Shapefile)]
    pub mode: ModeArg,

    /// `SQLite` export of the boundary database
    #[arg(long, env = "RECON_DATABASE")]
    pub database: PathBuf,

    /// Change-list workbook to write
    #[arg(long, env = "RECON_OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// Template for the change list
    #[arg(long, env = "RECON_CHANGE_LIST_TEMPLATE")]
    pub change_list_template: PathBuf,

    /// Area difference workbook to write; the area report is skipped without it
    #[arg(
        long,
        env = "RECON_AREA_REPORT_PATH",
        requires_all = ["area_report_template", "village_master", "town_area", "layers_dir"]
    )]
    pub area_report_path: Option<PathBuf>,

    /// Template for the area difference report
    #[arg(long, env = "RECON_AREA_REPORT_TEMPLATE")]
    pub area_report_template: Option<PathBuf>,

    /// Village master table (CSV or .xlsx)
    #[arg(long, env = "RECON_VILLAGE_MASTER")]
    pub village_master: Option<PathBuf>,

    /// Town area table (CSV or .xlsx)
    #[arg(long, env = "RECON_TOWN_AREA")]
    pub town_area: Option<PathBuf>,

    /// Directory searched for the old and new village layers
    #[arg(long, env = "RECON_LAYERS_DIR")]
    pub layers_dir: Option<PathBuf>,

    /// Also write the per-town totals as JSON
    #[arg(long, env = "RECON_SUMMARY_JSON", requires = "area_report_path")]
    pub summary_json: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Args {
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

/// Inputs and output of the area difference report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaReportConfig {
    pub output_path: PathBuf,
    pub template: PathBuf,
    pub village_master: PathBuf,
    pub town_area: PathBuf,
    pub layers_dir: PathBuf,
    pub summary_json: Option<PathBuf>,
}

/// Everything one run needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub snapshot_date: Date,
    pub modify_date: Date,
    pub mode: SourceMode,
    pub database: PathBuf,
    pub output_path: PathBuf,
    pub change_list_template: PathBuf,
    pub area_report: Option<AreaReportConfig>,
}

fn required(value: Option<PathBuf>, flag: &str) -> Result<PathBuf> {
    value.ok_or_else(|| eyre!("--area-report-path needs {flag}"))
}

impl TryFrom<Args> for RunConfig {
    type Error = color_eyre::Report;

    fn try_from(args: Args) -> Result<Self> {
        let snapshot_date: Date = parse_target_date(&args.snapshot_date)
            .wrap_err("invalid --snapshot-date")?;
        let modify_date: Date = match &args.modify_date {
            Some(raw) => parse_target_date(raw).wrap_err("invalid --modify-date")?,
            None => snapshot_date,
        };

        let area_report: Option<AreaReportConfig> = match args.area_report_path {
            Some(output_path) => Some(AreaReportConfig {
                output_path,
                template: required(args.area_report_template, "--area-report-template")?,
                village_master: required(args.village_master, "--village-master")?,
                town_area: required(args.town_area, "--town-area")?,
                layers_dir: required(args.layers_dir, "--layers-dir")?,
                summary_json: args.summary_json,
            }),
            None => None,
        };

        Ok(Self {
            snapshot_date,
            modify_date,
            mode: args.mode.into(),
            database: args.database,
            output_path: args.output_path,
            change_list_template: args.change_list_template,
            area_report,
        })
    }
}
