// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci` checks formatting, runs clippy, builds and tests
//! - `cargo xtask test` runs the workspace tests (`SQLite` only, no services)
//! - `cargo xtask verify-source-schema --database <PATH>` checks that a
//!   boundary database export carries every table and column the tool reads

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
    io,
    path::{Path, PathBuf},
    process::Output,
    vec,
};

use boundary_recon_persistence::SOURCE_SCHEMA_SQL;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::connection::SimpleConnection;
use diesel::sql_types::Text;
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (formatting, clippy, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Check a boundary database export against the tables the tool reads
    #[command(visible_alias = "vs")]
    VerifySourceSchema {
        /// The `SQLite` export to check
        #[arg(long)]
        database: PathBuf,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::LintClippy => lint_clippy(),
            Self::LintFormatting => lint_format(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::VerifySourceSchema { database } => verify_source_schema(&database),
        }
    }
}

/// Run CI checks (formatting, clippy, build, test)
fn ci() -> Result<()> {
    lint_format()?;
    lint_clippy()?;
    build()?;
    test()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run the workspace tests. Fixtures are temporary `SQLite` files, so no
/// services are needed.
fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Column names of each table, keyed by table name.
type Schema = BTreeMap<String, BTreeSet<String>>;

/// Verify a boundary database export against the expected source schema
///
/// The expected schema is built in memory from the same DDL the persistence
/// crate uses for fixtures, then every expected table and column is looked
/// up in the export. Extra tables and columns in the export are fine.
///
/// ## Failures
///
/// The command fails if:
/// - The export cannot be opened
/// - A table the tool reads is missing
/// - A column the tool reads is missing from its table
fn verify_source_schema(database: &Path) -> Result<()> {
    tracing::info!("Verifying source schema of {}", database.display());

    if !database.is_file() {
        return Err(color_eyre::eyre::eyre!(
            "database {} does not exist",
            database.display()
        ));
    }

    let mut expected_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    expected_conn
        .batch_execute(SOURCE_SCHEMA_SQL)
        .wrap_err("Failed to apply the source schema")?;
    let expected = introspect_sqlite_schema(&mut expected_conn)?;

    let url = format!("file:{}?mode=ro", database.display());
    let mut export_conn =
        SqliteConnection::establish(&url).wrap_err("Failed to open the database export")?;
    let actual = introspect_sqlite_schema(&mut export_conn)?;

    compare_schemas(&expected, &actual)?;

    tracing::info!("✓ Source schema verification passed");
    Ok(())
}

/// Introspect `SQLite` table columns
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info(\"{}\")", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        schema.insert(
            table.name,
            columns.into_iter().map(|column| column.name).collect(),
        );
    }

    Ok(schema)
}

fn compare_schemas(expected: &Schema, actual: &Schema) -> Result<()> {
    for (table_name, expected_columns) in expected {
        let Some(actual_columns) = actual.get(table_name) else {
            return Err(color_eyre::eyre::eyre!(
                "❌ Source schema check FAILED: Table '{}' missing from the export",
                table_name
            ));
        };

        let missing: Vec<&String> = expected_columns.difference(actual_columns).collect();
        if !missing.is_empty() {
            return Err(color_eyre::eyre::eyre!(
                "❌ Source schema check FAILED: Table '{}' is missing columns: {:?}",
                table_name,
                missing
            ));
        }
        tracing::debug!("Table {} has all {} columns", table_name, expected_columns.len());
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
