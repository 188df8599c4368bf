// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod run;
mod summary;

#[cfg(test)]
mod tests;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Args, RunConfig};
use crate::run::{RunOutcome, run};

fn init_tracing(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    let outcome: Result<RunOutcome> = RunConfig::try_from(args).and_then(|config| run(&config));
    match outcome {
        Ok(outcome) => {
            info!(
                matched = outcome.matched,
                change_list = outcome.change_list_written,
                towns = outcome.summaries.len(),
                "Reconciliation finished"
            );
        }
        Err(err) => {
            error!("{err:?}");
            std::process::exit(1);
        }
    }
    Ok(())
}
