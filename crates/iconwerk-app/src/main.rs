// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Iconwerk — batch PNG icon recoloring and resizing.
//
// Entry point. Initialises logging, resolves the configuration, discovers
// the input images, and runs them through the pipeline one at a time.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use iconwerk_core::error::Result;

use cli::Cli;
use services::batch::{BatchReport, run_batch};
use services::discovery::discover_jobs;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            tracing::warn!(
                failed = report.failed.len(),
                total = report.total(),
                "Some images could not be processed"
            );
            for failure in &report.failed {
                tracing::warn!(
                    input = %failure.input.display(),
                    error = %failure.error,
                    "Not processed"
                );
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Iconwerk could not start the batch");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<BatchReport> {
    let config = cli.into_config()?;
    config.validate()?;
    tracing::info!(
        input = %config.input_folder.display(),
        output = %config.output_folder.display(),
        recolor = config.recolor,
        resize = config.resize,
        dpi = ?config.dpi,
        "Iconwerk starting"
    );

    std::fs::create_dir_all(&config.output_folder)?;
    let jobs = discover_jobs(&config)?;
    Ok(run_batch(&jobs))
}
