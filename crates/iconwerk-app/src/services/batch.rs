// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequential batch runner. One image's failure is logged and recorded, and
// the run moves on to the next image.

use std::path::{Path, PathBuf};

use iconwerk_core::error::IconwerkError;
use iconwerk_core::{ImageJob, JobOutcome};
use iconwerk_image::process_job;
use tracing::{error, info, instrument};

/// A job that could not be completed.
#[derive(Debug)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: IconwerkError,
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<(PathBuf, JobOutcome)>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Process `jobs` in order, one at a time.
#[instrument(skip_all, fields(jobs = jobs.len()))]
pub fn run_batch(jobs: &[ImageJob]) -> BatchReport {
    let mut report = BatchReport::default();

    for job in jobs {
        let name = display_name(&job.input);
        match process_job(job) {
            Ok(outcome) => {
                info!(file = %name, ?outcome, "Processed");
                report.completed.push((job.input.clone(), outcome));
            }
            Err(err) => {
                error!(file = %name, error = %err, "Failed to process image");
                report.failed.push(BatchFailure {
                    input: job.input.clone(),
                    error: err,
                });
            }
        }
    }

    info!(
        completed = report.completed.len(),
        failed = report.failed.len(),
        "Batch finished"
    );
    report
}
