// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-image pipeline: decode -> recolor? -> resize? -> encode, or a plain
// copy when no stage is configured.

use iconwerk_core::error::Result;
use iconwerk_core::types::{ImageJob, JobOutcome};
use tracing::{info, instrument};

use crate::codec::staging;
use crate::processor::IconProcessor;

/// Run one job start to finish.
///
/// Errors are terminal for this job only. A failed job leaves nothing at
/// `job.output` beyond what was there before.
#[instrument(skip_all, fields(input = %job.input.display(), output = %job.output.display()))]
pub fn process_job(job: &ImageJob) -> Result<JobOutcome> {
    if !job.has_stages() {
        let bytes = staging::copy_atomic(&job.input, &job.output)?;
        info!(bytes, "No stages configured; copied source");
        return Ok(JobOutcome::Copied { bytes });
    }

    let mut processor = IconProcessor::open(&job.input)?;
    if let Some(rule) = &job.color {
        processor = processor.recolor(rule);
    }
    if let Some(spec) = &job.resize {
        processor = processor.resize(spec)?;
    }
    processor.save(&job.output, job.dpi)?;

    Ok(JobOutcome::Written {
        width: processor.width(),
        height: processor.height(),
    })
}
