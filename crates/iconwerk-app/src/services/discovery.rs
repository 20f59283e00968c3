// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job discovery — walk the input folder and turn every PNG into an
// `ImageJob` carrying its own resize spec.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::{AppConfig, ImageJob};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Whether `path` has a `.png` extension, in any case.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Width hint from the name of the folder holding an image (`icons/16/a.png`
/// gives 16). Non-numeric and zero names give no hint.
pub fn size_hint(image_path: &Path) -> Option<u32> {
    image_path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .and_then(|name| name.parse::<u32>().ok())
        .filter(|width| *width > 0)
}

/// Build one job per PNG under `config.input_folder`, in file-name order.
///
/// All outputs land flat in `config.output_folder` under the source file
/// name. Unreadable entries are skipped with a warning.
#[instrument(skip_all, fields(input = %config.input_folder.display()))]
pub fn discover_jobs(config: &AppConfig) -> Result<Vec<ImageJob>> {
    if !config.input_folder.is_dir() {
        return Err(IconwerkError::Config(format!(
            "input folder {} does not exist",
            config.input_folder.display()
        )));
    }

    let color = config.color_rule();
    let dpi = config.dpi_tag()?;
    let mut seen: HashSet<OsString> = HashSet::new();
    let mut jobs = Vec::new();

    for entry in WalkDir::new(&config.input_folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_png(path) {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        if !seen.insert(file_name.to_os_string()) {
            warn!(
                path = %path.display(),
                "Output name already used by another input; later file wins"
            );
        }

        let hint = size_hint(path);
        debug!(path = %path.display(), hint = ?hint, "Discovered image");
        jobs.push(ImageJob {
            input: path.to_path_buf(),
            output: config.output_folder.join(file_name),
            color,
            resize: config.resize_spec(hint),
            dpi,
        });
    }

    info!(count = jobs.len(), "Jobs discovered");
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconwerk_core::ResizeSpec;
    use std::path::PathBuf;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(path, b"").expect("touch");
    }

    #[test]
    fn png_extension_any_case() {
        assert!(is_png(Path::new("a.png")));
        assert!(is_png(Path::new("a.PNG")));
        assert!(!is_png(Path::new("a.jpg")));
        assert!(!is_png(Path::new("png")));
    }

    #[test]
    fn numeric_folder_is_a_size_hint() {
        assert_eq!(size_hint(Path::new("input/16/a.png")), Some(16));
        assert_eq!(size_hint(Path::new("input/misc/a.png")), None);
        assert_eq!(size_hint(Path::new("input/0/a.png")), None);
        assert_eq!(size_hint(Path::new("a.png")), None);
    }

    #[test]
    fn jobs_carry_per_folder_widths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("input");
        touch(&input.join("16").join("save.png"));
        touch(&input.join("32").join("open.PNG"));
        touch(&input.join("misc").join("help.png"));
        touch(&input.join("misc").join("notes.txt"));

        let config = AppConfig {
            input_folder: input.clone(),
            output_folder: dir.path().join("output"),
            ..AppConfig::default()
        };
        let jobs = discover_jobs(&config).expect("discover");

        let summary: Vec<(PathBuf, Option<u32>)> = jobs
            .iter()
            .map(|job| (job.output.clone(), job.resize.and_then(|spec| spec.width)))
            .collect();
        assert_eq!(
            summary,
            vec![
                (config.output_folder.join("save.png"), Some(16)),
                (config.output_folder.join("open.PNG"), Some(32)),
                (config.output_folder.join("help.png"), Some(32)),
            ]
        );
        assert!(jobs.iter().all(|job| job.color.is_some() && job.dpi.is_some()));
    }

    #[test]
    fn fallback_width_applies_to_top_level_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("icon.png"));

        let config = AppConfig {
            input_folder: dir.path().to_path_buf(),
            fallback_width: 24,
            ..AppConfig::default()
        };
        let jobs = discover_jobs(&config).expect("discover");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].resize, Some(ResizeSpec::to_width(24)));
    }

    #[test]
    fn missing_input_folder_is_a_config_error() {
        let config = AppConfig {
            input_folder: PathBuf::from("/definitely/not/here"),
            ..AppConfig::default()
        };
        assert!(matches!(
            discover_jobs(&config),
            Err(IconwerkError::Config(_))
        ));
    }
}
