// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Atomic output staging.
//
// Results are written to a named temporary file beside the destination and
// renamed over it once complete. A failed write drops (and so deletes) the
// temporary; the destination is either the old file or the new one, never
// a partial one.

use std::io::Write;
use std::path::Path;

use iconwerk_core::error::{IconwerkError, Result};
use tracing::{debug, instrument};

/// Prefix for staged files, so stray ones are easy to spot.
const STAGING_PREFIX: &str = ".iconwerk-";

/// Write `data` to `dest` atomically.
#[instrument(skip(dest, data), fields(dest = %dest.display(), data_len = data.len()))]
pub fn write_atomic(dest: &Path, data: &[u8]) -> Result<()> {
    let fail = |reason: String| IconwerkError::Encode {
        path: dest.to_path_buf(),
        reason,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|err| fail(format!("cannot stage in {}: {}", dir.display(), err)))?;

    staged
        .write_all(data)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|err| fail(format!("write failed: {}", err)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(staged.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(|err| fail(format!("cannot set permissions: {}", err)))?;
    }

    staged
        .persist(dest)
        .map_err(|err| fail(format!("rename failed: {}", err.error)))?;

    debug!("Output committed");
    Ok(())
}

/// Copy `src` to `dest` byte-for-byte through the same staging path.
///
/// Returns the number of bytes copied. An unreadable source is a `Decode`
/// error; nothing is written in that case.
pub fn copy_atomic(src: &Path, dest: &Path) -> Result<u64> {
    let data = std::fs::read(src).map_err(|err| IconwerkError::Decode {
        path: src.to_path_buf(),
        reason: format!("cannot read source: {}", err),
    })?;
    write_atomic(dest, &data)?;
    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read_dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_and_leaves_no_staging_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("icon.png");
        write_atomic(&dest, b"abc").expect("write");

        assert_eq!(std::fs::read(&dest).expect("read"), b"abc");
        assert_eq!(entries(dir.path()), vec!["icon.png".to_string()]);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("icon.png");
        std::fs::write(&dest, b"old contents").expect("seed");

        write_atomic(&dest, b"new").expect("write");
        assert_eq!(std::fs::read(&dest).expect("read"), b"new");
    }

    #[test]
    fn missing_directory_is_an_encode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("missing").join("icon.png");

        let err = write_atomic(&dest, b"abc").unwrap_err();
        assert!(matches!(err, IconwerkError::Encode { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn copy_reports_byte_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("a.png");
        let dest = dir.path().join("b.png");
        std::fs::write(&src, b"0123456789").expect("seed");

        assert_eq!(copy_atomic(&src, &dest).expect("copy"), 10);
        assert_eq!(std::fs::read(&dest).expect("read"), b"0123456789");
    }

    #[test]
    fn copy_of_missing_source_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("b.png");

        let err = copy_atomic(&dir.path().join("nope.png"), &dest).unwrap_err();
        assert!(matches!(err, IconwerkError::Decode { .. }));
        assert!(!dest.exists());
    }
}
