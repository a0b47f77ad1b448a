use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::ReportMirrorBuilder;
use crate::spec::{MirrorTreeError, SpecMirrorOptions};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Canonicalize the deepest existing ancestor and re-append the missing tail.
///
/// The destination usually does not exist yet, so plain `canonicalize` would fail.
fn _normalize_path(path: &Path) -> PathBuf {
    let path_abs = _absolutize_path(path);
    let mut path_existing = path_abs.as_path();
    let mut l_tail = Vec::new();
    loop {
        if let Ok(mut resolved) = fs::canonicalize(path_existing) {
            for part in l_tail.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (path_existing.parent(), path_existing.file_name()) {
            (Some(parent), Some(name)) => {
                l_tail.push(name.to_os_string());
                path_existing = parent;
            }
            _ => return path_abs.clone(),
        }
    }
}

/// `dst` is `src` itself or lies somewhere below it.
///
/// A source nested under its destination is fine: its listing never reaches the
/// destination root.
pub(crate) fn is_destination_inside_source(src: &Path, dst: &Path) -> bool {
    _normalize_path(dst).starts_with(_normalize_path(src))
}

/// Create `path` (and missing parents) unless it is already a directory.
///
/// Returns `true` when something had to be created.
pub(crate) fn ensure_directory(path: &Path) -> Result<bool, io::Error> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    Ok(true)
}

/// Identity of a directory after following symlinks.
#[cfg(unix)]
pub(crate) fn directory_identity(path: &Path) -> Result<(u64, u64), io::Error> {
    use std::os::unix::fs::MetadataExt;

    let stat_dir = fs::metadata(path)?;
    Ok((stat_dir.dev(), stat_dir.ino()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy bytes and permission bits, then carry timestamps (and xattrs on Linux).
///
/// `fs::copy` truncates an existing destination file, so this overwrites in place.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
    spec_options: &SpecMirrorOptions,
    builder_report: &mut ReportMirrorBuilder,
) -> Result<(), MirrorTreeError> {
    fs::copy(path_file_src, path_file_dst).map_err(|e| MirrorTreeError::CopyFileFailed {
        path_src: path_file_src.to_path_buf(),
        path_dst: path_file_dst.to_path_buf(),
        source: e,
    })?;
    apply_file_times(path_file_src, path_file_dst).map_err(|e| {
        MirrorTreeError::MetadataApplyFailed {
            path: path_file_dst.to_path_buf(),
            source: e,
        }
    })?;

    #[cfg(target_os = "linux")]
    {
        if spec_options.if_copy_xattrs {
            copy_xattrs_linux(path_file_src, path_file_dst, builder_report);
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = (spec_options, builder_report);
    }

    Ok(())
}

fn apply_file_times(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(
    path_file_src: &Path,
    path_file_dst: &Path,
    builder_report: &mut ReportMirrorBuilder,
) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(e) => {
            builder_report.add_warning(format!(
                "Failed to list extended attributes of {} ({e})",
                path_file_src.display()
            ));
            return;
        }
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            let c_warning = format!(
                "Failed to set extended attribute {} on {} ({e})",
                name.to_string_lossy(),
                path_file_dst.display()
            );
            tracing::warn!("{c_warning}");
            builder_report.add_warning(c_warning);
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
