//! Pre-build step: stage `<project>/data` into the build output.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use piodata_io_fs::{MirrorTreeError, ReportMirror, SpecMirrorOptions, mirror_tree};
use tracing::{debug, info};

use crate::layout::SpecPreBuildLayout;

pub const C_STATUS_COPIED: &str = "Data directory copied to build directory";
pub const C_STATUS_NOT_FOUND: &str = "Data directory not found";

/// How a pre-build run ended when no filesystem error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumPreBuildOutcome {
    /// The data tree was mirrored into the build directory.
    Copied(ReportMirror),
    /// There was no data directory; nothing was touched.
    DataDirNotFound,
}

impl EnumPreBuildOutcome {
    /// The single console line reported for this outcome.
    pub fn status_line(&self) -> &'static str {
        match self {
            Self::Copied(_) => C_STATUS_COPIED,
            Self::DataDirNotFound => C_STATUS_NOT_FOUND,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreBuildError {
    #[error("Failed to locate the running executable: {0}")]
    ResolveScriptPath(#[source] io::Error),
    #[error("Failed to create build directory {}: {source}", .path.display())]
    CreateParentFailed { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Mirror(#[from] MirrorTreeError),
}

/// Mirror the layout's data directory into its build directory, if there is one.
///
/// A missing data directory is a normal outcome and leaves the filesystem as is.
pub fn run_with_layout(
    layout: &SpecPreBuildLayout,
    spec_options: SpecMirrorOptions,
) -> Result<EnumPreBuildOutcome, PreBuildError> {
    if !layout.path_dir_data.exists() {
        debug!(path = %layout.path_dir_data.display(), "no data directory");
        return Ok(EnumPreBuildOutcome::DataDirNotFound);
    }

    if let Some(path_dir_parent) = layout.path_dir_dest.parent() {
        fs::create_dir_all(path_dir_parent).map_err(|e| PreBuildError::CreateParentFailed {
            path: path_dir_parent.to_path_buf(),
            source: e,
        })?;
    }

    let report = mirror_tree(&layout.path_dir_data, &layout.path_dir_dest, spec_options)?;
    info!(
        project = %layout.path_dir_project.display(),
        files = report.cnt_files_copied,
        "data directory staged"
    );
    Ok(EnumPreBuildOutcome::Copied(report))
}

/// Script path as invoked, taken from `argv[0]` when it names a directory.
///
/// `argv[0]` is not canonicalized, so a symlink kept in `<project>/scripts/` still
/// resolves to `<project>`. A bare command name (found via `PATH`) yields `None`.
pub fn script_path_from_arg0(arg0: Option<OsString>) -> Option<PathBuf> {
    let path_arg0 = PathBuf::from(arg0?);
    let b_has_dir = path_arg0
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());
    b_has_dir.then_some(path_arg0)
}

/// Resolve the layout from the invoked program path and stage the data directory.
///
/// The program plays the role of the hook script: `argv[0]` when it carries a
/// directory, the running executable otherwise. The executable path has symlinks
/// resolved, so the `argv[0]` route is what makes a linked binary in
/// `<project>/scripts/` work on `<project>`.
pub fn run() -> Result<EnumPreBuildOutcome, PreBuildError> {
    let path_script = match script_path_from_arg0(std::env::args_os().next()) {
        Some(path_script) => path_script,
        None => std::env::current_exe().map_err(PreBuildError::ResolveScriptPath)?,
    };
    run_for_script(path_script)
}

/// Stage the data directory of the project that owns `path_script`.
///
/// Embedders (the PlatformIO hook) pass their own script path and print
/// [`EnumPreBuildOutcome::status_line`] themselves.
pub fn run_for_script(path_script: impl AsRef<Path>) -> Result<EnumPreBuildOutcome, PreBuildError> {
    let layout = SpecPreBuildLayout::from_script_path(path_script);
    debug!(?layout, "resolved pre-build layout");
    run_with_layout(&layout, SpecMirrorOptions::default())
}
