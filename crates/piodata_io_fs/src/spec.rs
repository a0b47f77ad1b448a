//! Mirror option models and top-level error types.

use std::io;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region StructsInit

/// Input options for `mirror_tree`.
///
/// File bytes, permission bits and access/modification times are always copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecMirrorOptions {
    /// Copy extended attributes (Linux only, best-effort).
    pub if_copy_xattrs: bool,
}

impl Default for SpecMirrorOptions {
    fn default() -> Self {
        Self {
            if_copy_xattrs: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures that abort a `mirror_tree` run.
///
/// The first failure stops the walk. Entries already written stay in place.
#[derive(Debug, thiserror::Error)]
pub enum MirrorTreeError {
    /// Destination is the source itself or lies inside it.
    #[error(
        "Destination directory {} lies inside source directory {}",
        .destination.display(),
        .source_dir.display()
    )]
    SourceDestinationOverlap {
        /// Source directory as given.
        source_dir: PathBuf,
        /// Destination directory as given.
        destination: PathBuf,
    },
    /// Destination root could not be created.
    #[error("Failed to initialize destination {}: {source}", .path.display())]
    DestinationInitFailed { path: PathBuf, source: io::Error },
    /// Listing a source directory failed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed { path: PathBuf, source: io::Error },
    /// Stat of a source entry failed (includes broken symlinks).
    #[error("Failed to inspect {}: {source}", .path.display())]
    InspectFailed { path: PathBuf, source: io::Error },
    /// Creating a destination subdirectory failed.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },
    /// Copying file bytes failed.
    #[error("Failed to copy {} -> {}: {source}", .path_src.display(), .path_dst.display())]
    CopyFileFailed {
        path_src: PathBuf,
        path_dst: PathBuf,
        source: io::Error,
    },
    /// Applying timestamps to a copied file failed.
    #[error("Failed to apply metadata to {}: {source}", .path.display())]
    MetadataApplyFailed { path: PathBuf, source: io::Error },
    /// Source entry is neither a directory nor a regular file.
    #[error("Special file cannot be copied: {}", .0.display())]
    SpecialFile(PathBuf),
    /// A directory symlink leads back to a directory already being walked.
    #[error("Symlink loop detected: {}", .0.display())]
    SymlinkLoop(PathBuf),
}

impl MirrorTreeError {
    /// Path the failure is attached to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::SourceDestinationOverlap { destination, .. } => destination,
            Self::DestinationInitFailed { path, .. }
            | Self::ReadDirFailed { path, .. }
            | Self::InspectFailed { path, .. }
            | Self::CreateDirFailed { path, .. }
            | Self::MetadataApplyFailed { path, .. } => path,
            Self::CopyFileFailed { path_dst, .. } => path_dst,
            Self::SpecialFile(path) | Self::SymlinkLoop(path) => path,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{MirrorTreeError, SpecMirrorOptions};

    #[test]
    fn options_default_copies_xattrs() {
        assert!(SpecMirrorOptions::default().if_copy_xattrs);
    }

    #[test]
    fn error_display_and_path_point_at_destination() {
        let err = MirrorTreeError::CopyFileFailed {
            path_src: PathBuf::from("data/a.txt"),
            path_dst: PathBuf::from("out/a.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.path(), Path::new("out/a.txt"));
        assert_eq!(
            err.to_string(),
            "Failed to copy data/a.txt -> out/a.txt: denied"
        );
    }
}
