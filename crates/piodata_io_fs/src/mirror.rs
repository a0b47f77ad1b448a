//! Recursive directory mirroring.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::report::{ReportMirror, ReportMirrorBuilder};
use crate::spec::{MirrorTreeError, SpecMirrorOptions};
use crate::util::{copy_file_with_metadata, ensure_directory, is_destination_inside_source};

#[derive(Debug)]
struct SpecMirrorContext {
    spec_options: SpecMirrorOptions,
    builder_report: ReportMirrorBuilder,
    /// `(dev, ino)` of the directories on the current descent path.
    set_ancestor_dirs: HashSet<(u64, u64)>,
}

/// Mirror the tree under `dir_source` into `dir_destination`.
///
/// The destination (and any missing parents) is created first. Each source entry is
/// then handled in directory-listing order: directories are recreated and walked,
/// everything else is copied byte-for-byte with its permission bits and
/// access/modification times, replacing whatever file sits at the same relative path.
///
/// Destination entries without a source counterpart are left alone.
///
/// A destination inside the source is rejected up front. A source nested under
/// the destination is allowed.
///
/// Symlinks are followed: a link to a directory is walked like a directory and a
/// link to a file is copied as the file's contents.
///
/// The first filesystem failure aborts the run with [`MirrorTreeError`]. Whatever was
/// already written stays in place.
pub fn mirror_tree<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_options: SpecMirrorOptions,
) -> Result<ReportMirror, MirrorTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref();
    let path_dir_dst = dir_destination.as_ref();

    if is_destination_inside_source(path_dir_src, path_dir_dst) {
        return Err(MirrorTreeError::SourceDestinationOverlap {
            source_dir: path_dir_src.to_path_buf(),
            destination: path_dir_dst.to_path_buf(),
        });
    }

    let mut spec_ctx = SpecMirrorContext {
        spec_options,
        builder_report: ReportMirrorBuilder::default(),
        set_ancestor_dirs: HashSet::new(),
    };

    let b_created =
        ensure_directory(path_dir_dst).map_err(|e| MirrorTreeError::DestinationInitFailed {
            path: path_dir_dst.to_path_buf(),
            source: e,
        })?;
    if b_created {
        debug!(path = %path_dir_dst.display(), "created destination root");
        spec_ctx.builder_report.add_dir_created();
    }

    mirror_directory(path_dir_src, path_dir_dst, &mut spec_ctx)?;

    let report = spec_ctx.builder_report.build();
    info!(
        source = %path_dir_src.display(),
        destination = %path_dir_dst.display(),
        "{report}"
    );
    Ok(report)
}

fn mirror_directory(
    path_dir_src: &Path,
    path_dir_dst: &Path,
    spec_ctx: &mut SpecMirrorContext,
) -> Result<(), MirrorTreeError> {
    let iter_entries = fs::read_dir(path_dir_src).map_err(|e| MirrorTreeError::ReadDirFailed {
        path: path_dir_src.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    let tuple_dir_identifier = {
        let tuple_dir_identifier = crate::util::directory_identity(path_dir_src).map_err(|e| {
            MirrorTreeError::InspectFailed {
                path: path_dir_src.to_path_buf(),
                source: e,
            }
        })?;
        if !spec_ctx.set_ancestor_dirs.insert(tuple_dir_identifier) {
            return Err(MirrorTreeError::SymlinkLoop(path_dir_src.to_path_buf()));
        }
        tuple_dir_identifier
    };

    let res_walk = mirror_entries(iter_entries, path_dir_src, path_dir_dst, spec_ctx);

    #[cfg(unix)]
    spec_ctx.set_ancestor_dirs.remove(&tuple_dir_identifier);

    res_walk
}

fn mirror_entries(
    iter_entries: fs::ReadDir,
    path_dir_src: &Path,
    path_dir_dst: &Path,
    spec_ctx: &mut SpecMirrorContext,
) -> Result<(), MirrorTreeError> {
    for _entry_res in iter_entries {
        let entry = _entry_res.map_err(|e| MirrorTreeError::ReadDirFailed {
            path: path_dir_src.to_path_buf(),
            source: e,
        })?;
        spec_ctx.builder_report.add_scanned();

        let path_entry_src = entry.path();
        let path_entry_dst = path_dir_dst.join(entry.file_name());

        let cfg_file_type = entry
            .file_type()
            .map_err(|e| MirrorTreeError::InspectFailed {
                path: path_entry_src.clone(),
                source: e,
            })?;
        let cfg_file_type = if cfg_file_type.is_symlink() {
            fs::metadata(&path_entry_src)
                .map_err(|e| MirrorTreeError::InspectFailed {
                    path: path_entry_src.clone(),
                    source: e,
                })?
                .file_type()
        } else {
            cfg_file_type
        };

        if cfg_file_type.is_dir() {
            let b_created = ensure_directory(&path_entry_dst).map_err(|e| {
                MirrorTreeError::CreateDirFailed {
                    path: path_entry_dst.clone(),
                    source: e,
                }
            })?;
            if b_created {
                debug!(path = %path_entry_dst.display(), "created directory");
                spec_ctx.builder_report.add_dir_created();
            }
            mirror_directory(&path_entry_src, &path_entry_dst, spec_ctx)?;
        } else if cfg_file_type.is_file() {
            let b_overwritten = fs::symlink_metadata(&path_entry_dst).is_ok();
            copy_file_with_metadata(
                &path_entry_src,
                &path_entry_dst,
                &spec_ctx.spec_options,
                &mut spec_ctx.builder_report,
            )?;
            trace!(
                src = %path_entry_src.display(),
                dst = %path_entry_dst.display(),
                overwritten = b_overwritten,
                "copied file"
            );
            spec_ctx.builder_report.add_file_copied(b_overwritten);
        } else {
            return Err(MirrorTreeError::SpecialFile(path_entry_src));
        }
    }

    Ok(())
}
