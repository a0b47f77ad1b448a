//! Mirror report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one `mirror_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMirror {
    /// Total source entries visited (directories and files).
    pub cnt_scanned: u64,
    /// Destination directories that did not exist and were created.
    pub cnt_dirs_created: u64,
    /// Files whose bytes were written to the destination.
    pub cnt_files_copied: u64,
    /// Subset of `cnt_files_copied` that replaced an existing destination file.
    pub cnt_files_overwritten: u64,
    /// Non-fatal warnings (e.g. extended attributes that could not be carried).
    pub warnings: Vec<String>,
}

impl ReportMirror {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_dirs_created".to_string(), self.cnt_dirs_created);
        dict_counts.insert("cnt_files_copied".to_string(), self.cnt_files_copied);
        dict_counts.insert(
            "cnt_files_overwritten".to_string(),
            self.cnt_files_overwritten,
        );
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} dirs_created={} files_copied={} files_overwritten={} warnings={}",
            self.cnt_scanned,
            self.cnt_dirs_created,
            self.cnt_files_copied,
            self.cnt_files_overwritten,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MIRROR]"))
    }
}

/// Mutable accumulator for mirror statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportMirrorBuilder {
    cnt_scanned: u64,
    cnt_dirs_created: u64,
    cnt_files_copied: u64,
    cnt_files_overwritten: u64,
    warnings: Vec<String>,
}

impl ReportMirrorBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_dir_created(&mut self) {
        self.cnt_dirs_created += 1;
    }

    /// Count one copied file; `if_overwritten` marks a replaced destination.
    pub fn add_file_copied(&mut self, if_overwritten: bool) {
        self.cnt_files_copied += 1;
        if if_overwritten {
            self.cnt_files_overwritten += 1;
        }
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMirror {
        ReportMirror {
            cnt_scanned: self.cnt_scanned,
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_files_copied: self.cnt_files_copied,
            cnt_files_overwritten: self.cnt_files_overwritten,
            warnings: self.warnings,
        }
    }
}
