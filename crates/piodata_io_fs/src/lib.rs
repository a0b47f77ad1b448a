//! `piodata_io_fs` v1:
//! Rust-side directory mirror engine for staging a firmware `data` tree.
//!
//! - `mirror` : recursive walk and copy
//! - `spec`   : options/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod mirror;
pub mod report;
pub mod spec;
mod util;

pub use mirror::mirror_tree;
pub use report::{ReportMirror, ReportMirrorBuilder};
pub use spec::{MirrorTreeError, SpecMirrorOptions};
