//! `piodata_prebuild`:
//! PlatformIO pre-build step that stages `<project>/data` into
//! `<project>/.pio/build/esp32devV3x/data` for the filesystem image upload.
//!
//! - `layout` : fixed project paths
//! - `run`    : entry point and outcome model

pub mod layout;
pub mod run;

pub use layout::SpecPreBuildLayout;
pub use run::{
    C_STATUS_COPIED, C_STATUS_NOT_FOUND, EnumPreBuildOutcome, PreBuildError, run, run_for_script,
    run_with_layout, script_path_from_arg0,
};
