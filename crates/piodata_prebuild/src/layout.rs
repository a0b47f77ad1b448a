//! Fixed project layout of a PlatformIO firmware tree.

use std::path::{Path, PathBuf};

pub const C_DIR_NAME_DATA: &str = "data";
pub const C_DIR_NAME_PIO: &str = ".pio";
pub const C_DIR_NAME_BUILD: &str = "build";
pub const C_NAME_BUILD_ENV: &str = "esp32devV3x";

/// Source and destination roots derived from the hook script location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPreBuildLayout {
    pub path_dir_project: PathBuf,
    /// `<project>/data`
    pub path_dir_data: PathBuf,
    /// `<project>/.pio/build/esp32devV3x/data`
    pub path_dir_dest: PathBuf,
}

impl SpecPreBuildLayout {
    /// Layout rooted at `path_dir_project`.
    pub fn from_project_dir<P: AsRef<Path>>(path_dir_project: P) -> Self {
        let path_dir_project = path_dir_project.as_ref().to_path_buf();
        let path_dir_data = path_dir_project.join(C_DIR_NAME_DATA);
        let path_dir_dest = path_dir_project
            .join(C_DIR_NAME_PIO)
            .join(C_DIR_NAME_BUILD)
            .join(C_NAME_BUILD_ENV)
            .join(C_DIR_NAME_DATA);
        Self {
            path_dir_project,
            path_dir_data,
            path_dir_dest,
        }
    }

    /// Layout whose project dir is the grandparent of `path_script`.
    ///
    /// `<project>/scripts/pre_build` resolves to `<project>`. Paths too short to have
    /// a grandparent fall back to the current directory.
    pub fn from_script_path<P: AsRef<Path>>(path_script: P) -> Self {
        let path_dir_project = path_script
            .as_ref()
            .parent()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_project_dir(path_dir_project)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::SpecPreBuildLayout;

    #[test]
    fn layout_from_script_uses_grandparent() {
        let layout = SpecPreBuildLayout::from_script_path("/work/fw/scripts/pre_build");
        assert_eq!(layout.path_dir_project, Path::new("/work/fw"));
        assert_eq!(layout.path_dir_data, Path::new("/work/fw/data"));
        assert_eq!(
            layout.path_dir_dest,
            Path::new("/work/fw/.pio/build/esp32devV3x/data")
        );
    }

    #[test]
    fn layout_from_short_script_path_falls_back_to_current_dir() {
        for c_script in ["pre_build", "scripts/pre_build"] {
            let layout = SpecPreBuildLayout::from_script_path(c_script);
            assert_eq!(layout.path_dir_project, PathBuf::from("."));
            assert_eq!(layout.path_dir_data, PathBuf::from("./data"));
        }
    }
}
