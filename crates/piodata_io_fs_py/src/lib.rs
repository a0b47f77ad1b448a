use std::collections::BTreeMap;

use piodata_io_fs::{MirrorTreeError, ReportMirror, SpecMirrorOptions, mirror_tree};
use piodata_prebuild::{PreBuildError, run_for_script};
use pyo3::exceptions::{PyNotADirectoryError, PyOSError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "piodata.fs.mirror_tree.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportMirror")]
#[derive(Debug, Clone)]
struct PyReportMirror {
    inner: ReportMirror,
}

#[pymethods]
impl PyReportMirror {
    #[getter]
    fn cnt_scanned(&self) -> u64 {
        self.inner.cnt_scanned
    }

    #[getter]
    fn cnt_dirs_created(&self) -> u64 {
        self.inner.cnt_dirs_created
    }

    #[getter]
    fn cnt_files_copied(&self) -> u64 {
        self.inner.cnt_files_copied
    }

    #[getter]
    fn cnt_files_overwritten(&self) -> u64 {
        self.inner.cnt_files_overwritten
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings.clone()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.inner.warning_count()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.inner.to_dict()
    }

    #[pyo3(signature = (prefix = "[MIRROR]"))]
    fn format(&self, prefix: &str) -> String {
        self.inner.format(prefix)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

fn map_mirror_tree_error(exception: MirrorTreeError) -> PyErr {
    match exception {
        MirrorTreeError::SourceDestinationOverlap { .. } => {
            PyValueError::new_err(exception.to_string())
        }
        MirrorTreeError::ReadDirFailed { ref source, .. }
            if source.kind() == std::io::ErrorKind::NotADirectory =>
        {
            PyNotADirectoryError::new_err(exception.to_string())
        }
        _ => PyOSError::new_err(exception.to_string()),
    }
}

fn map_pre_build_error(exception: PreBuildError) -> PyErr {
    match exception {
        PreBuildError::Mirror(e) => map_mirror_tree_error(e),
        other => PyOSError::new_err(other.to_string()),
    }
}

#[pyfunction(name = "mirror_tree")]
#[pyo3(signature = (dir_source, dir_destination, if_copy_xattrs = true))]
fn mirror_tree_py(
    py: Python<'_>,
    dir_source: String,
    dir_destination: String,
    if_copy_xattrs: bool,
) -> PyResult<PyReportMirror> {
    let spec_options = SpecMirrorOptions { if_copy_xattrs };
    let report = py.allow_threads(|| mirror_tree(dir_source, dir_destination, spec_options));
    let report = report.map_err(map_mirror_tree_error)?;
    Ok(PyReportMirror { inner: report })
}

/// Stage `<project>/data` for a PlatformIO hook whose file is `path_script`.
///
/// Returns the status line; the hook prints it through its own `sys.stdout`.
#[pyfunction(name = "run_pre_build")]
fn run_pre_build_py(py: Python<'_>, path_script: String) -> PyResult<String> {
    let outcome = py.allow_threads(|| run_for_script(&path_script));
    let outcome = outcome.map_err(map_pre_build_error)?;
    Ok(outcome.status_line().to_string())
}

#[pymodule]
fn _piodata_io_fs_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    piodata_log::init(piodata_log::C_DEFAULT_DIRECTIVE);
    module.add_class::<PyReportMirror>()?;
    module.add_function(wrap_pyfunction!(mirror_tree_py, module)?)?;
    module.add_function(wrap_pyfunction!(run_pre_build_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}

