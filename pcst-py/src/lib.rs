//! Thin PyO3 boundary over `pcst-core`. Marshals Python-native types in,
//! translates [`pcst_core::Error`] into a Python exception, and marshals the
//! solution back out. No algorithmic logic lives here.

use pcst_types::Pruning;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::str::FromStr;

/// Solves a prize-collecting Steiner tree/forest instance.
///
/// `root = -1` means no fixed root (equivalent to `None` on the Rust side).
/// Returns `(vertices, edges)`, both sorted index lists into the inputs.
#[pyfunction]
#[pyo3(signature = (edges, prizes, costs, root=-1, num_clusters=1, pruning="strong", verbosity=0))]
fn pcst_fast(
    edges: Vec<(usize, usize)>,
    prizes: Vec<f64>,
    costs: Vec<f64>,
    root: i64,
    num_clusters: usize,
    pruning: &str,
    verbosity: u8,
) -> PyResult<(Vec<usize>, Vec<usize>)> {
    let root = if root < 0 { None } else { Some(root as usize) };
    let pruning = Pruning::from_str(pruning).map_err(PyValueError::new_err)?;

    let solution = pcst_core::pcst(&edges, &prizes, &costs, root, num_clusters, pruning, verbosity)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok((solution.vertices, solution.edges))
}

#[pymodule]
fn pcst_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pcst_fast, m)?)?;
    Ok(())
}
