//! rust_uq — finite-difference sensitivity sampling and analysis with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the FD sampler and its analysis to Python via the `_rust_uq` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes and submodules used by the `rust_uq` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`distributions`, `transforms`,
//!   `sampling`, `analysis`) as the public crate surface.
//! - Define the `#[pyclass]` sampler wrapper and the `#[pymodule]` initializer
//!   for the `_rust_uq` Python extension.
//! - Register the `sampling` submodule under `rust_uq` so that dot-notation
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Python dicts keep insertion order, so a `vary` dict fixes the parameter
//!   order of the sampler exactly like a Rust [`Vary`](distributions::Vary).
//!
//! Conventions
//! -----------
//! - Data flows distributions + transforms → sampling → (model runs) →
//!   analysis.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//! - Library code never installs a `tracing` subscriber; call
//!   [`logging::init_tracing`] (or `init_logging` from Python) once per process.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`.

pub mod analysis;
pub mod distributions;
pub mod logging;
pub mod sampling;
pub mod transforms;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::collections::BTreeMap;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray1, PyArray2, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    sampling::{FDSampler, Sampler},
    utils::{extract_dependency, extract_fd_options, extract_results_table, extract_vary},
};

/// FDSampler — Python-facing wrapper for the finite-difference sampler.
///
/// Purpose
/// -------
/// Expose [`sampling::FDSampler`] to Python as an iterator of parameter dicts
/// and provide a one-call `analyse` over the collected model outputs.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `FDSampler(vary, dependency=None, perturbation=0.05, relative_analysis=False, start_count=0)`:
/// - `vary`: `dict[str, tuple]`
///   Parameter name → `("normal", mean, std)`, `("uniform", lower, upper)`,
///   `("lognormal", location, scale)` or `("triangular", min, max, mode)`.
/// - `dependency`: `None | dict | matrix`
///   `None` for independent inputs, `{"mean": ..., "cov": ...}` for a joint
///   normal, or a correlation matrix.
///
/// Notes
/// -----
/// - Native Rust callers should use [`sampling::FDSampler`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "FDSampler", module = "rust_uq.sampling", unsendable)]
pub struct PyFDSampler {
    inner: FDSampler,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFDSampler {
    #[new]
    #[pyo3(
        text_signature = "(vary, /, dependency=None, perturbation=0.05, relative_analysis=False, start_count=0)",
        signature = (vary, dependency = None, perturbation = None, relative_analysis = None, start_count = None)
    )]
    pub fn new<'py>(
        py: Python<'py>, vary: &Bound<'py, PyDict>, dependency: Option<&Bound<'py, PyAny>>,
        perturbation: Option<f64>, relative_analysis: Option<bool>, start_count: Option<usize>,
    ) -> PyResult<PyFDSampler> {
        let vary = extract_vary(vary)?;
        let dependency = extract_dependency(py, dependency)?;
        let options = extract_fd_options(perturbation, relative_analysis, start_count)?;
        let inner = FDSampler::new(vary, dependency, options)?;
        Ok(PyFDSampler { inner })
    }

    pub fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    /// Next sample as a dict in `vary` order, or `StopIteration`.
    pub fn __next__<'py>(mut slf: PyRefMut<'py, Self>) -> PyResult<Option<Bound<'py, PyDict>>> {
        let py = slf.py();
        let Some(sample) = slf.inner.next() else {
            return Ok(None);
        };
        let dict = PyDict::new(py);
        for (name, value) in sample.iter() {
            dict.set_item(name, value)?;
        }
        Ok(Some(dict))
    }

    pub fn __len__(&self) -> usize {
        self.inner.n_samples()
    }

    #[getter]
    pub fn n_samples(&self) -> usize {
        self.inner.n_samples()
    }

    /// Number of samples drawn so far.
    #[getter]
    pub fn count(&self) -> usize {
        self.inner.current_count()
    }

    #[getter]
    pub fn perturbation(&self) -> f64 {
        self.inner.perturbation()
    }

    #[getter]
    pub fn relative_analysis(&self) -> bool {
        self.inner.relative_analysis()
    }

    #[getter]
    pub fn is_dependent(&self) -> bool {
        self.inner.is_dependent()
    }

    #[getter]
    pub fn parameter_names(&self) -> Vec<String> {
        self.inner.parameter_names().to_vec()
    }

    /// Independent `P × N` node grid.
    pub fn nodes<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.nodes().as_array().to_pyarray(py)
    }

    /// Correlation-transformed node grid, or `None` for independent inputs.
    pub fn dependent_nodes<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray2<f64>>> {
        self.inner.dependent_nodes().map(|grid| grid.as_array().to_pyarray(py))
    }

    /// Run the FD analysis over `results` (QoI → list of per-run outputs).
    ///
    /// Returns `{qoi: {input: ndarray}}` of first-order derivatives; QoIs with
    /// zeros in their nominal output are omitted.
    pub fn analyse<'py>(
        &self, py: Python<'py>, results: &Bound<'py, PyDict>, qoi_cols: Vec<String>,
    ) -> PyResult<BTreeMap<String, BTreeMap<String, Bound<'py, PyArray1<f64>>>>> {
        let table = extract_results_table(py, results)?;
        let analysis = self.inner.analysis(qoi_cols)?;
        let outcome = analysis.analyse(&table)?;
        Ok(outcome
            .raw_data()
            .derivatives_first
            .iter()
            .map(|(qoi, per_input)| {
                let arrays = per_input
                    .iter()
                    .map(|(input, values)| (input.clone(), values.to_pyarray(py)))
                    .collect();
                (qoi.clone(), arrays)
            })
            .collect())
    }
}

/// Install a stderr `tracing` subscriber; returns `False` if one already exists.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (level = "warn"))]
fn init_logging(level: &str) -> bool {
    logging::init_tracing(level)
}

/// _rust_uq — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_uq` Python module and register its `sampling` submodule
/// used by the public `rust_uq` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_uq<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let sampling_mod = PyModule::new(_py, "sampling")?;
    sampling(_py, m, &sampling_mod)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_uq.sampling", sampling_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn sampling<'py>(
    _py: Python, rust_uq: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyFDSampler>()?;
    rust_uq.add_submodule(m)?;
    Ok(())
}
