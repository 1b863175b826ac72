#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::ResultsTable,
    distributions::{JointNormal, Marginal, Vary},
    sampling::{FDOptions, SamplerError},
    transforms::Dependency,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// 2-D float matrix from a numpy array or a list of equal-length rows.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D numpy.ndarray or list of float64 rows")
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("matrix rows must all have the same length"));
    }
    Array2::from_shape_vec((rows.len(), n_cols), rows.concat())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Marginal from a tuple `(family, a, b[, c])`.
///
/// Accepted families (case-insensitive): `normal(mean, std)`,
/// `uniform(lower, upper)`, `lognormal(location, scale)`,
/// `triangular(min, max, mode)`.
#[cfg(feature = "python-bindings")]
pub fn extract_marginal(name: &str, raw: &Bound<'_, PyAny>) -> PyResult<Marginal> {
    let (family, params): (String, Vec<f64>) = if let Ok((f, a, b)) =
        raw.extract::<(String, f64, f64)>()
    {
        (f, vec![a, b])
    } else if let Ok((f, a, b, c)) = raw.extract::<(String, f64, f64, f64)>() {
        (f, vec![a, b, c])
    } else {
        return Err(PyTypeError::new_err(format!(
            "distribution of '{name}' must be a tuple (family, a, b) or (family, a, b, c)"
        )));
    };

    let marginal = match (family.to_lowercase().as_str(), params.as_slice()) {
        ("normal", &[mean, std]) => Marginal::normal(mean, std)?,
        ("uniform", &[lower, upper]) => Marginal::uniform(lower, upper)?,
        ("lognormal", &[location, scale]) => Marginal::lognormal(location, scale)?,
        ("triangular", &[min, max, mode]) => Marginal::triangular(min, max, mode)?,
        (other, p) => {
            return Err(PyValueError::new_err(format!(
                "invalid distribution {other:?} with {} parameters for '{name}' (expected \
                 'normal', 'uniform', 'lognormal' with 2 or 'triangular' with 3)",
                p.len()
            )));
        }
    };
    Ok(marginal)
}

/// Ordered `Vary` from a dict of name → distribution tuple.
#[cfg(feature = "python-bindings")]
pub fn extract_vary(raw: &Bound<'_, PyDict>) -> PyResult<Vary> {
    let entries = raw
        .iter()
        .map(|(key, value)| {
            let name: String = key.extract()?;
            let marginal = extract_marginal(&name, &value)?;
            Ok((name, marginal))
        })
        .collect::<PyResult<Vec<(String, Marginal)>>>()?;
    let vary = Vary::new(entries).map_err(SamplerError::from)?;
    Ok(vary)
}

/// Dependency from `None`, a `{"mean": ..., "cov": ...}` dict, or a
/// correlation matrix.
#[cfg(feature = "python-bindings")]
pub fn extract_dependency<'py>(
    py: Python<'py>, raw: Option<&Bound<'py, PyAny>>,
) -> PyResult<Dependency> {
    let Some(raw) = raw.filter(|r| !r.is_none()) else {
        return Ok(Dependency::Independent);
    };

    if let Ok(dict) = raw.downcast::<PyDict>() {
        let mean_any = dict
            .get_item("mean")?
            .ok_or_else(|| PyValueError::new_err("joint dependency requires a 'mean' entry"))?;
        let cov_any = dict
            .get_item("cov")?
            .ok_or_else(|| PyValueError::new_err("joint dependency requires a 'cov' entry"))?;
        let mean_arr = extract_f64_array(py, &mean_any)?;
        let mean_slice = mean_arr.as_slice().map_err(|_| {
            PyValueError::new_err("mean must be a 1-D contiguous float64 array or sequence")
        })?;
        let joint =
            JointNormal::new(Array1::from(mean_slice.to_vec()), extract_f64_matrix(&cov_any)?)?;
        return Ok(Dependency::Joint(joint));
    }

    Ok(Dependency::Correlation(extract_f64_matrix(raw)?))
}

#[cfg(feature = "python-bindings")]
pub fn extract_fd_options(
    perturbation: Option<f64>, relative_analysis: Option<bool>, start_count: Option<usize>,
) -> PyResult<FDOptions> {
    let opts = FDOptions::new(
        perturbation.unwrap_or(FDOptions::DEFAULT_PERTURBATION),
        relative_analysis.unwrap_or(false),
        start_count.unwrap_or(0),
    )?;
    Ok(opts)
}

/// ResultsTable from a dict of QoI → list of per-run outputs (floats or
/// 1-D arrays).
#[cfg(feature = "python-bindings")]
pub fn extract_results_table<'py>(
    py: Python<'py>, raw: &Bound<'py, PyDict>,
) -> PyResult<ResultsTable> {
    let mut table = ResultsTable::new();
    for (key, value) in raw.iter() {
        let qoi: String = key.extract()?;
        let runs: Vec<Bound<'py, PyAny>> = value.extract().map_err(|_| {
            PyTypeError::new_err(format!("results for '{qoi}' must be a sequence of runs"))
        })?;
        for run in runs {
            if let Ok(scalar) = run.extract::<f64>() {
                table.push_scalar(qoi.as_str(), scalar);
                continue;
            }
            let arr = extract_f64_array(py, &run)?;
            let slice = arr.as_slice().map_err(|_| {
                PyValueError::new_err("run outputs must be 1-D contiguous float64 arrays")
            })?;
            table.push(qoi.as_str(), Array1::from(slice.to_vec()));
        }
    }
    Ok(table)
}
