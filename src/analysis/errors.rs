//! analysis::errors — failures of FD analysis and result queries.
//!
//! Input errors and grid invariant violations abort an `analyse` call.
//! Query errors are returned by the results accessor. Data-quality problems
//! (zeros in a nominal output) are not errors; they are logged and the QoI
//! is skipped.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for analysis and result queries.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    // ---- Input ----
    /// At least one QoI must be requested.
    EmptyQoiList,

    /// The results table holds no columns.
    EmptyResultsTable,

    /// A requested QoI has no column in the results table.
    MissingQoi { qoi: String },

    /// A QoI column must hold one row per sample.
    RowCountMismatch { qoi: String, expected: usize, found: usize },

    /// All rows of a QoI column must share one length.
    RaggedColumn { qoi: String, row: usize, expected: usize, found: usize },

    // ---- Grid ----
    /// Relative-mode grid entry differs from its required value.
    GridInvariantViolated { param: usize, sample: usize, expected: f64, found: f64 },

    /// A perturbation step of zero width (e.g. zero mean in absolute mode).
    DegeneratePerturbation { param: String },

    // ---- Queries ----
    /// Statistic not backed by this analysis' raw data.
    NotImplemented { what: String },

    UnknownQoi { qoi: String },

    UnknownInput { input: String },

    /// Category not populated for the QoI.
    MissingCategory { category: &'static str, qoi: String },

    /// Surrogate called without a value for an input.
    MissingSurrogateInput { input: String },
}

impl std::error::Error for AnalysisError {}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input ----
            AnalysisError::EmptyQoiList => write!(f, "qoi_cols cannot be empty"),
            AnalysisError::EmptyResultsTable => {
                write!(f, "No data provided to the FD analysis")
            }
            AnalysisError::MissingQoi { qoi } => {
                write!(f, "Results table has no column for QoI '{qoi}'")
            }
            AnalysisError::RowCountMismatch { qoi, expected, found } => {
                write!(f, "QoI '{qoi}' has {found} rows, expected one per sample ({expected})")
            }
            AnalysisError::RaggedColumn { qoi, row, expected, found } => {
                write!(
                    f,
                    "QoI '{qoi}' row {row} has length {found}, expected {expected} like row 0"
                )
            }

            // ---- Grid ----
            AnalysisError::GridInvariantViolated { param, sample, expected, found } => {
                write!(
                    f,
                    "FD grid invariant violated at parameter {param}, sample {sample}: expected \
                     {expected}, found {found}"
                )
            }
            AnalysisError::DegeneratePerturbation { param } => {
                write!(f, "Perturbation of parameter '{param}' has zero width")
            }

            // ---- Queries ----
            AnalysisError::NotImplemented { what } => write!(f, "{what} is not implemented"),
            AnalysisError::UnknownQoi { qoi } => {
                write!(f, "no such quantity of interest - {qoi}")
            }
            AnalysisError::UnknownInput { input } => write!(f, "no such input - {input}"),
            AnalysisError::MissingCategory { category, qoi } => {
                write!(f, "{category} is not available for QoI '{qoi}'")
            }
            AnalysisError::MissingSurrogateInput { input } => {
                write!(f, "Surrogate called without a value for input '{input}'")
            }
        }
    }
}

/// Convert an [`AnalysisError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Query errors carry the identifying names in their messages.
    fn messages_name_the_offender() {
        let err = AnalysisError::UnknownQoi { qoi: "temp".into() };
        assert_eq!(err.to_string(), "no such quantity of interest - temp");

        let err = AnalysisError::NotImplemented { what: "statistic 'skew'".into() };
        assert!(err.to_string().contains("'skew'"));
    }
}
