//! distributions::errors — error types for marginal and joint distributions.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when constructing or
//! validating the probability distributions that describe uncertain model
//! inputs. Parameter checks for univariate families are delegated to
//! `statrs`; this module normalizes its per-family error types into a single
//! [`DistError`] so callers do not depend on the backend directly.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and refer to the parameter order of the owning
//!   [`Vary`](crate::distributions::Vary) or joint distribution.
//! - Matrix shape errors report `(rows, cols)` as found.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::{LogNormalError, NormalError, TriangularError, UniformError};

/// Result alias for distribution construction and evaluation.
pub type DistResult<T> = Result<T, DistError>;

/// DistError — invalid distribution descriptions.
///
/// Variants
/// --------
/// - `InvalidParameter`
///   A univariate family rejected its parameters (wraps the `statrs`
///   message verbatim).
/// - `MissingMoment`
///   The backend could not provide a mean or standard deviation.
/// - `EmptyMean`, `CovarianceShape`, `NonFiniteCovariance`,
///   `AsymmetricCovariance`, `NotPositiveDefinite`
///   Structural problems with a joint normal description.
/// - `StdLengthMismatch`
///   `from_correlation` received a standard-deviation vector of the wrong
///   length.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Univariate families ----
    /// A `statrs` constructor rejected the parameters.
    InvalidParameter { family: &'static str, reason: String },

    /// Mean or standard deviation is undefined for this distribution.
    MissingMoment { family: &'static str, moment: &'static str },

    // ---- Joint normal ----
    /// Mean vector must have at least one entry.
    EmptyMean,

    /// Covariance must be `d × d` with `d = mean.len()`.
    CovarianceShape { expected: usize, found: (usize, usize) },

    /// Mean and covariance entries must be finite.
    NonFiniteCovariance { row: usize, col: usize, value: f64 },

    /// Covariance must be symmetric.
    AsymmetricCovariance { row: usize, col: usize },

    /// Covariance must admit a Cholesky factorization.
    NotPositiveDefinite,

    /// Standard deviations must match the correlation dimension.
    StdLengthMismatch { expected: usize, actual: usize },
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Univariate families ----
            DistError::InvalidParameter { family, reason } => {
                write!(f, "Invalid {family} distribution parameters: {reason}")
            }
            DistError::MissingMoment { family, moment } => {
                write!(f, "The {moment} of a {family} distribution is undefined")
            }

            // ---- Joint normal ----
            DistError::EmptyMean => {
                write!(f, "Joint distribution mean must not be empty")
            }
            DistError::CovarianceShape { expected, found } => {
                write!(
                    f,
                    "Covariance shape mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            DistError::NonFiniteCovariance { row, col, value } => {
                write!(f, "Covariance entry at ({row}, {col}) must be finite, got {value}")
            }
            DistError::AsymmetricCovariance { row, col } => {
                write!(f, "Covariance is not symmetric at ({row}, {col})")
            }
            DistError::NotPositiveDefinite => {
                write!(f, "Covariance matrix is not positive definite")
            }
            DistError::StdLengthMismatch { expected, actual } => {
                write!(f, "Standard deviation length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl From<NormalError> for DistError {
    fn from(err: NormalError) -> Self {
        DistError::InvalidParameter { family: "normal", reason: err.to_string() }
    }
}

impl From<UniformError> for DistError {
    fn from(err: UniformError) -> Self {
        DistError::InvalidParameter { family: "uniform", reason: err.to_string() }
    }
}

impl From<LogNormalError> for DistError {
    fn from(err: LogNormalError) -> Self {
        DistError::InvalidParameter { family: "lognormal", reason: err.to_string() }
    }
}

impl From<TriangularError> for DistError {
    fn from(err: TriangularError) -> Self {
        DistError::InvalidParameter { family: "triangular", reason: err.to_string() }
    }
}

/// Convert a [`DistError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<DistError> for PyErr {
    fn from(err: DistError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::Normal;

    #[test]
    // Purpose
    // -------
    // Verify that a `statrs` constructor failure is normalized into
    // `DistError::InvalidParameter` with the family name attached.
    fn normal_error_maps_to_invalid_parameter() {
        // Arrange
        let err = Normal::new(0.0, -1.0).expect_err("negative std must be rejected");

        // Act
        let dist_err = DistError::from(err);

        // Assert
        match &dist_err {
            DistError::InvalidParameter { family, .. } => assert_eq!(*family, "normal"),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
        assert!(dist_err.to_string().contains("normal"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure shape errors embed both the expected and found dimensions.
    fn covariance_shape_message_embeds_dimensions() {
        let err = DistError::CovarianceShape { expected: 3, found: (2, 3) };
        let msg = err.to_string();
        assert!(msg.contains("(3, 3)"));
        assert!(msg.contains("(2, 3)"));
    }
}
