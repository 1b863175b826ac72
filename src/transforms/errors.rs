//! transforms::errors — failures while resolving or applying a correlation
//! transform.
//!
//! All variants are configuration failures: they are raised while the sampler
//! is being constructed and make that sampler unusable.

use crate::distributions::DistError;

/// Result alias for correlation-transform resolution and application.
pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    // ---- Descriptor shape ----
    /// Joint distribution or correlation matrix dimension differs from the
    /// number of varied parameters.
    DimensionMismatch { expected: usize, found: usize },

    /// Correlation matrix must be square.
    NotSquare { found: (usize, usize) },

    /// Correlation matrix diagonal entries must be exactly one.
    NonUnitDiagonal { index: usize, value: f64 },

    /// Correlation matrix entries must be finite.
    NonFiniteEntry { row: usize, col: usize, value: f64 },

    /// Correlation matrix must be symmetric.
    AsymmetricMatrix { row: usize, col: usize },

    /// Correlation matrix must admit a Cholesky factorization.
    NotPositiveDefinite,

    // ---- Joint distribution ----
    /// Independence must be expressed as `Dependency::Independent`.
    IndependentJointDistribution,

    /// Marginal and joint means disagree for a parameter.
    MeanMismatch { index: usize, independent: f64, dependent: f64 },

    // ---- Marginals ----
    /// A marginal could not provide a required moment.
    MissingMoment { index: usize, moment: &'static str },

    // ---- Output ----
    /// The transform produced a NaN/±∞ node.
    NonFiniteNode { param: usize, sample: usize, value: f64 },

    /// Underlying distribution error that has no dedicated variant.
    Distribution { text: String },
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Descriptor shape ----
            TransformError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Dependency dimension mismatch: expected {expected} parameters, found {found}"
                )
            }
            TransformError::NotSquare { found } => {
                write!(f, "Correlation matrix must be square, found shape {found:?}")
            }
            TransformError::NonUnitDiagonal { index, value } => {
                write!(f, "Correlation matrix diagonal at {index} must be 1, got {value}")
            }
            TransformError::NonFiniteEntry { row, col, value } => {
                write!(f, "Correlation matrix entry at ({row}, {col}) must be finite, got {value}")
            }
            TransformError::AsymmetricMatrix { row, col } => {
                write!(f, "Correlation matrix is not symmetric at ({row}, {col})")
            }
            TransformError::NotPositiveDefinite => {
                write!(f, "Correlation matrix is not positive definite")
            }

            // ---- Joint distribution ----
            TransformError::IndependentJointDistribution => {
                write!(
                    f,
                    "Joint distribution is not stochastically dependent; use an independent \
                     dependency instead"
                )
            }
            TransformError::MeanMismatch { index, independent, dependent } => {
                write!(
                    f,
                    "Mean of parameter {index} differs between marginal ({independent}) and joint \
                     ({dependent}) distributions"
                )
            }

            // ---- Marginals ----
            TransformError::MissingMoment { index, moment } => {
                write!(f, "Marginal of parameter {index} has no {moment}")
            }

            // ---- Output ----
            TransformError::NonFiniteNode { param, sample, value } => {
                write!(f, "Transformed node ({param}, {sample}) is non-finite: {value}")
            }
            TransformError::Distribution { text } => {
                write!(f, "Distribution error: {text}")
            }
        }
    }
}

impl From<DistError> for TransformError {
    fn from(err: DistError) -> Self {
        match err {
            DistError::CovarianceShape { found, .. } => TransformError::NotSquare { found },
            DistError::NonFiniteCovariance { row, col, value } => {
                TransformError::NonFiniteEntry { row, col, value }
            }
            DistError::AsymmetricCovariance { row, col } => {
                TransformError::AsymmetricMatrix { row, col }
            }
            DistError::NotPositiveDefinite => TransformError::NotPositiveDefinite,
            other => TransformError::Distribution { text: other.to_string() },
        }
    }
}
