//! sampling::errors — configuration errors raised while building a sampler.
//!
//! Every [`SamplerError`] is fatal to the sampler being constructed. Errors
//! from the distribution and transform layers are flattened into dedicated
//! variants so callers can match on one enum.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{distributions::VaryError, transforms::TransformError};

/// Result alias for sampler construction.
pub type SamplerResult<T> = Result<T, SamplerError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SamplerError {
    // ---- Vary ----
    /// `vary` must contain at least one parameter.
    EmptyVary,

    /// Parameter names in `vary` must be unique.
    DuplicateParameter { name: String },

    /// Absolute-mode base values are read off normal means.
    NonNormalMarginal { name: String, family: &'static str },

    /// Absolute-mode steps scale with the mean; a zero (or subnormal) mean
    /// gives no step.
    ZeroStep { name: String, mean: f64 },

    /// A marginal could not provide a required moment.
    MissingMoment { index: usize, moment: &'static str },

    // ---- Options ----
    /// Perturbation must be positive and finite.
    InvalidPerturbation { value: f64, reason: &'static str },

    // ---- Dependency ----
    /// Dependency dimension differs from the number of varied parameters.
    DependencyDimensionMismatch { expected: usize, found: usize },

    /// Correlation matrix must be square.
    CorrelationNotSquare { found: (usize, usize) },

    /// Correlation matrix diagonal must be all ones.
    NonUnitDiagonal { index: usize, value: f64 },

    /// Correlation entries must be finite.
    NonFiniteCorrelation { row: usize, col: usize, value: f64 },

    /// Correlation matrix must be symmetric.
    AsymmetricCorrelation { row: usize, col: usize },

    /// Correlation matrix must be positive definite.
    NotPositiveDefinite,

    /// Joint distribution without dependence; use `Dependency::Independent`.
    IndependentJointDistribution,

    /// Marginal and joint means disagree.
    MeanMismatch { index: usize, independent: f64, dependent: f64 },

    /// The correlation transform produced a non-finite node.
    NonFiniteNode { param: usize, sample: usize, value: f64 },

    /// Wrapper for other transform errors.
    TransformFailed { text: String },
}

impl std::error::Error for SamplerError {}

impl std::fmt::Display for SamplerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Vary ----
            SamplerError::EmptyVary => write!(f, "'vary' cannot be empty"),
            SamplerError::DuplicateParameter { name } => {
                write!(f, "Parameter '{name}' appears more than once in 'vary'")
            }
            SamplerError::NonNormalMarginal { name, family } => {
                write!(
                    f,
                    "Parameter '{name}' has a {family} distribution; non-relative analysis \
                     requires normal distributions"
                )
            }
            SamplerError::ZeroStep { name, mean } => {
                write!(
                    f,
                    "Parameter '{name}' with mean {mean} gives a zero perturbation step in \
                     non-relative analysis; use relative analysis instead"
                )
            }
            SamplerError::MissingMoment { index, moment } => {
                write!(f, "Distribution of parameter {index} has no {moment}")
            }

            // ---- Options ----
            SamplerError::InvalidPerturbation { value, reason } => {
                write!(f, "Invalid perturbation {value}: {reason}")
            }

            // ---- Dependency ----
            SamplerError::DependencyDimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Dependency dimension mismatch: expected {expected} parameters, found {found}"
                )
            }
            SamplerError::CorrelationNotSquare { found } => {
                write!(f, "Correlation matrix must be square, found shape {found:?}")
            }
            SamplerError::NonUnitDiagonal { index, value } => {
                write!(f, "Correlation matrix diagonal at {index} must be 1, got {value}")
            }
            SamplerError::NonFiniteCorrelation { row, col, value } => {
                write!(f, "Correlation matrix entry at ({row}, {col}) must be finite, got {value}")
            }
            SamplerError::AsymmetricCorrelation { row, col } => {
                write!(f, "Correlation matrix is not symmetric at ({row}, {col})")
            }
            SamplerError::NotPositiveDefinite => {
                write!(f, "Correlation matrix is not positive definite")
            }
            SamplerError::IndependentJointDistribution => {
                write!(
                    f,
                    "It doesn't make sense to use an independent joint distribution in the FD \
                     sampler; use an independent dependency instead"
                )
            }
            SamplerError::MeanMismatch { index, independent, dependent } => {
                write!(
                    f,
                    "Mean of parameter {index} differs between marginal ({independent}) and joint \
                     ({dependent}) distributions"
                )
            }
            SamplerError::NonFiniteNode { param, sample, value } => {
                write!(f, "Dependent node ({param}, {sample}) is non-finite: {value}")
            }
            SamplerError::TransformFailed { text } => {
                write!(f, "Correlation transform failed: {text}")
            }
        }
    }
}

impl From<VaryError> for SamplerError {
    fn from(err: VaryError) -> Self {
        match err {
            VaryError::Empty => SamplerError::EmptyVary,
            VaryError::DuplicateName { name } => SamplerError::DuplicateParameter { name },
        }
    }
}

impl From<TransformError> for SamplerError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::DimensionMismatch { expected, found } => {
                SamplerError::DependencyDimensionMismatch { expected, found }
            }
            TransformError::NotSquare { found } => SamplerError::CorrelationNotSquare { found },
            TransformError::NonUnitDiagonal { index, value } => {
                SamplerError::NonUnitDiagonal { index, value }
            }
            TransformError::NonFiniteEntry { row, col, value } => {
                SamplerError::NonFiniteCorrelation { row, col, value }
            }
            TransformError::AsymmetricMatrix { row, col } => {
                SamplerError::AsymmetricCorrelation { row, col }
            }
            TransformError::NotPositiveDefinite => SamplerError::NotPositiveDefinite,
            TransformError::IndependentJointDistribution => {
                SamplerError::IndependentJointDistribution
            }
            TransformError::MeanMismatch { index, independent, dependent } => {
                SamplerError::MeanMismatch { index, independent, dependent }
            }
            TransformError::MissingMoment { index, moment } => {
                SamplerError::MissingMoment { index, moment }
            }
            TransformError::NonFiniteNode { param, sample, value } => {
                SamplerError::NonFiniteNode { param, sample, value }
            }
            TransformError::Distribution { text } => SamplerError::TransformFailed { text },
        }
    }
}

/// Convert a [`SamplerError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<SamplerError> for PyErr {
    fn from(err: SamplerError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that transform errors keep their payload when flattened.
    fn transform_errors_flatten_with_payload() {
        let err: SamplerError =
            TransformError::NonUnitDiagonal { index: 2, value: 0.5 }.into();
        assert_eq!(err, SamplerError::NonUnitDiagonal { index: 2, value: 0.5 });

        let err: SamplerError = TransformError::IndependentJointDistribution.into();
        assert_eq!(err, SamplerError::IndependentJointDistribution);
    }

    #[test]
    // Purpose
    // -------
    // Ensure vary errors map onto the sampler's configuration variants.
    fn vary_errors_map_to_configuration_variants() {
        assert_eq!(SamplerError::from(VaryError::Empty), SamplerError::EmptyVary);
        let err = SamplerError::from(VaryError::DuplicateName { name: "k".into() });
        assert!(err.to_string().contains("'k'"));
    }
}
