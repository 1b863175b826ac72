//! transforms — correlation transport for dependent inputs.
//!
//! Purpose
//! -------
//! Turn a grid of independent perturbations into the corresponding grid of
//! correlated perturbations, given a description of how the inputs depend on
//! each other.
//!
//! Key behaviors
//! -------------
//! - Describe dependency with the tagged union [`Dependency`]:
//!   `Independent`, `Joint` (multivariate normal → [`Rosenblatt`]) or
//!   `Correlation` (correlation matrix → [`Cholesky`]).
//! - Resolve the descriptor once, at sampler construction, into at most one
//!   boxed [`CorrelationTransform`] via [`Dependency::resolve`].
//! - Apply a transform to a whole `P × N` grid in one call; columns are
//!   transformed independently.
//!
//! Invariants & assumptions
//! ------------------------
//! - Grids are `P × N` with rows in the order of the owning
//!   [`Vary`](crate::distributions::Vary).
//! - A joint description that is not stochastically dependent is rejected;
//!   independence is spelled `Dependency::Independent`.
//!
//! Testing notes
//! -------------
//! - Strategy-level numerics are tested in [`rosenblatt`] and [`cholesky`];
//!   this module tests descriptor resolution.

pub mod cholesky;
pub mod errors;
pub mod rosenblatt;

pub use self::cholesky::Cholesky;
pub use self::errors::{TransformError, TransformResult};
pub use self::rosenblatt::Rosenblatt;

use crate::distributions::{JointNormal, Vary};
use ndarray::{Array2, ArrayView2};

/// Which correlation strategy a sampler is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStrategy {
    Rosenblatt,
    Cholesky,
}

impl TransformStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            TransformStrategy::Rosenblatt => "rosenblatt",
            TransformStrategy::Cholesky => "cholesky",
        }
    }
}

impl std::fmt::Display for TransformStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// CorrelationTransform — map independent grid columns to dependent ones.
///
/// Implementors receive the whole `P × N` grid and return a grid of the same
/// shape. They must not mix columns.
pub trait CorrelationTransform: std::fmt::Debug {
    fn strategy(&self) -> TransformStrategy;
    fn transform(&self, nodes: ArrayView2<'_, f64>) -> TransformResult<Array2<f64>>;
}

/// Dependency — how the varied inputs depend on each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dependency {
    /// Inputs are independent; no transform is applied.
    #[default]
    Independent,
    /// Dependent multivariate normal; resolved to [`Rosenblatt`].
    Joint(JointNormal),
    /// Correlation matrix with unit diagonal; resolved to [`Cholesky`].
    Correlation(Array2<f64>),
}

impl Dependency {
    /// resolve — select and build the transform for this descriptor.
    ///
    /// Returns
    /// -------
    /// `TransformResult<Option<Box<dyn CorrelationTransform>>>`
    ///   `None` for `Independent`, otherwise the validated strategy.
    ///
    /// Errors
    /// ------
    /// - `TransformError::IndependentJointDistribution` for a joint with no
    ///   off-diagonal covariance.
    /// - Any construction error of [`Rosenblatt::new`] or [`Cholesky::new`].
    pub fn resolve(&self, vary: &Vary) -> TransformResult<Option<Box<dyn CorrelationTransform>>> {
        match self {
            Dependency::Independent => Ok(None),
            Dependency::Joint(joint) => {
                if joint.dim() != vary.len() {
                    return Err(TransformError::DimensionMismatch {
                        expected: vary.len(),
                        found: joint.dim(),
                    });
                }
                if !joint.is_stochastically_dependent() {
                    return Err(TransformError::IndependentJointDistribution);
                }
                Ok(Some(Box::new(Rosenblatt::new(joint.clone(), vary)?)))
            }
            Dependency::Correlation(matrix) => Ok(Some(Box::new(Cholesky::new(matrix, vary)?))),
        }
    }

    pub fn is_independent(&self) -> bool {
        matches!(self, Dependency::Independent)
    }
}
