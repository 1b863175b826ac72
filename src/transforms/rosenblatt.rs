//! transforms::rosenblatt — copula-based transport onto a joint normal.
//!
//! Purpose
//! -------
//! Map grid columns drawn under the independent product of marginals onto a
//! dependent multivariate normal `N(μ, Σ)`.
//!
//! Key behaviors
//! -------------
//! - Each input coordinate is sent to standard-normal space through its own
//!   marginal (`Marginal::to_standard_normal`), which is the forward
//!   Rosenblatt map of an independent product.
//! - The inverse Rosenblatt map of a Gaussian joint is `x = μ + L z` with
//!   `L` the lower Cholesky factor of `Σ`; sequential conditioning and the
//!   lower factor agree for normals.
//! - Columns are transformed independently and never mixed.
//!
//! Invariants & assumptions
//! ------------------------
//! - The joint dimension equals the number of marginals (checked by the
//!   resolver in [`super::Dependency::resolve`]).
//! - Marginal means agree with the joint mean within [`MEAN_TOL`]; the
//!   constructor rejects any disagreement.
use crate::{
    distributions::{JointNormal, Marginal, Vary},
    transforms::{
        CorrelationTransform, TransformStrategy,
        errors::{TransformError, TransformResult},
    },
};
use ndarray::{Array1, Array2, ArrayView2};

/// Relative tolerance for the marginal/joint mean agreement check.
pub const MEAN_TOL: f64 = 1e-9;

/// Rosenblatt — independent marginals → dependent joint normal.
#[derive(Debug, Clone)]
pub struct Rosenblatt {
    marginals: Vec<Marginal>,
    joint: JointNormal,
}

impl Rosenblatt {
    /// Pair the independent marginals of `vary` with the dependent `joint`.
    ///
    /// Errors
    /// ------
    /// - `TransformError::DimensionMismatch` if `joint.dim() != vary.len()`.
    /// - `TransformError::MissingMoment` if a marginal has no mean.
    /// - `TransformError::MeanMismatch` for the first parameter whose means
    ///   disagree.
    pub fn new(joint: JointNormal, vary: &Vary) -> TransformResult<Self> {
        if joint.dim() != vary.len() {
            return Err(TransformError::DimensionMismatch {
                expected: vary.len(),
                found: joint.dim(),
            });
        }
        let marginals: Vec<Marginal> = vary.marginals().copied().collect();
        for (index, (marginal, &dependent)) in marginals.iter().zip(joint.mean()).enumerate() {
            let independent = marginal
                .mean()
                .map_err(|_| TransformError::MissingMoment { index, moment: "mean" })?;
            let scale = dependent.abs().max(1.0);
            if (independent - dependent).abs() > MEAN_TOL * scale {
                return Err(TransformError::MeanMismatch { index, independent, dependent });
            }
        }
        Ok(Rosenblatt { marginals, joint })
    }

    pub fn joint(&self) -> &JointNormal {
        &self.joint
    }
}

impl CorrelationTransform for Rosenblatt {
    fn strategy(&self) -> TransformStrategy {
        TransformStrategy::Rosenblatt
    }

    fn transform(&self, nodes: ArrayView2<'_, f64>) -> TransformResult<Array2<f64>> {
        let (n_params, n_samples) = nodes.dim();
        if n_params != self.marginals.len() {
            return Err(TransformError::DimensionMismatch {
                expected: self.marginals.len(),
                found: n_params,
            });
        }
        let l = self.joint.cholesky_factor();
        let mu = self.joint.mean();
        let mut out = Array2::zeros((n_params, n_samples));
        for (sample, column) in nodes.columns().into_iter().enumerate() {
            let z: Array1<f64> = column
                .iter()
                .zip(&self.marginals)
                .map(|(&x, marginal)| marginal.to_standard_normal(x))
                .collect();
            let dependent = mu + &l.dot(&z);
            for (param, &value) in dependent.iter().enumerate() {
                if !value.is_finite() {
                    return Err(TransformError::NonFiniteNode { param, sample, value });
                }
            }
            out.column_mut(sample).assign(&dependent);
        }
        Ok(out)
    }
}
