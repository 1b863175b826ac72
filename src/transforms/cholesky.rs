//! transforms::cholesky — linear transport through a correlation matrix.
//!
//! Given a correlation matrix `R = L Lᵀ` and marginal standard deviations
//! `D = diag(σ)`, each grid column `x` is mapped around the nominal column
//! `b` as
//!
//! ```text
//! x' = b + D L D⁻¹ (x − b)
//! ```
//!
//! so an independent step of one standard deviation in parameter `p` moves
//! every other parameter `q` by `ρ_qp · σ_q`. The nominal column is a fixed
//! point.
use crate::{
    distributions::{
        Vary,
        joint::{check_symmetric_finite, lower_cholesky},
    },
    transforms::{
        CorrelationTransform, TransformStrategy,
        errors::{TransformError, TransformResult},
    },
};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Cholesky — linear correlation transform.
#[derive(Debug, Clone)]
pub struct Cholesky {
    factor: Array2<f64>,
    std_devs: Array1<f64>,
}

impl Cholesky {
    /// Validate `correlation` against `vary` and factor it.
    ///
    /// Errors
    /// ------
    /// - `TransformError::NotSquare`, `TransformError::DimensionMismatch`
    ///   for shape problems.
    /// - `TransformError::NonUnitDiagonal` if any `R[i, i] != 1`.
    /// - `TransformError::NonFiniteEntry`, `TransformError::AsymmetricMatrix`,
    ///   `TransformError::NotPositiveDefinite` from validation/factorization.
    /// - `TransformError::MissingMoment` if a marginal has no standard
    ///   deviation.
    pub fn new(correlation: &Array2<f64>, vary: &Vary) -> TransformResult<Self> {
        let (rows, cols) = correlation.dim();
        if rows != cols {
            return Err(TransformError::NotSquare { found: (rows, cols) });
        }
        if rows != vary.len() {
            return Err(TransformError::DimensionMismatch { expected: vary.len(), found: rows });
        }
        if let Some((index, &value)) =
            correlation.diag().iter().enumerate().find(|&(_, &v)| v != 1.0)
        {
            return Err(TransformError::NonUnitDiagonal { index, value });
        }
        check_symmetric_finite(correlation)?;
        let factor = lower_cholesky(correlation)?;
        let std_devs = vary
            .marginals()
            .enumerate()
            .map(|(index, m)| {
                m.std_dev()
                    .map_err(|_| TransformError::MissingMoment { index, moment: "standard deviation" })
            })
            .collect::<TransformResult<Array1<f64>>>()?;
        Ok(Cholesky { factor, std_devs })
    }

    /// Lower-triangular factor of the correlation matrix.
    pub fn factor(&self) -> &Array2<f64> {
        &self.factor
    }
}

impl CorrelationTransform for Cholesky {
    fn strategy(&self) -> TransformStrategy {
        TransformStrategy::Cholesky
    }

    fn transform(&self, nodes: ArrayView2<'_, f64>) -> TransformResult<Array2<f64>> {
        let (n_params, n_samples) = nodes.dim();
        if n_params != self.std_devs.len() {
            return Err(TransformError::DimensionMismatch {
                expected: self.std_devs.len(),
                found: n_params,
            });
        }
        let base = nodes.column(0).to_owned();
        let standardized = (&nodes - &base.view().insert_axis(Axis(1)))
            / &self.std_devs.view().insert_axis(Axis(1));
        let correlated = self.factor.dot(&standardized);
        let out = &correlated * &self.std_devs.view().insert_axis(Axis(1))
            + &base.view().insert_axis(Axis(1));

        for ((param, sample), &value) in out.indexed_iter() {
            if !value.is_finite() {
                return Err(TransformError::NonFiniteNode { param, sample, value });
            }
        }
        debug_assert_eq!(out.dim(), (n_params, n_samples));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::Marginal;
    use ndarray::array;

    fn vary_xy() -> Vary {
        Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("y", Marginal::normal(5.0, 2.0).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that the nominal column is fixed and that a one-σ step in x
    // drags y by ρ·σ_y while a step in y leaves x untouched (lower factor).
    fn induces_correlated_movement() {
        let corr = array![[1.0, 0.6], [0.6, 1.0]];
        let chol = Cholesky::new(&corr, &vary_xy()).unwrap();
        let nodes = array![[10.0, 11.0, 10.0], [5.0, 5.0, 7.0]];

        let out = chol.transform(nodes.view()).unwrap();

        assert!((out[[0, 0]] - 10.0).abs() < 1e-12);
        assert!((out[[1, 0]] - 5.0).abs() < 1e-12);
        assert!((out[[0, 1]] - 11.0).abs() < 1e-12);
        assert!((out[[1, 1]] - 6.2).abs() < 1e-12);
        assert!((out[[0, 2]] - 10.0).abs() < 1e-12);
        assert!((out[[1, 2]] - 6.6).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed correlation matrices are rejected before factoring.
    fn rejects_malformed_correlations() {
        let vary = vary_xy();
        assert_eq!(
            Cholesky::new(&array![[1.0, 0.2, 0.0], [0.2, 1.0, 0.0]], &vary).unwrap_err(),
            TransformError::NotSquare { found: (2, 3) }
        );
        assert_eq!(
            Cholesky::new(&array![[1.0]], &vary).unwrap_err(),
            TransformError::DimensionMismatch { expected: 2, found: 1 }
        );
        assert_eq!(
            Cholesky::new(&array![[1.0, 0.2], [0.2, 2.0]], &vary).unwrap_err(),
            TransformError::NonUnitDiagonal { index: 1, value: 2.0 }
        );
        assert_eq!(
            Cholesky::new(&array![[1.0, 0.2], [0.3, 1.0]], &vary).unwrap_err(),
            TransformError::AsymmetricMatrix { row: 1, col: 0 }
        );
        assert_eq!(
            Cholesky::new(&array![[1.0, 1.5], [1.5, 1.0]], &vary).unwrap_err(),
            TransformError::NotPositiveDefinite
        );
    }
}
