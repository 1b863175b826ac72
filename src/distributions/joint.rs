//! distributions::joint — multivariate normal description of dependent inputs.
//!
//! Purpose
//! -------
//! Describe a stochastically dependent set of inputs as a multivariate normal
//! `N(μ, Σ)` and expose what the Rosenblatt transform needs: the mean, the
//! covariance, a dependence test, and the lower Cholesky factor `L` with
//! `L Lᵀ = Σ`.
//!
//! Key behaviors
//! -------------
//! - Validate shape, finiteness, symmetry and positive definiteness once at
//!   construction; the factor is computed then and cached.
//! - Bridge `ndarray` storage and `nalgebra` factorization via
//!   [`to_dmatrix`] / [`from_dmatrix`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `mean.len() == d ≥ 1`, `covariance` is `d × d`, symmetric within
//!   [`SYMMETRY_TOL`] (relative), and positive definite.
//! - `cholesky` is lower triangular.
use crate::distributions::errors::{DistError, DistResult};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Relative tolerance for symmetry checks on covariance/correlation input.
pub const SYMMETRY_TOL: f64 = 1e-12;

/// JointNormal — validated multivariate normal `N(μ, Σ)`.
///
/// Fields
/// ------
/// - `mean`: `Array1<f64>` of length `d`.
/// - `covariance`: `Array2<f64>`, `d × d`, symmetric positive definite.
/// - `cholesky`: cached lower-triangular factor of `covariance`.
#[derive(Debug, Clone, PartialEq)]
pub struct JointNormal {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    cholesky: Array2<f64>,
}

impl JointNormal {
    /// Construct from a mean vector and a covariance matrix.
    ///
    /// Errors
    /// ------
    /// - `DistError::EmptyMean` for an empty mean.
    /// - `DistError::CovarianceShape` when `Σ` is not `d × d`.
    /// - `DistError::NonFiniteCovariance` for NaN/±∞ in `μ` or `Σ`
    ///   (mean entries are reported on row `d`).
    /// - `DistError::AsymmetricCovariance`, `DistError::NotPositiveDefinite`.
    pub fn new(mean: Array1<f64>, covariance: Array2<f64>) -> DistResult<Self> {
        let d = mean.len();
        if d == 0 {
            return Err(DistError::EmptyMean);
        }
        if covariance.dim() != (d, d) {
            return Err(DistError::CovarianceShape { expected: d, found: covariance.dim() });
        }
        if let Some((col, &value)) = mean.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DistError::NonFiniteCovariance { row: d, col, value });
        }
        check_symmetric_finite(&covariance)?;
        let cholesky = lower_cholesky(&covariance)?;
        Ok(JointNormal { mean, covariance, cholesky })
    }

    /// Construct from means, standard deviations and a correlation matrix,
    /// using `Σ = D R D` with `D = diag(std)`.
    pub fn from_correlation(
        mean: Array1<f64>, std: Array1<f64>, correlation: &Array2<f64>,
    ) -> DistResult<Self> {
        let d = mean.len();
        if std.len() != d {
            return Err(DistError::StdLengthMismatch { expected: d, actual: std.len() });
        }
        if correlation.dim() != (d, d) {
            return Err(DistError::CovarianceShape { expected: d, found: correlation.dim() });
        }
        let covariance = Array2::from_shape_fn((d, d), |(i, j)| std[i] * correlation[[i, j]] * std[j]);
        JointNormal::new(mean, covariance)
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    /// Lower-triangular `L` with `L Lᵀ = Σ`.
    pub fn cholesky_factor(&self) -> &Array2<f64> {
        &self.cholesky
    }

    /// `true` when any off-diagonal covariance entry is non-zero.
    pub fn is_stochastically_dependent(&self) -> bool {
        self.covariance.indexed_iter().any(|((i, j), &c)| i != j && c != 0.0)
    }
}

/// Validate that `m` is square, finite and symmetric within [`SYMMETRY_TOL`].
pub(crate) fn check_symmetric_finite(m: &Array2<f64>) -> DistResult<()> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(DistError::CovarianceShape { expected: rows, found: (rows, cols) });
    }
    for ((row, col), &value) in m.indexed_iter() {
        if !value.is_finite() {
            return Err(DistError::NonFiniteCovariance { row, col, value });
        }
    }
    for i in 0..rows {
        for j in 0..i {
            let (a, b) = (m[[i, j]], m[[j, i]]);
            let scale = a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > SYMMETRY_TOL * scale {
                return Err(DistError::AsymmetricCovariance { row: i, col: j });
            }
        }
    }
    Ok(())
}

/// Lower Cholesky factor of a symmetric positive-definite matrix.
pub(crate) fn lower_cholesky(m: &Array2<f64>) -> DistResult<Array2<f64>> {
    let chol = to_dmatrix(m).cholesky().ok_or(DistError::NotPositiveDefinite)?;
    Ok(from_dmatrix(&chol.l()))
}

/// Copy an `ndarray` matrix into a `nalgebra::DMatrix`.
pub(crate) fn to_dmatrix(m: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.dim();
    DMatrix::from_fn(rows, cols, |i, j| m[[i, j]])
}

/// Copy a `nalgebra::DMatrix` into an `ndarray` matrix.
pub(crate) fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
