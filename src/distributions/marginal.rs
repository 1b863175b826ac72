//! distributions::marginal — univariate input distributions.
//!
//! Purpose
//! -------
//! Wrap the `statrs` univariate families used to describe uncertain inputs
//! behind one tagged union, [`Marginal`], exposing exactly the capabilities
//! the sampler and the correlation transforms need: moments, CDF, inverse
//! CDF, support, and a map into standard-normal space.
//!
//! Key behaviors
//! -------------
//! - Validate family parameters through the `statrs` constructors and
//!   surface failures as [`DistError`].
//! - Report whether a marginal is normal-family, which the absolute-mode
//!   sampler requires to read its base value off the mean.
//! - Map a value into standard-normal space exactly for normals and through
//!   `Φ⁻¹(F(x))` for every other family.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every constructed [`Marginal`] has finite mean and standard deviation.
//! - `inverse_cdf` expects `p ∈ [0, 1]`; values outside follow `statrs`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover constructor validation, moments, support bounds, and
//!   agreement of `to_standard_normal` between the exact and CDF paths.
use crate::distributions::errors::{DistError, DistResult};
use statrs::{
    distribution::{ContinuousCDF, LogNormal, Normal, Triangular, Uniform},
    statistics::{Distribution, Max, Min},
};

/// Marginal — a univariate distribution for one uncertain input.
///
/// Variants
/// --------
/// - `Normal`: Gaussian with mean and standard deviation.
/// - `Uniform`: flat on `[lower, upper]`.
/// - `LogNormal`: `exp` of a Gaussian with location and scale.
/// - `Triangular`: on `[min, max]` with the given mode.
///
/// Notes
/// -----
/// - Construct through the named constructors so that parameters are
///   validated once; the variants hold already-validated `statrs` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marginal {
    Normal(Normal),
    Uniform(Uniform),
    LogNormal(LogNormal),
    Triangular(Triangular),
}

impl Marginal {
    /// Normal distribution with the given mean and standard deviation.
    ///
    /// Errors
    /// ------
    /// - `DistError::InvalidParameter` when `mean` is NaN or `std_dev` is not
    ///   finite and positive.
    pub fn normal(mean: f64, std_dev: f64) -> DistResult<Self> {
        Ok(Marginal::Normal(Normal::new(mean, std_dev)?))
    }

    /// Uniform distribution on `[lower, upper]`.
    pub fn uniform(lower: f64, upper: f64) -> DistResult<Self> {
        Ok(Marginal::Uniform(Uniform::new(lower, upper)?))
    }

    /// Log-normal distribution with the given location and scale.
    pub fn lognormal(location: f64, scale: f64) -> DistResult<Self> {
        Ok(Marginal::LogNormal(LogNormal::new(location, scale)?))
    }

    /// Triangular distribution on `[min, max]` peaking at `mode`.
    pub fn triangular(min: f64, max: f64, mode: f64) -> DistResult<Self> {
        Ok(Marginal::Triangular(Triangular::new(min, max, mode)?))
    }

    /// Family name used in diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            Marginal::Normal(_) => "normal",
            Marginal::Uniform(_) => "uniform",
            Marginal::LogNormal(_) => "lognormal",
            Marginal::Triangular(_) => "triangular",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Marginal::Normal(_))
    }

    /// Mean of the distribution.
    ///
    /// Errors
    /// ------
    /// - `DistError::MissingMoment` if the backend reports no mean.
    pub fn mean(&self) -> DistResult<f64> {
        let mean = match self {
            Marginal::Normal(d) => d.mean(),
            Marginal::Uniform(d) => d.mean(),
            Marginal::LogNormal(d) => d.mean(),
            Marginal::Triangular(d) => d.mean(),
        };
        mean.ok_or(DistError::MissingMoment { family: self.family(), moment: "mean" })
    }

    /// Standard deviation of the distribution.
    pub fn std_dev(&self) -> DistResult<f64> {
        let std_dev = match self {
            Marginal::Normal(d) => d.std_dev(),
            Marginal::Uniform(d) => d.std_dev(),
            Marginal::LogNormal(d) => d.std_dev(),
            Marginal::Triangular(d) => d.std_dev(),
        };
        std_dev.ok_or(DistError::MissingMoment {
            family: self.family(),
            moment: "standard deviation",
        })
    }

    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            Marginal::Normal(d) => d.cdf(x),
            Marginal::Uniform(d) => d.cdf(x),
            Marginal::LogNormal(d) => d.cdf(x),
            Marginal::Triangular(d) => d.cdf(x),
        }
    }

    pub fn inverse_cdf(&self, p: f64) -> f64 {
        match self {
            Marginal::Normal(d) => d.inverse_cdf(p),
            Marginal::Uniform(d) => d.inverse_cdf(p),
            Marginal::LogNormal(d) => d.inverse_cdf(p),
            Marginal::Triangular(d) => d.inverse_cdf(p),
        }
    }

    /// Lower and upper bounds of the support (may be infinite).
    pub fn support(&self) -> (f64, f64) {
        match self {
            Marginal::Normal(d) => (d.min(), d.max()),
            Marginal::Uniform(d) => (d.min(), d.max()),
            Marginal::LogNormal(d) => (d.min(), d.max()),
            Marginal::Triangular(d) => (d.min(), d.max()),
        }
    }

    /// to_standard_normal — map `x` into standard-normal space.
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   `(x − μ)/σ` for normals; `Φ⁻¹(F(x))` for other families, where
    ///   values outside the support map to `±∞`.
    pub fn to_standard_normal(&self, x: f64) -> f64 {
        match self {
            Marginal::Normal(d) => match (d.mean(), d.std_dev()) {
                (Some(mu), Some(sigma)) => (x - mu) / sigma,
                _ => f64::NAN,
            },
            _ => Normal::standard().inverse_cdf(self.cdf(x)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation for each family.
    // - Moments and support reported through the tagged union.
    // - The standard-normal map on both the exact and CDF paths.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a normal marginal reports its parameters as moments and
    // an unbounded support.
    fn normal_reports_mean_std_and_unbounded_support() {
        // Arrange
        let m = Marginal::normal(10.0, 2.0).expect("valid normal");

        // Act / Assert
        assert!(m.is_normal());
        assert_eq!(m.family(), "normal");
        assert!((m.mean().unwrap() - 10.0).abs() < 1e-12);
        assert!((m.std_dev().unwrap() - 2.0).abs() < 1e-12);
        let (lo, hi) = m.support();
        assert!(lo.is_infinite() && lo < 0.0);
        assert!(hi.is_infinite() && hi > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid parameters are rejected for every supported family.
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            Marginal::normal(0.0, 0.0),
            Err(DistError::InvalidParameter { family: "normal", .. })
        ));
        assert!(matches!(
            Marginal::uniform(1.0, 0.0),
            Err(DistError::InvalidParameter { family: "uniform", .. })
        ));
        assert!(matches!(
            Marginal::lognormal(0.0, -1.0),
            Err(DistError::InvalidParameter { family: "lognormal", .. })
        ));
        assert!(matches!(
            Marginal::triangular(0.0, 1.0, 2.0),
            Err(DistError::InvalidParameter { family: "triangular", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check that the uniform marginal exposes its bounds as support and its
    // midpoint as mean.
    fn uniform_support_and_mean() {
        let m = Marginal::uniform(2.0, 4.0).unwrap();
        assert!(!m.is_normal());
        assert_eq!(m.support(), (2.0, 4.0));
        assert!((m.mean().unwrap() - 3.0).abs() < 1e-12);
        assert!((m.cdf(3.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the exact normal path of `to_standard_normal` and its agreement
    // with the generic CDF path away from the tails.
    //
    // Given
    // -----
    // - N(10, 2) evaluated at 11.
    //
    // Expect
    // ------
    // - Exact path gives 0.5.
    // - Φ⁻¹(F(11)) agrees to within 1e-8.
    fn to_standard_normal_matches_cdf_path() {
        let m = Marginal::normal(10.0, 2.0).unwrap();
        let exact = m.to_standard_normal(11.0);
        let via_cdf = Normal::standard().inverse_cdf(m.cdf(11.0));
        assert!((exact - 0.5).abs() < 1e-12);
        assert!((exact - via_cdf).abs() < 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the uniform median maps to the standard-normal origin.
    fn uniform_median_maps_to_zero() {
        let m = Marginal::uniform(-1.0, 1.0).unwrap();
        assert!(m.to_standard_normal(0.0).abs() < 1e-8);
    }
}
