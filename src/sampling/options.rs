//! sampling::options — configuration for the finite-difference sampler.
//!
//! Purpose
//! -------
//! Collect the scalar knobs of [`FDSampler`](crate::sampling::FDSampler)
//! construction in one validated value: the perturbation size, the
//! relative/absolute mode switch, the fast-forward start count, and an
//! optional caller-supplied tracing span.
//!
//! Invariants & assumptions
//! ------------------------
//! - `perturbation` is finite and strictly positive.
//! - `start_count` may exceed the number of samples; the sampler then starts
//!   exhausted and logs a warning.
//!
//! Conventions
//! -----------
//! - Defaults follow [`FDOptions::default`]: `δ = 0.05`, absolute mode,
//!   start at sample 0, sampler-owned span.
use crate::sampling::errors::{SamplerError, SamplerResult};
use tracing::Span;

/// FDOptions — validated finite-difference sampler options.
///
/// Fields
/// ------
/// - `perturbation`: `f64`
///   Relative mode: absolute step `±δ`. Absolute mode: fraction of the mean,
///   giving `μ(1 ± δ)`.
/// - `relative_analysis`: `bool`
///   When `true`, base values are zero and outputs are read relative to the
///   nominal run.
/// - `start_count`: `usize`
///   Number of samples to replay (skip) at construction.
/// - `span`: `Option<Span>`
///   Span under which the sampler emits its events. When `None`, the sampler
///   opens its own `fd_sampler` span.
#[derive(Debug, Clone)]
pub struct FDOptions {
    perturbation: f64,
    relative_analysis: bool,
    start_count: usize,
    span: Option<Span>,
}

impl FDOptions {
    pub const DEFAULT_PERTURBATION: f64 = 0.05;

    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `SamplerError::InvalidPerturbation` if `perturbation` is not finite
    ///   or not strictly positive.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_uq::sampling::FDOptions;
    /// let opts = FDOptions::new(0.1, true, 0).unwrap();
    /// assert!(opts.relative_analysis());
    /// assert!(FDOptions::new(-0.1, false, 0).is_err());
    /// ```
    pub fn new(
        perturbation: f64, relative_analysis: bool, start_count: usize,
    ) -> SamplerResult<Self> {
        verify_perturbation(perturbation)?;
        Ok(FDOptions { perturbation, relative_analysis, start_count, span: None })
    }

    /// Replace the perturbation size.
    pub fn with_perturbation(mut self, perturbation: f64) -> SamplerResult<Self> {
        verify_perturbation(perturbation)?;
        self.perturbation = perturbation;
        Ok(self)
    }

    pub fn with_relative_analysis(mut self, relative_analysis: bool) -> Self {
        self.relative_analysis = relative_analysis;
        self
    }

    pub fn with_start_count(mut self, start_count: usize) -> Self {
        self.start_count = start_count;
        self
    }

    /// Emit the sampler's events under `span` instead of a fresh one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn perturbation(&self) -> f64 {
        self.perturbation
    }

    pub fn relative_analysis(&self) -> bool {
        self.relative_analysis
    }

    pub fn start_count(&self) -> usize {
        self.start_count
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }
}

impl Default for FDOptions {
    fn default() -> Self {
        FDOptions {
            perturbation: Self::DEFAULT_PERTURBATION,
            relative_analysis: false,
            start_count: 0,
            span: None,
        }
    }
}

fn verify_perturbation(value: f64) -> SamplerResult<()> {
    if !value.is_finite() {
        return Err(SamplerError::InvalidPerturbation { value, reason: "must be finite" });
    }
    if value <= 0.0 {
        return Err(SamplerError::InvalidPerturbation { value, reason: "must be positive" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults.
    fn default_matches_documented_values() {
        let opts = FDOptions::default();
        assert_eq!(opts.perturbation(), 0.05);
        assert!(!opts.relative_analysis());
        assert_eq!(opts.start_count(), 0);
        assert!(opts.span().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-positive and non-finite perturbations are rejected by both
    // the constructor and the builder setter.
    fn rejects_invalid_perturbations() {
        assert!(matches!(
            FDOptions::new(0.0, false, 0),
            Err(SamplerError::InvalidPerturbation { reason: "must be positive", .. })
        ));
        assert!(matches!(
            FDOptions::new(f64::NAN, false, 0),
            Err(SamplerError::InvalidPerturbation { reason: "must be finite", .. })
        ));
        assert!(FDOptions::default().with_perturbation(f64::INFINITY).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Builder setters preserve the other fields.
    fn builder_setters_compose() {
        let opts = FDOptions::default()
            .with_relative_analysis(true)
            .with_start_count(3)
            .with_perturbation(0.1)
            .unwrap();
        assert!(opts.relative_analysis());
        assert_eq!(opts.start_count(), 3);
        assert_eq!(opts.perturbation(), 0.1);
    }
}
