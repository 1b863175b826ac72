//! Public sampler interface shared by every sampling scheme.
//!
//! - [`Sampler`]: an iterator of [`Sample`]s with a fixed, known length.
//!
//! Convention: a sampler is pulled one sample at a time. Once `current_count()`
//! reaches `n_samples()` every further pull returns `None`.
use crate::sampling::sample::Sample;

/// Pull-based sampler contract.
///
/// Required:
/// - `name() -> &'static str`: identifier recorded with campaign metadata.
/// - `n_samples() -> usize`: total number of samples the sampler yields.
/// - `current_count() -> usize`: number of samples already yielded
///   (including any fast-forwarded at construction). Distinct from the
///   consuming `Iterator::count`.
///
/// Optional:
/// - `is_finite() -> bool`: `true` unless overridden; finite samplers can be
///   exhausted.
/// - `is_exhausted() -> bool`: whether the next pull returns `None`.
pub trait Sampler: Iterator<Item = Sample> {
    // Required methods
    fn name(&self) -> &'static str;
    fn n_samples(&self) -> usize;
    fn current_count(&self) -> usize;

    // Optional methods
    fn is_finite(&self) -> bool {
        true
    }

    fn is_exhausted(&self) -> bool {
        self.current_count() >= self.n_samples()
    }
}
