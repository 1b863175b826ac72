//! sampling — finite-difference sample generation.
//!
//! Purpose
//! -------
//! Generate the one-at-a-time perturbation design for a set of uncertain
//! inputs and hand it out as a pull-based stream of parameter records.
//!
//! Key behaviors
//! -------------
//! - [`FDSampler`] builds the `P × N` node grid (`N = 2P + 1`) eagerly and
//!   implements [`Iterator`] and [`Sampler`].
//! - [`FDOptions`] validates perturbation size and selects relative or
//!   absolute mode.
//! - [`NodeGrid`] fixes the column layout (nominal first, then `+`/`−` per
//!   parameter) that [`analysis`](crate::analysis) relies on.
//!
//! Invariants & assumptions
//! ------------------------
//! - Construction either fails with a [`SamplerError`] or yields a complete,
//!   immutable [`FDDesign`].
//! - Pulling past the last sample returns `None` forever.
//!
//! Conventions
//! -----------
//! - Input order is the order of the [`Vary`](crate::distributions::Vary)
//!   passed at construction.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/` covers the full
//!   sampler → analysis round trip.

pub mod errors;
pub mod fd;
pub mod grid;
pub mod options;
pub mod sample;
pub mod traits;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{SamplerError, SamplerResult};
pub use self::fd::{FDDesign, FDSampler, SAMPLER_NAME};
pub use self::grid::NodeGrid;
pub use self::options::FDOptions;
pub use self::sample::Sample;
pub use self::traits::Sampler;

/// Convenience prelude for building and driving an FD sampler.
pub mod prelude {
    pub use super::{FDOptions, FDSampler, Sample, Sampler, SamplerError, SamplerResult};
    pub use crate::distributions::{JointNormal, Marginal, Vary};
    pub use crate::transforms::Dependency;
}
