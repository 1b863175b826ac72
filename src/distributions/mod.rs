//! distributions — probability descriptions of uncertain model inputs.
//!
//! Purpose
//! -------
//! Provide the distribution capability the sampler and correlation
//! transforms depend on: univariate marginals ([`Marginal`]), the ordered
//! set of varied inputs ([`Vary`]), and a multivariate normal description of
//! dependent inputs ([`JointNormal`]).
//!
//! Key behaviors
//! -------------
//! - Delegate univariate densities (mean, standard deviation, CDF, inverse
//!   CDF, support) to `statrs`.
//! - Validate joint normal descriptions and factor their covariance with
//!   `nalgebra`.
//! - Keep the input ordering explicit so grid rows and sample positions are
//!   deterministic.
//!
//! Conventions
//! -----------
//! - All values are `f64`; vectors and matrices are `ndarray` containers.
//! - Errors are reported as [`DistError`] or [`VaryError`]; nothing here
//!   logs or panics.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for construction and validation.

pub mod errors;
pub mod joint;
pub mod marginal;
pub mod vary;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{DistError, DistResult};
pub use self::joint::JointNormal;
pub use self::marginal::Marginal;
pub use self::vary::{Vary, VaryError};
