//! analysis — sensitivity estimates from sampler runs.
//!
//! Purpose
//! -------
//! Consume the model outputs collected for each sample of an
//! [`FDSampler`](crate::sampling::FDSampler) and estimate first-order
//! finite-difference derivatives, exposing them through a results accessor.
//!
//! Key behaviors
//! -------------
//! - [`ResultsTable`]: QoI name → one output vector per sample.
//! - [`FDAnalysis`]: validates a table against the sampler's design and
//!   estimates derivatives in relative or absolute mode.
//! - [`FDAnalysisResults`]: name-checked access to derivatives, placeholder
//!   Sobol indices and statistics, `describe` and the surrogate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows of a QoI column follow the sampler's order: nominal first, then the
//!   `+`/`−` pair of each input.
//! - QoIs with a zero in their nominal output are logged and skipped.
//!
//! Testing notes
//! -------------
//! - Estimator tests use linear models, where centered differences are exact.

pub mod errors;
pub mod fd;
pub mod raw;
pub mod results;
pub mod table;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{AnalysisError, AnalysisResult};
pub use self::fd::{ELEMENT_NAME, FDAnalysis};
pub use self::raw::{AnalysisRawData, IndexTable, RawCategory, SurrogateFn};
pub use self::results::{FDAnalysisResults, Statistic, SurrogateOutput};
pub use self::table::ResultsTable;
