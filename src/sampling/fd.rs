//! sampling::fd — the finite-difference (one-at-a-time) sensitivity sampler.
//!
//! Purpose
//! -------
//! Produce `N = 2P + 1` parameter samples: one nominal sample with every
//! input at its base value, then for each input `p` a positively and a
//! negatively perturbed sample, all other inputs held at base. With a
//! [`Dependency`] the emitted samples are the correlation-transformed nodes.
//!
//! Key behaviors
//! -------------
//! - Build the complete design eagerly at construction into an immutable
//!   [`FDDesign`], shared by `Arc` with the matching
//!   [`FDAnalysis`](crate::analysis::FDAnalysis).
//! - Yield samples through [`Iterator`]; after `N` pulls every further pull
//!   returns `None`.
//! - Honor `start_count` by replaying that many pulls at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Absolute mode reads base values off the means of normal marginals and
//!   rejects any other family, as well as means too small to perturb.
//! - Relative mode uses base 0 for every input and accepts any marginal.
//! - The nominal column of the dependent grid equals the base vector.
//! - The independent grid is kept alongside the dependent one because the
//!   analysis divides by independent step sizes.
//!
//! Conventions
//! -----------
//! - Events are emitted under the sampler's span (`fd_sampler` unless one is
//!   supplied through [`FDOptions::with_span`]).
use crate::{
    analysis::{AnalysisResult, FDAnalysis},
    distributions::Vary,
    sampling::{
        errors::{SamplerError, SamplerResult},
        grid::{NodeGrid, negative_index, positive_index},
        options::FDOptions,
        sample::Sample,
        traits::Sampler,
    },
    transforms::{CorrelationTransform, Dependency, TransformStrategy},
};
use ndarray::{Array1, Array2, Axis};
use std::{iter::FusedIterator, sync::Arc};
use tracing::{Span, debug, error, info, info_span, trace, warn};

/// Identifier recorded with campaign metadata.
pub const SAMPLER_NAME: &str = "FD_sampler";

/// FDDesign — the immutable output of FD sampler construction.
///
/// Fields
/// ------
/// - `names`: parameter names in `vary` order (grid row order).
/// - `nodes`: independent `P × N` grid.
/// - `nodes_dep`: correlation-transformed grid, present iff a dependency was
///   configured.
/// - `strategy`: which transform produced `nodes_dep`.
/// - `perturbation`, `relative_analysis`: copied from [`FDOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct FDDesign {
    names: Arc<[String]>,
    nodes: NodeGrid,
    nodes_dep: Option<NodeGrid>,
    strategy: Option<TransformStrategy>,
    perturbation: f64,
    relative_analysis: bool,
}

impl FDDesign {
    fn build(vary: &Vary, dependency: &Dependency, options: &FDOptions) -> SamplerResult<Self> {
        let perturbation = options.perturbation();
        let relative_analysis = options.relative_analysis();

        let base = base_values(vary, relative_analysis)?;
        if relative_analysis {
            info!(perturbation, "relative perturbation of the nodes around base value 0");
        } else {
            info!(perturbation, "absolute perturbation of the nodes around the normal means");
        }
        let nodes = NodeGrid::build(&base, perturbation, relative_analysis);
        check_steps(vary, &nodes)?;

        let (nodes_dep, strategy) = match dependency.resolve(vary)? {
            None => (None, None),
            Some(transform) => {
                let dep = transform_nodes(transform.as_ref(), &nodes, vary, relative_analysis)?;
                info!(strategy = %transform.strategy(), "applied correlation transform to the nodes");
                (Some(NodeGrid::from_array(dep)), Some(transform.strategy()))
            }
        };
        debug!(n_params = nodes.n_params(), n_samples = nodes.n_samples(), "generated FD nodes");

        Ok(FDDesign {
            names: vary.names().map(String::from).collect::<Vec<_>>().into(),
            nodes,
            nodes_dep,
            strategy,
            perturbation,
            relative_analysis,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_params(&self) -> usize {
        self.nodes.n_params()
    }

    pub fn n_samples(&self) -> usize {
        self.nodes.n_samples()
    }

    /// Independent grid.
    pub fn nodes(&self) -> &NodeGrid {
        &self.nodes
    }

    /// Correlation-transformed grid, if a dependency was configured.
    pub fn dependent_nodes(&self) -> Option<&NodeGrid> {
        self.nodes_dep.as_ref()
    }

    /// The grid whose columns are emitted as samples.
    pub fn sample_nodes(&self) -> &NodeGrid {
        self.nodes_dep.as_ref().unwrap_or(&self.nodes)
    }

    pub fn strategy(&self) -> Option<TransformStrategy> {
        self.strategy
    }

    pub fn perturbation(&self) -> f64 {
        self.perturbation
    }

    pub fn relative_analysis(&self) -> bool {
        self.relative_analysis
    }
}

fn base_values(vary: &Vary, relative_analysis: bool) -> SamplerResult<Array1<f64>> {
    if relative_analysis {
        return Ok(Array1::zeros(vary.len()));
    }
    vary.iter()
        .enumerate()
        .map(|(index, (name, marginal))| {
            if !marginal.is_normal() {
                return Err(SamplerError::NonNormalMarginal {
                    name: name.to_string(),
                    family: marginal.family(),
                });
            }
            marginal.mean().map_err(|_| SamplerError::MissingMoment { index, moment: "mean" })
        })
        .collect::<SamplerResult<Vec<f64>>>()
        .map(Array1::from)
}

/// Every input must move away from its base value in both directions.
fn check_steps(vary: &Vary, nodes: &NodeGrid) -> SamplerResult<()> {
    for (p, name) in vary.names().enumerate() {
        let base = nodes.value(p, 0);
        if nodes.value(p, positive_index(p)) == base || nodes.value(p, negative_index(p)) == base {
            return Err(SamplerError::ZeroStep { name: name.to_string(), mean: base });
        }
    }
    Ok(())
}

/// Apply `transform` to the independent grid.
///
/// Relative grids hold deviations around 0, so they are shifted onto the
/// marginal means before the transform and back afterwards. The nominal
/// column stays the base vector under both strategies.
fn transform_nodes(
    transform: &dyn CorrelationTransform, nodes: &NodeGrid, vary: &Vary, relative_analysis: bool,
) -> SamplerResult<Array2<f64>> {
    if !relative_analysis {
        return Ok(transform.transform(nodes.view())?);
    }
    let means = vary
        .marginals()
        .enumerate()
        .map(|(index, marginal)| {
            marginal.mean().map_err(|_| SamplerError::MissingMoment { index, moment: "mean" })
        })
        .collect::<SamplerResult<Array1<f64>>>()?;
    let shift = means.view().insert_axis(Axis(1));
    let absolute = &nodes.view() + &shift;
    let dependent = transform.transform(absolute.view())?;
    Ok(dependent - &shift)
}

/// FDSampler — pull-based finite-difference sampler.
///
/// Examples
/// --------
/// ```rust
/// # use rust_uq::distributions::{Marginal, Vary};
/// # use rust_uq::sampling::{FDOptions, FDSampler, Sampler};
/// # use rust_uq::transforms::Dependency;
/// let vary = Vary::new([
///     ("x", Marginal::normal(10.0, 1.0).unwrap()),
///     ("y", Marginal::normal(5.0, 1.0).unwrap()),
/// ])
/// .unwrap();
/// let opts = FDOptions::new(0.1, false, 0).unwrap();
/// let sampler = FDSampler::new(vary, Dependency::Independent, opts).unwrap();
/// assert_eq!(sampler.n_samples(), 5);
/// let xs: Vec<f64> = sampler.map(|s| s.get("x").unwrap()).collect();
/// assert_eq!(xs.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct FDSampler {
    vary: Vary,
    design: Arc<FDDesign>,
    count: usize,
    span: Span,
}

impl FDSampler {
    /// Construct a sampler and eagerly build its design.
    ///
    /// Parameters
    /// ----------
    /// - `vary`: ordered uncertain inputs.
    /// - `dependency`: how the inputs depend on each other.
    /// - `options`: perturbation size, mode, start count and optional span.
    ///
    /// Errors
    /// ------
    /// - `SamplerError::NonNormalMarginal` in absolute mode for a non-normal
    ///   input.
    /// - Any dependency validation error (dimension, diagonal, symmetry,
    ///   definiteness, independent joint, mean mismatch).
    pub fn new(vary: Vary, dependency: Dependency, options: FDOptions) -> SamplerResult<Self> {
        let span = options.span().cloned().unwrap_or_else(|| {
            info_span!(
                "fd_sampler",
                n_params = vary.len(),
                relative = options.relative_analysis()
            )
        });
        let design = span.in_scope(|| {
            FDDesign::build(&vary, &dependency, &options)
                .inspect_err(|err| error!(error = %err, "rejected FD sampler configuration"))
        })?;

        let mut sampler = FDSampler { vary, design: Arc::new(design), count: 0, span };
        sampler.fast_forward(options.start_count());
        Ok(sampler)
    }

    /// Shorthand for a sampler over independent inputs.
    pub fn independent(vary: Vary, options: FDOptions) -> SamplerResult<Self> {
        Self::new(vary, Dependency::Independent, options)
    }

    fn fast_forward(&mut self, start_count: usize) {
        let n_samples = self.n_samples();
        if start_count > n_samples {
            warn!(
                parent: &self.span,
                start_count, n_samples, "start count exceeds the number of samples"
            );
        }
        self.by_ref().take(start_count).for_each(drop);
    }

    /// Build the analysis that consumes this sampler's runs.
    pub fn analysis<I, S>(&self, qoi_cols: I) -> AnalysisResult<FDAnalysis>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FDAnalysis::new(self, qoi_cols)
    }

    pub fn vary(&self) -> &Vary {
        &self.vary
    }

    pub fn design(&self) -> &Arc<FDDesign> {
        &self.design
    }

    pub fn nodes(&self) -> &NodeGrid {
        self.design.nodes()
    }

    pub fn dependent_nodes(&self) -> Option<&NodeGrid> {
        self.design.dependent_nodes()
    }

    pub fn is_dependent(&self) -> bool {
        self.design.dependent_nodes().is_some()
    }

    pub fn strategy(&self) -> Option<TransformStrategy> {
        self.design.strategy()
    }

    pub fn perturbation(&self) -> f64 {
        self.design.perturbation()
    }

    pub fn relative_analysis(&self) -> bool {
        self.design.relative_analysis()
    }

    pub fn parameter_names(&self) -> &[String] {
        self.design.names()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Iterator for FDSampler {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let grid = self.design.sample_nodes();
        if self.count >= grid.n_samples() {
            return None;
        }
        let sample = Sample::new(Arc::clone(&self.design.names), grid.column(self.count).to_owned());
        self.count += 1;
        trace!(parent: &self.span, count = self.count, "drew FD sample");
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_samples().saturating_sub(self.count);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FDSampler {}

impl FusedIterator for FDSampler {}

impl Sampler for FDSampler {
    fn name(&self) -> &'static str {
        SAMPLER_NAME
    }

    fn n_samples(&self) -> usize {
        self.design.n_samples()
    }

    fn current_count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{JointNormal, Marginal};
    use ndarray::array;

    fn vary_xy() -> Vary {
        Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("y", Marginal::normal(5.0, 1.0).unwrap()),
        ])
        .unwrap()
    }

    fn xy(sample: &Sample) -> (f64, f64) {
        (sample.get("x").unwrap(), sample.get("y").unwrap())
    }

    fn assert_samples(actual: &[Sample], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (s, &(ex, ey)) in actual.iter().zip(expected) {
            let (x, y) = xy(s);
            assert!((x - ex).abs() < 1e-12, "x = {x}, expected {ex}");
            assert!((y - ey).abs() < 1e-12, "y = {y}, expected {ey}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the absolute-mode sample sequence on two normal inputs.
    //
    // Given
    // -----
    // - x ~ N(10, 1), y ~ N(5, 1), δ = 0.1, absolute mode.
    //
    // Expect
    // ------
    // - (10,5), (11,5), (9,5), (10,5.5), (10,4.5), then exhaustion.
    fn absolute_mode_yields_documented_sequence() {
        let mut sampler = FDSampler::independent(
            vary_xy(),
            FDOptions::new(0.1, false, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(sampler.n_samples(), 5);
        assert_eq!(sampler.name(), "FD_sampler");
        assert!(sampler.is_finite());

        let samples: Vec<Sample> = sampler.by_ref().collect();
        assert_samples(
            &samples,
            &[(10.0, 5.0), (11.0, 5.0), (9.0, 5.0), (10.0, 5.5), (10.0, 4.5)],
        );
        assert_eq!(sampler.current_count(), 5);
        assert!(sampler.is_exhausted());
        assert!(sampler.next().is_none());
        assert!(sampler.next().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify the relative-mode sequence uses a zero base and exact steps.
    fn relative_mode_yields_documented_sequence() {
        let sampler =
            FDSampler::independent(vary_xy(), FDOptions::new(0.05, true, 0).unwrap()).unwrap();
        let samples: Vec<Sample> = sampler.collect();
        assert_samples(
            &samples,
            &[(0.0, 0.0), (0.05, 0.0), (-0.05, 0.0), (0.0, 0.05), (0.0, -0.05)],
        );
    }

    #[test]
    // Purpose
    // -------
    // A start count replays pulls, so the sampler continues where a fresh
    // sampler would be after that many samples.
    fn start_count_fast_forwards() {
        let fresh: Vec<Sample> =
            FDSampler::independent(vary_xy(), FDOptions::default()).unwrap().collect();
        let resumed =
            FDSampler::independent(vary_xy(), FDOptions::default().with_start_count(2)).unwrap();

        assert_eq!(resumed.current_count(), 2);
        assert_eq!(resumed.len(), 3);
        let rest: Vec<Sample> = resumed.collect();
        assert_eq!(rest, fresh[2..].to_vec());
    }

    #[test]
    // Purpose
    // -------
    // A start count beyond N leaves the sampler exhausted without error.
    fn start_count_beyond_n_starts_exhausted() {
        let mut sampler =
            FDSampler::independent(vary_xy(), FDOptions::default().with_start_count(9)).unwrap();
        assert_eq!(sampler.current_count(), 5);
        assert!(sampler.next().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Absolute mode requires normal marginals; relative mode does not.
    fn non_normal_marginal_requires_relative_mode() {
        let vary = Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("u", Marginal::uniform(0.0, 1.0).unwrap()),
        ])
        .unwrap();

        let err = FDSampler::independent(vary.clone(), FDOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SamplerError::NonNormalMarginal { name: "u".to_string(), family: "uniform" }
        );

        let relative =
            FDSampler::independent(vary, FDOptions::default().with_relative_analysis(true));
        assert!(relative.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A zero mean gives no absolute step, so it is rejected before any run is
    // emitted; relative mode accepts it. Subnormal means round to the same
    // outcome.
    fn zero_mean_requires_relative_mode() {
        let vary = Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("z", Marginal::normal(0.0, 1.0).unwrap()),
        ])
        .unwrap();

        let err = FDSampler::independent(vary.clone(), FDOptions::default()).unwrap_err();
        assert_eq!(err, SamplerError::ZeroStep { name: "z".to_string(), mean: 0.0 });

        let tiny = Vary::new([("t", Marginal::normal(f64::from_bits(1), 1.0).unwrap())]).unwrap();
        let err = FDSampler::independent(tiny, FDOptions::default()).unwrap_err();
        assert!(matches!(err, SamplerError::ZeroStep { .. }));

        let relative =
            FDSampler::independent(vary, FDOptions::default().with_relative_analysis(true));
        assert!(relative.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // With a correlation matrix the emitted samples are the transformed
    // nodes, while the independent grid is kept unchanged.
    //
    // Given
    // -----
    // - x ~ N(10, 1), y ~ N(5, 2), ρ = 0.5, δ = 0.1.
    //
    // Expect
    // ------
    // - Nominal sample unchanged; moving x by +1 moves y by ρ·σ_y = 1.
    fn correlation_dependency_moves_correlated_inputs() {
        let vary = Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("y", Marginal::normal(5.0, 2.0).unwrap()),
        ])
        .unwrap();
        let corr = array![[1.0, 0.5], [0.5, 1.0]];
        let sampler = FDSampler::new(
            vary,
            Dependency::Correlation(corr),
            FDOptions::new(0.1, false, 0).unwrap(),
        )
        .unwrap();

        assert!(sampler.is_dependent());
        assert_eq!(sampler.strategy(), Some(TransformStrategy::Cholesky));
        assert!((sampler.nodes().value(1, 1) - 5.0).abs() < 1e-12);

        let samples: Vec<Sample> = sampler.collect();
        assert_eq!(xy(&samples[0]), (10.0, 5.0));
        let (x, y) = xy(&samples[1]);
        assert!((x - 11.0).abs() < 1e-12);
        assert!((y - 6.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Joint dependencies are validated at construction.
    fn joint_dependency_is_validated() {
        let independent =
            JointNormal::new(array![10.0, 5.0], array![[1.0, 0.0], [0.0, 1.0]]).unwrap();
        let err = FDSampler::new(vary_xy(), Dependency::Joint(independent), FDOptions::default())
            .unwrap_err();
        assert_eq!(err, SamplerError::IndependentJointDistribution);

        let wrong_dim = JointNormal::new(array![10.0], array![[1.0]]).unwrap();
        let err = FDSampler::new(vary_xy(), Dependency::Joint(wrong_dim), FDOptions::default())
            .unwrap_err();
        assert_eq!(err, SamplerError::DependencyDimensionMismatch { expected: 2, found: 1 });

        let dependent =
            JointNormal::new(array![10.0, 5.0], array![[1.0, 0.3], [0.3, 1.0]]).unwrap();
        let sampler =
            FDSampler::new(vary_xy(), Dependency::Joint(dependent), FDOptions::default()).unwrap();
        assert_eq!(sampler.strategy(), Some(TransformStrategy::Rosenblatt));
    }

    #[test]
    // Purpose
    // -------
    // Both strategies keep the nominal sample at the base vector, in absolute
    // and in relative mode.
    //
    // Given
    // -----
    // - x ~ N(10, 1), y ~ N(5, 1), joint or correlation with ρ = 0.3, δ = 0.05.
    //
    // Expect
    // ------
    // - Dependent column 0 is (10, 5) in absolute mode and (0, 0) in relative
    //   mode.
    // - In relative mode a +δ step in x drags y by ρ·δ.
    fn dependent_nominal_column_is_the_base_vector() {
        let joint = JointNormal::new(array![10.0, 5.0], array![[1.0, 0.3], [0.3, 1.0]]).unwrap();
        let corr = array![[1.0, 0.3], [0.3, 1.0]];

        for dependency in [Dependency::Joint(joint), Dependency::Correlation(corr)] {
            for (relative, base) in [(false, [10.0, 5.0]), (true, [0.0, 0.0])] {
                let sampler = FDSampler::new(
                    vary_xy(),
                    dependency.clone(),
                    FDOptions::new(0.05, relative, 0).unwrap(),
                )
                .unwrap();
                let dep = sampler.dependent_nodes().unwrap();
                for (param, expected) in base.iter().enumerate() {
                    assert!(
                        (dep.value(param, 0) - expected).abs() < 1e-9,
                        "{:?} relative={relative} param {param}: {}",
                        sampler.strategy(),
                        dep.value(param, 0)
                    );
                }
                if relative {
                    assert!((dep.value(0, 1) - 0.05).abs() < 1e-9);
                    assert!((dep.value(1, 1) - 0.3 * 0.05).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A caller-supplied span replaces the sampler's own without changing the
    // sample sequence.
    fn caller_span_does_not_change_samples() {
        let span = info_span!("campaign", id = 7);
        let with_span: Vec<Sample> =
            FDSampler::independent(vary_xy(), FDOptions::default().with_span(span))
                .unwrap()
                .collect();
        let plain: Vec<Sample> =
            FDSampler::independent(vary_xy(), FDOptions::default()).unwrap().collect();
        assert_eq!(with_span, plain);
    }
}
