//! sampling::grid — the finite-difference node grid.
//!
//! Purpose
//! -------
//! Build and index the `P × N` grid of parameter values (`N = 2P + 1`) that
//! the FD sampler emits column by column.
//!
//! Layout
//! ------
//! - Column 0 is the nominal sample: every parameter at its base value.
//! - For parameter `p`, column `2p + 1` holds its positive and column
//!   `2p + 2` its negative perturbation.
//! - Every other entry of row `p` equals the base value of `p`.
//!
//! The analysis depends on this layout to locate each parameter's pair.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Number of FD samples for `n_params` parameters.
pub fn n_samples_for(n_params: usize) -> usize {
    2 * n_params + 1
}

/// Column index of parameter `p`'s positive perturbation.
pub fn positive_index(p: usize) -> usize {
    2 * p + 1
}

/// Column index of parameter `p`'s negative perturbation.
pub fn negative_index(p: usize) -> usize {
    2 * p + 2
}

/// NodeGrid — `P × N` parameter values, one column per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGrid {
    nodes: Array2<f64>,
}

impl NodeGrid {
    /// build — independent FD grid around `base`.
    ///
    /// Parameters
    /// ----------
    /// - `base`: base value of each parameter (zeros in relative mode).
    /// - `perturbation`: step size `δ`.
    /// - `relative`: when `true` the pair is `(+δ, −δ)`, otherwise
    ///   `(b(1 + δ), b(1 − δ))`.
    pub fn build(base: &Array1<f64>, perturbation: f64, relative: bool) -> Self {
        let n_params = base.len();
        let n_samples = n_samples_for(n_params);
        let mut nodes = Array2::from_shape_fn((n_params, n_samples), |(p, _)| base[p]);
        for (p, &b) in base.iter().enumerate() {
            let (pos, neg) = if relative {
                (perturbation, -perturbation)
            } else {
                ((1.0 + perturbation) * b, (1.0 - perturbation) * b)
            };
            nodes[[p, positive_index(p)]] = pos;
            nodes[[p, negative_index(p)]] = neg;
        }
        NodeGrid { nodes }
    }

    pub(crate) fn from_array(nodes: Array2<f64>) -> Self {
        NodeGrid { nodes }
    }

    pub fn n_params(&self) -> usize {
        self.nodes.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.nodes.ncols()
    }

    /// Value of parameter `param` in sample `sample`.
    pub fn value(&self, param: usize, sample: usize) -> f64 {
        self.nodes[[param, sample]]
    }

    /// All parameter values of one sample.
    pub fn column(&self, sample: usize) -> ArrayView1<'_, f64> {
        self.nodes.column(sample)
    }

    /// One parameter across all samples.
    pub fn row(&self, param: usize) -> ArrayView1<'_, f64> {
        self.nodes.row(param)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.nodes.view()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.nodes
    }
}
