//! analysis::fd — first-order sensitivities from FD sampler runs.
//!
//! Purpose
//! -------
//! Turn the outputs of the `2P + 1` runs of an [`FDSampler`] into centered
//! finite-difference derivatives of every requested QoI with respect to
//! every input.
//!
//! Key behaviors
//! -------------
//! - Validate the results table against the sampler's design (row count per
//!   QoI, uniform output length).
//! - Skip, with a warning, any QoI whose nominal output contains a zero.
//! - Estimate, per input `p`, from the independent grid steps
//!   `d₊ = x₊ − x₀`, `d₋ = x₋ − x₀`:
//!   - relative: `½(y₊/y₀ − 1)/d₊ + ½(y₋/y₀ − 1)/d₋`,
//!   - absolute: `½(y₊ − y₀)/d₊ + ½(y₋ − y₀)/d₋`.
//! - Fill every other raw-data category with zero placeholders.
//!
//! Invariants & assumptions
//! ------------------------
//! - Steps are always read off the independent grid, also when the sampler
//!   emitted correlation-transformed samples.
//! - In relative mode the grid must hold exactly `0`, `+δ`, `−δ` at the
//!   nominal and pair positions; anything else aborts the call.
use crate::{
    analysis::{
        errors::{AnalysisError, AnalysisResult},
        raw::AnalysisRawData,
        results::FDAnalysisResults,
        table::ResultsTable,
    },
    sampling::{
        FDDesign, FDSampler,
        grid::{negative_index, positive_index},
    },
};
use ndarray::Array1;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{Span, debug, info, info_span, warn};

pub const ELEMENT_NAME: &str = "FD_Analysis";

/// FDAnalysis — analysis element paired with one [`FDSampler`].
#[derive(Debug, Clone)]
pub struct FDAnalysis {
    design: Arc<FDDesign>,
    qoi_cols: Vec<String>,
    span: Span,
}

impl FDAnalysis {
    /// Pair an analysis with `sampler` for the given QoIs.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::EmptyQoiList` if `qoi_cols` is empty.
    pub fn new<I, S>(sampler: &FDSampler, qoi_cols: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let qoi_cols: Vec<String> = qoi_cols.into_iter().map(Into::into).collect();
        if qoi_cols.is_empty() {
            return Err(AnalysisError::EmptyQoiList);
        }
        let span = info_span!(parent: sampler.span(), "fd_analysis", n_qois = qoi_cols.len());
        Ok(FDAnalysis { design: Arc::clone(sampler.design()), qoi_cols, span })
    }

    pub fn element_name(&self) -> &'static str {
        ELEMENT_NAME
    }

    pub fn element_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn qoi_cols(&self) -> &[String] {
        &self.qoi_cols
    }

    pub fn relative_analysis(&self) -> bool {
        self.design.relative_analysis()
    }

    pub fn design(&self) -> &FDDesign {
        &self.design
    }

    /// analyse — compute first-order derivatives for every requested QoI.
    ///
    /// Parameters
    /// ----------
    /// - `table`: outputs of the sampler's runs, in sample order.
    ///
    /// Returns
    /// -------
    /// [`FDAnalysisResults`] whose `derivatives_first` holds one vector per
    /// surviving QoI and input. Skipped QoIs are absent from it.
    ///
    /// Errors
    /// ------
    /// - `EmptyResultsTable`, `MissingQoi`, `RowCountMismatch`, `RaggedColumn`
    ///   for malformed input.
    /// - `GridInvariantViolated` in relative mode for an unexpected grid.
    /// - `DegeneratePerturbation` for a zero-width step (sampler construction
    ///   already rejects these).
    pub fn analyse(&self, table: &ResultsTable) -> AnalysisResult<FDAnalysisResults> {
        let _entered = self.span.enter();
        if table.is_empty() {
            return Err(AnalysisError::EmptyResultsTable);
        }

        let n_samples = self.design.n_samples();
        let mut output_lens = BTreeMap::new();
        for qoi in &self.qoi_cols {
            let rows = table
                .column(qoi)
                .ok_or_else(|| AnalysisError::MissingQoi { qoi: qoi.clone() })?;
            output_lens.insert(qoi.clone(), validate_column(qoi, rows, n_samples)?);
        }

        let inputs = self.design.names();
        let mut raw = AnalysisRawData::placeholders(&output_lens, inputs);

        if self.design.relative_analysis() {
            info!("Performing relative analysis");
        } else {
            info!("Performing absolute analysis");
        }

        for qoi in &self.qoi_cols {
            let Some(rows) = table.column(qoi) else { continue };
            let y_base = &rows[0];
            if y_base.iter().all(|&v| v == 0.0) {
                warn!(qoi = %qoi, "Removing QoI from the analysis, contains all zeros");
                raw.derivatives_first.remove(qoi);
                continue;
            }
            if y_base.iter().any(|&v| v == 0.0) {
                warn!(qoi = %qoi, "Removing QoI from the analysis, contains some zeros");
                raw.derivatives_first.remove(qoi);
                continue;
            }

            let mut derivatives = BTreeMap::new();
            for (p, name) in inputs.iter().enumerate() {
                let (d_pos, d_neg) = self.steps(p)?;
                let y_pos = &rows[positive_index(p)];
                let y_neg = &rows[negative_index(p)];
                let deriv = if self.design.relative_analysis() {
                    relative_derivative(y_base, y_pos, y_neg, d_pos, d_neg)
                } else {
                    absolute_derivative(y_base, y_pos, y_neg, d_pos, d_neg)
                };
                derivatives.insert(name.clone(), deriv);
            }
            debug!(qoi = %qoi, n_inputs = inputs.len(), "computed first-order derivatives");
            raw.derivatives_first.insert(qoi.clone(), derivatives);
        }

        Ok(FDAnalysisResults::new(
            raw,
            table.clone(),
            self.qoi_cols.clone(),
            inputs.to_vec(),
        ))
    }

    /// Independent-grid steps `(d₊, d₋)` of input `p`.
    fn steps(&self, p: usize) -> AnalysisResult<(f64, f64)> {
        let nodes = self.design.nodes();
        let (pos, neg) = (positive_index(p), negative_index(p));

        if self.design.relative_analysis() {
            let delta = self.design.perturbation();
            for (sample, expected) in [(0, 0.0), (pos, delta), (neg, -delta)] {
                let found = nodes.value(p, sample);
                if found != expected {
                    return Err(AnalysisError::GridInvariantViolated {
                        param: p,
                        sample,
                        expected,
                        found,
                    });
                }
            }
        }

        let base = nodes.value(p, 0);
        let d_pos = nodes.value(p, pos) - base;
        let d_neg = nodes.value(p, neg) - base;
        if d_pos == 0.0 || d_neg == 0.0 {
            return Err(AnalysisError::DegeneratePerturbation {
                param: self.design.names()[p].clone(),
            });
        }
        Ok((d_pos, d_neg))
    }
}

/// Row count must equal `n_samples`; all rows share row 0's length.
fn validate_column(qoi: &str, rows: &[Array1<f64>], n_samples: usize) -> AnalysisResult<usize> {
    if rows.len() != n_samples {
        return Err(AnalysisError::RowCountMismatch {
            qoi: qoi.to_string(),
            expected: n_samples,
            found: rows.len(),
        });
    }
    let t = rows[0].len();
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != t) {
        return Err(AnalysisError::RaggedColumn {
            qoi: qoi.to_string(),
            row,
            expected: t,
            found: r.len(),
        });
    }
    Ok(t)
}

fn relative_derivative(
    y_base: &Array1<f64>, y_pos: &Array1<f64>, y_neg: &Array1<f64>, d_pos: f64, d_neg: f64,
) -> Array1<f64> {
    (y_pos / y_base - 1.0) * (0.5 / d_pos) + (y_neg / y_base - 1.0) * (0.5 / d_neg)
}

fn absolute_derivative(
    y_base: &Array1<f64>, y_pos: &Array1<f64>, y_neg: &Array1<f64>, d_pos: f64, d_neg: f64,
) -> Array1<f64> {
    (y_pos - y_base) * (0.5 / d_pos) + (y_neg - y_base) * (0.5 / d_neg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        distributions::{Marginal, Vary},
        sampling::{FDOptions, Sample},
    };
    use ndarray::array;

    fn vary_xy() -> Vary {
        Vary::new([
            ("x", Marginal::normal(10.0, 1.0).unwrap()),
            ("y", Marginal::normal(5.0, 1.0).unwrap()),
        ])
        .unwrap()
    }

    fn run<F>(sampler: FDSampler, qoi: &str, model: F) -> ResultsTable
    where
        F: Fn(&Sample) -> Array1<f64>,
    {
        let mut table = ResultsTable::new();
        for sample in sampler {
            table.push(qoi, model(&sample));
        }
        table
    }

    #[test]
    // Purpose
    // -------
    // Absolute mode recovers the slopes of a linear model exactly.
    //
    // Given
    // -----
    // - f = 2x + 3y + 1 around (10, 5), δ = 0.1.
    //
    // Expect
    // ------
    // - ∂f/∂x = 2, ∂f/∂y = 3.
    fn absolute_mode_recovers_linear_slopes() {
        let sampler =
            FDSampler::independent(vary_xy(), FDOptions::new(0.1, false, 0).unwrap()).unwrap();
        let analysis = sampler.analysis(["f"]).unwrap();
        let table = run(sampler, "f", |s| {
            array![2.0 * s.get("x").unwrap() + 3.0 * s.get("y").unwrap() + 1.0]
        });

        let results = analysis.analyse(&table).unwrap();
        assert!((results.derivatives_first("f", "x").unwrap()[0] - 2.0).abs() < 1e-9);
        assert!((results.derivatives_first("f", "y").unwrap()[0] - 3.0).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Relative mode returns the slope of the relative output change.
    //
    // Given
    // -----
    // - f = 4(1 + 2x − y) evaluated at relative perturbations, δ = 0.05.
    //
    // Expect
    // ------
    // - (f/f₀ − 1) is linear in x, y with slopes 2 and −1.
    fn relative_mode_recovers_relative_slopes() {
        let sampler =
            FDSampler::independent(vary_xy(), FDOptions::new(0.05, true, 0).unwrap()).unwrap();
        let analysis = sampler.analysis(["f"]).unwrap();
        let table = run(sampler, "f", |s| {
            let (x, y) = (s.get("x").unwrap(), s.get("y").unwrap());
            array![4.0 * (1.0 + 2.0 * x - y), 8.0 * (1.0 + 2.0 * x - y)]
        });

        let results = analysis.analyse(&table).unwrap();
        let dx = results.derivatives_first("f", "x").unwrap();
        let dy = results.derivatives_first("f", "y").unwrap();
        for t in 0..2 {
            assert!((dx[t] - 2.0).abs() < 1e-9);
            assert!((dy[t] + 1.0).abs() < 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // QoIs with zeros in the nominal output are skipped, not failed.
    fn zero_nominal_outputs_are_skipped() {
        let sampler =
            FDSampler::independent(vary_xy(), FDOptions::new(0.1, false, 0).unwrap()).unwrap();
        let analysis = sampler.analysis(["zero", "partial", "ok"]).unwrap();

        let mut table = ResultsTable::new();
        for sample in sampler {
            let x = sample.get("x").unwrap();
            table.push("zero", array![0.0, 0.0]);
            table.push("partial", array![x, 0.0]);
            table.push("ok", array![x, 1.0]);
        }

        let results = analysis.analyse(&table).unwrap();
        assert!(!results.raw_data().derivatives_first.contains_key("zero"));
        assert!(!results.raw_data().derivatives_first.contains_key("partial"));
        assert!(matches!(
            results.derivatives_first("zero", "x"),
            Err(AnalysisError::MissingCategory { .. })
        ));
        assert!((results.derivatives_first("ok", "x").unwrap()[0] - 1.0).abs() < 1e-9);
        // placeholders are still present for skipped QoIs
        assert_eq!(results.raw_data().sobols_first["zero"]["x"].len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Malformed tables are rejected before any estimation.
    fn malformed_tables_are_rejected() {
        let sampler = FDSampler::independent(vary_xy(), FDOptions::default()).unwrap();
        let analysis = sampler.analysis(["f"]).unwrap();

        assert_eq!(
            analysis.analyse(&ResultsTable::new()).unwrap_err(),
            AnalysisError::EmptyResultsTable
        );

        let other = ResultsTable::from_columns([("g", vec![array![1.0]; 5])]);
        assert_eq!(
            analysis.analyse(&other).unwrap_err(),
            AnalysisError::MissingQoi { qoi: "f".into() }
        );

        let short = ResultsTable::from_columns([("f", vec![array![1.0]; 4])]);
        assert_eq!(
            analysis.analyse(&short).unwrap_err(),
            AnalysisError::RowCountMismatch { qoi: "f".into(), expected: 5, found: 4 }
        );

        let mut rows = vec![array![1.0, 2.0]; 5];
        rows[3] = array![1.0];
        let ragged = ResultsTable::from_columns([("f", rows)]);
        assert_eq!(
            analysis.analyse(&ragged).unwrap_err(),
            AnalysisError::RaggedColumn { qoi: "f".into(), row: 3, expected: 2, found: 1 }
        );
    }

    #[test]
    fn rejects_empty_qoi_list_and_reports_metadata() {
        let sampler = FDSampler::independent(vary_xy(), FDOptions::default()).unwrap();
        assert_eq!(
            sampler.analysis(Vec::<String>::new()).unwrap_err(),
            AnalysisError::EmptyQoiList
        );

        let analysis = sampler.analysis(["f"]).unwrap();
        assert_eq!(analysis.element_name(), "FD_Analysis");
        assert_eq!(analysis.element_version(), env!("CARGO_PKG_VERSION"));
        assert!(!analysis.relative_analysis());
    }
}
