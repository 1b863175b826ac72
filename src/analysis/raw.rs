//! analysis::raw — the nested result containers of an analysis.
//!
//! Purpose
//! -------
//! Hold every statistic an analysis element may produce, keyed by QoI and
//! then by input or statistic name. The FD analysis populates
//! `derivatives_first` and fills the remaining categories with zero
//! placeholders of the right shape so that generic consumers can read them.
//!
//! Conventions
//! -----------
//! - Inner vectors have the QoI's output length `T`.
//! - `sobols_second[qoi][input]` holds one vector per input, in input order,
//!   including the diagonal entry.
//! - `statistical_moments[qoi]` is keyed by `mean`, `var`, `std`;
//!   `percentiles[qoi]` by `p01`, `p10`, `p50`, `p90`, `p99`.
use crate::distributions::Marginal;
use ndarray::{Array1, Array2, ArrayView1};
use std::{collections::BTreeMap, sync::Arc};

/// QoI → name (input or statistic) → vector of length `T`.
pub type IndexTable = BTreeMap<String, BTreeMap<String, Array1<f64>>>;

/// QoI → input → one vector per input (input order).
pub type SecondOrderTable = BTreeMap<String, BTreeMap<String, Vec<Array1<f64>>>>;

/// Surrogate of one QoI: input values (input order) → output vector.
pub type SurrogateFn = Arc<dyn Fn(ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync>;

pub const MOMENT_KEYS: [&str; 3] = ["mean", "var", "std"];
pub const PERCENTILE_KEYS: [&str; 5] = ["p01", "p10", "p50", "p90", "p99"];

/// Names of the raw-data categories, as used by result consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawCategory {
    DerivativesFirst,
    SobolsFirst,
    SobolsSecond,
    SobolsTotal,
    StatisticalMoments,
    Percentiles,
    CorrelationMatrices,
    OutputDistributions,
    Fit,
    FourierCoefficients,
}

impl RawCategory {
    pub const ALL: [RawCategory; 10] = [
        RawCategory::DerivativesFirst,
        RawCategory::SobolsFirst,
        RawCategory::SobolsSecond,
        RawCategory::SobolsTotal,
        RawCategory::StatisticalMoments,
        RawCategory::Percentiles,
        RawCategory::CorrelationMatrices,
        RawCategory::OutputDistributions,
        RawCategory::Fit,
        RawCategory::FourierCoefficients,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RawCategory::DerivativesFirst => "derivatives_first",
            RawCategory::SobolsFirst => "sobols_first",
            RawCategory::SobolsSecond => "sobols_second",
            RawCategory::SobolsTotal => "sobols_total",
            RawCategory::StatisticalMoments => "statistical_moments",
            RawCategory::Percentiles => "percentiles",
            RawCategory::CorrelationMatrices => "correlation_matrices",
            RawCategory::OutputDistributions => "output_distributions",
            RawCategory::Fit => "fit",
            RawCategory::FourierCoefficients => "Fourier_coefficients",
        }
    }
}

impl std::fmt::Display for RawCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AnalysisRawData — all result containers of one analysis run.
#[derive(Clone, Default)]
pub struct AnalysisRawData {
    pub derivatives_first: IndexTable,
    pub sobols_first: IndexTable,
    pub sobols_second: SecondOrderTable,
    pub sobols_total: IndexTable,
    pub statistical_moments: IndexTable,
    pub percentiles: IndexTable,
    pub correlation_matrices: BTreeMap<String, Array2<f64>>,
    pub output_distributions: BTreeMap<String, Vec<Marginal>>,
    pub fit: BTreeMap<String, SurrogateFn>,
    pub fourier_coefficients: IndexTable,
}

impl AnalysisRawData {
    /// placeholders — zero-filled containers for every requested QoI.
    ///
    /// Parameters
    /// ----------
    /// - `output_lens`: QoI → output length `T`.
    /// - `inputs`: input names in input order.
    ///
    /// Returns
    /// -------
    /// Raw data with `derivatives_first` zero-filled as well; the caller
    /// overwrites it or removes skipped QoIs. `correlation_matrices` and
    /// `output_distributions` stay empty.
    pub fn placeholders(output_lens: &BTreeMap<String, usize>, inputs: &[String]) -> Self {
        let mut raw = AnalysisRawData::default();
        for (qoi, &t) in output_lens {
            let per_input = || -> BTreeMap<String, Array1<f64>> {
                inputs.iter().map(|p| (p.clone(), Array1::zeros(t))).collect()
            };
            let keyed = |keys: &[&str]| -> BTreeMap<String, Array1<f64>> {
                keys.iter().map(|k| (k.to_string(), Array1::zeros(t))).collect()
            };

            raw.derivatives_first.insert(qoi.clone(), per_input());
            raw.sobols_first.insert(qoi.clone(), per_input());
            raw.sobols_total.insert(qoi.clone(), per_input());
            raw.fourier_coefficients.insert(qoi.clone(), per_input());
            raw.sobols_second.insert(
                qoi.clone(),
                inputs.iter().map(|p| (p.clone(), vec![Array1::zeros(t); inputs.len()])).collect(),
            );
            raw.statistical_moments.insert(qoi.clone(), keyed(&MOMENT_KEYS[..]));
            raw.percentiles.insert(qoi.clone(), keyed(&PERCENTILE_KEYS[..]));
            raw.fit.insert(qoi.clone(), zero_surrogate(t));
        }
        raw
    }

    /// Tables keyed by QoI then input, if `category` is one of them.
    pub fn index_table(&self, category: RawCategory) -> Option<&IndexTable> {
        match category {
            RawCategory::DerivativesFirst => Some(&self.derivatives_first),
            RawCategory::SobolsFirst => Some(&self.sobols_first),
            RawCategory::SobolsTotal => Some(&self.sobols_total),
            RawCategory::FourierCoefficients => Some(&self.fourier_coefficients),
            _ => None,
        }
    }

    /// QoIs present in `category`.
    pub fn qois_in(&self, category: RawCategory) -> Vec<&str> {
        fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
            map.keys().map(String::as_str).collect()
        }
        match category {
            RawCategory::DerivativesFirst => keys(&self.derivatives_first),
            RawCategory::SobolsFirst => keys(&self.sobols_first),
            RawCategory::SobolsSecond => keys(&self.sobols_second),
            RawCategory::SobolsTotal => keys(&self.sobols_total),
            RawCategory::StatisticalMoments => keys(&self.statistical_moments),
            RawCategory::Percentiles => keys(&self.percentiles),
            RawCategory::CorrelationMatrices => keys(&self.correlation_matrices),
            RawCategory::OutputDistributions => keys(&self.output_distributions),
            RawCategory::Fit => keys(&self.fit),
            RawCategory::FourierCoefficients => keys(&self.fourier_coefficients),
        }
    }
}

impl std::fmt::Debug for AnalysisRawData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRawData")
            .field("derivatives_first", &self.derivatives_first)
            .field("sobols_first", &self.sobols_first)
            .field("sobols_second", &self.sobols_second)
            .field("sobols_total", &self.sobols_total)
            .field("statistical_moments", &self.statistical_moments)
            .field("percentiles", &self.percentiles)
            .field("correlation_matrices", &self.correlation_matrices)
            .field("output_distributions", &self.output_distributions)
            .field("fit", &self.fit.keys().collect::<Vec<_>>())
            .field("fourier_coefficients", &self.fourier_coefficients)
            .finish()
    }
}

/// Surrogate that ignores its inputs and returns `t` zeros.
pub fn zero_surrogate(t: usize) -> SurrogateFn {
    Arc::new(move |_inputs: ArrayView1<'_, f64>| Array1::zeros(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn inputs() -> Vec<String> {
        vec!["x".to_string(), "y".to_string()]
    }

    #[test]
    // Purpose
    // -------
    // Verify placeholder shapes for one QoI of length 3 over two inputs.
    fn placeholders_have_expected_shapes() {
        let lens = BTreeMap::from([("f".to_string(), 3usize)]);
        let raw = AnalysisRawData::placeholders(&lens, &inputs());

        assert_eq!(raw.sobols_first["f"]["y"], Array1::<f64>::zeros(3));
        assert_eq!(raw.sobols_second["f"]["x"].len(), 2);
        assert_eq!(raw.statistical_moments["f"].len(), 3);
        assert_eq!(raw.percentiles["f"]["p50"].len(), 3);
        assert_eq!(raw.fourier_coefficients["f"]["x"].len(), 3);
        assert!(raw.correlation_matrices.is_empty());
        assert!(raw.output_distributions.is_empty());

        let fit = &raw.fit["f"];
        assert_eq!(fit(array![1.0, 2.0].view()), Array1::<f64>::zeros(3));
    }

    #[test]
    fn category_names_are_stable() {
        assert_eq!(RawCategory::FourierCoefficients.as_str(), "Fourier_coefficients");
        assert_eq!(RawCategory::DerivativesFirst.to_string(), "derivatives_first");
        assert_eq!(RawCategory::ALL.len(), 10);
    }

    #[test]
    fn index_table_covers_per_input_categories() {
        let lens = BTreeMap::from([("f".to_string(), 1usize)]);
        let raw = AnalysisRawData::placeholders(&lens, &inputs());
        assert!(raw.index_table(RawCategory::SobolsTotal).is_some());
        assert!(raw.index_table(RawCategory::Percentiles).is_none());
        assert_eq!(raw.qois_in(RawCategory::Fit), vec!["f"]);
        assert!(raw.qois_in(RawCategory::OutputDistributions).is_empty());
    }
}
