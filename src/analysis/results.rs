//! analysis::results — read access to the outcome of an FD analysis.
//!
//! [`FDAnalysisResults`] wraps the raw containers with name-checked
//! accessors, a pandas-style `describe`, and a callable surrogate built from
//! the per-QoI fits.
use crate::{
    analysis::{
        errors::{AnalysisError, AnalysisResult},
        raw::{AnalysisRawData, RawCategory, SurrogateFn},
        table::ResultsTable,
    },
    distributions::Marginal,
};
use ndarray::Array1;
use std::{
    collections::{BTreeMap, HashMap},
    str::FromStr,
};

/// Descriptive statistics understood by [`FDAnalysisResults::describe`].
///
/// Parsing accepts the names listed by
/// [`FDAnalysisResults::supported_stats`]; anything else is
/// `AnalysisError::NotImplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Min,
    Max,
    P10,
    P90,
    P01,
    P99,
    Median,
    Mean,
    Var,
    Std,
}

impl Statistic {
    pub const SUPPORTED: [Statistic; 10] = [
        Statistic::Min,
        Statistic::Max,
        Statistic::P10,
        Statistic::P90,
        Statistic::P01,
        Statistic::P99,
        Statistic::Median,
        Statistic::Mean,
        Statistic::Var,
        Statistic::Std,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::P10 => "10%",
            Statistic::P90 => "90%",
            Statistic::P01 => "1%",
            Statistic::P99 => "99%",
            Statistic::Median => "median",
            Statistic::Mean => "mean",
            Statistic::Var => "var",
            Statistic::Std => "std",
        }
    }

    /// Key of the backing entry in `percentiles` or `statistical_moments`.
    fn raw_key(&self) -> Option<&'static str> {
        match self {
            Statistic::Min | Statistic::Max => None,
            Statistic::P01 => Some("p01"),
            Statistic::P10 => Some("p10"),
            Statistic::Median => Some("p50"),
            Statistic::P90 => Some("p90"),
            Statistic::P99 => Some("p99"),
            Statistic::Mean => Some("mean"),
            Statistic::Var => Some("var"),
            Statistic::Std => Some("std"),
        }
    }

    fn is_percentile(&self) -> bool {
        matches!(
            self,
            Statistic::P01 | Statistic::P10 | Statistic::Median | Statistic::P90 | Statistic::P99
        )
    }
}

impl FromStr for Statistic {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::SUPPORTED
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| AnalysisError::NotImplemented { what: format!("statistic '{s}'") })
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one QoI produced by the surrogate.
#[derive(Debug, Clone, PartialEq)]
pub enum SurrogateOutput {
    /// Output of length one.
    Scalar(f64),
    Vector(Array1<f64>),
}

impl SurrogateOutput {
    fn from_array(values: Array1<f64>) -> Self {
        if values.len() == 1 {
            SurrogateOutput::Scalar(values[0])
        } else {
            SurrogateOutput::Vector(values)
        }
    }
}

/// FDAnalysisResults — raw containers plus the data they were computed from.
#[derive(Debug, Clone)]
pub struct FDAnalysisResults {
    raw: AnalysisRawData,
    samples: ResultsTable,
    qois: Vec<String>,
    inputs: Vec<String>,
}

impl FDAnalysisResults {
    pub fn new(
        raw: AnalysisRawData, samples: ResultsTable, qois: Vec<String>, inputs: Vec<String>,
    ) -> Self {
        FDAnalysisResults { raw, samples, qois, inputs }
    }

    pub fn qois(&self) -> &[String] {
        &self.qois
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn samples(&self) -> &ResultsTable {
        &self.samples
    }

    pub fn raw_data(&self) -> &AnalysisRawData {
        &self.raw
    }

    pub fn into_raw_data(self) -> AnalysisRawData {
        self.raw
    }

    fn check_qoi(&self, qoi: &str) -> AnalysisResult<()> {
        if self.qois.iter().any(|q| q == qoi) {
            Ok(())
        } else {
            Err(AnalysisError::UnknownQoi { qoi: qoi.to_string() })
        }
    }

    fn check_input(&self, input: &str) -> AnalysisResult<()> {
        if self.inputs.iter().any(|i| i == input) {
            Ok(())
        } else {
            Err(AnalysisError::UnknownInput { input: input.to_string() })
        }
    }

    fn per_input(
        &self, category: RawCategory, qoi: &str, input: &str,
    ) -> AnalysisResult<&Array1<f64>> {
        self.check_qoi(qoi)?;
        self.check_input(input)?;
        let missing = || AnalysisError::MissingCategory {
            category: category.as_str(),
            qoi: qoi.to_string(),
        };
        self.raw
            .index_table(category)
            .and_then(|table| table.get(qoi))
            .and_then(|per_input| per_input.get(input))
            .ok_or_else(missing)
    }

    /// First-order derivative of `qoi` with respect to `input`.
    ///
    /// Errors
    /// ------
    /// - `UnknownQoi` / `UnknownInput` for names outside the analysis.
    /// - `MissingCategory` if the QoI was skipped (zero nominal output).
    pub fn derivatives_first(&self, qoi: &str, input: &str) -> AnalysisResult<&Array1<f64>> {
        self.per_input(RawCategory::DerivativesFirst, qoi, input)
    }

    pub fn sobols_first(&self, qoi: &str, input: &str) -> AnalysisResult<&Array1<f64>> {
        self.per_input(RawCategory::SobolsFirst, qoi, input)
    }

    pub fn sobols_total(&self, qoi: &str, input: &str) -> AnalysisResult<&Array1<f64>> {
        self.per_input(RawCategory::SobolsTotal, qoi, input)
    }

    pub fn fourier_coefficients(&self, qoi: &str, input: &str) -> AnalysisResult<&Array1<f64>> {
        self.per_input(RawCategory::FourierCoefficients, qoi, input)
    }

    /// Second-order indices of `input` paired with every other input, in
    /// input order.
    pub fn sobols_second(
        &self, qoi: &str, input: &str,
    ) -> AnalysisResult<Vec<(&str, &Array1<f64>)>> {
        self.check_qoi(qoi)?;
        self.check_input(input)?;
        let row = self
            .raw
            .sobols_second
            .get(qoi)
            .and_then(|per_input| per_input.get(input))
            .ok_or_else(|| AnalysisError::MissingCategory {
                category: RawCategory::SobolsSecond.as_str(),
                qoi: qoi.to_string(),
            })?;
        Ok(self
            .inputs
            .iter()
            .zip(row)
            .filter(|(other, _)| other.as_str() != input)
            .map(|(other, values)| (other.as_str(), values))
            .collect())
    }

    pub fn supported_stats(&self) -> Vec<&'static str> {
        Statistic::SUPPORTED.iter().map(Statistic::as_str).collect()
    }

    /// describe — one descriptive statistic of `qoi`, per output element.
    ///
    /// Parameters
    /// ----------
    /// - `qoi`: a QoI of this analysis.
    /// - `statistic`: one of [`supported_stats`](Self::supported_stats).
    ///
    /// Errors
    /// ------
    /// - `NotImplemented` for an unsupported statistic or one whose backing
    ///   container is absent (FD produces no output distributions, so `min`
    ///   and `max` are unavailable).
    /// - `UnknownQoi` for a QoI outside the analysis.
    pub fn describe(&self, qoi: &str, statistic: &str) -> AnalysisResult<Array1<f64>> {
        let stat: Statistic = statistic.parse()?;
        self.check_qoi(qoi)?;
        let unavailable = || AnalysisError::NotImplemented {
            what: format!("statistic '{stat}' for QoI '{qoi}'"),
        };

        match stat {
            Statistic::Min | Statistic::Max => {
                let dists = self
                    .raw
                    .output_distributions
                    .get(qoi)
                    .filter(|dists| !dists.is_empty())
                    .ok_or_else(unavailable)?;
                Ok(dists
                    .iter()
                    .map(|d| {
                        let (lower, upper) = d.support();
                        if stat == Statistic::Min { lower } else { upper }
                    })
                    .collect())
            }
            _ => {
                let table = if stat.is_percentile() {
                    &self.raw.percentiles
                } else {
                    &self.raw.statistical_moments
                };
                stat.raw_key()
                    .and_then(|key| table.get(qoi).and_then(|stats| stats.get(key)))
                    .cloned()
                    .ok_or_else(unavailable)
            }
        }
    }

    /// Every supported statistic of `qoi` that is backed by data.
    pub fn describe_available(&self, qoi: &str) -> AnalysisResult<Vec<(Statistic, Array1<f64>)>> {
        self.check_qoi(qoi)?;
        Ok(Statistic::SUPPORTED
            .into_iter()
            .filter_map(|stat| self.describe(qoi, stat.as_str()).ok().map(|v| (stat, v)))
            .collect())
    }

    /// surrogate — callable evaluating every QoI's fit.
    ///
    /// The returned closure takes input values by name, orders them like
    /// [`inputs`](Self::inputs), and maps each QoI to its fitted output;
    /// length-one outputs collapse to [`SurrogateOutput::Scalar`].
    ///
    /// Errors
    /// ------
    /// Returned by the closure:
    /// - `MissingSurrogateInput` when an input has no value.
    /// - `MissingCategory` when a QoI has no fit.
    pub fn surrogate(
        &self,
    ) -> impl Fn(&HashMap<String, f64>) -> AnalysisResult<BTreeMap<String, SurrogateOutput>>
    + Send
    + Sync
    + 'static {
        let inputs = self.inputs.clone();
        let fits: Vec<(String, Option<SurrogateFn>)> =
            self.qois.iter().map(|q| (q.clone(), self.raw.fit.get(q).cloned())).collect();

        move |values: &HashMap<String, f64>| -> AnalysisResult<BTreeMap<String, SurrogateOutput>> {
            let x = inputs
                .iter()
                .map(|name| {
                    values
                        .get(name)
                        .copied()
                        .ok_or_else(|| AnalysisError::MissingSurrogateInput { input: name.clone() })
                })
                .collect::<AnalysisResult<Array1<f64>>>()?;

            fits.iter()
                .map(|(qoi, fit)| {
                    let fit = fit.as_ref().ok_or_else(|| AnalysisError::MissingCategory {
                        category: RawCategory::Fit.as_str(),
                        qoi: qoi.clone(),
                    })?;
                    Ok((qoi.clone(), SurrogateOutput::from_array(fit(x.view()))))
                })
                .collect()
        }
    }

    /// Per-element output distributions of `qoi` (empty for FD).
    pub fn get_distribution(&self, qoi: &str) -> AnalysisResult<&[Marginal]> {
        self.check_qoi(qoi)?;
        Ok(self.raw.output_distributions.get(qoi).map(Vec::as_slice).unwrap_or(&[]))
    }
}
