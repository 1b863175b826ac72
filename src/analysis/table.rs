//! analysis::table — model outputs collected from the sampler's runs.
//!
//! A [`ResultsTable`] maps each QoI name to one output vector per sample, in
//! the order the sampler yielded them. The analysis validates shapes; the
//! table itself only stores.
use ndarray::Array1;
use std::collections::BTreeMap;

/// ResultsTable — QoI name → `N` output vectors (sampler order).
///
/// Examples
/// --------
/// ```rust
/// # use rust_uq::analysis::ResultsTable;
/// # use ndarray::array;
/// let mut table = ResultsTable::new();
/// table.push("y", array![1.0, 2.0]);
/// table.push("y", array![1.5, 2.5]);
/// assert_eq!(table.n_rows("y"), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    columns: BTreeMap<String, Vec<Array1<f64>>>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from complete columns; a repeated name keeps the last column.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Array1<f64>>)>,
        S: Into<String>,
    {
        ResultsTable { columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }

    /// Set a whole column, returning the one it replaces.
    pub fn insert(
        &mut self, qoi: impl Into<String>, rows: Vec<Array1<f64>>,
    ) -> Option<Vec<Array1<f64>>> {
        self.columns.insert(qoi.into(), rows)
    }

    /// Append one run's output for `qoi`.
    pub fn push(&mut self, qoi: impl Into<String>, row: Array1<f64>) {
        self.columns.entry(qoi.into()).or_default().push(row);
    }

    /// Append scalar outputs as length-1 vectors.
    pub fn push_scalar(&mut self, qoi: impl Into<String>, value: f64) {
        self.push(qoi, Array1::from_elem(1, value));
    }

    pub fn column(&self, qoi: &str) -> Option<&[Array1<f64>]> {
        self.columns.get(qoi).map(Vec::as_slice)
    }

    pub fn n_rows(&self, qoi: &str) -> Option<usize> {
        self.columns.get(qoi).map(Vec::len)
    }

    pub fn qois(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn push_appends_rows_in_order() {
        let mut table = ResultsTable::new();
        table.push_scalar("f", 1.0);
        table.push_scalar("f", 2.0);
        table.push("g", array![0.0, 1.0]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.column("f").unwrap(), &[array![1.0], array![2.0]]);
        assert_eq!(table.qois().collect::<Vec<_>>(), vec!["f", "g"]);
        assert!(table.column("h").is_none());
    }

    #[test]
    fn insert_replaces_column() {
        let mut table = ResultsTable::from_columns([("f", vec![array![1.0]])]);
        let old = table.insert("f", vec![array![3.0], array![4.0]]);
        assert_eq!(old, Some(vec![array![1.0]]));
        assert_eq!(table.n_rows("f"), Some(2));
    }
}
