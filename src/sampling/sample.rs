//! sampling::sample — one parameter record handed to a model run.
use ndarray::Array1;
use std::{collections::BTreeMap, sync::Arc};

/// Sample — parameter name → value, in the order of the sampler's `vary`.
///
/// Names are shared between all samples of one sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    names: Arc<[String]>,
    values: Array1<f64>,
}

impl Sample {
    pub(crate) fn new(names: Arc<[String]>, values: Array1<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Sample { names, values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names.iter().position(|n| n == name).map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// Copy into an owned map, e.g. for a run-directory encoder.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter().map(|(n, v)| (n.to_string(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn lookup_and_iteration_follow_name_order() {
        let names: Arc<[String]> = vec!["x".to_string(), "y".to_string()].into();
        let sample = Sample::new(names, array![1.5, -2.0]);

        assert_eq!(sample.get("y"), Some(-2.0));
        assert_eq!(sample.get("z"), None);
        assert_eq!(sample.iter().collect::<Vec<_>>(), vec![("x", 1.5), ("y", -2.0)]);
        assert_eq!(sample.to_map().get("x"), Some(&1.5));
        assert_eq!(sample.len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Iteration keeps the sampler's parameter order even when it is not
    // alphabetical; only the owned map is sorted.
    fn iteration_keeps_parameter_order() {
        let names: Arc<[String]> = vec!["y".to_string(), "a".to_string()].into();
        let sample = Sample::new(names, array![3.0, 4.0]);

        let order: Vec<&str> = sample.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["y", "a"]);
        assert_eq!(sample.to_map().keys().next().map(String::as_str), Some("a"));
    }
}
