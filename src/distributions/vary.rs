//! distributions::vary — the ordered set of uncertain inputs.
//!
//! [`Vary`] maps parameter names to their [`Marginal`] distributions while
//! preserving insertion order. That order is load-bearing: it fixes the row
//! order of the sampler's node grid and therefore the position of every
//! parameter's perturbation pair in the sample sequence.
use crate::distributions::marginal::Marginal;

/// Ordered, duplicate-free mapping from parameter name to marginal.
#[derive(Debug, Clone, PartialEq)]
pub struct Vary {
    entries: Vec<(String, Marginal)>,
}

/// VaryError — rejected input sets.
#[derive(Debug, Clone, PartialEq)]
pub enum VaryError {
    /// At least one parameter must be varied.
    Empty,
    /// Parameter names must be unique.
    DuplicateName { name: String },
}

impl std::error::Error for VaryError {}

impl std::fmt::Display for VaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaryError::Empty => write!(f, "'vary' cannot be empty"),
            VaryError::DuplicateName { name } => {
                write!(f, "Parameter '{name}' appears more than once in 'vary'")
            }
        }
    }
}

impl Vary {
    /// Build a [`Vary`] from `(name, marginal)` pairs in the desired order.
    ///
    /// Errors
    /// ------
    /// - `VaryError::Empty` when no pairs are given.
    /// - `VaryError::DuplicateName` when a name repeats.
    pub fn new<I, S>(entries: I) -> Result<Self, VaryError>
    where
        I: IntoIterator<Item = (S, Marginal)>,
        S: Into<String>,
    {
        let mut out: Vec<(String, Marginal)> = Vec::new();
        for (name, marginal) in entries {
            let name = name.into();
            if out.iter().any(|(existing, _)| *existing == name) {
                return Err(VaryError::DuplicateName { name });
            }
            out.push((name, marginal));
        }
        if out.is_empty() {
            return Err(VaryError::Empty);
        }
        Ok(Vary { entries: out })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed value; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Marginal> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn marginals(&self) -> impl Iterator<Item = &Marginal> {
        self.entries.iter().map(|(_, m)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marginal)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(mean: f64) -> Marginal {
        Marginal::normal(mean, 1.0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that insertion order is preserved for names, lookups and
    // positions.
    fn preserves_insertion_order() {
        let vary = Vary::new([("y", normal(5.0)), ("x", normal(10.0))]).unwrap();

        assert_eq!(vary.names().collect::<Vec<_>>(), vec!["y", "x"]);
        assert_eq!(vary.position("x"), Some(1));
        assert_eq!(vary.get("y"), Some(&normal(5.0)));
        assert!(vary.get("z").is_none());
        assert_eq!(vary.len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure empty and duplicate-name inputs are rejected.
    fn rejects_empty_and_duplicates() {
        let empty: Vec<(String, Marginal)> = Vec::new();
        assert_eq!(Vary::new(empty), Err(VaryError::Empty));

        let dup = Vary::new([("x", normal(1.0)), ("x", normal(2.0))]);
        assert_eq!(dup, Err(VaryError::DuplicateName { name: "x".to_string() }));
    }
}
