// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Decision variable snapshots.
//!
//! The oracle reports the assignment behind every point it returns as a
//! [`DecisionSnapshot`]. Snapshots are shared (`Arc`) between the frontier,
//! lower bound segment endpoints and branching heuristics, so cloning one
//! never copies the values.

use crate::index::VariableIndex;
use biobab_core::num::tolerance::is_fractional;
use std::sync::Arc;

/// An immutable, cheaply clonable assignment of all decision variables.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DecisionSnapshot {
    values: Arc<[f64]>,
}

impl DecisionSnapshot {
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// A snapshot without any variables, for oracles that expose none.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the value of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of bounds.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> f64 {
        let index = variable.get();
        assert!(
            index < self.len(),
            "called `DecisionSnapshot::value` with variable index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );
        self.values[index]
    }

    /// `true` if no value is fractional by more than `epsilon`.
    #[inline]
    pub fn is_integral(&self, epsilon: f64) -> bool {
        !self.values.iter().any(|&v| is_fractional(v, epsilon))
    }

    /// Iterates over `(variable, value)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (VariableIndex, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (VariableIndex::new(i), v))
    }
}

impl From<Vec<f64>> for DecisionSnapshot {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_access_and_iteration() {
        let s = DecisionSnapshot::new(vec![0.0, 1.0, 0.5]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.value(VariableIndex::new(2)), 0.5);
        let collected: Vec<_> = s.iter().map(|(v, x)| (v.get(), x)).collect();
        assert_eq!(collected, vec![(0, 0.0), (1, 1.0), (2, 0.5)]);
    }

    #[test]
    fn test_is_integral() {
        assert!(DecisionSnapshot::new(vec![0.0, 1.0, 0.999_999_9]).is_integral(1e-5));
        assert!(!DecisionSnapshot::new(vec![0.0, 0.4]).is_integral(1e-5));
        assert!(DecisionSnapshot::empty().is_integral(1e-5));
    }

    #[test]
    fn test_clones_share_storage() {
        let s = DecisionSnapshot::new(vec![1.0; 4]);
        let t = s.clone();
        assert!(std::ptr::eq(s.values().as_ptr(), t.values().as_ptr()));
    }

    #[test]
    #[should_panic(expected = "variable index out of bounds")]
    fn test_value_out_of_bounds_panics() {
        let _ = DecisionSnapshot::new(vec![0.0]).value(VariableIndex::new(3));
    }
}
