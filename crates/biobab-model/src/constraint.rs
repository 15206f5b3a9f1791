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

//! Linear constraints over decision variables.
//!
//! Branching may add constraints such as `sum(x_i) <= n` to the oracle. The
//! oracle hands back a [`ConstraintId`](crate::index::ConstraintId) for each
//! added constraint so it can be removed again on backtracking.

use crate::index::VariableIndex;

/// The relation between the left-hand side and the right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl std::fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintSense::LessEqual => write!(f, "<="),
            ConstraintSense::GreaterEqual => write!(f, ">="),
            ConstraintSense::Equal => write!(f, "=="),
        }
    }
}

/// `sum(coefficient * variable) <sense> rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    terms: Vec<(VariableIndex, f64)>,
    sense: ConstraintSense,
    rhs: f64,
}

impl LinearConstraint {
    #[inline]
    pub fn new(terms: Vec<(VariableIndex, f64)>, sense: ConstraintSense, rhs: f64) -> Self {
        Self { terms, sense, rhs }
    }

    /// `sum(variables) <= rhs` with unit coefficients.
    #[inline]
    pub fn sum_at_most<I>(variables: I, rhs: f64) -> Self
    where
        I: IntoIterator<Item = VariableIndex>,
    {
        Self::new(
            variables.into_iter().map(|v| (v, 1.0)).collect(),
            ConstraintSense::LessEqual,
            rhs,
        )
    }

    /// `sum(variables) >= rhs` with unit coefficients.
    #[inline]
    pub fn sum_at_least<I>(variables: I, rhs: f64) -> Self
    where
        I: IntoIterator<Item = VariableIndex>,
    {
        Self::new(
            variables.into_iter().map(|v| (v, 1.0)).collect(),
            ConstraintSense::GreaterEqual,
            rhs,
        )
    }

    #[inline]
    pub fn terms(&self) -> &[(VariableIndex, f64)] {
        &self.terms
    }

    #[inline]
    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// The left-hand side evaluated at `values`.
    ///
    /// # Panics
    ///
    /// Panics if a term refers to a variable outside `values`.
    #[inline]
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(variable, coefficient)| coefficient * values[variable.get()])
            .sum()
    }

    /// `true` if `values` satisfy the constraint up to `tolerance`.
    #[inline]
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl std::fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        for (i, (variable, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if *coefficient == 1.0 {
                write!(f, "x{}", variable.get())?;
            } else {
                write!(f, "{}*x{}", coefficient, variable.get())?;
            }
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(ids: &[usize]) -> Vec<VariableIndex> {
        ids.iter().copied().map(VariableIndex::new).collect()
    }

    #[test]
    fn test_sum_constraints_evaluate_unit_coefficients() {
        let values = [1.0, 0.0, 1.0, 1.0];
        let at_most = LinearConstraint::sum_at_most(vars(&[0, 2, 3]), 2.0);
        let at_least = LinearConstraint::sum_at_least(vars(&[0, 2, 3]), 3.0);
        assert_eq!(at_most.lhs(&values), 3.0);
        assert!(!at_most.is_satisfied_by(&values, 1e-9));
        assert!(at_least.is_satisfied_by(&values, 1e-9));
    }

    #[test]
    fn test_equality_uses_tolerance() {
        let c = LinearConstraint::new(
            vec![(VariableIndex::new(0), 2.0)],
            ConstraintSense::Equal,
            1.0,
        );
        assert!(c.is_satisfied_by(&[0.500_000_000_1], 1e-9));
        assert!(!c.is_satisfied_by(&[0.6], 1e-9));
    }

    #[test]
    fn test_display() {
        let c = LinearConstraint::new(
            vec![(VariableIndex::new(1), 1.0), (VariableIndex::new(4), 2.0)],
            ConstraintSense::GreaterEqual,
            3.0,
        );
        assert_eq!(format!("{}", c), "x1 + 2*x4 >= 3");
    }
}
