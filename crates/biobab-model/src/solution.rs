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

//! Immutable frontier entries.

use crate::snapshot::DecisionSnapshot;
use biobab_core::{
    math::point::Point,
    num::{increments::ObjectiveIncrements, value::ObjectiveValue},
};

/// A feasible integral solution found by the oracle.
///
/// Besides the raw objective point a solution stores its *improved* point.
/// When objective values are known to lie on a lattice of minimum increments,
/// no other integral solution can lie strictly between a solution and the next
/// lattice line, so the solution dominates everything above and right of
/// `point - 0.9 * increment`. Without integrality both points coincide.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<F = f64> {
    point: Point<F>,
    improved: Point<F>,
    assignment: DecisionSnapshot,
}

impl<F> Solution<F>
where
    F: ObjectiveValue,
{
    /// A solution dominating exactly the points it weakly dominates.
    #[inline]
    pub fn new(point: Point<F>, assignment: DecisionSnapshot) -> Self {
        Self {
            point,
            improved: point,
            assignment,
        }
    }

    /// A solution whose dominance is improved by `increments`, if any.
    #[inline]
    pub fn with_integrality(
        point: Point<F>,
        assignment: DecisionSnapshot,
        increments: Option<&ObjectiveIncrements<F>>,
    ) -> Self {
        let improved = increments.map_or(point, |inc| inc.improve(point));
        Self {
            point,
            improved,
            assignment,
        }
    }

    #[inline]
    pub fn point(&self) -> Point<F> {
        self.point
    }

    #[inline]
    pub fn improved_point(&self) -> Point<F> {
        self.improved
    }

    #[inline]
    pub fn z1(&self) -> F {
        self.point.z1()
    }

    #[inline]
    pub fn z2(&self) -> F {
        self.point.z2()
    }

    #[inline]
    pub fn assignment(&self) -> &DecisionSnapshot {
        &self.assignment
    }

    /// `true` if `self.improved <= other.point` in both objectives.
    #[inline]
    pub fn dominates(&self, other: &Self) -> bool {
        self.dominates_point(&other.point)
    }

    #[inline]
    pub fn dominates_point(&self, point: &Point<F>) -> bool {
        self.improved.weakly_dominates(point)
    }
}

impl<F> std::fmt::Display for Solution<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol(z1: f64, z2: f64) -> Solution {
        Solution::new(Point::new(z1, z2), DecisionSnapshot::empty())
    }

    #[test]
    fn test_plain_solution_dominates_weakly() {
        let a = sol(1.0, 5.0);
        assert!(a.dominates(&sol(1.0, 5.0)));
        assert!(a.dominates(&sol(2.0, 5.0)));
        assert!(!a.dominates(&sol(0.5, 9.0)));
        assert_eq!(a.improved_point(), a.point());
    }

    #[test]
    fn test_integrality_improves_dominance_region() {
        let inc = ObjectiveIncrements::unit();
        let a = Solution::with_integrality(Point::new(2.0, 5.0), DecisionSnapshot::empty(), Some(&inc));
        assert!(a.dominates_point(&Point::new(1.5, 6.0)));
        assert!(!a.dominates_point(&Point::new(1.0, 6.0)));
        assert_eq!(a.point(), Point::new(2.0, 5.0));
    }

    #[test]
    fn test_display_prints_raw_point() {
        assert_eq!(format!("{}", sol(1.0, 2.5)), "(1, 2.5)");
    }
}
