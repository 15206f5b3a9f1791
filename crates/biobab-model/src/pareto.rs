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

//! # Pareto Frontier
//!
//! [`ParetoSet`] maintains the mutually non-dominated solutions found so far,
//! strictly sorted by ascending `z1` and therefore by non-increasing `z2`.
//!
//! Insertion locates the position by binary search on `z1`, checks the two
//! immediate neighbours for dominance (sufficient because the set is sorted and
//! non-dominated) and splices out the run of members dominated by the new
//! solution, which starts at the insertion point. An insertion therefore costs
//! `O(log n + k)` comparisons where `k` is the number of members removed.

use crate::{snapshot::DecisionSnapshot, solution::Solution};
use biobab_core::{
    math::point::Point,
    num::{increments::ObjectiveIncrements, value::ObjectiveValue},
};

/// The frontier of non-dominated solutions.
#[derive(Clone, Debug, PartialEq)]
pub struct ParetoSet<F = f64> {
    solutions: Vec<Solution<F>>,
    integrality: Option<ObjectiveIncrements<F>>,
    /// Number of successful insertions so far.
    revision: u64,
}

impl<F> ParetoSet<F>
where
    F: ObjectiveValue,
{
    /// An empty frontier using plain dominance.
    #[inline]
    pub fn new() -> Self {
        Self {
            solutions: Vec::new(),
            integrality: None,
            revision: 0,
        }
    }

    /// An empty frontier whose recorded solutions dominate with improved
    /// coordinates derived from `increments`.
    #[inline]
    pub fn with_integer_dominance(increments: ObjectiveIncrements<F>) -> Self {
        Self {
            solutions: Vec::new(),
            integrality: Some(increments),
            revision: 0,
        }
    }

    /// An empty frontier with the same dominance rule as `self`.
    #[inline]
    pub fn empty_like(&self) -> Self {
        Self {
            solutions: Vec::new(),
            integrality: self.integrality,
            revision: 0,
        }
    }

    #[inline]
    pub fn integrality(&self) -> Option<&ObjectiveIncrements<F>> {
        self.integrality.as_ref()
    }

    /// Increases with every successful insertion. Two equal revisions of the
    /// same set mean nothing entered it in between.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Solution<F>> {
        self.solutions.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Solution<F>] {
        &self.solutions
    }

    /// The objective points in ascending `z1` order.
    #[inline]
    pub fn points(&self) -> impl Iterator<Item = Point<F>> + '_ {
        self.solutions.iter().map(Solution::point)
    }

    /// `true` if a member sits at `point` (within tolerance).
    #[inline]
    pub fn contains_point(&self, point: &Point<F>) -> bool {
        self.solutions.iter().any(|s| s.point().is_close_to(point))
    }

    /// `true` if some member dominates `point`.
    #[inline]
    pub fn dominates_point(&self, point: &Point<F>) -> bool {
        self.solutions.iter().any(|s| s.dominates_point(point))
    }

    /// Records an integral oracle result, applying this frontier's dominance rule.
    /// Returns `true` if the solution entered the frontier.
    #[inline]
    pub fn record(&mut self, point: Point<F>, assignment: DecisionSnapshot) -> bool {
        let solution = Solution::with_integrality(point, assignment, self.integrality.as_ref());
        self.update_with_solution(solution)
    }

    /// Inserts `solution` unless a member dominates it, then removes every
    /// member `solution` dominates. Returns `true` if the solution was inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use biobab_core::math::point::Point;
    /// # use biobab_model::{pareto::ParetoSet, snapshot::DecisionSnapshot};
    /// let mut frontier = ParetoSet::new();
    /// assert!(frontier.record(Point::new(2.0, 7.0), DecisionSnapshot::empty()));
    /// assert!(frontier.record(Point::new(1.0, 10.0), DecisionSnapshot::empty()));
    /// assert!(!frontier.record(Point::new(3.0, 8.0), DecisionSnapshot::empty()));
    /// assert!(frontier.record(Point::new(1.0, 6.0), DecisionSnapshot::empty()));
    /// assert_eq!(frontier.points().collect::<Vec<_>>(), vec![Point::new(1.0, 6.0)]);
    /// ```
    pub fn update_with_solution(&mut self, solution: Solution<F>) -> bool {
        let len = self.solutions.len();
        // First member with z1 >= solution.z1; everything left of it is strictly smaller in z1.
        let index = self.solutions.partition_point(|s| s.z1() < solution.z1());

        if index > 0 && self.solutions[index - 1].dominates(&solution) {
            return false;
        }
        if index < len && self.solutions[index].dominates(&solution) {
            return false;
        }

        let dominated = self.solutions[index..]
            .iter()
            .take_while(|s| solution.dominates(s))
            .count();

        if dominated == 0 {
            self.solutions.insert(index, solution);
        } else {
            self.solutions[index] = solution;
            self.solutions.drain(index + 1..index + dominated);
        }
        self.revision = self.revision.saturating_add(1);

        debug_assert!(self.is_consistent(), "`ParetoSet` lost its ordering invariant");
        true
    }

    /// Removes every member dominated by some member of `other`.
    pub fn filter_with(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.solutions
            .retain(|s| !other.solutions.iter().any(|o| o.dominates(s)));
    }

    /// Inserts every member of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for solution in other.iter() {
            self.update_with_solution(solution.clone());
        }
    }

    /// Removes all members, keeping the dominance rule.
    #[inline]
    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    fn is_consistent(&self) -> bool {
        self.solutions
            .windows(2)
            .all(|w| w[0].z1() < w[1].z1() && w[0].z2() >= w[1].z2())
    }
}

impl<F> Default for ParetoSet<F>
where
    F: ObjectiveValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, F> IntoIterator for &'a ParetoSet<F>
where
    F: ObjectiveValue,
{
    type Item = &'a Solution<F>;
    type IntoIter = std::slice::Iter<'a, Solution<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl<F> std::fmt::Display for ParetoSet<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParetoSet[")?;
        for (i, solution) in self.solutions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", solution)?;
        }
        write!(f, "]")
    }
}
