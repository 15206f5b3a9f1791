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

//! # Scalarization Oracle
//!
//! The bi-objective search never optimizes by itself. Every point it learns
//! about comes from a [`ScalarizationOracle`]: a single-objective solver that
//! minimizes a weighted sum `w1 * z1 + w2 * z2` over the feasible region,
//! restricted to an objective box `z1 <= right, z2 <= top` and to whatever
//! branching restrictions are currently applied.
//!
//! The oracle is shared mutable state. Branching mutates it through the
//! reversible operations ([`set_variable_bound`]/[`restore_variable_bound`],
//! [`add_constraint`]/[`remove_constraint`]); the search guarantees that every
//! mutation is undone before a sibling subproblem is looked at.
//!
//! [`set_variable_bound`]: ScalarizationOracle::set_variable_bound
//! [`restore_variable_bound`]: ScalarizationOracle::restore_variable_bound
//! [`add_constraint`]: ScalarizationOracle::add_constraint
//! [`remove_constraint`]: ScalarizationOracle::remove_constraint

use crate::{
    constraint::LinearConstraint,
    index::{ConstraintId, VariableIndex},
    pareto::ParetoSet,
    snapshot::DecisionSnapshot,
};
use biobab_core::math::{
    bounds::ObjectiveBounds,
    point::{Objective, Point},
};

/// Which side of a variable's domain a bound restricts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Lower,
    Upper,
}

impl std::fmt::Display for BoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundKind::Lower => write!(f, ">="),
            BoundKind::Upper => write!(f, "<="),
        }
    }
}

/// One weighted-sum optimization request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSumQuery {
    pub w1: f64,
    pub w2: f64,
    pub bounds: ObjectiveBounds,
    /// Whether the oracle may stop early once no solution can beat a
    /// frontier point feasible for the current restrictions.
    pub allow_cutoff: bool,
}

impl WeightedSumQuery {
    #[inline]
    pub fn new(w1: f64, w2: f64, bounds: ObjectiveBounds) -> Self {
        Self {
            w1,
            w2,
            bounds,
            allow_cutoff: false,
        }
    }

    #[inline]
    pub fn with_cutoff(self, allow_cutoff: bool) -> Self {
        Self {
            allow_cutoff,
            ..self
        }
    }

    /// `w1 * z1 + w2 * z2`.
    #[inline]
    pub fn value(&self, point: &Point) -> f64 {
        point.weighted_sum(self.w1, self.w2)
    }
}

impl std::fmt::Display for WeightedSumQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min {} * z1 + {} * z2 s.t. {}{}",
            self.w1,
            self.w2,
            self.bounds,
            if self.allow_cutoff { " (cutoff)" } else { "" }
        )
    }
}

/// The result of one oracle call.
#[derive(Clone, Debug, PartialEq)]
pub enum OracleOutcome {
    /// An optimal point of the (possibly relaxed) subproblem.
    Optimal(Point),
    /// No solution beats the frontier point returned, which is optimal.
    Cutoff(Point),
    Infeasible,
    /// Any other solver status, e.g. numerical trouble or an internal limit.
    Unexpected(String),
}

impl OracleOutcome {
    /// The point of an `Optimal` or `Cutoff` outcome.
    #[inline]
    pub fn point(&self) -> Option<Point> {
        match self {
            OracleOutcome::Optimal(p) | OracleOutcome::Cutoff(p) => Some(*p),
            OracleOutcome::Infeasible | OracleOutcome::Unexpected(_) => None,
        }
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, OracleOutcome::Infeasible)
    }
}

/// A single-objective solver the bi-objective search is built on.
///
/// Implementations report every integral solution they encounter into the
/// `frontier` passed to the solve methods. `is_integer_solution` and
/// `decision_snapshot` describe the result of the most recent solve.
pub trait ScalarizationOracle {
    /// The name of the oracle, used in log output.
    fn name(&self) -> &str;

    /// The number of decision variables.
    fn num_variables(&self) -> usize;

    /// Minimizes `query.w1 * z1 + query.w2 * z2` inside `query.bounds`.
    fn solve_weighted_sum(&mut self, query: &WeightedSumQuery, frontier: &mut ParetoSet)
    -> OracleOutcome;

    /// Minimizes `objective`, then the other objective with `objective` held at
    /// its optimum. Both stages stay inside `bounds`.
    ///
    /// The default implementation issues two weighted-sum solves and falls back
    /// to the first stage's point if the second stage fails numerically.
    fn lexmin(
        &mut self,
        objective: Objective,
        bounds: ObjectiveBounds,
        allow_cutoff: bool,
        frontier: &mut ParetoSet,
    ) -> OracleOutcome {
        let (w1, w2) = objective.weights();
        let query = WeightedSumQuery::new(w1, w2, bounds).with_cutoff(allow_cutoff);
        let first = match self.solve_weighted_sum(&query, frontier) {
            OracleOutcome::Optimal(p) => p,
            other => return other,
        };

        let second_bounds = match objective {
            Objective::First => bounds.tightened(first.z1(), bounds.top()),
            Objective::Second => bounds.tightened(bounds.right(), first.z2()),
        };
        let (v1, v2) = objective.other().weights();
        let query = WeightedSumQuery::new(v1, v2, second_bounds);
        match self.solve_weighted_sum(&query, frontier) {
            OracleOutcome::Optimal(p) => OracleOutcome::Optimal(p),
            _ => OracleOutcome::Optimal(first),
        }
    }

    /// Records the solver's pool of alternative solutions of the last solve
    /// into `pool`. Oracles without a pool record nothing.
    fn harvest_solution_pool(&self, _pool: &mut ParetoSet) {}

    /// `true` if the last solve produced an integral assignment.
    fn is_integer_solution(&self) -> bool;

    /// The assignment behind the last solve's point.
    fn decision_snapshot(&self) -> DecisionSnapshot;

    /// The minimum difference between two attainable values of `objective`.
    fn minimum_objective_increment(&self, _objective: Objective) -> f64 {
        1.0
    }

    /// Outer bounds known to contain every non-dominated point.
    fn valid_bounds(&self) -> ObjectiveBounds {
        ObjectiveBounds::unbounded()
    }

    /// Sets a bound of `variable` and returns the value it replaced.
    fn set_variable_bound(&mut self, variable: VariableIndex, kind: BoundKind, value: f64) -> f64;

    /// Puts back a bound value returned by [`set_variable_bound`](Self::set_variable_bound).
    fn restore_variable_bound(&mut self, variable: VariableIndex, kind: BoundKind, previous: f64);

    fn add_constraint(&mut self, constraint: LinearConstraint) -> ConstraintId;

    fn remove_constraint(&mut self, id: ConstraintId);

    /// Externally assigned branching priority; larger is preferred.
    fn branch_priority(&self, _variable: VariableIndex) -> i32 {
        0
    }

    /// The `(low, up)` objective ranging of `variable` at the last solve, if
    /// the solver provides sensitivity information.
    fn objective_sensitivity(&self, _variable: VariableIndex) -> Option<(f64, f64)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_point() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(OracleOutcome::Optimal(p).point(), Some(p));
        assert_eq!(OracleOutcome::Cutoff(p).point(), Some(p));
        assert_eq!(OracleOutcome::Infeasible.point(), None);
        assert_eq!(OracleOutcome::Unexpected("numeric".into()).point(), None);
        assert!(OracleOutcome::Infeasible.is_infeasible());
    }

    #[test]
    fn test_query_value_and_display() {
        let q = WeightedSumQuery::new(2.0, 1.0, ObjectiveBounds::new(5.0, 6.0)).with_cutoff(true);
        assert_eq!(q.value(&Point::new(1.0, 3.0)), 5.0);
        assert_eq!(format!("{}", q), "min 2 * z1 + 1 * z2 s.t. [z1 <= 5 | z2 <= 6] (cutoff)");
    }
}
