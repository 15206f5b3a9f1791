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

//! # Single-Objective Solves over Relaxations
//!
//! When the oracle only solves linear relaxations, an integral weighted-sum
//! optimum needs its own branch-and-bound. [`WeightedSumSolver`] runs a nested
//! [`TreeSearch`] whose bound is a single weighted-sum point and whose nodes
//! are cut off as soon as an integral solution at least as good is known.
//! [`LexminSolver`] builds lexicographic minima on top of it.

use crate::{
    bound::bounder::Bounder, branching::brancher::Brancher, node::Node, tree_search::TreeSearch,
};
use biobab_core::math::{
    bounds::ObjectiveBounds,
    point::{Objective, Point},
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::{ExplorationStrategy, LexminMethod},
    context::SearchContext,
    error::SearchInterrupted,
    monitor::search_monitor::SearchMonitor,
};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedSumSolver {
    strategy: ExplorationStrategy,
}

impl WeightedSumSolver {
    #[inline]
    pub fn new(strategy: ExplorationStrategy) -> Self {
        Self { strategy }
    }

    /// The best integral point for `w1 * z1 + w2 * z2` inside `bounds`, or
    /// `None` if the box holds no integral solution.
    ///
    /// Every integral solution met on the way is merged into `frontier`, also
    /// when the search is interrupted.
    pub fn solve<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        w1: f64,
        w2: f64,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<Option<Point>, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        trace!(w1, w2, %bounds, "optimising weighted sum");
        let search = TreeSearch::new(
            self.strategy,
            Brancher::weighted_sum_chain(),
            Bounder::WeightedSum { w1, w2 },
        )
        .wrapped(true);

        let mut local = frontier.empty_like();
        let outcome = search.run(ctx, Node::root(bounds), &mut local);

        let best = local
            .points()
            .filter(|p| bounds.contains(p))
            .min_by(|a, b| a.weighted_sum(w1, w2).total_cmp(&b.weighted_sum(w1, w2)));
        frontier.merge(&local);
        outcome?;

        trace!(best = ?best, "weighted sum optimised");
        Ok(best)
    }
}

/// Lexicographic minima through [`WeightedSumSolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexminSolver {
    weighted_sum: WeightedSumSolver,
}

impl LexminSolver {
    #[inline]
    pub fn new(strategy: ExplorationStrategy) -> Self {
        Self {
            weighted_sum: WeightedSumSolver::new(strategy),
        }
    }

    #[inline]
    pub fn weighted_sum_solver(&self) -> &WeightedSumSolver {
        &self.weighted_sum
    }

    /// The integral lexicographic minimum of `objective` inside `bounds`,
    /// computed with the configured [`LexminMethod`].
    pub fn solve<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        objective: Objective,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<Option<Point>, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        match ctx.config().lexmin_method {
            LexminMethod::Lexicographic => self.solve_lexicographic(ctx, objective, bounds, frontier),
            LexminMethod::WeightedSum { epsilon } => {
                let (w1, w2) = match objective {
                    Objective::First => (1.0, epsilon),
                    Objective::Second => (epsilon, 1.0),
                };
                self.weighted_sum.solve(ctx, w1, w2, bounds, frontier)
            }
        }
    }

    fn solve_lexicographic<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        objective: Objective,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<Option<Point>, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let (w1, w2) = objective.weights();
        let Some(first) = self.weighted_sum.solve(ctx, w1, w2, bounds, frontier)? else {
            return Ok(None);
        };
        let second_bounds = match objective {
            Objective::First => ObjectiveBounds::new(first.z1(), f64::INFINITY),
            Objective::Second => ObjectiveBounds::new(f64::INFINITY, first.z2()),
        };
        self.weighted_sum.solve(ctx, w2, w1, second_bounds, frontier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::{config::SearchConfig, monitor::no_op::NoOperationMonitor};

    #[test]
    fn test_fractional_relaxation_optimum_is_branched_away() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (10.0, 0.0), (6.0, 6.0)], OracleMode::Relaxed);
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();

        let solver = WeightedSumSolver::new(ExplorationStrategy::BreadthFirst);
        let best = solver
            .solve(&mut ctx, 1.0, 2.0, ObjectiveBounds::new(5.0, f64::INFINITY), &mut frontier)
            .unwrap();

        assert_eq!(best, Some(Point::new(0.0, 10.0)));
        assert!(
            ctx.statistics().oracle_calls >= 3,
            "the relaxed optimum (5, 5) must be branched on"
        );
        assert_eq!(frontier.points().collect::<Vec<_>>(), vec![Point::new(0.0, 10.0)]);
        assert_eq!(ctx.oracle().num_constraints(), 0);
    }

    #[test]
    fn test_empty_box_has_no_solution() {
        let mut oracle = PointSetOracle::from_points(&[(3.0, 3.0)], OracleMode::Relaxed);
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();

        let best = WeightedSumSolver::new(ExplorationStrategy::DepthFirst)
            .solve(&mut ctx, 1.0, 1.0, ObjectiveBounds::new(2.0, 2.0), &mut frontier)
            .unwrap();
        assert_eq!(best, None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_lexmin_methods_agree_on_the_extreme_points() {
        let points = [(1.0, 9.0), (1.0, 6.0), (3.0, 5.0), (7.0, 1.0)];
        for method in [LexminMethod::Lexicographic, LexminMethod::WeightedSum { epsilon: 1e-3 }] {
            let mut oracle = PointSetOracle::from_points(&points, OracleMode::Relaxed);
            let mut monitor = NoOperationMonitor::new();
            let config = SearchConfig::default().with_lexmin_method(method);
            let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
            let mut frontier = ParetoSet::new();
            let solver = LexminSolver::new(config.strategy);

            let first = solver
                .solve(&mut ctx, Objective::First, ObjectiveBounds::unbounded(), &mut frontier)
                .unwrap();
            let second = solver
                .solve(&mut ctx, Objective::Second, ObjectiveBounds::unbounded(), &mut frontier)
                .unwrap();
            assert_eq!(first, Some(Point::new(1.0, 6.0)), "{:?}", method);
            assert_eq!(second, Some(Point::new(7.0, 1.0)), "{:?}", method);
        }
    }
}
