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

//! Single-objective problems posed by the top-level algorithms.
//!
//! The epsilon-constraint and balanced box methods need integral lexicographic
//! minima and weighted-sum optima. An oracle solving integer programs delivers
//! them directly. An oracle solving relaxations needs a nested tree search per
//! query, which [`Scalarizer::Relaxed`] runs through the solvers of
//! `biobab-bnb`.

use biobab_bnb::weighted_sum::LexminSolver;
use biobab_core::math::{
    bounds::ObjectiveBounds,
    point::{Objective, Point},
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::SearchConfig, context::SearchContext, error::SearchInterrupted,
    monitor::search_monitor::SearchMonitor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalarizer {
    /// The oracle answers with integral optima.
    Direct,
    /// The oracle answers with relaxed optima; integral ones are searched for.
    Relaxed(LexminSolver),
}

impl Scalarizer {
    /// Picks the mode matching `config.use_linear_relaxation`.
    pub fn from_config(config: &SearchConfig) -> Self {
        if config.use_linear_relaxation {
            Scalarizer::Relaxed(LexminSolver::new(config.strategy))
        } else {
            Scalarizer::Direct
        }
    }

    #[inline]
    pub fn is_relaxed(&self) -> bool {
        matches!(self, Scalarizer::Relaxed(_))
    }

    /// The integral lexicographic minimum of `objective` inside `bounds`.
    ///
    /// Direct queries never cut off against the frontier: the callers build
    /// their geometry from the exact returned point.
    pub fn lexmin<O, M>(
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
        match self {
            Scalarizer::Direct => ctx.lexmin(objective, bounds, false, frontier),
            Scalarizer::Relaxed(lexmin) => lexmin.solve(ctx, objective, bounds, frontier),
        }
    }

    /// The integral minimum of `w1 * z1 + w2 * z2` inside `bounds`.
    pub fn weighted_sum<O, M>(
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
        match self {
            Scalarizer::Direct => ctx.weighted_sum(w1, w2, bounds, false, frontier),
            Scalarizer::Relaxed(lexmin) => lexmin
                .weighted_sum_solver()
                .solve(ctx, w1, w2, bounds, frontier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::monitor::no_op::NoOperationMonitor;

    const POINTS: [(f64, f64); 4] = [(1.0, 8.0), (3.0, 5.0), (6.0, 2.0), (7.0, 7.0)];

    #[test]
    fn test_mode_follows_the_relaxation_switch() {
        let relaxed = SearchConfig::default();
        assert!(Scalarizer::from_config(&relaxed).is_relaxed());
        let direct = SearchConfig::default().with_linear_relaxation(false);
        assert_eq!(Scalarizer::from_config(&direct), Scalarizer::Direct);
    }

    #[test]
    fn test_both_modes_return_the_same_integral_optima() {
        for (mode, linear_relaxation) in [(OracleMode::Exact, false), (OracleMode::Relaxed, true)] {
            let mut oracle = PointSetOracle::from_points(&POINTS, mode);
            let mut monitor = NoOperationMonitor::new();
            let config = SearchConfig::default().with_linear_relaxation(linear_relaxation);
            let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
            let mut frontier = ParetoSet::new();
            let scalarizer = Scalarizer::from_config(&config);

            let lexmin = scalarizer
                .lexmin(&mut ctx, Objective::First, ObjectiveBounds::new(f64::INFINITY, 7.0), &mut frontier)
                .unwrap();
            assert_eq!(lexmin, Some(Point::new(3.0, 5.0)), "lexmin in {:?} mode", mode);

            let weighted = scalarizer
                .weighted_sum(&mut ctx, 1.0, 1.0, ObjectiveBounds::new(2.0, f64::INFINITY), &mut frontier)
                .unwrap();
            assert_eq!(weighted, Some(Point::new(1.0, 8.0)), "weighted sum in {:?} mode", mode);
            assert!(frontier.contains_point(&Point::new(3.0, 5.0)));
        }
    }
}
