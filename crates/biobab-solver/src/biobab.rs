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

//! # Bi-Objective Branch-and-Bound
//!
//! BIOBAB explores a tree over the decision variables. Each node is bounded
//! by a lower bound set in objective space, filtered against the frontier;
//! what survives is split at its discontinuities and branched on. The search
//! starts from the configured outer bounds, falling back to the ones the
//! oracle advertises.

use crate::algorithm::FrontierAlgorithm;
use biobab_bnb::{
    bound::{bounder::Bounder, lower_bound_set::LowerBoundSet},
    node::Node,
    tree_search::TreeSearch,
};
use biobab_core::math::bounds::ObjectiveBounds;
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::SearchConfig, context::SearchContext, error::SearchInterrupted,
    monitor::search_monitor::SearchMonitor,
};
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub struct Biobab {
    search: TreeSearch,
}

impl Biobab {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            search: TreeSearch::biobab(config),
        }
    }

    /// Runs a custom tree search instead of the default brancher chain.
    pub fn with_tree_search(search: TreeSearch) -> Self {
        Self { search }
    }

    #[inline]
    pub fn tree_search(&self) -> &TreeSearch {
        &self.search
    }

    /// The lower bound set of the root node, filtered against `frontier`,
    /// without any branching.
    pub fn root_bound<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        frontier: &mut ParetoSet,
    ) -> Result<LowerBoundSet, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let bounds = root_bounds(ctx);
        let lb = Bounder::BiObjective.bound(ctx, bounds, frontier)?;
        info!(segments = lb.len(), %lb, "root lower bound set");
        Ok(lb)
    }
}

impl FrontierAlgorithm for Biobab {
    fn name(&self) -> &str {
        "BIOBAB"
    }

    fn run<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let bounds = root_bounds(ctx);
        self.search.run(ctx, Node::root(bounds), frontier)
    }
}

fn root_bounds<O, M>(ctx: &SearchContext<'_, O, M>) -> ObjectiveBounds
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    ctx.config().initial_bounds(ctx.oracle().valid_bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_core::math::point::Point;
    use biobab_model::point_set::{OracleMode, PointSetOracle, PointSetOracleBuilder};
    use biobab_search::monitor::no_op::NoOperationMonitor;

    #[test]
    fn test_run_finds_supported_and_unsupported_points() {
        let mut oracle = PointSetOracle::from_points(
            &[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0), (8.0, 9.0)],
            OracleMode::Relaxed,
        );
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        let biobab = Biobab::new(&config);
        assert_eq!(biobab.name(), "BIOBAB");
        biobab.run(&mut ctx, &mut frontier).unwrap();

        assert_eq!(
            frontier.points().collect::<Vec<_>>(),
            vec![Point::new(0.0, 10.0), Point::new(6.0, 6.0), Point::new(10.0, 0.0)]
        );
    }

    #[test]
    fn test_configured_bounds_override_the_oracle_bounds() {
        let mut oracle = PointSetOracleBuilder::new(3)
            .mode(OracleMode::Relaxed)
            .valid_bounds(ObjectiveBounds::new(100.0, 100.0))
            .add_candidate(Point::new(1.0, 8.0), vec![1.0, 0.0, 0.0])
            .add_candidate(Point::new(3.0, 5.0), vec![0.0, 1.0, 0.0])
            .add_candidate(Point::new(6.0, 2.0), vec![0.0, 0.0, 1.0])
            .build();
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default().with_bounds(f64::INFINITY, 6.0);
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        Biobab::new(&config).run(&mut ctx, &mut frontier).unwrap();
        assert_eq!(
            frontier.points().collect::<Vec<_>>(),
            vec![Point::new(3.0, 5.0), Point::new(6.0, 2.0)],
            "(1, 8) lies above the configured top bound"
        );
    }

    #[test]
    fn test_root_bound_does_not_branch() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)], OracleMode::Relaxed);
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        let lb = Biobab::new(&config).root_bound(&mut ctx, &mut frontier).unwrap();
        assert!(!lb.is_empty());
        assert!(!lb.is_leaf(), "the relaxation hides (6, 6) behind a fractional segment");
        assert_eq!(ctx.statistics().nodes_explored, 0);
        assert!(frontier.contains_point(&Point::new(0.0, 10.0)));
        assert!(frontier.contains_point(&Point::new(10.0, 0.0)));
    }
}
