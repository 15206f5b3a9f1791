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

//! # Tree Search
//!
//! The branch-and-bound engine shared by every algorithm. Each node popped
//! from the queue is bounded with its decisions applied to the oracle; the
//! decisions are reverted before the node is branched on. A bound set that is
//! neither empty nor a single integral point is split at its discontinuities
//! (when objective-space branching is on) and every piece is handed to the
//! brancher chain. The first brancher producing decisions for a piece creates
//! one child per decision, restricted to the box of that piece.
//!
//! Nested searches (`wrapped`) run inside another algorithm: they skip the
//! start and end logging and do not report nodes to the monitor. Interruption
//! is propagated either way; the outermost caller decides what to do with it.

use crate::{
    bound::{bounder::Bounder, lower_bound_set::LowerBoundSet},
    branching::brancher::Brancher,
    node::Node,
    queue::NodeQueue,
    trail::DecisionTrail,
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::{ExplorationStrategy, SearchConfig},
    context::SearchContext,
    error::SearchInterrupted,
    monitor::search_monitor::{PruneReason, SearchMonitor},
};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub struct TreeSearch {
    strategy: ExplorationStrategy,
    branchers: Vec<Brancher>,
    bounder: Bounder,
    wrapped: bool,
}

impl TreeSearch {
    pub fn new(strategy: ExplorationStrategy, branchers: Vec<Brancher>, bounder: Bounder) -> Self {
        Self {
            strategy,
            branchers,
            bounder,
            wrapped: false,
        }
    }

    /// The bi-objective branch-and-bound configured by `config`, branching
    /// with the chain its `branching` rule selects.
    pub fn biobab(config: &SearchConfig) -> Self {
        Self::new(config.strategy, Brancher::chain_for(config.branching), Bounder::BiObjective)
    }

    /// Marks the search as nested inside another algorithm.
    #[inline]
    pub fn wrapped(mut self, wrapped: bool) -> Self {
        self.wrapped = wrapped;
        self
    }

    #[inline]
    pub fn strategy(&self) -> ExplorationStrategy {
        self.strategy
    }

    #[inline]
    pub fn branchers(&self) -> &[Brancher] {
        &self.branchers
    }

    #[inline]
    pub fn bounder(&self) -> Bounder {
        self.bounder
    }

    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Explores the tree below `root`, recording every integral point found
    /// into `frontier`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchInterrupted`] as soon as the monitor asks to terminate.
    /// `frontier` keeps everything found up to that point and the oracle is
    /// left without any of the search's decisions applied.
    pub fn run<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        root: Node,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let config = ctx.config();
        let mut queue = NodeQueue::new(self.strategy);
        let mut trail = DecisionTrail::new();
        queue.push(root);

        if !self.wrapped {
            info!(strategy = ?self.strategy, bounder = %self.bounder, "starting bi-objective branch-and-bound");
        }

        while let Some(node) = queue.pop() {
            ctx.checkpoint()?;
            ctx.record_node(node.depth(), queue.len(), frontier.len(), !self.wrapped);
            debug!(depth = node.depth(), queue = queue.len(), frontier = frontier.len(), %node, "processing node");

            let lb = {
                let mut scope = trail.apply_scoped(ctx, node.decisions(), node.bounds());
                let bounds = scope.bounds();
                self.bounder.bound(&mut *scope, bounds, frontier)?
            };
            debug!(segments = lb.len(), "bound set computed");

            if lb.is_empty() {
                ctx.record_prune(PruneReason::EmptyBoundSet);
                continue;
            }
            if lb.is_leaf() {
                ctx.record_prune(PruneReason::IntegralLeaf);
                continue;
            }

            let pieces = if config.objective_space_branching {
                lb.split(config.lb_max_gap)
            } else {
                vec![lb]
            };
            if pieces.len() > 1 {
                ctx.record_split(node.depth(), pieces.len());
            }

            let children = self.branch_pieces(ctx, &node, &pieces, &mut queue);
            if children == 0 {
                ctx.record_prune(PruneReason::NoBranchingCandidate);
            } else {
                ctx.record_branching(children);
            }
        }

        if !self.wrapped {
            info!(
                splits = ?ctx.statistics().split_log,
                "bi-objective branch-and-bound is over"
            );
        }
        Ok(())
    }

    /// Pushes the children of `node` for every piece and returns their number.
    fn branch_pieces<O, M>(
        &self,
        ctx: &SearchContext<'_, O, M>,
        node: &Node,
        pieces: &[LowerBoundSet],
        queue: &mut NodeQueue<Node>,
    ) -> usize
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let mut children = 0;
        for piece in pieces {
            let Some(region) = piece.bounds() else {
                continue;
            };
            let bounds = node.bounds().intersect(&region);
            let branches = self
                .branchers
                .iter()
                .map(|brancher| brancher.branch(piece, ctx.oracle(), ctx.config()))
                .find(|branches| !branches.is_empty());
            if let Some(branches) = branches {
                children += branches.len();
                queue.extend(branches.into_iter().map(|decision| node.child(bounds, decision)));
            }
        }
        children
    }
}

impl std::fmt::Display for TreeSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearch({:?}, {}, [", self.strategy, self.bounder)?;
        for (i, brancher) in self.branchers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", brancher)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_core::math::bounds::ObjectiveBounds;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::monitor::{interrupt::InterruptMonitor, no_op::NoOperationMonitor};
    use std::sync::atomic::AtomicBool;

    fn coords(frontier: &ParetoSet) -> Vec<(f64, f64)> {
        frontier.points().map(|p| (p.z1(), p.z2())).collect()
    }

    fn solve(points: &[(f64, f64)], config: &SearchConfig) -> (Vec<(f64, f64)>, PointSetOracle) {
        let mut oracle = PointSetOracle::from_points(points, OracleMode::Relaxed);
        let mut monitor = NoOperationMonitor::new();
        let found = {
            let mut ctx = SearchContext::new(&mut oracle, &mut monitor, config);
            let mut frontier = ctx.new_frontier();
            TreeSearch::biobab(config)
                .run(&mut ctx, Node::root(ObjectiveBounds::unbounded()), &mut frontier)
                .unwrap();
            coords(&frontier)
        };
        (found, oracle)
    }

    #[test]
    fn test_convex_frontier_needs_no_branching() {
        let (frontier, _) = solve(&[(1.0, 8.0), (3.0, 5.0), (6.0, 2.0)], &SearchConfig::default());
        assert_eq!(frontier, vec![(1.0, 8.0), (3.0, 5.0), (6.0, 2.0)]);
    }

    #[test]
    fn test_unsupported_point_is_found_by_branching() {
        let points = [(0.0, 10.0), (6.0, 6.0), (10.0, 0.0), (8.0, 9.0)];
        for strategy in [
            ExplorationStrategy::BreadthFirst,
            ExplorationStrategy::DepthFirst,
            ExplorationStrategy::BestFirst,
        ] {
            let config = SearchConfig::default().with_strategy(strategy);
            let (frontier, oracle) = solve(&points, &config);
            assert_eq!(
                frontier,
                vec![(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)],
                "{:?} search missed a point",
                strategy
            );
            assert_eq!(oracle.num_constraints(), 0, "decisions leaked into the oracle");
        }
    }

    #[test]
    fn test_interrupted_search_restores_the_oracle() {
        let flag = AtomicBool::new(true);
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)], OracleMode::Relaxed);
        let mut monitor = InterruptMonitor::new(&flag);
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();

        let result = TreeSearch::biobab(&config).run(&mut ctx, Node::root(ObjectiveBounds::unbounded()), &mut frontier);
        assert!(result.is_err());
        assert_eq!(ctx.statistics().nodes_explored, 0);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_statistics_count_nodes_and_prunings() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)], OracleMode::Relaxed);
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        TreeSearch::biobab(&config)
            .run(&mut ctx, Node::root(ObjectiveBounds::unbounded()), &mut frontier)
            .unwrap();

        let stats = ctx.statistics();
        assert!(stats.nodes_explored > 1, "the root must be branched on");
        assert_eq!(
            stats.nodes_explored,
            stats.branches_created + 1,
            "every created child is explored"
        );
        assert!(stats.oracle_calls >= 2 * stats.nodes_explored - stats.prunings_infeasible);
    }

    #[test]
    fn test_display() {
        let search = TreeSearch::new(
            ExplorationStrategy::DepthFirst,
            vec![Brancher::ObjectiveSpace],
            Bounder::BiObjective,
        );
        assert_eq!(format!("{}", search), "TreeSearch(DepthFirst, BiObjective, [ObjectiveSpace])");
        assert!(!search.is_wrapped());
        assert!(search.wrapped(true).is_wrapped());
    }
}
