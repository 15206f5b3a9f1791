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

//! # Search Context
//!
//! [`SearchContext`] bundles what every part of a search needs: the oracle,
//! the monitor, the configuration, the objective increments and the running
//! statistics. All oracle calls go through it, which makes it the single place
//! where
//!
//! - the monitor is polled before each call (a suspension point),
//! - calls are counted,
//! - points that entered the frontier are reported to the monitor,
//! - unexpected oracle statuses are logged and turned into "no point".

use crate::{
    config::{LexminMethod, SearchConfig},
    error::SearchInterrupted,
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use biobab_core::{
    math::{
        bounds::ObjectiveBounds,
        point::{Objective, Point},
    },
    num::increments::ObjectiveIncrements,
};
use biobab_model::{
    oracle::{OracleOutcome, ScalarizationOracle, WeightedSumQuery},
    pareto::ParetoSet,
    snapshot::DecisionSnapshot,
};
use tracing::warn;

pub struct SearchContext<'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    oracle: &'a mut O,
    monitor: &'a mut M,
    config: &'a SearchConfig,
    increments: ObjectiveIncrements,
    statistics: SearchStatistics,
}

impl<'a, O, M> SearchContext<'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    /// Creates a context. Objective increments are queried from the oracle.
    pub fn new(oracle: &'a mut O, monitor: &'a mut M, config: &'a SearchConfig) -> Self {
        let increments = ObjectiveIncrements::new(
            oracle.minimum_objective_increment(Objective::First),
            oracle.minimum_objective_increment(Objective::Second),
        );
        Self {
            oracle,
            monitor,
            config,
            increments,
            statistics: SearchStatistics::default(),
        }
    }

    #[inline]
    pub fn oracle(&self) -> &O {
        self.oracle
    }

    #[inline]
    pub fn oracle_mut(&mut self) -> &mut O {
        self.oracle
    }

    #[inline]
    pub fn monitor_mut(&mut self) -> &mut M {
        self.monitor
    }

    #[inline]
    pub fn config(&self) -> &'a SearchConfig {
        self.config
    }

    #[inline]
    pub fn increments(&self) -> &ObjectiveIncrements {
        &self.increments
    }

    /// Increments used for dominance, if integer dominance is enabled.
    #[inline]
    pub fn integrality(&self) -> Option<&ObjectiveIncrements> {
        self.config.integer_dominance.then_some(&self.increments)
    }

    /// Increments used for segment tightening, if enabled.
    #[inline]
    pub fn tightening(&self) -> Option<&ObjectiveIncrements> {
        self.config.segment_tightening.then_some(&self.increments)
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn statistics_mut(&mut self) -> &mut SearchStatistics {
        &mut self.statistics
    }

    #[inline]
    pub fn into_statistics(self) -> SearchStatistics {
        self.statistics
    }

    /// A fresh frontier with the dominance rule of this search.
    #[inline]
    pub fn new_frontier(&self) -> ParetoSet {
        match self.integrality() {
            Some(increments) => ParetoSet::with_integer_dominance(*increments),
            None => ParetoSet::new(),
        }
    }

    /// A suspension point: steps the monitor and asks whether to continue.
    #[inline]
    pub fn checkpoint(&mut self) -> Result<(), SearchInterrupted> {
        self.monitor.on_step();
        match self.monitor.search_command() {
            SearchCommand::Continue => Ok(()),
            SearchCommand::Terminate(reason) => Err(SearchInterrupted::new(reason)),
        }
    }

    /// Minimizes `w1 * z1 + w2 * z2` inside `bounds`. `allow_cutoff` is
    /// combined with the configured cutoff switch.
    pub fn weighted_sum(
        &mut self,
        w1: f64,
        w2: f64,
        bounds: ObjectiveBounds,
        allow_cutoff: bool,
        frontier: &mut ParetoSet,
    ) -> Result<Option<Point>, SearchInterrupted> {
        self.checkpoint()?;
        let query =
            WeightedSumQuery::new(w1, w2, bounds).with_cutoff(allow_cutoff && self.config.mip_cutoff);
        let revision = frontier.revision();
        let outcome = self.oracle.solve_weighted_sum(&query, frontier);
        Ok(self.finish_call(outcome, &query, frontier, revision))
    }

    /// The lexicographic minimum of `objective` inside `bounds`, obtained with
    /// the configured method.
    pub fn lexmin(
        &mut self,
        objective: Objective,
        bounds: ObjectiveBounds,
        allow_cutoff: bool,
        frontier: &mut ParetoSet,
    ) -> Result<Option<Point>, SearchInterrupted> {
        match self.config.lexmin_method {
            LexminMethod::Lexicographic => {
                self.checkpoint()?;
                let allow_cutoff = allow_cutoff && self.config.mip_cutoff;
                let revision = frontier.revision();
                let outcome = self.oracle.lexmin(objective, bounds, allow_cutoff, frontier);
                let (w1, w2) = objective.weights();
                let query = WeightedSumQuery::new(w1, w2, bounds).with_cutoff(allow_cutoff);
                Ok(self.finish_call(outcome, &query, frontier, revision))
            }
            LexminMethod::WeightedSum { epsilon } => {
                let (w1, w2) = match objective {
                    Objective::First => (1.0, epsilon),
                    Objective::Second => (epsilon, 1.0),
                };
                self.weighted_sum(w1, w2, bounds, allow_cutoff, frontier)
            }
        }
    }

    /// Reports a point that entered a frontier to the statistics and the
    /// monitor. Oracle results recorded into the frontier are reported
    /// automatically.
    #[inline]
    pub fn report_solution(&mut self, point: &Point) {
        self.statistics.on_solution_found();
        self.monitor.on_solution_found(point, &self.statistics);
    }

    /// `true` if the oracle's last solve was integral.
    #[inline]
    pub fn is_integer_solution(&self) -> bool {
        self.oracle.is_integer_solution()
    }

    /// The assignment behind the oracle's last solve.
    #[inline]
    pub fn decision_snapshot(&self) -> DecisionSnapshot {
        self.oracle.decision_snapshot()
    }

    /// Announces the start of `algorithm` to the monitor.
    #[inline]
    pub fn enter_search(&mut self, algorithm: &str) {
        self.monitor.on_enter_search(algorithm);
    }

    /// Hands the final statistics to the monitor.
    #[inline]
    pub fn exit_search(&mut self) {
        self.monitor.on_exit_search(&self.statistics);
    }

    /// Counts a node taken from the queue. Only outer searches `notify` the
    /// monitor; nested searches are counted silently.
    pub fn record_node(&mut self, depth: usize, queue_len: usize, frontier_len: usize, notify: bool) {
        self.statistics.on_node_explored(depth);
        if notify {
            self.monitor
                .on_node(depth, queue_len, frontier_len, &self.statistics);
        }
    }

    /// Counts a node that produced no children.
    pub fn record_prune(&mut self, reason: PruneReason) {
        match reason {
            PruneReason::EmptyBoundSet => self.statistics.on_pruning_infeasible(),
            PruneReason::IntegralLeaf => self.statistics.on_leaf(),
            PruneReason::NoBranchingCandidate => {}
        }
        self.monitor.on_prune(reason, &self.statistics);
    }

    /// Counts the `children` created by branching one node.
    pub fn record_branching(&mut self, children: usize) {
        self.statistics.on_branches_created(children);
        self.monitor.on_branch(children, &self.statistics);
    }

    /// Records that a bound set at `depth` was split into `pieces`.
    #[inline]
    pub fn record_split(&mut self, depth: usize, pieces: usize) {
        self.statistics.on_objective_space_split(depth, pieces);
    }

    fn finish_call(
        &mut self,
        outcome: OracleOutcome,
        query: &WeightedSumQuery,
        frontier: &ParetoSet,
        revision: u64,
    ) -> Option<Point> {
        self.statistics.on_oracle_call();
        self.monitor.on_oracle_call(&self.statistics);
        match outcome {
            OracleOutcome::Optimal(point) => {
                if frontier.revision() != revision && frontier.contains_point(&point) {
                    self.report_solution(&point);
                }
                Some(point)
            }
            OracleOutcome::Cutoff(point) => Some(point),
            OracleOutcome::Infeasible => None,
            OracleOutcome::Unexpected(status) => {
                self.statistics.on_unexpected_status();
                warn!(
                    oracle = self.oracle.name(),
                    %query,
                    %status,
                    "unexpected oracle status, treating the call as infeasible"
                );
                None
            }
        }
    }
}

impl<'a, O, M> std::fmt::Debug for SearchContext<'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("oracle", &self.oracle.name())
            .field("monitor", &self.monitor.name())
            .field("increments", &self.increments)
            .field("statistics", &self.statistics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{interrupt::InterruptMonitor, no_op::NoOperationMonitor};
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use std::sync::atomic::AtomicBool;

    fn oracle() -> PointSetOracle {
        PointSetOracle::from_points(&[(1.0, 8.0), (3.0, 5.0), (6.0, 2.0)], OracleMode::Exact)
    }

    #[test]
    fn test_weighted_sum_counts_calls_and_returns_points() {
        let mut oracle = oracle();
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        let p = ctx
            .weighted_sum(1.0, 1.0, ObjectiveBounds::unbounded(), false, &mut frontier)
            .unwrap();
        assert_eq!(p, Some(Point::new(3.0, 5.0)));
        let none = ctx
            .weighted_sum(1.0, 1.0, ObjectiveBounds::new(0.0, 0.0), false, &mut frontier)
            .unwrap();
        assert_eq!(none, None);
        assert_eq!(ctx.statistics().oracle_calls, 2);
        assert_eq!(ctx.statistics().solutions_found, 1);
        assert!(!ctx.is_integer_solution());
    }

    #[test]
    fn test_lexmin_with_both_methods() {
        let mut oracle = PointSetOracle::from_points(&[(1.0, 9.0), (1.0, 6.0), (3.0, 5.0)], OracleMode::Exact);
        let mut monitor = NoOperationMonitor::new();
        let lexicographic = SearchConfig::default();
        let mut frontier = ParetoSet::new();
        {
            let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &lexicographic);
            let p = ctx
                .lexmin(Objective::First, ObjectiveBounds::unbounded(), false, &mut frontier)
                .unwrap();
            assert_eq!(p, Some(Point::new(1.0, 6.0)));
        }
        let skewed = SearchConfig::default().with_lexmin_method(LexminMethod::WeightedSum { epsilon: 1e-3 });
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &skewed);
        let p = ctx
            .lexmin(Objective::Second, ObjectiveBounds::unbounded(), false, &mut frontier)
            .unwrap();
        assert_eq!(p, Some(Point::new(3.0, 5.0)));
    }

    #[test]
    fn test_terminate_command_interrupts_before_the_oracle_call() {
        let flag = AtomicBool::new(true);
        let mut oracle = oracle();
        let mut monitor = InterruptMonitor::new(&flag);
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();
        let err = ctx
            .weighted_sum(1.0, 1.0, ObjectiveBounds::unbounded(), false, &mut frontier)
            .unwrap_err();
        assert_eq!(err.reason, "Interrupt signal received");
        assert_eq!(ctx.statistics().oracle_calls, 0);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_tree_events_update_statistics() {
        let mut oracle = oracle();
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);

        ctx.record_node(0, 0, 0, true);
        ctx.record_node(3, 4, 1, false);
        ctx.record_prune(PruneReason::EmptyBoundSet);
        ctx.record_prune(PruneReason::IntegralLeaf);
        ctx.record_prune(PruneReason::NoBranchingCandidate);
        ctx.record_branching(2);
        ctx.record_split(1, 3);

        let stats = ctx.into_statistics();
        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.leaves, 1);
        assert_eq!(stats.branches_created, 2);
        assert_eq!(stats.split_log, vec![(1, 3)]);
    }

    #[test]
    fn test_frontier_rule_follows_integer_dominance_switch() {
        let mut oracle = oracle();
        let mut monitor = NoOperationMonitor::new();
        let config = SearchConfig::default();
        let ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        assert!(ctx.new_frontier().integrality().is_some());
        assert!(ctx.tightening().is_some());

        let mut oracle = self::oracle();
        let plain = SearchConfig {
            integer_dominance: false,
            ..SearchConfig::default()
        };
        let ctx = SearchContext::new(&mut oracle, &mut monitor, &plain);
        assert!(ctx.new_frontier().integrality().is_none());
    }
}
