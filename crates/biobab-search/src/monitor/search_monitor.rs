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

use crate::stats::SearchStatistics;
use biobab_core::math::point::Point;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Why a node produced no children.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PruneReason {
    /// The lower bound set is empty: the subproblem is infeasible or fully dominated.
    EmptyBoundSet,
    /// The lower bound set is a single integral point.
    IntegralLeaf,
    /// No brancher produced a branch.
    NoBranchingCandidate,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::EmptyBoundSet => write!(f, "EmptyBoundSet"),
            PruneReason::IntegralLeaf => write!(f, "IntegralLeaf"),
            PruneReason::NoBranchingCandidate => write!(f, "NoBranchingCandidate"),
        }
    }
}

/// Observes and controls a search.
///
/// `search_command` is polled at the start of every node and before every
/// oracle call, right after `on_step`.
pub trait SearchMonitor {
    fn name(&self) -> &str;

    /// Called once before the search loop begins.
    fn on_enter_search(&mut self, algorithm: &str);

    /// Called when the search is finished (either exhausted or stopped).
    fn on_exit_search(&mut self, statistics: &SearchStatistics);

    /// Called when a node is taken from the queue.
    fn on_node(
        &mut self,
        _depth: usize,
        _queue_len: usize,
        _frontier_len: usize,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &SearchStatistics) {}

    /// Called after a node pushed `children` child nodes.
    fn on_branch(&mut self, _children: usize, _statistics: &SearchStatistics) {}

    fn on_oracle_call(&mut self, _statistics: &SearchStatistics) {}

    /// Called for every point confirmed as part of the final frontier.
    fn on_solution_found(&mut self, _point: &Point, _statistics: &SearchStatistics) {}

    /// Called at every suspension point, before `search_command`.
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand;
}

/// Lets a caller keep ownership of a monitor while a search uses it, e.g.
/// inside a [`CompositeMonitor`](crate::monitor::composite::CompositeMonitor).
impl<M> SearchMonitor for &mut M
where
    M: SearchMonitor + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, algorithm: &str) {
        (**self).on_enter_search(algorithm);
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        (**self).on_exit_search(statistics);
    }

    fn on_node(&mut self, depth: usize, queue_len: usize, frontier_len: usize, statistics: &SearchStatistics) {
        (**self).on_node(depth, queue_len, frontier_len, statistics);
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &SearchStatistics) {
        (**self).on_prune(reason, statistics);
    }

    fn on_branch(&mut self, children: usize, statistics: &SearchStatistics) {
        (**self).on_branch(children, statistics);
    }

    fn on_oracle_call(&mut self, statistics: &SearchStatistics) {
        (**self).on_oracle_call(statistics);
    }

    fn on_solution_found(&mut self, point: &Point, statistics: &SearchStatistics) {
        (**self).on_solution_found(point, statistics);
    }

    fn on_step(&mut self) {
        (**self).on_step();
    }

    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

impl std::fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
