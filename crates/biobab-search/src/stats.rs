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

use std::time::Duration;

/// Counters collected during a search.
///
/// All counters saturate instead of overflowing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Total nodes taken from the queue.
    pub nodes_explored: u64,
    /// Oracle calls issued, nested single-objective searches included.
    pub oracle_calls: u64,
    /// Oracle calls that ended in a status other than optimal, cutoff or infeasible.
    pub unexpected_oracle_statuses: u64,
    /// Nodes whose lower bound set was empty.
    pub prunings_infeasible: u64,
    /// Nodes whose lower bound set was a single integral point.
    pub leaves: u64,
    /// Child nodes created by branching.
    pub branches_created: u64,
    /// Lower bound sets split at discontinuities.
    pub objective_space_splits: u64,
    /// `(depth, pieces)` of every objective-space split.
    pub split_log: Vec<(usize, usize)>,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Points reported as confirmed non-dominated.
    pub solutions_found: u64,
    /// Rectangles processed by the balanced box method.
    pub rectangles_explored: u64,
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_oracle_call(&mut self) {
        self.oracle_calls = self.oracle_calls.saturating_add(1);
    }

    #[inline]
    pub fn on_unexpected_status(&mut self) {
        self.unexpected_oracle_statuses = self.unexpected_oracle_statuses.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf(&mut self) {
        self.leaves = self.leaves.saturating_add(1);
    }

    #[inline]
    pub fn on_branches_created(&mut self, count: usize) {
        self.branches_created = self.branches_created.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_objective_space_split(&mut self, depth: usize, pieces: usize) {
        self.objective_space_splits = self.objective_space_splits.saturating_add(1);
        self.split_log.push((depth, pieces));
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_rectangle_explored(&mut self) {
        self.rectangles_explored = self.rectangles_explored.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Oracle calls:          {}", self.oracle_calls)?;
        writeln!(f, "  Unexpected statuses:   {}", self.unexpected_oracle_statuses)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Leaves:                {}", self.leaves)?;
        writeln!(f, "  Branches created:      {}", self.branches_created)?;
        writeln!(f, "  Objective splits:      {}", self.objective_space_splits)?;
        writeln!(f, "  Rectangles explored:   {}", self.rectangles_explored)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_max_depth() {
        let mut s = SearchStatistics::new();
        s.on_node_explored(3);
        s.on_node_explored(1);
        s.on_oracle_call();
        s.on_branches_created(2);
        s.on_objective_space_split(4, 3);
        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.max_depth, 3);
        assert_eq!(s.oracle_calls, 1);
        assert_eq!(s.branches_created, 2);
        assert_eq!(s.objective_space_splits, 1);
        assert_eq!(s.split_log, vec![(4, 3)]);
    }

    #[test]
    fn test_counters_saturate() {
        let mut s = SearchStatistics {
            oracle_calls: u64::MAX,
            ..SearchStatistics::default()
        };
        s.on_oracle_call();
        assert_eq!(s.oracle_calls, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut s = SearchStatistics::new();
        s.on_solution_found();
        s.set_total_time(Duration::from_millis(1500));
        let rendered = format!("{}", s);
        assert!(rendered.contains("Search Statistics:"), "missing header");
        assert!(rendered.contains("Solutions found:       1"), "missing solutions");
        assert!(rendered.contains("Total time:            1.50s"), "missing time: {}", rendered);
    }
}
