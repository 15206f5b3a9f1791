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

use crate::{
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use biobab_core::math::point::Point;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Emits progress through `tracing`: one `info` line every `log_interval`
/// nodes, plus the start and the summary of the search.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    log_interval: u64,
    algorithm: String,
}

impl LogMonitor {
    /// # Panics
    ///
    /// Panics if `log_interval` is zero.
    pub fn new(log_interval: u64) -> Self {
        assert!(
            log_interval > 0,
            "called `LogMonitor::new` with a zero log interval"
        );
        Self {
            start_time: Instant::now(),
            log_interval,
            algorithm: String::new(),
        }
    }

    #[inline]
    fn should_log(&self, nodes_explored: u64) -> bool {
        nodes_explored % self.log_interval == 0
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(50)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(log_interval: {})", self.log_interval)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, algorithm: &str) {
        self.start_time = Instant::now();
        self.algorithm = algorithm.to_string();
        info!(algorithm, "search started");
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        info!(
            algorithm = %self.algorithm,
            elapsed = ?self.start_time.elapsed(),
            nodes = statistics.nodes_explored,
            oracle_calls = statistics.oracle_calls,
            solutions = statistics.solutions_found,
            "search finished"
        );
    }

    fn on_node(&mut self, depth: usize, queue_len: usize, frontier_len: usize, statistics: &SearchStatistics) {
        if self.should_log(statistics.nodes_explored) {
            info!(
                elapsed_secs = self.start_time.elapsed().as_secs_f64(),
                nodes = statistics.nodes_explored,
                depth,
                queue = queue_len,
                frontier = frontier_len,
                oracle_calls = statistics.oracle_calls,
                "progress"
            );
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &SearchStatistics) {
        trace!(%reason, nodes = statistics.nodes_explored, "node pruned");
    }

    fn on_solution_found(&mut self, point: &Point, _statistics: &SearchStatistics) {
        debug!(%point, "solution confirmed");
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_every_interval_nodes() {
        let m = LogMonitor::new(10);
        assert!(m.should_log(0));
        assert!(!m.should_log(5));
        assert!(m.should_log(20));
    }

    #[test]
    fn test_log_monitor_never_terminates() {
        let mut m = LogMonitor::default();
        m.on_enter_search("BIOBAB");
        m.on_node(1, 2, 3, &SearchStatistics::default());
        assert_eq!(m.search_command(), SearchCommand::Continue);
        assert_eq!(format!("{}", m), "LogMonitor(log_interval: 50)");
    }

    #[test]
    #[should_panic(expected = "zero log interval")]
    fn test_zero_interval_is_rejected() {
        let _ = LogMonitor::new(0);
    }
}
