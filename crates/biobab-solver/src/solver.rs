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

//! # Solver Facade
//!
//! [`Solver`] runs the algorithm selected by a [`SearchConfig`] against an
//! oracle and packs the result into a [`SearchOutcome`].
//!
//! ## Monitoring
//!
//! Every run gets a fresh monitor stack:
//!
//! - a `LogMonitor` reporting progress through `tracing`,
//! - a `TimeLimitMonitor` if the configuration sets a time limit,
//! - an `InterruptMonitor` if an external stop flag was installed,
//! - the monitors added by the caller, which outlive the run.
//!
//! An interruption never surfaces as an error. The search stops at its next
//! suspension point, the oracle is left without restrictions and the outcome
//! is marked as aborted with the frontier found so far.
//!
//! ## Usage
//!
//! ```rust
//! use biobab_model::point_set::{OracleMode, PointSetOracle};
//! use biobab_search::config::SearchConfig;
//! use biobab_solver::solver::SolverBuilder;
//! use std::time::Duration;
//!
//! let mut oracle = PointSetOracle::from_points(
//!     &[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)],
//!     OracleMode::Relaxed,
//! );
//! let mut solver = SolverBuilder::new()
//!     .with_config(SearchConfig::default())
//!     .with_time_limit(Duration::from_secs(60))
//!     .build();
//!
//! let outcome = solver.solve(&mut oracle);
//! println!("{}", outcome);
//! assert_eq!(outcome.frontier.len(), 3);
//! ```

use crate::{
    algorithm::FrontierAlgorithm, balanced_box::BalancedBox, biobab::Biobab,
    epsilon::{BidirectionalEpsilon, EpsilonConstraint},
};
use biobab_bnb::bound::lower_bound_set::LowerBoundSet;
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::{Algorithm, ConfigError, SearchConfig},
    context::SearchContext,
    error::SearchInterrupted,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, log::LogMonitor,
        search_monitor::SearchMonitor, time_limit::TimeLimitMonitor,
    },
    result::{SearchOutcome, TerminationReason},
};
use std::sync::atomic::AtomicBool;
use std::time::Instant;
use tracing::{info, warn};

pub struct Solver<'a> {
    config: SearchConfig,
    stop_signal: Option<&'a AtomicBool>,
    monitors: CompositeMonitor<'a>,
}

impl<'a> Solver<'a> {
    /// The configuration as given, before per-algorithm overrides.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.add_monitor(monitor);
    }

    #[inline]
    pub fn has_time_limit(&self) -> bool {
        self.config.time_limit().is_some()
    }

    /// Runs the configured algorithm on `oracle`.
    pub fn solve<O>(&mut self, oracle: &mut O) -> SearchOutcome
    where
        O: ScalarizationOracle + ?Sized,
    {
        let config = self.config.resolved();
        let start_time = Instant::now();

        // 1. Build the monitor stack
        let mut monitor = self.build_monitor(&config);

        // 2. Run the algorithm
        let mut ctx = SearchContext::new(oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();
        let result = match config.algorithm {
            Algorithm::Biobab => execute(&Biobab::new(&config), &mut ctx, &mut frontier),
            Algorithm::EpsilonConstraint => {
                execute(&EpsilonConstraint::from_config(&config), &mut ctx, &mut frontier)
            }
            Algorithm::BidirectionalEpsilon => {
                execute(&BidirectionalEpsilon::from_config(&config), &mut ctx, &mut frontier)
            }
            Algorithm::BalancedBox => execute(&BalancedBox::from_config(&config), &mut ctx, &mut frontier),
        };
        ctx.statistics_mut().set_total_time(start_time.elapsed());
        ctx.exit_search();

        // 3. Construct the outcome
        let termination_reason = match result {
            Ok(()) => TerminationReason::Completed,
            Err(interrupted) => {
                warn!(reason = %interrupted.reason, frontier = frontier.len(), "search aborted");
                TerminationReason::Aborted(interrupted.reason)
            }
        };
        SearchOutcome::new(frontier, termination_reason, ctx.into_statistics())
    }

    /// The filtered lower bound set of the root node, computed without
    /// branching under the same monitors as [`solve`](Self::solve).
    ///
    /// # Errors
    ///
    /// Returns [`SearchInterrupted`] if a monitor stopped the computation.
    pub fn compute_root_bound<O>(&mut self, oracle: &mut O) -> Result<LowerBoundSet, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
    {
        let config = self.config.clone().with_algorithm(Algorithm::Biobab).resolved();
        let mut monitor = self.build_monitor(&config);
        let mut ctx = SearchContext::new(oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        ctx.enter_search("RootBound");
        let lb = Biobab::new(&config).root_bound(&mut ctx, &mut frontier);
        ctx.exit_search();
        lb
    }

    fn build_monitor<'m>(&'m mut self, config: &SearchConfig) -> CompositeMonitor<'m> {
        let mut monitor = CompositeMonitor::new();
        if let Some(stop_signal) = self.stop_signal {
            monitor.add_monitor(InterruptMonitor::new(stop_signal));
        }
        if let Some(limit) = config.time_limit() {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        monitor.add_monitor(LogMonitor::new(config.log_interval.max(1)));
        if !self.monitors.is_empty() {
            monitor.add_monitor(&mut self.monitors);
        }
        monitor
    }
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("algorithm", &self.config.algorithm)
            .field("stop_signal", &self.stop_signal.is_some())
            .field("monitors", &self.monitors)
            .finish()
    }
}

fn execute<A, O, M>(
    algorithm: &A,
    ctx: &mut SearchContext<'_, O, M>,
    frontier: &mut ParetoSet,
) -> Result<(), SearchInterrupted>
where
    A: FrontierAlgorithm,
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    info!(algorithm = algorithm.name(), oracle = ctx.oracle().name(), "solving");
    ctx.enter_search(algorithm.name());
    algorithm.run(ctx, frontier)
}

pub struct SolverBuilder<'a> {
    config: SearchConfig,
    stop_signal: Option<&'a AtomicBool>,
    monitors: CompositeMonitor<'a>,
}

impl Default for SolverBuilder<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SolverBuilder<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
            stop_signal: None,
            monitors: CompositeMonitor::new(),
        }
    }

    #[inline]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.config.time_limit_seconds = Some(limit.as_secs_f64());
        self
    }

    /// Stops every run as soon as `stop_signal` is set.
    #[inline]
    pub fn with_stop_signal(mut self, stop_signal: &'a AtomicBool) -> Self {
        self.stop_signal = Some(stop_signal);
        self
    }

    #[inline]
    pub fn add_monitor<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.add_monitor(monitor);
        self
    }

    #[inline]
    pub fn build(self) -> Solver<'a> {
        Solver {
            config: self.config,
            stop_signal: self.stop_signal,
            monitors: self.monitors,
        }
    }

    /// Like [`build`](Self::build), but rejects an invalid configuration.
    pub fn try_build(self) -> Result<Solver<'a>, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_core::math::point::Point;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::{monitor::search_monitor::SearchCommand, stats::SearchStatistics};
    use std::time::Duration;

    /// Records the lifecycle and every reported point.
    #[derive(Default)]
    struct Recorder {
        algorithm: String,
        points: Vec<Point>,
        exited: bool,
    }

    impl SearchMonitor for Recorder {
        fn name(&self) -> &str {
            "Recorder"
        }

        fn on_enter_search(&mut self, algorithm: &str) {
            self.algorithm = algorithm.to_string();
        }

        fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
            self.exited = true;
        }

        fn on_solution_found(&mut self, point: &Point, _statistics: &SearchStatistics) {
            self.points.push(*point);
        }

        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    fn oracle() -> PointSetOracle {
        PointSetOracle::from_points(&[(1.0, 8.0), (3.0, 5.0), (6.0, 2.0), (7.0, 7.0)], OracleMode::Relaxed)
    }

    #[test]
    fn test_every_algorithm_finds_the_same_frontier() {
        for algorithm in [
            Algorithm::Biobab,
            Algorithm::EpsilonConstraint,
            Algorithm::BidirectionalEpsilon,
            Algorithm::BalancedBox,
        ] {
            let mut oracle = oracle();
            let mut solver = SolverBuilder::new().with_algorithm(algorithm).build();
            let outcome = solver.solve(&mut oracle);
            assert!(outcome.is_completed(), "{} did not complete", algorithm);
            assert_eq!(
                outcome.points(),
                vec![Point::new(1.0, 8.0), Point::new(3.0, 5.0), Point::new(6.0, 2.0)],
                "{} found a different frontier",
                algorithm
            );
            assert!(outcome.statistics.oracle_calls > 0);
            assert_eq!(oracle.num_constraints(), 0, "{} leaked constraints", algorithm);
        }
    }

    #[test]
    fn test_user_monitor_sees_the_run_and_stays_with_the_caller() {
        let mut recorder = Recorder::default();
        {
            let mut oracle = oracle();
            let mut solver = SolverBuilder::new()
                .with_algorithm(Algorithm::EpsilonConstraint)
                .add_monitor(&mut recorder)
                .build();
            solver.solve(&mut oracle);
        }
        assert_eq!(recorder.algorithm, "EpsilonConstraint");
        assert!(recorder.exited);
        assert!(recorder.points.contains(&Point::new(3.0, 5.0)));
    }

    #[test]
    fn test_stop_signal_aborts_with_partial_frontier() {
        let stop = AtomicBool::new(true);
        let mut oracle = oracle();
        let mut solver = SolverBuilder::new().with_stop_signal(&stop).build();
        let outcome = solver.solve(&mut oracle);

        assert_eq!(
            outcome.termination_reason,
            TerminationReason::Aborted("Interrupt signal received".to_string())
        );
        assert!(outcome.frontier.is_empty());
        assert_eq!(outcome.statistics.oracle_calls, 0);
    }

    #[test]
    fn test_time_limit_is_installed_from_the_config() {
        let solver = SolverBuilder::new().with_time_limit(Duration::from_secs(10)).build();
        assert!(solver.has_time_limit());
        assert_eq!(solver.config().time_limit(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_try_build_validates_the_config() {
        let invalid = SearchConfig {
            balanced_box_beta: 0.0,
            ..SearchConfig::default()
        };
        assert!(SolverBuilder::new().with_config(invalid).try_build().is_err());
        assert!(SolverBuilder::new().try_build().is_ok());
    }

    #[test]
    fn test_root_bound_is_computed_without_branching() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (6.0, 6.0), (10.0, 0.0)], OracleMode::Relaxed);
        let mut solver = SolverBuilder::new()
            .with_algorithm(Algorithm::BalancedBox)
            .build();
        let lb = solver.compute_root_bound(&mut oracle).unwrap();
        assert!(!lb.is_empty());
        assert!(!lb.is_leaf());
        assert_eq!(oracle.num_constraints(), 0);
    }
}
