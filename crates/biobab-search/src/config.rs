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

//! # Search Configuration
//!
//! Every tolerance and feature switch of the bi-objective search lives in one
//! immutable [`SearchConfig`], handed by reference to each component. The
//! configuration can be built in code or loaded from TOML; missing keys take
//! their defaults.
//!
//! ```
//! use biobab_search::config::{Algorithm, ExplorationStrategy, SearchConfig};
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     algorithm = "biobab"
//!     strategy = "best_first"
//!     time_limit_seconds = 30.0
//!     lb_max_gap = 0.05
//! "#).unwrap();
//!
//! assert_eq!(config.algorithm, Algorithm::Biobab);
//! assert_eq!(config.strategy, ExplorationStrategy::BestFirst);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(config.objective_space_branching);
//! ```

use biobab_core::math::{bounds::ObjectiveBounds, point::Objective};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The top-level bi-objective algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Bi-objective branch-and-bound over lower bound sets.
    #[default]
    Biobab,
    EpsilonConstraint,
    /// Epsilon-constraint alternating the primary objective.
    BidirectionalEpsilon,
    BalancedBox,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Biobab => write!(f, "BIOBAB"),
            Algorithm::EpsilonConstraint => write!(f, "EpsilonConstraint"),
            Algorithm::BidirectionalEpsilon => write!(f, "BidirectionalEpsilon"),
            Algorithm::BalancedBox => write!(f, "BalancedBox"),
        }
    }
}

/// The order in which open subproblems are explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationStrategy {
    /// FIFO.
    #[default]
    BreadthFirst,
    /// LIFO.
    DepthFirst,
    /// Smallest score first.
    BestFirst,
}

/// How a lexicographic minimum is obtained from weighted-sum solves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LexminMethod {
    /// Two solves, the second bounded at the optimum of the first.
    #[default]
    Lexicographic,
    /// A single solve with weights `(1, epsilon)` or `(epsilon, 1)`.
    WeightedSum { epsilon: f64 },
}

/// The branching rule tried first at every node of the bi-objective tree
/// search. Rules other than `default` fall back to the default chain when
/// they yield no decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchingRule {
    #[default]
    Default,
    ClosestToOne,
    FurthestFromOne,
    FractionalOnAverage,
    FractionalAverage,
    OftenFractional,
    Spread,
    /// Needs an oracle reporting objective sensitivity ranges.
    Sensitivity,
    LocalBranching,
    SimpleLocalBranching,
}

/// Immutable configuration shared by every part of a search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub strategy: ExplorationStrategy,
    /// Wall-clock budget in seconds.
    pub time_limit_seconds: Option<f64>,
    /// Relative tolerance under which a new point lies on the segment being refined.
    pub on_segment_tolerance: f64,
    /// Weighted-sum points this close outside the box are snapped onto it.
    pub feasibility_tolerance: f64,
    /// Improve dominance of integral solutions by `0.9` objective increments.
    pub integer_dominance: bool,
    /// Drop bound segments whose box contains no lattice point.
    pub segment_tightening: bool,
    /// Accept a segment early when its ceiled corner is above its line.
    pub lb_lifting: bool,
    /// Minimum gap between consecutive segments that registers a discontinuity.
    pub lb_max_gap: f64,
    pub objective_space_branching: bool,
    pub branching: BranchingRule,
    pub lexmin_method: LexminMethod,
    /// The oracle solves relaxations, so single-objective solves need their own tree search.
    pub use_linear_relaxation: bool,
    /// Allow the oracle to cut off against the frontier.
    pub mip_cutoff: bool,
    /// Share of the initial rectangle's area above which the balanced box method harvests.
    pub balanced_box_beta: f64,
    pub epsilon_first_objective: Objective,
    pub bound_right: Option<f64>,
    pub bound_top: Option<f64>,
    /// Number of nodes between two progress lines of the log monitor.
    pub log_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Biobab,
            strategy: ExplorationStrategy::BreadthFirst,
            time_limit_seconds: None,
            on_segment_tolerance: 1e-6,
            feasibility_tolerance: 1e-6,
            integer_dominance: true,
            segment_tightening: true,
            lb_lifting: true,
            lb_max_gap: 0.02,
            objective_space_branching: true,
            branching: BranchingRule::Default,
            lexmin_method: LexminMethod::Lexicographic,
            use_linear_relaxation: true,
            mip_cutoff: true,
            balanced_box_beta: 0.15,
            epsilon_first_objective: Objective::First,
            bound_right: None,
            bound_top: None,
            log_interval: 50,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all tolerances and ratios are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("on_segment_tolerance", self.on_segment_tolerance),
            ("feasibility_tolerance", self.feasibility_tolerance),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(self.lb_max_gap >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lb_max_gap must not be negative, got {}",
                self.lb_max_gap
            )));
        }
        if !(self.balanced_box_beta > 0.0 && self.balanced_box_beta <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "balanced_box_beta must lie in (0, 1], got {}",
                self.balanced_box_beta
            )));
        }
        if let LexminMethod::WeightedSum { epsilon } = self.lexmin_method {
            if !(epsilon > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "lexmin weighted-sum epsilon must be positive, got {}",
                    epsilon
                )));
            }
        }
        if let Some(seconds) = self.time_limit_seconds {
            if !(seconds > 0.0) || Duration::try_from_secs_f64(seconds).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "time_limit_seconds must be a positive, representable duration, got {}",
                    seconds
                )));
            }
        }
        Ok(())
    }

    /// The configuration actually used by `algorithm`: the epsilon-constraint
    /// and balanced box methods run without integer dominance and without
    /// objective-space branching.
    pub fn resolved(&self) -> Self {
        match self.algorithm {
            Algorithm::Biobab => self.clone(),
            Algorithm::EpsilonConstraint | Algorithm::BidirectionalEpsilon | Algorithm::BalancedBox => {
                Self {
                    integer_dominance: false,
                    objective_space_branching: false,
                    ..self.clone()
                }
            }
        }
    }

    /// Returns the time limit, if configured. A value [`validate`](Self::validate)
    /// rejects (non-positive, NaN or too large for a [`Duration`]) yields `None`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_seconds
            .filter(|seconds| *seconds > 0.0)
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }

    /// The configured outer bounds; unset sides fall back to `fallback`.
    pub fn initial_bounds(&self, fallback: ObjectiveBounds) -> ObjectiveBounds {
        ObjectiveBounds::new(
            self.bound_right.unwrap_or(fallback.right()),
            self.bound_top.unwrap_or(fallback.top()),
        )
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_strategy(mut self, strategy: ExplorationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit_seconds = Some(time_limit.as_secs_f64());
        self
    }

    pub fn with_linear_relaxation(mut self, use_linear_relaxation: bool) -> Self {
        self.use_linear_relaxation = use_linear_relaxation;
        self
    }

    pub fn with_branching(mut self, branching: BranchingRule) -> Self {
        self.branching = branching;
        self
    }

    pub fn with_lexmin_method(mut self, lexmin_method: LexminMethod) -> Self {
        self.lexmin_method = lexmin_method;
        self
    }

    pub fn with_bounds(mut self, right: f64, top: f64) -> Self {
        self.bound_right = Some(right);
        self.bound_top = Some(top);
        self
    }
}
