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

//! # BIOBAB Solver
//!
//! Complete bi-objective search procedures built on the branch-and-bound
//! engine of `biobab-bnb`, and the [`solver::Solver`] facade that runs one of
//! them under a set of monitors.
//!
//! ## Algorithms
//!
//! - `biobab`: bi-objective branch-and-bound over lower bound sets.
//! - `epsilon`: the epsilon-constraint method and its bi-directional variant.
//! - `balanced_box`: the balanced box method with optional harvesting.
//!
//! Every algorithm implements [`algorithm::FrontierAlgorithm`]. The
//! single-objective problems they pose go through a [`scalarize::Scalarizer`],
//! which either calls the oracle directly or, when the oracle only solves
//! relaxations, runs a nested tree search.
//!
//! ## Usage
//!
//! ```rust
//! use biobab_model::point_set::{OracleMode, PointSetOracle};
//! use biobab_search::config::{Algorithm, SearchConfig};
//! use biobab_solver::solver::SolverBuilder;
//!
//! let mut oracle = PointSetOracle::from_points(
//!     &[(1.0, 8.0), (3.0, 5.0), (6.0, 2.0), (7.0, 7.0)],
//!     OracleMode::Relaxed,
//! );
//! let config = SearchConfig::default().with_algorithm(Algorithm::EpsilonConstraint);
//! let mut solver = SolverBuilder::new().with_config(config).build();
//!
//! let outcome = solver.solve(&mut oracle);
//! assert!(outcome.is_completed());
//! assert_eq!(outcome.frontier.len(), 3);
//! ```

pub mod algorithm;
pub mod balanced_box;
pub mod biobab;
pub mod epsilon;
pub mod scalarize;
pub mod solver;
