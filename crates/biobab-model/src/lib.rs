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

//! # BIOBAB Model
//!
//! The problem-facing layer of the bi-objective search: what a solution is,
//! how the frontier of non-dominated solutions is maintained, and the contract
//! of the single-objective oracle every algorithm is built on.
//!
//! ## Modules
//!
//! * **`index`**: `VariableIndex` and `ConstraintId`, strongly typed handles.
//! * **`snapshot`**: `DecisionSnapshot`, a shared immutable variable assignment.
//! * **`solution`**: `Solution`, a frontier entry with its integrality-improved point.
//! * **`pareto`**: `ParetoSet`, the sorted, dominance-pruned frontier.
//! * **`constraint`**: `LinearConstraint`, used by constraint-based branching.
//! * **`oracle`**: the `ScalarizationOracle` trait with `WeightedSumQuery` and `OracleOutcome`.
//! * **`point_set`**: `PointSetOracle`, an oracle over an enumerated feasible set,
//!   either exact or as a convex-hull relaxation.

pub mod constraint;
pub mod index;
pub mod oracle;
pub mod pareto;
pub mod point_set;
pub mod snapshot;
pub mod solution;
