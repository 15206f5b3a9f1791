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

//! Bi-objective branch-and-bound.
//!
//! This crate holds the engine every top-level algorithm is built from:
//!
//! - `bound`: lower bound sets, their construction from oracle calls,
//!   filtering by the frontier, and splitting at discontinuities.
//! - `branching`: reversible branching decisions and the policies choosing them.
//! - `trail`: the undo log that scopes a node's decisions to its bounding.
//! - `node` and `queue`: open subproblems and their exploration order.
//! - `tree_search`: the generic branch-and-bound loop.
//! - `weighted_sum`: integral weighted-sum and lexicographic minima over
//!   relaxation oracles, by nested tree search.

pub mod bound;
pub mod branching;
pub mod node;
pub mod queue;
pub mod trail;
pub mod tree_search;
pub mod weighted_sum;
