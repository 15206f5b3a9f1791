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

//! # BIOBAB Core
//!
//! Foundational geometry and numerics for bi-objective branch-and-bound.
//! Everything here lives in two-dimensional objective space: points,
//! axis-aligned bound boxes, piecewise-linear segments of lower bound sets
//! and the rectangles explored by the balanced box method.
//!
//! ## Modules
//!
//! - `math`: `Point`, `ObjectiveBounds`, `Segment<M>` (with dominance
//!   filtering and lattice checks) and `Rectangle`.
//! - `num`: the `ObjectiveValue` float abstraction, tolerance-aware
//!   comparisons and `ObjectiveIncrements` (integrality of objective values).
//! - `utils`: phantom-tagged, strongly typed indices.
//!
//! Comparisons between objective values are tolerance based throughout;
//! exact float equality is only used where a value is known to be copied
//! rather than recomputed.

pub mod math;
pub mod num;
pub mod utils;
