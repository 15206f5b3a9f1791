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

//! # Objective Values
//!
//! All objective-space geometry is generic over [`ObjectiveValue`], an
//! extension of [`num_traits::Float`] that carries the handful of numeric
//! constants the search depends on. Implementations exist for `f32` and `f64`;
//! the rest of the workspace works with `f64`.

use num_traits::Float;

/// A floating-point type usable as an objective value.
pub trait ObjectiveValue:
    Float + Default + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Relative tolerance under which two points are treated as the same point.
    const CLOSE_ENOUGH_EPSILON: Self;
    /// Slack granted when testing whether a lattice corner lies above a segment line.
    const ABOVE_SEGMENT_TOLERANCE: Self;
    /// Share of the minimum objective increment that an integral point may be improved by.
    const VALID_INCREMENT_RATIO: Self;
    const HALF: Self;
}

macro_rules! impl_objective_value {
    ($($t:ty),*) => {
        $(
            impl ObjectiveValue for $t {
                const CLOSE_ENOUGH_EPSILON: Self = 1e-5;
                const ABOVE_SEGMENT_TOLERANCE: Self = 1e-8;
                const VALID_INCREMENT_RATIO: Self = 0.9;
                const HALF: Self = 0.5;
            }
        )*
    };
}

impl_objective_value!(f32, f64);
