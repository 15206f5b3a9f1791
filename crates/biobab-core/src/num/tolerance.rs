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

//! Tolerance-aware scalar comparisons.
//!
//! Objective values come out of a numerical oracle, so equality is never
//! tested exactly. [`similar_values`] compares relatively to a reference
//! value and falls back to an absolute comparison when the reference is
//! itself within the tolerance of zero.

use crate::num::value::ObjectiveValue;

/// Returns `true` if `value` is within `tolerance` of `reference`.
///
/// The comparison is relative to `reference` unless `|reference| < tolerance`,
/// in which case the absolute difference is used.
///
/// # Examples
///
/// ```rust
/// # use biobab_core::num::tolerance::similar_values;
/// assert!(similar_values(1000.0005, 1000.0, 1e-6));
/// assert!(similar_values(1e-9, 0.0, 1e-6));
/// assert!(!similar_values(1.1, 1.0, 1e-6));
/// ```
#[inline]
pub fn similar_values<F>(value: F, reference: F, tolerance: F) -> bool
where
    F: ObjectiveValue,
{
    if reference.abs() < tolerance {
        (value - reference).abs() <= tolerance
    } else {
        ((value - reference) / reference).abs() <= tolerance
    }
}

/// [`similar_values`] at the point-identity tolerance
/// [`ObjectiveValue::CLOSE_ENOUGH_EPSILON`].
#[inline]
pub fn close_enough<F>(value: F, reference: F) -> bool
where
    F: ObjectiveValue,
{
    similar_values(value, reference, F::CLOSE_ENOUGH_EPSILON)
}

/// Returns `true` if `x` is at least `epsilon` away from both neighbouring integers.
#[inline]
pub fn is_fractional<F>(x: F, epsilon: F) -> bool
where
    F: ObjectiveValue,
{
    x > x.floor() + epsilon && x < x.ceil() - epsilon
}
