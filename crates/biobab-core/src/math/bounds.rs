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

//! The `(right, top)` box of a subproblem.
//!
//! Every subproblem in the search is restricted to `z1 <= right` and
//! `z2 <= top`. Unbounded sides are represented by positive infinity.

use crate::math::point::{Objective, Point};
use crate::num::value::ObjectiveValue;

/// Upper bounds on both objectives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveBounds<F = f64> {
    right: F,
    top: F,
}

impl<F> ObjectiveBounds<F>
where
    F: ObjectiveValue,
{
    #[inline]
    pub const fn new(right: F, top: F) -> Self {
        Self { right, top }
    }

    /// Bounds that exclude nothing.
    #[inline]
    pub fn unbounded() -> Self {
        Self {
            right: F::infinity(),
            top: F::infinity(),
        }
    }

    /// Upper bound on `z1`.
    #[inline]
    pub fn right(&self) -> F {
        self.right
    }

    /// Upper bound on `z2`.
    #[inline]
    pub fn top(&self) -> F {
        self.top
    }

    #[inline]
    pub fn get(&self, objective: Objective) -> F {
        match objective {
            Objective::First => self.right,
            Objective::Second => self.top,
        }
    }

    #[inline]
    pub fn with_right(self, right: F) -> Self {
        Self { right, ..self }
    }

    #[inline]
    pub fn with_top(self, top: F) -> Self {
        Self { top, ..self }
    }

    /// Component-wise minimum with `(right, top)`.
    #[inline]
    pub fn tightened(self, right: F, top: F) -> Self {
        Self {
            right: self.right.min(right),
            top: self.top.min(top),
        }
    }

    /// Component-wise minimum with another box.
    #[inline]
    pub fn intersect(self, other: &Self) -> Self {
        self.tightened(other.right, other.top)
    }

    #[inline]
    pub fn contains(&self, point: &Point<F>) -> bool {
        point.z1() <= self.right && point.z2() <= self.top
    }

    /// `right * top`, the best-first priority of a node (smaller explores first).
    #[inline]
    pub fn area_score(&self) -> F {
        self.right * self.top
    }

    #[inline]
    pub fn corner(&self) -> Point<F> {
        Point::new(self.right, self.top)
    }
}

impl<F> Default for ObjectiveBounds<F>
where
    F: ObjectiveValue,
{
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<F> std::fmt::Display for ObjectiveBounds<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[z1 <= {} | z2 <= {}]", self.right, self.top)
    }
}
