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

//! Search rectangles of the balanced box method.
//!
//! A [`Rectangle`] is spanned by two non-dominated points: its upper-left
//! corner (small `z1`, large `z2`) and its lower-right corner (large `z1`,
//! small `z2`). Its priority score is the negated area so that a min-heap
//! pops the largest rectangle first.

use crate::math::point::Point;
use crate::num::{increments::ObjectiveIncrements, value::ObjectiveValue};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle<F = f64> {
    upper_left: Point<F>,
    lower_right: Point<F>,
}

impl<F> Rectangle<F>
where
    F: ObjectiveValue,
{
    #[inline]
    pub fn new(upper_left: Point<F>, lower_right: Point<F>) -> Self {
        debug_assert!(
            upper_left.z1() <= lower_right.z1() || upper_left.is_close_to(&lower_right),
            "called `Rectangle::new` with upper_left = {} right of lower_right = {}",
            upper_left,
            lower_right
        );
        Self {
            upper_left,
            lower_right,
        }
    }

    #[inline]
    pub fn upper_left(&self) -> Point<F> {
        self.upper_left
    }

    #[inline]
    pub fn lower_right(&self) -> Point<F> {
        self.lower_right
    }

    #[inline]
    pub fn set_lower_right(&mut self, lower_right: Point<F>) {
        self.lower_right = lower_right;
    }

    #[inline]
    pub fn width(&self) -> F {
        self.lower_right.z1() - self.upper_left.z1()
    }

    #[inline]
    pub fn height(&self) -> F {
        self.upper_left.z2() - self.lower_right.z2()
    }

    #[inline]
    pub fn area(&self) -> F {
        self.width() * self.height()
    }

    /// Negated area.
    #[inline]
    pub fn score(&self) -> F {
        -self.area()
    }

    /// `true` if the rectangle is wider and taller than one increment, i.e.
    /// may still hold an unseen non-dominated integral point.
    #[inline]
    pub fn exceeds(&self, increments: &ObjectiveIncrements<F>) -> bool {
        self.width() > increments.z1() && self.height() > increments.z2()
    }

    /// Inclusive containment.
    #[inline]
    pub fn contains(&self, point: &Point<F>) -> bool {
        point.z1() >= self.upper_left.z1()
            && point.z1() <= self.lower_right.z1()
            && point.z2() >= self.lower_right.z2()
            && point.z2() <= self.upper_left.z2()
    }

    /// The rectangle shrunk by one increment on every side. Points on the
    /// boundary of `self` fall outside the result.
    #[inline]
    pub fn shrunk(&self, increments: &ObjectiveIncrements<F>) -> Self {
        Self {
            upper_left: Point::new(
                self.upper_left.z1() + increments.z1(),
                self.upper_left.z2() - increments.z2(),
            ),
            lower_right: Point::new(
                self.lower_right.z1() - increments.z1(),
                self.lower_right.z2() + increments.z2(),
            ),
        }
    }
}

impl<F> std::fmt::Display for Rectangle<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rectangle({}, {})", self.upper_left, self.lower_right)
    }
}
