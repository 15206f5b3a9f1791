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

//! # Objective Increments
//!
//! Many bi-objective integer programs only attain objective values on a
//! lattice: every feasible integral solution has `z1` that is a multiple of
//! some `z1_increment` and likewise for `z2`. Knowing these increments lets
//! the search
//!
//! - improve a known solution's corner before dominance tests, since no other
//!   integral point can lie strictly between the corner and the next lattice
//!   line,
//! - lift a lower bound segment whose ceiled corner is already above its line,
//! - drop a segment whose floored bound corner contains no lattice point.
//!
//! Increments of `1` are the common case of integer-valued objectives.

use crate::{
    math::point::{Objective, Point},
    num::value::ObjectiveValue,
};

/// Minimum increments between distinct attainable values of each objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectiveIncrements<F = f64> {
    z1: F,
    z2: F,
}

impl<F> ObjectiveIncrements<F>
where
    F: ObjectiveValue,
{
    /// Creates a new set of increments.
    ///
    /// # Panics
    ///
    /// Panics if either increment is not strictly positive and finite.
    #[inline]
    pub fn new(z1: F, z2: F) -> Self {
        assert!(
            z1 > F::zero() && z1.is_finite(),
            "called `ObjectiveIncrements::new` with non-positive z1 increment: {}",
            z1
        );
        assert!(
            z2 > F::zero() && z2.is_finite(),
            "called `ObjectiveIncrements::new` with non-positive z2 increment: {}",
            z2
        );
        Self { z1, z2 }
    }

    /// Increments for integer-valued objectives.
    #[inline]
    pub fn unit() -> Self {
        Self {
            z1: F::one(),
            z2: F::one(),
        }
    }

    #[inline]
    pub fn z1(&self) -> F {
        self.z1
    }

    #[inline]
    pub fn z2(&self) -> F {
        self.z2
    }

    #[inline]
    pub fn get(&self, objective: Objective) -> F {
        match objective {
            Objective::First => self.z1,
            Objective::Second => self.z2,
        }
    }

    /// Rounds both coordinates up to the next lattice line.
    #[inline]
    pub fn ceil_coords(&self, point: Point<F>) -> Point<F> {
        Point::new(
            self.z1 * (point.z1() / self.z1).ceil(),
            self.z2 * (point.z2() / self.z2).ceil(),
        )
    }

    /// Rounds both coordinates down to the previous lattice line.
    /// Infinite coordinates stay infinite.
    #[inline]
    pub fn floor_coords(&self, point: Point<F>) -> Point<F> {
        Point::new(
            self.z1 * (point.z1() / self.z1).floor(),
            self.z2 * (point.z2() / self.z2).floor(),
        )
    }

    /// The corner an integral point effectively dominates from.
    #[inline]
    pub fn improve(&self, point: Point<F>) -> Point<F> {
        Point::new(
            point.z1() - F::VALID_INCREMENT_RATIO * self.z1,
            point.z2() - F::VALID_INCREMENT_RATIO * self.z2,
        )
    }
}

impl<F> Default for ObjectiveIncrements<F>
where
    F: ObjectiveValue,
{
    fn default() -> Self {
        Self::unit()
    }
}

impl<F> std::fmt::Display for ObjectiveIncrements<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectiveIncrements(z1: {}, z2: {})", self.z1, self.z2)
    }
}
