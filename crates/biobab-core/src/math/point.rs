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

//! Points in objective space.
//!
//! A [`Point`] is a pair `(z1, z2)` of minimization objectives. Points are
//! plain `Copy` values; equality derived on the struct is exact and reserved
//! for values that were copied rather than recomputed. Everything else goes
//! through [`Point::is_close_to`].

use crate::num::{tolerance::close_enough, value::ObjectiveValue};
use std::cmp::Ordering;

/// Selects one of the two objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    #[default]
    First,
    Second,
}

impl Objective {
    pub const ALL: [Objective; 2] = [Objective::First, Objective::Second];

    /// The other objective.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Objective::First => Objective::Second,
            Objective::Second => Objective::First,
        }
    }

    /// The one-based number of the objective.
    #[inline]
    pub const fn number(self) -> usize {
        match self {
            Objective::First => 1,
            Objective::Second => 2,
        }
    }

    /// Weights `(w1, w2)` that optimize this objective alone.
    #[inline]
    pub fn weights<F>(self) -> (F, F)
    where
        F: ObjectiveValue,
    {
        match self {
            Objective::First => (F::one(), F::zero()),
            Objective::Second => (F::zero(), F::one()),
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "z{}", self.number())
    }
}

/// A point `(z1, z2)` in objective space.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Point<F = f64> {
    z1: F,
    z2: F,
}

impl<F> Point<F>
where
    F: ObjectiveValue,
{
    #[inline]
    pub const fn new(z1: F, z2: F) -> Self {
        Self { z1, z2 }
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

    /// `w1 * z1 + w2 * z2`.
    #[inline]
    pub fn weighted_sum(&self, w1: F, w2: F) -> F {
        w1 * self.z1 + w2 * self.z2
    }

    /// Tolerance-aware equality on both coordinates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use biobab_core::math::point::Point;
    /// let a = Point::new(10.0, 20.0);
    /// assert!(a.is_close_to(&Point::new(10.00001, 20.0)));
    /// assert!(!a.is_close_to(&Point::new(10.1, 20.0)));
    /// ```
    #[inline]
    pub fn is_close_to(&self, other: &Self) -> bool {
        close_enough(self.z1, other.z1) && close_enough(self.z2, other.z2)
    }

    /// `true` if `self` is no worse than `other` in both objectives.
    #[inline]
    pub fn weakly_dominates(&self, other: &Self) -> bool {
        self.z1 <= other.z1 && self.z2 <= other.z2
    }

    /// Orders by `objective` first and by the other objective second.
    /// Incomparable values (NaN) compare equal.
    #[inline]
    pub fn lexicographic_cmp(&self, other: &Self, objective: Objective) -> Ordering {
        let primary = self.get(objective).partial_cmp(&other.get(objective));
        let secondary = self
            .get(objective.other())
            .partial_cmp(&other.get(objective.other()));
        primary
            .unwrap_or(Ordering::Equal)
            .then(secondary.unwrap_or(Ordering::Equal))
    }

    /// `self + lambda * (other - self)`.
    #[inline]
    pub fn interpolate(&self, other: &Self, lambda: F) -> Self {
        Self::new(
            self.z1 + lambda * (other.z1 - self.z1),
            self.z2 + lambda * (other.z2 - self.z2),
        )
    }
}

impl<F> From<(F, F)> for Point<F>
where
    F: ObjectiveValue,
{
    #[inline]
    fn from((z1, z2): (F, F)) -> Self {
        Self::new(z1, z2)
    }
}

impl<F> std::fmt::Display for Point<F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.z1, self.z2)
    }
}
