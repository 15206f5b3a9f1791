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

//! # Lower Bound Segments
//!
//! A [`Segment`] is one piece of a piecewise-linear lower bound set: the line
//! between two objective-space points `p1` and `p2` (with `p1.z1 <= p2.z1`),
//! valid inside a local box `(right, top)`, and carrying one metadata value per
//! endpoint (typically the oracle's decision snapshot at that point).
//! Degenerate segments (`p1 == p2`) stand for a single point.
//!
//! ## Filtering
//!
//! [`Segment::filter`] intersects the segment with the region dominated by a
//! known solution corner `u`, i.e. `{z1 >= u.z1, z2 >= u.z2}`. Depending on where
//! the corner falls the result is
//!
//! - the segment with a shrunk `top` (corner left of `p1`),
//! - the segment with a shrunk `right` (corner below `p2`),
//! - the segment untouched (corner on or above the line, dominating neither end),
//! - a left piece ending at `(u.z1, line(u.z1))` and/or a right piece starting
//!   at `line⁻¹(u.z2)`, when the corner lies strictly below the line,
//! - nothing, when the corner dominates the whole segment.
//!
//! With segment tightening enabled, every produced piece must also contain a
//! lattice point of the objective increments inside its bound box.

use crate::math::{bounds::ObjectiveBounds, point::Point};
use crate::num::{increments::ObjectiveIncrements, value::ObjectiveValue};
use smallvec::SmallVec;

/// The line `z2 = slope * z1 + intercept` through a non-vertical segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<F = f64> {
    slope: F,
    intercept: F,
}

impl<F> Line<F>
where
    F: ObjectiveValue,
{
    /// The line through two points, or `None` if they share `z1`.
    #[inline]
    pub fn through(p1: Point<F>, p2: Point<F>) -> Option<Self> {
        let run = p2.z1() - p1.z1();
        if run == F::zero() {
            return None;
        }
        let slope = (p2.z2() - p1.z2()) / run;
        Some(Self {
            slope,
            intercept: p1.z2() - slope * p1.z1(),
        })
    }

    #[inline]
    pub fn slope(&self) -> F {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// `z2` on the line at `z1`. Horizontal lines ignore `z1`, so infinite
    /// arguments never produce NaN there.
    #[inline]
    pub fn z2_at(&self, z1: F) -> F {
        if self.slope == F::zero() {
            self.intercept
        } else {
            self.slope * z1 + self.intercept
        }
    }

    /// `z1` on the line at `z2`.
    #[inline]
    pub fn z1_at(&self, z2: F) -> F {
        (z2 - self.intercept) / self.slope
    }
}

/// Up to two pieces left after filtering a segment.
pub type SegmentPieces<M, F = f64> = SmallVec<[Segment<M, F>; 2]>;

/// A piece of a lower bound set.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<M, F = f64> {
    p1: Point<F>,
    p2: Point<F>,
    bounds: ObjectiveBounds<F>,
    line: Option<Line<F>>,
    metadata1: M,
    metadata2: M,
}

impl<M, F> Segment<M, F>
where
    F: ObjectiveValue,
{
    #[inline]
    pub fn new(
        p1: Point<F>,
        p2: Point<F>,
        bounds: ObjectiveBounds<F>,
        metadata1: M,
        metadata2: M,
    ) -> Self {
        debug_assert!(
            p1.z1() <= p2.z1() || p1.is_close_to(&p2),
            "called `Segment::new` with p1 = {} right of p2 = {}",
            p1,
            p2
        );
        let line = if p1 != p2 && !p1.is_close_to(&p2) {
            Line::through(p1, p2)
        } else {
            None
        };
        Self {
            p1,
            p2,
            bounds,
            line,
            metadata1,
            metadata2,
        }
    }

    /// A degenerate segment standing for the single point `point`.
    #[inline]
    pub fn single(point: Point<F>, bounds: ObjectiveBounds<F>, metadata: M) -> Self
    where
        M: Clone,
    {
        Self::new(point, point, bounds, metadata.clone(), metadata)
    }

    #[inline]
    pub fn p1(&self) -> Point<F> {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Point<F> {
        self.p2
    }

    #[inline]
    pub fn bounds(&self) -> ObjectiveBounds<F> {
        self.bounds
    }

    #[inline]
    pub fn right(&self) -> F {
        self.bounds.right()
    }

    #[inline]
    pub fn top(&self) -> F {
        self.bounds.top()
    }

    /// The supporting line; `None` for degenerate and vertical segments.
    #[inline]
    pub fn line(&self) -> Option<&Line<F>> {
        self.line.as_ref()
    }

    #[inline]
    pub fn metadata1(&self) -> &M {
        &self.metadata1
    }

    #[inline]
    pub fn metadata2(&self) -> &M {
        &self.metadata2
    }

    /// `true` if both endpoints are the same point (within tolerance).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2 || self.p1.is_close_to(&self.p2)
    }

    /// The same segment restricted to a different box.
    #[inline]
    pub fn with_bounds(&self, bounds: ObjectiveBounds<F>) -> Self
    where
        M: Clone,
    {
        Self {
            bounds,
            ..self.clone()
        }
    }

    /// `true` if the box between the segment and its floored `(right, top)`
    /// corner contains a lattice point of `increments`.
    pub fn contains_lattice_point(&self, increments: &ObjectiveIncrements<F>) -> bool {
        let corner = increments.floor_coords(self.bounds.corner());
        let above_line = match &self.line {
            _ if self.is_degenerate() => true,
            Some(line) => corner.z2() + F::ABOVE_SEGMENT_TOLERANCE >= line.z2_at(corner.z1()),
            None => true,
        };
        above_line && corner.z2() >= self.p2.z2() && corner.z1() >= self.p1.z1()
    }

    /// Whether this segment survives tightening. `tightening = None` disables it.
    #[inline]
    pub fn should_be_considered(&self, tightening: Option<&ObjectiveIncrements<F>>) -> bool {
        tightening.is_none_or(|increments| self.contains_lattice_point(increments))
    }

    /// Removes the part of the segment dominated by `corner`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use biobab_core::math::{bounds::ObjectiveBounds, point::Point, segment::Segment};
    /// let s = Segment::new(
    ///     Point::new(0.0, 10.0),
    ///     Point::new(10.0, 0.0),
    ///     ObjectiveBounds::new(10.0, 10.0),
    ///     (),
    ///     (),
    /// );
    /// let pieces = s.filter(Point::new(4.0, 4.0), None);
    /// assert_eq!(pieces.len(), 2);
    /// assert_eq!(pieces[0].p2(), Point::new(4.0, 6.0));
    /// assert_eq!(pieces[1].p1(), Point::new(6.0, 4.0));
    /// ```
    pub fn filter(
        &self,
        corner: Point<F>,
        tightening: Option<&ObjectiveIncrements<F>>,
    ) -> SegmentPieces<M, F>
    where
        M: Clone,
    {
        let (z1, z2) = (corner.z1(), corner.z2());
        let mut pieces = SegmentPieces::new();
        let mut keep = |segment: Self| {
            if segment.should_be_considered(tightening) {
                pieces.push(segment);
            }
        };

        let on_or_above_line = self.line.is_some_and(|line| z2 >= line.z2_at(z1));
        if z2 >= self.p1.z2() || z1 >= self.p2.z1() || on_or_above_line {
            if z1 <= self.p1.z1() {
                keep(self.with_bounds(self.bounds.with_top(self.top().min(z2))));
            } else if z2 <= self.p2.z2() {
                keep(self.with_bounds(self.bounds.with_right(self.right().min(z1))));
            } else {
                keep(self.clone());
            }
            return pieces;
        }

        if z1 > self.p1.z1() {
            keep(Segment::new(
                self.p1,
                self.point_at_z1(z1),
                ObjectiveBounds::new(z1, self.top()),
                self.metadata1.clone(),
                self.metadata2.clone(),
            ));
        }
        if z2 > self.p2.z2() {
            keep(Segment::new(
                self.point_at_z2(z2),
                self.p2,
                ObjectiveBounds::new(self.right(), z2),
                self.metadata1.clone(),
                self.metadata2.clone(),
            ));
        }
        pieces
    }

    fn point_at_z1(&self, z1: F) -> Point<F> {
        match &self.line {
            Some(line) => Point::new(z1, line.z2_at(z1)),
            None => self.p1,
        }
    }

    fn point_at_z2(&self, z2: F) -> Point<F> {
        match &self.line {
            Some(line) if line.slope() != F::zero() => Point::new(line.z1_at(z2), z2),
            _ => Point::new(self.p1.z1(), z2),
        }
    }
}

impl<M, F> std::fmt::Display for Segment<M, F>
where
    F: ObjectiveValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Segment({} - {} | {})", self.p1, self.p2, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> Segment<()> {
        Segment::new(
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            ObjectiveBounds::new(10.0, 10.0),
            (),
            (),
        )
    }

    #[test]
    fn test_line_through_points() {
        let line = Line::through(Point::new(0.0, 10.0), Point::new(10.0, 0.0)).unwrap();
        assert_eq!(line.slope(), -1.0);
        assert_eq!(line.intercept(), 10.0);
        assert_eq!(line.z2_at(4.0), 6.0);
        assert_eq!(line.z1_at(4.0), 6.0);
        assert!(Line::through(Point::new(1.0, 3.0), Point::new(1.0, 2.0)).is_none());
    }

    #[test]
    fn test_horizontal_line_is_safe_at_infinity() {
        let line = Line::through(Point::new(0.0, 2.0), Point::new(5.0, 2.0)).unwrap();
        assert_eq!(line.z2_at(f64::INFINITY), 2.0);
    }

    #[test]
    fn test_degenerate_segment_has_no_line() {
        let s = Segment::single(Point::new(1.0, 1.0), ObjectiveBounds::unbounded(), ());
        assert!(s.is_degenerate());
        assert!(s.line().is_none());
    }

    #[test]
    fn test_filter_with_corner_dominating_whole_segment_returns_empty() {
        let pieces = diagonal().filter(Point::new(-1.0, -1.0), None);
        assert!(pieces.is_empty(), "expected no pieces, got {}", pieces.len());
    }

    #[test]
    fn test_filter_with_corner_dominating_neither_endpoint_returns_segment_unchanged() {
        let s = diagonal();
        for corner in [Point::new(8.0, 8.0), Point::new(20.0, 20.0)] {
            let pieces = s.filter(corner, None);
            assert_eq!(pieces.len(), 1);
            assert_eq!(pieces[0], s, "corner {} changed the segment", corner);
        }
    }

    #[test]
    fn test_filter_with_bisecting_corner_splits_segment() {
        let pieces = diagonal().filter(Point::new(4.0, 4.0), None);
        assert_eq!(pieces.len(), 2);

        let left = &pieces[0];
        assert_eq!(left.p1(), Point::new(0.0, 10.0));
        assert_eq!(left.p2(), Point::new(4.0, 6.0));
        assert_eq!(left.bounds(), ObjectiveBounds::new(4.0, 10.0));

        let right = &pieces[1];
        assert_eq!(right.p1(), Point::new(6.0, 4.0));
        assert_eq!(right.p2(), Point::new(10.0, 0.0));
        assert_eq!(right.bounds(), ObjectiveBounds::new(10.0, 4.0));
    }

    #[test]
    fn test_filter_with_corner_left_of_segment_keeps_right_piece() {
        let pieces = diagonal().filter(Point::new(-1.0, 5.0), None);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].p1(), Point::new(5.0, 5.0));
        assert_eq!(pieces[0].p2(), Point::new(10.0, 0.0));
        assert_eq!(pieces[0].top(), 5.0);
    }

    #[test]
    fn test_filter_shrinks_top_when_corner_is_left_and_above() {
        let s = diagonal().with_bounds(ObjectiveBounds::new(10.0, 20.0));
        let pieces = s.filter(Point::new(-1.0, 12.0), None);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].top(), 12.0);
        assert_eq!(pieces[0].right(), 10.0);
    }

    #[test]
    fn test_filter_shrinks_right_when_corner_is_below_and_right() {
        let s = diagonal().with_bounds(ObjectiveBounds::new(20.0, 10.0));
        let pieces = s.filter(Point::new(12.0, -1.0), None);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].right(), 12.0);
        assert_eq!(pieces[0].top(), 10.0);
    }

    #[test]
    fn test_filter_vertical_segment_projects_onto_its_abscissa() {
        let s = Segment::new(
            Point::new(2.0, 8.0),
            Point::new(2.0, 3.0),
            ObjectiveBounds::new(2.0, 8.0),
            (),
            (),
        );
        let pieces = s.filter(Point::new(1.0, 5.0), None);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].p1(), Point::new(2.0, 5.0));
        assert_eq!(pieces[0].p2(), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_contains_lattice_point() {
        let inc = ObjectiveIncrements::unit();
        assert!(diagonal().contains_lattice_point(&inc));

        let thin = Segment::new(
            Point::new(0.2, 0.9),
            Point::new(0.9, 0.2),
            ObjectiveBounds::new(0.95, 0.95),
            (),
            (),
        );
        assert!(!thin.contains_lattice_point(&inc));
        assert!(thin.should_be_considered(None));
        assert!(!thin.should_be_considered(Some(&inc)));
    }

    #[test]
    fn test_contains_lattice_point_with_unbounded_box() {
        let s = diagonal().with_bounds(ObjectiveBounds::unbounded());
        assert!(s.contains_lattice_point(&ObjectiveIncrements::unit()));
    }

    #[test]
    fn test_filter_drops_pieces_without_lattice_points_when_tightening() {
        let inc = ObjectiveIncrements::unit();
        let s = Segment::new(
            Point::new(0.1, 1.9),
            Point::new(1.9, 0.1),
            ObjectiveBounds::new(1.95, 1.95),
            (),
            (),
        );
        assert!(s.contains_lattice_point(&inc));

        let corner = Point::new(0.5, 0.5);
        assert_eq!(s.filter(corner, None).len(), 2);
        let pieces = s.filter(corner, Some(&inc));
        assert!(pieces.is_empty(), "pieces: {:?}", pieces);
    }
}
