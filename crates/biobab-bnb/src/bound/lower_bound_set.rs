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

//! # Lower Bound Sets
//!
//! A [`LowerBoundSet`] is a left-to-right sequence of segments bounding the
//! achievable frontier of one subproblem from below: no feasible point of the
//! subproblem lies strictly below the polyline.
//!
//! ## Construction
//!
//! [`LowerBoundSet::compute`] starts from the two lexicographic extreme points
//! and refines the segment between them with weighted-sum calls whose weights
//! are the segment's normal. A pending stack drives the refinement; pushing the
//! right half before the left half makes the accepted segments come out sorted.
//! A segment is accepted when
//!
//! - its endpoints coincide,
//! - lifting is enabled and the ceiled corner `(p1.z1, p2.z2)` lies strictly
//!   above its line, so no lattice point fits beneath it,
//! - the weighted-sum optimum along its normal is no better than its endpoints.
//!
//! ## Discontinuities
//!
//! After filtering with the frontier, consecutive segments may be separated by
//! a gap. [`LowerBoundSet::discontinuous_regions`] reports the `(right, top)`
//! box of every independent piece and [`LowerBoundSet::split`] partitions the
//! segments accordingly.

use crate::bound::metadata::{PointMetadata, VariableValues, distinct_points};
use biobab_core::{
    math::{
        bounds::ObjectiveBounds,
        point::{Objective, Point},
        segment::{Line, Segment},
    },
    num::{increments::ObjectiveIncrements, tolerance::similar_values},
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    context::SearchContext, error::SearchInterrupted, monitor::search_monitor::SearchMonitor,
};
use tracing::trace;

/// A segment of a lower bound set.
pub type BoundSegment = Segment<PointMetadata>;

/// A point found during construction together with the oracle's report for it.
type Vertex = (Point, PointMetadata);

/// The piecewise-linear outer approximation of a subproblem's frontier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LowerBoundSet {
    segments: Vec<BoundSegment>,
    region: Option<ObjectiveBounds>,
}

impl LowerBoundSet {
    #[inline]
    pub fn new(segments: Vec<BoundSegment>) -> Self {
        Self {
            segments,
            region: None,
        }
    }

    /// The bound set of an infeasible or fully dominated subproblem.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Computes the lower bound set of the subproblem restricted to `bounds`.
    ///
    /// Integral points the oracle finds along the way are recorded into
    /// `frontier`. The two extreme points are computed without cutoff since
    /// their metadata is needed for branching.
    ///
    /// # Panics
    ///
    /// Panics if the oracle returns a point that breaks the left-to-right order
    /// of a pending segment. This indicates a broken oracle or tolerance.
    pub fn compute<O, M>(
        ctx: &mut SearchContext<'_, O, M>,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<Self, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let Some(e1) = ctx.lexmin(Objective::First, bounds, false, frontier)? else {
            return Ok(Self::empty());
        };
        let e1 = (e1, capture(ctx));
        let Some(e2) = ctx.lexmin(Objective::Second, bounds, false, frontier)? else {
            return Ok(Self::empty());
        };
        let e2 = (e2, capture(ctx));
        trace!(e1 = %e1.0, e2 = %e2.0, "extreme points");

        let config = ctx.config();
        let increments = *ctx.increments();
        let tightening = ctx.tightening().copied();

        let mut pending: Vec<(Vertex, Vertex)> = vec![(e1, e2)];
        let mut accepted: Vec<BoundSegment> = Vec::new();

        while let Some((c1, mut c2)) = pending.pop() {
            if c1.0.is_close_to(&c2.0) {
                c2 = c1.clone();
            }
            if c1.0.z1() > c2.0.z1() {
                panic!(
                    "called `LowerBoundSet::compute` with an inconsistent segment: {} lies right of {}",
                    c1.0, c2.0
                );
            }

            let lifted = config.lb_lifting && defines_valid_bound(c1.0, c2.0, &increments);
            if c1.0 == c2.0 || lifted {
                trace!(p1 = %c1.0, p2 = %c2.0, lifted, "segment accepted");
                accept(&mut accepted, c1, c2, &pending, bounds, tightening.as_ref());
                continue;
            }

            let alpha = c2.0.z1() - c1.0.z1();
            let beta = c1.0.z2() - c2.0.z2();
            match ctx.weighted_sum(beta, alpha, bounds, true, frontier)? {
                None => {
                    trace!(p1 = %c1.0, p2 = %c2.0, "no point along the segment normal, dropping it");
                }
                Some(c3)
                    if similar_values(
                        c1.0.weighted_sum(beta, alpha),
                        c3.weighted_sum(beta, alpha),
                        config.on_segment_tolerance,
                    ) =>
                {
                    trace!(p1 = %c1.0, p2 = %c2.0, "segment lies on the hull");
                    accept(&mut accepted, c1, c2, &pending, bounds, tightening.as_ref());
                }
                Some(c3) => {
                    trace!(point = %c3, "new hull point");
                    let c3 = (c3, capture(ctx));
                    pending.push((c3.clone(), c2));
                    pending.push((c1, c3));
                }
            }
        }

        Ok(Self::new(accepted))
    }

    #[inline]
    pub fn segments(&self) -> &[BoundSegment] {
        &self.segments
    }

    #[inline]
    pub fn into_segments(self) -> Vec<BoundSegment> {
        self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The `(right, top)` box of the set: the region it was split into, or
    /// the right bound of its last segment and the top bound of its first.
    pub fn bounds(&self) -> Option<ObjectiveBounds> {
        if let Some(region) = self.region {
            return Some(region);
        }
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        Some(ObjectiveBounds::new(last.right(), first.top()))
    }

    /// Removes every part of the set dominated by a member of `frontier`,
    /// using the members' improved coordinates.
    pub fn filter(&mut self, frontier: &ParetoSet, tightening: Option<&ObjectiveIncrements>) {
        for solution in frontier {
            if self.segments.is_empty() {
                return;
            }
            let corner = solution.improved_point();
            self.segments = self
                .segments
                .iter()
                .flat_map(|s| s.filter(corner, tightening))
                .collect();
        }
    }

    /// `true` if the set is empty or a single integral point, i.e. the node
    /// needs no further branching.
    pub fn is_leaf(&self) -> bool {
        match self.segments.as_slice() {
            [] => true,
            [only] => only.is_degenerate() && only.metadata1().is_integer(),
            _ => false,
        }
    }

    /// Indices `i` such that a discontinuity separates segment `i` from `i + 1`.
    fn breaks(&self, max_gap: f64) -> Vec<usize> {
        self.segments
            .windows(2)
            .enumerate()
            .filter(|(_, w)| {
                let (left, right) = (&w[0], &w[1]);
                let gap = right.p1().z1() - left.p2().z1() >= max_gap
                    || right.p1().z2() - left.p2().z2() >= max_gap;
                gap && right.top() != left.top()
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// The `(right, top)` box of each independent piece, left to right. A
    /// continuous set yields one region; an empty set yields none.
    pub fn discontinuous_regions(&self, max_gap: f64) -> Vec<ObjectiveBounds> {
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return Vec::new();
        };
        let mut regions = Vec::new();
        let mut top = first.top();
        for i in self.breaks(max_gap) {
            regions.push(ObjectiveBounds::new(self.segments[i].p2().z1(), top));
            top = self.segments[i + 1].top();
        }
        regions.push(ObjectiveBounds::new(last.right(), top));
        regions
    }

    /// Partitions the set at its discontinuities. Each piece keeps its
    /// segments and metadata and is restricted to its region.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use biobab_core::math::{bounds::ObjectiveBounds, point::Point, segment::Segment};
    /// # use biobab_model::snapshot::DecisionSnapshot;
    /// # use biobab_bnb::bound::{lower_bound_set::LowerBoundSet, metadata::PointMetadata};
    /// let meta = PointMetadata::new(DecisionSnapshot::empty(), true);
    /// let left = Segment::new(
    ///     Point::new(0.0, 9.0),
    ///     Point::new(2.0, 6.0),
    ///     ObjectiveBounds::new(2.0, 10.0),
    ///     meta.clone(),
    ///     meta.clone(),
    /// );
    /// let right = Segment::new(
    ///     Point::new(5.0, 3.0),
    ///     Point::new(8.0, 0.0),
    ///     ObjectiveBounds::new(9.0, 4.0),
    ///     meta.clone(),
    ///     meta,
    /// );
    /// let set = LowerBoundSet::new(vec![left, right]);
    /// let pieces = set.split(0.02);
    /// assert_eq!(pieces.len(), 2);
    /// assert_eq!(pieces[0].bounds(), Some(ObjectiveBounds::new(2.0, 10.0)));
    /// assert_eq!(pieces[1].bounds(), Some(ObjectiveBounds::new(9.0, 4.0)));
    /// ```
    pub fn split(&self, max_gap: f64) -> Vec<LowerBoundSet> {
        let breaks = self.breaks(max_gap);
        if breaks.is_empty() {
            return vec![self.clone()];
        }
        let regions = self.discontinuous_regions(max_gap);
        let ends = breaks.iter().map(|&i| i + 1).chain(std::iter::once(self.segments.len()));

        let mut start = 0;
        ends.zip(regions)
            .map(|(end, region)| {
                let piece = LowerBoundSet {
                    segments: self.segments[start..end].to_vec(),
                    region: Some(region),
                };
                start = end;
                piece
            })
            .collect()
    }

    /// The distinct points of the set with their oracle metadata, left to right.
    pub fn points(&self) -> Vec<(Point, &PointMetadata)> {
        distinct_points(
            self.segments
                .iter()
                .flat_map(|s| [(s.p1(), s.metadata1()), (s.p2(), s.metadata2())]),
        )
    }

    /// Per-variable values across the distinct points of the set.
    pub fn variable_values(&self) -> VariableValues {
        VariableValues::collect(self.points().into_iter().map(|(_, m)| m))
    }
}

impl std::fmt::Display for LowerBoundSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBoundSet[")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        write!(f, "]")
    }
}

#[inline]
fn capture<O, M>(ctx: &SearchContext<'_, O, M>) -> PointMetadata
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    PointMetadata::new(ctx.decision_snapshot(), ctx.is_integer_solution())
}

/// `true` if no lattice point fits between the segment `p1`-`p2` and its
/// lower-left corner, which makes the segment a valid bound as it stands.
#[inline]
fn defines_valid_bound(p1: Point, p2: Point, increments: &ObjectiveIncrements) -> bool {
    let Some(line) = Line::through(p1, p2) else {
        return false;
    };
    let corner = increments.ceil_coords(Point::new(p1.z1(), p2.z2()));
    corner.z2() > line.z2_at(corner.z1())
}

/// Accepts the segment `c1`-`c2`. Its right bound is the start of the next
/// pending segment, or the subproblem's right bound for the last one.
fn accept(
    accepted: &mut Vec<BoundSegment>,
    c1: Vertex,
    c2: Vertex,
    pending: &[(Vertex, Vertex)],
    bounds: ObjectiveBounds,
    tightening: Option<&ObjectiveIncrements>,
) {
    let right = if pending.is_empty() {
        bounds.right()
    } else {
        c2.0.z1()
    };
    let segment = Segment::new(
        c1.0,
        c2.0,
        ObjectiveBounds::new(right, bounds.top()),
        c1.1,
        c2.1,
    );
    if segment.should_be_considered(tightening) {
        accepted.push(segment);
    }
}
