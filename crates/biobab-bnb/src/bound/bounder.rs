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

//! Bounding strategies of the tree search.

use crate::bound::{lower_bound_set::LowerBoundSet, metadata::PointMetadata};
use biobab_core::math::{bounds::ObjectiveBounds, point::Point, segment::Segment};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    context::SearchContext, error::SearchInterrupted, monitor::search_monitor::SearchMonitor,
};
use tracing::trace;

/// Computes the lower bound set of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounder {
    /// The full bi-objective bound set, filtered by the frontier.
    BiObjective,
    /// A single weighted-sum point, used by the single-objective sub-search.
    /// The node is cut off once a frontier member is at least as good.
    WeightedSum { w1: f64, w2: f64 },
}

impl Bounder {
    pub fn bound<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<LowerBoundSet, SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        match *self {
            Bounder::BiObjective => {
                let mut lb = LowerBoundSet::compute(ctx, bounds, frontier)?;
                trace!(before = %lb, "bound set before filtering");
                lb.filter(frontier, ctx.tightening());
                Ok(lb)
            }
            Bounder::WeightedSum { w1, w2 } => {
                let Some(point) = ctx.weighted_sum(w1, w2, bounds, true, frontier)? else {
                    return Ok(LowerBoundSet::empty());
                };
                let value = point.weighted_sum(w1, w2);
                if frontier.points().any(|u| u.weighted_sum(w1, w2) <= value) {
                    return Ok(LowerBoundSet::empty());
                }

                let point = snap_into(point, bounds, ctx.config().feasibility_tolerance);
                let metadata = PointMetadata::new(ctx.decision_snapshot(), ctx.is_integer_solution());
                Ok(LowerBoundSet::new(vec![Segment::single(point, bounds, metadata)]))
            }
        }
    }
}

impl std::fmt::Display for Bounder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bounder::BiObjective => write!(f, "BiObjective"),
            Bounder::WeightedSum { w1, w2 } => write!(f, "WeightedSum({}, {})", w1, w2),
        }
    }
}

/// Moves coordinates that exceed `bounds` by less than `tolerance` onto the bound.
#[inline]
fn snap_into(point: Point, bounds: ObjectiveBounds, tolerance: f64) -> Point {
    let snap = |value: f64, bound: f64| {
        if bound < value && value - bound < tolerance {
            bound
        } else {
            value
        }
    };
    Point::new(snap(point.z1(), bounds.right()), snap(point.z2(), bounds.top()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::{config::SearchConfig, monitor::no_op::NoOperationMonitor};

    #[test]
    fn test_snap_into_only_moves_nearby_coordinates() {
        let bounds = ObjectiveBounds::new(5.0, 5.0);
        assert_eq!(snap_into(Point::new(5.0000001, 3.0), bounds, 1e-6), Point::new(5.0, 3.0));
        assert_eq!(snap_into(Point::new(6.0, 5.0000001), bounds, 1e-6), Point::new(6.0, 5.0));
    }

    #[test]
    fn test_weighted_sum_bound_returns_fractional_point() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (10.0, 0.0)], OracleMode::Relaxed);
        let config = SearchConfig::default();
        let mut monitor = NoOperationMonitor::new();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();

        let bounder = Bounder::WeightedSum { w1: 1.0, w2: 0.0 };
        let lb = bounder
            .bound(&mut ctx, ObjectiveBounds::new(f64::INFINITY, 4.0), &mut frontier)
            .unwrap();
        assert_eq!(lb.len(), 1);
        let s = &lb.segments()[0];
        assert!(s.is_degenerate());
        assert!((s.p1().z1() - 6.0).abs() < 1e-9, "unexpected point {}", s.p1());
        assert!(!s.metadata1().is_integer());
        assert!(!lb.is_leaf());
    }

    #[test]
    fn test_weighted_sum_bound_cuts_off_integral_points() {
        let mut oracle = PointSetOracle::from_points(&[(2.0, 3.0)], OracleMode::Relaxed);
        let config = SearchConfig::default();
        let mut monitor = NoOperationMonitor::new();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ParetoSet::new();

        let bounder = Bounder::WeightedSum { w1: 1.0, w2: 1.0 };
        let lb = bounder
            .bound(&mut ctx, ObjectiveBounds::unbounded(), &mut frontier)
            .unwrap();
        assert!(lb.is_empty(), "the integral optimum is already in the frontier");
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_bi_objective_bound_filters_with_frontier() {
        let mut oracle = PointSetOracle::from_points(&[(0.0, 10.0), (10.0, 0.0)], OracleMode::Exact);
        let config = SearchConfig::default();
        let mut monitor = NoOperationMonitor::new();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
        let mut frontier = ctx.new_frontier();

        let lb = Bounder::BiObjective
            .bound(&mut ctx, ObjectiveBounds::unbounded(), &mut frontier)
            .unwrap();
        assert_eq!(frontier.len(), 2);
        // Both extreme points are recorded; only the stretch between their
        // improved corners survives.
        assert_eq!(lb.len(), 1, "unexpected bound set {}", lb);
        let s = &lb.segments()[0];
        assert!((s.p1().z1() - 0.9).abs() < 1e-9, "unexpected segment {}", s);
        assert!((s.p2().z1() - 9.1).abs() < 1e-9, "unexpected segment {}", s);
    }
}
