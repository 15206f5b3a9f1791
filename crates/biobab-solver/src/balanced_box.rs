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

//! # Balanced Box Method
//!
//! The search works on rectangles spanned by two known non-dominated points.
//! It starts with the rectangle between the two lexicographic extreme points
//! and always processes the largest open rectangle next.
//!
//! A rectangle is split by halving its height: the lexicographic minimum of
//! the first objective below the middle line gives the new lower-left point,
//! and the lexicographic minimum of the second objective left of it gives the
//! new upper-right point. Both remaining sub-rectangles are queued if an
//! integral point could still fit into them.
//!
//! Rectangles larger than `balanced_box_beta` times the initial rectangle are
//! first harvested: one equal-weight solve yields a set of integral points,
//! which then guide a sequence of cheaper solves peeling the rectangle from
//! the bottom right. Without a harvested point the rectangle is split as
//! above.

use crate::{algorithm::FrontierAlgorithm, scalarize::Scalarizer};
use biobab_bnb::queue::NodeQueue;
use biobab_core::{
    math::{
        bounds::ObjectiveBounds,
        point::{Objective, Point},
        rectangle::Rectangle,
    },
    num::{increments::ObjectiveIncrements, value::ObjectiveValue},
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::{ExplorationStrategy, SearchConfig},
    context::SearchContext,
    error::SearchInterrupted,
    monitor::search_monitor::SearchMonitor,
};
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalancedBox {
    beta: f64,
    scalarizer: Scalarizer,
}

impl BalancedBox {
    pub fn new(beta: f64, scalarizer: Scalarizer) -> Self {
        Self { beta, scalarizer }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.balanced_box_beta, Scalarizer::from_config(config))
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl FrontierAlgorithm for BalancedBox {
    fn name(&self) -> &str {
        "BalancedBox"
    }

    fn run<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let outer = ctx.config().initial_bounds(ctx.oracle().valid_bounds());
        let Some(top) = self.scalarizer.lexmin(ctx, Objective::First, outer, frontier)? else {
            info!("no feasible point, balanced box method is over");
            return Ok(());
        };
        let Some(bottom) = self.scalarizer.lexmin(ctx, Objective::Second, outer, frontier)? else {
            return Ok(());
        };

        let initial_area = (bottom.z1() - top.z1()) * (top.z2() - bottom.z2());
        let mut explorer = Explorer {
            scalarizer: self.scalarizer,
            outer,
            increments: *ctx.increments(),
            harvest_area: self.beta * initial_area,
            queue: NodeQueue::new(ExplorationStrategy::BestFirst),
        };
        info!(%top, %bottom, initial_area, "starting balanced box method");

        explorer.push_if_must(top, bottom);
        while let Some(rectangle) = explorer.queue.pop() {
            ctx.checkpoint()?;
            ctx.statistics_mut().on_rectangle_explored();
            explorer.explore(ctx, rectangle, frontier)?;
        }

        info!(
            rectangles = ctx.statistics().rectangles_explored,
            frontier = frontier.len(),
            "balanced box method is over"
        );
        Ok(())
    }
}

/// The state of one balanced box run.
struct Explorer {
    scalarizer: Scalarizer,
    outer: ObjectiveBounds,
    increments: ObjectiveIncrements,
    harvest_area: f64,
    queue: NodeQueue<Rectangle>,
}

impl Explorer {
    /// Queues the rectangle spanned by both points if an unseen integral
    /// point could lie strictly inside it.
    fn push_if_must(&mut self, upper_left: Point, lower_right: Point) {
        let width = lower_right.z1() - upper_left.z1();
        let height = upper_left.z2() - lower_right.z2();
        if width > self.increments.z1() && height > self.increments.z2() {
            let rectangle = Rectangle::new(upper_left, lower_right);
            trace!(%rectangle, "pushing rectangle");
            self.queue.push(rectangle);
        }
    }

    fn explore<O, M>(
        &mut self,
        ctx: &mut SearchContext<'_, O, M>,
        rectangle: Rectangle,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        if !rectangle.exceeds(&self.increments) {
            return Ok(());
        }
        debug!(%rectangle, area = rectangle.area(), queue = self.queue.len(), "exploring rectangle");
        if rectangle.area() > self.harvest_area {
            self.explore_with_harvesting(ctx, rectangle, frontier)
        } else {
            self.explore_basically(ctx, rectangle, frontier)
        }
    }

    fn explore_basically<O, M>(
        &mut self,
        ctx: &mut SearchContext<'_, O, M>,
        rectangle: Rectangle,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let (upper_left, lower_right) = (rectangle.upper_left(), rectangle.lower_right());
        let inc = self.increments;

        let middle = (upper_left.z2() + lower_right.z2()) / 2.0;
        let lower = if middle - lower_right.z2() >= inc.z2() {
            let bounds = ObjectiveBounds::new(self.outer.right(), middle);
            self.scalarizer.lexmin(ctx, Objective::First, bounds, frontier)?
        } else {
            Some(lower_right)
        };
        let Some(lower) = lower else {
            return Ok(());
        };
        if lower.z1() <= lower_right.z1() - inc.z1() {
            self.push_if_must(lower, lower_right);
        }

        let left_of = lower.z1() - inc.z1();
        let upper = if left_of - upper_left.z1() >= inc.z1() {
            let bounds = ObjectiveBounds::new(left_of, self.outer.top());
            self.scalarizer.lexmin(ctx, Objective::Second, bounds, frontier)?
        } else {
            Some(upper_left)
        };
        if let Some(upper) = upper {
            if upper.z1() >= upper_left.z1() + inc.z1() {
                self.push_if_must(upper_left, upper);
            }
        }
        Ok(())
    }

    fn explore_with_harvesting<O, M>(
        &mut self,
        ctx: &mut SearchContext<'_, O, M>,
        rectangle: Rectangle,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let inc = self.increments;
        let known = frontier.clone();
        let bounds = ObjectiveBounds::new(rectangle.lower_right().z1(), rectangle.upper_left().z2());
        let (_, harvested) = self.harvesting_solve(ctx, 1.0, 1.0, bounds, frontier)?;

        let source = if self.scalarizer.is_relaxed() {
            harvested
        } else {
            let mut pool = frontier.empty_like();
            ctx.oracle().harvest_solution_pool(&mut pool);
            for solution in pool.iter() {
                if frontier.update_with_solution(solution.clone()) {
                    ctx.report_solution(&solution.point());
                }
            }
            pool
        };

        let inner = rectangle.shrunk(&inc);
        let mut pending: Vec<Point> = source
            .points()
            .filter(|p| inner.contains(p) && !known.dominates_point(p))
            .collect();
        debug!(%rectangle, harvested = pending.len(), "harvested points");
        if pending.is_empty() {
            return self.explore_basically(ctx, rectangle, frontier);
        }

        let mut rectangle = rectangle;
        while let Some(&target) = pending.last() {
            let below = ObjectiveBounds::new(rectangle.lower_right().z1(), target.z2() - inc.z2());
            let Some(lower) = self.scalarizer.lexmin(ctx, Objective::First, below, frontier)? else {
                return Ok(());
            };
            if !lower.is_close_to(&rectangle.lower_right()) {
                self.push_if_must(lower, rectangle.lower_right());
            }

            // The part of the rectangle left of `lower` and not below `target`.
            let left_of = lower.z1() - inc.z1();
            let upper_left = rectangle.upper_left();
            let upper = if target.z1() < lower.z1() - f64::CLOSE_ENOUGH_EPSILON {
                let bounds = ObjectiveBounds::new(left_of, target.z2());
                self.harvesting_solve(ctx, 1.0, 0.0, bounds, frontier)?.0
            } else {
                pending.retain(|p| within(p, &upper_left, left_of, target.z2()) && !p.is_close_to(&target));
                let bounds = ObjectiveBounds::new(left_of, upper_left.z2());
                self.scalarizer.lexmin(ctx, Objective::Second, bounds, frontier)?
            };

            if let Some(upper) = upper.filter(|u| !u.is_close_to(&upper_left)) {
                pending.retain(|p| {
                    within(p, &upper_left, upper.z1(), upper.z2())
                        && !p.is_close_to(&target)
                        && !p.is_close_to(&upper)
                });
                if pending.is_empty() {
                    self.push_if_must(upper_left, upper);
                    break;
                }
                rectangle.set_lower_right(upper);
            }
            pending.retain(|p| !p.is_close_to(&target));
        }
        Ok(())
    }

    /// A weighted-sum solve whose integral points are collected in a fresh
    /// set, merged into `frontier` and returned with the optimum.
    fn harvesting_solve<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        w1: f64,
        w2: f64,
        bounds: ObjectiveBounds,
        frontier: &mut ParetoSet,
    ) -> Result<(Option<Point>, ParetoSet), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let mut harvested = frontier.empty_like();
        let result = self.scalarizer.weighted_sum(ctx, w1, w2, bounds, &mut harvested);
        frontier.merge(&harvested);
        Ok((result?, harvested))
    }
}

/// Inclusive containment in the box between `upper_left` and `(right, bottom)`.
#[inline]
fn within(point: &Point, upper_left: &Point, right: f64, bottom: f64) -> bool {
    point.z1() >= upper_left.z1() && point.z1() <= right && point.z2() >= bottom && point.z2() <= upper_left.z2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::point_set::{OracleMode, PointSetOracle};
    use biobab_search::{monitor::no_op::NoOperationMonitor, stats::SearchStatistics};

    const STAIRCASE: [(f64, f64); 7] = [
        (0.0, 10.0),
        (2.0, 7.0),
        (4.0, 5.0),
        (5.0, 4.0),
        (7.0, 2.0),
        (10.0, 0.0),
        (8.0, 8.0),
    ];

    fn config(beta: f64, linear_relaxation: bool) -> SearchConfig {
        SearchConfig {
            balanced_box_beta: beta,
            ..SearchConfig::default()
        }
        .with_linear_relaxation(linear_relaxation)
        .resolved()
    }

    fn run(points: &[(f64, f64)], mode: OracleMode, config: &SearchConfig) -> (Vec<(f64, f64)>, SearchStatistics) {
        let mut oracle = PointSetOracle::from_points(points, mode);
        let mut monitor = NoOperationMonitor::new();
        let mut ctx = SearchContext::new(&mut oracle, &mut monitor, config);
        let mut frontier = ctx.new_frontier();
        BalancedBox::from_config(config).run(&mut ctx, &mut frontier).unwrap();
        let points = frontier.points().map(|p| (p.z1(), p.z2())).collect();
        (points, ctx.into_statistics())
    }

    fn expected() -> Vec<(f64, f64)> {
        STAIRCASE[..6].to_vec()
    }

    #[test]
    fn test_within_is_inclusive() {
        let ul = Point::new(1.0, 5.0);
        assert!(within(&Point::new(1.0, 5.0), &ul, 3.0, 2.0));
        assert!(within(&Point::new(3.0, 2.0), &ul, 3.0, 2.0));
        assert!(!within(&Point::new(3.5, 2.0), &ul, 3.0, 2.0));
        assert!(!within(&Point::new(0.5, 4.0), &ul, 3.0, 2.0));
    }

    #[test]
    fn test_basic_splitting_finds_the_frontier() {
        for (mode, linear_relaxation) in [(OracleMode::Exact, false), (OracleMode::Relaxed, true)] {
            let (points, stats) = run(&STAIRCASE, mode, &config(1.0, linear_relaxation));
            assert_eq!(points, expected(), "basic splitting in {:?} mode", mode);
            assert!(stats.rectangles_explored >= 1);
        }
    }

    #[test]
    fn test_basic_splitting_explores_every_open_rectangle() {
        let (_, stats) = run(&STAIRCASE, OracleMode::Exact, &config(1.0, false));
        assert_eq!(stats.rectangles_explored, 4);
        assert_eq!(stats.oracle_calls, 2 + 4 * 2);
    }

    #[test]
    fn test_harvesting_finds_the_frontier() {
        for (mode, linear_relaxation) in [(OracleMode::Exact, false), (OracleMode::Relaxed, true)] {
            let (points, _) = run(&STAIRCASE, mode, &config(0.05, linear_relaxation));
            assert_eq!(points, expected(), "harvesting in {:?} mode", mode);
        }
    }

    #[test]
    fn test_harvesting_without_inner_points_falls_back_to_basic_splitting() {
        let points = [(0.0, 10.0), (10.0, 0.0), (10.0, 10.0)];
        let (basic_points, basic) = run(&points, OracleMode::Exact, &config(1.0, false));
        let (harvest_points, harvest) = run(&points, OracleMode::Exact, &config(0.05, false));

        assert_eq!(basic_points, vec![(0.0, 10.0), (10.0, 0.0)]);
        assert_eq!(harvest_points, basic_points);
        assert_eq!(harvest.rectangles_explored, basic.rectangles_explored);
        assert_eq!(
            harvest.oracle_calls,
            basic.oracle_calls + 1,
            "only the harvesting solve is added"
        );
    }

    #[test]
    fn test_single_point_needs_no_rectangle() {
        let (points, stats) = run(&[(3.0, 3.0), (4.0, 4.0)], OracleMode::Exact, &config(0.15, false));
        assert_eq!(points, vec![(3.0, 3.0)]);
        assert_eq!(stats.rectangles_explored, 0);
    }

    #[test]
    fn test_infeasible_problem_yields_empty_frontier() {
        let cfg = config(0.15, false).with_bounds(1.0, 1.0);
        let (points, stats) = run(&[(3.0, 3.0)], OracleMode::Exact, &cfg);
        assert!(points.is_empty());
        assert_eq!(stats.oracle_calls, 1);
    }
}
