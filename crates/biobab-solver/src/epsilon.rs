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

//! # Epsilon-Constraint Methods
//!
//! [`EpsilonConstraint`] scans the frontier along one objective: each step
//! computes the lexicographic minimum of the primary objective and then
//! bounds the other objective strictly below the point found. The scan ends
//! with the first infeasible step.
//!
//! [`BidirectionalEpsilon`] alternates the primary objective after every
//! point, closing in on the frontier from both ends, and stops once a step
//! returns the point found by the step before.

use crate::{algorithm::FrontierAlgorithm, scalarize::Scalarizer};
use biobab_core::{
    math::{
        bounds::ObjectiveBounds,
        point::{Objective, Point},
    },
    num::increments::ObjectiveIncrements,
};
use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    config::SearchConfig, context::SearchContext, error::SearchInterrupted,
    monitor::search_monitor::SearchMonitor,
};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpsilonConstraint {
    objective: Objective,
    scalarizer: Scalarizer,
}

impl EpsilonConstraint {
    pub fn new(objective: Objective, scalarizer: Scalarizer) -> Self {
        Self {
            objective,
            scalarizer,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.epsilon_first_objective, Scalarizer::from_config(config))
    }

    #[inline]
    pub fn objective(&self) -> Objective {
        self.objective
    }
}

impl FrontierAlgorithm for EpsilonConstraint {
    fn name(&self) -> &str {
        "EpsilonConstraint"
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
        let increments = *ctx.increments();
        let mut bounds = ctx.config().initial_bounds(ctx.oracle().valid_bounds());
        info!(objective = ?self.objective, %bounds, "starting epsilon-constraint scan");

        while let Some(point) = self.scalarizer.lexmin(ctx, self.objective, bounds, frontier)? {
            debug!(%point, "epsilon-constraint step");
            bounds = tightened_below(bounds, &point, self.objective.other(), &increments);
        }

        info!(frontier = frontier.len(), "epsilon-constraint scan is over");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidirectionalEpsilon {
    first: Objective,
    scalarizer: Scalarizer,
}

impl BidirectionalEpsilon {
    pub fn new(first: Objective, scalarizer: Scalarizer) -> Self {
        Self { first, scalarizer }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.epsilon_first_objective, Scalarizer::from_config(config))
    }
}

impl FrontierAlgorithm for BidirectionalEpsilon {
    fn name(&self) -> &str {
        "BidirectionalEpsilon"
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
        let increments = *ctx.increments();
        let outer = ctx.config().initial_bounds(ctx.oracle().valid_bounds());
        // Each objective's scan tightens only its own side of the box.
        let mut local = outer;
        let mut objective = self.first;
        let mut last: Option<Point> = None;
        info!(first = ?self.first, bounds = %outer, "starting bi-directional epsilon-constraint scan");

        loop {
            let bounds = match objective {
                Objective::First => ObjectiveBounds::new(outer.right(), local.top()),
                Objective::Second => ObjectiveBounds::new(local.right(), outer.top()),
            };
            let Some(point) = self.scalarizer.lexmin(ctx, objective, bounds, frontier)? else {
                break;
            };
            if last.is_some_and(|previous| point.is_close_to(&previous)) {
                break;
            }
            debug!(%point, ?objective, "bi-directional epsilon-constraint step");

            last = Some(point);
            local = tightened_below(local, &point, objective.other(), &increments);
            objective = objective.other();
        }

        info!(frontier = frontier.len(), "bi-directional epsilon-constraint scan is over");
        Ok(())
    }
}

/// `bounds` with the side of `objective` moved one increment below `point`.
#[inline]
fn tightened_below(
    bounds: ObjectiveBounds,
    point: &Point,
    objective: Objective,
    increments: &ObjectiveIncrements,
) -> ObjectiveBounds {
    let level = point.get(objective) - increments.get(objective);
    match objective {
        Objective::First => bounds.with_right(level),
        Objective::Second => bounds.with_top(level),
    }
}
