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

//! # Point Set Oracle
//!
//! A [`ScalarizationOracle`] over an explicitly enumerated feasible set. Each
//! candidate is an objective point together with the binary decision vector
//! that produces it. Variable bounds and linear constraints added by branching
//! filter the candidates, exactly like they would restrict a MIP.
//!
//! Two modes are supported:
//!
//! - [`OracleMode::Exact`]: every answer is the best feasible candidate inside
//!   the objective box, as an integer solver would return it.
//! - [`OracleMode::Relaxed`]: answers optimize over the convex hull of the
//!   feasible candidates intersected with the objective box, playing the role
//!   of a linear relaxation. Points on the hull interior of an edge carry the
//!   convex combination of both decision vectors and are fractional.
//!
//! Ties in the weighted sum are broken lexicographically (smaller `z1` first).

use crate::{
    constraint::LinearConstraint,
    index::{ConstraintId, VariableIndex},
    oracle::{BoundKind, OracleOutcome, ScalarizationOracle, WeightedSumQuery},
    pareto::ParetoSet,
    snapshot::DecisionSnapshot,
    solution::Solution,
};
use biobab_core::math::{
    bounds::ObjectiveBounds,
    point::{Objective, Point},
};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

const FEASIBILITY_TOLERANCE: f64 = 1e-9;
const TIE_TOLERANCE: f64 = 1e-9;
const CUTOFF_TOLERANCE: f64 = 1e-7;
const INTEGRALITY_EPSILON: f64 = 1e-6;

/// How the oracle answers weighted-sum queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OracleMode {
    #[default]
    Exact,
    Relaxed,
}

/// One enumerated solution.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    point: Point,
    values: DecisionSnapshot,
}

impl Candidate {
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    #[inline]
    pub fn values(&self) -> &DecisionSnapshot {
        &self.values
    }
}

/// Where the best point of a relaxed solve comes from.
#[derive(Clone, Copy, Debug)]
enum Source {
    Candidate(usize),
    Mix(usize, usize, f64),
}

#[derive(Clone, Debug)]
struct LastSolve {
    snapshot: DecisionSnapshot,
    integral: bool,
}

/// Builder for [`PointSetOracle`].
#[derive(Clone, Debug)]
pub struct PointSetOracleBuilder {
    name: String,
    num_variables: usize,
    candidates: Vec<Candidate>,
    mode: OracleMode,
    increments: [f64; 2],
    priorities: Vec<i32>,
    valid_bounds: ObjectiveBounds,
}

impl PointSetOracleBuilder {
    pub fn new(num_variables: usize) -> Self {
        Self {
            name: "PointSetOracle".to_string(),
            num_variables,
            candidates: Vec::new(),
            mode: OracleMode::Exact,
            increments: [1.0, 1.0],
            priorities: vec![0; num_variables],
            valid_bounds: ObjectiveBounds::unbounded(),
        }
    }

    /// Adds a feasible solution.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not assign every variable.
    pub fn add_candidate(mut self, point: Point, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            self.num_variables,
            "called `PointSetOracleBuilder::add_candidate` with {} values for {} variables",
            values.len(),
            self.num_variables
        );
        self.candidates.push(Candidate {
            point,
            values: DecisionSnapshot::new(values),
        });
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn mode(mut self, mode: OracleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn objective_increments(mut self, z1: f64, z2: f64) -> Self {
        self.increments = [z1, z2];
        self
    }

    /// # Panics
    ///
    /// Panics if `variable` is out of bounds.
    pub fn branch_priority(mut self, variable: VariableIndex, priority: i32) -> Self {
        assert!(
            variable.get() < self.num_variables,
            "called `PointSetOracleBuilder::branch_priority` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables,
            variable.get()
        );
        self.priorities[variable.get()] = priority;
        self
    }

    pub fn valid_bounds(mut self, bounds: ObjectiveBounds) -> Self {
        self.valid_bounds = bounds;
        self
    }

    pub fn build(self) -> PointSetOracle {
        let n = self.candidates.len();
        let mut feasible = FixedBitSet::with_capacity(n);
        feasible.insert_range(..);
        PointSetOracle {
            name: self.name,
            lower: vec![0.0; self.num_variables],
            upper: vec![1.0; self.num_variables],
            num_variables: self.num_variables,
            candidates: self.candidates,
            mode: self.mode,
            increments: self.increments,
            priorities: self.priorities,
            valid_bounds: self.valid_bounds,
            constraints: FxHashMap::default(),
            next_constraint: ConstraintId::new(0),
            feasible,
            stale: false,
            last: None,
            last_bounds: ObjectiveBounds::unbounded(),
        }
    }
}

/// An oracle answering from an enumerated list of candidate solutions.
#[derive(Clone, Debug)]
pub struct PointSetOracle {
    name: String,
    num_variables: usize,
    candidates: Vec<Candidate>,
    mode: OracleMode,
    increments: [f64; 2],
    priorities: Vec<i32>,
    valid_bounds: ObjectiveBounds,
    lower: Vec<f64>,
    upper: Vec<f64>,
    constraints: FxHashMap<ConstraintId, LinearConstraint>,
    next_constraint: ConstraintId,
    feasible: FixedBitSet,
    stale: bool,
    last: Option<LastSolve>,
    last_bounds: ObjectiveBounds,
}

impl PointSetOracle {
    /// One candidate per point with a one-hot decision vector: variable `i`
    /// is `1` exactly in candidate `i`.
    pub fn from_points(points: &[(f64, f64)], mode: OracleMode) -> Self {
        let n = points.len();
        points
            .iter()
            .enumerate()
            .fold(
                PointSetOracleBuilder::new(n).mode(mode),
                |builder, (i, &(z1, z2))| {
                    let mut values = vec![0.0; n];
                    values[i] = 1.0;
                    builder.add_candidate(Point::new(z1, z2), values)
                },
            )
            .build()
    }

    #[inline]
    pub fn mode(&self) -> OracleMode {
        self.mode
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The current `(lower, upper)` bounds of `variable`.
    #[inline]
    pub fn variable_bounds(&self, variable: VariableIndex) -> (f64, f64) {
        (self.lower[variable.get()], self.upper[variable.get()])
    }

    /// `true` if `values` respect every variable bound and constraint.
    pub fn is_assignment_feasible(&self, values: &[f64]) -> bool {
        assignment_feasible(&self.lower, &self.upper, &self.constraints, values)
    }

    fn refresh_feasibility(&mut self) {
        if !self.stale {
            return;
        }
        for (i, candidate) in self.candidates.iter().enumerate() {
            let ok = assignment_feasible(
                &self.lower,
                &self.upper,
                &self.constraints,
                candidate.values.values(),
            );
            self.feasible.set(i, ok);
        }
        self.stale = false;
    }

    fn best_candidate(&self, query: &WeightedSumQuery) -> Option<(f64, Point, Source)> {
        let mut best: Option<(f64, Point, Source)> = None;
        for i in self.feasible.ones() {
            let point = self.candidates[i].point;
            if !in_box(&point, &query.bounds) {
                continue;
            }
            consider(&mut best, query.value(&point), point, Source::Candidate(i));
        }
        best
    }

    fn best_relaxed(&self, query: &WeightedSumQuery) -> Option<(f64, Point, Source)> {
        let mut best = self.best_candidate(query);
        let feasible: Vec<usize> = self.feasible.ones().collect();
        let (right, top) = (query.bounds.right(), query.bounds.top());

        for (k, &i) in feasible.iter().enumerate() {
            for &j in &feasible[k + 1..] {
                let (a, b) = (self.candidates[i].point, self.candidates[j].point);
                let crossings = [
                    crossing(a.z1(), b.z1(), right),
                    crossing(a.z2(), b.z2(), top),
                ];
                for lambda in crossings.into_iter().flatten() {
                    let point = a.interpolate(&b, lambda);
                    if in_box(&point, &query.bounds) {
                        consider(&mut best, query.value(&point), point, Source::Mix(i, j, lambda));
                    }
                }
            }
        }
        best
    }

    fn snapshot_of(&self, source: Source) -> DecisionSnapshot {
        match source {
            Source::Candidate(i) => self.candidates[i].values.clone(),
            Source::Mix(i, j, lambda) => {
                let a = self.candidates[i].values.values();
                let b = self.candidates[j].values.values();
                DecisionSnapshot::new(
                    a.iter()
                        .zip(b)
                        .map(|(&x, &y)| x + lambda * (y - x))
                        .collect(),
                )
            }
        }
    }

    fn cutoff_solution(&self, query: &WeightedSumQuery, best: f64, frontier: &ParetoSet) -> Option<Solution> {
        frontier
            .iter()
            .filter(|u| in_box(&u.point(), &query.bounds))
            .filter(|u| self.is_assignment_feasible(u.assignment().values()))
            .filter(|u| best >= query.value(&u.point()) - CUTOFF_TOLERANCE)
            .min_by(|u, v| {
                query
                    .value(&u.point())
                    .partial_cmp(&query.value(&v.point()))
                    .unwrap_or(Ordering::Equal)
            })
            .cloned()
    }
}

fn assignment_feasible(
    lower: &[f64],
    upper: &[f64],
    constraints: &FxHashMap<ConstraintId, LinearConstraint>,
    values: &[f64],
) -> bool {
    values.len() == lower.len()
        && values
            .iter()
            .zip(lower.iter().zip(upper))
            .all(|(&v, (&lo, &up))| v >= lo - FEASIBILITY_TOLERANCE && v <= up + FEASIBILITY_TOLERANCE)
        && constraints
            .values()
            .all(|c| c.is_satisfied_by(values, FEASIBILITY_TOLERANCE))
}

#[inline]
fn in_box(point: &Point, bounds: &ObjectiveBounds) -> bool {
    point.z1() <= bounds.right() + FEASIBILITY_TOLERANCE && point.z2() <= bounds.top() + FEASIBILITY_TOLERANCE
}

/// The interpolation parameter at which `a + lambda * (b - a)` equals `level`,
/// if the level is crossed strictly between the endpoints.
#[inline]
fn crossing(a: f64, b: f64, level: f64) -> Option<f64> {
    if !level.is_finite() || (a - level) * (b - level) >= 0.0 {
        return None;
    }
    let lambda = (level - a) / (b - a);
    (lambda > TIE_TOLERANCE && lambda < 1.0 - TIE_TOLERANCE).then_some(lambda)
}

#[inline]
fn consider(best: &mut Option<(f64, Point, Source)>, value: f64, point: Point, source: Source) {
    let improves = match best {
        None => true,
        Some((best_value, best_point, _)) => {
            if value < *best_value - TIE_TOLERANCE {
                true
            } else if value > *best_value + TIE_TOLERANCE {
                false
            } else {
                point.lexicographic_cmp(best_point, Objective::First) == Ordering::Less
            }
        }
    };
    if improves {
        *best = Some((value, point, source));
    }
}

impl ScalarizationOracle for PointSetOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_variables(&self) -> usize {
        self.num_variables
    }

    fn solve_weighted_sum(&mut self, query: &WeightedSumQuery, frontier: &mut ParetoSet) -> OracleOutcome {
        self.refresh_feasibility();
        self.last_bounds = query.bounds;

        let best = match self.mode {
            OracleMode::Exact => self.best_candidate(query),
            OracleMode::Relaxed => self.best_relaxed(query),
        };
        let Some((value, point, source)) = best else {
            self.last = None;
            return OracleOutcome::Infeasible;
        };

        if query.allow_cutoff {
            if let Some(u) = self.cutoff_solution(query, value, frontier) {
                self.last = Some(LastSolve {
                    snapshot: u.assignment().clone(),
                    integral: true,
                });
                return OracleOutcome::Cutoff(u.point());
            }
        }

        let snapshot = self.snapshot_of(source);
        let integral = snapshot.is_integral(INTEGRALITY_EPSILON);
        if integral {
            frontier.record(point, snapshot.clone());
        }
        self.last = Some(LastSolve { snapshot, integral });
        OracleOutcome::Optimal(point)
    }

    fn harvest_solution_pool(&self, pool: &mut ParetoSet) {
        for candidate in &self.candidates {
            if in_box(&candidate.point, &self.last_bounds)
                && self.is_assignment_feasible(candidate.values.values())
            {
                pool.record(candidate.point, candidate.values.clone());
            }
        }
    }

    fn is_integer_solution(&self) -> bool {
        self.last.as_ref().is_some_and(|l| l.integral)
    }

    fn decision_snapshot(&self) -> DecisionSnapshot {
        self.last
            .as_ref()
            .map_or_else(DecisionSnapshot::empty, |l| l.snapshot.clone())
    }

    fn minimum_objective_increment(&self, objective: Objective) -> f64 {
        self.increments[objective.number() - 1]
    }

    fn valid_bounds(&self) -> ObjectiveBounds {
        self.valid_bounds
    }

    fn set_variable_bound(&mut self, variable: VariableIndex, kind: BoundKind, value: f64) -> f64 {
        let slot = match kind {
            BoundKind::Lower => &mut self.lower[variable.get()],
            BoundKind::Upper => &mut self.upper[variable.get()],
        };
        let previous = std::mem::replace(slot, value);
        self.stale = true;
        previous
    }

    fn restore_variable_bound(&mut self, variable: VariableIndex, kind: BoundKind, previous: f64) {
        self.set_variable_bound(variable, kind, previous);
    }

    fn add_constraint(&mut self, constraint: LinearConstraint) -> ConstraintId {
        let id = self.next_constraint;
        self.next_constraint = id.next();
        self.constraints.insert(id, constraint);
        self.stale = true;
        id
    }

    fn remove_constraint(&mut self, id: ConstraintId) {
        if self.constraints.remove(&id).is_some() {
            self.stale = true;
        }
    }

    fn branch_priority(&self, variable: VariableIndex) -> i32 {
        self.priorities.get(variable.get()).copied().unwrap_or(0)
    }
}
