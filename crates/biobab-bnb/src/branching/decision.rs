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

//! Reversible branching decisions.
//!
//! A [`BranchingDecision`] restricts a subproblem either inside the oracle
//! (a variable bound or a linear constraint) or in objective space (a tighter
//! `(right, top)` box). Applying a decision yields an [`UndoEntry`] that puts
//! the oracle back exactly as it was.

use biobab_core::math::bounds::ObjectiveBounds;
use biobab_model::{
    constraint::LinearConstraint,
    index::{ConstraintId, VariableIndex},
    oracle::{BoundKind, ScalarizationOracle},
};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum BranchingDecision {
    /// Sets a bound of a binary variable.
    VariableBound {
        variable: VariableIndex,
        kind: BoundKind,
        value: f64,
    },
    /// Adds a linear constraint. Shared between the children that carry it.
    Constraint(Arc<LinearConstraint>),
    /// Restricts the objective box; the oracle is not touched.
    ObjectiveBox(ObjectiveBounds),
}

impl BranchingDecision {
    /// `variable <= 0`.
    #[inline]
    pub fn fix_to_zero(variable: VariableIndex) -> Self {
        BranchingDecision::VariableBound {
            variable,
            kind: BoundKind::Upper,
            value: 0.0,
        }
    }

    /// `variable >= 1`.
    #[inline]
    pub fn fix_to_one(variable: VariableIndex) -> Self {
        BranchingDecision::VariableBound {
            variable,
            kind: BoundKind::Lower,
            value: 1.0,
        }
    }

    #[inline]
    pub fn constraint(constraint: LinearConstraint) -> Self {
        BranchingDecision::Constraint(Arc::new(constraint))
    }

    /// Applies the decision to the oracle or to `bounds`.
    pub fn apply<O>(&self, oracle: &mut O, bounds: &mut ObjectiveBounds) -> UndoEntry
    where
        O: ScalarizationOracle + ?Sized,
    {
        match self {
            BranchingDecision::VariableBound {
                variable,
                kind,
                value,
            } => {
                let previous = oracle.set_variable_bound(*variable, *kind, *value);
                UndoEntry::VariableBound {
                    variable: *variable,
                    kind: *kind,
                    previous,
                }
            }
            BranchingDecision::Constraint(constraint) => {
                UndoEntry::Constraint(oracle.add_constraint(LinearConstraint::clone(constraint)))
            }
            BranchingDecision::ObjectiveBox(region) => {
                *bounds = bounds.intersect(region);
                UndoEntry::Nothing
            }
        }
    }
}

impl std::fmt::Display for BranchingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchingDecision::VariableBound {
                variable,
                kind,
                value,
            } => write!(f, "x{} {} {}", variable.get(), kind, value),
            BranchingDecision::Constraint(constraint) => write!(f, "{}", constraint),
            BranchingDecision::ObjectiveBox(region) => {
                write!(f, "z1 <= {}, z2 <= {}", region.right(), region.top())
            }
        }
    }
}

/// What it takes to revert one applied decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UndoEntry {
    VariableBound {
        variable: VariableIndex,
        kind: BoundKind,
        previous: f64,
    },
    Constraint(ConstraintId),
    Nothing,
}

impl UndoEntry {
    pub fn undo<O>(self, oracle: &mut O)
    where
        O: ScalarizationOracle + ?Sized,
    {
        match self {
            UndoEntry::VariableBound {
                variable,
                kind,
                previous,
            } => oracle.restore_variable_bound(variable, kind, previous),
            UndoEntry::Constraint(id) => oracle.remove_constraint(id),
            UndoEntry::Nothing => {}
        }
    }
}
