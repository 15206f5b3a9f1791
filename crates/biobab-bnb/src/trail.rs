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

//! # Decision Trail
//!
//! The oracle is shared by every node of a search, so a node's branching
//! decisions must be undone before the next node is looked at. The
//! [`DecisionTrail`] records one [`UndoEntry`] per applied decision and
//! [`AppliedDecisions`] is the scope in which they hold: it derefs to the
//! [`SearchContext`] for bounding and reverts the decisions, newest first,
//! when dropped. Early returns through `?` therefore restore the oracle too.

use crate::branching::decision::{BranchingDecision, UndoEntry};
use biobab_core::math::bounds::ObjectiveBounds;
use biobab_model::oracle::ScalarizationOracle;
use biobab_search::{context::SearchContext, monitor::search_monitor::SearchMonitor};

/// A linear undo log.
#[derive(Debug, Clone, Default)]
pub struct DecisionTrail {
    entries: Vec<UndoEntry>,
}

impl DecisionTrail {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of decisions currently applied.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `decisions` in order, starting from the objective box `bounds`.
    /// Everything is reverted when the returned scope is dropped.
    pub fn apply_scoped<'t, 'c, 'a, O, M>(
        &'t mut self,
        ctx: &'c mut SearchContext<'a, O, M>,
        decisions: &[BranchingDecision],
        bounds: ObjectiveBounds,
    ) -> AppliedDecisions<'t, 'c, 'a, O, M>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized,
    {
        let start = self.entries.len();
        let mut bounds = bounds;
        for decision in decisions {
            let entry = decision.apply(ctx.oracle_mut(), &mut bounds);
            self.entries.push(entry);
        }
        AppliedDecisions {
            trail: self,
            ctx,
            bounds,
            start,
        }
    }

    fn backtrack<O>(&mut self, oracle: &mut O, start: usize)
    where
        O: ScalarizationOracle + ?Sized,
    {
        while self.entries.len() > start {
            if let Some(entry) = self.entries.pop() {
                entry.undo(oracle);
            }
        }
    }
}

/// A scope in which a node's decisions are applied to the oracle.
pub struct AppliedDecisions<'t, 'c, 'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    trail: &'t mut DecisionTrail,
    ctx: &'c mut SearchContext<'a, O, M>,
    bounds: ObjectiveBounds,
    start: usize,
}

impl<'t, 'c, 'a, O, M> AppliedDecisions<'t, 'c, 'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    /// The objective box after objective-space decisions.
    #[inline]
    pub fn bounds(&self) -> ObjectiveBounds {
        self.bounds
    }
}

impl<'t, 'c, 'a, O, M> std::ops::Deref for AppliedDecisions<'t, 'c, 'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    type Target = SearchContext<'a, O, M>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<'t, 'c, 'a, O, M> std::ops::DerefMut for AppliedDecisions<'t, 'c, 'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl<'t, 'c, 'a, O, M> Drop for AppliedDecisions<'t, 'c, 'a, O, M>
where
    O: ScalarizationOracle + ?Sized,
    M: SearchMonitor + ?Sized,
{
    fn drop(&mut self) {
        self.trail.backtrack(self.ctx.oracle_mut(), self.start);
    }
}
