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

//! Search tree nodes.

use crate::branching::decision::BranchingDecision;
use biobab_core::math::bounds::ObjectiveBounds;

/// An open subproblem: the objective box it is restricted to and the
/// decisions leading to it from the root.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    bounds: ObjectiveBounds,
    decisions: Vec<BranchingDecision>,
    depth: usize,
}

impl Node {
    /// The root of a search over `bounds`.
    #[inline]
    pub fn root(bounds: ObjectiveBounds) -> Self {
        Self {
            bounds,
            decisions: Vec::new(),
            depth: 0,
        }
    }

    /// A child restricted to `bounds` that adds `decision` to this node's path.
    pub fn child(&self, bounds: ObjectiveBounds, decision: BranchingDecision) -> Self {
        let mut decisions = Vec::with_capacity(self.decisions.len() + 1);
        decisions.extend_from_slice(&self.decisions);
        decisions.push(decision);
        Self {
            bounds,
            decisions,
            depth: self.depth + 1,
        }
    }

    #[inline]
    pub fn bounds(&self) -> ObjectiveBounds {
        self.bounds
    }

    #[inline]
    pub fn decisions(&self) -> &[BranchingDecision] {
        &self.decisions
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Best-first priority: `right * top`.
    #[inline]
    pub fn score(&self) -> f64 {
        self.bounds.area_score()
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({} [", self.bounds)?;
        for (i, decision) in self.decisions.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", decision)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::index::VariableIndex;

    #[test]
    fn test_child_extends_path_and_depth() {
        let root = Node::root(ObjectiveBounds::new(10.0, 10.0));
        let child = root.child(
            ObjectiveBounds::new(5.0, 10.0),
            BranchingDecision::fix_to_zero(VariableIndex::new(2)),
        );
        let grandchild = child.child(
            ObjectiveBounds::new(5.0, 4.0),
            BranchingDecision::fix_to_one(VariableIndex::new(0)),
        );
        assert_eq!(root.depth(), 0);
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.decisions().len(), 2);
        assert!(root.decisions().is_empty(), "children must not alter their parent");
        assert_eq!(grandchild.score(), 20.0);
        assert_eq!(
            format!("{}", grandchild),
            "Node([z1 <= 5 | z2 <= 4] [x2 <= 0; x0 >= 1])"
        );
    }
}
