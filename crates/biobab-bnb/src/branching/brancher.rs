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

//! Branching policies.
//!
//! A [`Brancher`] turns a lower bound set into the decisions of its children.
//! Tree searches hold an ordered chain of branchers; for each piece of a bound
//! set the first brancher that yields any decision wins.

use crate::{
    bound::lower_bound_set::LowerBoundSet,
    branching::{decision::BranchingDecision, score::VariableScore},
};
use biobab_model::{constraint::LinearConstraint, index::VariableIndex, oracle::ScalarizationOracle};
use biobab_search::config::{BranchingRule, SearchConfig};

/// Values within this distance of 1 count as set to one by local branching.
const LOCAL_BRANCHING_TOLERANCE: f64 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Brancher {
    /// Splits on the best binary variable: `x <= 0` and `x >= 1`.
    Variable(VariableScore),
    /// One child per discontinuous region of the bound set.
    ObjectiveSpace,
    /// Branches on whether one more variable joins the variables that are one
    /// at every point of the bound set.
    LocalBranching,
    /// Branches on whether the variables that are one everywhere stay one.
    SimpleLocalBranching,
}

impl Brancher {
    /// The chain used by the bi-objective branch-and-bound.
    pub fn biobab_chain() -> Vec<Brancher> {
        vec![
            Brancher::Variable(VariableScore::ClosestToOne),
            Brancher::Variable(VariableScore::OftenFractional),
            Brancher::Variable(VariableScore::FractionalOnAverage),
            Brancher::Variable(VariableScore::FractionalAverage),
        ]
    }

    /// `rule` first, then the default chain as fallback.
    pub fn chain_for(rule: BranchingRule) -> Vec<Brancher> {
        let first = match rule {
            BranchingRule::Default => return Self::biobab_chain(),
            BranchingRule::ClosestToOne => Brancher::Variable(VariableScore::ClosestToOne),
            BranchingRule::FurthestFromOne => Brancher::Variable(VariableScore::FurthestFromOne),
            BranchingRule::FractionalOnAverage => Brancher::Variable(VariableScore::FractionalOnAverage),
            BranchingRule::FractionalAverage => Brancher::Variable(VariableScore::FractionalAverage),
            BranchingRule::OftenFractional => Brancher::Variable(VariableScore::OftenFractional),
            BranchingRule::Spread => Brancher::Variable(VariableScore::Spread),
            BranchingRule::Sensitivity => Brancher::Variable(VariableScore::Sensitivity),
            BranchingRule::LocalBranching => Brancher::LocalBranching,
            BranchingRule::SimpleLocalBranching => Brancher::SimpleLocalBranching,
        };
        let mut chain = vec![first];
        chain.extend(Self::biobab_chain().into_iter().filter(|b| *b != first));
        chain
    }

    /// The chain used by the single-objective searches over relaxations.
    pub fn weighted_sum_chain() -> Vec<Brancher> {
        vec![
            Brancher::Variable(VariableScore::FractionalAverage),
            Brancher::Variable(VariableScore::ClosestToOne),
            Brancher::Variable(VariableScore::FurthestFromOne),
            Brancher::Variable(VariableScore::OftenFractional),
            Brancher::Variable(VariableScore::FractionalOnAverage),
        ]
    }

    /// The decisions of the children of a node bounded by `lb`. Empty if this
    /// policy does not apply.
    pub fn branch<O>(&self, lb: &LowerBoundSet, oracle: &O, config: &SearchConfig) -> Vec<BranchingDecision>
    where
        O: ScalarizationOracle + ?Sized,
    {
        match self {
            Brancher::Variable(rule) => match rule.best_candidate(&lb.variable_values(), oracle) {
                Some(variable) => vec![
                    BranchingDecision::fix_to_zero(variable),
                    BranchingDecision::fix_to_one(variable),
                ],
                None => Vec::new(),
            },
            Brancher::ObjectiveSpace => {
                if !config.objective_space_branching {
                    return Vec::new();
                }
                let regions = lb.discontinuous_regions(config.lb_max_gap);
                if regions.len() < 2 {
                    return Vec::new();
                }
                regions.into_iter().map(BranchingDecision::ObjectiveBox).collect()
            }
            Brancher::LocalBranching => {
                let (fixed, best) = local_branching_candidates(lb);
                match best {
                    Some(best) if !fixed.is_empty() => {
                        let n = fixed.len() as f64;
                        let vars = || fixed.iter().copied().chain(std::iter::once(best));
                        vec![
                            BranchingDecision::constraint(LinearConstraint::sum_at_most(vars(), n)),
                            BranchingDecision::constraint(LinearConstraint::sum_at_least(vars(), n + 1.0)),
                        ]
                    }
                    _ => Vec::new(),
                }
            }
            Brancher::SimpleLocalBranching => {
                let (fixed, _) = local_branching_candidates(lb);
                if fixed.is_empty() {
                    return Vec::new();
                }
                let n = fixed.len() as f64;
                vec![
                    BranchingDecision::constraint(LinearConstraint::sum_at_most(fixed.iter().copied(), n - 1.0)),
                    BranchingDecision::constraint(LinearConstraint::sum_at_least(fixed, n)),
                ]
            }
        }
    }
}

impl std::fmt::Display for Brancher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Brancher::Variable(rule) => write!(f, "Variable({})", rule),
            Brancher::ObjectiveSpace => write!(f, "ObjectiveSpace"),
            Brancher::LocalBranching => write!(f, "LocalBranching"),
            Brancher::SimpleLocalBranching => write!(f, "SimpleLocalBranching"),
        }
    }
}

/// Variables that are one at every point, and the variable local branching
/// adds to them: the last one that is one somewhere, else the first other.
fn local_branching_candidates(lb: &LowerBoundSet) -> (Vec<VariableIndex>, Option<VariableIndex>) {
    let near_one = |v: f64| (v - 1.0).abs() <= LOCAL_BRANCHING_TOLERANCE;
    let mut fixed = Vec::new();
    let mut best = None;
    for (variable, values) in lb.variable_values().iter() {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if near_one(min) {
            fixed.push(variable);
        } else if near_one(max) || best.is_none() {
            best = Some(variable);
        }
    }
    (fixed, best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::metadata::PointMetadata;
    use biobab_core::math::{bounds::ObjectiveBounds, point::Point, segment::Segment};
    use biobab_model::{point_set::PointSetOracleBuilder, snapshot::DecisionSnapshot};

    fn meta(values: &[f64]) -> PointMetadata {
        PointMetadata::new(DecisionSnapshot::new(values.to_vec()), false)
    }

    fn segment(p1: (f64, f64), p2: (f64, f64), right: f64, top: f64, v1: &[f64], v2: &[f64]) -> Segment<PointMetadata> {
        Segment::new(
            Point::new(p1.0, p1.1),
            Point::new(p2.0, p2.1),
            ObjectiveBounds::new(right, top),
            meta(v1),
            meta(v2),
        )
    }

    fn constraints(decisions: &[BranchingDecision]) -> Vec<String> {
        decisions.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_variable_brancher_fixes_the_selected_variable() {
        let lb = LowerBoundSet::new(vec![segment((0.0, 4.0), (4.0, 0.0), 4.0, 4.0, &[1.0, 0.0], &[0.5, 0.7])]);
        let oracle = PointSetOracleBuilder::new(2).build();
        let decisions = Brancher::Variable(VariableScore::ClosestToOne).branch(&lb, &oracle, &SearchConfig::default());
        assert_eq!(constraints(&decisions), vec!["x1 <= 0", "x1 >= 1"]);
    }

    #[test]
    fn test_objective_space_brancher_needs_two_regions_and_the_switch() {
        let split = LowerBoundSet::new(vec![
            segment((0.0, 9.0), (2.0, 6.0), 2.0, 10.0, &[1.0], &[1.0]),
            segment((5.0, 3.0), (8.0, 0.0), 9.0, 4.0, &[0.0], &[0.0]),
        ]);
        let oracle = PointSetOracleBuilder::new(1).build();
        let config = SearchConfig::default();

        let decisions = Brancher::ObjectiveSpace.branch(&split, &oracle, &config);
        assert_eq!(
            decisions,
            vec![
                BranchingDecision::ObjectiveBox(ObjectiveBounds::new(2.0, 10.0)),
                BranchingDecision::ObjectiveBox(ObjectiveBounds::new(9.0, 4.0)),
            ]
        );

        let disabled = SearchConfig {
            objective_space_branching: false,
            ..SearchConfig::default()
        };
        assert!(Brancher::ObjectiveSpace.branch(&split, &oracle, &disabled).is_empty());

        let continuous = LowerBoundSet::new(vec![segment((0.0, 9.0), (2.0, 6.0), 2.0, 10.0, &[1.0], &[1.0])]);
        assert!(Brancher::ObjectiveSpace.branch(&continuous, &oracle, &config).is_empty());
    }

    #[test]
    fn test_local_branching_adds_a_variable_that_is_sometimes_one() {
        let lb = LowerBoundSet::new(vec![segment(
            (0.0, 4.0),
            (4.0, 0.0),
            4.0,
            4.0,
            &[1.0, 0.5, 0.0],
            &[1.0, 1.0, 0.2],
        )]);
        let oracle = PointSetOracleBuilder::new(3).build();
        let config = SearchConfig::default();

        let local = Brancher::LocalBranching.branch(&lb, &oracle, &config);
        assert_eq!(constraints(&local), vec!["x0 + x1 <= 1", "x0 + x1 >= 2"]);

        let simple = Brancher::SimpleLocalBranching.branch(&lb, &oracle, &config);
        assert_eq!(constraints(&simple), vec!["x0 <= 0", "x0 >= 1"]);
    }

    #[test]
    fn test_local_branching_without_fixed_variables_yields_nothing() {
        let lb = LowerBoundSet::new(vec![segment((0.0, 4.0), (4.0, 0.0), 4.0, 4.0, &[0.5, 0.0], &[1.0, 0.0])]);
        let oracle = PointSetOracleBuilder::new(2).build();
        let config = SearchConfig::default();
        assert!(Brancher::LocalBranching.branch(&lb, &oracle, &config).is_empty());
        assert!(Brancher::SimpleLocalBranching.branch(&lb, &oracle, &config).is_empty());
    }

    #[test]
    fn test_default_chains() {
        assert_eq!(Brancher::biobab_chain().len(), 4);
        assert_eq!(
            Brancher::weighted_sum_chain()[0],
            Brancher::Variable(VariableScore::FractionalAverage)
        );
        assert_eq!(format!("{}", Brancher::biobab_chain()[0]), "Variable(ClosestToOne)");
    }

    #[test]
    fn test_configured_rule_leads_the_chain() {
        assert_eq!(Brancher::chain_for(BranchingRule::Default), Brancher::biobab_chain());

        let spread = Brancher::chain_for(BranchingRule::Spread);
        assert_eq!(spread[0], Brancher::Variable(VariableScore::Spread));
        assert_eq!(&spread[1..], Brancher::biobab_chain().as_slice());

        let closest = Brancher::chain_for(BranchingRule::ClosestToOne);
        assert_eq!(closest, Brancher::biobab_chain(), "a rule already in the chain is not repeated");

        let local = Brancher::chain_for(BranchingRule::LocalBranching);
        assert_eq!(local[0], Brancher::LocalBranching);
        assert_eq!(local.len(), 5);
    }
}
