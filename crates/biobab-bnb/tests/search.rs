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

use biobab_bnb::{
    bound::lower_bound_set::LowerBoundSet, branching::brancher::Brancher, node::Node, tree_search::TreeSearch,
};
use biobab_core::math::{bounds::ObjectiveBounds, point::Point};
use biobab_model::{
    pareto::ParetoSet,
    point_set::{OracleMode, PointSetOracle},
    snapshot::DecisionSnapshot,
};
use biobab_search::{
    config::{BranchingRule, ExplorationStrategy, SearchConfig},
    context::SearchContext,
    monitor::no_op::NoOperationMonitor,
};
use tracing_subscriber::EnvFilter;

const NONCONVEX: [(f64, f64); 8] = [
    (0.0, 12.0),
    (2.0, 9.0),
    (3.0, 8.0),
    (5.0, 7.0),
    (8.0, 3.0),
    (12.0, 0.0),
    (6.0, 9.0),
    (9.0, 9.0),
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn nondominated(points: &[(f64, f64)]) -> Vec<Point> {
    let mut result: Vec<Point> = points
        .iter()
        .filter(|&&(a1, a2)| {
            !points
                .iter()
                .any(|&(b1, b2)| b1 <= a1 && b2 <= a2 && (b1 < a1 || b2 < a2))
        })
        .map(|&(z1, z2)| Point::new(z1, z2))
        .collect();
    result.sort_by(|a, b| a.z1().total_cmp(&b.z1()));
    result.dedup();
    result
}

fn run_tree_search(points: &[(f64, f64)], config: &SearchConfig) -> Vec<Point> {
    let mut oracle = PointSetOracle::from_points(points, OracleMode::Relaxed);
    let mut monitor = NoOperationMonitor::new();
    let mut ctx = SearchContext::new(&mut oracle, &mut monitor, config);
    let mut frontier = ctx.new_frontier();

    TreeSearch::biobab(config)
        .run(&mut ctx, Node::root(ObjectiveBounds::unbounded()), &mut frontier)
        .unwrap();
    drop(ctx);
    assert_eq!(oracle.num_constraints(), 0, "branching decisions leaked into the oracle");
    frontier.points().collect()
}

#[test]
fn test_every_strategy_finds_the_nonconvex_frontier() {
    init_tracing();
    let expected = nondominated(&NONCONVEX);
    for strategy in [
        ExplorationStrategy::BreadthFirst,
        ExplorationStrategy::DepthFirst,
        ExplorationStrategy::BestFirst,
    ] {
        for objective_space_branching in [true, false] {
            let config = SearchConfig {
                objective_space_branching,
                ..SearchConfig::default()
            }
            .with_strategy(strategy);
            assert_eq!(
                run_tree_search(&NONCONVEX, &config),
                expected,
                "{:?} with objective-space branching {}",
                strategy,
                objective_space_branching
            );
        }
    }
}

#[test]
fn test_every_configured_branching_rule_finds_the_nonconvex_frontier() {
    init_tracing();
    let expected = nondominated(&NONCONVEX);
    for rule in [
        BranchingRule::FurthestFromOne,
        BranchingRule::FractionalAverage,
        BranchingRule::Spread,
        BranchingRule::Sensitivity,
        BranchingRule::LocalBranching,
        BranchingRule::SimpleLocalBranching,
    ] {
        let config = SearchConfig::default().with_branching(rule);
        assert_eq!(TreeSearch::biobab(&config).branchers()[0], Brancher::chain_for(rule)[0]);
        assert_eq!(run_tree_search(&NONCONVEX, &config), expected, "branching with {:?}", rule);
    }
}

#[test]
fn test_root_bound_set_never_cuts_off_a_feasible_point() {
    init_tracing();
    let mut oracle = PointSetOracle::from_points(&NONCONVEX, OracleMode::Relaxed);
    let mut monitor = NoOperationMonitor::new();
    let config = SearchConfig::default();
    let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
    let mut frontier = ctx.new_frontier();

    let lb = LowerBoundSet::compute(&mut ctx, ObjectiveBounds::unbounded(), &mut frontier).unwrap();
    assert!(!lb.is_empty());

    let segments = lb.segments();
    for pair in segments.windows(2) {
        assert!(pair[0].p2().z1() <= pair[1].p1().z1(), "segments out of order in {}", lb);
    }
    for &(z1, z2) in &NONCONVEX {
        let Some(segment) = segments
            .iter()
            .find(|s| s.p1().z1() <= z1 && z1 <= s.p2().z1())
        else {
            continue;
        };
        if let Some(line) = segment.line() {
            assert!(
                z2 >= line.z2_at(z1) - 1e-6,
                "({}, {}) lies strictly below the bound set {}",
                z1,
                z2,
                lb
            );
        } else {
            assert!(z2 >= segment.p2().z2() - 1e-6);
        }
    }
    // The lexicographic extremes are the outermost feasible points.
    assert_eq!(segments[0].p1(), Point::new(0.0, 12.0));
    assert_eq!(segments[segments.len() - 1].p2(), Point::new(12.0, 0.0));
}

#[test]
fn test_split_pieces_cover_the_filtered_bound_set() {
    let mut oracle = PointSetOracle::from_points(&NONCONVEX, OracleMode::Relaxed);
    let mut monitor = NoOperationMonitor::new();
    let config = SearchConfig::default();
    let mut ctx = SearchContext::new(&mut oracle, &mut monitor, &config);
    let mut frontier = ctx.new_frontier();
    let mut lb = LowerBoundSet::compute(&mut ctx, ObjectiveBounds::unbounded(), &mut frontier).unwrap();

    // A corner above the middle of the hull cuts a hole into it.
    let mut cut = ParetoSet::new();
    cut.record(Point::new(6.0, 4.0), DecisionSnapshot::empty());
    lb.filter(&cut, None);
    assert!(!lb.is_empty(), "only part of the hull is dominated");

    let regions = lb.discontinuous_regions(config.lb_max_gap);
    let pieces = lb.split(config.lb_max_gap);
    assert_eq!(pieces.len(), regions.len());
    for (piece, region) in pieces.iter().zip(&regions) {
        assert_eq!(piece.bounds(), Some(*region));
    }
    let rejoined: Vec<_> = pieces.iter().flat_map(|piece| piece.segments().iter().cloned()).collect();
    assert_eq!(rejoined, lb.segments(), "splitting must partition the segments");
}
