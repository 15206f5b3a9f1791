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

use crate::stats::SearchStatistics;
use biobab_core::math::point::Point;
use biobab_model::pareto::ParetoSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted; the frontier is complete.
    Completed,
    /// A monitor stopped the search. The string contains the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The frontier found by a search, why it stopped and what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub frontier: ParetoSet,
    pub termination_reason: TerminationReason,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    #[inline]
    pub fn new(
        frontier: ParetoSet,
        termination_reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            frontier,
            termination_reason,
            statistics,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Completed)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Aborted(_))
    }

    /// The frontier points in ascending `z1` order.
    #[inline]
    pub fn points(&self) -> Vec<Point> {
        self.frontier.points().collect()
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        writeln!(f, "Frontier ({} points):", self.frontier.len())?;
        for point in self.frontier.points() {
            writeln!(f, "  {}", point)?;
        }
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_model::snapshot::DecisionSnapshot;

    #[test]
    fn test_outcome_accessors_and_display() {
        let mut frontier = ParetoSet::new();
        frontier.record(Point::new(1.0, 2.0), DecisionSnapshot::empty());
        let outcome = SearchOutcome::new(
            frontier,
            TerminationReason::Aborted("time limit reached".into()),
            SearchStatistics::default(),
        );
        assert!(outcome.is_aborted());
        assert!(!outcome.is_completed());
        assert_eq!(outcome.points(), vec![Point::new(1.0, 2.0)]);
        let rendered = format!("{}", outcome);
        assert!(rendered.contains("Aborted: time limit reached"));
        assert!(rendered.contains("Frontier (1 points):"));
        assert!(rendered.contains("  (1, 2)"));
    }
}
