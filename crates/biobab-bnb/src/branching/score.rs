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

//! # Variable Scores
//!
//! Every variable brancher follows the same pattern: look at the values each
//! binary variable took at the points of a lower bound set, skip variables
//! whose average is already integral, and pick the one with the highest score.
//! Only the score differs between the rules. Oracle branch priorities take
//! precedence over scores: a variable of lower priority than the current best
//! is never considered, and a positive-scoring variable of higher priority
//! replaces a positive-scoring best.

use crate::bound::metadata::VariableValues;
use biobab_core::num::tolerance::is_fractional;
use biobab_model::{index::VariableIndex, oracle::ScalarizationOracle};

/// Values closer than this to 0 or 1 count as integral.
pub const ZERO: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableScore {
    /// Largest fractional value.
    ClosestToOne,
    /// One minus the smallest fractional value.
    FurthestFromOne,
    /// Number of points at which the variable is fractional.
    OftenFractional,
    /// Inverse of the mean distance of the values to 0.5.
    FractionalOnAverage,
    /// Inverse of the distance of the mean value to 0.5.
    FractionalAverage,
    /// Difference between the largest and the smallest value.
    Spread,
    /// Width of the oracle's objective ranging interval.
    Sensitivity,
}

impl VariableScore {
    /// Score of `variable` given the `values` it took. Higher is better.
    pub fn score<O>(&self, variable: VariableIndex, values: &[f64], oracle: &O) -> f64
    where
        O: ScalarizationOracle + ?Sized,
    {
        let fractional = || values.iter().copied().filter(|&v| v < 1.0 - ZERO);
        match self {
            VariableScore::ClosestToOne => fractional().fold(0.0, f64::max),
            VariableScore::FurthestFromOne => fractional()
                .reduce(f64::min)
                .map_or(0.0, |lowest| 1.0 - lowest),
            VariableScore::OftenFractional => {
                values.iter().filter(|&&v| is_fractional(v, ZERO)).count() as f64
            }
            VariableScore::FractionalOnAverage => {
                let distance = average(values.iter().map(|v| (v - 0.5).abs()));
                1.0 / distance.max(ZERO)
            }
            VariableScore::FractionalAverage => {
                let distance = (average(values.iter().copied()) - 0.5).abs();
                1.0 / distance.max(ZERO)
            }
            VariableScore::Spread => {
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                if values.is_empty() { 0.0 } else { max - min }
            }
            VariableScore::Sensitivity => oracle
                .objective_sensitivity(variable)
                .map_or(0.0, |(low, up)| up - low),
        }
    }

    /// The variable to branch on, or `None` if every candidate is integral on
    /// average or scores zero.
    pub fn best_candidate<O>(&self, values: &VariableValues, oracle: &O) -> Option<VariableIndex>
    where
        O: ScalarizationOracle + ?Sized,
    {
        let mut best: Option<(VariableIndex, f64)> = None;
        for (variable, list) in values.iter() {
            let priority = oracle.branch_priority(variable);
            if let Some((current, _)) = best {
                if oracle.branch_priority(current) > priority {
                    continue;
                }
            }

            let avg = average(list.iter().copied());
            if avg <= ZERO || avg >= 1.0 - ZERO {
                continue;
            }

            let score = self.score(variable, list, oracle);
            let better = match best {
                None => score > 0.0,
                Some((current, best_score)) => {
                    score > best_score
                        || (best_score > 0.0
                            && score > 0.0
                            && priority > oracle.branch_priority(current))
                }
            };
            if better {
                best = Some((variable, score));
            }
        }
        best.map(|(variable, _)| variable)
    }
}

impl std::fmt::Display for VariableScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VariableScore::ClosestToOne => "ClosestToOne",
            VariableScore::FurthestFromOne => "FurthestFromOne",
            VariableScore::OftenFractional => "OftenFractional",
            VariableScore::FractionalOnAverage => "FractionalOnAverage",
            VariableScore::FractionalAverage => "FractionalAverage",
            VariableScore::Spread => "Spread",
            VariableScore::Sensitivity => "Sensitivity",
        };
        write!(f, "{}", name)
    }
}

#[inline]
fn average<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::metadata::PointMetadata;
    use biobab_model::{
        point_set::{PointSetOracle, PointSetOracleBuilder},
        snapshot::DecisionSnapshot,
    };

    /// One row per point, one column per variable.
    fn values(rows: &[&[f64]]) -> VariableValues {
        let metadata: Vec<PointMetadata> = rows
            .iter()
            .map(|row| PointMetadata::new(DecisionSnapshot::new(row.to_vec()), false))
            .collect();
        VariableValues::collect(metadata.iter())
    }

    fn oracle(num_variables: usize) -> PointSetOracle {
        PointSetOracleBuilder::new(num_variables).build()
    }

    fn x(i: usize) -> Option<VariableIndex> {
        Some(VariableIndex::new(i))
    }

    #[test]
    fn test_closest_and_furthest_from_one_disagree() {
        let v = values(&[&[0.2, 0.6], &[0.5, 0.7]]);
        let o = oracle(2);
        assert_eq!(VariableScore::ClosestToOne.best_candidate(&v, &o), x(1));
        assert_eq!(VariableScore::FurthestFromOne.best_candidate(&v, &o), x(0));
    }

    #[test]
    fn test_integral_averages_are_never_selected() {
        let v = values(&[&[0.0, 1.0], &[0.0, 1.0]]);
        for rule in [
            VariableScore::ClosestToOne,
            VariableScore::OftenFractional,
            VariableScore::FractionalAverage,
            VariableScore::Spread,
        ] {
            assert_eq!(rule.best_candidate(&v, &oracle(2)), None, "{} picked an integral variable", rule);
        }
    }

    #[test]
    fn test_often_fractional_counts_fractional_points() {
        let v = values(&[&[0.5, 0.5], &[0.0, 0.5], &[0.0, 0.0]]);
        let o = oracle(2);
        assert_eq!(VariableScore::OftenFractional.score(VariableIndex::new(1), v.get(VariableIndex::new(1)), &o), 2.0);
        assert_eq!(VariableScore::OftenFractional.best_candidate(&v, &o), x(1));
    }

    #[test]
    fn test_fractional_average_and_spread() {
        let v = values(&[&[0.4, 0.0], &[0.6, 1.0], &[0.5, 0.5]]);
        let o = oracle(2);
        // x0 averages exactly 0.5; x1 also averages 0.5 but is spread out.
        assert_eq!(VariableScore::Spread.best_candidate(&v, &o), x(1));
        assert_eq!(VariableScore::FractionalOnAverage.best_candidate(&v, &o), x(0));
    }

    #[test]
    fn test_higher_priority_replaces_better_score() {
        let v = values(&[&[0.5, 0.1]]);
        let o = PointSetOracleBuilder::new(2)
            .branch_priority(VariableIndex::new(1), 1)
            .build();
        assert_eq!(VariableScore::FractionalAverage.best_candidate(&v, &o), x(1));
        assert_eq!(VariableScore::FractionalAverage.best_candidate(&v, &oracle(2)), x(0));
    }

    #[test]
    fn test_lower_priority_is_skipped() {
        let v = values(&[&[0.1, 0.5]]);
        let o = PointSetOracleBuilder::new(2)
            .branch_priority(VariableIndex::new(0), 3)
            .build();
        assert_eq!(VariableScore::FractionalAverage.best_candidate(&v, &o), x(0));
    }

    #[test]
    fn test_sensitivity_without_ranging_information_selects_nothing() {
        let v = values(&[&[0.5]]);
        assert_eq!(VariableScore::Sensitivity.best_candidate(&v, &oracle(1)), None);
    }
}
