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

//! What the oracle reported at a lower bound point, and the per-variable view
//! of those reports that branching works on.

use biobab_core::math::point::Point;
use biobab_model::{index::VariableIndex, snapshot::DecisionSnapshot};
use smallvec::SmallVec;

/// The oracle's assignment at one point of a lower bound set.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMetadata {
    snapshot: DecisionSnapshot,
    is_integer: bool,
}

impl PointMetadata {
    #[inline]
    pub fn new(snapshot: DecisionSnapshot, is_integer: bool) -> Self {
        Self {
            snapshot,
            is_integer,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> &DecisionSnapshot {
        &self.snapshot
    }

    /// `true` if the oracle's solution at this point was integral.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.is_integer
    }
}

/// Values one variable took across the points of a lower bound set.
pub type ValueList = SmallVec<[f64; 8]>;

/// For every decision variable, the values it took at the distinct points of
/// a lower bound set. Variables are visited in ascending index order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableValues {
    values: Vec<ValueList>,
}

impl VariableValues {
    /// Collects the values of every snapshot in `metadata`.
    pub fn collect<'a, I>(metadata: I) -> Self
    where
        I: IntoIterator<Item = &'a PointMetadata>,
    {
        let mut values: Vec<ValueList> = Vec::new();
        for entry in metadata {
            let snapshot = entry.snapshot().values();
            if values.len() < snapshot.len() {
                values.resize_with(snapshot.len(), ValueList::new);
            }
            for (list, &value) in values.iter_mut().zip(snapshot) {
                list.push(value);
            }
        }
        Self { values }
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }

    /// The values `variable` took, empty if it never appeared.
    #[inline]
    pub fn get(&self, variable: VariableIndex) -> &[f64] {
        self.values.get(variable.get()).map_or(&[], |v| v.as_slice())
    }

    /// Every variable with at least one recorded value.
    pub fn iter(&self) -> impl Iterator<Item = (VariableIndex, &[f64])> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_empty())
            .map(|(i, v)| (VariableIndex::new(i), v.as_slice()))
    }
}

/// Distinct points of a set of segments with the metadata recorded for them.
/// The first metadata seen for a point wins.
pub(crate) fn distinct_points<'a, I>(entries: I) -> Vec<(Point, &'a PointMetadata)>
where
    I: IntoIterator<Item = (Point, &'a PointMetadata)>,
{
    let mut seen: Vec<(Point, &'a PointMetadata)> = Vec::new();
    for (point, metadata) in entries {
        if !seen.iter().any(|(p, _)| *p == point) {
            seen.push((point, metadata));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(values: &[f64]) -> PointMetadata {
        let snapshot = DecisionSnapshot::new(values.to_vec());
        let integral = snapshot.is_integral(1e-6);
        PointMetadata::new(snapshot, integral)
    }

    #[test]
    fn test_collect_groups_values_per_variable() {
        let entries = [meta(&[1.0, 0.5]), meta(&[0.0, 0.25]), meta(&[1.0, 1.0])];
        let values = VariableValues::collect(entries.iter());
        assert_eq!(values.num_variables(), 2);
        assert_eq!(values.get(VariableIndex::new(0)), &[1.0, 0.0, 1.0]);
        assert_eq!(values.get(VariableIndex::new(1)), &[0.5, 0.25, 1.0]);
        assert!(values.get(VariableIndex::new(7)).is_empty());
    }

    #[test]
    fn test_iter_visits_variables_in_index_order() {
        let entries = [meta(&[0.0, 1.0, 0.5])];
        let values = VariableValues::collect(entries.iter());
        let order: Vec<usize> = values.iter().map(|(v, _)| v.get()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_distinct_points_keeps_first_metadata() {
        let a = meta(&[1.0]);
        let b = meta(&[0.0]);
        let p = Point::new(1.0, 2.0);
        let q = Point::new(2.0, 1.0);
        let distinct = distinct_points([(p, &a), (q, &b), (p, &b)]);
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].1, &a);
    }

    #[test]
    fn test_integrality_flag() {
        assert!(meta(&[0.0, 1.0]).is_integer());
        assert!(!meta(&[0.5]).is_integer());
    }
}
