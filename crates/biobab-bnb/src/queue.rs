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

//! # Open Node Queue
//!
//! [`NodeQueue`] holds the open subproblems of a search in the order given by
//! an [`ExplorationStrategy`]: first-in first-out, last-in first-out, or
//! smallest score first. Best-first ties pop in insertion order, so equal
//! scores behave like a FIFO.
//!
//! The queue is generic over anything with a [`Prioritized::score`]; tree
//! search nodes and the rectangles of the balanced box method share it.

use crate::node::Node;
use biobab_core::math::rectangle::Rectangle;
use biobab_search::config::ExplorationStrategy;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// Items that can be ordered best-first. Smaller scores pop first.
pub trait Prioritized {
    fn score(&self) -> f64;
}

impl Prioritized for Node {
    #[inline]
    fn score(&self) -> f64 {
        Node::score(self)
    }
}

impl Prioritized for Rectangle {
    #[inline]
    fn score(&self) -> f64 {
        Rectangle::score(self)
    }
}

#[derive(Debug)]
struct Ranked<T> {
    score: f64,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug)]
enum Storage<T> {
    Fifo(VecDeque<T>),
    Lifo(Vec<T>),
    Best(BinaryHeap<Reverse<Ranked<T>>>),
}

#[derive(Debug)]
pub struct NodeQueue<T> {
    storage: Storage<T>,
    sequence: u64,
}

impl<T> NodeQueue<T>
where
    T: Prioritized,
{
    pub fn new(strategy: ExplorationStrategy) -> Self {
        let storage = match strategy {
            ExplorationStrategy::BreadthFirst => Storage::Fifo(VecDeque::new()),
            ExplorationStrategy::DepthFirst => Storage::Lifo(Vec::new()),
            ExplorationStrategy::BestFirst => Storage::Best(BinaryHeap::new()),
        };
        Self {
            storage,
            sequence: 0,
        }
    }

    pub fn strategy(&self) -> ExplorationStrategy {
        match self.storage {
            Storage::Fifo(_) => ExplorationStrategy::BreadthFirst,
            Storage::Lifo(_) => ExplorationStrategy::DepthFirst,
            Storage::Best(_) => ExplorationStrategy::BestFirst,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Fifo(q) => q.len(),
            Storage::Lifo(s) => s.len(),
            Storage::Best(h) => h.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, item: T) {
        match &mut self.storage {
            Storage::Fifo(q) => q.push_back(item),
            Storage::Lifo(s) => s.push(item),
            Storage::Best(h) => {
                let sequence = self.sequence;
                self.sequence += 1;
                h.push(Reverse(Ranked {
                    score: item.score(),
                    sequence,
                    item,
                }));
            }
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        match &mut self.storage {
            Storage::Fifo(q) => q.pop_front(),
            Storage::Lifo(s) => s.pop(),
            Storage::Best(h) => h.pop().map(|Reverse(ranked)| ranked.item),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Fifo(q) => q.clear(),
            Storage::Lifo(s) => s.clear(),
            Storage::Best(h) => h.clear(),
        }
    }
}

impl<T> Extend<T> for NodeQueue<T>
where
    T: Prioritized,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biobab_core::math::point::Point;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, f64);

    impl Prioritized for Item {
        fn score(&self) -> f64 {
            self.1
        }
    }

    fn drain(mut queue: NodeQueue<Item>) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.pop()).map(|i| i.0).collect()
    }

    fn filled(strategy: ExplorationStrategy) -> NodeQueue<Item> {
        let mut queue = NodeQueue::new(strategy);
        queue.extend([Item("a", 3.0), Item("b", 1.0), Item("c", 3.0), Item("d", 2.0)]);
        queue
    }

    #[test]
    fn test_breadth_first_is_fifo() {
        assert_eq!(drain(filled(ExplorationStrategy::BreadthFirst)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_depth_first_is_lifo() {
        assert_eq!(drain(filled(ExplorationStrategy::DepthFirst)), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_best_first_pops_smallest_score_and_breaks_ties_by_insertion() {
        let queue = filled(ExplorationStrategy::BestFirst);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.strategy(), ExplorationStrategy::BestFirst);
        assert_eq!(drain(queue), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_rectangles_pop_largest_area_first() {
        let mut queue = NodeQueue::new(ExplorationStrategy::BestFirst);
        queue.push(Rectangle::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0)));
        queue.push(Rectangle::new(Point::new(0.0, 9.0), Point::new(9.0, 0.0)));
        queue.push(Rectangle::new(Point::new(0.0, 3.0), Point::new(3.0, 0.0)));
        let areas: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|r| r.area()).collect();
        assert_eq!(areas, vec![81.0, 9.0, 4.0]);
    }

    #[test]
    fn test_clear_empties_every_storage() {
        for strategy in [
            ExplorationStrategy::BreadthFirst,
            ExplorationStrategy::DepthFirst,
            ExplorationStrategy::BestFirst,
        ] {
            let mut queue = filled(strategy);
            queue.clear();
            assert!(queue.is_empty(), "{:?} queue not empty after clear", strategy);
        }
    }
}
