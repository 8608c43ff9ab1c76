use std::cmp::Ordering;

use crate::moves::Move;
use crate::state::State;

/// A state together with how the search got there.
///
/// Nodes live in an arena owned by one search run,
/// `prev` links form a tree rooted at the initial state.
#[derive(Debug)]
pub(crate) struct SearchNode<'a> {
    pub(crate) state: State,
    pub(crate) prev: Option<&'a SearchNode<'a>>,
    pub(crate) prev_move: Option<Move>,
    /// Number of pushes from the initial state
    pub(crate) dist: u32,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn root(state: State) -> Self {
        SearchNode {
            state,
            prev: None,
            prev_move: None,
            dist: 0,
        }
    }

    pub(crate) fn child(&'a self, mov: Move, state: State) -> Self {
        SearchNode {
            state,
            prev: Some(self),
            prev_move: Some(mov),
            dist: self.dist + 1,
        }
    }
}

/// Frontier entry of the best-first searches
#[derive(Debug)]
pub(crate) struct Candidate<'a> {
    pub(crate) node: &'a SearchNode<'a>,
    pub(crate) cost: i64,
    pub(crate) counter: u64,
}

impl<'a> PartialEq for Candidate<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.counter == other.counter
    }
}

impl<'a> Eq for Candidate<'a> {}

impl<'a> PartialOrd for Candidate<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Ord for Candidate<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        // lower cost first, then whatever was inserted earlier
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BinaryHeap;

    use crate::level::Level;

    #[test]
    fn heap_order() {
        let level: Level = "#@$.#".parse().unwrap();
        let root = SearchNode::root(level.initial_state());

        let mut heap = BinaryHeap::new();
        for &(cost, counter) in &[(5, 0), (3, 2), (3, 1), (-4, 3), (5, 4)] {
            heap.push(Candidate {
                node: &root,
                cost,
                counter,
            });
        }
        let order: Vec<_> = ::std::iter::from_fn(|| heap.pop())
            .map(|candidate| (candidate.cost, candidate.counter))
            .collect();
        assert_eq!(order, vec![(-4, 3), (3, 1), (3, 2), (5, 0), (5, 4)]);
    }

    #[test]
    fn children() {
        let level: Level = "#@$.#".parse().unwrap();
        let root = SearchNode::root(level.initial_state());
        let (mov, state) = root.state.successors().remove(0);
        let child = root.child(mov, state);
        assert_eq!(child.dist, 1);
        assert_eq!(child.prev_move, Some(mov));
        assert!(child.state.is_solved());
        assert!(::std::ptr::eq(child.prev.unwrap(), &root));
    }
}
