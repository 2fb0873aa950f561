//! Priority frontier for the best-first solver.
//!
//! Entries pop in ascending total cost. Equal costs pop in insertion order, so
//! a search run is fully deterministic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::board::Board;
use crate::solver::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    total_cost: u32,
    sequence: u64,
    node: NodeId,
    board: Board,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // BinaryHeap is a max-heap; reverse so the cheapest, oldest entry is on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total_cost
            .cmp(&self.total_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open list plus a board index for O(1) "already queued" checks.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    queued: HashSet<Board>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `board` currently has an entry.
    pub fn contains(&self, board: &Board) -> bool {
        self.queued.contains(board)
    }

    /// Queue `node` for `board` at `total_cost`.
    ///
    /// Returns `false` and leaves the frontier unchanged if the board is
    /// already queued. Costs of queued entries are never revised.
    pub fn push(&mut self, board: Board, total_cost: u32, node: NodeId) -> bool {
        if !self.queued.insert(board) {
            return false;
        }
        self.heap.push(Entry {
            total_cost,
            sequence: self.next_sequence,
            node,
            board,
        });
        self.next_sequence += 1;
        true
    }

    /// Remove the cheapest entry and drop its board from the index.
    pub fn pop(&mut self) -> Option<NodeId> {
        let entry = self.heap.pop()?;
        self.queued.remove(&entry.board);
        Some(entry.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_pops_in_cost_order() {
        let mut frontier = Frontier::new();
        frontier.push(board("1 2 b 3 4 5 6 7 8"), 5, NodeId(0));
        frontier.push(board("1 b 2 3 4 5 6 7 8"), 1, NodeId(1));
        frontier.push(board("b 1 2 3 4 5 6 7 8"), 3, NodeId(2));

        assert_eq!(frontier.pop(), Some(NodeId(1)));
        assert_eq!(frontier.pop(), Some(NodeId(2)));
        assert_eq!(frontier.pop(), Some(NodeId(0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(board("1 2 b 3 4 5 6 7 8"), 2, NodeId(7));
        frontier.push(board("1 b 2 3 4 5 6 7 8"), 2, NodeId(3));
        frontier.push(board("b 1 2 3 4 5 6 7 8"), 2, NodeId(5));

        assert_eq!(frontier.pop(), Some(NodeId(7)));
        assert_eq!(frontier.pop(), Some(NodeId(3)));
        assert_eq!(frontier.pop(), Some(NodeId(5)));
    }

    #[test]
    fn test_membership_tracks_queue() {
        let mut frontier = Frontier::new();
        let b = board("1 2 b 3 4 5 6 7 8");

        assert!(frontier.push(b, 4, NodeId(0)));
        assert!(frontier.contains(&b));
        // A cheaper duplicate is ignored, not used to revise the entry.
        assert!(!frontier.push(b, 1, NodeId(1)));
        assert_eq!(frontier.len(), 1);

        assert_eq!(frontier.pop(), Some(NodeId(0)));
        assert!(!frontier.contains(&b));
        assert!(frontier.is_empty());
    }
}
