//! Breadth-first reference search.
//!
//! Gives exact move counts. The solver tests use it as ground truth, and the
//! CLI uses it to report the optimal length next to a heuristic result.

use std::collections::{HashMap, VecDeque};

use crate::board::{Board, Goal};

/// Length of the shortest move sequence from `initial` to the goal, or
/// `None` if the goal is unreachable.
pub fn shortest_path_length(initial: &Board, goal: &Goal) -> Option<u32> {
    if goal.is_goal(initial) {
        return Some(0);
    }

    let mut depth: HashMap<Board, u32> = HashMap::new();
    let mut queue: VecDeque<Board> = VecDeque::new();
    depth.insert(*initial, 0);
    queue.push_back(*initial);

    while let Some(board) = queue.pop_front() {
        let next_depth = depth[&board] + 1;
        for (_, next) in board.neighbors() {
            if depth.contains_key(&next) {
                continue;
            }
            if goal.is_goal(&next) {
                return Some(next_depth);
            }
            depth.insert(next, next_depth);
            queue.push_back(next);
        }
    }

    None
}

/// Exact distance to the goal for every board that can reach it.
///
/// Moves are reversible, so a breadth-first sweep outward from the goal gives
/// each board's distance to it. The table covers one parity class of the
/// puzzle: 181,440 boards.
pub fn distance_table(goal: &Goal) -> HashMap<Board, u32> {
    let start = *goal.board();
    let mut distances: HashMap<Board, u32> = HashMap::new();
    let mut queue: VecDeque<Board> = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);

    while let Some(board) = queue.pop_front() {
        let next_distance = distances[&board] + 1;
        for (_, next) in board.neighbors() {
            distances.entry(next).or_insert_with(|| {
                queue.push_back(next);
                next_distance
            });
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_shortest_path_lengths() {
        let goal = Goal::default();
        assert_eq!(shortest_path_length(goal.board(), &goal), Some(0));
        assert_eq!(shortest_path_length(&board("1 b 2 3 4 5 6 7 8"), &goal), Some(1));
        assert_eq!(shortest_path_length(&board("1 2 b 3 4 5 6 7 8"), &goal), Some(2));
        assert_eq!(shortest_path_length(&board("b 3 4 8 1 2 7 6 5"), &goal), Some(16));
    }

    #[test]
    fn test_unreachable_goal() {
        let goal = Goal::default();
        assert_eq!(shortest_path_length(&board("b 2 1 3 4 5 6 7 8"), &goal), None);
    }

    #[test]
    fn test_distance_table_agrees_with_search() {
        let goal = Goal::default();
        let table = distance_table(&goal);
        assert_eq!(table.len(), 181_440);
        assert_eq!(table[goal.board()], 0);
        assert_eq!(table[&board("8 6 7 2 5 4 3 b 1")], 27);
        assert!(!table.contains_key(&board("b 2 1 3 4 5 6 7 8")));
        assert_eq!(table.values().copied().max(), Some(31));
    }
}
