//! Inversion-parity solvability check.
//!
//! On an odd-width grid a move never changes the parity of the tile
//! inversion count. Boards split into two classes of 181,440, and moves
//! never cross from one class to the other. The solver does not call this;
//! an unsolvable board simply exhausts the frontier.

use crate::board::{Board, Goal, BLANK};

/// Number of tile pairs that appear in the opposite order to their values,
/// ignoring the blank.
pub fn inversion_count(board: &Board) -> usize {
    let tiles: Vec<u8> = board
        .cells()
        .iter()
        .copied()
        .filter(|&c| c != BLANK)
        .collect();

    let mut inversions = 0;
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            if tiles[i] > tiles[j] {
                inversions += 1;
            }
        }
    }
    inversions
}

/// Whether `board` is in the same parity class as the goal.
pub fn is_solvable(board: &Board, goal: &Goal) -> bool {
    inversion_count(board) % 2 == inversion_count(goal.board()) % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::distance_table;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_inversion_count() {
        assert_eq!(inversion_count(&Board::canonical_goal()), 0);
        assert_eq!(inversion_count(&board("b 2 1 3 4 5 6 7 8")), 1);
        assert_eq!(inversion_count(&board("8 7 6 5 4 3 2 1 b")), 28);
    }

    #[test]
    fn test_fixture_solvability() {
        let goal = Goal::default();
        assert!(is_solvable(&board("1 2 b 3 4 5 6 7 8"), &goal));
        assert!(is_solvable(&board("8 6 7 2 5 4 3 b 1"), &goal));
        assert!(!is_solvable(&board("b 2 1 3 4 5 6 7 8"), &goal));
        assert!(!is_solvable(&board("1 2 3 4 5 6 8 7 b"), &goal));
    }

    #[test]
    fn test_parity_matches_reachability() {
        let goal = Goal::default();
        let table = distance_table(&goal);
        assert!(table.keys().all(|b| is_solvable(b, &goal)));
    }
}
