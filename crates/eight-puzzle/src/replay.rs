//! Replays a move sequence against a board.
//!
//! Used to check that a reported solution actually reaches the goal.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, Goal};

/// Result status of a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ReplayStatus {
    /// Final board equals the goal
    Solved,
    /// Every move applied, goal not reached
    NotSolved,
    /// The move at `index` would take the blank off the grid
    IllegalMove { index: usize },
}

/// Result of replaying a move sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub status: ReplayStatus,
    /// Board after the last legal move
    pub final_board: Board,
    pub moves_applied: usize,
}

/// Apply `moves` to `initial` in order, stopping at the first illegal move.
pub fn replay(initial: &Board, moves: &[Direction], goal: &Goal) -> ReplayResult {
    let mut board = *initial;

    for (index, &direction) in moves.iter().enumerate() {
        match board.apply_move(direction) {
            Some(next) => board = next,
            None => {
                return ReplayResult {
                    status: ReplayStatus::IllegalMove { index },
                    final_board: board,
                    moves_applied: index,
                };
            }
        }
    }

    let status = if goal.is_goal(&board) {
        ReplayStatus::Solved
    } else {
        ReplayStatus::NotSolved
    };

    ReplayResult {
        status,
        final_board: board,
        moves_applied: moves.len(),
    }
}

/// Simple verification: do the moves solve the board?
pub fn verify_solution(initial: &Board, moves: &[Direction], goal: &Goal) -> bool {
    replay(initial, moves, goal).status == ReplayStatus::Solved
}
