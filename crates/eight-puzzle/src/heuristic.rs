//! Heuristic estimates of the number of moves left to reach the goal.
//!
//! The solver takes any [`Heuristic`]. The three reference estimates are
//! exposed as free functions and through [`HeuristicKind`].

use serde::{Deserialize, Serialize};

use crate::board::{row_col, Board, Goal};

/// Estimates moves-to-goal for a board.
///
/// Estimates are unsigned. None of the reference heuristics count the blank.
pub trait Heuristic {
    fn estimate(&self, board: &Board, goal: &Goal) -> u32;

    /// Label used in logs and reports. Closures all report `"custom"`; wrap
    /// them in [`Named`] to tell them apart.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Board, &Goal) -> u32,
{
    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        self(board, goal)
    }
}

/// Attaches a label to another heuristic, typically a closure.
#[derive(Debug, Clone)]
pub struct Named<H> {
    name: String,
    inner: H,
}

impl<H: Heuristic> Named<H> {
    pub fn new(name: impl Into<String>, inner: H) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl<H: Heuristic> Heuristic for Named<H> {
    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        self.inner.estimate(board, goal)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Number of tiles not on their goal cell
    MisplacedTiles,
    /// Sum of row and column distances to the goal cell
    Manhattan,
    /// One point for each tile out of its goal row, one for each out of its goal column
    MisplacedRowColumn,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::MisplacedTiles,
        HeuristicKind::Manhattan,
        HeuristicKind::MisplacedRowColumn,
    ];
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, board: &Board, goal: &Goal) -> u32 {
        match self {
            HeuristicKind::MisplacedTiles => misplaced_tiles(board, goal),
            HeuristicKind::Manhattan => manhattan_distance(board, goal),
            HeuristicKind::MisplacedRowColumn => misplaced_row_column(board, goal),
        }
    }

    fn name(&self) -> &str {
        match self {
            HeuristicKind::MisplacedTiles => "misplaced-tiles",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::MisplacedRowColumn => "misplaced-row-column",
        }
    }
}

/// Count of tiles that differ from the goal cell at the same position.
pub fn misplaced_tiles(board: &Board, goal: &Goal) -> u32 {
    board
        .tiles()
        .filter(|&(position, tile)| goal.board().tile_at(position) != Some(tile))
        .count() as u32
}

/// Sum over tiles of `|row - goal_row| + |col - goal_col|`.
pub fn manhattan_distance(board: &Board, goal: &Goal) -> u32 {
    board
        .tiles()
        .map(|(position, tile)| {
            let (row, col) = row_col(position);
            let (goal_row, goal_col) = row_col(goal.position_of(tile));
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}

/// Row mismatches plus column mismatches, counted per tile.
///
/// Never exceeds [`manhattan_distance`], but it is a weaker bound. Under A*
/// it can still return a longer path than optimal, because the solver never
/// reopens a board that is already queued or explored.
pub fn misplaced_row_column(board: &Board, goal: &Goal) -> u32 {
    board
        .tiles()
        .map(|(position, tile)| {
            let (row, col) = row_col(position);
            let (goal_row, goal_col) = row_col(goal.position_of(tile));
            u32::from(row != goal_row) + u32::from(col != goal_col)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::distance_table;
    use proptest::prelude::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn any_board() -> impl Strategy<Value = Board> {
        Just((0u8..9).collect::<Vec<u8>>())
            .prop_shuffle()
            .prop_map(|cells| Board::new(&cells).unwrap())
    }

    #[test]
    fn test_zero_at_goal() {
        let goal = Goal::default();
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.estimate(goal.board(), &goal), 0, "{}", kind.name());
        }

        let alt = Goal::new(board("1 2 3 4 5 6 7 8 b"));
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.estimate(alt.board(), &alt), 0, "{}", kind.name());
        }
    }

    #[test]
    fn test_known_values() {
        let goal = Goal::default();
        // 8 6 7 / 2 5 4 / 3 b 1
        let b = board("8 6 7 2 5 4 3 b 1");
        assert_eq!(misplaced_tiles(&b, &goal), 8);
        assert_eq!(manhattan_distance(&b, &goal), 19);
        assert_eq!(misplaced_row_column(&b, &goal), 13);

        let near = board("1 2 b 3 4 5 6 7 8");
        assert_eq!(misplaced_tiles(&near, &goal), 2);
        assert_eq!(manhattan_distance(&near, &goal), 2);
        assert_eq!(misplaced_row_column(&near, &goal), 2);
    }

    #[test]
    fn test_blank_is_ignored() {
        let goal = Goal::default();
        // Only the blank and tile 1 swapped: one tile out of place.
        let b = board("1 b 2 3 4 5 6 7 8");
        assert_eq!(misplaced_tiles(&b, &goal), 1);
        assert_eq!(manhattan_distance(&b, &goal), 1);
        assert_eq!(misplaced_row_column(&b, &goal), 1);
    }

    #[test]
    fn test_closure_is_a_heuristic() {
        let zero = |_: &Board, _: &Goal| -> u32 { 0 };
        let goal = Goal::default();
        assert_eq!(zero.estimate(&board("8 6 7 2 5 4 3 b 1"), &goal), 0);
        assert_eq!(zero.name(), "custom");

        let named = Named::new("zero", zero);
        assert_eq!(named.estimate(&board("8 6 7 2 5 4 3 b 1"), &goal), 0);
        assert_eq!(named.name(), "zero");
    }

    #[test]
    fn test_admissible_against_exact_distances() {
        let goal = Goal::default();
        let table = distance_table(&goal);
        assert_eq!(table.len(), 181_440);

        for (board, &distance) in &table {
            assert!(misplaced_tiles(board, &goal) <= distance, "{}", board);
            assert!(manhattan_distance(board, &goal) <= distance, "{}", board);
        }
    }

    proptest! {
        #[test]
        fn prop_dominance_order(b in any_board()) {
            let goal = Goal::default();
            let mis = misplaced_tiles(&b, &goal);
            let rc = misplaced_row_column(&b, &goal);
            let man = manhattan_distance(&b, &goal);
            prop_assert!(mis <= man);
            prop_assert!(rc <= man);
            prop_assert!(mis <= rc);
        }

        #[test]
        fn prop_one_move_changes_manhattan_by_one(b in any_board()) {
            let goal = Goal::default();
            let h = manhattan_distance(&b, &goal) as i64;
            for (_, next) in b.neighbors() {
                let h_next = manhattan_distance(&next, &goal) as i64;
                prop_assert_eq!((h - h_next).abs(), 1);
            }
        }
    }
}
