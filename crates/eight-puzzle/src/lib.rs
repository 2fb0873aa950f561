//! Best-first and A* solver for the 8-puzzle.
//!
//! This crate provides a single search engine with pluggable heuristics,
//! plus a breadth-first reference solver and a batch experiment runner used
//! to compare heuristics against each other.

pub mod bfs;
pub mod board;
pub mod experiment;
pub mod frontier;
pub mod heuristic;
pub mod parity;
pub mod replay;
pub mod solver;

// Re-export main types
pub use board::{Board, BoardError, Direction, Goal};
pub use experiment::{run_experiment, ExperimentReport, HeuristicSummary, RunRecord};
pub use heuristic::{
    manhattan_distance, misplaced_row_column, misplaced_tiles, Heuristic, HeuristicKind, Named,
};
pub use replay::{replay, verify_solution, ReplayResult, ReplayStatus};
pub use solver::{
    expand, search, SearchConfig, SearchMode, SearchNode, SearchResult, SearchStatus,
};
